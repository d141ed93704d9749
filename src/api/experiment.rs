use serde::{Deserialize, Serialize};

use crate::{
    api::{client::LifecycleStage, opt_int64},
    ExperimentId,
};

/// Snapshot of an experiment as the server reported it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experiment {
    pub experiment_id: ExperimentId,
    pub name: String,
    pub artifact_location: String,
    pub lifecycle_stage: LifecycleStage,
    #[serde(default, deserialize_with = "opt_int64::deserialize")]
    pub last_update_time: Option<i64>,
    #[serde(default, deserialize_with = "opt_int64::deserialize")]
    pub creation_time: Option<i64>,
    #[serde(default)]
    pub tags: Vec<ExperimentTag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperimentTag {
    pub key: String,
    pub value: String,
}
