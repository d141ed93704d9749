use crate::api::{error::Result, experiment::*, id::*, run::*};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleStage {
    Active,
    Deleted,
}

/// Operations of the MLflow tracking API.
///
/// Every method performs a single blocking request. A server answer with a
/// status other than `200` yields `Ok(None)` (or `Ok(())`), so callers cannot
/// tell a missing resource from a rejected request. Only transport and
/// (de)serialization failures are reported as errors.
#[rustfmt::skip]
pub trait Client {
    fn get_experiment(&self, id: &ExperimentId) -> Result<Option<Experiment>>;
    fn get_experiment_by_name(&self, name: &str) -> Result<Option<Experiment>>;
    fn create_experiment(&self, name: &str) -> Result<Option<ExperimentId>>;
    fn delete_experiment(&self, id: &ExperimentId) -> Result<()>;

    fn create_run_with_start_time(&self, experiment: &ExperimentId, start_time: i64, tags: &[RunTag]) -> Result<Option<Run>>;
    fn update_run_with_end_time(&self, id: &RunId, status: RunStatus, end_time: i64) -> Result<Option<RunInfo>>;
    fn delete_run(&self, id: &RunId) -> Result<()>;
    fn get_run(&self, id: &RunId) -> Result<Option<Run>>;

    fn log_param(&self, run: &RunId, key: &str, value: &str) -> Result<()>;
    fn log_metric(&self, run: &RunId, key: &str, value: f64, timestamp: i64, step: i64) -> Result<()>;
    fn set_tag(&self, run: &RunId, key: &str, value: &str) -> Result<()>;

    /// Creates a run starting now.
    fn create_run(&self, experiment: &ExperimentId, tags: &[RunTag]) -> Result<Option<Run>> {
        self.create_run_with_start_time(experiment, crate::timestamp(), tags)
    }

    /// Moves a run to `status`, ending it now.
    fn update_run(&self, id: &RunId, status: RunStatus) -> Result<Option<RunInfo>> {
        self.update_run_with_end_time(id, status, crate::timestamp())
    }
}
