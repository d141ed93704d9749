use crate::{
    api::{
        error::Result,
        run::{Metric, Param, Run, RunStatus, RunTag},
    },
    timestamp, timestamp_millis, Client, ExperimentId,
};

/// A run recorded locally and sent to the server in one go.
///
/// The start time is taken when the `TrackingRun` is created. Calling
/// [`submit`][TrackingRun::submit] creates the run on the server with the
/// buffered tags, logs all params and metrics and marks it as finished.
#[derive(Debug, Clone)]
pub struct TrackingRun {
    start_time: i64,
    params: Vec<Param>,
    tags: Vec<RunTag>,
    metrics: Vec<Metric>,
}

impl TrackingRun {
    pub fn new() -> Self {
        TrackingRun {
            start_time: timestamp(),
            params: Vec::new(),
            tags: Vec::new(),
            metrics: Vec::new(),
        }
    }

    pub fn start_time(&self) -> i64 {
        self.start_time
    }

    pub fn log_param(&mut self, key: &str, value: &str) {
        self.params.push(Param {
            key: key.to_owned(),
            value: value.to_owned(),
        });
    }

    pub fn log_tag(&mut self, key: &str, value: &str) {
        self.tags.push(RunTag::new(key, value));
    }

    /// Records `value` for `key` at `step`, stamped with the current time in milliseconds.
    pub fn log_metric(&mut self, key: &str, value: f64, step: i64) {
        self.metrics.push(Metric {
            key: key.to_owned(),
            value,
            timestamp: timestamp_millis(),
            step,
        });
    }

    /// Returns `Ok(None)` when the server declined to create or finish the run.
    pub fn submit(self, client: &dyn Client, experiment: &ExperimentId) -> Result<Option<Run>> {
        let created = client.create_run_with_start_time(experiment, self.start_time, &self.tags)?;
        let mut run = match created {
            Some(run) => run,
            None => return Ok(None),
        };
        let id = run.info.run_id.clone();
        for param in &self.params {
            client.log_param(&id, &param.key, &param.value)?;
        }
        for metric in &self.metrics {
            client.log_metric(&id, &metric.key, metric.value, metric.timestamp, metric.step)?;
        }
        match client.update_run(&id, RunStatus::Finished)? {
            Some(info) => {
                run.info = info;
                Ok(Some(run))
            }
            None => Ok(None),
        }
    }
}

impl Default for TrackingRun {
    fn default() -> Self {
        TrackingRun::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::{client::LifecycleStage, experiment::Experiment, run::RunInfo},
        RunId,
    };
    use std::cell::RefCell;

    /// Records calls and answers like a server that accepts everything.
    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<String>>,
        reject_create: bool,
    }

    impl Recorder {
        fn record(&self, call: String) {
            self.calls.borrow_mut().push(call);
        }

        fn info(id: &RunId, status: RunStatus, start_time: i64, end_time: Option<i64>) -> RunInfo {
            RunInfo {
                run_id: id.clone(),
                run_uuid: None,
                experiment_id: "1".into(),
                user_id: None,
                status,
                start_time,
                end_time,
                artifact_uri: String::new(),
                lifecycle_stage: LifecycleStage::Active,
            }
        }
    }

    #[rustfmt::skip]
    impl Client for Recorder {
        fn get_experiment(&self, _: &ExperimentId) -> Result<Option<Experiment>> { unimplemented!() }
        fn get_experiment_by_name(&self, _: &str) -> Result<Option<Experiment>> { unimplemented!() }
        fn create_experiment(&self, _: &str) -> Result<Option<ExperimentId>> { unimplemented!() }
        fn delete_experiment(&self, _: &ExperimentId) -> Result<()> { unimplemented!() }
        fn delete_run(&self, _: &RunId) -> Result<()> { unimplemented!() }
        fn get_run(&self, _: &RunId) -> Result<Option<Run>> { unimplemented!() }

        fn create_run_with_start_time(&self, experiment: &ExperimentId, start_time: i64, tags: &[RunTag]) -> Result<Option<Run>> {
            self.record(format!("create {} {} tags={}", experiment, start_time, tags.len()));
            if self.reject_create {
                return Ok(None);
            }
            let info = Recorder::info(&"r1".into(), RunStatus::Running, start_time, None);
            Ok(Some(Run { info, data: Default::default() }))
        }

        fn update_run_with_end_time(&self, id: &RunId, status: RunStatus, end_time: i64) -> Result<Option<RunInfo>> {
            self.record(format!("update {} {:?}", id, status));
            Ok(Some(Recorder::info(id, status, 0, Some(end_time))))
        }

        fn log_param(&self, run: &RunId, key: &str, value: &str) -> Result<()> {
            self.record(format!("param {} {}={}", run, key, value));
            Ok(())
        }

        fn log_metric(&self, run: &RunId, key: &str, value: f64, _: i64, step: i64) -> Result<()> {
            self.record(format!("metric {} {}={}@{}", run, key, value, step));
            Ok(())
        }

        fn set_tag(&self, _: &RunId, _: &str, _: &str) -> Result<()> { unimplemented!() }
    }

    #[test]
    fn submit_creates_logs_and_finishes() {
        let mut run = TrackingRun::new();
        let start = run.start_time();
        run.log_tag("source", "tests");
        run.log_param("lr", "0.1");
        run.log_metric("loss", 0.5, 0);
        run.log_metric("loss", 0.25, 1);

        let client = Recorder::default();
        let submitted = run.submit(&client, &"1".into()).unwrap().unwrap();
        assert_eq!(submitted.info.status, RunStatus::Finished);
        assert!(submitted.info.end_time.is_some());

        assert_eq!(
            client.calls.into_inner(),
            vec![
                format!("create 1 {} tags=1", start),
                "param r1 lr=0.1".to_string(),
                "metric r1 loss=0.5@0".to_string(),
                "metric r1 loss=0.25@1".to_string(),
                "update r1 Finished".to_string(),
            ]
        );
    }

    #[test]
    fn submit_stops_when_run_is_not_created() {
        let mut run = TrackingRun::new();
        run.log_param("lr", "0.1");
        let client = Recorder {
            reject_create: true,
            ..Recorder::default()
        };
        assert!(run.submit(&client, &"1".into()).unwrap().is_none());
        assert_eq!(client.calls.into_inner().len(), 1);
    }

    #[test]
    fn default_records_current_start_time() {
        let run = TrackingRun::default();
        assert!((run.start_time() - timestamp()).abs() <= 5);
    }

    #[test]
    fn metrics_are_stamped_in_milliseconds() {
        let before = timestamp_millis();
        let mut run = TrackingRun::new();
        run.log_metric("loss", 1.0, 0);
        let stamped = run.metrics[0].timestamp;
        assert!(stamped >= before && stamped - before <= 5_000);
        assert!(stamped / 1000 - run.start_time() <= 5);
    }
}
