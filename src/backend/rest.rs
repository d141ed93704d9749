use crate::{
    api::{
        client::Client,
        error::{Error, Result},
        experiment::Experiment,
        run::{Run, RunInfo, RunStatus, RunTag},
    },
    backend::{
        config::ClientConfig,
        dispatch::Dispatcher,
        query::{QueryParams, QueryValue},
    },
    ExperimentId, RunId,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Client for an MLflow tracking server reachable over HTTP.
#[derive(Debug, Clone)]
pub struct Server {
    base_url: String,
    dispatcher: Dispatcher,
}

impl Server {
    /// The `base_url` should be the server root, like `http://127.0.0.1:5000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Server::from_config(&ClientConfig::new(base_url))
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Server {
            base_url: config.base_url.clone(),
            dispatcher: Dispatcher::new(config.build_agent()),
        }
    }

    pub fn from_env() -> Result<Self> {
        Ok(Server::from_config(&ClientConfig::from_env()?))
    }

    /// Uses a caller-built agent, e.g. one with a proxy or custom TLS setup.
    pub fn with_agent(base_url: impl Into<String>, agent: ureq::Agent) -> Self {
        let config = ClientConfig::new(base_url);
        Server {
            base_url: config.base_url,
            dispatcher: Dispatcher::new(agent),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn fetch<E>(&self, request: E) -> Result<Option<E::Value>>
    where
        E: Endpoint + Query,
    {
        let body = self.dispatcher.get(&self.url(E::PATH), &request.query())?;
        body.map(|body| parse::<E::Response>(&body).map(E::extract))
            .transpose()
    }

    fn submit<E>(&self, request: E) -> Result<Option<E::Value>>
    where
        E: Endpoint + Serialize,
    {
        let body = self.dispatcher.post(&self.url(E::PATH), &request)?;
        body.map(|body| parse::<E::Response>(&body).map(E::extract))
            .transpose()
    }

    fn submit_void<E>(&self, request: E) -> Result<()>
    where
        E: VoidEndpoint + Serialize,
    {
        self.dispatcher.post(&self.url(E::PATH), &request)?;
        Ok(())
    }
}

fn parse<R: DeserializeOwned>(body: &[u8]) -> Result<R> {
    serde_json::from_slice(body).map_err(|source| Error::Deserialize {
        body: String::from_utf8_lossy(body).into_owned(),
        source,
    })
}

#[rustfmt::skip]
impl Client for Server {
    fn get_experiment(&self, id: &ExperimentId) -> Result<Option<Experiment>> {
        self.fetch(GetExperiment { experiment_id: id })
    }

    fn get_experiment_by_name(&self, name: &str) -> Result<Option<Experiment>> {
        self.fetch(GetExperimentByName { experiment_name: name })
    }

    fn create_experiment(&self, name: &str) -> Result<Option<ExperimentId>> {
        self.submit(CreateExperiment { name })
    }

    fn delete_experiment(&self, id: &ExperimentId) -> Result<()> {
        self.submit_void(DeleteExperiment { experiment_id: id })
    }

    fn create_run_with_start_time(&self, experiment_id: &ExperimentId, start_time: i64, tags: &[RunTag]) -> Result<Option<Run>> {
        self.submit(CreateRun { experiment_id, start_time, tags })
    }

    fn update_run_with_end_time(&self, id: &RunId, status: RunStatus, end_time: i64) -> Result<Option<RunInfo>> {
        self.submit(UpdateRun { run_id: id, status, end_time })
    }

    fn delete_run(&self, id: &RunId) -> Result<()> {
        self.submit_void(DeleteRun { run_id: id })
    }

    fn get_run(&self, id: &RunId) -> Result<Option<Run>> {
        self.fetch(GetRun { run_id: id })
    }

    fn log_param(&self, run_id: &RunId, key: &str, value: &str) -> Result<()> {
        self.submit_void(LogParam { run_id, key, value })
    }

    fn log_metric(&self, run_id: &RunId, key: &str, value: f64, timestamp: i64, step: i64) -> Result<()> {
        self.submit_void(LogMetric { run_id, key, value, timestamp, step })
    }

    fn set_tag(&self, run_id: &RunId, key: &str, value: &str) -> Result<()> {
        self.submit_void(SetTag { run_id, key, value })
    }
}

trait Endpoint {
    const PATH: &'static str;

    type Response: DeserializeOwned;
    type Value;

    fn extract(response: Self::Response) -> Self::Value;
}

/// Endpoints whose response carries nothing of interest.
trait VoidEndpoint {
    const PATH: &'static str;
}

/// GET endpoints send their fields as query parameters.
trait Query {
    fn query(&self) -> QueryParams;
}

fn single(key: &str, value: impl Into<QueryValue>) -> QueryParams {
    let mut params = QueryParams::new();
    params.insert(key.to_owned(), value.into());
    params
}

#[derive(Debug, Clone, Copy)]
struct GetExperiment<'a> {
    pub experiment_id: &'a ExperimentId,
}
#[derive(Deserialize)]
struct GetExperimentResponse {
    experiment: Experiment,
}
impl Query for GetExperiment<'_> {
    fn query(&self) -> QueryParams {
        single("experiment_id", self.experiment_id.as_ref())
    }
}
impl Endpoint for GetExperiment<'_> {
    const PATH: &'static str = "/api/2.0/mlflow/experiments/get";
    type Response = GetExperimentResponse;
    type Value = Experiment;

    fn extract(response: Self::Response) -> Self::Value {
        response.experiment
    }
}

#[derive(Debug, Clone, Copy)]
struct GetExperimentByName<'a> {
    pub experiment_name: &'a str,
}
impl Query for GetExperimentByName<'_> {
    fn query(&self) -> QueryParams {
        single("experiment_name", self.experiment_name)
    }
}
impl Endpoint for GetExperimentByName<'_> {
    const PATH: &'static str = "/api/2.0/mlflow/experiments/get-by-name";
    type Response = GetExperimentResponse;
    type Value = Experiment;

    fn extract(response: Self::Response) -> Self::Value {
        response.experiment
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
struct CreateExperiment<'a> {
    pub name: &'a str,
}
#[derive(Deserialize)]
struct CreateExperimentResponse {
    experiment_id: ExperimentId,
}
impl Endpoint for CreateExperiment<'_> {
    const PATH: &'static str = "/api/2.0/mlflow/experiments/create";
    type Response = CreateExperimentResponse;
    type Value = ExperimentId;

    fn extract(response: Self::Response) -> Self::Value {
        response.experiment_id
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
struct DeleteExperiment<'a> {
    pub experiment_id: &'a ExperimentId,
}
impl VoidEndpoint for DeleteExperiment<'_> {
    const PATH: &'static str = "/api/2.0/mlflow/experiments/delete";
}

#[derive(Debug, Clone, Copy, Serialize)]
struct CreateRun<'a> {
    pub experiment_id: &'a ExperimentId,
    pub start_time: i64,
    pub tags: &'a [RunTag],
}
#[derive(Deserialize)]
struct RunResponse {
    run: Run,
}
impl Endpoint for CreateRun<'_> {
    const PATH: &'static str = "/api/2.0/mlflow/runs/create";
    type Response = RunResponse;
    type Value = Run;

    fn extract(response: Self::Response) -> Self::Value {
        response.run
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
struct UpdateRun<'a> {
    pub run_id: &'a RunId,
    pub status: RunStatus,
    pub end_time: i64,
}
#[derive(Deserialize)]
struct UpdateRunResponse {
    run_info: RunInfo,
}
impl Endpoint for UpdateRun<'_> {
    const PATH: &'static str = "/api/2.0/mlflow/runs/update";
    type Response = UpdateRunResponse;
    type Value = RunInfo;

    fn extract(response: Self::Response) -> Self::Value {
        response.run_info
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
struct DeleteRun<'a> {
    pub run_id: &'a RunId,
}
impl VoidEndpoint for DeleteRun<'_> {
    const PATH: &'static str = "/api/2.0/mlflow/runs/delete";
}

#[derive(Debug, Clone, Copy)]
struct GetRun<'a> {
    pub run_id: &'a RunId,
}
impl Query for GetRun<'_> {
    fn query(&self) -> QueryParams {
        single("run_id", self.run_id.as_ref())
    }
}
impl Endpoint for GetRun<'_> {
    const PATH: &'static str = "/api/2.0/mlflow/runs/get";
    type Response = RunResponse;
    type Value = Run;

    fn extract(response: Self::Response) -> Self::Value {
        response.run
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
struct LogParam<'a> {
    pub run_id: &'a RunId,
    pub key: &'a str,
    pub value: &'a str,
}
impl VoidEndpoint for LogParam<'_> {
    const PATH: &'static str = "/api/2.0/mlflow/runs/log-parameter";
}

#[derive(Debug, Clone, Copy, Serialize)]
struct LogMetric<'a> {
    pub run_id: &'a RunId,
    pub key: &'a str,
    pub value: f64,
    pub timestamp: i64,
    pub step: i64,
}
impl VoidEndpoint for LogMetric<'_> {
    const PATH: &'static str = "/api/2.0/mlflow/runs/log-metric";
}

#[derive(Debug, Clone, Copy, Serialize)]
struct SetTag<'a> {
    pub run_id: &'a RunId,
    pub key: &'a str,
    pub value: &'a str,
}
impl VoidEndpoint for SetTag<'_> {
    const PATH: &'static str = "/api/2.0/mlflow/runs/set-tag";
}
