//! Round trip against a real tracking server.
//!
//! Run with `MLFLOW_TRACKING_URI=http://localhost:5000 cargo test -- --ignored`.

use mlflow::{api::run::RunStatus, backend::Server, tracking::TrackingRun, Client};

fn unique_name(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    format!("{}-{}", prefix, nanos)
}

#[test]
#[ignore]
fn experiment_and_run_round_trip() {
    let client = Server::from_env().expect("MLFLOW_TRACKING_URI must point to a server");

    let name = unique_name("mlflow-rs");
    let id = client.create_experiment(&name).unwrap().expect("experiment was not created");
    let experiment = client.get_experiment(&id).unwrap().unwrap();
    assert_eq!(experiment.experiment_id, id);
    let by_name = client.get_experiment_by_name(&name).unwrap().unwrap();
    assert_eq!(by_name.experiment_id, id);

    let mut run = TrackingRun::new();
    run.log_param("constant", "42");
    run.log_metric("value", 0.5, 0);
    let run = run.submit(&client, &id).unwrap().unwrap();
    assert_eq!(run.info.status, RunStatus::Finished);

    let fetched = client.get_run(&run.info.run_id).unwrap().unwrap();
    assert_eq!(fetched.info.run_id, run.info.run_id);

    client.delete_run(&run.info.run_id).unwrap();
    client.delete_experiment(&id).unwrap();
}
