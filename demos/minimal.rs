use mlflow::{backend::Server, tracking::TrackingRun, Client};
use nanorand::{WyRand, RNG};

fn main() {
    const EXPERIMENT: &str = "My Experiment";
    let client = Server::new("http://127.0.0.1:5000");
    let experiment = match client.get_experiment_by_name(EXPERIMENT).unwrap() {
        Some(experiment) => experiment.experiment_id,
        None => client
            .create_experiment(EXPERIMENT)
            .unwrap()
            .expect("Could neither get nor create the experiment"),
    };

    for i in 0..3 {
        println!("Executing run {}", i);
        let mut run = TrackingRun::new();
        run.log_param("i", &format!("{}", i));
        run.log_param("constant", "42");
        let mut rng = WyRand::new_seed(i);
        for s in 0..10 {
            let int: f64 = rng.generate::<u16>().into();
            let max: f64 = u16::MAX.into();
            run.log_metric("rand", int / max, s);
        }
        run.submit(&client, &experiment)
            .expect("Could not submit the run");
    }
}
