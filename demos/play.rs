use anyhow::{bail, Result};
use mlflow::{
    backend::{ClientConfig, Server},
    tracking::TrackingRun,
    Client,
};
use nanorand::{WyRand, RNG};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

struct Args {
    url: String,
    experiment: String,
    create: bool,
    runs: u32,
}

impl Args {
    pub fn from_env() -> Result<Self> {
        let mut args = pico_args::Arguments::from_env();
        Ok(Args {
            url: args
                .opt_value_from_str(["-u", "--url"])?
                .unwrap_or_else(|| "http://127.0.0.1:5000".to_string()),
            experiment: args.value_from_str(["-e", "--experiment"])?,
            create: args.contains(["-c", "--create"]),
            runs: args.opt_value_from_str(["-r", "--runs"])?.unwrap_or(1),
        })
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::from_env()?;
    let config = ClientConfig::new(&args.url).timeout(Duration::from_secs(10));
    let client = Server::from_config(&config);

    let experiment = if args.create {
        let id = match client.create_experiment(&args.experiment)? {
            Some(id) => id,
            None => {
                println!("The experiment {} could not be created, it may already exist.", args.experiment);
                println!("Run again without the -c or --create flag to fetch the existing experiment.");
                return Ok(());
            }
        };
        println!("Experiment with id {} was created successfully!", id);
        match client.get_experiment(&id)? {
            Some(experiment) => experiment,
            None => bail!("experiment {} vanished right after creation", id),
        }
    } else {
        match client.get_experiment_by_name(&args.experiment)? {
            Some(experiment) => {
                println!(
                    "Experiment {} with id {} was fetched successfully!",
                    experiment.name, experiment.experiment_id,
                );
                experiment
            }
            None => {
                println!("The experiment {} does not exist.", args.experiment);
                println!("Run again with the -c or --create flag to create a new experiment.");
                return Ok(());
            }
        }
    };

    for i in 0..args.runs {
        println!("Executing run {}", i);
        let mut run = TrackingRun::new();
        run.log_tag("mlflow.source.name", "play");
        run.log_param("i", &format!("{}", i));
        run.log_param("constant", "42");
        let mut rng = WyRand::new_seed(i.into());
        for s in 0..10 {
            let int: f64 = rng.generate::<u16>().into();
            let max: f64 = u16::MAX.into();
            run.log_metric("rand", int / max, s);
        }
        match run.submit(&client, &experiment.experiment_id)? {
            Some(run) => println!("Run {} finished", run.info.run_id),
            None => println!("The server rejected run {}", i),
        }
    }

    Ok(())
}
