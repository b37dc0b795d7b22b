use std::env;

use clap::Parser;
use log::{error, info};

use placement_sim::config::SimulationConfig;
use placement_sim::simulator::{run_custom_config, run_scenario, SimulationResult};

#[derive(Parser)]
struct Args {
    /// Scenario id from the built-in catalog, e.g. scenario1.
    #[clap(short, long, default_value = "scenario1", conflicts_with = "config_file")]
    scenario: String,
    /// Path to a yaml file with an explicit simulation config.
    #[clap(short, long)]
    config_file: Option<std::path::PathBuf>,
    /// Seed for workload generation; ignored when the config file sets one.
    #[clap(long, default_value_t = 123)]
    seed: u64,
}

fn main() {
    // log level INFO by default
    let mut env_logger_builder = env_logger::builder();
    if env::var("RUST_LOG").is_err() {
        env_logger_builder.filter_level(log::LevelFilter::Info);
    }
    env_logger_builder.init();

    let args = Args::parse();

    let result = if let Some(config_file) = &args.config_file {
        info!("Path to config file: {:?}", config_file);
        let config_yaml =
            std::fs::read_to_string(config_file).expect("could not read config file");
        let config = serde_yaml::from_str::<SimulationConfig>(&config_yaml)
            .expect("could not parse config file");
        run_custom_config(config)
    } else {
        info!("Running scenario {:?} with seed {}", args.scenario, args.seed);
        run_scenario(&args.scenario, args.seed)
    };

    match result {
        Ok(result) => print_result(&result),
        Err(err) => {
            error!("simulation failed: {}", err);
            std::process::exit(1);
        }
    }
}

fn print_result(result: &SimulationResult) {
    let serialized = serde_json::to_string_pretty(result).expect("result is serializable");
    println!("{}", serialized);
}
