use sched_sim::cli::{self, Command, FormatArg, RunArgs};
use sched_sim::config;
use sched_sim::engine::{self, build_processes};
use sched_sim::error::Result;
use sched_sim::models::{AlgoConfig, SimConfig};
use sched_sim::output::{Formatter, HumanFormatter, JsonFormatter, SummaryFormatter};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = cli::parse_args()?;
    match args.command {
        Command::Run(run_args) => simulate(run_args),
        Command::ShowConfig(run_args) => show_config(run_args),
        Command::ListAlgorithms => {
            for algo in AlgoConfig::ALL {
                println!("{}", algo);
            }
            Ok(())
        }
    }
}

fn simulate(args: RunArgs) -> Result<()> {
    let (config, format) = config::build_config(args)?;
    let report = engine::run_simulation(&config)?;

    let formatter = formatter_for(&format);
    let output = formatter.write(&report)?;
    print!("{}", output);

    Ok(())
}

fn show_config(args: RunArgs) -> Result<()> {
    let (config, _) = config::build_config(args)?;
    engine::validate_config(&config)?;
    print_config(&config)
}

fn print_config(config: &SimConfig) -> Result<()> {
    println!("Algorithm: {}", config.algo);
    match config.algo {
        AlgoConfig::RoundRobin => println!("Quantum: {}", config.quantum),
        AlgoConfig::Mlfq => {
            let quantums: Vec<String> = config.quantums.iter().map(|q| q.to_string()).collect();
            println!("Quantums: {}", quantums.join(","));
        }
        AlgoConfig::Fcfs | AlgoConfig::Sjf => {}
    }

    let processes = build_processes(&config.processes, config.seed)?;
    println!("Processes:");
    for process in &processes {
        match process.priority {
            Some(priority) => println!(
                "- {} (arrival: {}, burst: {}, priority: {})",
                process.id, process.arrival_time, process.burst_time, priority
            ),
            None => println!(
                "- {} (arrival: {}, burst: {})",
                process.id, process.arrival_time, process.burst_time
            ),
        }
    }

    Ok(())
}

fn formatter_for(format: &FormatArg) -> Box<dyn Formatter> {
    match format {
        FormatArg::Human => Box::new(HumanFormatter),
        FormatArg::Summary => Box::new(SummaryFormatter),
        FormatArg::Json => Box::new(JsonFormatter),
    }
}
