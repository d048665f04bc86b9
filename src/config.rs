use std::fs;
use std::path::Path;

use crate::cli::{parse_processes, split_entries, FormatArg, RunArgs};
use crate::error::{Error, Result};
use crate::models::{default_quantum, ProcessProfile, SimConfig};

pub fn load_config(path: &Path) -> Result<SimConfig> {
    let contents = fs::read_to_string(path).map_err(|err| {
        Error::ConfigIo(format!(
            "failed to read config '{}': {}",
            path.display(),
            err
        ))
    })?;
    let ext = path
        .extension()
        .and_then(|value| value.to_str())
        .unwrap_or("");

    match ext {
        "toml" => toml::from_str(&contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse TOML: {}", err))),
        "json" => serde_json::from_str(&contents)
            .map_err(|err| Error::ConfigParse(format!("failed to parse JSON: {}", err))),
        "" => Err(Error::UnsupportedConfigFormat("unknown".to_string())),
        _ => Err(Error::UnsupportedConfigFormat(ext.to_string())),
    }
}

/// Resolves the config file (if any) and the command-line flags into one
/// configuration. Flags win over file values.
pub fn build_config(args: RunArgs) -> Result<(SimConfig, FormatArg)> {
    let file = args.config.as_deref().map(load_config).transpose()?;

    let mut entries = args
        .processes
        .as_deref()
        .map(split_entries)
        .unwrap_or_default();
    entries.extend(args.process);
    let cli_processes = if entries.is_empty() {
        None
    } else {
        Some(parse_processes(&entries)?)
    };

    let mut config = match file {
        Some(config) => config,
        None => SimConfig {
            algo: args.algo.ok_or(Error::MissingAlgorithm)?.into(),
            quantum: default_quantum(),
            quantums: Vec::new(),
            processes: ProcessProfile::Explicit(Vec::new()),
            seed: None,
        },
    };

    if let Some(algo) = args.algo {
        config.algo = algo.into();
    }
    if let Some(processes) = cli_processes {
        config.processes = ProcessProfile::Explicit(processes);
    }
    if let Some(quantum) = args.quantum {
        config.quantum = quantum;
    }
    if !args.quantums.is_empty() {
        config.quantums = args.quantums;
    }

    let format = if args.summary {
        FormatArg::Summary
    } else {
        args.format.unwrap_or_default()
    };

    Ok((config, format))
}
