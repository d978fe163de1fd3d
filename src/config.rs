// Search and machine configuration, read from RON files.

use std::fs::File;
use std::path::{Path, PathBuf};

use ron::de::from_reader;
use serde::Deserialize;
use thiserror::Error;

use crate::primitives::PrimitiveSet;
use crate::task::TaskKind;

/// Fixed limits of one machine instance. Every candidate program runs on
/// a fresh state cut to these sizes.
#[derive(Deserialize, Debug, Copy, Clone)]
#[serde(default)]
pub struct MachineConfig {
    pub program_tape_size: usize,
    pub work_tape_size: usize,
    pub n_weights: usize,
    pub maxint: i64,
}

impl Default for MachineConfig {
    fn default() -> MachineConfig {
        MachineConfig {
            program_tape_size: 1000,
            work_tape_size: 1,
            n_weights: 100,
            maxint: 10_000,
        }
    }
}

/// One search run: what to look for, and where to put the artifacts.
#[derive(Deserialize, Debug, Clone)]
pub struct SearchConfig {
    pub task: TaskKind,
    #[serde(default)]
    pub primitives: PrimitiveSet,
    pub search_length: u32,
    #[serde(default)]
    pub machine: MachineConfig,
    #[serde(default)]
    pub search_log: Option<PathBuf>,
    #[serde(default = "default_solutions_dir")]
    pub solutions_dir: PathBuf,
}

fn default_solutions_dir() -> PathBuf {
    PathBuf::from("solutions")
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config: {0}")]
    Read(#[from] std::io::Error),
    #[error("could not parse config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

pub fn load(path: &Path) -> Result<SearchConfig, ConfigError> {
    let reader = File::open(path)?;
    let config: SearchConfig = from_reader(reader)?;
    validate(config)
}

fn validate(config: SearchConfig) -> Result<SearchConfig, ConfigError> {
    if config.search_length == 0 {
        return Err(ConfigError::Invalid("search_length must be positive"));
    }
    // The per-candidate budget is 2^(phase - length + 9).
    if config.search_length > 54 {
        return Err(ConfigError::Invalid("search_length overflows the budget exponent"));
    }
    if config.search_length as usize > config.machine.program_tape_size {
        return Err(ConfigError::Invalid("search_length exceeds the program tape"));
    }
    if config.machine.maxint <= 0 {
        return Err(ConfigError::Invalid("maxint must be positive"));
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_fills_defaults() {
        let config: SearchConfig = ron::de::from_str("(task: COUNT, search_length: 4)").unwrap();
        assert_eq!(config.task, TaskKind::Count);
        assert_eq!(config.primitives, PrimitiveSet::Initial);
        assert_eq!(config.machine.program_tape_size, 1000);
        assert_eq!(config.machine.work_tape_size, 1);
        assert_eq!(config.machine.n_weights, 100);
        assert_eq!(config.machine.maxint, 10_000);
        assert_eq!(config.solutions_dir, PathBuf::from("solutions"));
        assert!(config.search_log.is_none());
    }

    #[test]
    fn full_config_parses() {
        let config: SearchConfig = ron::de::from_str(
            "(
                task: POSITION,
                primitives: WEIGHT,
                search_length: 9,
                machine: (work_tape_size: 2, n_weights: 50),
                search_log: Some(\"search.csv\"),
                solutions_dir: \"out\",
            )",
        )
        .unwrap();
        assert_eq!(config.task, TaskKind::Position);
        assert_eq!(config.primitives, PrimitiveSet::Weight);
        assert_eq!(config.machine.work_tape_size, 2);
        assert_eq!(config.machine.n_weights, 50);
        assert_eq!(config.search_log, Some(PathBuf::from("search.csv")));
    }

    #[test]
    fn validate_rejects_degenerate_lengths() {
        let zero: SearchConfig = ron::de::from_str("(task: COUNT, search_length: 0)").unwrap();
        assert!(validate(zero).is_err());

        let huge: SearchConfig = ron::de::from_str("(task: COUNT, search_length: 60)").unwrap();
        assert!(validate(huge).is_err());

        let narrow: SearchConfig = ron::de::from_str(
            "(task: COUNT, search_length: 8, machine: (program_tape_size: 4))",
        )
        .unwrap();
        assert!(validate(narrow).is_err());
    }
}
