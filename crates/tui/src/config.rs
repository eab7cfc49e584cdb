use std::env;
use std::path::PathBuf;

use crate::cli::Cli;

static ENV_LOG_FILTER: &str = "TASKLIST_LOG";
static ENV_LOG_FILE: &str = "TASKLIST_LOG_FILE";
static DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    seed_tasks: Vec<String>,
    log_filter: String,
    log_file: Option<PathBuf>,
}

impl AppConfig {
    /// Resolve settings from CLI flags, then environment variables, then defaults.
    pub fn from_cli(cli: &Cli) -> Self {
        Self::resolve(
            cli,
            env::var(ENV_LOG_FILTER).ok(),
            env::var_os(ENV_LOG_FILE).map(PathBuf::from),
        )
    }

    fn resolve(cli: &Cli, env_filter: Option<String>, env_file: Option<PathBuf>) -> Self {
        let log_filter = cli
            .log_filter
            .clone()
            .or(env_filter)
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        let log_file = cli.log_file.clone().or(env_file);

        Self {
            seed_tasks: cli.tasks.clone(),
            log_filter,
            log_file,
        }
    }

    pub fn with_seed_tasks(mut self, tasks: Vec<String>) -> Self {
        self.seed_tasks = tasks;
        self
    }

    pub fn seed_tasks(&self) -> &[String] {
        &self.seed_tasks
    }

    pub fn log_filter(&self) -> &str {
        if self.log_filter.is_empty() {
            DEFAULT_LOG_FILTER
        } else {
            &self.log_filter
        }
    }

    pub fn log_file(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("tasklist").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn cli_flags_win_over_environment() {
        let config = AppConfig::resolve(
            &cli(&["--log", "debug", "--log-file", "/tmp/cli.log"]),
            Some("warn".into()),
            Some(PathBuf::from("/tmp/env.log")),
        );
        assert_eq!(config.log_filter(), "debug");
        assert_eq!(config.log_file(), Some(&PathBuf::from("/tmp/cli.log")));
    }

    #[test]
    fn environment_fills_missing_flags() {
        let config = AppConfig::resolve(
            &cli(&[]),
            Some("tasklist_core=trace".into()),
            Some(PathBuf::from("/tmp/env.log")),
        );
        assert_eq!(config.log_filter(), "tasklist_core=trace");
        assert_eq!(config.log_file(), Some(&PathBuf::from("/tmp/env.log")));
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = AppConfig::resolve(&cli(&["--task", "A", "--task", "B"]), None, None);
        assert_eq!(config.log_filter(), "info");
        assert!(config.log_file().is_none());
        assert_eq!(config.seed_tasks(), ["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn blank_filter_falls_back_to_default() {
        let config = AppConfig::resolve(&cli(&[]), Some("  ".into()), None);
        assert_eq!(config.log_filter(), "info");
    }
}
