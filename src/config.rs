use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::level_filters::LevelFilter;

pub(crate) const DB_ENV: &str = "GOALKEEP_DB";
pub(crate) const LOG_ENV: &str = "GOALKEEP_LOG";

#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) db_path: PathBuf,
    pub(crate) log_level: LevelFilter,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_vars(std::env::var(DB_ENV).ok(), std::env::var(LOG_ENV).ok())
    }

    fn from_vars(db: Option<String>, log: Option<String>) -> Result<Self> {
        let db_path = match db.filter(|p| !p.trim().is_empty()) {
            Some(p) => PathBuf::from(crate::run::shellexpand(p.trim())),
            None => default_db_path()?,
        };
        let log_level = log
            .as_deref()
            .map(parse_log_level)
            .unwrap_or(LevelFilter::WARN);
        Ok(Self { db_path, log_level })
    }

    /// Create the parent directory of the database file if needed.
    pub(crate) fn ensure_data_dir(&self) -> Result<()> {
        if let Some(dir) = self.db_path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create data directory: {}", dir.display()))?;
        }
        Ok(())
    }
}

fn default_db_path() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "goalkeep", "Goalkeep")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(proj_dirs.data_dir().join("goalkeep.db"))
}

pub(crate) fn parse_log_level(level: &str) -> LevelFilter {
    match level.trim().to_lowercase().as_str() {
        "off" => LevelFilter::OFF,
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{level}', defaulting to 'warn'");
            LevelFilter::WARN
        }
    }
}
