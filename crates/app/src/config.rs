use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use quiz_core::Catalog;
use quiz_core::model::ContinentFilter;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error(transparent)]
    Core(#[from] quiz_core::Error),
    #[error("failed to read catalog file {path}: {source}")]
    ReadCatalog {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Terminal geography quiz.
#[derive(Debug, Clone, Parser)]
#[command(name = "geoquiz", version, about)]
pub struct Args {
    /// Continent to start with ("all", "europe", "Europa", ...).
    #[arg(long, env = "GEOQUIZ_CONTINENT", default_value = "all")]
    pub continent: String,

    /// Seed for reproducible country order.
    #[arg(long, env = "GEOQUIZ_SEED")]
    pub seed: Option<u64>,

    /// JSON catalog file replacing the built-in country table.
    #[arg(long, env = "GEOQUIZ_CATALOG")]
    pub catalog: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set.
    #[arg(long, env = "GEOQUIZ_LOG", default_value = "info")]
    pub log_level: String,

    /// Print one JSON view snapshot per event instead of text.
    #[arg(long)]
    pub json: bool,

    /// Skip the welcome screen.
    #[arg(long)]
    pub skip_welcome: bool,
}

/// Settings the quiz is launched with.
#[derive(Debug, Clone)]
pub struct QuizConfig {
    pub filter: ContinentFilter,
    pub seed: Option<u64>,
    pub catalog: Catalog,
    pub json: bool,
    pub skip_welcome: bool,
}

impl QuizConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::Core` for an unknown continent or an invalid
    /// catalog, and `ConfigError::ReadCatalog` if the catalog file is unreadable.
    pub fn from_args(args: &Args) -> Result<Self, ConfigError> {
        let filter: ContinentFilter = args.continent.parse().map_err(quiz_core::Error::from)?;

        let catalog = match &args.catalog {
            Some(path) => {
                let raw =
                    std::fs::read_to_string(path).map_err(|source| ConfigError::ReadCatalog {
                        path: path.clone(),
                        source,
                    })?;
                Catalog::from_json(&raw).map_err(quiz_core::Error::from)?
            }
            None => Catalog::builtin().map_err(quiz_core::Error::from)?,
        };

        Ok(Self {
            filter,
            seed: args.seed,
            catalog,
            json: args.json,
            skip_welcome: args.skip_welcome,
        })
    }
}
