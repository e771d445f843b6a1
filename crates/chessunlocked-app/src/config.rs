//! Launch configuration.
//!
//! The native binary builds an [`AppConfig`] from command-line flags; the web
//! build uses [`AppConfig::builtin`].

use std::time::Duration;

use chessunlocked_catalog::{Catalog, ConfigError};
use chessunlocked_trainer::{DEFAULT_PLAYBACK_INTERVAL, OptionOrder};

/// Namespace for profile documents when none is given.
pub const DEFAULT_APP_ID: &str = "chessunlocked";

/// Everything the app needs at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub catalog: Catalog,
    pub interval: Duration,
    pub option_order: OptionOrder,
    pub app_id: String,
}

impl AppConfig {
    /// Built-in catalog with default settings.
    pub fn builtin() -> Result<Self, ConfigError> {
        Ok(Self {
            catalog: Catalog::builtin()?,
            interval: DEFAULT_PLAYBACK_INTERVAL,
            option_order: OptionOrder::Authored,
            app_id: DEFAULT_APP_ID.to_owned(),
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use self::cli::Cli;

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::{path::PathBuf, time::Duration};

    use chessunlocked_catalog::{Catalog, ConfigError};
    use chessunlocked_trainer::OptionOrder;

    use super::{AppConfig, DEFAULT_APP_ID};

    /// Opening explorer and practice drills.
    #[derive(Debug, Clone, clap::Parser)]
    #[command(name = "chessunlocked", version, about)]
    pub struct Cli {
        /// JSON catalog of openings and drills to use instead of the built-in one.
        #[arg(long, value_name = "PATH")]
        pub catalog: Option<PathBuf>,

        /// Delay between automatic playback steps, in milliseconds.
        #[arg(
            long,
            value_name = "MS",
            default_value_t = 1500,
            value_parser = clap::value_parser!(u64).range(1..)
        )]
        pub interval_ms: u64,

        /// Shuffle drill options with this seed.
        #[arg(long, value_name = "SEED")]
        pub shuffle_seed: Option<u64>,

        /// Namespace for stored profile documents.
        #[arg(long, value_name = "ID", default_value = DEFAULT_APP_ID)]
        pub app_id: String,
    }

    impl Cli {
        /// Loads the catalog and resolves the settings.
        pub fn into_config(self) -> Result<AppConfig, ConfigError> {
            let catalog = match &self.catalog {
                Some(path) => Catalog::from_path(path)?,
                None => Catalog::builtin()?,
            };
            let option_order = self
                .shuffle_seed
                .map_or(OptionOrder::Authored, |seed| OptionOrder::Shuffled { seed });
            Ok(AppConfig {
                catalog,
                interval: Duration::from_millis(self.interval_ms),
                option_order,
                app_id: self.app_id,
            })
        }
    }

}
