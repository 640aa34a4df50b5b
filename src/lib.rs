pub mod analysis;
pub mod bot;
pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod report;
pub mod visualization;

#[cfg(feature = "web")]
pub mod web;

pub use analysis::{Analyzer, ReportSettings, StatisticsReport};
pub use bot::{Command, Reply, Router};
pub use config::AppConfig;
pub use error::{ConfigError, LoadError, MeteorError, PersistError};
pub use io::{CsvFormat, DatasetReader};
pub use models::{Dataset, Record};
