pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliArgs, CliCommand};

pub use adapters::{CsvFoodCatalog, InMemoryFoodCatalog, InMemoryRequestHistory, JsonFileRequestHistory};
pub use app::ConsoleTransport;
pub use config::{AppConfig, Environment};
pub use crate::core::{dinner::DinnerEngine, Category, Dish, QuotaPolicy, RequestRecord};
pub use utils::error::{DinnerError, Result};
