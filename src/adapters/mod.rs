// Adapters layer: concrete storage behind the domain ports.

pub mod catalog;
pub mod history;

pub use catalog::{CsvFoodCatalog, InMemoryFoodCatalog};
pub use history::{InMemoryRequestHistory, JsonFileRequestHistory};
