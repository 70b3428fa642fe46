pub mod dinner;

pub use crate::domain::model::{Category, Dish, QuotaPolicy, RequestRecord};
pub use crate::domain::ports::{FoodCatalog, RequestHistory};
pub use crate::utils::error::Result;
