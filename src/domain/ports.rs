use crate::domain::model::Dish;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Source of the dishes the engine may choose from.
#[async_trait]
pub trait FoodCatalog: Send + Sync {
    /// All configured dishes, in no particular order. An empty list is not an error.
    async fn list_dishes(&self) -> Result<Vec<Dish>>;
}

/// Per-user request log backing the quota.
///
/// Implementations must keep concurrent `within_quota` + `record_request`
/// pairs for one user from exceeding the quota: `record_request` re-checks
/// the window under the same lock it appends with and returns
/// `DinnerError::QuotaExceeded` instead of appending past the limit.
#[async_trait]
pub trait RequestHistory: Send + Sync {
    /// `true` when the user may make another request.
    async fn within_quota(&self, user_id: i64) -> Result<bool>;

    async fn record_request(&self, user_id: i64) -> Result<()>;
}
