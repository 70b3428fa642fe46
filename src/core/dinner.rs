use crate::core::{Dish, FoodCatalog, RequestHistory};
use crate::domain::model::Category;
use crate::utils::error::{DinnerError, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

/// Picks a dinner for a user: one dish, or a meat/side dish pair.
///
/// Holds no mutable state; all quota bookkeeping lives behind [`RequestHistory`].
#[derive(Clone)]
pub struct DinnerEngine {
    catalog: Arc<dyn FoodCatalog>,
    history: Arc<dyn RequestHistory>,
}

impl DinnerEngine {
    pub fn new(catalog: Arc<dyn FoodCatalog>, history: Arc<dyn RequestHistory>) -> Self {
        Self { catalog, history }
    }

    pub async fn recommend(&self, user_id: i64) -> Result<Vec<Dish>> {
        let mut rng = StdRng::from_entropy();
        self.recommend_with_rng(user_id, &mut rng).await
    }

    /// Same as [`recommend`](Self::recommend) with a caller-supplied random source.
    #[tracing::instrument(name = "recommend", skip(self, rng), fields(op = "DinnerEngine::recommend"))]
    pub async fn recommend_with_rng<R: Rng + Send>(&self, user_id: i64, rng: &mut R) -> Result<Vec<Dish>> {
        if !self.history.within_quota(user_id).await.inspect_err(log_failure)? {
            tracing::debug!("user attempt limit exceeded");
            return Err(DinnerError::QuotaExceeded { user_id });
        }

        let dishes = self.catalog.list_dishes().await.inspect_err(log_failure)?;

        // Recorded before the emptiness check: a request against an empty
        // catalog still uses up a slot.
        self.history.record_request(user_id).await.inspect_err(log_failure)?;
        tracing::info!(dishes = dishes.len(), "dinner request saved");

        let dinner = pick_dinner(&dishes, rng).inspect_err(log_failure)?;
        tracing::debug!(
            category = %dinner[0].category,
            picked = ?dinner.iter().map(|d| d.name.as_str()).collect::<Vec<_>>(),
            "dinner picked"
        );
        Ok(dinner)
    }
}

fn log_failure(err: &DinnerError) {
    if err.is_user_recoverable() {
        tracing::debug!("{}", err);
    } else {
        tracing::error!(error = %err, "get random dinner failed");
    }
}

/// Chooses a primary dish uniformly from the whole catalog, then pairs meat
/// with a random side dish and vice versa. The primary dish comes first.
pub fn pick_dinner<R: Rng + ?Sized>(dishes: &[Dish], rng: &mut R) -> Result<Vec<Dish>> {
    let primary = dishes.choose(rng).ok_or(DinnerError::EmptyCatalog)?;

    let mut dinner = Vec::with_capacity(2);
    dinner.push(primary.clone());

    if let Some(partner_category) = primary.category.pairs_with() {
        if let Some(partner) = dishes_in_category(dishes, partner_category).choose(rng) {
            dinner.push((*partner).clone());
        }
    }

    Ok(dinner)
}

pub fn dishes_in_category(dishes: &[Dish], category: Category) -> Vec<&Dish> {
    dishes.iter().filter(|d| d.category == category).collect()
}
