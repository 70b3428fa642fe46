use crate::core::Dish;
use crate::utils::error::{DinnerError, Result};

/// Joins dish names into one sentence. Names after the first are lower-cased.
pub fn render_dinner(dishes: &[Dish], conjunction: &str) -> String {
    let mut text = String::new();
    for (i, dish) in dishes.iter().enumerate() {
        if i == 0 {
            text.push_str(&dish.name);
        } else {
            text.push_str(conjunction);
            text.push_str(&dish.name.to_lowercase());
        }
    }
    text
}

/// Text sent back to the user for one recommendation attempt.
pub fn render_reply(result: &Result<Vec<Dish>>, conjunction: &str) -> String {
    match result {
        Ok(dishes) if !dishes.is_empty() => render_dinner(dishes, conjunction),
        Ok(_) => DinnerError::EmptyCatalog.user_friendly_message(),
        Err(e) => e.user_friendly_message(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Category;

    fn dish(name: &str, category: Category) -> Dish {
        Dish::new(name, category).unwrap()
    }

    #[test]
    fn test_render_pair_lowercases_second_dish() {
        let dishes = vec![dish("Meat1", Category::Meat), dish("Side1", Category::SideDish)];
        assert_eq!(render_dinner(&dishes, " and "), "Meat1 and side1");
    }

    #[test]
    fn test_render_single_dish() {
        assert_eq!(render_dinner(&[dish("Soup1", Category::Soup)], " and "), "Soup1");
    }

    #[test]
    fn test_render_reply_errors() {
        let quota: Result<Vec<Dish>> = Err(DinnerError::QuotaExceeded { user_id: 1 });
        assert_eq!(
            render_reply(&quota, " and "),
            "Request limit reached, try again tomorrow"
        );

        let storage: Result<Vec<Dish>> = Err(DinnerError::storage("boom"));
        assert_eq!(render_reply(&storage, " and "), "Could not pick a dinner right now");

        let nothing: Result<Vec<Dish>> = Ok(vec![]);
        assert_eq!(render_reply(&nothing, " and "), "Could not pick a dinner right now");
    }
}
