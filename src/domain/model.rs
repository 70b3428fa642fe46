use crate::utils::error::{DinnerError, Result};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of dish categories. Discriminants match the numeric codes used
/// by the catalog storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Soup = 1,
    Salad = 2,
    Meat = 3,
    SideDish = 4,
}

impl Category {
    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Category::Soup),
            2 => Some(Category::Salad),
            3 => Some(Category::Meat),
            4 => Some(Category::SideDish),
            _ => None,
        }
    }

    /// The category a dish of this category is served with, if any.
    pub fn pairs_with(self) -> Option<Category> {
        match self {
            Category::Meat => Some(Category::SideDish),
            Category::SideDish => Some(Category::Meat),
            Category::Soup | Category::Salad => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Soup => "soup",
            Category::Salad => "salad",
            Category::Meat => "meat",
            Category::SideDish => "side_dish",
        };
        f.write_str(name)
    }
}

impl FromStr for Category {
    type Err = DinnerError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<u8>() {
            return Category::from_code(code).ok_or_else(|| DinnerError::InvalidDish {
                message: format!("unknown category code {}", code),
            });
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "soup" => Ok(Category::Soup),
            "salad" => Ok(Category::Salad),
            "meat" => Ok(Category::Meat),
            "sidedish" | "side_dish" | "side-dish" => Ok(Category::SideDish),
            other => Err(DinnerError::InvalidDish {
                message: format!("unknown category '{}'", other),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    pub name: String,
    pub category: Category,
}

impl Dish {
    /// Builds a dish, rejecting blank names.
    pub fn new(name: impl Into<String>, category: Category) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DinnerError::InvalidDish {
                message: "dish name cannot be empty".to_string(),
            });
        }
        Ok(Self { name, category })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestRecord {
    pub user_id: i64,
    pub timestamp: DateTime<Utc>,
}

/// Rolling-window request limit applied per user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaPolicy {
    pub max_requests: usize,
    pub window: Duration,
}

impl Default for QuotaPolicy {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::hours(24),
        }
    }
}

impl QuotaPolicy {
    pub fn new(max_requests: usize, window: Duration) -> Self {
        Self {
            max_requests,
            window,
        }
    }

    /// Number of records for `user_id` inside `[now - window, now]`.
    pub fn count_in_window(&self, records: &[RequestRecord], user_id: i64, now: DateTime<Utc>) -> usize {
        let window_start = now - self.window;
        records
            .iter()
            .filter(|r| r.user_id == user_id && r.timestamp >= window_start && r.timestamp <= now)
            .count()
    }

    /// True when the user may make another request.
    pub fn allows(&self, records: &[RequestRecord], user_id: i64, now: DateTime<Utc>) -> bool {
        self.count_in_window(records, user_id, now) < self.max_requests
    }

    /// Whether a record can no longer affect any quota decision.
    pub fn is_expired(&self, record: &RequestRecord, now: DateTime<Utc>) -> bool {
        record.timestamp < now - self.window
    }
}
