//! Customer profile - delivery and dietary details attached to a customer account

use chrono::{DateTime, Utc};

/// Customer profile (one per customer user)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Customer {
    pub user_id: i64,
    pub address: Option<String>,
    pub city: Option<String>,
    pub dietary_preferences: Vec<String>,
    pub allergies: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Customer {
    /// Empty profile for a freshly registered customer
    pub fn new(user_id: i64) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            address: None,
            city: None,
            dietary_preferences: Vec::new(),
            allergies: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether the customer declared an allergy (case-insensitive)
    pub fn is_allergic_to(&self, ingredient: &str) -> bool {
        self.allergies
            .iter()
            .any(|a| a.eq_ignore_ascii_case(ingredient))
    }
}
