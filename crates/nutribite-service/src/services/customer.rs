//! Customer profile service

use chrono::Utc;
use nutribite_core::entities::Customer;
use tracing::{info, instrument};

use crate::dto::{CustomerResponse, UpsertCustomerRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct CustomerService<'a> {
    ctx: &'a ServiceContext,
}

/// Trim entries and drop blanks and case-insensitive duplicates
fn normalize_list(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let value = value.trim();
        if !value.is_empty() && !out.iter().any(|v| v.eq_ignore_ascii_case(value)) {
            out.push(value.to_string());
        }
    }
    out
}

fn blank_to_none(value: String) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

impl<'a> CustomerService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Profile of `user_id`; an empty one when it was never filled in
    #[instrument(skip(self))]
    pub async fn get_profile(&self, user_id: i64) -> ServiceResult<CustomerResponse> {
        let customer = self
            .ctx
            .customer_repo()
            .find_by_user(user_id)
            .await?
            .unwrap_or_else(|| Customer::new(user_id));
        Ok(CustomerResponse::from(customer))
    }

    #[instrument(skip(self, request))]
    pub async fn upsert_profile(
        &self,
        user_id: i64,
        request: UpsertCustomerRequest,
    ) -> ServiceResult<CustomerResponse> {
        let current = self
            .ctx
            .customer_repo()
            .find_by_user(user_id)
            .await?
            .unwrap_or_else(|| Customer::new(user_id));

        let updated = apply_upsert(current, request);
        let saved = self.ctx.customer_repo().upsert(&updated).await?;

        info!(user_id, "Customer profile saved");
        Ok(CustomerResponse::from(saved))
    }
}

fn apply_upsert(mut customer: Customer, request: UpsertCustomerRequest) -> Customer {
    if let Some(address) = request.address {
        customer.address = blank_to_none(address);
    }
    if let Some(city) = request.city {
        customer.city = blank_to_none(city);
    }
    if let Some(prefs) = request.dietary_preferences {
        customer.dietary_preferences = normalize_list(prefs);
    }
    if let Some(allergies) = request.allergies {
        customer.allergies = normalize_list(allergies);
    }
    customer.updated_at = Utc::now();
    customer
}
