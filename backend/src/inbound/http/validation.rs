//! Shared validation helpers for inbound HTTP adapters.
//!
//! Query parameters arrive as raw strings; these helpers turn them into
//! domain values or into a 400 error that names the offending field.

use chrono::NaiveDate;
use serde_json::json;

use crate::domain::{Error, SubscriptionType};

pub(crate) fn parse_subscription_type(
    field: &'static str,
    value: &str,
) -> Result<SubscriptionType, Error> {
    value.parse().map_err(|_| {
        Error::invalid_request(format!(
            "{field} must be one of MONTHLY, SEMESTRIEL or ANNUAL"
        ))
        .with_details(json!({
            "field": field,
            "value": value,
            "code": "invalid_subscription_type",
        }))
    })
}

pub(crate) fn parse_date(field: &'static str, value: &str) -> Result<NaiveDate, Error> {
    value.parse().map_err(|_| {
        Error::invalid_request(format!("{field} must be an ISO-8601 date"))
            .with_details(json!({
                "field": field,
                "value": value,
                "code": "invalid_date",
            }))
    })
}
