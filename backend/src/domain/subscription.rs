//! Subscription entity and the tariff catalogue of subscription types.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Commercial subscription plans, each with a fixed duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubscriptionType {
    /// One month of access.
    Monthly,
    /// Six months of access.
    Semestriel,
    /// Twelve months of access.
    Annual,
}

/// Error produced when a stored or supplied token names no known plan.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown subscription type: {0}")]
pub struct ParseSubscriptionTypeError(pub String);

impl SubscriptionType {
    /// Stable token used in the database and over the wire.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Monthly => "MONTHLY",
            Self::Semestriel => "SEMESTRIEL",
            Self::Annual => "ANNUAL",
        }
    }

    /// Plan duration in calendar months.
    #[must_use]
    pub fn duration_months(self) -> u32 {
        match self {
            Self::Monthly => 1,
            Self::Semestriel => 6,
            Self::Annual => 12,
        }
    }

    /// Expiry date for a subscription starting on `start`.
    ///
    /// Calendar-aware: adding months to a day that does not exist in the target
    /// month clamps to that month's last day. Returns `None` only when the
    /// result falls outside chrono's representable range.
    #[must_use]
    pub fn end_date(self, start: NaiveDate) -> Option<NaiveDate> {
        start.checked_add_months(Months::new(self.duration_months()))
    }
}

impl std::fmt::Display for SubscriptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SubscriptionType {
    type Err = ParseSubscriptionTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MONTHLY" => Ok(Self::Monthly),
            "SEMESTRIEL" => Ok(Self::Semestriel),
            "ANNUAL" => Ok(Self::Annual),
            other => Err(ParseSubscriptionTypeError(other.to_owned())),
        }
    }
}

/// A purchased subscription granting access between two dates.
#[derive(Debug, Clone, PartialEq)]
pub struct Subscription {
    /// Database identifier, `None` until first persisted.
    pub id: Option<i64>,
    /// Plan determining the duration.
    pub subscription_type: SubscriptionType,
    /// First day of validity.
    pub start_date: NaiveDate,
    /// Last day of validity, derived from the plan on creation.
    pub end_date: Option<NaiveDate>,
    /// Price paid, in the resort's currency.
    pub price: f32,
}
