use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

use crate::models::session_models::SessionState;
use crate::models::subscription_models::SubscriptionSnapshot;

/// Text shown under the manage button of the plan the visitor already holds.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "kind", content = "at", rename_all = "snake_case")]
pub enum RenewalNote {
    Expires(DateTime<Utc>),
    Renews(DateTime<Utc>),
}

impl fmt::Display for RenewalNote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenewalNote::Expires(at) => write!(f, "Expires {}", format_period_end(at)),
            RenewalNote::Renews(at) => write!(f, "Renews {}", format_period_end(at)),
        }
    }
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PlanState {
    CurrentPlan { renewal: RenewalNote },
    EligibleAnonymous,
    EligibleAuthenticated,
    Pending,
}

impl PlanState {
    pub fn offers_checkout(&self) -> bool {
        matches!(self, PlanState::EligibleAnonymous | PlanState::EligibleAuthenticated)
    }
}

/// en-US long date, e.g. "March 1, 2025".
pub fn format_period_end(at: &DateTime<Utc>) -> String {
    at.format("%B %-d, %Y").to_string()
}

pub fn is_current_plan(snapshot: &SubscriptionSnapshot, tier_product_id: &str) -> bool {
    snapshot
        .subscription()
        .map(|s| s.product_id == tier_product_id && s.is_active())
        .unwrap_or(false)
}

/// A held, active plan wins over the session state, even before the session
/// lookup has finished. A snapshot that reported an error is never the current
/// plan, even when it also carried a matching subscription.
pub fn classify(
    session: SessionState,
    snapshot: &SubscriptionSnapshot,
    tier_product_id: &str,
) -> PlanState {
    if let Some(details) = snapshot.subscription() {
        if is_current_plan(snapshot, tier_product_id) {
            let renewal = if details.cancel_at_period_end {
                RenewalNote::Expires(details.current_period_end)
            } else {
                RenewalNote::Renews(details.current_period_end)
            };
            return PlanState::CurrentPlan { renewal };
        }
    }
    match session {
        SessionState::Unknown => PlanState::Pending,
        SessionState::Authenticated => PlanState::EligibleAuthenticated,
        SessionState::Unauthenticated => PlanState::EligibleAnonymous,
    }
}
