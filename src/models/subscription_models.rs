use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::SnapshotError;

pub const ACTIVE_STATUS: &str = "active";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionDetails {
    pub id: String,
    pub product_id: String,
    pub status: String,
    pub amount: i64,
    pub currency: String,
    pub recurring_interval: String,
    pub current_period_start: DateTime<Utc>,
    pub current_period_end: DateTime<Utc>,
    pub cancel_at_period_end: bool,
    pub canceled_at: Option<DateTime<Utc>>,
    pub organization_id: Option<String>,
}

impl SubscriptionDetails {
    pub fn is_active(&self) -> bool {
        self.status == ACTIVE_STATUS
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SnapshotErrorKind {
    Canceled,
    Expired,
    General,
}

/// Subscription lookup result as the upstream provider sends it.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionDetailsResult {
    pub has_subscription: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription: Option<SubscriptionDetails>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<SnapshotErrorKind>,
}

/// Point-in-time read of the visitor's subscription.
#[derive(Debug, Clone, PartialEq)]
pub enum SubscriptionSnapshot {
    NoSubscription,
    Subscribed(SubscriptionDetails),
    Failed {
        message: String,
        kind: SnapshotErrorKind,
    },
}

impl SubscriptionSnapshot {
    pub fn subscription(&self) -> Option<&SubscriptionDetails> {
        match self {
            SubscriptionSnapshot::Subscribed(details) => Some(details),
            _ => None,
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, anyhow::Error> {
        let result: SubscriptionDetailsResult = serde_json::from_str(raw)?;
        Ok(Self::try_from(result)?)
    }
}

impl TryFrom<SubscriptionDetailsResult> for SubscriptionSnapshot {
    type Error = SnapshotError;

    fn try_from(result: SubscriptionDetailsResult) -> Result<Self, Self::Error> {
        if result.has_subscription != result.subscription.is_some() {
            return Err(SnapshotError::InconsistentSubscription {
                has_subscription: result.has_subscription,
                subscription_present: result.subscription.is_some(),
            });
        }
        match (result.error, result.error_type, result.subscription) {
            (None, Some(_), _) => Err(SnapshotError::ErrorTypeWithoutError),
            // an error report never counts as holding a plan
            (Some(message), kind, _) => Ok(SubscriptionSnapshot::Failed {
                message,
                kind: kind.unwrap_or(SnapshotErrorKind::General),
            }),
            (None, None, Some(details)) => Ok(SubscriptionSnapshot::Subscribed(details)),
            (None, None, None) => Ok(SubscriptionSnapshot::NoSubscription),
        }
    }
}
