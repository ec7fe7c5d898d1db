use serde::Serialize;
use std::sync::Arc;
use tokio::sync::watch;

use crate::api::auth_client::AuthClient;
use crate::config::TierConfig;
use crate::models::session_models::SessionState;
use crate::models::subscription_models::{SnapshotErrorKind, SubscriptionSnapshot};
use crate::pricing::action_dispatcher::{ActionDispatcher, ActionOutcome};
use crate::pricing::plan_state::{classify, PlanState};
use crate::pricing::session_resolver::SessionResolver;
use crate::utils::notification_utils::Notifier;

pub const CURRENT_PLAN_BADGE: &str = "Current Plan";
pub const MANAGE_LABEL: &str = "Manage Subscription";
pub const BUY_LABEL: &str = "Get Started";
pub const SIGN_IN_LABEL: &str = "Sign In to Get Started";

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CardAction {
    Manage { label: String, note: String },
    Buy { label: String, enabled: bool },
}

/// Shown when the subscription lookup itself reported a problem.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct BillingNotice {
    pub kind: SnapshotErrorKind,
    pub message: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct PricingCardView {
    pub plan_state: PlanState,
    pub badge: Option<String>,
    pub action: CardAction,
    pub notice: Option<BillingNotice>,
}

/// One mounted pricing card. All state is scoped to this instance and the
/// session lookup is cancelled when it goes away.
pub struct PricingTable {
    tier: TierConfig,
    snapshot: SubscriptionSnapshot,
    session: SessionResolver,
    dispatcher: ActionDispatcher,
}

impl PricingTable {
    /// Requires a validated `TierConfig`, so a missing tier fails before any view exists.
    pub fn mount(
        tier: TierConfig,
        snapshot: SubscriptionSnapshot,
        client: Arc<dyn AuthClient>,
        notifier: Arc<dyn Notifier>,
        sign_in_path: &str,
    ) -> Self {
        let session = SessionResolver::spawn(client.clone());
        Self {
            tier,
            snapshot,
            session,
            dispatcher: ActionDispatcher::new(client, notifier, sign_in_path),
        }
    }

    pub fn session_state(&self) -> SessionState {
        self.session.state()
    }

    pub fn session_updates(&self) -> watch::Receiver<SessionState> {
        self.session.subscribe()
    }

    pub async fn session_resolved(&self) -> SessionState {
        self.session.resolved().await
    }

    pub fn plan_state(&self) -> PlanState {
        classify(self.session.state(), &self.snapshot, &self.tier.product_id)
    }

    pub fn view(&self) -> PricingCardView {
        let plan_state = self.plan_state();
        let (badge, action) = match plan_state {
            PlanState::CurrentPlan { renewal } => (
                Some(CURRENT_PLAN_BADGE.to_string()),
                CardAction::Manage {
                    label: MANAGE_LABEL.to_string(),
                    note: renewal.to_string(),
                },
            ),
            PlanState::EligibleAnonymous => (
                None,
                CardAction::Buy {
                    label: SIGN_IN_LABEL.to_string(),
                    enabled: true,
                },
            ),
            PlanState::EligibleAuthenticated | PlanState::Pending => (
                None,
                CardAction::Buy {
                    label: BUY_LABEL.to_string(),
                    enabled: plan_state.offers_checkout(),
                },
            ),
        };
        let notice = match &self.snapshot {
            SubscriptionSnapshot::Failed { message, kind } => Some(BillingNotice {
                kind: *kind,
                message: message.clone(),
            }),
            _ => None,
        };
        PricingCardView {
            plan_state,
            badge,
            action,
            notice,
        }
    }

    pub async fn click_buy(&self) -> ActionOutcome {
        self.dispatcher
            .initiate_checkout(self.session.state(), &self.tier.product_id, &self.tier.slug)
            .await
    }

    pub async fn click_manage(&self) -> ActionOutcome {
        self.dispatcher.open_management_portal().await
    }

    pub fn unmount(mut self) {
        self.session.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::auth_client::MockAuthClient;
    use crate::models::session_models::SessionResponse;
    use crate::utils::notification_utils::MockNotifier;

    fn tier() -> TierConfig {
        TierConfig::new("prod_pro", "pro").unwrap()
    }

    #[tokio::test]
    async fn anonymous_visitor_sees_sign_in_label() {
        let mut client = MockAuthClient::new();
        client
            .expect_get_session()
            .returning(|| Ok(SessionResponse::default()));
        let table = PricingTable::mount(
            tier(),
            SubscriptionSnapshot::NoSubscription,
            Arc::new(client),
            Arc::new(MockNotifier::new()),
            "/sign-in",
        );
        table.session_resolved().await;
        let view = table.view();
        assert_eq!(view.badge, None);
        assert_eq!(
            view.action,
            CardAction::Buy { label: SIGN_IN_LABEL.to_string(), enabled: true }
        );
    }

    #[tokio::test]
    async fn failed_snapshot_surfaces_notice() {
        let mut client = MockAuthClient::new();
        client
            .expect_get_session()
            .returning(|| Ok(SessionResponse::default()));
        let table = PricingTable::mount(
            tier(),
            SubscriptionSnapshot::Failed {
                message: "Subscription was canceled".to_string(),
                kind: SnapshotErrorKind::Canceled,
            },
            Arc::new(client),
            Arc::new(MockNotifier::new()),
            "/sign-in",
        );
        table.session_resolved().await;
        let view = table.view();
        assert_eq!(view.plan_state, PlanState::EligibleAnonymous);
        assert_eq!(
            view.notice,
            Some(BillingNotice {
                kind: SnapshotErrorKind::Canceled,
                message: "Subscription was canceled".to_string(),
            })
        );
    }

    const FAILED_WITH_ACTIVE_PLAN: &str = r#"{
        "hasSubscription": true,
        "subscription": {
            "id": "sub_1",
            "productId": "prod_pro",
            "status": "active",
            "amount": 2500,
            "currency": "usd",
            "recurringInterval": "month",
            "currentPeriodStart": "2025-02-01T00:00:00Z",
            "currentPeriodEnd": "2025-03-01T00:00:00Z",
            "cancelAtPeriodEnd": false,
            "canceledAt": null,
            "organizationId": null
        },
        "error": "Could not verify subscription",
        "errorType": "GENERAL"
    }"#;

    #[test]
    fn error_report_with_active_plan_is_not_current() {
        let snapshot = SubscriptionSnapshot::from_json(FAILED_WITH_ACTIVE_PLAN).unwrap();
        assert!(matches!(snapshot, SubscriptionSnapshot::Failed { .. }));
        for session in [
            SessionState::Unknown,
            SessionState::Authenticated,
            SessionState::Unauthenticated,
        ] {
            assert!(
                !matches!(classify(session, &snapshot, "prod_pro"), PlanState::CurrentPlan { .. }),
                "{:?}",
                session
            );
        }
    }

    #[tokio::test]
    async fn error_report_with_active_plan_offers_buy_and_notice() {
        let mut client = MockAuthClient::new();
        client
            .expect_get_session()
            .returning(|| Ok(SessionResponse::default()));
        let table = PricingTable::mount(
            tier(),
            SubscriptionSnapshot::from_json(FAILED_WITH_ACTIVE_PLAN).unwrap(),
            Arc::new(client),
            Arc::new(MockNotifier::new()),
            "/sign-in",
        );
        table.session_resolved().await;
        let view = table.view();
        assert_eq!(view.badge, None);
        assert_eq!(
            view.action,
            CardAction::Buy { label: SIGN_IN_LABEL.to_string(), enabled: true }
        );
        assert_eq!(
            view.notice,
            Some(BillingNotice {
                kind: SnapshotErrorKind::General,
                message: "Could not verify subscription".to_string(),
            })
        );
    }
}
