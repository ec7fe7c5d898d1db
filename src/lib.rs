pub mod api {
    pub mod auth_client;
}
pub mod config;
pub mod error;
pub mod models {
    pub mod session_models;
    pub mod subscription_models;
}
pub mod pricing {
    pub mod action_dispatcher;
    pub mod plan_state;
    pub mod pricing_table;
    pub mod session_resolver;
}
pub mod utils {
    pub mod notification_utils;
}

pub use api::auth_client::{AuthClient, CheckoutRequest, HttpAuthClient, RedirectResponse};
pub use config::{AuthClientConfig, TierConfig};
pub use models::session_models::SessionState;
pub use models::subscription_models::SubscriptionSnapshot;
pub use pricing::action_dispatcher::{ActionDispatcher, ActionOutcome};
pub use pricing::plan_state::{classify, PlanState, RenewalNote};
pub use pricing::pricing_table::{CardAction, PricingCardView, PricingTable};
pub use utils::notification_utils::{LogNotifier, Notifier};
