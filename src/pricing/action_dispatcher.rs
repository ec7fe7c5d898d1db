use serde::Serialize;
use std::sync::Arc;

use crate::api::auth_client::{AuthClient, CheckoutRequest};
use crate::models::session_models::SessionState;
use crate::utils::notification_utils::Notifier;

pub const CHECKOUT_FAILED_MESSAGE: &str = "Oops, something went wrong";
pub const PORTAL_FAILED_MESSAGE: &str = "Failed to open subscription management";

/// Result of one user-triggered action. Navigation is left to the caller.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ActionOutcome {
    /// Session not resolved yet; nothing was called.
    Ignored,
    Redirect { to: String },
    Navigate { url: String },
    /// The call failed and the user was notified.
    Failed,
}

#[derive(Clone)]
pub struct ActionDispatcher {
    client: Arc<dyn AuthClient>,
    notifier: Arc<dyn Notifier>,
    sign_in_path: String,
}

impl ActionDispatcher {
    pub fn new(client: Arc<dyn AuthClient>, notifier: Arc<dyn Notifier>, sign_in_path: &str) -> Self {
        Self {
            client,
            notifier,
            sign_in_path: sign_in_path.to_string(),
        }
    }

    pub async fn initiate_checkout(&self, session: SessionState, product_id: &str, slug: &str) -> ActionOutcome {
        match session {
            SessionState::Unknown => {
                tracing::debug!("Checkout requested before session resolved, ignoring");
                ActionOutcome::Ignored
            }
            SessionState::Unauthenticated => ActionOutcome::Redirect {
                to: self.sign_in_path.clone(),
            },
            SessionState::Authenticated => {
                let request = CheckoutRequest::for_product(product_id, slug);
                match self.client.checkout(&request).await {
                    Ok(redirect) => ActionOutcome::Navigate { url: redirect.url },
                    Err(e) => {
                        tracing::error!("Checkout failed for product {}: {}", product_id, e);
                        self.notifier.error(CHECKOUT_FAILED_MESSAGE);
                        ActionOutcome::Failed
                    }
                }
            }
        }
    }

    pub async fn open_management_portal(&self) -> ActionOutcome {
        match self.client.customer_portal().await {
            Ok(redirect) => ActionOutcome::Navigate { url: redirect.url },
            Err(e) => {
                tracing::error!("Failed to open customer portal: {}", e);
                self.notifier.error(PORTAL_FAILED_MESSAGE);
                ActionOutcome::Failed
            }
        }
    }
}
