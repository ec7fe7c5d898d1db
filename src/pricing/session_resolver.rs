use std::sync::{Arc, Weak};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::api::auth_client::AuthClient;
use crate::models::session_models::SessionState;

/// Resolves the visitor's session once per mount.
///
/// The lookup task only holds a weak handle to the state, and teardown aborts it,
/// so a lookup that finishes after unmount has nothing left to write into.
pub struct SessionResolver {
    state: Arc<watch::Sender<SessionState>>,
    task: Option<JoinHandle<()>>,
}

impl SessionResolver {
    /// Starts a fresh lookup. Must be called inside a tokio runtime.
    pub fn spawn(client: Arc<dyn AuthClient>) -> Self {
        let (tx, _rx) = watch::channel(SessionState::Unknown);
        let state = Arc::new(tx);
        let weak = Arc::downgrade(&state);
        let task = tokio::spawn(async move {
            let resolved = resolve_session(client.as_ref()).await;
            publish(&weak, resolved);
        });
        Self {
            state,
            task: Some(task),
        }
    }

    pub fn state(&self) -> SessionState {
        *self.state.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Waits for the first resolved value. Never returns while the lookup hangs.
    pub async fn resolved(&self) -> SessionState {
        let mut rx = self.subscribe();
        let state = match rx.wait_for(|s| s.is_resolved()).await {
            Ok(state) => *state,
            // sender gone: component torn down before resolving
            Err(_) => SessionState::Unknown,
        };
        state
    }

    pub fn cancel(&mut self) {
        if let Some(task) = self.task.take() {
            if !task.is_finished() {
                tracing::debug!("Cancelling in-flight session lookup");
            }
            task.abort();
        }
    }
}

impl Drop for SessionResolver {
    fn drop(&mut self) {
        self.cancel();
    }
}

async fn resolve_session(client: &dyn AuthClient) -> SessionState {
    match client.get_session().await {
        Ok(response) if response.is_authenticated() => SessionState::Authenticated,
        Ok(_) => SessionState::Unauthenticated,
        Err(e) => {
            tracing::warn!("Session lookup failed, treating visitor as signed out: {}", e);
            SessionState::Unauthenticated
        }
    }
}

fn publish(state: &Weak<watch::Sender<SessionState>>, resolved: SessionState) {
    let Some(state) = state.upgrade() else {
        tracing::debug!("Session resolved after teardown, dropping result");
        return;
    };
    state.send_if_modified(|current| {
        if current.is_resolved() {
            return false;
        }
        *current = resolved;
        true
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::auth_client::MockAuthClient;
    use crate::error::ClientError;
    use crate::models::session_models::{SessionData, SessionResponse, SessionUser};

    fn signed_in() -> SessionResponse {
        SessionResponse {
            data: Some(SessionData {
                user: Some(SessionUser {
                    id: "u1".to_string(),
                    email: None,
                    name: None,
                }),
            }),
        }
    }

    #[tokio::test]
    async fn user_present_resolves_authenticated() {
        let mut client = MockAuthClient::new();
        client.expect_get_session().times(1).returning(|| Ok(signed_in()));
        let resolver = SessionResolver::spawn(Arc::new(client));
        assert_eq!(resolver.resolved().await, SessionState::Authenticated);
        assert_eq!(resolver.state(), SessionState::Authenticated);
    }

    #[tokio::test]
    async fn missing_user_resolves_unauthenticated() {
        let mut client = MockAuthClient::new();
        client
            .expect_get_session()
            .times(1)
            .returning(|| Ok(SessionResponse::default()));
        let resolver = SessionResolver::spawn(Arc::new(client));
        assert_eq!(resolver.resolved().await, SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn lookup_failure_resolves_unauthenticated() {
        let mut client = MockAuthClient::new();
        client.expect_get_session().times(1).returning(|| {
            Err(ClientError::Malformed("unexpected token".to_string()))
        });
        let resolver = SessionResolver::spawn(Arc::new(client));
        assert_eq!(resolver.resolved().await, SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn each_mount_runs_its_own_lookup() {
        let mut client = MockAuthClient::new();
        client.expect_get_session().times(2).returning(|| Ok(signed_in()));
        let client: Arc<dyn AuthClient> = Arc::new(client);

        let first = SessionResolver::spawn(client.clone());
        assert_eq!(first.resolved().await, SessionState::Authenticated);
        drop(first);

        let second = SessionResolver::spawn(client);
        assert_eq!(second.resolved().await, SessionState::Authenticated);
    }

    #[test]
    fn publish_never_reverts_a_resolved_state() {
        let (tx, rx) = watch::channel(SessionState::Unknown);
        let state = Arc::new(tx);
        publish(&Arc::downgrade(&state), SessionState::Authenticated);
        publish(&Arc::downgrade(&state), SessionState::Unauthenticated);
        assert_eq!(*rx.borrow(), SessionState::Authenticated);
    }

    #[test]
    fn publish_after_teardown_is_dropped() {
        let (tx, rx) = watch::channel(SessionState::Unknown);
        let state = Arc::new(tx);
        let weak = Arc::downgrade(&state);
        drop(state);
        publish(&weak, SessionState::Authenticated);
        assert_eq!(*rx.borrow(), SessionState::Unknown);
    }
}
