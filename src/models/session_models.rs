use serde::{Deserialize, Serialize};

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Unknown,
    Authenticated,
    Unauthenticated,
}

impl SessionState {
    pub fn is_resolved(&self) -> bool {
        !matches!(self, SessionState::Unknown)
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct SessionData {
    #[serde(default)]
    pub user: Option<SessionUser>,
}

/// Payload of the session query. `data` is null for anonymous visitors.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct SessionResponse {
    #[serde(default)]
    pub data: Option<SessionData>,
}

impl SessionResponse {
    pub fn is_authenticated(&self) -> bool {
        self.data.as_ref().and_then(|d| d.user.as_ref()).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_data_is_anonymous() {
        let response: SessionResponse = serde_json::from_str(r#"{"data": null}"#).unwrap();
        assert!(!response.is_authenticated());
    }

    #[test]
    fn data_without_user_is_anonymous() {
        let response: SessionResponse = serde_json::from_str(r#"{"data": {"user": null}}"#).unwrap();
        assert!(!response.is_authenticated());
    }

    #[test]
    fn user_present_is_authenticated() {
        let response: SessionResponse =
            serde_json::from_str(r#"{"data": {"user": {"id": "u1", "email": "a@b.c"}}}"#).unwrap();
        assert!(response.is_authenticated());
    }
}
