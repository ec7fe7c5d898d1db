use url::Url;

use crate::error::ConfigError;

pub const STARTER_TIER_VAR: &str = "STARTER_TIER";
pub const STARTER_SLUG_VAR: &str = "STARTER_SLUG";
pub const AUTH_BASE_URL_VAR: &str = "AUTH_BASE_URL";
pub const SIGN_IN_PATH_VAR: &str = "SIGN_IN_PATH";

pub const DEFAULT_SIGN_IN_PATH: &str = "/sign-in";

/// Product identity the "Pro" card sells. Both values are required.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TierConfig {
    pub product_id: String,
    pub slug: String,
}

impl TierConfig {
    pub fn new(product_id: &str, slug: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            product_id: non_empty(STARTER_TIER_VAR, Some(product_id))?,
            slug: non_empty(STARTER_SLUG_VAR, Some(slug))?,
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            product_id: non_empty(STARTER_TIER_VAR, std::env::var(STARTER_TIER_VAR).ok().as_deref())?,
            slug: non_empty(STARTER_SLUG_VAR, std::env::var(STARTER_SLUG_VAR).ok().as_deref())?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthClientConfig {
    pub base_url: Url,
    pub sign_in_path: String,
}

impl AuthClientConfig {
    pub fn new(base_url: &str, sign_in_path: Option<&str>) -> Result<Self, ConfigError> {
        let raw = non_empty(AUTH_BASE_URL_VAR, Some(base_url))?;
        let mut base_url = Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl {
            var: AUTH_BASE_URL_VAR.to_string(),
            reason: e.to_string(),
        })?;
        // endpoints are joined relative to the base, so its path must end in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let sign_in_path = sign_in_path
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_SIGN_IN_PATH)
            .to_string();
        Ok(Self { base_url, sign_in_path })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var(AUTH_BASE_URL_VAR).unwrap_or_default();
        let sign_in_path = std::env::var(SIGN_IN_PATH_VAR).ok();
        Self::new(&base_url, sign_in_path.as_deref())
    }
}

/// Checks every required variable up front and reports all missing ones together.
pub fn validate_env() -> Result<(), Vec<ConfigError>> {
    let required_vars = [STARTER_TIER_VAR, STARTER_SLUG_VAR, AUTH_BASE_URL_VAR];
    let missing: Vec<ConfigError> = required_vars
        .iter()
        .filter_map(|var| non_empty(var, std::env::var(var).ok().as_deref()).err())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(missing)
    }
}

fn non_empty(var: &str, value: Option<&str>) -> Result<String, ConfigError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ConfigError::Missing(var.to_string())),
    }
}
