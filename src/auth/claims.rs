use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

pub const AUTHENTICATED_ROLE: &str = "authenticated";

/// Claims carried by access tokens from the hosted identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default = "default_role")]
    pub role: String,
    pub aud: String,
    pub exp: usize,
    pub iat: usize,
}

fn default_role() -> String {
    AUTHENTICATED_ROLE.to_string()
}

impl Claims {
    pub fn new(user_id: &str, email: Option<&str>, audience: &str, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        Self {
            sub: user_id.to_string(),
            email: email.map(str::to_string),
            role: default_role(),
            aud: audience.to_string(),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }

    pub fn user_id(&self) -> &str {
        &self.sub
    }
}
