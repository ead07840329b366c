use serde::{Deserialize, Serialize};

/// Account profile returned by `GET users/me/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub permissions: Vec<String>,
    #[serde(default)]
    pub is_superuser: bool,
}

/// Write payload for profile updates, all fields optional.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Server-declared application settings. The key set is open-ended, so
/// this stays a raw JSON map rather than a typed struct.
pub type AppSettings = serde_json::Map<String, serde_json::Value>;

/// Access/refresh token pair returned by `POST auth/login/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Response of `POST auth/refresh/`. The refresh token is present only
/// when the server rotates refresh tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenRefresh {
    pub access: String,
    #[serde(default)]
    pub refresh: Option<String>,
}
