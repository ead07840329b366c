use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parent {
    pub id: i64,
    pub name: String,
    pub lastname: String,
    /// Member ids this parent is linked to.
    #[serde(default)]
    pub children: Vec<i64>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub email2: String,
    #[serde(default)]
    pub street: String,
    #[serde(default)]
    pub zip_code: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub mobile: String,
    #[serde(default)]
    pub notes: String,
}

impl Parent {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.lastname)
    }

    pub fn display_name(&self) -> String {
        format!("{}, {}", self.lastname, self.name)
    }

    /// Mobile number normalized for a messenger deep link: digits only,
    /// no spaces or leading plus.
    pub fn messenger_number(&self) -> Option<String> {
        if self.mobile.trim().is_empty() {
            return None;
        }
        Some(self.mobile.replace(' ', "").replace('+', ""))
    }
}

/// Write payload for parent create/update, all fields optional.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParentDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<i64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}
