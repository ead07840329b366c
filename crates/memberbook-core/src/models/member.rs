use std::collections::HashMap;

use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::parent::Parent;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: i64,
    pub name: String,
    pub lastname: String,
    #[serde(default)]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub email: String,
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
    #[serde(default)]
    pub joined: Option<NaiveDate>,
    #[serde(rename = "identityCardNumber", default)]
    pub identity_card_number: String,
    #[serde(rename = "canSwimm", default)]
    pub can_swim: bool,
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub group: Option<i64>,
    /// Embedded read-only parent records, never sent back on writes.
    #[serde(default, skip_serializing)]
    pub parents: Vec<Parent>,
}

impl Member {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.lastname)
    }

    pub fn display_name(&self) -> String {
        format!("{}, {}", self.lastname, self.name)
    }

    pub fn age(&self) -> Option<i32> {
        self.birthday.map(|dob| {
            let today = Utc::now().date_naive();
            let mut age = today.year() - dob.year();
            if (today.month(), today.day()) < (dob.month(), dob.day()) {
                age -= 1;
            }
            age
        })
    }

    pub fn city_line(&self) -> Option<String> {
        if self.zip_code.is_empty() && self.city.is_empty() {
            return None;
        }
        Some(format!("{} {}", self.zip_code, self.city).trim().to_string())
    }
}

/// Write payload for member create/update. Every field is optional so the
/// same shape serves both POST and PATCH; unset fields are left out of the
/// request body entirely.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MemberDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lastname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
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
    #[serde(skip_serializing_if = "Option::is_none")]
    pub joined: Option<NaiveDate>,
    #[serde(rename = "identityCardNumber", skip_serializing_if = "Option::is_none")]
    pub identity_card_number: Option<String>,
    #[serde(rename = "canSwimm", skip_serializing_if = "Option::is_none")]
    pub can_swim: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<i64>,
}

impl MemberDraft {
    pub fn named(name: impl Into<String>, lastname: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            lastname: Some(lastname.into()),
            ..Self::default()
        }
    }
}

/// Aggregate counts from `GET members/statistics/`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberStatistics {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub by_status: HashMap<String, u64>,
}
