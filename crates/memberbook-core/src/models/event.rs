use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventType {
    pub id: i64,
    pub name: String,
}

/// A service-log entry: something that happened to one member on one day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: i64,
    /// Event type id; the expanded record is in `event_type`.
    #[serde(rename = "type", default)]
    pub type_id: Option<i64>,
    pub datetime: NaiveDate,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub member: Option<i64>,
    /// Display name of the member, filled in by the server on reads only.
    #[serde(default, skip_serializing)]
    pub member_name: Option<String>,
    /// Expanded event type, filled in by the server on reads only.
    #[serde(default, skip_serializing)]
    pub event_type: Option<EventType>,
}

/// Write payload for event create/update.
#[derive(Debug, Clone, Default, Serialize)]
pub struct EventDraft {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member: Option<i64>,
}
