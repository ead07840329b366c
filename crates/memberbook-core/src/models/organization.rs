use serde::{Deserialize, Serialize};

/// Membership status lookup entry (e.g. active, passive, alumni). The
/// server attaches a display color to each status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Status {
    pub id: i64,
    pub name: String,
    #[serde(default = "Status::default_color")]
    pub color: String,
}

impl Status {
    fn default_color() -> String {
        "#FF0000".to_string()
    }
}

/// Group lookup entry (age group / squad a member belongs to).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_color_defaults_when_missing() {
        let status: Status =
            serde_json::from_str(r#"{"id": 1, "name": "Aktiv"}"#).expect("status should parse");
        assert_eq!(status.color, "#FF0000");
    }
}
