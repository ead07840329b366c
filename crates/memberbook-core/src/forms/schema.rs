use chrono::NaiveDate;
use serde_json::{Map, Value};

use crate::models::CategorySchemaResponse;

/// Closed set of field kinds a category schema may declare. Unknown type
/// strings fall back to plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Date,
    Boolean,
    Select,
}

impl FieldKind {
    pub fn parse(type_name: &str) -> Self {
        match type_name.to_ascii_lowercase().as_str() {
            "number" => FieldKind::Number,
            "date" => FieldKind::Date,
            "boolean" => FieldKind::Boolean,
            "select" => FieldKind::Select,
            _ => FieldKind::Text,
        }
    }
}

/// Current value of one dynamic field, tagged by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    /// Text input or chosen select option.
    Text(String),
    Number(Option<f64>),
    Date(Option<NaiveDate>),
    Boolean(bool),
}

#[derive(Debug, Clone)]
pub struct DynamicField {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    value: FieldValue,
}

impl DynamicField {
    fn new(name: &str, kind: FieldKind) -> Self {
        Self {
            name: name.to_string(),
            label: format_label(name),
            kind,
            value: match kind {
                FieldKind::Number => FieldValue::Number(None),
                FieldKind::Date => FieldValue::Date(None),
                FieldKind::Boolean => FieldValue::Boolean(false),
                FieldKind::Text | FieldKind::Select => FieldValue::Text(String::new()),
            },
        }
    }

    /// Seed the field from a previously stored attribute value.
    fn seed(&mut self, value: &Value) {
        self.value = match self.kind {
            FieldKind::Number => FieldValue::Number(match value {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.parse().ok(),
                _ => None,
            }),
            FieldKind::Date => FieldValue::Date(
                value
                    .as_str()
                    .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()),
            ),
            FieldKind::Boolean => {
                FieldValue::Boolean(value == &Value::Bool(true) || value.as_str() == Some("true"))
            }
            FieldKind::Text | FieldKind::Select => {
                FieldValue::Text(value.as_str().unwrap_or_default().to_string())
            }
        };
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }
}

/// A form built from a category's attribute schema. Fields carry their
/// own typed values and serialize back into the generic attribute map
/// stored on the item.
#[derive(Debug, Clone, Default)]
pub struct DynamicForm {
    fields: Vec<DynamicField>,
}

impl DynamicForm {
    pub fn from_schema(schema: &CategorySchemaResponse) -> Self {
        let fields = schema
            .schema
            .iter()
            .map(|(name, type_name)| DynamicField::new(name, FieldKind::parse(type_name)))
            .collect();
        Self { fields }
    }

    /// Build the form and seed it with attribute values stored on an
    /// existing item. Attributes without a schema entry are dropped.
    pub fn from_schema_with_values(schema: &CategorySchemaResponse, existing: &Map<String, Value>) -> Self {
        let mut form = Self::from_schema(schema);
        for field in &mut form.fields {
            if let Some(value) = existing.get(&field.name) {
                field.seed(value);
            }
        }
        form
    }

    pub fn fields(&self) -> &[DynamicField] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&DynamicField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Apply raw input text to a field, parsing it per the field kind.
    /// Unparseable numbers and dates become empty, like a cleared input.
    pub fn set_input(&mut self, name: &str, input: &str) {
        let Some(field) = self.fields.iter_mut().find(|f| f.name == name) else {
            return;
        };
        field.value = match field.kind {
            FieldKind::Number => FieldValue::Number(if input.is_empty() {
                None
            } else {
                input.parse().ok()
            }),
            FieldKind::Date => {
                FieldValue::Date(NaiveDate::parse_from_str(input, "%Y-%m-%d").ok())
            }
            FieldKind::Boolean => FieldValue::Boolean(input == "true"),
            FieldKind::Text | FieldKind::Select => FieldValue::Text(input.to_string()),
        };
    }

    /// Toggle a boolean field (checkbox).
    pub fn set_checked(&mut self, name: &str, checked: bool) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.name == name) {
            if field.kind == FieldKind::Boolean {
                field.value = FieldValue::Boolean(checked);
            }
        }
    }

    /// Serialize the current values into the generic attribute map.
    /// Empty text and unset numbers/dates are omitted; booleans are always
    /// written, unchecked included.
    pub fn attributes(&self) -> Map<String, Value> {
        let mut attributes = Map::new();
        for field in &self.fields {
            let value = match &field.value {
                FieldValue::Text(s) if s.is_empty() => continue,
                FieldValue::Text(s) => Value::String(s.clone()),
                FieldValue::Number(None) | FieldValue::Date(None) => continue,
                FieldValue::Number(Some(n)) => match serde_json::Number::from_f64(*n) {
                    Some(n) => Value::Number(n),
                    None => continue,
                },
                FieldValue::Date(Some(d)) => Value::String(d.format("%Y-%m-%d").to_string()),
                FieldValue::Boolean(b) => Value::Bool(*b),
            };
            attributes.insert(field.name.clone(), value);
        }
        attributes
    }
}

/// snake_case attribute names become Title Case labels.
fn format_label(name: &str) -> String {
    name.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
