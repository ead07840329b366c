use serde::{Deserialize, Serialize};

/// Item hit from `GET inventory/items/search/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemHit {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub total_stock: Option<i64>,
}

/// The item search endpoint has served both `results` and `items` as the
/// list key over time; accept either.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemSearchResponse {
    #[serde(default, alias = "items")]
    pub results: Vec<ItemHit>,
}

/// Variant hit from `GET inventory/variants/?search=`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VariantHit {
    pub id: i64,
    #[serde(default)]
    pub sku: Option<String>,
    pub parent_item_name: String,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub total_stock: Option<i64>,
}

/// What a combined item/variant search row points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchTarget {
    Item(i64),
    Variant(i64),
}

/// One row of the combined item-and-variant search result list.
#[derive(Debug, Clone)]
pub struct SearchEntry {
    pub target: SearchTarget,
    pub display_name: String,
    pub category: Option<String>,
    pub total_stock: Option<i64>,
}

impl SearchEntry {
    pub fn from_item(item: ItemHit) -> Self {
        let display_name = match &item.category_name {
            Some(category) if !category.is_empty() => format!("{} ({})", item.name, category),
            _ => item.name.clone(),
        };
        Self {
            target: SearchTarget::Item(item.id),
            display_name,
            category: item.category_name,
            total_stock: item.total_stock,
        }
    }

    pub fn from_variant(variant: VariantHit) -> Self {
        let display_name = match &variant.sku {
            Some(sku) if !sku.is_empty() => format!("{} [{}]", variant.parent_item_name, sku),
            _ => variant.parent_item_name.clone(),
        };
        Self {
            target: SearchTarget::Variant(variant.id),
            display_name,
            category: variant.category_name,
            total_stock: variant.total_stock,
        }
    }
}

/// Storage location hit from `GET inventory/locations/?search=`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationHit {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub full_path: Option<String>,
    #[serde(default)]
    pub is_member: Option<bool>,
}

impl LocationHit {
    /// Hierarchical path when the server provides one, bare name otherwise.
    pub fn display_path(&self) -> &str {
        self.full_path
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockRow {
    pub location_name: String,
    pub quantity: i64,
}

/// Stock aggregation from `GET inventory/items/{id}/stock/` or
/// `GET inventory/variants/{id}/stock/`: the grand total plus one row per
/// location that holds any.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StockReport {
    #[serde(default)]
    pub total: i64,
    #[serde(default)]
    pub rows: Vec<StockRow>,
}

impl StockReport {
    /// Quantity at one named location, if that location holds stock.
    pub fn quantity_at(&self, location_name: &str) -> Option<i64> {
        self.rows
            .iter()
            .find(|row| row.location_name == location_name)
            .map(|row| row.quantity)
    }
}

/// Attribute schema from `GET inventory/categories/{id}/schema/`:
/// field name mapped to a type string such as "number" or "date".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategorySchemaResponse {
    #[serde(default)]
    pub schema: std::collections::BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_entries_build_display_names() {
        let item = ItemHit {
            id: 3,
            name: "Helm".into(),
            category_name: Some("Schutzkleidung".into()),
            total_stock: Some(14),
        };
        let entry = SearchEntry::from_item(item);
        assert_eq!(entry.display_name, "Helm (Schutzkleidung)");
        assert_eq!(entry.target, SearchTarget::Item(3));

        let variant = VariantHit {
            id: 8,
            sku: Some("HELM-M".into()),
            parent_item_name: "Helm".into(),
            category_name: None,
            total_stock: None,
        };
        let entry = SearchEntry::from_variant(variant);
        assert_eq!(entry.display_name, "Helm [HELM-M]");
        assert_eq!(entry.target, SearchTarget::Variant(8));
    }

    #[test]
    fn item_search_response_accepts_items_alias() {
        let response: ItemSearchResponse =
            serde_json::from_str(r#"{"items": [{"id": 1, "name": "Seil"}]}"#)
                .expect("alias key should parse");
        assert_eq!(response.results.len(), 1);
    }

    #[test]
    fn stock_report_looks_up_by_location() {
        let report = StockReport {
            total: 9,
            rows: vec![
                StockRow { location_name: "Lager".into(), quantity: 6 },
                StockRow { location_name: "Fahrzeug 1".into(), quantity: 3 },
            ],
        };
        assert_eq!(report.quantity_at("Fahrzeug 1"), Some(3));
        assert_eq!(report.quantity_at("Keller"), None);
    }
}
