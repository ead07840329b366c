use serde::Serialize;

use crate::models::{
    CategorySchemaResponse, ItemHit, ItemSearchResponse, ListOrPage, LocationHit, SearchEntry,
    StockReport, VariantHit,
};

use super::{ApiClient, ApiResult};

#[derive(Debug, Serialize)]
struct QueryParam<'a> {
    q: &'a str,
}

#[derive(Debug, Serialize)]
struct SearchParam<'a> {
    search: &'a str,
}

#[derive(Debug, Serialize)]
struct StockParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    location_id: Option<i64>,
}

pub struct InventoryApi<'a> {
    client: &'a ApiClient,
}

impl ApiClient {
    pub fn inventory(&self) -> InventoryApi<'_> {
        InventoryApi { client: self }
    }
}

impl InventoryApi<'_> {
    pub async fn search_items(&self, query: &str) -> ApiResult<Vec<ItemHit>> {
        let response: ItemSearchResponse = self
            .client
            .get_with("/inventory/items/search/", &QueryParam { q: query })
            .await?;
        Ok(response.results)
    }

    pub async fn search_variants(&self, query: &str) -> ApiResult<Vec<VariantHit>> {
        let page: ListOrPage<VariantHit> = self
            .client
            .get_with("/inventory/variants/", &SearchParam { search: query })
            .await?;
        Ok(page.into_results())
    }

    /// Items and variants matching `query`, merged into one display list
    /// the way the transaction form presents them.
    pub async fn search_catalog(&self, query: &str) -> ApiResult<Vec<SearchEntry>> {
        let items = self.search_items(query).await?;
        let variants = self.search_variants(query).await?;

        let mut entries: Vec<SearchEntry> =
            items.into_iter().map(SearchEntry::from_item).collect();
        entries.extend(variants.into_iter().map(SearchEntry::from_variant));
        Ok(entries)
    }

    pub async fn search_locations(&self, query: &str) -> ApiResult<Vec<LocationHit>> {
        let page: ListOrPage<LocationHit> = self
            .client
            .get_with("/inventory/locations/", &SearchParam { search: query })
            .await?;
        Ok(page.into_results())
    }

    /// Stock for one item, scoped to a location when one is given.
    pub async fn item_stock(&self, item_id: i64, location_id: Option<i64>) -> ApiResult<StockReport> {
        self.client
            .get_with(
                &format!("/inventory/items/{}/stock/", item_id),
                &StockParams { location_id },
            )
            .await
    }

    /// Stock for one item variant, scoped to a location when one is given.
    pub async fn variant_stock(
        &self,
        variant_id: i64,
        location_id: Option<i64>,
    ) -> ApiResult<StockReport> {
        self.client
            .get_with(
                &format!("/inventory/variants/{}/stock/", variant_id),
                &StockParams { location_id },
            )
            .await
    }

    /// The attribute schema declared for an item category.
    pub async fn category_schema(&self, category_id: i64) -> ApiResult<CategorySchemaResponse> {
        self.client
            .get(&format!("/inventory/categories/{}/schema/", category_id))
            .await
    }
}
