use tracing::warn;

use crate::api::ApiClient;
use crate::models::{LocationHit, SearchEntry, SearchTarget, StockReport};

use super::DebouncedSearch;

/// The six known stock transaction types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    /// Goods received
    In,
    /// Goods issued
    Out,
    /// Relocation between two locations
    Move,
    /// Loan to a member
    Loan,
    /// Returned loan
    Return,
    /// Discarded / written off
    Discard,
}

impl TransactionKind {
    /// Parse the wire value of the transaction-type field. Anything
    /// unknown yields `None` and gets the default section handling.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "IN" => Some(TransactionKind::In),
            "OUT" => Some(TransactionKind::Out),
            "MOVE" => Some(TransactionKind::Move),
            "LOAN" => Some(TransactionKind::Loan),
            "RETURN" => Some(TransactionKind::Return),
            "DISCARD" => Some(TransactionKind::Discard),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Section {
    pub visible: bool,
    pub required: bool,
}

/// Visibility and required flags of the source/target location sections.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectionLayout {
    pub source: Section,
    pub target: Section,
}

impl SectionLayout {
    /// Apply the rules for a transaction type: incoming types need only a
    /// target, outgoing types only a source, two-sided types both. An
    /// unknown type shows both sections and leaves the required flags as
    /// they were.
    pub fn apply(&mut self, kind: Option<TransactionKind>) {
        self.source.visible = false;
        self.target.visible = false;

        match kind {
            Some(TransactionKind::In) | Some(TransactionKind::Return) => {
                self.target.visible = true;
                self.target.required = true;
                self.source.required = false;
            }
            Some(TransactionKind::Out) | Some(TransactionKind::Discard) => {
                self.source.visible = true;
                self.source.required = true;
                self.target.required = false;
            }
            Some(TransactionKind::Move) | Some(TransactionKind::Loan) => {
                self.source.visible = true;
                self.target.visible = true;
                self.source.required = true;
                self.target.required = true;
            }
            None => {
                self.source.visible = true;
                self.target.visible = true;
            }
        }
    }
}

/// State of the stock-transaction form: the chosen transaction type with
/// its section layout, the item-or-variant selection, the two location
/// selections, the cached stock report, and one debounced search per
/// search field.
pub struct TransactionForm {
    api: ApiClient,
    kind: Option<TransactionKind>,
    layout: SectionLayout,
    selection: Option<SearchTarget>,
    source: Option<i64>,
    target: Option<i64>,
    stock: Option<StockReport>,
    catalog_results: Vec<SearchEntry>,
    source_results: Vec<LocationHit>,
    target_results: Vec<LocationHit>,
    catalog_search: DebouncedSearch,
    source_search: DebouncedSearch,
    target_search: DebouncedSearch,
}

impl TransactionForm {
    pub fn new(api: ApiClient) -> Self {
        let mut layout = SectionLayout::default();
        // The type select starts empty, which falls into the default
        // branch: both sections shown.
        layout.apply(None);

        Self {
            api,
            kind: None,
            layout,
            selection: None,
            source: None,
            target: None,
            stock: None,
            catalog_results: Vec::new(),
            source_results: Vec::new(),
            target_results: Vec::new(),
            catalog_search: DebouncedSearch::new(),
            source_search: DebouncedSearch::new(),
            target_search: DebouncedSearch::new(),
        }
    }

    pub fn kind(&self) -> Option<TransactionKind> {
        self.kind
    }

    pub fn layout(&self) -> &SectionLayout {
        &self.layout
    }

    pub fn selection(&self) -> Option<SearchTarget> {
        self.selection
    }

    pub fn stock(&self) -> Option<&StockReport> {
        self.stock.as_ref()
    }

    pub fn catalog_results(&self) -> &[SearchEntry] {
        &self.catalog_results
    }

    pub fn source_results(&self) -> &[LocationHit] {
        &self.source_results
    }

    pub fn target_results(&self) -> &[LocationHit] {
        &self.target_results
    }

    /// React to a change of the transaction-type select: recompute the
    /// section layout and drop the stale stock display.
    pub fn set_transaction_type(&mut self, raw: &str) {
        self.kind = TransactionKind::parse(raw);
        self.layout.apply(self.kind);
        self.stock = None;
    }

    /// Select an item. Clears any variant selection - the two selects are
    /// mutually exclusive - and refetches stock.
    pub async fn select_item(&mut self, item_id: i64) {
        self.selection = Some(SearchTarget::Item(item_id));
        self.refresh_stock().await;
    }

    /// Select a variant, clearing any item selection, and refetch stock.
    pub async fn select_variant(&mut self, variant_id: i64) {
        self.selection = Some(SearchTarget::Variant(variant_id));
        self.refresh_stock().await;
    }

    pub async fn clear_selection(&mut self) {
        self.selection = None;
        self.refresh_stock().await;
    }

    /// Choose the source location. Stock is scoped to it from now on.
    pub async fn select_source(&mut self, location_id: Option<i64>) {
        self.source = location_id;
        self.refresh_stock().await;
    }

    /// Choose the target location. Does not affect the stock display.
    pub fn select_target(&mut self, location_id: Option<i64>) {
        self.target = location_id;
    }

    /// Refetch the stock report for the current selection, scoped to the
    /// source location when one is chosen. Fetch failures clear the
    /// display instead of surfacing - the form stays usable without it.
    pub async fn refresh_stock(&mut self) {
        let report = match self.selection {
            None => None,
            Some(SearchTarget::Item(id)) => {
                match self.api.inventory().item_stock(id, self.source).await {
                    Ok(report) => Some(report),
                    Err(e) => {
                        warn!(error = %e, item = id, "Failed to fetch item stock");
                        None
                    }
                }
            }
            Some(SearchTarget::Variant(id)) => {
                match self.api.inventory().variant_stock(id, self.source).await {
                    Ok(report) => Some(report),
                    Err(e) => {
                        warn!(error = %e, variant = id, "Failed to fetch variant stock");
                        None
                    }
                }
            }
        };
        self.stock = report;
    }

    /// Debounced item/variant search feeding the combined result list.
    pub async fn search_catalog(&mut self, query: &str) {
        let api = self.api.clone();
        let fetched = self
            .catalog_search
            .run(query, |q| async move { api.inventory().search_catalog(&q).await })
            .await;
        match fetched {
            Some(Ok(entries)) => self.catalog_results = entries,
            Some(Err(e)) => warn!(error = %e, "Item search failed"),
            None => {}
        }
    }

    pub async fn search_source_locations(&mut self, query: &str) {
        let api = self.api.clone();
        let fetched = self
            .source_search
            .run(query, |q| async move { api.inventory().search_locations(&q).await })
            .await;
        match fetched {
            Some(Ok(locations)) => self.source_results = locations,
            Some(Err(e)) => warn!(error = %e, "Location search failed"),
            None => {}
        }
    }

    pub async fn search_target_locations(&mut self, query: &str) {
        let api = self.api.clone();
        let fetched = self
            .target_search
            .run(query, |q| async move { api.inventory().search_locations(&q).await })
            .await;
        match fetched {
            Some(Ok(locations)) => self.target_results = locations,
            Some(Err(e)) => warn!(error = %e, "Location search failed"),
            None => {}
        }
    }
}
