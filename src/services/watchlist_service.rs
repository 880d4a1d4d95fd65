//! Watchlist view model
//!
//! Merges the server watchlist with the session catalog into display rows,
//! and drives the mutation flows. Every mutation is applied optimistically;
//! on remote failure the view re-fetches the authoritative list and fully
//! replaces local state rather than computing an inverse, because a failure
//! may have been partial and the server owns the truth for watchlist data.

use crate::api::BackendApi;
use crate::error::{AppError, Result};
use crate::events::{AppEvent, EventBus};
use crate::models::{CatalogEntry, DisplayRow, WatchlistItem};
use crate::services::bulk::run_bounded;
use crate::store::CatalogCache;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tracing::{info, warn};

/// Concurrency cap for the "Add Sector" bulk action
pub const SECTOR_ADD_CONCURRENCY: usize = 5;

/// Sector label for catalog entries with no usable sector
pub const UNKNOWN_SECTOR: &str = "Unknown";

/// Join watchlist items with catalog entries into display rows.
///
/// Pure and order-preserving: every item produces exactly one row, in input
/// order, even when the catalog lookup misses. The lookup is keyed by
/// uppercase symbol; on duplicate catalog symbols the last entry wins.
pub fn reconcile(items: &[WatchlistItem], catalog: &[CatalogEntry]) -> Vec<DisplayRow> {
    let mut by_symbol: HashMap<String, &CatalogEntry> = HashMap::with_capacity(catalog.len());
    for entry in catalog {
        by_symbol.insert(entry.symbol.to_uppercase(), entry);
    }

    items
        .iter()
        .map(|item| {
            let matched = by_symbol.get(&item.symbol.to_uppercase()).copied();

            let sector = item
                .sector
                .as_deref()
                .filter(|s| !s.trim().is_empty())
                .map(str::to_string)
                .or_else(|| matched.map(|c| c.sector.clone()))
                .unwrap_or_else(|| UNKNOWN_SECTOR.to_string());

            let price = matched
                .and_then(|c| c.price)
                .filter(|p| p.is_finite())
                .unwrap_or(0.0);

            DisplayRow {
                id: item.id,
                ticker: item.symbol.clone(),
                name: item.name.clone(),
                price,
                sector,
                whatsapp_enabled: item.notify_whatsapp,
            }
        })
        .collect()
}

fn sector_of(entry: &CatalogEntry) -> &str {
    let sector = entry.sector.trim();
    if sector.is_empty() {
        UNKNOWN_SECTOR
    } else {
        sector
    }
}

/// Group catalog entries by trimmed sector name, empty sectors under
/// "Unknown". BTreeMap keeps the sector list deterministic for the UI.
pub fn group_by_sector(catalog: &[CatalogEntry]) -> BTreeMap<String, Vec<CatalogEntry>> {
    let mut groups: BTreeMap<String, Vec<CatalogEntry>> = BTreeMap::new();
    for entry in catalog {
        groups
            .entry(sector_of(entry).to_string())
            .or_default()
            .push(entry.clone());
    }
    groups
}

/// Catalog entries whose trimmed sector matches `sector` exactly.
pub fn companies_in_sector(catalog: &[CatalogEntry], sector: &str) -> Vec<CatalogEntry> {
    catalog
        .iter()
        .filter(|entry| sector_of(entry) == sector)
        .cloned()
        .collect()
}

/// Result of a single add
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    /// The backend answered 409: the symbol was already tracked. Informational,
    /// not a failure.
    AlreadyPresent,
}

/// Tally of one "Add Sector" batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SectorAddSummary {
    pub requested: usize,
    pub added: usize,
    pub already_present: usize,
    pub failed: usize,
}

/// Client-side view model over the server watchlist
pub struct WatchlistView {
    rows: Vec<DisplayRow>,
    catalog: Arc<CatalogCache>,
    catalog_limit: usize,
    events: EventBus,
}

impl WatchlistView {
    pub fn new(catalog: Arc<CatalogCache>, catalog_limit: usize, events: EventBus) -> Self {
        Self {
            rows: Vec::new(),
            catalog,
            catalog_limit,
            events,
        }
    }

    /// Current display rows.
    pub fn rows(&self) -> &[DisplayRow] {
        &self.rows
    }

    /// Re-fetch the watchlist, reconcile against the session catalog, and
    /// replace local state. The catalog is optional here: when it cannot be
    /// loaded the rows fall back to placeholder sector/price instead of
    /// failing the whole view.
    pub async fn refresh(&mut self, api: &dyn BackendApi) -> Result<()> {
        let items = api.fetch_watchlist().await?;

        let catalog = match self.catalog.get_or_fetch(api, self.catalog_limit).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error = %e, "catalog unavailable, using placeholders");
                Vec::new()
            }
        };

        self.rows = reconcile(&items, &catalog);
        self.events.emit(AppEvent::WatchlistUpdated);
        Ok(())
    }

    /// Add one symbol. A duplicate-add conflict is reported as
    /// [`AddOutcome::AlreadyPresent`] and still refreshes, since the desired
    /// end state already holds.
    pub async fn add(
        &mut self,
        api: &dyn BackendApi,
        symbol: &str,
        exchange: Option<&str>,
    ) -> Result<AddOutcome> {
        match api.add_to_watchlist(symbol, exchange).await {
            Ok(item) => {
                info!(symbol = %item.symbol, id = item.id, "added to watchlist");
                self.refresh(api).await?;
                Ok(AddOutcome::Added)
            }
            Err(e) if e.is_conflict() => {
                info!(symbol, "already in watchlist");
                self.refresh(api).await?;
                Ok(AddOutcome::AlreadyPresent)
            }
            Err(e) => Err(e),
        }
    }

    /// Remove a row, optimistically. On remote failure the authoritative list
    /// is re-fetched and the original error is surfaced.
    pub async fn remove(&mut self, api: &dyn BackendApi, id: i64) -> Result<()> {
        self.rows.retain(|row| row.id != id);

        match api.remove_from_watchlist(id).await {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!(id, error = %e, "remove failed, reloading from server");
                self.recover(api).await;
                Err(e)
            }
        }
    }

    /// Flip WhatsApp notifications for a row, optimistically. On remote
    /// failure the authoritative list is re-fetched and the original error is
    /// surfaced.
    pub async fn toggle_whatsapp(&mut self, api: &dyn BackendApi, id: i64) -> Result<()> {
        let row = self
            .rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or_else(|| AppError::NotFound(format!("watchlist row {id}")))?;

        row.whatsapp_enabled = !row.whatsapp_enabled;
        let desired = row.whatsapp_enabled;

        match api.set_whatsapp(id, desired).await {
            Ok(_) => Ok(()),
            Err(e) => {
                warn!(id, error = %e, "whatsapp toggle failed, reloading from server");
                self.recover(api).await;
                Err(e)
            }
        }
    }

    /// Add every company of a catalog sector, at most
    /// [`SECTOR_ADD_CONCURRENCY`] requests in flight. Per-company conflicts
    /// count as already-present, and one company's failure never aborts the
    /// rest of the batch.
    pub async fn add_sector(
        &mut self,
        api: &dyn BackendApi,
        sector: &str,
    ) -> Result<SectorAddSummary> {
        let catalog = self.catalog.get_or_fetch(api, self.catalog_limit).await?;
        let companies = companies_in_sector(&catalog, sector);

        let mut summary = SectorAddSummary {
            requested: companies.len(),
            ..Default::default()
        };

        if companies.is_empty() {
            return Ok(summary);
        }

        info!(sector, companies = companies.len(), "adding sector to watchlist");

        let tasks: Vec<_> = companies
            .into_iter()
            .map(|company| {
                move || async move {
                    match api
                        .add_to_watchlist(&company.symbol, Some(company.exchange.as_str()))
                        .await
                    {
                        Ok(item) => Ok(Some(item)),
                        Err(e) if e.is_conflict() => Ok(None),
                        Err(e) => Err(e),
                    }
                }
            })
            .collect();

        for outcome in run_bounded(tasks, SECTOR_ADD_CONCURRENCY).await {
            match outcome {
                Ok(Some(_)) => summary.added += 1,
                Ok(None) => summary.already_present += 1,
                Err(e) => {
                    warn!(sector, error = %e, "sector add task failed");
                    summary.failed += 1;
                }
            }
        }

        self.refresh(api).await?;
        Ok(summary)
    }

    /// Best-effort reload after a failed mutation; the mutation's own error is
    /// what the caller sees.
    async fn recover(&mut self, api: &dyn BackendApi) {
        if let Err(e) = self.refresh(api).await {
            warn!(error = %e, "reload after failed mutation also failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicI64, Ordering};

    fn item(id: i64, symbol: &str, sector: Option<&str>, notify: bool) -> WatchlistItem {
        WatchlistItem {
            id,
            symbol: symbol.to_string(),
            name: format!("{symbol} Ltd"),
            sector: sector.map(str::to_string),
            notify_whatsapp: notify,
        }
    }

    fn entry(symbol: &str, sector: &str, price: Option<f64>) -> CatalogEntry {
        CatalogEntry {
            catalog_id: None,
            symbol: symbol.to_string(),
            company_name: format!("{symbol} Ltd"),
            sector: sector.to_string(),
            exchange: "BSE".to_string(),
            price,
            currency: Some("INR".to_string()),
        }
    }

    // ------------------------------------------------------------------
    // reconcile
    // ------------------------------------------------------------------

    #[test]
    fn reconcile_joins_item_with_catalog_match() {
        let items = vec![WatchlistItem {
            id: 1,
            symbol: "RIL.BSE".to_string(),
            name: "Reliance".to_string(),
            sector: None,
            notify_whatsapp: false,
        }];
        let catalog = vec![CatalogEntry {
            catalog_id: None,
            symbol: "RIL.BSE".to_string(),
            company_name: "Reliance".to_string(),
            sector: "Energy".to_string(),
            exchange: "BSE".to_string(),
            price: Some(1400.5),
            currency: None,
        }];

        let rows = reconcile(&items, &catalog);

        assert_eq!(
            rows,
            vec![DisplayRow {
                id: 1,
                ticker: "RIL.BSE".to_string(),
                name: "Reliance".to_string(),
                price: 1400.5,
                sector: "Energy".to_string(),
                whatsapp_enabled: false,
            }]
        );
    }

    #[test]
    fn reconcile_falls_back_to_placeholders_without_catalog() {
        let items = vec![item(1, "RIL.BSE", None, false)];

        let rows = reconcile(&items, &[]);

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].price, 0.0);
        assert_eq!(rows[0].sector, UNKNOWN_SECTOR);
    }

    #[test]
    fn reconcile_preserves_order_and_cardinality() {
        let items = vec![
            item(3, "C.NSE", None, false),
            item(1, "A.BSE", Some("IT"), true),
            item(2, "B.BSE", None, false),
        ];
        let catalog = vec![entry("A.BSE", "Banking", Some(10.0))];

        let rows = reconcile(&items, &catalog);

        assert_eq!(rows.len(), 3);
        assert_eq!(
            rows.iter().map(|r| r.id).collect::<Vec<_>>(),
            vec![3, 1, 2]
        );
    }

    #[test]
    fn reconcile_prefers_item_sector_over_catalog() {
        let items = vec![item(1, "A.BSE", Some("IT"), false)];
        let catalog = vec![entry("A.BSE", "Banking", None)];

        let rows = reconcile(&items, &catalog);
        assert_eq!(rows[0].sector, "IT");
    }

    #[test]
    fn reconcile_treats_blank_item_sector_as_missing() {
        let items = vec![item(1, "A.BSE", Some("  "), false)];
        let catalog = vec![entry("A.BSE", "Banking", None)];

        let rows = reconcile(&items, &catalog);
        assert_eq!(rows[0].sector, "Banking");
    }

    #[test]
    fn reconcile_joins_case_insensitively() {
        let items = vec![item(1, "ril.bse", None, false)];
        let catalog = vec![entry("RIL.BSE", "Energy", Some(5.0))];

        let rows = reconcile(&items, &catalog);
        assert_eq!(rows[0].sector, "Energy");
        assert_eq!(rows[0].price, 5.0);
        // the row keeps the item's own spelling
        assert_eq!(rows[0].ticker, "ril.bse");
    }

    #[test]
    fn reconcile_last_catalog_entry_wins_on_duplicate_symbols() {
        let items = vec![item(1, "A.BSE", None, false)];
        let catalog = vec![
            entry("A.BSE", "Banking", Some(1.0)),
            entry("A.BSE", "Energy", Some(2.0)),
        ];

        let rows = reconcile(&items, &catalog);
        assert_eq!(rows[0].sector, "Energy");
        assert_eq!(rows[0].price, 2.0);
    }

    #[test]
    fn reconcile_is_pure() {
        let items = vec![item(1, "A.BSE", None, true)];
        let catalog = vec![entry("A.BSE", "Energy", Some(3.0))];

        assert_eq!(reconcile(&items, &catalog), reconcile(&items, &catalog));
    }

    // ------------------------------------------------------------------
    // sector grouping
    // ------------------------------------------------------------------

    #[test]
    fn grouping_trims_and_buckets_empty_sectors_as_unknown() {
        let catalog = vec![
            entry("A.BSE", " Energy ", None),
            entry("B.BSE", "", None),
            entry("C.BSE", "Energy", None),
        ];

        let groups = group_by_sector(&catalog);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups["Energy"].len(), 2);
        assert_eq!(groups[UNKNOWN_SECTOR].len(), 1);
    }

    #[test]
    fn sector_filter_matches_exactly() {
        let catalog = vec![
            entry("A.BSE", "Energy", None),
            entry("B.BSE", "energy", None),
        ];

        let companies = companies_in_sector(&catalog, "Energy");
        assert_eq!(companies.len(), 1);
        assert_eq!(companies[0].symbol, "A.BSE");
    }

    // ------------------------------------------------------------------
    // mutation flows against an in-memory backend
    // ------------------------------------------------------------------

    #[derive(Default)]
    struct FakeBackend {
        items: Mutex<Vec<WatchlistItem>>,
        catalog: Vec<CatalogEntry>,
        next_id: AtomicI64,
        fail_toggle: bool,
        fail_remove: bool,
        fail_catalog: bool,
    }

    impl FakeBackend {
        fn with_items(items: Vec<WatchlistItem>, catalog: Vec<CatalogEntry>) -> Self {
            let next_id = items.iter().map(|i| i.id).max().unwrap_or(0) + 1;
            Self {
                items: Mutex::new(items),
                catalog,
                next_id: AtomicI64::new(next_id),
                ..Default::default()
            }
        }

        fn symbols(&self) -> Vec<String> {
            self.items.lock().iter().map(|i| i.symbol.clone()).collect()
        }
    }

    #[async_trait]
    impl BackendApi for FakeBackend {
        async fn fetch_watchlist(&self) -> crate::error::Result<Vec<WatchlistItem>> {
            Ok(self.items.lock().clone())
        }

        async fn add_to_watchlist(
            &self,
            symbol: &str,
            _exchange: Option<&str>,
        ) -> crate::error::Result<WatchlistItem> {
            let mut items = self.items.lock();
            if items.iter().any(|i| i.symbol.eq_ignore_ascii_case(symbol)) {
                return Err(AppError::Conflict("already in watchlist".to_string()));
            }

            let matched = self
                .catalog
                .iter()
                .find(|c| c.symbol.eq_ignore_ascii_case(symbol));
            let added = WatchlistItem {
                id: self.next_id.fetch_add(1, Ordering::SeqCst),
                symbol: symbol.to_string(),
                name: matched
                    .map(|c| c.company_name.clone())
                    .unwrap_or_else(|| symbol.to_string()),
                sector: matched.map(|c| c.sector.clone()),
                notify_whatsapp: false,
            };
            items.push(added.clone());
            Ok(added)
        }

        async fn remove_from_watchlist(&self, id: i64) -> crate::error::Result<()> {
            if self.fail_remove {
                return Err(AppError::Internal("network down".to_string()));
            }
            let mut items = self.items.lock();
            let before = items.len();
            items.retain(|i| i.id != id);
            if items.len() == before {
                return Err(AppError::NotFound(format!("watchlist item {id}")));
            }
            Ok(())
        }

        async fn set_whatsapp(
            &self,
            id: i64,
            notify: bool,
        ) -> crate::error::Result<WatchlistItem> {
            if self.fail_toggle {
                return Err(AppError::Internal("network down".to_string()));
            }
            let mut items = self.items.lock();
            let item = items
                .iter_mut()
                .find(|i| i.id == id)
                .ok_or_else(|| AppError::NotFound(format!("watchlist item {id}")))?;
            item.notify_whatsapp = notify;
            Ok(item.clone())
        }

        async fn fetch_companies(
            &self,
            _q: &str,
            _limit: usize,
            _exchange: Option<&str>,
        ) -> crate::error::Result<Vec<CatalogEntry>> {
            if self.fail_catalog {
                return Err(AppError::Internal("catalog unavailable".to_string()));
            }
            Ok(self.catalog.clone())
        }

        async fn search_companies(
            &self,
            q: &str,
            limit: usize,
            _exchange: Option<&str>,
        ) -> crate::error::Result<Vec<CatalogEntry>> {
            let q = q.to_uppercase();
            Ok(self
                .catalog
                .iter()
                .filter(|c| c.symbol.to_uppercase().contains(&q))
                .take(limit)
                .cloned()
                .collect())
        }
    }

    fn view() -> WatchlistView {
        WatchlistView::new(Arc::new(CatalogCache::new()), 500, EventBus::new())
    }

    #[tokio::test]
    async fn refresh_emits_watchlist_updated() {
        let api = FakeBackend::with_items(vec![item(1, "RIL.BSE", None, false)], vec![]);
        let events = EventBus::new();
        let mut rx = events.subscribe();
        let mut view = WatchlistView::new(Arc::new(CatalogCache::new()), 500, events.clone());

        view.refresh(&api).await.unwrap();

        assert_eq!(rx.recv().await.unwrap(), AppEvent::WatchlistUpdated);
        assert_eq!(view.rows().len(), 1);
    }

    #[tokio::test]
    async fn refresh_degrades_gracefully_without_catalog() {
        let mut api = FakeBackend::with_items(
            vec![item(1, "RIL.BSE", None, false)],
            vec![entry("RIL.BSE", "Energy", Some(1400.5))],
        );
        api.fail_catalog = true;

        let mut view = view();
        view.refresh(&api).await.unwrap();

        assert_eq!(view.rows()[0].sector, UNKNOWN_SECTOR);
        assert_eq!(view.rows()[0].price, 0.0);
    }

    #[tokio::test]
    async fn toggle_whatsapp_success_flips_row_and_server() {
        let api = FakeBackend::with_items(vec![item(1, "RIL.BSE", None, false)], vec![]);
        let mut view = view();
        view.refresh(&api).await.unwrap();

        view.toggle_whatsapp(&api, 1).await.unwrap();

        assert!(view.rows()[0].whatsapp_enabled);
        assert!(api.items.lock()[0].notify_whatsapp);
    }

    #[tokio::test]
    async fn toggle_whatsapp_failure_reloads_server_truth() {
        let mut api = FakeBackend::with_items(vec![item(1, "RIL.BSE", None, false)], vec![]);
        api.fail_toggle = true;

        let mut view = view();
        view.refresh(&api).await.unwrap();

        assert!(view.toggle_whatsapp(&api, 1).await.is_err());
        // the optimistic flip was discarded in favor of the server state
        assert!(!view.rows()[0].whatsapp_enabled);
    }

    #[tokio::test]
    async fn toggle_whatsapp_unknown_row_is_not_found_without_remote_call() {
        let api = FakeBackend::with_items(vec![], vec![]);
        let mut view = view();

        let err = view.toggle_whatsapp(&api, 42).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn remove_failure_restores_rows_from_server() {
        let mut api = FakeBackend::with_items(
            vec![item(1, "RIL.BSE", None, false), item(2, "TCS.NSE", None, false)],
            vec![],
        );
        api.fail_remove = true;

        let mut view = view();
        view.refresh(&api).await.unwrap();

        assert!(view.remove(&api, 1).await.is_err());
        assert_eq!(view.rows().len(), 2);
    }

    #[tokio::test]
    async fn remove_success_drops_the_row() {
        let api = FakeBackend::with_items(
            vec![item(1, "RIL.BSE", None, false), item(2, "TCS.NSE", None, false)],
            vec![],
        );

        let mut view = view();
        view.refresh(&api).await.unwrap();
        view.remove(&api, 1).await.unwrap();

        assert_eq!(view.rows().len(), 1);
        assert_eq!(view.rows()[0].id, 2);
        assert_eq!(api.items.lock().len(), 1);
    }

    #[tokio::test]
    async fn duplicate_add_is_informational() {
        let api = FakeBackend::with_items(vec![item(1, "RIL.BSE", None, false)], vec![]);
        let mut view = view();
        view.refresh(&api).await.unwrap();

        let outcome = view.add(&api, "RIL.BSE", Some("BSE")).await.unwrap();

        assert_eq!(outcome, AddOutcome::AlreadyPresent);
        assert_eq!(view.rows().len(), 1);
    }

    #[tokio::test]
    async fn add_sector_tolerates_conflicts_and_lists_every_symbol() {
        let catalog: Vec<CatalogEntry> = ["A.BSE", "B.BSE", "C.BSE", "D.BSE", "E.BSE"]
            .iter()
            .map(|s| entry(s, "Energy", Some(10.0)))
            .collect();
        // C.BSE is already tracked, so its add will 409
        let api = FakeBackend::with_items(vec![item(1, "C.BSE", None, false)], catalog);

        let mut view = view();
        let summary = view.add_sector(&api, "Energy").await.unwrap();

        assert_eq!(
            summary,
            SectorAddSummary {
                requested: 5,
                added: 4,
                already_present: 1,
                failed: 0,
            }
        );

        let mut symbols = api.symbols();
        symbols.sort();
        assert_eq!(symbols, vec!["A.BSE", "B.BSE", "C.BSE", "D.BSE", "E.BSE"]);
        assert_eq!(view.rows().len(), 5);
    }

    #[tokio::test]
    async fn add_sector_with_no_companies_is_a_no_op() {
        let api = FakeBackend::with_items(vec![], vec![entry("A.BSE", "Energy", None)]);
        let mut view = view();

        let summary = view.add_sector(&api, "Pharma").await.unwrap();
        assert_eq!(summary.requested, 0);
        assert_eq!(summary.added, 0);
    }
}
