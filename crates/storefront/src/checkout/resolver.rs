//! Cascading city → warehouse address resolver.
//!
//! State machine over three loosely-coupled signals: the free-text city
//! query, a single-slot debounce timer, and the fetched result sets. The
//! transitions are presentation-agnostic: an inline dropdown and a
//! full-screen bottom sheet both drive the same methods and render from the
//! same [`AddressSelection`] snapshot.
//!
//! Staleness rules:
//! - a city search result is discarded when the query has changed while the
//!   lookup was in flight (last keystroke wins);
//! - a warehouse listing is discarded when a newer city has been selected
//!   while the fetch was in flight (last-write-wins on the city, not on
//!   call-return order).

use std::future::Future;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::nova_poshta::{
    City, MIN_CITY_QUERY_LEN, NovaPoshtaClient, NovaPoshtaError, POPULAR_CITIES, Warehouse,
};

use super::debounce::Debouncer;

/// Quiet-period between the last keystroke and the city lookup.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// Address lookup operations the resolver depends on.
///
/// [`NovaPoshtaClient`] implements this against the real API; tests provide
/// fakes with controllable timing.
pub trait CityLookup: Send + Sync {
    /// Search cities by name prefix.
    fn search_cities(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<City>, NovaPoshtaError>> + Send;

    /// List the warehouses of a city.
    fn warehouses(
        &self,
        city_ref: &str,
    ) -> impl Future<Output = Result<Vec<Warehouse>, NovaPoshtaError>> + Send;
}

impl CityLookup for NovaPoshtaClient {
    async fn search_cities(&self, query: &str) -> Result<Vec<City>, NovaPoshtaError> {
        Self::search_cities(self, query).await
    }

    async fn warehouses(&self, city_ref: &str) -> Result<Vec<Warehouse>, NovaPoshtaError> {
        self.get_warehouses(city_ref).await
    }
}

/// Presentation-agnostic snapshot of the resolver state.
#[derive(Debug, Clone, Default)]
pub struct AddressSelection {
    /// Current free-text query.
    pub query: String,
    /// City search results for the current query.
    pub cities: Vec<City>,
    /// The selected city, if any.
    pub city: Option<City>,
    /// Warehouses of the selected city.
    pub warehouses: Vec<Warehouse>,
    /// The selected warehouse, if any.
    pub warehouse: Option<Warehouse>,
    /// Composed delivery address (`"{city}, {warehouse description}"`), empty
    /// until a warehouse is selected.
    pub delivery_address: String,
    /// True while the query is too short and the popular-cities shortcut
    /// list should be shown instead of search results.
    pub show_popular: bool,
}

#[derive(Debug)]
struct State {
    debouncer: Debouncer,
    query: String,
    cities: Vec<City>,
    city: Option<City>,
    warehouses: Vec<Warehouse>,
    warehouse: Option<Warehouse>,
    delivery_address: String,
    /// Bumped on every city selection; in-flight warehouse fetches carry the
    /// epoch they started under and are discarded on mismatch.
    epoch: u64,
}

/// The checkout address resolver.
pub struct AddressResolver<L> {
    lookup: L,
    state: Mutex<State>,
}

impl<L: CityLookup> AddressResolver<L> {
    /// Create a resolver around an address lookup client.
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            state: Mutex::new(State {
                debouncer: Debouncer::new(SEARCH_DEBOUNCE),
                query: String::new(),
                cities: Vec::new(),
                city: None,
                warehouses: Vec::new(),
                warehouse: None,
                delivery_address: String::new(),
                epoch: 0,
            }),
        }
    }

    /// The curated popular-cities shortcut list.
    #[must_use]
    pub const fn popular_cities() -> &'static [&'static str] {
        POPULAR_CITIES
    }

    /// Record a keystroke in the city search box.
    ///
    /// Queries shorter than the minimum never arm the timer - the UI shows
    /// the popular-cities list instead and no lookup will fire.
    pub fn input(&self, query: &str, now: Instant) {
        let mut state = self.lock();
        state.query = query.to_owned();

        if query.chars().count() < MIN_CITY_QUERY_LEN {
            state.debouncer.cancel();
            state.cities.clear();
        } else {
            state.debouncer.press(query, now);
        }
    }

    /// Run the debounced city lookup if its quiet-period has elapsed.
    ///
    /// Returns `true` when a lookup fired and its results were applied.
    /// Results for a query that has been superseded by further keystrokes
    /// are discarded.
    ///
    /// # Errors
    ///
    /// Returns an error if the lookup fired and failed; the result set is
    /// left unchanged.
    pub async fn poll_search(&self, now: Instant) -> Result<bool, NovaPoshtaError> {
        let due = {
            let mut state = self.lock();
            state.debouncer.fire(now)
        };
        let Some(query) = due else {
            return Ok(false);
        };

        let cities = self.lookup.search_cities(&query).await?;

        let mut state = self.lock();
        if state.query != query {
            debug!(%query, "Discarding stale city search results");
            return Ok(false);
        }
        state.cities = cities;
        Ok(true)
    }

    /// Select a city.
    ///
    /// Clears any previously selected warehouse, the composed delivery
    /// address, and the warehouse list, and invalidates in-flight warehouse
    /// fetches for the previous city.
    pub fn select_city(&self, city: City) {
        let mut state = self.lock();
        state.query = city.name.clone();
        state.debouncer.cancel();
        state.city = Some(city);
        state.warehouse = None;
        state.warehouses.clear();
        state.delivery_address.clear();
        state.epoch += 1;
    }

    /// Fetch the warehouse list for the selected city.
    ///
    /// Returns `true` when the listing was applied. Without a selected city
    /// this is a no-op; a listing that returns after the city has changed
    /// again is discarded (last-write-wins on the city).
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch failed; the list is left unchanged.
    pub async fn load_warehouses(&self) -> Result<bool, NovaPoshtaError> {
        let (city_ref, epoch) = {
            let state = self.lock();
            match &state.city {
                Some(city) => (city.ref_id.clone(), state.epoch),
                None => return Ok(false),
            }
        };

        let warehouses = self.lookup.warehouses(&city_ref).await?;

        let mut state = self.lock();
        if state.epoch != epoch {
            debug!(%city_ref, "Discarding stale warehouse listing");
            return Ok(false);
        }
        state.warehouses = warehouses;
        Ok(true)
    }

    /// Select a warehouse and compose the delivery address.
    ///
    /// Ignored when no city is selected (a warehouse is only meaningful
    /// together with its owning city).
    pub fn select_warehouse(&self, warehouse: Warehouse) {
        let mut state = self.lock();
        let Some(city_name) = state.city.as_ref().map(|c| c.name.clone()) else {
            return;
        };

        state.delivery_address = format!("{city_name}, {}", warehouse.description);
        state.warehouse = Some(warehouse);
    }

    /// Case-insensitive substring filter over the already-fetched warehouse
    /// list. Purely client-side; no network involved.
    pub fn filtered_warehouses(&self, filter: &str) -> Vec<Warehouse> {
        let state = self.lock();
        if filter.is_empty() {
            return state.warehouses.clone();
        }

        let needle = filter.to_lowercase();
        state
            .warehouses
            .iter()
            .filter(|w| {
                w.description.to_lowercase().contains(&needle)
                    || w.short_address
                        .as_deref()
                        .is_some_and(|a| a.to_lowercase().contains(&needle))
                    || w.number.contains(&needle)
            })
            .cloned()
            .collect()
    }

    /// Reset the resolver to its initial state.
    pub fn clear(&self) {
        let mut state = self.lock();
        state.debouncer.cancel();
        state.query.clear();
        state.cities.clear();
        state.city = None;
        state.warehouses.clear();
        state.warehouse = None;
        state.delivery_address.clear();
        state.epoch += 1;
    }

    /// Snapshot of the current state for rendering.
    pub fn snapshot(&self) -> AddressSelection {
        let state = self.lock();
        AddressSelection {
            query: state.query.clone(),
            cities: state.cities.clone(),
            city: state.city.clone(),
            warehouses: state.warehouses.clone(),
            warehouse: state.warehouse.clone(),
            delivery_address: state.delivery_address.clone(),
            show_popular: state.query.chars().count() < MIN_CITY_QUERY_LEN,
        }
    }

    /// The selected city, if any.
    pub fn selected_city(&self) -> Option<City> {
        self.lock().city.clone()
    }

    /// The selected warehouse, if any.
    pub fn selected_warehouse(&self) -> Option<Warehouse> {
        self.lock().warehouse.clone()
    }

    /// The composed delivery address (empty until a warehouse is selected).
    pub fn delivery_address(&self) -> String {
        self.lock().delivery_address.clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        self.state
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn city(ref_id: &str, name: &str) -> City {
        City {
            ref_id: ref_id.to_owned(),
            name: name.to_owned(),
            area: "Область".to_owned(),
            region: None,
        }
    }

    fn warehouse(ref_id: &str, number: &str, description: &str) -> Warehouse {
        Warehouse {
            ref_id: ref_id.to_owned(),
            description: description.to_owned(),
            short_address: None,
            number: number.to_owned(),
            city_ref: "c".to_owned(),
        }
    }

    #[derive(Default)]
    struct FakeLookup {
        search_calls: AtomicUsize,
        warehouse_calls: AtomicUsize,
    }

    impl CityLookup for &FakeLookup {
        async fn search_cities(&self, query: &str) -> Result<Vec<City>, NovaPoshtaError> {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![city("kyiv-ref", query)])
        }

        async fn warehouses(&self, city_ref: &str) -> Result<Vec<Warehouse>, NovaPoshtaError> {
            self.warehouse_calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![
                warehouse(&format!("{city_ref}-1"), "1", "Відділення №1"),
                warehouse(&format!("{city_ref}-2"), "2", "Відділення №2"),
            ])
        }
    }

    #[tokio::test]
    async fn test_short_query_shows_popular_without_network() {
        let fake = FakeLookup::default();
        let resolver = AddressResolver::new(&fake);
        let t0 = Instant::now();

        resolver.input("К", t0);
        resolver.poll_search(t0 + SEARCH_DEBOUNCE).await.unwrap();

        assert_eq!(fake.search_calls.load(Ordering::SeqCst), 0);
        let snapshot = resolver.snapshot();
        assert!(snapshot.show_popular);
        assert!(snapshot.cities.is_empty());
    }

    #[tokio::test]
    async fn test_debounced_search_fires_once() {
        let fake = FakeLookup::default();
        let resolver = AddressResolver::new(&fake);
        let t0 = Instant::now();

        resolver.input("Ки", t0);
        resolver.input("Киї", t0 + Duration::from_millis(100));
        resolver.input("Київ", t0 + Duration::from_millis(200));

        // Not yet due relative to the last keystroke.
        assert!(!resolver
            .poll_search(t0 + Duration::from_millis(400))
            .await
            .unwrap());

        assert!(resolver
            .poll_search(t0 + Duration::from_millis(500))
            .await
            .unwrap());
        assert_eq!(fake.search_calls.load(Ordering::SeqCst), 1);

        let snapshot = resolver.snapshot();
        assert_eq!(snapshot.cities.len(), 1);
        assert!(!snapshot.show_popular);

        // Nothing left pending.
        assert!(!resolver
            .poll_search(t0 + Duration::from_secs(2))
            .await
            .unwrap());
        assert_eq!(fake.search_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_city_change_invalidates_warehouse_selection() {
        let fake = FakeLookup::default();
        let resolver = AddressResolver::new(&fake);

        resolver.select_city(city("a-ref", "Київ"));
        resolver.load_warehouses().await.unwrap();
        let warehouses = resolver.snapshot().warehouses;
        resolver.select_warehouse(warehouses[0].clone());

        assert_eq!(
            resolver.delivery_address(),
            "Київ, Відділення №1".to_string()
        );

        resolver.select_city(city("b-ref", "Львів"));

        assert!(resolver.selected_warehouse().is_none());
        assert_eq!(resolver.delivery_address(), "");
        assert!(resolver.snapshot().warehouses.is_empty());
    }

    #[tokio::test]
    async fn test_warehouse_selection_composes_address() {
        let fake = FakeLookup::default();
        let resolver = AddressResolver::new(&fake);

        resolver.select_city(city("a-ref", "Харків"));
        resolver.load_warehouses().await.unwrap();
        resolver.select_warehouse(warehouse("w", "3", "Відділення №3: вул. Сумська, 1"));

        assert_eq!(
            resolver.delivery_address(),
            "Харків, Відділення №3: вул. Сумська, 1"
        );
    }

    #[tokio::test]
    async fn test_warehouse_selection_without_city_is_ignored() {
        let fake = FakeLookup::default();
        let resolver = AddressResolver::new(&fake);

        resolver.select_warehouse(warehouse("w", "1", "Відділення №1"));

        assert!(resolver.selected_warehouse().is_none());
        assert_eq!(resolver.delivery_address(), "");
    }

    #[tokio::test]
    async fn test_warehouse_filter_is_case_insensitive() {
        let fake = FakeLookup::default();
        let resolver = AddressResolver::new(&fake);

        resolver.select_city(city("a-ref", "Київ"));
        resolver.load_warehouses().await.unwrap();

        let all = resolver.filtered_warehouses("");
        assert_eq!(all.len(), 2);

        let filtered = resolver.filtered_warehouses("відділення №2");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].number, "2");

        let by_number = resolver.filtered_warehouses("1");
        assert_eq!(by_number.len(), 1);
    }

    #[tokio::test]
    async fn test_last_keystroke_wins() {
        let fake = FakeLookup::default();
        let resolver = AddressResolver::new(&fake);
        let t0 = Instant::now();

        resolver.input("Київ", t0);
        resolver.input("Львів", t0 + Duration::from_millis(100));

        // The superseded query never fires; only the newest one does.
        assert!(!resolver
            .poll_search(t0 + Duration::from_millis(350))
            .await
            .unwrap());
        assert!(resolver
            .poll_search(t0 + Duration::from_millis(400))
            .await
            .unwrap());

        assert_eq!(fake.search_calls.load(Ordering::SeqCst), 1);
        assert_eq!(resolver.snapshot().cities[0].name, "Львів");
    }
}
