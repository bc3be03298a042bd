//! Nova Poshta address API client.
//!
//! The checkout address resolver's sole network dependency: city search and
//! per-city warehouse listings. All calls go to one JSON endpoint with a
//! `modelName`/`calledMethod` envelope.
//!
//! Results are filtered client-side: temporarily occupied regions and cities
//! are excluded from city search, and postomat lockers (which cannot accept
//! plants) are excluded from warehouse listings.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use crate::config::StorefrontConfig;

/// Nova Poshta API endpoint.
const API_URL: &str = "https://api.novaposhta.ua/v2.0/json/";

/// Minimum query length before a city search goes to the network.
pub const MIN_CITY_QUERY_LEN: usize = 2;

/// City search result page size.
const CITY_LIMIT: &str = "50";

/// Warehouse listing page size.
const WAREHOUSE_LIMIT: &str = "500";

/// Warehouse type GUID for postomat lockers, excluded from results.
const POSTOMAT_WAREHOUSE_TYPE: &str = "9a68df70-0267-42a8-bb5c-37f427e36ee4";

/// Temporarily occupied regions excluded from city search.
const EXCLUDED_REGIONS: &[&str] = &["Автономна Республіка Крим", "Севастопольська"];

/// Temporarily occupied cities excluded from city search.
const EXCLUDED_CITIES: &[&str] = &[
    "Донецьк",
    "Макіївка",
    "Горлівка",
    "Єнакієве",
    "Дебальцеве",
    "Луганськ",
    "Алчевськ",
    "Краснодон",
    "Стаханов",
    "Ровеньки",
];

/// Curated shortcut list shown while the search query is still too short.
pub const POPULAR_CITIES: &[&str] = &[
    "Київ",
    "Харків",
    "Одеса",
    "Дніпро",
    "Львів",
    "Запоріжжя",
    "Кривий Ріг",
    "Миколаїв",
    "Вінниця",
    "Херсон",
    "Полтава",
    "Чернігів",
    "Черкаси",
    "Житомир",
    "Суми",
    "Хмельницький",
    "Рівне",
    "Чернівці",
    "Тернопіль",
    "Івано-Франківськ",
    "Луцьк",
    "Ужгород",
];

/// Errors that can occur when interacting with the Nova Poshta API.
#[derive(Debug, Error)]
pub enum NovaPoshtaError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API reported a failure (`success: false`).
    #[error("Nova Poshta API error: {0}")]
    Api(String),

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A city, as presented to the checkout UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct City {
    /// Opaque reference used to fetch the city's warehouses.
    pub ref_id: String,
    /// Ukrainian name.
    pub name: String,
    /// Area (oblast) the city belongs to.
    pub area: String,
    /// Region within the area, when reported.
    pub region: Option<String>,
}

/// A Nova Poshta branch within a city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    /// Opaque branch reference.
    pub ref_id: String,
    /// Full branch description ("Відділення №1: вул. ...").
    pub description: String,
    /// Short street address, when reported.
    pub short_address: Option<String>,
    /// Branch number (string on the wire, numeric for sorting).
    pub number: String,
    /// Reference of the owning city.
    pub city_ref: String,
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct NpRequest<'a, P> {
    api_key: &'a str,
    model_name: &'static str,
    called_method: &'static str,
    method_properties: P,
}

#[derive(Debug, Serialize)]
struct CitySearchProps<'a> {
    #[serde(rename = "FindByString")]
    find_by_string: &'a str,
    #[serde(rename = "Limit")]
    limit: &'static str,
}

#[derive(Debug, Serialize)]
struct WarehouseProps<'a> {
    #[serde(rename = "CityRef")]
    city_ref: &'a str,
    #[serde(rename = "Limit")]
    limit: &'static str,
}

#[derive(Debug, Deserialize)]
struct NpResponse<T> {
    success: bool,
    #[serde(default = "Vec::new")]
    data: Vec<T>,
    #[serde(default)]
    errors: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CityRecord {
    #[serde(rename = "Ref")]
    ref_id: String,
    #[serde(rename = "Description")]
    description: String,
    #[serde(rename = "AreaDescription", default)]
    area_description: String,
    #[serde(rename = "RegionsDescription", default)]
    regions_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WarehouseRecord {
    #[serde(rename = "Ref")]
    ref_id: String,
    #[serde(rename = "Description")]
    description: String,
    #[serde(rename = "ShortAddress", default)]
    short_address: Option<String>,
    #[serde(rename = "Number", default)]
    number: String,
    #[serde(rename = "CityRef")]
    city_ref: String,
    #[serde(rename = "TypeOfWarehouse", default)]
    type_of_warehouse: String,
}

// =============================================================================
// Client
// =============================================================================

/// Client for the Nova Poshta address API.
#[derive(Clone)]
pub struct NovaPoshtaClient {
    client: reqwest::Client,
    api_key: SecretString,
}

impl NovaPoshtaClient {
    /// Create a new Nova Poshta API client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &StorefrontConfig) -> Result<Self, NovaPoshtaError> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .build()?;

        Ok(Self {
            client,
            api_key: config.nova_poshta_api_key.clone(),
        })
    }

    async fn call<P: Serialize, T: serde::de::DeserializeOwned>(
        &self,
        called_method: &'static str,
        properties: P,
    ) -> Result<Vec<T>, NovaPoshtaError> {
        let request = NpRequest {
            api_key: self.api_key.expose_secret(),
            model_name: "Address",
            called_method,
            method_properties: properties,
        };

        let response = self.client.post(API_URL).json(&request).send().await?;
        let body = response.text().await?;
        let parsed: NpResponse<T> = serde_json::from_str(&body)?;

        if !parsed.success {
            return Err(NovaPoshtaError::Api(parsed.errors.join("; ")));
        }

        Ok(parsed.data)
    }

    /// Search Ukrainian cities by name prefix.
    ///
    /// Queries shorter than [`MIN_CITY_QUERY_LEN`] characters return an empty
    /// list without a network call. Occupied regions and cities are filtered
    /// out of the results.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn search_cities(&self, query: &str) -> Result<Vec<City>, NovaPoshtaError> {
        if query.chars().count() < MIN_CITY_QUERY_LEN {
            return Ok(Vec::new());
        }

        let records: Vec<CityRecord> = self
            .call(
                "getCities",
                CitySearchProps {
                    find_by_string: query,
                    limit: CITY_LIMIT,
                },
            )
            .await?;

        Ok(records
            .into_iter()
            .filter(|city| {
                !EXCLUDED_REGIONS.contains(&city.area_description.as_str())
                    && !EXCLUDED_CITIES.contains(&city.description.as_str())
            })
            .map(|city| City {
                ref_id: city.ref_id,
                name: city.description,
                area: city.area_description,
                region: city.regions_description,
            })
            .collect())
    }

    /// List the branches of a city, postomat lockers excluded, sorted by
    /// branch number.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_warehouses(&self, city_ref: &str) -> Result<Vec<Warehouse>, NovaPoshtaError> {
        if city_ref.is_empty() {
            return Ok(Vec::new());
        }

        let records: Vec<WarehouseRecord> = self
            .call(
                "getWarehouses",
                WarehouseProps {
                    city_ref,
                    limit: WAREHOUSE_LIMIT,
                },
            )
            .await?;

        let mut warehouses: Vec<Warehouse> = records
            .into_iter()
            .filter(|w| w.type_of_warehouse != POSTOMAT_WAREHOUSE_TYPE)
            .map(|w| Warehouse {
                ref_id: w.ref_id,
                description: w.description,
                short_address: w.short_address,
                number: w.number,
                city_ref: w.city_ref,
            })
            .collect();

        warehouses.sort_by_key(|w| w.number.parse::<u32>().unwrap_or(u32::MAX));

        Ok(warehouses)
    }
}

impl std::fmt::Debug for NovaPoshtaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NovaPoshtaClient")
            .field("api_key", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn client() -> NovaPoshtaClient {
        NovaPoshtaClient {
            client: reqwest::Client::new(),
            api_key: SecretString::from("test-key"),
        }
    }

    #[tokio::test]
    async fn test_short_query_skips_network() {
        // A single character never triggers a request; with no reachable
        // API this would otherwise fail.
        let cities = client().search_cities("К").await.unwrap();
        assert!(cities.is_empty());

        let cities = client().search_cities("").await.unwrap();
        assert!(cities.is_empty());
    }

    #[tokio::test]
    async fn test_empty_city_ref_skips_network() {
        let warehouses = client().get_warehouses("").await.unwrap();
        assert!(warehouses.is_empty());
    }

    #[test]
    fn test_request_envelope_wire_format() {
        let request = NpRequest {
            api_key: "key",
            model_name: "Address",
            called_method: "getCities",
            method_properties: CitySearchProps {
                find_by_string: "Київ",
                limit: CITY_LIMIT,
            },
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["apiKey"], "key");
        assert_eq!(json["modelName"], "Address");
        assert_eq!(json["calledMethod"], "getCities");
        assert_eq!(json["methodProperties"]["FindByString"], "Київ");
        assert_eq!(json["methodProperties"]["Limit"], "50");
    }

    #[test]
    fn test_city_filtering() {
        let records = vec![
            CityRecord {
                ref_id: "r1".into(),
                description: "Київ".into(),
                area_description: "Київська".into(),
                regions_description: None,
            },
            CityRecord {
                ref_id: "r2".into(),
                description: "Донецьк".into(),
                area_description: "Донецька".into(),
                regions_description: None,
            },
            CityRecord {
                ref_id: "r3".into(),
                description: "Ялта".into(),
                area_description: "Автономна Республіка Крим".into(),
                regions_description: None,
            },
        ];

        let kept: Vec<_> = records
            .into_iter()
            .filter(|city| {
                !EXCLUDED_REGIONS.contains(&city.area_description.as_str())
                    && !EXCLUDED_CITIES.contains(&city.description.as_str())
            })
            .collect();

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].description, "Київ");
    }

    #[test]
    fn test_warehouse_numeric_sort() {
        let mut warehouses = vec![
            Warehouse {
                ref_id: "w10".into(),
                description: "Відділення №10".into(),
                short_address: None,
                number: "10".into(),
                city_ref: "c".into(),
            },
            Warehouse {
                ref_id: "w2".into(),
                description: "Відділення №2".into(),
                short_address: None,
                number: "2".into(),
                city_ref: "c".into(),
            },
            Warehouse {
                ref_id: "wx".into(),
                description: "Пункт".into(),
                short_address: None,
                number: "n/a".into(),
                city_ref: "c".into(),
            },
        ];

        warehouses.sort_by_key(|w| w.number.parse::<u32>().unwrap_or(u32::MAX));

        assert_eq!(warehouses[0].number, "2");
        assert_eq!(warehouses[1].number, "10");
        assert_eq!(warehouses[2].number, "n/a");
    }

    #[test]
    fn test_popular_cities_list() {
        assert_eq!(POPULAR_CITIES.len(), 22);
        assert_eq!(POPULAR_CITIES[0], "Київ");
    }
}
