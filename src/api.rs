//! OpenAQ API client

use async_trait::async_trait;
use serde::Deserialize;

use crate::action::Action;
use crate::state::{BoundingBox, Location, Measurement};

/// "Latest measurements" endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.openaq.org/v2/latest";

/// Header carrying the API key; sent empty when no key is configured
pub const API_KEY_HEADER: &str = "X-API-Key";

// ============================================================================
// Errors
// ============================================================================

/// Everything that can end a load. Display text is what the user sees.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("HTTP error! status: {0}")]
    Status(u16),
    /// Transport failure, described verbatim
    #[error("{0}")]
    Request(String),
    /// Body was not the expected JSON shape, described verbatim
    #[error("{0}")]
    Decode(String),
}

// ============================================================================
// Response
// ============================================================================

#[derive(Debug, Deserialize)]
struct LatestResponse {
    results: Vec<LatestResult>,
}

#[derive(Debug, Deserialize)]
struct LatestResult {
    name: String,
    measurements: Vec<LatestMeasurement>,
}

#[derive(Debug, Deserialize)]
struct LatestMeasurement {
    parameter: String,
    value: f64,
    unit: String,
}

impl From<LatestResult> for Location {
    fn from(result: LatestResult) -> Self {
        Location {
            name: result.name,
            measurements: result
                .measurements
                .into_iter()
                .map(|m| Measurement {
                    parameter: m.parameter,
                    value: m.value,
                    unit: m.unit,
                })
                .collect(),
        }
    }
}

/// Decode a `/latest` body, keeping the provider's ordering
pub fn decode_latest(body: &[u8]) -> Result<Vec<Location>, FetchError> {
    let data: LatestResponse =
        serde_json::from_slice(body).map_err(|e| FetchError::Decode(e.to_string()))?;
    Ok(data.results.into_iter().map(Location::from).collect())
}

// ============================================================================
// Request
// ============================================================================

/// Fixed query for the dashboard, parameterised only by the bounding box
pub fn latest_query(bbox: &BoundingBox) -> Vec<(&'static str, String)> {
    vec![
        ("limit", "100".into()),
        ("page", "1".into()),
        ("offset", "0".into()),
        ("sort", "desc".into()),
        ("radius", "1000".into()),
        ("order_by", "lastUpdated".into()),
        ("dumpRaw", "false".into()),
        ("coordinates", bbox.to_string()),
        ("location_type", "city".into()),
        ("entity", "community".into()),
        ("value_from", "0".into()),
    ]
}

/// Anything that can produce the latest readings
#[async_trait]
pub trait AirQualitySource: Send + Sync {
    async fn latest(&self) -> Result<Vec<Location>, FetchError>;
}

/// HTTP source backed by the OpenAQ REST API
pub struct OpenAqClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    bbox: BoundingBox,
}

impl OpenAqClient {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>, bbox: BoundingBox) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            api_key,
            bbox,
        }
    }

    pub fn request(&self) -> reqwest::RequestBuilder {
        self.client
            .get(&self.endpoint)
            .query(&latest_query(&self.bbox))
            .header(API_KEY_HEADER, self.api_key.as_deref().unwrap_or_default())
    }
}

#[async_trait]
impl AirQualitySource for OpenAqClient {
    async fn latest(&self) -> Result<Vec<Location>, FetchError> {
        tracing::info!(
            endpoint = %self.endpoint,
            bbox = %self.bbox,
            authenticated = self.api_key.is_some(),
            "requesting latest readings"
        );

        let response = self
            .request()
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;
        let locations = decode_latest(&body)?;
        tracing::info!(locations = locations.len(), "received latest readings");
        Ok(locations)
    }
}

/// Run one load against `source` and turn the outcome into a result action
pub async fn fetch_readings(source: &dyn AirQualitySource) -> Action {
    match source.latest().await {
        Ok(locations) => Action::ReadingsDidLoad(locations),
        Err(e) => {
            tracing::warn!(error = %e, "loading readings failed");
            Action::ReadingsDidError(e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_decode_scenario() {
        let body = r#"{"results":[{"name":"Newark","measurements":[{"parameter":"pm25","value":12.4,"unit":"µg/m³"}]}]}"#;

        let locations = decode_latest(body.as_bytes()).unwrap();

        assert_eq!(
            locations,
            vec![Location {
                name: "Newark".into(),
                measurements: vec![Measurement {
                    parameter: "pm25".into(),
                    value: 12.4,
                    unit: "µg/m³".into(),
                }],
            }]
        );
    }

    #[test]
    fn test_decode_keeps_order_and_ignores_extra_fields() {
        let body = r#"{
            "meta": {"found": 2},
            "results": [
                {"name": "Trenton", "city": null, "measurements": [
                    {"parameter": "o3", "value": 31, "unit": "ppb", "lastUpdated": "2024-01-01"},
                    {"parameter": "no2", "value": 0.5, "unit": "ppm"}
                ]},
                {"name": "Bronx", "measurements": []}
            ]
        }"#;

        let locations = decode_latest(body.as_bytes()).unwrap();

        let names: Vec<_> = locations.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Trenton", "Bronx"]);
        let params: Vec<_> = locations[0]
            .measurements
            .iter()
            .map(|m| m.parameter.as_str())
            .collect();
        assert_eq!(params, vec!["o3", "no2"]);
        assert!(locations[1].measurements.is_empty());
    }

    #[test]
    fn test_decode_empty_results() {
        assert_eq!(decode_latest(br#"{"results":[]}"#), Ok(Vec::new()));
    }

    #[test]
    fn test_decode_failure_is_reported() {
        let err = decode_latest(b"<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
        assert!(!err.to_string().is_empty());

        let err = decode_latest(br#"{"meta":{}}"#).unwrap_err();
        assert!(err.to_string().contains("results"));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(FetchError::Status(503).to_string(), "HTTP error! status: 503");
        assert_eq!(
            FetchError::Request("network timeout".into()).to_string(),
            "network timeout"
        );
    }

    #[test]
    fn test_request_contract() {
        let client = OpenAqClient::new(DEFAULT_ENDPOINT, None, BoundingBox::NYC_TRI_STATE);

        let request = client.request().build().unwrap();

        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(request.url().path(), "/v2/latest");
        let pairs: Vec<(String, String)> = request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        let expected: Vec<(String, String)> = latest_query(&BoundingBox::NYC_TRI_STATE)
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        assert_eq!(pairs, expected);
        assert!(pairs.contains(&("coordinates".into(), "-75.5,39.5,-72.5,42.0".into())));
        assert_eq!(request.headers()[API_KEY_HEADER], "");
    }

    #[test]
    fn test_request_sends_configured_key() {
        let client = OpenAqClient::new(
            DEFAULT_ENDPOINT,
            Some("secret".into()),
            BoundingBox::NYC_TRI_STATE,
        );

        let request = client.request().build().unwrap();

        assert_eq!(request.headers()[API_KEY_HEADER], "secret");
    }
}
