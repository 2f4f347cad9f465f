//! Application state - single source of truth

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One pollutant/metric reading reported by a monitoring location
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Measurement {
    pub parameter: String,
    pub value: f64,
    pub unit: String,
}

impl Measurement {
    /// List item text: `parameter: value unit`
    pub fn label(&self) -> String {
        format!("{}: {} {}", self.parameter, self.value, self.unit)
    }
}

/// A monitoring site and its measurements, in response order
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Location {
    pub name: String,
    pub measurements: Vec<Measurement>,
}

/// Readings lifecycle: Loading → Loaded/Failed
///
/// Cards are identified by their index in `Loaded`, so duplicate names
/// from the provider stay distinct.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub enum Readings {
    #[default]
    Loading,
    Failed(String),
    Loaded(Vec<Location>),
}

impl Readings {
    pub fn is_loading(&self) -> bool {
        matches!(self, Readings::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Readings::Failed(_))
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, Readings::Loaded(_))
    }

    pub fn locations(&self) -> Option<&[Location]> {
        match self {
            Readings::Loaded(locations) => Some(locations),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Readings::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Rectangular geographic filter: south-west and north-east corners
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct BoundingBox {
    pub sw_lon: f64,
    pub sw_lat: f64,
    pub ne_lon: f64,
    pub ne_lat: f64,
}

impl BoundingBox {
    /// Approximate NYC tri-state area
    pub const NYC_TRI_STATE: BoundingBox = BoundingBox {
        sw_lon: -75.5,
        sw_lat: 39.5,
        ne_lon: -72.5,
        ne_lat: 42.0,
    };
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::NYC_TRI_STATE
    }
}

/// Query-string form: `sw_lon,sw_lat,ne_lon,ne_lat`
impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?},{:?},{:?},{:?}",
            self.sw_lon, self.sw_lat, self.ne_lon, self.ne_lat
        )
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum BoundingBoxError {
    #[error("expected 4 comma-separated numbers, got {0}")]
    Arity(usize),
    #[error("invalid coordinate {0:?}")]
    Coordinate(String),
    #[error("longitude must be within -180..=180 and latitude within -90..=90")]
    OutOfRange,
    #[error("south-west corner must lie below and left of north-east corner")]
    Inverted,
}

impl FromStr for BoundingBox {
    type Err = BoundingBoxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(BoundingBoxError::Arity(parts.len()));
        }
        let mut coords = [0.0_f64; 4];
        for (slot, part) in coords.iter_mut().zip(&parts) {
            *slot = part
                .parse()
                .map_err(|_| BoundingBoxError::Coordinate(part.to_string()))?;
        }
        let [sw_lon, sw_lat, ne_lon, ne_lat] = coords;

        let lon_ok = |v: f64| (-180.0..=180.0).contains(&v);
        let lat_ok = |v: f64| (-90.0..=90.0).contains(&v);
        if !(lon_ok(sw_lon) && lon_ok(ne_lon) && lat_ok(sw_lat) && lat_ok(ne_lat)) {
            return Err(BoundingBoxError::OutOfRange);
        }
        if sw_lon >= ne_lon || sw_lat >= ne_lat {
            return Err(BoundingBoxError::Inverted);
        }

        Ok(BoundingBox {
            sw_lon,
            sw_lat,
            ne_lon,
            ne_lat,
        })
    }
}

/// The area the dashboard covers
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Region {
    pub name: String,
    pub bbox: BoundingBox,
}

impl Default for Region {
    fn default() -> Self {
        Self {
            name: "NYC Tri-State".into(),
            bbox: BoundingBox::NYC_TRI_STATE,
        }
    }
}

/// Spinner frames shown next to the loading message.
pub const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];
pub const SPINNER_TICK_MS: u64 = 120;

/// Application state - everything the UI needs to render
#[derive(Clone, Debug, Default, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    #[debug(section = "Region", label = "Area", debug_fmt)]
    pub region: Region,

    /// Readings lifecycle for the current load
    #[debug(section = "Readings", label = "Data", debug_fmt)]
    pub readings: Readings,

    /// First visible card row
    #[debug(section = "View", label = "Scroll")]
    pub scroll: usize,

    #[debug(skip)]
    pub tick_count: u32,
}

impl AppState {
    pub fn new(region: Region) -> Self {
        Self {
            region,
            ..Default::default()
        }
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.tick_count as usize % SPINNER_FRAMES.len()]
    }
}
