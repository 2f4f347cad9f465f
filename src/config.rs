//! Command line / environment configuration

use std::path::PathBuf;

use clap::Parser;

use crate::api::{DEFAULT_ENDPOINT, OpenAqClient};
use crate::state::{BoundingBox, Region};

/// Provider and region settings; every flag can also come from the environment
#[derive(Parser, Debug, Clone)]
pub struct Config {
    /// OpenAQ API key (sent as X-API-Key; empty when unset)
    #[arg(long, env = "OPENAQ_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Latest-measurements endpoint
    #[arg(long, env = "OPENAQ_ENDPOINT", default_value = DEFAULT_ENDPOINT)]
    pub endpoint: String,

    /// Bounding box as "sw_lon,sw_lat,ne_lon,ne_lat"
    #[arg(
        long,
        env = "AIR_QUALITY_BBOX",
        default_value = "-75.5,39.5,-72.5,42.0",
        allow_hyphen_values = true
    )]
    pub bbox: BoundingBox,

    /// Region title shown in the header
    #[arg(long, env = "AIR_QUALITY_REGION", default_value = "NYC Tri-State")]
    pub region: String,

    /// Write tracing output to this file (filtered by RUST_LOG)
    #[arg(long, env = "AIR_QUALITY_LOG")]
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn region(&self) -> Region {
        Region {
            name: self.region.clone(),
            bbox: self.bbox,
        }
    }

    pub fn client(&self) -> OpenAqClient {
        OpenAqClient::new(self.endpoint.clone(), self.api_key.clone(), self.bbox)
    }
}
