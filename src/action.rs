//! Actions: intents, async results and UI input

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::Location;

/// Application actions with automatic category inference
#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Readings category =====
    /// Intent: start a load (on startup, or a manual reload)
    ReadingsFetch,

    /// Result: provider returned the latest readings
    ReadingsDidLoad(Vec<Location>),

    /// Result: request, status or decode failure
    ReadingsDidError(String),

    // ===== UI category =====
    /// Scroll the card grid down one row; `rows` is the grid's current row count
    UiScrollDown { rows: usize },

    /// Scroll the card grid up one row; `rows` is the grid's current row count
    UiScrollUp { rows: usize },

    /// Jump back to the first card row
    UiScrollTop,

    // ===== Uncategorized (global) =====
    /// Spinner tick while loading
    Tick,

    /// Exit the application
    Quit,
}
