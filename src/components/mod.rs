pub mod card_grid;
pub mod dashboard;
pub mod location_card;
pub mod readings_view;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use card_grid::{CardGrid, CardGridProps, grid_columns};
pub use dashboard::{Dashboard, DashboardProps};
pub use location_card::{LocationCard, LocationCardProps};
pub use readings_view::{EMPTY_MESSAGE, LOADING_MESSAGE, ReadingsView, ReadingsViewProps};
