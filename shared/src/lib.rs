pub mod camera;
pub mod controller;
pub mod location;
pub mod summary;
pub mod tier;

pub use camera::{Dimension, MapStyle, ViewState};
pub use controller::{MapController, SearchOutcome, SearchTicket};
pub use location::{
    Category, CategoryScores, DataError, LngLat, LocationId, LocationKind, LocationRecord,
    LocationSet,
};
pub use summary::{Aggregates, LegendEntry};
pub use tier::Tier;
