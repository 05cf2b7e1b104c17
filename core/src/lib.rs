//! Proximity matching core for the LmpLink platform.
//!
//! Users (care recipients) and assistants (caregivers) are plain location
//! records. The core measures great-circle distances between them, filters
//! one side of the roster by radius around a selected person on the other
//! side, and keeps the small amount of state a map screen needs to drive
//! that selection.

pub mod directory;
pub mod geo;
pub mod matching;
pub mod model;
pub mod prelude;
pub mod telemetry;

pub use geo::distance_km;
pub use matching::radius::{filter_by_radius, sort_by_distance};
pub use prelude::{CoreError, CoreResult};
