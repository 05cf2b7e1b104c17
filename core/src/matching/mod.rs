pub mod radius;
pub mod search;
pub mod session;

pub use radius::{filter_by_radius, sort_by_distance};
pub use search::{search, TypeFilter};
pub use session::{CenterMode, FilterStatus, MatchSession, DEFAULT_RADIUS_KM};
