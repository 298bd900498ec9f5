//! Value Objects - Immutable, identity-less domain primitives

mod camera;
mod geo_location;
mod map_rect;
mod transport_mode;

pub use camera::CameraState;
pub use geo_location::GeoLocation;
pub use map_rect::{MapPoint, MapRect, MapSize};
pub use transport_mode::{RoutingProfile, TransportMode};
