//! Domain entities - Objects with identity and lifecycle

mod landmark;
mod place;
mod route;

pub use landmark::{Landmark, MapMarker, MarkerKind};
pub use place::Place;
pub use route::Route;
