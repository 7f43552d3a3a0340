mod error;
mod geo;
mod loader;
mod model;
mod observer;
mod pass_finder;
mod types;

pub use error::EphemerisError;
pub use loader::load_tracked_satellite;
pub use model::{OrbitModel, Sgp4Model, EARTH_RADIUS_KM};
pub use observer::Observer;
pub use types::{EventKind, PassEvent, SubPoint};
