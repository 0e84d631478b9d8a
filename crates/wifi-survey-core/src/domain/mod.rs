//! Domain types of the survey: per-network readings, spatial measurement
//! points, the de-duplicating measurement store, and access-point
//! placements.

pub mod ap;
pub mod point;
pub mod reading;
pub mod store;

pub use ap::AccessPoint;
pub use point::MeasurementPoint;
pub use reading::{Band, NetworkReading};
pub use store::MeasurementStore;
