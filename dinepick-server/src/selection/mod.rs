//! Restaurant Selection Module
//!
//! Picks random restaurants around a point, optionally restricted to the
//! ones open at a given weekday and time of day.
//!
//! - [`geo`] - great-circle distance
//! - [`source`] - where candidates come from ([`RestaurantSource`])
//! - [`selector`] - filtering and uniform sampling ([`RestaurantSelector`])

pub mod geo;
pub mod selector;
pub mod source;

pub use geo::{EARTH_RADIUS_KM, GeoPoint, haversine_km};
pub use selector::{RestaurantSelector, SelectionError};
pub use source::{RestaurantSource, SqliteRestaurantSource};
