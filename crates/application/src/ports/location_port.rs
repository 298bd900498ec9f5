//! User location port
//!
//! Latest-value access to the device position. Only the most recent fix
//! matters; providers keep no history.

use domain::value_objects::GeoLocation;
#[cfg(test)]
use mockall::automock;

/// Port for reading the user's current location
#[cfg_attr(test, automock)]
pub trait LocationPort: Send + Sync {
    /// Most recent known position, if any fix has arrived yet
    fn current_location(&self) -> Option<GeoLocation>;
}
