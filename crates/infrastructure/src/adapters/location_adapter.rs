//! Location adapter - Implements LocationPort over a watch channel
//!
//! A [`LocationPublisher`] pushes fixes from whatever produces them (a GPS
//! task, the CLI); [`WatchLocationProvider`] hands the latest one to the
//! orchestrator.

use application::ports::LocationPort;
use domain::value_objects::GeoLocation;
use tokio::sync::watch;
use tracing::debug;

/// Create a connected publisher and provider with no fix yet
#[must_use]
pub fn location_channel() -> (LocationPublisher, WatchLocationProvider) {
    let (sender, receiver) = watch::channel(None);
    (
        LocationPublisher { sender },
        WatchLocationProvider { receiver },
    )
}

/// Sending half: records location fixes
#[derive(Debug)]
pub struct LocationPublisher {
    sender: watch::Sender<Option<GeoLocation>>,
}

impl LocationPublisher {
    /// Record a new fix
    pub fn publish(&self, location: GeoLocation) {
        debug!(%location, "Location fix");
        self.sender.send_replace(Some(location));
    }
}

/// Receiving half: reports the latest fix
#[derive(Debug, Clone)]
pub struct WatchLocationProvider {
    receiver: watch::Receiver<Option<GeoLocation>>,
}

impl LocationPort for WatchLocationProvider {
    fn current_location(&self) -> Option<GeoLocation> {
        *self.receiver.borrow()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_without_fix() {
        let (_publisher, provider) = location_channel();
        assert!(provider.current_location().is_none());
    }

    #[test]
    fn reports_latest_fix() {
        let (publisher, provider) = location_channel();
        publisher.publish(GeoLocation::new_unchecked(45.49, -73.57));
        publisher.publish(GeoLocation::new_unchecked(45.50, -73.58));
        assert_eq!(
            provider.current_location(),
            Some(GeoLocation::new_unchecked(45.50, -73.58))
        );
    }

    #[test]
    fn cloned_providers_share_fixes() {
        let (publisher, provider) = location_channel();
        let second = provider.clone();
        publisher.publish(GeoLocation::college_lasalle());
        assert_eq!(provider.current_location(), second.current_location());
    }

    #[test]
    fn provider_outlives_publisher() {
        let (publisher, provider) = location_channel();
        publisher.publish(GeoLocation::college_lasalle());
        drop(publisher);
        assert_eq!(provider.current_location(), Some(GeoLocation::college_lasalle()));
    }
}
