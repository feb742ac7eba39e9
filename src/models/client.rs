//! Client and time window types.

use serde::{Deserialize, Serialize};

/// Delivery time window of a client, in hours of the day.
///
/// Service may start no earlier than `earliest` and no later than `latest`.
///
/// # Examples
///
/// ```
/// use dock_vrp::models::TimeWindow;
///
/// let tw = TimeWindow::new(8.0, 12.0).unwrap();
/// assert!(tw.contains(9.5));
/// assert!(!tw.contains(12.5));
/// assert_eq!(tw.width(), 4.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    earliest: f64,
    latest: f64,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// Returns `None` if `earliest > latest` or either value is non-finite.
    pub fn new(earliest: f64, latest: f64) -> Option<Self> {
        if !earliest.is_finite() || !latest.is_finite() || earliest > latest {
            return None;
        }
        Some(Self { earliest, latest })
    }

    /// Earliest service start (`MinDC`).
    pub fn earliest(&self) -> f64 {
        self.earliest
    }

    /// Latest service start (`MaxDC`).
    pub fn latest(&self) -> f64 {
        self.latest
    }

    /// Returns `true` if `time` falls within this window.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.earliest && time <= self.latest
    }

    /// Length of the window.
    pub fn width(&self) -> f64 {
        self.latest - self.earliest
    }
}

/// A client node. Id `0` is reserved for the depot and never names a client.
///
/// # Examples
///
/// ```
/// use dock_vrp::models::{Client, TimeWindow};
///
/// let tw = TimeWindow::new(8.0, 12.0).unwrap();
/// let c = Client::new(3, 6.0, 1.0, 0.25, tw).with_critical(true);
/// assert_eq!(c.id(), 3);
/// assert_eq!(c.delivery(), 6.0);
/// assert!(c.is_critical());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Client {
    id: usize,
    delivery: f64,
    pickup: f64,
    service_time: f64,
    time_window: TimeWindow,
    critical: bool,
}

impl Client {
    /// Creates a non-critical client.
    pub fn new(
        id: usize,
        delivery: f64,
        pickup: f64,
        service_time: f64,
        time_window: TimeWindow,
    ) -> Self {
        Self {
            id,
            delivery,
            pickup,
            service_time,
            time_window,
            critical: false,
        }
    }

    /// Marks the client as critical (`escritico`).
    pub fn with_critical(mut self, critical: bool) -> Self {
        self.critical = critical;
        self
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// Quantity delivered to the client (`DemE`).
    pub fn delivery(&self) -> f64 {
        self.delivery
    }

    /// Quantity picked up from the client (`DemR`).
    pub fn pickup(&self) -> f64 {
        self.pickup
    }

    /// Service duration at the client (`TS`).
    pub fn service_time(&self) -> f64 {
        self.service_time
    }

    pub fn time_window(&self) -> &TimeWindow {
        &self.time_window
    }

    pub fn is_critical(&self) -> bool {
        self.critical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_window_valid() {
        let tw = TimeWindow::new(8.0, 14.0).expect("valid");
        assert_eq!(tw.earliest(), 8.0);
        assert_eq!(tw.latest(), 14.0);
        assert_eq!(tw.width(), 6.0);
    }

    #[test]
    fn test_time_window_invalid() {
        assert!(TimeWindow::new(14.0, 8.0).is_none());
        assert!(TimeWindow::new(f64::NAN, 8.0).is_none());
        assert!(TimeWindow::new(8.0, f64::INFINITY).is_none());
    }

    #[test]
    fn test_time_window_degenerate() {
        let tw = TimeWindow::new(9.0, 9.0).expect("single instant");
        assert!(tw.contains(9.0));
        assert_eq!(tw.width(), 0.0);
    }

    #[test]
    fn test_time_window_contains() {
        let tw = TimeWindow::new(8.0, 12.0).expect("valid");
        assert!(tw.contains(8.0));
        assert!(tw.contains(12.0));
        assert!(!tw.contains(7.9));
        assert!(!tw.contains(12.1));
    }

    #[test]
    fn test_client_new() {
        let tw = TimeWindow::new(8.0, 12.0).expect("valid");
        let c = Client::new(1, 6.0, 2.0, 0.5, tw);
        assert_eq!(c.id(), 1);
        assert_eq!(c.delivery(), 6.0);
        assert_eq!(c.pickup(), 2.0);
        assert_eq!(c.service_time(), 0.5);
        assert_eq!(c.time_window(), &tw);
        assert!(!c.is_critical());
    }
}
