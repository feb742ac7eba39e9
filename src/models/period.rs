//! Time periods and dock settings.

use serde::{Deserialize, Serialize};

/// A period of the day with its own travel speed (`tinic`, `tfin`, `v`).
///
/// Travel times in [`PeriodMatrix`](crate::distance::PeriodMatrix) are keyed
/// by period id.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Period {
    id: usize,
    start: f64,
    end: f64,
    speed: f64,
}

impl Period {
    pub fn new(id: usize, start: f64, end: f64, speed: f64) -> Self {
        Self {
            id,
            start,
            end,
            speed,
        }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Returns `true` if `time` falls in `[start, end)`.
    pub fn contains(&self, time: f64) -> bool {
        time >= self.start && time < self.end
    }
}

/// Loading-dock parameters used by the dock scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DockSettings {
    /// Number of loading docks (`nmuelles`).
    pub docks: usize,
    /// Length of one departure slot in hours (`durH`).
    pub slot_hours: f64,
    /// Slots a truck occupies while loading (`Lc`).
    pub loading_slots: usize,
    /// Loading time in hours (`tcarga`).
    pub loading_time: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_contains_is_half_open() {
        let p = Period::new(1, 6.0, 9.0, 40.0);
        assert!(p.contains(6.0));
        assert!(p.contains(8.99));
        assert!(!p.contains(9.0));
        assert_eq!(p.speed(), 40.0);
    }
}
