//! Daily-trigger preferences and fire-time computation
//!
//! The trigger's wall-clock fire time and the lookback label it supplies
//! live in a small YAML file next to the store, not in the store itself.
//! A missing or unreadable file yields the defaults (12:00, one day), which
//! is also the first-launch behavior. Re-reading the file on every tick is
//! what makes the schedule survive host restarts: anything that re-invokes
//! the watcher picks the persisted time straight back up.

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::home::Home;
use crate::core::lookback::Lookback;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("invalid fire time '{0}', expected HH:MM (24-hour)")]
    InvalidFireTime(String),

    #[error("could not save preferences: {0}")]
    Save(String),
}

/// Persisted trigger preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Prefs {
    /// Hour of day the trigger fires (0-23).
    pub hour: u32,
    /// Minute the trigger fires (0-59).
    pub minute: u32,
    /// Lookback label supplied to the evaluator on each fire.
    pub lookback: Lookback,
}

impl Default for Prefs {
    fn default() -> Self {
        Self {
            hour: 12,
            minute: 0,
            lookback: Lookback::OneDay,
        }
    }
}

impl Prefs {
    /// Load preferences, falling back to defaults when the file is missing
    /// or unreadable.
    pub fn load(home: &Home) -> Self {
        let prefs = std::fs::read_to_string(home.prefs_path())
            .ok()
            .and_then(|contents| serde_yml::from_str::<Prefs>(&contents).ok())
            .unwrap_or_default();
        prefs.sanitized()
    }

    /// Persist preferences to the household's preference file.
    pub fn save(&self, home: &Home) -> Result<(), ScheduleError> {
        let yaml =
            serde_yml::to_string(self).map_err(|e| ScheduleError::Save(e.to_string()))?;
        std::fs::write(home.prefs_path(), yaml).map_err(|e| ScheduleError::Save(e.to_string()))
    }

    /// Clamp out-of-range values from a hand-edited file back to defaults.
    fn sanitized(mut self) -> Self {
        if self.hour > 23 || self.minute > 59 {
            let defaults = Prefs::default();
            self.hour = defaults.hour;
            self.minute = defaults.minute;
        }
        self
    }

    /// Parse an `HH:MM` string into an (hour, minute) pair.
    pub fn parse_fire_time(s: &str) -> Result<(u32, u32), ScheduleError> {
        let invalid = || ScheduleError::InvalidFireTime(s.to_string());

        let (h, m) = s.split_once(':').ok_or_else(invalid)?;
        let hour: u32 = h.parse().map_err(|_| invalid())?;
        let minute: u32 = m.parse().map_err(|_| invalid())?;
        if hour > 23 || minute > 59 {
            return Err(invalid());
        }
        Ok((hour, minute))
    }

    /// The configured fire time as `HH:MM`.
    pub fn fire_time_label(&self) -> String {
        format!("{:02}:{:02}", self.hour, self.minute)
    }

    /// The next moment the trigger should fire: today at the configured
    /// time, or the same time tomorrow if that has already passed.
    pub fn next_fire(&self, now: NaiveDateTime) -> NaiveDateTime {
        let today_fire = now
            .date()
            .and_hms_opt(self.hour, self.minute, 0)
            .unwrap_or_else(|| now.with_second(0).unwrap_or(now));

        if today_fire > now {
            today_fire
        } else {
            today_fire + chrono::Duration::days(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_defaults_to_noon() {
        let prefs = Prefs::default();
        assert_eq!(prefs.fire_time_label(), "12:00");
        assert_eq!(prefs.lookback, Lookback::OneDay);
    }

    #[test]
    fn test_parse_fire_time() {
        assert_eq!(Prefs::parse_fire_time("07:30").unwrap(), (7, 30));
        assert_eq!(Prefs::parse_fire_time("23:59").unwrap(), (23, 59));
        assert!(Prefs::parse_fire_time("24:00").is_err());
        assert!(Prefs::parse_fire_time("12:60").is_err());
        assert!(Prefs::parse_fire_time("noon").is_err());
        assert!(Prefs::parse_fire_time("12").is_err());
    }

    #[test]
    fn test_next_fire_later_today() {
        let prefs = Prefs {
            hour: 12,
            minute: 0,
            ..Prefs::default()
        };
        let next = prefs.next_fire(at(8, 0));
        assert_eq!(next, at(12, 0));
    }

    #[test]
    fn test_next_fire_rolls_to_tomorrow() {
        let prefs = Prefs {
            hour: 12,
            minute: 0,
            ..Prefs::default()
        };
        let next = prefs.next_fire(at(12, 0));
        assert_eq!(
            next.date(),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
        assert_eq!(next.time(), at(12, 0).time());
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let home = Home::init(tmp.path()).unwrap();
        assert_eq!(Prefs::load(&home), Prefs::default());
    }

    #[test]
    fn test_save_load_roundtrip() {
        let tmp = tempfile::TempDir::new().unwrap();
        let home = Home::init(tmp.path()).unwrap();

        let prefs = Prefs {
            hour: 7,
            minute: 45,
            lookback: Lookback::TwoWeeks,
        };
        prefs.save(&home).unwrap();
        assert_eq!(Prefs::load(&home), prefs);
    }

    #[test]
    fn test_out_of_range_file_values_reset_to_default_time() {
        let tmp = tempfile::TempDir::new().unwrap();
        let home = Home::init(tmp.path()).unwrap();
        std::fs::write(home.prefs_path(), "hour: 99\nminute: 0\n").unwrap();

        let prefs = Prefs::load(&home);
        assert_eq!(prefs.hour, 12);
        assert_eq!(prefs.minute, 0);
    }
}
