//! Lookback labels: how far ahead of expiration the reminder fires
//!
//! This is the single source of truth for the label -> {offset, phrase}
//! mapping. The evaluator, the settings commands, and the preference file
//! all resolve labels through this type; nothing else hardcodes an offset.

use chrono::{Duration, NaiveDate};
use clap::ValueEnum;
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};

use crate::core::dates::format_date;

/// User-selected notice period before an item expires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Lookback {
    #[default]
    OneDay,
    TwoDays,
    FiveDays,
    OneWeek,
    TwoWeeks,
}

impl Lookback {
    /// All labels, in spinner order.
    pub const ALL: [Lookback; 5] = [
        Lookback::OneDay,
        Lookback::TwoDays,
        Lookback::FiveDays,
        Lookback::OneWeek,
        Lookback::TwoWeeks,
    ];

    /// Resolve a stored label string. Unknown or empty labels fall back to
    /// the one-day default rather than failing.
    pub fn parse(label: &str) -> Self {
        match label {
            "Two Days" => Lookback::TwoDays,
            "Five Days" => Lookback::FiveDays,
            "One Week" => Lookback::OneWeek,
            "Two Weeks" => Lookback::TwoWeeks,
            _ => Lookback::OneDay,
        }
    }

    /// The label string as stored and shown in settings.
    pub fn label(self) -> &'static str {
        match self {
            Lookback::OneDay => "One Day",
            Lookback::TwoDays => "Two Days",
            Lookback::FiveDays => "Five Days",
            Lookback::OneWeek => "One Week",
            Lookback::TwoWeeks => "Two Weeks",
        }
    }

    /// Day offset added to "today" to get the reminder's target date.
    pub fn offset_days(self) -> i64 {
        match self {
            Lookback::OneDay => 1,
            Lookback::TwoDays => 2,
            Lookback::FiveDays => 5,
            Lookback::OneWeek => 7,
            Lookback::TwoWeeks => 14,
        }
    }

    /// Human phrase used in notification bodies.
    pub fn phrase(self) -> &'static str {
        match self {
            Lookback::OneDay => "one day",
            Lookback::TwoDays => "two days",
            Lookback::FiveDays => "five days",
            Lookback::OneWeek => "one week",
            Lookback::TwoWeeks => "two weeks",
        }
    }

    /// The date the evaluator queries for, formatted per the date contract.
    pub fn target_date(self, today: NaiveDate) -> String {
        format_date(today + Duration::days(self.offset_days()))
    }
}

impl std::fmt::Display for Lookback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// Persisted as the label string ("One Week"), not the variant name, so the
// preference file matches what the settings surface shows. Unknown labels
// in a hand-edited file degrade to the one-day default instead of erroring.
impl Serialize for Lookback {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Lookback {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct LabelVisitor;

        impl Visitor<'_> for LabelVisitor {
            type Value = Lookback;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a lookback label string")
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Lookback, E> {
                Ok(Lookback::parse(v))
            }
        }

        deserializer.deserialize_str(LabelVisitor)
    }
}
