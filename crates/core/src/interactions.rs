//! Interaction Log
//!
//! Append-only record of user actions on the map. The log is capped at
//! [`MAX_LOG_LEN`] entries; the oldest entries are dropped first.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::normalize_country_name;
use crate::errors::DomainError;

/// Maximum number of interactions kept in memory
pub const MAX_LOG_LEN: usize = 1000;

/// Kind of tracked UI event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionAction {
    Hover,
    Click,
    Pin,
    Search,
    Rate,
}

impl InteractionAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionAction::Hover => "hover",
            InteractionAction::Click => "click",
            InteractionAction::Pin => "pin",
            InteractionAction::Search => "search",
            InteractionAction::Rate => "rate",
        }
    }
}

impl fmt::Display for InteractionAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InteractionAction {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "hover" => Ok(Self::Hover),
            "click" => Ok(Self::Click),
            "pin" => Ok(Self::Pin),
            "search" => Ok(Self::Search),
            "rate" => Ok(Self::Rate),
            _ => Err(DomainError::invalid_value("action", value, "hover|click|pin|search|rate")),
        }
    }
}

/// Tooltip panel the user was looking at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataTypeViewed {
    Population,
    News,
    Travel,
    Facts,
}

impl FromStr for DataTypeViewed {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "population" => Ok(Self::Population),
            "news" => Ok(Self::News),
            "travel" => Ok(Self::Travel),
            "facts" => Ok(Self::Facts),
            _ => Err(DomainError::invalid_value(
                "data_type_viewed",
                value,
                "population|news|travel|facts",
            )),
        }
    }
}

/// Validate an explicit star rating
pub fn validate_rating(rating: u8) -> Result<u8, DomainError> {
    if (1..=5).contains(&rating) {
        Ok(rating)
    } else {
        Err(DomainError::RatingOutOfRange(rating))
    }
}

/// One tracked user action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    /// Canonical country name (see [`normalize_country_name`])
    pub country_name: String,
    pub action: InteractionAction,
    /// Set by the log when recorded
    pub timestamp: DateTime<Utc>,
    /// Time spent viewing, in milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_ms: Option<u64>,
    /// Explicit feedback (1 - 5)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type_viewed: Option<DataTypeViewed>,
}

impl Interaction {
    /// Create a new interaction; the country name is normalized on the way in
    pub fn new(country_name: impl AsRef<str>, action: InteractionAction) -> Self {
        Self {
            country_name: normalize_country_name(country_name.as_ref()),
            action,
            timestamp: Utc::now(),
            duration_ms: None,
            rating: None,
            data_type_viewed: None,
        }
    }

    pub fn hover(country_name: impl AsRef<str>) -> Self {
        Self::new(country_name, InteractionAction::Hover)
    }

    pub fn click(country_name: impl AsRef<str>) -> Self {
        Self::new(country_name, InteractionAction::Click)
    }

    pub fn pin(country_name: impl AsRef<str>) -> Self {
        Self::new(country_name, InteractionAction::Pin)
    }

    pub fn search(country_name: impl AsRef<str>) -> Self {
        Self::new(country_name, InteractionAction::Search)
    }

    /// A star-rating interaction
    pub fn rate(country_name: impl AsRef<str>, rating: u8) -> Result<Self, DomainError> {
        Self::new(country_name, InteractionAction::Rate).with_rating(rating)
    }

    /// Attach an explicit rating
    pub fn with_rating(mut self, rating: u8) -> Result<Self, DomainError> {
        self.rating = Some(validate_rating(rating)?);
        Ok(self)
    }

    /// Attach a viewing duration
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration_ms = Some(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX));
        self
    }

    pub fn with_data_type(mut self, data_type: DataTypeViewed) -> Self {
        self.data_type_viewed = Some(data_type);
        self
    }

    /// Override the timestamp
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// Capped, ordered interaction history
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InteractionLog {
    entries: VecDeque<Interaction>,
}

impl InteractionLog {
    pub fn new() -> Self {
        Self { entries: VecDeque::new() }
    }

    /// Build a log from stored entries, keeping only the most recent [`MAX_LOG_LEN`]
    pub fn from_entries(entries: Vec<Interaction>) -> Self {
        let mut log = Self { entries: entries.into() };
        log.trim();
        log
    }

    /// Append one interaction and drop the oldest entries beyond the cap
    pub fn push(&mut self, interaction: Interaction) {
        self.entries.push_back(interaction);
        self.trim();
    }

    fn trim(&mut self) {
        while self.entries.len() > MAX_LOG_LEN {
            self.entries.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, oldest first
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Interaction> + ExactSizeIterator {
        self.entries.iter()
    }

    /// The last `count` entries, oldest first
    pub fn recent(&self, count: usize) -> impl DoubleEndedIterator<Item = &Interaction> {
        let start = self.entries.len().saturating_sub(count);
        self.entries.range(start..)
    }

    /// Entries for one canonical country name, oldest first
    pub fn for_country<'a>(&'a self, country_name: &'a str) -> impl Iterator<Item = &'a Interaction> {
        self.entries.iter().filter(move |interaction| interaction.country_name == country_name)
    }

    /// Distinct country names in first-seen order
    pub fn distinct_countries(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.entries
            .iter()
            .map(|interaction| interaction.country_name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_is_capped_at_most_recent_entries() {
        let mut log = InteractionLog::new();
        for index in 0..1_250u64 {
            log.push(Interaction::hover("Japan").with_duration(Duration::from_millis(index)));
        }

        assert_eq!(log.len(), MAX_LOG_LEN);
        let durations: Vec<_> = log.iter().filter_map(|i| i.duration_ms).collect();
        let expected: Vec<_> = (250..1_250u64).collect();
        assert_eq!(durations, expected);
    }

    #[test]
    fn recent_returns_tail_in_order() {
        let mut log = InteractionLog::new();
        for name in ["Japan", "China", "India", "Egypt"] {
            log.push(Interaction::click(name));
        }

        let tail: Vec<_> = log.recent(2).map(|i| i.country_name.as_str()).collect();
        assert_eq!(tail, vec!["India", "Egypt"]);
        assert_eq!(log.recent(10).count(), 4);
    }

    #[test]
    fn rating_is_validated_at_construction() {
        assert!(Interaction::rate("Japan", 5).is_ok());
        assert_eq!(Interaction::rate("Japan", 0), Err(DomainError::RatingOutOfRange(0)));
        assert_eq!(Interaction::rate("Japan", 6), Err(DomainError::RatingOutOfRange(6)));
    }

    #[test]
    fn country_names_are_normalized() {
        let interaction = Interaction::pin("United States of America");
        assert_eq!(interaction.country_name, "United States");
    }

    #[test]
    fn distinct_countries_keep_first_seen_order() {
        let mut log = InteractionLog::new();
        for name in ["Japan", "China", "Japan", "India", "China"] {
            log.push(Interaction::hover(name));
        }

        assert_eq!(log.distinct_countries(), vec!["Japan", "China", "India"]);
    }

    #[test]
    fn action_parsing_rejects_unknown_values() {
        assert_eq!("PIN".parse::<InteractionAction>(), Ok(InteractionAction::Pin));
        assert!("wave".parse::<InteractionAction>().is_err());
    }
}
