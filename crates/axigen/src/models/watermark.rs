//! Polling watermark for time-based deduplication

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Last-seen marker of a polling trigger instance
///
/// Persisted in the trigger's key/value store. Only the polling helper
/// creates or advances it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Watermark {
    /// Newest item timestamp seen so far (epoch milliseconds)
    pub last_epoch_millis: i64,
    /// When the watermark was last written
    pub updated_at: DateTime<Utc>,
}

impl Watermark {
    pub fn new(last_epoch_millis: i64) -> Self {
        Self {
            last_epoch_millis,
            updated_at: Utc::now(),
        }
    }

    /// Watermark positioned at the current time
    pub fn now() -> Self {
        let now = Utc::now();
        Self {
            last_epoch_millis: now.timestamp_millis(),
            updated_at: now,
        }
    }

    /// Advance to the newest of the current mark and the given timestamps
    ///
    /// Never moves backwards.
    pub fn advanced<I>(mut self, timestamps: I) -> Self
    where
        I: IntoIterator<Item = i64>,
    {
        self.last_epoch_millis = timestamps
            .into_iter()
            .fold(self.last_epoch_millis, i64::max);
        self.updated_at = Utc::now();
        self
    }

    /// Whether an item with this timestamp has not been seen yet
    pub fn is_newer(&self, epoch_millis: i64) -> bool {
        epoch_millis > self.last_epoch_millis
    }
}

impl Default for Watermark {
    fn default() -> Self {
        Self::new(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advanced_takes_max() {
        let mark = Watermark::new(100).advanced([50, 300, 200]);
        assert_eq!(mark.last_epoch_millis, 300);
    }

    #[test]
    fn test_advanced_never_goes_back() {
        let mark = Watermark::new(500).advanced([100, 200]);
        assert_eq!(mark.last_epoch_millis, 500);

        let mark = Watermark::new(500).advanced(Vec::new());
        assert_eq!(mark.last_epoch_millis, 500);
    }

    #[test]
    fn test_is_newer_is_strict() {
        let mark = Watermark::new(1000);
        assert!(!mark.is_newer(999));
        assert!(!mark.is_newer(1000));
        assert!(mark.is_newer(1001));
    }

    #[test]
    fn test_serialization() {
        let mark = Watermark::new(1744407421000);
        let json = serde_json::to_value(&mark).unwrap();
        assert_eq!(json["lastEpochMillis"], 1744407421000i64);
        let back: Watermark = serde_json::from_value(json).unwrap();
        assert_eq!(back, mark);
    }
}
