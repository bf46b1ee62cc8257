/// Selfie record model
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Title given to records created without one
pub const DEFAULT_TITLE: &str = "New Selfie!";

/// A selfie record: the metadata half of a logical selfie.
///
/// The image payload is a sibling resource addressed by the same `id` and is
/// never embedded in the serialized record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Selfie {
    /// When the selfie was created; immutable
    pub created: DateTime<Utc>,

    /// Unique ID, used to link this selfie to its image on disk; immutable
    pub id: Uuid,

    /// Human-readable name; mutable
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

impl Selfie {
    /// Create a new record with a fresh UUID and the current time
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            created: Utc::now(),
            id: Uuid::new_v4(),
            title: title.into(),
        }
    }

    /// Create a new record with the placeholder title
    pub fn untitled() -> Self {
        Self::new(DEFAULT_TITLE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_selfie_has_unique_id() {
        let a = Selfie::new("one");
        let b = Selfie::new("two");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_json_round_trip() {
        let selfie = Selfie::new("Round trip");
        let json = serde_json::to_string(&selfie).unwrap();
        let decoded: Selfie = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, selfie);
    }

    #[test]
    fn test_missing_title_defaults_to_placeholder() {
        let json = format!(
            r#"{{"created":"2019-01-13T12:00:00Z","id":"{}"}}"#,
            Uuid::new_v4()
        );
        let decoded: Selfie = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded.title, DEFAULT_TITLE);
    }
}
