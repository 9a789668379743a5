use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single listening event as served by the data API
///
/// Multiple records may share the same (user_id, artist_name) pair; they
/// represent separate listening sessions and their play counts are summed
/// during aggregation, never overwritten.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListeningRecord {
    pub user_id: u64,
    pub user_name: String,
    pub artist_name: String,
    pub play_count: u64,
}

/// Per-user play counts over the target-artist dimensions
///
/// Built fresh on every pipeline run. Every target artist has an explicit
/// entry; artists the user never listened to carry a zero, so threshold
/// comparison behaves correctly for them.
///
/// A user_id appearing with inconsistent user_name values in the source
/// yields one profile per distinct (user_id, user_name) pair. The source
/// does not resolve that inconsistency, and silently merging would guess
/// at which name is right, so the pairs are kept as separate logical users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserArtistProfile {
    pub user_id: u64,
    pub user_name: String,
    pub plays: HashMap<String, u64>,
}

/// A user whose profile met the threshold for every target artist
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedUser {
    pub user_id: u64,
    pub user_name: String,
}

/// Final output entity, one per qualified user, never mutated after creation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub user_name: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listening_record_deserialization() {
        let json = r#"{
            "user_id": 101,
            "user_name": "Ana Silva",
            "artist_name": "Queen",
            "play_count": 120
        }"#;

        let record: ListeningRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.user_id, 101);
        assert_eq!(record.user_name, "Ana Silva");
        assert_eq!(record.artist_name, "Queen");
        assert_eq!(record.play_count, 120);
    }

    #[test]
    fn test_listening_record_rejects_negative_play_count() {
        let json = r#"{
            "user_id": 101,
            "user_name": "Ana Silva",
            "artist_name": "Queen",
            "play_count": -3
        }"#;

        assert!(serde_json::from_str::<ListeningRecord>(json).is_err());
    }

    #[test]
    fn test_recommendation_serialization_preserves_non_ascii() {
        let recommendation = Recommendation {
            user_name: "Heloísa Neves".to_string(),
            message: "Olá!".to_string(),
        };

        let json = serde_json::to_string(&recommendation).unwrap();
        assert!(json.contains("Heloísa Neves"));
        assert!(json.contains("Olá!"));
        assert!(!json.contains("\\u"));
    }
}
