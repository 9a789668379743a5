use std::collections::{HashMap, HashSet};

use crate::models::{ListeningRecord, UserArtistProfile};

/// Aggregates raw listening records into per-user target-artist profiles
///
/// Records for artists outside the target set are dropped up front; they
/// are irrelevant to qualification and must not leak into the profiles.
/// The remainder is grouped by (user_id, user_name, artist_name) with play
/// counts summed per group, then pivoted into one profile per user where
/// every target artist has an explicit entry (zero for artists the user
/// never listened to).
///
/// Profiles come back in first-seen order of the input records, which
/// keeps every downstream stage deterministic.
pub fn aggregate(records: &[ListeningRecord], targets: &[String]) -> Vec<UserArtistProfile> {
    if records.is_empty() {
        return Vec::new();
    }

    let target_set: HashSet<&str> = targets.iter().map(String::as_str).collect();

    let mut profiles: Vec<UserArtistProfile> = Vec::new();
    let mut index_by_user: HashMap<(u64, String), usize> = HashMap::new();

    for record in records {
        if !target_set.contains(record.artist_name.as_str()) {
            continue;
        }

        let key = (record.user_id, record.user_name.clone());
        let idx = *index_by_user.entry(key).or_insert_with(|| {
            profiles.push(UserArtistProfile {
                user_id: record.user_id,
                user_name: record.user_name.clone(),
                // Zero-fill every target dimension so missing artists
                // compare correctly against the threshold.
                plays: targets.iter().map(|a| (a.clone(), 0)).collect(),
            });
            profiles.len() - 1
        });

        if let Some(count) = profiles[idx].plays.get_mut(&record.artist_name) {
            *count += record.play_count;
        }
    }

    tracing::debug!(
        input_records = records.len(),
        profiles = profiles.len(),
        "Aggregation completed"
    );

    profiles
}
