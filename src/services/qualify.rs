use crate::models::{QualifiedUser, UserArtistProfile};

/// Selects the users whose profile meets the threshold for EVERY target
///
/// This is a logical AND across all target dimensions: a user matching
/// some but not all target artists never qualifies. The comparison is
/// inclusive (`>=`), so a count exactly at the threshold passes.
///
/// An empty target set qualifies nobody. Qualifying everyone vacuously
/// would turn a configuration mistake into a mass write downstream.
///
/// Pure function; output order follows profile order.
pub fn qualify(
    profiles: &[UserArtistProfile],
    targets: &[String],
    threshold: u64,
) -> Vec<QualifiedUser> {
    if targets.is_empty() {
        return Vec::new();
    }

    profiles
        .iter()
        .filter(|profile| {
            targets
                .iter()
                .all(|artist| profile.plays.get(artist).copied().unwrap_or(0) >= threshold)
        })
        .map(|profile| QualifiedUser {
            user_id: profile.user_id,
            user_name: profile.user_name.clone(),
        })
        .collect()
}
