use std::collections::BTreeMap;

use crate::models::{QualifiedUser, Recommendation};

/// Renders one recommendation message per qualified user
///
/// Output is keyed by user_id; content is fully determined by the user
/// name and the target list, so repeat runs over the same inputs produce
/// byte-identical messages. Should the input ever carry the same user_id
/// twice (the qualifier guarantees it does not), the later entry
/// overwrites the earlier one.
pub fn generate(qualified: &[QualifiedUser], targets: &[String]) -> BTreeMap<u64, Recommendation> {
    let listing = artist_listing(targets);

    qualified
        .iter()
        .map(|user| {
            let message = format!(
                "Hi {}! We noticed you have an amazing taste in music and listen to \
                 a lot of {}. With you in mind, we put together an exclusive playlist \
                 bringing together the best of these artists. We hope you enjoy it \
                 and discover new sounds!",
                user.user_name, listing
            );
            (
                user.user_id,
                Recommendation {
                    user_name: user.user_name.clone(),
                    message,
                },
            )
        })
        .collect()
}

/// Joins artist names into natural-language phrasing
///
/// One artist is used bare, two are joined with "and", three or more get
/// commas between all but the last pair (no Oxford comma).
fn artist_listing(targets: &[String]) -> String {
    match targets {
        [] => String::new(),
        [only] => only.clone(),
        [head @ .., last] => format!("{} and {}", head.join(", "), last),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(user_id: u64, user_name: &str) -> QualifiedUser {
        QualifiedUser {
            user_id,
            user_name: user_name.to_string(),
        }
    }

    fn targets(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_listing_single_artist() {
        assert_eq!(artist_listing(&targets(&["Queen"])), "Queen");
    }

    #[test]
    fn test_listing_two_artists() {
        assert_eq!(
            artist_listing(&targets(&["Queen", "Adele"])),
            "Queen and Adele"
        );
    }

    #[test]
    fn test_listing_three_artists() {
        assert_eq!(
            artist_listing(&targets(&["The Beatles", "Queen", "Michael Jackson"])),
            "The Beatles, Queen and Michael Jackson"
        );
    }

    #[test]
    fn test_listing_four_artists() {
        assert_eq!(
            artist_listing(&targets(&["A", "B", "C", "D"])),
            "A, B, C and D"
        );
    }

    #[test]
    fn test_one_message_per_qualified_user() {
        let qualified = vec![user(1, "Ana"), user(2, "Bruno"), user(3, "Carla")];

        let messages = generate(&qualified, &targets(&["Queen"]));
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[&1].user_name, "Ana");
        assert_eq!(messages[&2].user_name, "Bruno");
        assert_eq!(messages[&3].user_name, "Carla");
    }

    #[test]
    fn test_message_interpolates_name_and_listing() {
        let qualified = vec![user(1, "Ana")];

        let messages = generate(&qualified, &targets(&["The Beatles", "Queen"]));
        let message = &messages[&1].message;
        assert!(message.contains("Hi Ana!"));
        assert!(message.contains("The Beatles and Queen"));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let qualified = vec![user(1, "Ana"), user(2, "Bruno")];
        let target_list = targets(&["The Beatles", "Queen", "Michael Jackson"]);

        let first = generate(&qualified, &target_list);
        let second = generate(&qualified, &target_list);
        assert_eq!(first, second);
    }

    #[test]
    fn test_duplicate_user_id_keeps_later_entry() {
        // Defined but discouraged: the qualifier never emits duplicates.
        let qualified = vec![user(1, "Ana"), user(1, "Ana Silva")];

        let messages = generate(&qualified, &targets(&["Queen"]));
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[&1].user_name, "Ana Silva");
    }

    #[test]
    fn test_empty_qualified_set_yields_empty_map() {
        let messages = generate(&[], &targets(&["Queen"]));
        assert!(messages.is_empty());
    }
}
