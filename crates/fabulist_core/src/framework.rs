//! The seven narrative archetypes a story can follow.

use serde::{Deserialize, Serialize};

/// Narrative framework of a story.
///
/// Declaration order is the fixed priority order used to break ties during
/// framework selection.
///
/// # Examples
///
/// ```
/// use fabulist_core::Framework;
///
/// let framework: Framework = "friendship_quest".parse().unwrap();
/// assert_eq!(framework, Framework::FriendshipQuest);
/// assert_eq!(framework.to_string(), "friendship_quest");
/// assert_eq!(Framework::ALL[0], Framework::RescueMission);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Framework {
    /// Someone or something needs saving
    RescueMission,
    /// Discovering a new place
    Exploration,
    /// Following clues to solve a puzzle
    Mystery,
    /// Making something that did not exist before
    Builder,
    /// Finding, helping, or making up with a friend
    FriendshipQuest,
    /// Practicing until a hard thing becomes possible
    Challenge,
    /// Becoming something new for a while
    Transformation,
}

impl Framework {
    /// Every framework in priority order.
    pub const ALL: [Framework; 7] = [
        Framework::RescueMission,
        Framework::Exploration,
        Framework::Mystery,
        Framework::Builder,
        Framework::FriendshipQuest,
        Framework::Challenge,
        Framework::Transformation,
    ];

    /// Interest tags this framework pairs well with.
    pub fn affinity_tags(&self) -> &'static [&'static str] {
        match self {
            Framework::RescueMission => &[
                "animals", "pets", "puppies", "kittens", "vets", "firefighters", "helping",
                "rescue", "whales", "penguins", "horses", "farms",
            ],
            Framework::Exploration => &[
                "space", "planets", "rockets", "oceans", "jungles", "maps", "travel", "nature",
                "bugs", "camping", "trains", "boats", "volcanoes",
            ],
            Framework::Mystery => &[
                "puzzles", "detectives", "secrets", "clues", "riddles", "books", "codes",
                "treasure", "magnifying", "hide", "seek",
            ],
            Framework::Builder => &[
                "building", "blocks", "construction", "trucks", "diggers", "robots", "machines",
                "tools", "mud", "inventing", "crafts", "drawing", "art", "cooking", "baking",
            ],
            Framework::FriendshipQuest => &[
                "friends", "dolls", "cats", "dogs", "unicorns", "family", "playing", "teddy",
                "sharing", "school", "music", "singing",
            ],
            Framework::Challenge => &[
                "sports", "soccer", "football", "racing", "cars", "games", "swimming", "running",
                "dancing", "climbing", "bikes", "gymnastics",
            ],
            Framework::Transformation => &[
                "dinosaurs", "dragons", "butterflies", "magic", "costumes", "superheroes",
                "fairies", "princesses", "mermaids", "wizards", "caterpillars",
            ],
        }
    }

    /// Shape of the story, as described to the generator.
    pub fn blurb(&self) -> &'static str {
        match self {
            Framework::RescueMission => {
                "A rescue mission: someone small is stuck or lost, and the hero gathers helpers, solves a gentle problem, and brings them home safe."
            }
            Framework::Exploration => {
                "An exploration: the hero sets out to a wondrous place, notices small marvels along the way, and returns home with a discovery to share."
            }
            Framework::Mystery => {
                "A gentle mystery: something puzzling has happened, the hero follows friendly clues, and the answer turns out to be warm and surprising."
            }
            Framework::Builder => {
                "A builder story: the hero has an idea, gathers materials and friends, tries, adjusts after a wobble, and proudly finishes something new."
            }
            Framework::FriendshipQuest => {
                "A friendship quest: the hero meets someone who needs a friend, learns what they need, and finds a way to help them belong."
            }
            Framework::Challenge => {
                "A challenge: the hero faces something hard, practices with encouragement, and succeeds through effort rather than magic."
            }
            Framework::Transformation => {
                "A transformation: the hero becomes something new for a day, learns what it is like, and comes home understanding their own world better."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn all_matches_declaration_order() {
        let iterated: Vec<Framework> = Framework::iter().collect();
        assert_eq!(iterated, Framework::ALL.to_vec());
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&Framework::RescueMission).unwrap();
        assert_eq!(json, "\"rescue_mission\"");
    }

    #[test]
    fn unknown_name_fails_to_parse() {
        assert!("heist".parse::<Framework>().is_err());
    }
}
