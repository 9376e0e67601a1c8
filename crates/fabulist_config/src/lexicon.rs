//! Curated word tables behind exclusion, personalization, and safety checks.
//!
//! Matching is keyword and stem based. These tables are the tuning surface
//! for figurative leakage: when a fear slips through as a metaphor, add the
//! metaphor to `exclusion_synonyms`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Word tables used by the validators and the prompt assembler.
///
/// Table keys are looked up by stem, so `spiders` and `spider` share an
/// entry. Keys must be single lowercase words.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LexiconConfig {
    /// Exclusion word to extra words and phrases it also blocks
    pub exclusion_synonyms: BTreeMap<String, Vec<String>>,
    /// Exclusion word to the category name used when telling the generator to avoid it
    pub exclusion_categories: BTreeMap<String, String>,
    /// Interest word to the plot vocabulary that shows it in action
    pub interest_keywords: BTreeMap<String, Vec<String>>,
    /// Denylist category to forbidden words and phrases
    pub denylist: BTreeMap<String, Vec<String>>,
    /// Words that describe an antagonist
    pub antagonist_terms: Vec<String>,
    /// Words that show an antagonist is misunderstood or needs help
    pub antagonist_qualifiers: Vec<String>,
    /// Words skipped when splitting a multi-word exclusion into tokens
    pub ignored_modifiers: Vec<String>,
}

fn table(entries: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
    entries
        .iter()
        .map(|(key, words)| {
            (
                key.to_string(),
                words.iter().map(|word| word.to_string()).collect(),
            )
        })
        .collect()
}

fn words(list: &[&str]) -> Vec<String> {
    list.iter().map(|word| word.to_string()).collect()
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            exclusion_synonyms: table(&[
                ("spiders", &["eight-legged", "web-spinner", "cobweb", "spiderweb", "tarantula", "arachnid"]),
                ("thunder", &["thunderclap", "thunderstorm", "storm", "lightning", "rumble", "boom"]),
                ("dark", &["darkness", "pitch-black", "shadows", "lights out", "gloom", "moonless"]),
                ("alone", &["lonely", "by himself", "by herself", "by themselves", "on his own", "on her own", "left behind"]),
                ("dogs", &["puppy", "hound", "barking", "growl"]),
                ("bees", &["wasp", "hornet", "stinger", "buzzing"]),
                ("heights", &["high up", "cliff", "tall ladder", "falling"]),
                ("monsters", &["creature", "beast", "under the bed"]),
                ("clowns", &["jester", "face paint"]),
                ("fire", &["flames", "burning", "smoke", "blaze"]),
                ("doctors", &["shots", "needle", "injection"]),
                ("snakes", &["serpent", "slithering", "hissing"]),
                ("ghosts", &["spirit", "haunted", "spooky"]),
                ("noise", &["loud", "bang", "crash"]),
            ]),
            exclusion_categories: [
                ("spiders", "creepy-crawly critters"),
                ("thunder", "stormy weather and sudden loud noises"),
                ("dark", "unlit places and nighttime settings"),
                ("alone", "being separated from grown-ups or friends"),
                ("dogs", "barking animals"),
                ("bees", "stinging insects"),
                ("heights", "high places and falling"),
                ("monsters", "frightening creatures"),
                ("clowns", "circus performers in face paint"),
                ("fire", "fiery scenes"),
                ("doctors", "medical visits"),
                ("snakes", "slithery reptiles"),
                ("ghosts", "the supernatural"),
                ("noise", "sudden loud sounds"),
            ]
            .into_iter()
            .map(|(key, category)| (key.to_string(), category.to_string()))
            .collect(),
            interest_keywords: table(&[
                ("dinosaurs", &["dino", "t-rex", "tyrannosaurus", "triceratops", "stegosaurus", "brachiosaurus", "raptor", "fossil"]),
                ("trucks", &["dump truck", "digger", "bulldozer", "excavator", "tractor", "crane", "wheels"]),
                ("building", &["build", "tower", "blocks", "bridge", "hammer", "fort"]),
                ("mud", &["puddle", "muddy", "squelch"]),
                ("space", &["rocket", "planet", "star", "moon", "astronaut", "comet"]),
                ("ocean", &["sea", "whale", "dolphin", "wave", "boat", "shell"]),
                ("animals", &["animal", "kitten", "bunny", "pony", "zoo"]),
                ("cats", &["kitten", "kitty", "purr", "whiskers"]),
                ("princesses", &["princess", "castle", "crown"]),
                ("dragons", &["wing", "scales"]),
                ("music", &["song", "sing", "drum", "piano", "guitar", "melody"]),
                ("soccer", &["ball", "goal", "kick"]),
                ("art", &["paint", "draw", "crayon", "picture"]),
                ("robots", &["gear", "circuit", "beep"]),
                ("unicorns", &["rainbow", "horn", "sparkle"]),
                ("cooking", &["cook", "bake", "kitchen", "recipe", "cake", "cookie"]),
                ("bugs", &["beetle", "ladybug", "butterfly", "caterpillar"]),
                ("trains", &["track", "engine", "station", "whistle"]),
            ]),
            denylist: table(&[
                ("violence", &["kill", "murder", "blood", "weapon", "gun", "knife", "sword", "stab", "punch", "fight", "war", "bomb", "attack", "dead", "death"]),
                ("brands", &["lego", "disney", "barbie", "pokemon", "pokémon", "nintendo", "minecraft", "marvel", "mcdonald", "coca-cola", "nike", "paw patrol", "peppa pig", "hot wheels", "play-doh", "star wars", "batman"]),
                ("scary", &["villain", "evil", "monster", "zombie", "demon", "ghost", "skeleton", "witch", "vampire", "nightmare", "terrifying", "scream", "creepy"]),
            ]),
            antagonist_terms: words(&["troll", "goblin", "ogre", "bully", "grump", "grumpy", "pirate", "rival", "trickster", "meanie"]),
            antagonist_qualifiers: words(&["misunderstood", "needs help", "just wanted", "only wanted", "confused", "lost", "didn't mean", "wanted a friend"]),
            ignored_modifiers: words(&[
                "a", "an", "the", "of", "in", "on", "at", "to", "and", "or", "with", "my", "being",
                "getting", "going", "very", "too", "really", "loud", "big", "large", "scary",
                "little", "small",
            ]),
        }
    }
}

impl LexiconConfig {
    /// Fill in every default table entry the user did not set.
    ///
    /// Map entries the user provided win; lists the user left empty take the
    /// default list.
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        for (key, value) in defaults.exclusion_synonyms {
            self.exclusion_synonyms.entry(key).or_insert(value);
        }
        for (key, value) in defaults.exclusion_categories {
            self.exclusion_categories.entry(key).or_insert(value);
        }
        for (key, value) in defaults.interest_keywords {
            self.interest_keywords.entry(key).or_insert(value);
        }
        for (key, value) in defaults.denylist {
            self.denylist.entry(key).or_insert(value);
        }
        if self.antagonist_terms.is_empty() {
            self.antagonist_terms = defaults.antagonist_terms;
        }
        if self.antagonist_qualifiers.is_empty() {
            self.antagonist_qualifiers = defaults.antagonist_qualifiers;
        }
        if self.ignored_modifiers.is_empty() {
            self.ignored_modifiers = defaults.ignored_modifiers;
        }
        self
    }
}
