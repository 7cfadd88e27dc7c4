//! Static phrase and synthesis parameter tables
//!
//! These lists are fixed at compile time; diversity comes from pairing them
//! with voices and speaking rates, not from runtime configuration.

/// Wake-word variants, weighted toward the canonical phrasing
pub const WAKE_PHRASES: &[&str] = &[
    "hey ferris",
    "hey ferris",
    "hey ferris",
    "ferris",
    "hey fairies", // common mishearing
    "hay ferris",
];

/// Phrases that should NOT trigger the wake word
pub const NEGATIVE_PHRASES: &[&str] = &[
    // Similar sounding
    "ferrous",
    "fairest",
    "hey harris",
    "hey terrace",
    "hey carrots",
    "ferry",
    "forest",
    "florist",
    "heiress",
    "furious",
    // Common household phrases
    "hey google",
    "hey siri",
    "alexa",
    "turn on the lights",
    "what's the weather",
    "play some music",
    "set a timer",
    "good morning",
    "good night",
    "dinner is ready",
    "come here",
    "hello",
    "excuse me",
    "thank you",
    "what time is it",
    "open the door",
    "close the door",
    // Random speech
    "the quick brown fox",
    "i need to go shopping",
    "what's for dinner",
    "have you seen my keys",
    "the dogs need walking",
    "three d printing",
    "home assistant",
    "raspberry pie",
];

/// Preferred synthesizer voices; intersected with what is installed
pub const PREFERRED_VOICES: &[&str] = &[
    "Alex",     // US Male
    "Daniel",   // UK Male
    "Fred",     // US Male
    "Karen",    // AU Female
    "Moira",    // IE Female
    "Oliver",   // UK Male
    "Samantha", // US Female
    "Tessa",    // ZA Female
    "Tom",      // US Male
    "Veena",    // IN Female
];

/// Speaking rates for positive samples (words per minute)
pub const RATES: &[u32] = &[140, 160, 180, 200, 220];

/// Speaking rates for negative samples
pub const NEGATIVE_RATES: &[u32] = &[160, 180, 200];

/// Cap on how many installed voices to use
pub const MAX_VOICES: usize = 10;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phrase_tables_are_non_empty() {
        assert!(!WAKE_PHRASES.is_empty());
        assert!(!NEGATIVE_PHRASES.is_empty());
        assert!(!PREFERRED_VOICES.is_empty());
        assert!(!RATES.is_empty());
        assert!(!NEGATIVE_RATES.is_empty());
    }

    #[test]
    fn no_negative_phrase_contains_the_wake_word() {
        for phrase in NEGATIVE_PHRASES {
            assert!(
                !phrase.contains("ferris"),
                "negative phrase {phrase:?} contains the wake word"
            );
        }
    }
}
