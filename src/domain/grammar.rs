//! Korean particle selection and hashtag cleanup.

const HANGUL_FIRST: u32 = 0xAC00;
const HANGUL_LAST: u32 = 0xD7A3;
const FINAL_CONSONANT_SLOTS: u32 = 28;

/// Place label that takes the bare locative particle.
pub const IN_TRANSIT_LABEL: &str = "이동중";

/// True when `word` ends in a Hangul syllable with a final consonant (받침).
pub fn has_final_consonant(word: &str) -> bool {
    word.chars().next_back().is_some_and(|c| {
        let code = u32::from(c);
        (HANGUL_FIRST..=HANGUL_LAST).contains(&code)
            && (code - HANGUL_FIRST) % FINAL_CONSONANT_SLOTS != 0
    })
}

/// Object particle for `word`: 을 after a final consonant, 를 otherwise.
pub fn obj_particle(word: &str) -> &'static str {
    if has_final_consonant(word) { "을" } else { "를" }
}

/// Locative particle for a place label.
pub fn loc_particle(place_label: &str) -> &'static str {
    if place_label == IN_TRANSIT_LABEL {
        "에"
    } else {
        "에서"
    }
}

/// Normalise a raw hashtag: leading `#` marks and all whitespace are removed.
///
/// Returns `None` when nothing usable remains.
pub fn clean_hashtag(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('#')
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    (!cleaned.is_empty()).then_some(cleaned)
}
