//! Syllable and passive-voice heuristics.

use super::MetricsConfig;

const BE_VERBS: &[&str] = &["am", "is", "are", "was", "were", "be", "been", "being"];

const IRREGULAR_PARTICIPLES: &[&str] = &[
    "beaten", "begun", "bitten", "blown", "born", "borne", "bought", "broken", "brought", "built",
    "caught", "chosen", "done", "drawn", "driven", "drunk", "eaten", "fallen", "felt", "flown",
    "forgotten", "found", "frozen", "given", "gotten", "grown", "held", "hidden", "hit", "kept",
    "known", "led", "left", "lost", "made", "meant", "met", "paid", "put", "ridden", "risen",
    "said", "seen", "sent", "set", "shaken", "shown", "sold", "spent", "spoken", "stolen",
    "struck", "sung", "sunk", "sworn", "taken", "taught", "thought", "thrown", "told", "torn",
    "understood", "won", "worn", "woven", "written",
];

/// Counts syllables in a single word.
///
/// Syllables are maximal groups of the vowels `aeiouy`. When the silent-e
/// rule is on, a trailing `e` removes one syllable unless the word ends in a
/// consonant followed by `le` (`table`). Every word has at least one
/// syllable.
pub(crate) fn syllables(word: &str, config: &MetricsConfig) -> usize {
    let lower: Vec<char> = word.to_lowercase().chars().collect();
    let mut groups = 0_usize;
    let mut in_group = false;
    for ch in &lower {
        let vowel = is_vowel(*ch);
        if vowel && !in_group {
            groups += 1;
        }
        in_group = vowel;
    }
    if config.silent_e() && groups > 1 && ends_with_silent_e(&lower) {
        groups -= 1;
    }
    groups.max(1)
}

fn ends_with_silent_e(lower: &[char]) -> bool {
    match lower {
        [.., before, 'l', 'e'] if !is_vowel(*before) => false,
        [.., 'e'] => true,
        _ => false,
    }
}

const fn is_vowel(ch: char) -> bool {
    matches!(ch, 'a' | 'e' | 'i' | 'o' | 'u' | 'y')
}

/// Returns true when a sentence reads as passive: a form of *be* followed
/// within the configured window by a past participle.
pub(crate) fn is_passive(words: &[&str], config: &MetricsConfig) -> bool {
    let lower: Vec<String> = words.iter().map(|word| word.to_lowercase()).collect();
    lower.iter().enumerate().any(|(index, word)| {
        BE_VERBS.contains(&word.as_str())
            && lower
                .iter()
                .skip(index + 1)
                .take(config.passive_window())
                .any(|candidate| is_participle(candidate))
    })
}

fn is_participle(word: &str) -> bool {
    (word.ends_with("ed") && word.chars().count() > 3) || IRREGULAR_PARTICIPLES.contains(&word)
}
