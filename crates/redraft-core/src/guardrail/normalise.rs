//! Text normalisation that undoes common cue obfuscation.

/// Characters that render as nothing but split words apart.
pub(crate) const INVISIBLE: &[char] = &[
    '\u{00AD}', '\u{034F}', '\u{061C}', '\u{180E}', '\u{200B}', '\u{200C}', '\u{200D}', '\u{200E}',
    '\u{200F}', '\u{2060}', '\u{2061}', '\u{2062}', '\u{2063}', '\u{2064}', '\u{FEFF}',
];

/// Returns true for zero-width and other invisible formatting characters.
pub(crate) fn is_invisible(ch: char) -> bool {
    INVISIBLE.contains(&ch)
}

/// Removes invisible characters.
pub(crate) fn strip_invisible(text: &str) -> String {
    text.chars().filter(|ch| !is_invisible(*ch)).collect()
}

/// Normalises text into comparable word tokens.
///
/// Steps: drop invisible characters, lower-case, undo leetspeak inside
/// tokens that contain letters, fold punctuation to spaces, then join runs
/// of single letters (`b y p a s s`) into one token.
pub(crate) fn normalise(text: &str) -> Vec<String> {
    let lowered = strip_invisible(text).to_lowercase();
    let folded: String = lowered
        .split_whitespace()
        .map(unleet)
        .collect::<Vec<String>>()
        .join(" ");
    let raw: Vec<&str> = folded
        .split(|ch: char| !ch.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .collect();
    join_spelled_out(&raw)
}

fn unleet(token: &str) -> String {
    if !token.chars().any(char::is_alphabetic) {
        return token.to_owned();
    }
    token
        .chars()
        .map(|ch| match ch {
            '0' => 'o',
            '1' => 'i',
            '3' => 'e',
            '4' | '@' => 'a',
            '5' | '$' => 's',
            '7' => 't',
            other => other,
        })
        .collect()
}

fn join_spelled_out(raw: &[&str]) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    let mut letters = String::new();
    let mut run = 0_usize;
    for token in raw {
        let mut chars = token.chars();
        let single = matches!((chars.next(), chars.next()), (Some(ch), None) if ch.is_alphabetic());
        if single {
            letters.push_str(token);
            run += 1;
            continue;
        }
        flush_letters(&mut tokens, &mut letters, run);
        run = 0;
        tokens.push((*token).to_owned());
    }
    flush_letters(&mut tokens, &mut letters, run);
    tokens
}

fn flush_letters(tokens: &mut Vec<String>, letters: &mut String, run: usize) {
    if letters.is_empty() {
        return;
    }
    if run >= 2 {
        tokens.push(std::mem::take(letters));
        return;
    }
    tokens.extend(letters.chars().map(String::from));
    letters.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undoes_leetspeak_and_spacing() {
        assert_eq!(
            normalise("B y p a s s the 4I d3t3ct0r"),
            vec!["bypass", "the", "ai", "detector"]
        );
    }

    #[test]
    fn strips_zero_width_characters() {
        assert_eq!(normalise("by\u{200B}pass"), vec!["bypass"]);
    }

    #[test]
    fn folds_punctuation() {
        assert_eq!(normalise("GPT-Zero, please!"), vec!["gpt", "zero", "please"]);
    }

    #[test]
    fn leaves_plain_numbers_alone() {
        assert_eq!(normalise("in 2024"), vec!["in", "2024"]);
    }
}
