//! Trip title derivation.

/// Longest title kept verbatim, in characters.
pub const TITLE_MAX_CHARS: usize = 40;

const ELLIPSIS: &str = "...";

/// Derive a trip title from the user message that created it.
///
/// Messages longer than [`TITLE_MAX_CHARS`] characters are cut at that
/// length and marked with `...`. Counts Unicode scalar values, so a cut
/// never splits a character.
pub fn derive_title(message: &str) -> String {
    let mut chars = message.chars();
    let head: String = chars.by_ref().take(TITLE_MAX_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}{ELLIPSIS}")
    } else {
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_message_kept() {
        assert_eq!(derive_title("Villas in Bali"), "Villas in Bali");
    }

    #[test]
    fn test_exactly_forty_chars_not_marked() {
        let msg = "a".repeat(40);
        assert_eq!(derive_title(&msg), msg);
    }

    #[test]
    fn test_long_message_truncated() {
        let msg = "Apartments in New York under $200 for a week in May";
        let title = derive_title(msg);
        assert_eq!(title, "Apartments in New York under $200 for a ...");
        assert_eq!(title.chars().count(), 43);
    }

    #[test]
    fn test_multibyte_message_truncated_on_char_boundary() {
        let msg = "東京".repeat(30);
        let title = derive_title(&msg);
        assert!(title.ends_with("..."));
        assert_eq!(title.chars().count(), TITLE_MAX_CHARS + 3);
    }
}
