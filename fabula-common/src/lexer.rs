//! Word-level tokenizer for story text
//!
//! Splits text into word runs, number runs and single punctuation
//! characters. Whitespace separates tokens and is dropped. Apostrophes and
//! hyphens are standalone tokens, so "don't" lexes as `don`, `'`, `t`.

/// Tokenize `text` into owned tokens, in order
pub fn lex(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();

    while let Some(&(start, c)) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }

        let mut end = start + c.len_utf8();
        chars.next();

        if c.is_ascii_digit() {
            let mut seen_point = false;
            while let Some(&(i, next)) = chars.peek() {
                if next.is_ascii_digit() {
                    end = i + next.len_utf8();
                    chars.next();
                } else if next == '.' && !seen_point && text[i + 1..].starts_with(|d: char| d.is_ascii_digit()) {
                    seen_point = true;
                    end = i + 1;
                    chars.next();
                } else {
                    break;
                }
            }
        } else if is_word_char(c) {
            while let Some(&(i, next)) = chars.peek() {
                if is_word_char(next) && !next.is_ascii_digit() {
                    end = i + next.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
        }

        tokens.push(text[start..end].to_string());
    }

    tokens
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_and_punctuation() {
        assert_eq!(
            lex("Well, she ran away!"),
            vec!["Well", ",", "she", "ran", "away", "!"]
        );
    }

    #[test]
    fn test_apostrophes_and_hyphens_split() {
        assert_eq!(lex("don't Teeny-Tiny"), vec!["don", "'", "t", "Teeny", "-", "Tiny"]);
    }

    #[test]
    fn test_numbers_keep_decimal_point() {
        assert_eq!(lex("3.5 pounds and 12."), vec!["3.5", "pounds", "and", "12", "."]);
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        assert!(lex(" \n\t ").is_empty());
    }

    #[test]
    fn test_non_ascii_letters_stay_in_words() {
        assert_eq!(lex("naïve café"), vec!["naïve", "café"]);
    }
}
