//! C string literal chunking.
//!
//! A rendered definition text becomes a sequence of quoted fragments joined by
//! line continuations:
//!
//! ```text
//!     "first chunk of text ..." \
//!     "second chunk"
//! ```
//!
//! Double quotes are escaped. An escape sequence (an added `\"` or a `\x`
//! already present in the template) is never split across two fragments, so
//! concatenating the fragments and unescaping the added quotes gives back the
//! original text. The one exception is a lone `\` at the very end of the text,
//! which has nothing to pair with and is emitted as `\\` to keep the literal
//! terminated.

/// Indentation in front of every literal fragment.
pub const LITERAL_INDENT: &str = "    ";

/// Columns taken by the two quotes, the separating space and the continuation
/// backslash on each fragment line, plus one column of slack.
pub const LITERAL_OVERHEAD: usize = 5;

/// Maximum characters of escaped text per fragment for a given line length.
pub fn chunk_len(max_line_length: usize, indent: &str) -> usize {
    max_line_length.saturating_sub(LITERAL_OVERHEAD + indent.chars().count())
}

/// Split `text` into escaped fragments of at most `chunk_len` characters.
///
/// A fragment may exceed `chunk_len` only when `chunk_len` is smaller than a
/// single escape sequence.
pub fn chunk(text: &str, chunk_len: usize) -> Vec<String> {
    let mut fragments = Vec::new();
    let mut current = String::new();
    let mut width = 0;
    let mut chars = text.chars();

    while let Some(c) = chars.next() {
        let (first, second) = match c {
            '"' => ('\\', Some('"')),
            '\\' => ('\\', Some(chars.next().unwrap_or('\\'))),
            other => (other, None),
        };
        let unit_width = 1 + usize::from(second.is_some());

        if width > 0 && width + unit_width > chunk_len {
            fragments.push(std::mem::take(&mut current));
            width = 0;
        }

        current.push(first);
        if let Some(second) = second {
            current.push(second);
        }
        width += unit_width;
    }

    if !current.is_empty() || fragments.is_empty() {
        fragments.push(current);
    }
    fragments
}

/// Render `text` as indented, quoted fragments joined by ` \` line continuations.
pub fn quoted(text: &str, chunk_len: usize, indent: &str) -> String {
    chunk(text, chunk_len)
        .iter()
        .map(|fragment| format!("{indent}\"{fragment}\""))
        .collect::<Vec<_>>()
        .join(" \\\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unescape(fragments: &[String]) -> String {
        fragments.concat().replace("\\\"", "\"")
    }

    #[test]
    fn test_chunk_len_default() {
        assert_eq!(chunk_len(80, LITERAL_INDENT), 71);
        assert_eq!(chunk_len(3, LITERAL_INDENT), 0);
    }

    #[test]
    fn test_short_text_single_fragment() {
        assert_eq!(chunk("\"3.14159\"", 71), vec!["\\\"3.14159\\\""]);
    }

    #[test]
    fn test_fragments_respect_length() {
        let text = "abcdefghij".repeat(20);
        let fragments = chunk(&text, 30);
        assert_eq!(fragments.len(), 7);
        assert!(fragments.iter().all(|f| f.chars().count() <= 30));
        assert_eq!(fragments.concat(), text);
    }

    #[test]
    fn test_escaped_quote_never_split() {
        let text = "ab\"cd\"ef\"gh";
        for len in 2..8 {
            let fragments = chunk(text, len);
            for fragment in &fragments {
                assert!(!fragment.ends_with('\\') || fragment.ends_with("\\\""), "{fragments:?}");
            }
            assert_eq!(unescape(&fragments), text);
        }
    }

    #[test]
    fn test_template_escape_sequences_kept_together() {
        let text = "line\\nnext\\t";
        let fragments = chunk(text, 5);
        assert_eq!(fragments, vec!["line", "\\nnex", "t\\t"]);
        assert_eq!(fragments.concat(), text);
    }

    #[test]
    fn test_chunking_law_multibyte() {
        let text = "\"größe {x}\" — «quoted» \"again\"".repeat(5);
        let fragments = chunk(&text, 13);
        assert!(fragments.iter().all(|f| f.chars().count() <= 13));
        assert_eq!(unescape(&fragments), text);
    }

    #[test]
    fn test_trailing_backslash_is_doubled() {
        let fragments = chunk("a\\", 10);
        assert_eq!(fragments, vec!["a\\\\"]);
        assert_ne!(fragments.concat(), "a\\");

        let fragments = chunk("ab\\", 2);
        assert_eq!(fragments, vec!["ab", "\\\\"]);
    }

    #[test]
    fn test_quoted_lines() {
        let out = quoted("hello world", 5, LITERAL_INDENT);
        assert_eq!(out, "    \"hello\" \\\n    \" worl\" \\\n    \"d\"");
        for line in out.lines() {
            assert!(line.chars().count() <= 5 + LITERAL_OVERHEAD + LITERAL_INDENT.len());
        }
    }

    #[test]
    fn test_empty_text_one_fragment() {
        assert_eq!(quoted("", 10, "  "), "  \"\"");
    }
}
