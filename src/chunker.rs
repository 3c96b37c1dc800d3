//! Paragraph chunker: splits a corpus into retrievable text units

use serde::{Deserialize, Serialize};

/// Paragraph boundary used to split a corpus.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// A trimmed, non-empty paragraph of the corpus.
///
/// `id` is the unit's position in discovery order and doubles as its
/// position in the vector index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextUnit {
    pub id: usize,
    pub content: String,
}

/// Split `raw` on blank lines into trimmed, non-empty units with dense ids.
///
/// An input with no qualifying paragraph yields an empty vec.
pub fn chunk(raw: &str) -> Vec<TextUnit> {
    let normalized = raw.replace("\r\n", "\n");

    normalized
        .split(PARAGRAPH_SEPARATOR)
        .map(str::trim)
        .filter(|candidate| !candidate.is_empty())
        .enumerate()
        .map(|(id, content)| TextUnit {
            id,
            content: content.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chunk_paragraphs() {
        let units = chunk("Paris is the capital of France.\n\nThe Eiffel Tower is in Paris.");
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].id, 0);
        assert_eq!(units[0].content, "Paris is the capital of France.");
        assert_eq!(units[1].id, 1);
        assert_eq!(units[1].content, "The Eiffel Tower is in Paris.");
    }

    #[test]
    fn test_chunk_empty_and_whitespace() {
        assert!(chunk("").is_empty());
        assert!(chunk("   \n\n \t \n\n\n").is_empty());
    }

    #[test]
    fn test_chunk_drops_blank_candidates_and_keeps_ids_dense() {
        let units = chunk("\n\n  first  \n\n\n\n   \n\nsecond\n\n");
        let contents: Vec<&str> = units.iter().map(|u| u.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second"]);
        assert_eq!(units.iter().map(|u| u.id).collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn test_single_newline_stays_in_paragraph() {
        let units = chunk("line one\nline two\n\nnext");
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].content, "line one\nline two");
    }

    #[test]
    fn test_crlf_line_endings() {
        let units = chunk("alpha\r\n\r\nbeta\r\n");
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].content, "alpha");
        assert_eq!(units[1].content, "beta");
    }
}
