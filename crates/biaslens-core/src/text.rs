//! Text segmentation utilities

/// Split text into sentences on `.`, `!`, or `?` followed by whitespace.
///
/// The terminating punctuation stays attached to its sentence. Runs of
/// terminators (`?!`, `...`) are kept together. Whitespace between
/// sentences is consumed; sentences are returned trimmed of leading
/// whitespace only, preserving interior spacing.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let bytes = text.as_bytes();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        if matches!(bytes[i], b'.' | b'!' | b'?') {
            // consume the full terminator run
            while i + 1 < bytes.len() && matches!(bytes[i + 1], b'.' | b'!' | b'?') {
                i += 1;
            }
            if i + 1 >= bytes.len() || bytes[i + 1].is_ascii_whitespace() {
                let sentence = text[start..=i].trim_start();
                if !sentence.is_empty() {
                    sentences.push(sentence);
                }
                i += 1;
                while i < bytes.len() && bytes[i].is_ascii_whitespace() {
                    i += 1;
                }
                start = i;
                continue;
            }
        }
        i += 1;
    }

    if start < text.len() {
        let tail = text[start..].trim_start();
        if !tail.is_empty() {
            sentences.push(tail);
        }
    }

    sentences
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_basic() {
        let sentences = split_sentences("First sentence. Second one! Third?");
        assert_eq!(sentences, vec!["First sentence.", "Second one!", "Third?"]);
    }

    #[test]
    fn test_split_no_terminator() {
        let sentences = split_sentences("no terminator here");
        assert_eq!(sentences, vec!["no terminator here"]);
    }

    #[test]
    fn test_split_keeps_interior_punctuation() {
        // a period not followed by whitespace does not split
        let sentences = split_sentences("Version 2.5 shipped. Done.");
        assert_eq!(sentences, vec!["Version 2.5 shipped.", "Done."]);
    }

    #[test]
    fn test_split_terminator_runs() {
        let sentences = split_sentences("Really?! Yes... fine.");
        assert_eq!(sentences, vec!["Really?!", "Yes...", "fine."]);
    }

    #[test]
    fn test_split_empty() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   ").is_empty());
    }
}
