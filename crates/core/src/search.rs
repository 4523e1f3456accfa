//! Accent- and case-insensitive text matching for roster cells.
//!
//! "jose" finds "José", "MARIA" finds "María". Matching runs on a folded copy of
//! the text (NFD, combining marks dropped, lowercased) while the returned
//! segments borrow the original text, so highlighting keeps the accents.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Fold `text` for comparison: decompose, strip diacritics, lowercase.
pub fn normalize(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Whether `haystack` mentions `needle` once both are folded.
///
/// An empty (or diacritics-only) needle never matches.
pub fn mentions(haystack: &str, needle: &str) -> bool {
    let needle = normalize(needle);
    !needle.is_empty() && normalize(haystack).contains(&needle)
}

/// A slice of the original text, flagged when it matched the search term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub text: &'a str,
    pub matched: bool,
}

/// One folded char and the byte span of the original char it came from.
struct Folded {
    ch: char,
    start: usize,
    end: usize,
}

fn fold_with_offsets(text: &str) -> Vec<Folded> {
    let mut out = Vec::with_capacity(text.len());
    for (start, ch) in text.char_indices() {
        let end = start + ch.len_utf8();
        for c in std::iter::once(ch)
            .nfd()
            .filter(|c| !is_combining_mark(*c))
            .flat_map(char::to_lowercase)
        {
            out.push(Folded { ch: c, start, end });
        }
    }
    out
}

/// Split `text` into alternating plain and matched segments.
///
/// Matches are found left to right and never overlap. Concatenating the
/// segment texts always reproduces `text`.
pub fn highlight_segments<'a>(text: &'a str, needle: &str) -> Vec<Segment<'a>> {
    let needle: Vec<char> = normalize(needle).chars().collect();
    let folded = fold_with_offsets(text);

    let mut ranges: Vec<(usize, usize)> = Vec::new();
    if !needle.is_empty() && folded.len() >= needle.len() {
        let mut i = 0;
        while i + needle.len() <= folded.len() {
            let window = &folded[i..i + needle.len()];
            if window.iter().zip(&needle).all(|(f, n)| f.ch == *n) {
                let start = window[0].start;
                let end = window[needle.len() - 1].end;
                if ranges.last().map_or(true, |&(_, prev_end)| start >= prev_end) {
                    ranges.push((start, end));
                }
                i += needle.len();
            } else {
                i += 1;
            }
        }
    }

    let mut segments = Vec::with_capacity(ranges.len() * 2 + 1);
    let mut cursor = 0;
    for (start, end) in ranges {
        if start > cursor {
            segments.push(Segment {
                text: &text[cursor..start],
                matched: false,
            });
        }
        segments.push(Segment {
            text: &text[start..end],
            matched: true,
        });
        cursor = end;
    }
    if cursor < text.len() || segments.is_empty() {
        segments.push(Segment {
            text: &text[cursor..],
            matched: false,
        });
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_strips_accents_and_case() {
        assert_eq!(normalize("José"), "jose");
        assert_eq!(normalize("MARÍA Núñez"), "maria nunez");
        assert_eq!(normalize("planificación"), "planificacion");
    }

    #[test]
    fn mentions_ignores_accents_both_ways() {
        assert!(mentions("Ana, José, Luis", "jose"));
        assert!(mentions("Ana, Jose, Luis", "José"));
        assert!(!mentions("Ana, Luis", "José"));
        assert!(!mentions("anything", ""));
    }

    #[test]
    fn segments_keep_original_text() {
        let segs = highlight_segments("Ana, José y Pepe", "jose");
        assert_eq!(
            segs,
            vec![
                Segment { text: "Ana, ", matched: false },
                Segment { text: "José", matched: true },
                Segment { text: " y Pepe", matched: false },
            ]
        );
    }

    #[test]
    fn segments_handle_repeats_and_edges() {
        let segs = highlight_segments("ana ANA", "ana");
        let texts: Vec<_> = segs.iter().map(|s| (s.text, s.matched)).collect();
        assert_eq!(texts, vec![("ana", true), (" ", false), ("ANA", true)]);
    }

    #[test]
    fn no_match_is_single_plain_segment() {
        let segs = highlight_segments("Remote", "jose");
        assert_eq!(segs, vec![Segment { text: "Remote", matched: false }]);

        let segs = highlight_segments("", "jose");
        assert_eq!(segs, vec![Segment { text: "", matched: false }]);
    }

    #[test]
    fn segments_concatenate_back() {
        let text = "Todos presencial (planificación): María, Mario";
        let joined: String = highlight_segments(text, "mari")
            .iter()
            .map(|s| s.text)
            .collect();
        assert_eq!(joined, text);
    }
}
