use crate::geocoding::MIN_QUERY_CHARS;

/// A suggestion split around the first case-insensitive match of the query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Highlight<'a> {
    pub prefix: &'a str,
    pub matched: &'a str,
    pub suffix: &'a str,
}

impl<'a> Highlight<'a> {
    fn unsplit(text: &'a str) -> Self {
        Self {
            prefix: text,
            matched: "",
            suffix: "",
        }
    }
}

/// Split `text` at the first case-insensitive occurrence of `query`.
///
/// Short queries and misses return the text unsplit. The returned slices keep
/// the original casing of `text`.
pub fn highlight<'a>(text: &'a str, query: &str) -> Highlight<'a> {
    let query = query.trim();
    if query.chars().count() < MIN_QUERY_CHARS {
        return Highlight::unsplit(text);
    }

    for (start, _) in text.char_indices() {
        if let Some(len) = match_len_at(&text[start..], query) {
            let end = start + len;
            return Highlight {
                prefix: &text[..start],
                matched: &text[start..end],
                suffix: &text[end..],
            };
        }
    }

    Highlight::unsplit(text)
}

/// Byte length of the prefix of `haystack` matching `needle` ignoring case
fn match_len_at(haystack: &str, needle: &str) -> Option<usize> {
    let mut hay = haystack.char_indices();
    for n in needle.chars() {
        let (_, h) = hay.next()?;
        if !h.to_lowercase().eq(n.to_lowercase()) {
            return None;
        }
    }
    Some(hay.next().map_or(haystack.len(), |(i, _)| i))
}
