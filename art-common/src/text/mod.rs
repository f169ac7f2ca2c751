//! name normalization shared by the location records and the importer

/// Title-cases every word and collapses runs of whitespace,
/// `"  epic   tower "` becomes `"Epic Tower"`.
pub fn normalize_name(input: &str) -> String {
    input
        .split_whitespace()
        .map(title_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn title_word(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut start = true;
    for c in word.chars() {
        if c.is_alphabetic() {
            if start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            start = false;
        } else {
            out.push(c);
            start = true;
        }
    }
    out
}

/// Trimmed value, or `None` when nothing is left.
pub fn non_blank(input: Option<&str>) -> Option<String> {
    input
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_and_titles() {
        assert_eq!(normalize_name("  epic   tower "), "Epic Tower");
        assert_eq!(normalize_name("BLOCK-a"), "Block-A");
        assert_eq!(normalize_name("o'neil wing"), "O'Neil Wing");
        assert_eq!(normalize_name("   "), "");
    }

    #[test]
    fn non_blank_trims() {
        assert_eq!(non_blank(Some("  SN001 ")), Some("SN001".to_string()));
        assert_eq!(non_blank(Some("   ")), None);
        assert_eq!(non_blank(None), None);
    }
}
