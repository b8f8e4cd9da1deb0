/// Characters that are path separators or reserved on at least one
/// mainstream filesystem.
const RESERVED: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Turn a scraped page title into a file stem that stays inside the output
/// directory.
///
/// Control characters are removed, separators and reserved characters become
/// `_`, and leading/trailing whitespace and dots are trimmed (so `..` cannot
/// survive). An empty result falls back to `fallback`.
pub fn file_stem(title: &str, fallback: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| if RESERVED.contains(&c) { '_' } else { c })
        .collect();
    let trimmed = cleaned.trim_matches(|c: char| c.is_whitespace() || c == '.');
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_ordinary_titles() {
        assert_eq!(
            file_stem("111學年度新竹區國中會考錄取率", "x"),
            "111學年度新竹區國中會考錄取率"
        );
    }

    #[test]
    fn replaces_separators_and_reserved() {
        assert_eq!(file_stem("110/111 a\\b: c?", "x"), "110_111 a_b_ c_");
        assert_eq!(file_stem("../../etc/passwd", "x"), "_.._etc_passwd");
    }

    #[test]
    fn strips_control_characters() {
        assert_eq!(file_stem("a\tb\nc\u{7f}", "x"), "abc");
    }

    #[test]
    fn empty_after_cleaning_uses_fallback() {
        assert_eq!(file_stem(" .. ", "year-111"), "year-111");
        assert_eq!(file_stem("\n", "year-111"), "year-111");
    }
}
