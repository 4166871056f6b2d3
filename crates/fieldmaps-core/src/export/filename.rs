//! Export file naming.

use jiff::civil::Date;

const PREFIX: &str = "field-maps";
const EXTENSION: &str = "pdf";

/// Longest file name most filesystems accept, in bytes.
pub const MAX_FILE_NAME_BYTES: usize = 255;

/// `YYYY-MM-DD`
const DATE_LEN: usize = 10;

/// Keeps only ASCII letters, digits and whitespace.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
        .collect()
}

/// Cuts `text` to at most `max` bytes without splitting a character.
fn truncate_on_char_boundary(text: &mut String, max: usize) {
    if text.len() <= max {
        return;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    text.truncate(end);
}

/// `field-maps-<names joined by '-'>-<YYYY-MM-DD>.pdf`, names in list order.
///
/// The joined names are cut short so the whole name stays within
/// [`MAX_FILE_NAME_BYTES`].
pub fn export_file_name<'a>(names: impl IntoIterator<Item = &'a str>, date: Date) -> String {
    let mut joined = names
        .into_iter()
        .map(sanitize_name)
        .collect::<Vec<_>>()
        .join("-");
    let budget = MAX_FILE_NAME_BYTES - (PREFIX.len() + DATE_LEN + EXTENSION.len() + 3);
    truncate_on_char_boundary(&mut joined, budget);
    let joined = joined.trim_end_matches(|c: char| c == '-' || c.is_whitespace());
    format!("{PREFIX}-{joined}-{date}.{EXTENSION}")
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_sanitize_name_strips_punctuation() {
        assert_eq!(sanitize_name("Hut #2 (north)"), "Hut 2 north");
        assert_eq!(sanitize_name("Mt. Ruapehu!"), "Mt Ruapehu");
        assert_eq!(sanitize_name("Tōtara Flat"), "Ttara Flat");
        assert_eq!(sanitize_name("***"), "");
    }

    #[test]
    fn test_file_name_joins_in_order() {
        let name = export_file_name(["Summit Camp", "Hut #2"], date(2024, 3, 9));
        assert_eq!(name, "field-maps-Summit Camp-Hut 2-2024-03-09.pdf");
    }

    #[test]
    fn test_file_name_single_location() {
        let name = export_file_name(["Location 1"], date(2025, 12, 31));
        assert_eq!(name, "field-maps-Location 1-2025-12-31.pdf");
    }

    #[test]
    fn test_long_lists_fit_the_file_name_limit() {
        let names: Vec<String> = (1..=25).map(|i| format!("Location {i}")).collect();
        let name = export_file_name(names.iter().map(String::as_str), date(2026, 10, 17));
        assert!(name.len() <= MAX_FILE_NAME_BYTES);
        assert!(name.starts_with("field-maps-Location 1-Location 2-"));
        assert!(name.ends_with("-2026-10-17.pdf"));

        let long = "Western Ridge Above The Upper Hut Track Junction".repeat(4);
        let name = export_file_name([long.as_str(), long.as_str()], date(2026, 10, 17));
        assert_eq!(name.len(), MAX_FILE_NAME_BYTES);
        assert!(name.ends_with("-2026-10-17.pdf"));
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        // U+3000 ideographic space survives sanitizing and is three bytes wide
        let wide = "\u{3000}".repeat(100);
        let name = export_file_name([wide.as_str()], date(2026, 1, 2));
        assert!(name.len() <= MAX_FILE_NAME_BYTES);
        assert!(name.starts_with("field-maps-"));
        assert!(name.ends_with("-2026-01-02.pdf"));
    }
}
