//! Size ranges, filename sanitizing and label normalization.

/// An inclusive pixel range with a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeRange {
    pub min: u32,
    pub max: u32,
    pub default: u32,
}

impl SizeRange {
    pub fn clamp(&self, size: u32) -> u32 {
        size.clamp(self.min, self.max)
    }

    /// Parses a raw `size` query value.
    ///
    /// Missing, empty or non-numeric input yields the default. Fractional
    /// values are truncated after clamping.
    pub fn parse(&self, raw: Option<&str>) -> u32 {
        let value = raw
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|n| n.is_finite())
            .unwrap_or(self.default as f64);
        value.clamp(self.min as f64, self.max as f64) as u32
    }
}

/// Interactive preview slider.
pub const PREVIEW_SIZE: SizeRange = SizeRange {
    min: 220,
    max: 360,
    default: 280,
};

/// Server-rendered image endpoint.
pub const ENDPOINT_SIZE: SizeRange = SizeRange {
    min: 256,
    max: 2048,
    default: 960,
};

/// Longest filename stem produced by [`safe_filename`].
pub const MAX_FILENAME_LEN: usize = 60;

/// Turns a free-form label into a filename stem matching `^[a-z0-9-]*$`.
///
/// Whitespace runs become a single `-`; anything else outside the alphabet is
/// dropped. Empty results fall back to `qr`.
pub fn safe_filename(label: &str) -> String {
    let kept: String = label
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-' || c.is_whitespace())
        .collect();

    let mut stem = String::with_capacity(kept.len());
    let mut in_space = false;
    for c in kept.chars() {
        if c.is_whitespace() {
            if !in_space {
                stem.push('-');
            }
            in_space = true;
        } else {
            stem.push(c);
            in_space = false;
        }
    }

    let stem: String = stem.chars().take(MAX_FILENAME_LEN).collect();
    if stem.is_empty() {
        "qr".to_string()
    } else {
        stem
    }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Label carried in the `/save` URL: trimmed, `qr` when empty, single spaces.
pub fn handoff_label(label: &str) -> String {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        "qr".to_string()
    } else {
        collapse_whitespace(trimmed)
    }
}

/// Label shown by the save view and used for the shared file name.
pub fn save_view_label(label: &str) -> String {
    let cleaned = collapse_whitespace(label);
    if cleaned.is_empty() {
        "QR".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn is_safe(stem: &str) -> bool {
        stem.chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    }

    #[rstest]
    #[case("My QR", "my-qr")]
    #[case("  Base   Meetup 2024 ", "base-meetup-2024")]
    #[case("Tips & Tricks!", "tips-tricks")]
    #[case("snake_case_label", "snakecaselabel")]
    #[case("", "qr")]
    #[case("🎉🎉", "qr")]
    #[case("ÀÉÎ", "qr")]
    fn sanitizes_labels(#[case] label: &str, #[case] expected: &str) {
        assert_eq!(safe_filename(label), expected);
    }

    #[test]
    fn filename_is_bounded_and_safe() {
        let labels = [
            "a".repeat(200),
            "Hello World ".repeat(20),
            "\t\n mixed\u{00a0}spaces__and//slashes ".to_string(),
            "UPPER lower 123 --- ___".to_string(),
        ];
        for label in &labels {
            let stem = safe_filename(label);
            assert!(is_safe(&stem), "{stem:?}");
            assert!(stem.chars().count() <= MAX_FILENAME_LEN);
            assert!(!stem.is_empty());
        }
    }

    #[rstest]
    #[case(Some("100"), 256)]
    #[case(Some("255"), 256)]
    #[case(Some("300"), 300)]
    #[case(Some("4096"), 2048)]
    #[case(Some("abc"), 960)]
    #[case(Some(""), 960)]
    #[case(Some("NaN"), 960)]
    #[case(Some("512.9"), 512)]
    #[case(Some("-5"), 256)]
    #[case(None, 960)]
    fn endpoint_size_is_clamped(#[case] raw: Option<&str>, #[case] expected: u32) {
        assert_eq!(ENDPOINT_SIZE.parse(raw), expected);
    }

    #[test]
    fn preview_size_is_clamped() {
        assert_eq!(PREVIEW_SIZE.clamp(100), 220);
        assert_eq!(PREVIEW_SIZE.clamp(300), 300);
        assert_eq!(PREVIEW_SIZE.clamp(1000), 360);
    }

    #[test]
    fn labels_for_save_view() {
        assert_eq!(handoff_label("  My   QR "), "My QR");
        assert_eq!(handoff_label("   "), "qr");
        assert_eq!(save_view_label(" Conference\n badge "), "Conference badge");
        assert_eq!(save_view_label(""), "QR");
    }
}
