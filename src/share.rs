//! Composing the share post for the host's compose action.

use serde::Serialize;
use url::Url;

use crate::route::Route;

pub const APP_NAME: &str = "QR Studio";

/// Payload characters kept in the caption.
pub const CAPTION_PAYLOAD_CHARS: usize = 120;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShareEmbed {
    pub text: String,
    pub embed_url: String,
}

impl ShareEmbed {
    /// Builds the caption and embed for `content` labelled `label`.
    ///
    /// Links are embedded as-is; anything else embeds a link back to the
    /// editor prefilled with the content and label.
    pub fn compose(content: &str, label: &str, app_url: &Url) -> Self {
        let content = content.trim();
        let label = label.trim();

        let mut text = format!("{}\n", APP_NAME);
        if !label.is_empty() {
            text.push_str(label);
            text.push('\n');
        }
        text.push_str(&ellipsize(content, CAPTION_PAYLOAD_CHARS));

        let embed_url = if is_probably_url(content) {
            content.to_string()
        } else {
            let route = Route::Editor {
                text: Some(content.to_string()).filter(|t| !t.is_empty()),
                label: Some(label.to_string()).filter(|l| !l.is_empty()),
            };
            match route.absolute(app_url) {
                Ok(url) => url.to_string(),
                Err(_) => app_url.to_string(),
            }
        };

        Self { text, embed_url }
    }
}

/// True for strings that parse as `http` or `https` URLs.
pub fn is_probably_url(value: &str) -> bool {
    Url::parse(value)
        .map(|u| matches!(u.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Keeps the first `max` characters, marking a cut with `…`.
pub(crate) fn ellipsize(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}…", &s[..idx]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> Url {
        Url::parse("https://qr-studio.example/").unwrap()
    }

    #[test]
    fn links_embed_themselves() {
        let embed = ShareEmbed::compose(" https://base.org ", "Base", &app());
        assert_eq!(embed.embed_url, "https://base.org");
        assert_eq!(embed.text, "QR Studio\nBase\nhttps://base.org");
    }

    #[test]
    fn text_embeds_prefilled_editor() {
        let embed = ShareEmbed::compose("wifi: guest / hunter2", "", &app());
        assert_eq!(embed.text, "QR Studio\nwifi: guest / hunter2");
        let url = Url::parse(&embed.embed_url).unwrap();
        assert_eq!(url.host_str(), Some("qr-studio.example"));
        assert_eq!(
            Route::parse(url.as_str()).unwrap(),
            Route::Editor {
                text: Some("wifi: guest / hunter2".into()),
                label: None,
            }
        );
    }

    #[test]
    fn caption_truncates_payload() {
        let long = "é".repeat(130);
        let embed = ShareEmbed::compose(&long, "Notes", &app());
        let body = embed.text.strip_prefix("QR Studio\nNotes\n").unwrap();
        assert_eq!(body.chars().count(), CAPTION_PAYLOAD_CHARS + 1);
        assert!(body.ends_with('…'));
    }

    #[test]
    fn url_detection() {
        assert!(is_probably_url("http://x.io"));
        assert!(is_probably_url("https://base.org/path?q=1"));
        assert!(!is_probably_url("ftp://files.example"));
        assert!(!is_probably_url("base.org"));
        assert!(!is_probably_url("mailto:hi@example.com"));
    }

    #[test]
    fn ellipsize_respects_char_boundaries() {
        assert_eq!(ellipsize("abc", 3), "abc");
        assert_eq!(ellipsize("abcd", 3), "abc…");
        assert_eq!(ellipsize("ééé", 2), "éé…");
    }
}
