//! The navigation contract between the two views.
//!
//! `/` takes `text` and `label` to prefill the editor, `/save` takes the
//! hand-off `id` and a `label`.

use url::{form_urlencoded, Url};

/// Base used to resolve relative hrefs; only the path and query are read back.
const RESOLVE_BASE: &str = "http://localhost/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Editor {
        text: Option<String>,
        label: Option<String>,
    },
    Save {
        id: String,
        label: String,
    },
    NotFound(String),
}

impl Route {
    pub fn home() -> Self {
        Route::Editor {
            text: None,
            label: None,
        }
    }

    /// Parses an absolute URL or a site-relative href.
    pub fn parse(href: &str) -> Result<Self, url::ParseError> {
        let url = Url::parse(RESOLVE_BASE)?.join(href)?;
        let param = |name: &str| {
            url.query_pairs()
                .find(|(k, _)| k == name)
                .map(|(_, v)| v.into_owned())
        };

        let route = match url.path() {
            "/" => Route::Editor {
                text: param("text").map(|t| t.trim().to_string()).filter(|t| !t.is_empty()),
                label: param("label").map(|l| l.trim().to_string()).filter(|l| !l.is_empty()),
            },
            "/save" => Route::Save {
                id: param("id").unwrap_or_default(),
                label: param("label").unwrap_or_else(|| "QR".to_string()),
            },
            other => Route::NotFound(other.to_string()),
        };
        Ok(route)
    }

    /// Site-relative href with an encoded query.
    pub fn href(&self) -> String {
        let mut query = form_urlencoded::Serializer::new(String::new());
        let path = match self {
            Route::Editor { text, label } => {
                if let Some(text) = text {
                    query.append_pair("text", text);
                }
                if let Some(label) = label {
                    query.append_pair("label", label);
                }
                "/"
            }
            Route::Save { id, label } => {
                query.append_pair("id", id);
                query.append_pair("label", label);
                "/save"
            }
            Route::NotFound(path) => path.as_str(),
        };

        let query = query.finish();
        if query.is_empty() {
            path.to_string()
        } else {
            format!("{}?{}", path, query)
        }
    }

    /// Absolute URL of this route under `app_url`.
    pub fn absolute(&self, app_url: &Url) -> Result<Url, url::ParseError> {
        app_url.join(&self.href())
    }
}
