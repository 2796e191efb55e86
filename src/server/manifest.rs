//! The mini-app manifest served at `/.well-known/farcaster.json`.

use std::sync::Arc;

use axum::{
    extract::State,
    http::header::{CACHE_CONTROL, CONTENT_TYPE},
    response::IntoResponse,
};
use serde::Serialize;
use url::Url;

use super::{AppState, ServeError};
use crate::config::ServeConfig;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct MiniApp {
    version: &'static str,
    name: String,
    home_url: String,
    icon_url: String,
    image_url: String,
    button_title: &'static str,
    splash_image_url: String,
    splash_background_color: &'static str,
    subtitle: &'static str,
    description: &'static str,
    primary_category: &'static str,
    tags: [&'static str; 3],
}

#[derive(Debug, Serialize)]
struct Manifest {
    miniapp: MiniApp,
}

fn asset(app_url: &Url, path: &str) -> String {
    app_url
        .join(path)
        .map(String::from)
        .unwrap_or_else(|_| app_url.to_string())
}

/// Builds the manifest document from configuration.
pub fn generate(app_name: &str, app_url: &Url) -> Result<String, serde_json::Error> {
    let manifest = Manifest {
        miniapp: MiniApp {
            version: "1",
            name: app_name.to_string(),
            home_url: app_url.to_string(),
            icon_url: asset(app_url, "icon.png"),
            image_url: asset(app_url, "hero.png"),
            button_title: "Open",
            splash_image_url: asset(app_url, "icon.png"),
            splash_background_color: "#ffffff",
            subtitle: "Any text or link to a QR",
            description: "Turn any text or link into a clean QR code.",
            primary_category: "utility",
            tags: ["qr", "qrcode", "tools"],
        },
    };
    serde_json::to_string_pretty(&manifest)
}

/// The manifest text: the configured file if any, otherwise the generated one.
pub async fn load(config: &ServeConfig) -> Result<String, ServeError> {
    match &config.manifest {
        Some(path) => {
            let text = tokio::fs::read_to_string(path).await?;
            // must parse before it is served
            serde_json::from_str::<serde_json::Value>(&text)?;
            log::info!("serving manifest from {}", path.display());
            Ok(text)
        }
        None => Ok(generate(&config.app_name, &config.app_url)?),
    }
}

pub async fn manifest(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [
            (CONTENT_TYPE, "application/json; charset=utf-8"),
            (CACHE_CONTROL, "public, max-age=60"),
        ],
        state.manifest.clone(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_manifest_points_at_app() {
        let app = Url::parse("https://qr.example/").unwrap();
        let text = generate("QR Studio", &app).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["miniapp"]["name"], "QR Studio");
        assert_eq!(value["miniapp"]["homeUrl"], "https://qr.example/");
        assert_eq!(value["miniapp"]["imageUrl"], "https://qr.example/hero.png");
    }
}
