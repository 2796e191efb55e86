//! The `/save` screen: shows a handed-off image for manual save or share.
//!
//! Every failure here is an inline message. The view never blocks the rest of
//! the app; "start over" is always available.

use crate::capability::{
    Capability, HostCapabilities, ImageFile, MiniAppHost, Navigator, ShareRequest, ShareSheet,
};
use crate::data_url;
use crate::error::{CapabilityError, HandoffError};
use crate::export::ExportResolver;
use crate::handoff::HandoffStore;
use crate::params::save_view_label;
use crate::route::Route;

pub struct SaveView {
    label: String,
    src: Option<String>,
    error: Option<String>,
    caps: HostCapabilities,
}

impl SaveView {
    /// Opens the view for `route`, signalling readiness to the host first.
    pub async fn mount(resolver: &ExportResolver, route: &Route) -> Self {
        let caps = resolver.capabilities();
        if let Err(err) = caps.host.ready().await {
            log::debug!("host ready signal failed: {}", err);
        }
        let (id, label) = match route {
            Route::Save { id, label } => (id.as_str(), label.as_str()),
            _ => ("", "QR"),
        };
        Self::open(resolver.store(), caps.clone(), id, label)
    }

    /// Recovers the image stored under `id`.
    pub fn open(store: &HandoffStore, caps: HostCapabilities, id: &str, label: &str) -> Self {
        let (src, error) = match store.get_data_url(id) {
            Ok(src) => (Some(src), None),
            Err(err) => {
                log::debug!("save view could not load {:?}: {:?}", id, err);
                (None, Some(err.to_string()))
            }
        };
        Self {
            label: save_view_label(label),
            src,
            error,
            caps,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The data URL to display, once loaded.
    pub fn image_src(&self) -> Option<&str> {
        self.src.as_deref()
    }

    pub fn image_png(&self) -> Option<Vec<u8>> {
        self.src
            .as_deref()
            .and_then(|src| data_url::decode_png(src).ok())
    }

    pub fn can_share(&self) -> bool {
        self.src.is_some() && self.error.is_none()
    }

    /// Shares the image through the native sheet, or asks the host to open it
    /// so the user can long-press to save.
    pub async fn share_image(&mut self) {
        self.error = None;
        let Some(src) = self.src.clone() else {
            return;
        };

        let png = match data_url::decode_png(&src) {
            Ok(png) => png,
            Err(err) => {
                self.error = Some(HandoffError::from(err).to_string());
                return;
            }
        };
        let file = ImageFile::png(format!("{}.png", self.label), png);

        let result = if self.caps.share.is_available() && self.caps.share.can_share(&file) {
            let request = ShareRequest {
                title: self.label.clone(),
                files: vec![file],
            };
            self.caps.share.share(request).await
        } else {
            self.caps.host.open_url(&src).await
        };

        if let Err(err) = result {
            log::warn!("save view share failed: {}", err);
            let message = err.to_string();
            self.error = Some(if message.is_empty() {
                "Share failed.".to_string()
            } else {
                message
            });
        }
    }

    /// Back to an empty editor.
    pub async fn start_over(&self) -> Result<(), CapabilityError> {
        self.caps.navigator.push(&Route::home().href()).await
    }

    pub async fn back(&self) -> Result<(), CapabilityError> {
        self.caps.navigator.back().await
    }
}
