//! Getting a rendered QR image into the user's hands.
//!
//! Which capabilities work depends on the host: desktop browsers accept
//! clipboard image writes, mobile webviews usually offer a share sheet, and
//! sandboxed mini-app hosts may block both along with file downloads. The
//! resolver builds an ordered chain of [`ExportStep`]s for the requested intent
//! and runs it through [`attempt_in_order`]. The last resort is always the
//! save view, reached through the [`HandoffStore`].

use std::sync::Arc;

use async_trait::async_trait;

use crate::capability::{
    Capability, Clipboard, Downloader, HostCapabilities, ImageFile, Navigator, ShareRequest, ShareSheet,
};
use crate::error::{CapabilityError, ExportError, HandoffError};
use crate::handoff::HandoffStore;
use crate::params::{handoff_label, safe_filename};
use crate::render::RenderedImage;
use crate::route::Route;
use crate::share::ShareEmbed;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportIntent {
    Copy,
    Download,
    Share(ShareEmbed),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// The PNG is on the system clipboard.
    Copied,
    /// The native share sheet took the file.
    Shared,
    /// The browser (or the standalone downloader) saved the file.
    Downloaded { file_name: String },
    /// The image was handed off to the save view at `href`.
    SaveView { key: String, href: String },
    /// The host's compose window was opened.
    Composed,
}

impl ExportOutcome {
    /// Toast shown after a successful export, if any.
    pub fn toast(&self, intent: &ExportIntent) -> Option<&'static str> {
        match (self, intent) {
            (ExportOutcome::Copied, _) => Some("QR copied ✅"),
            (ExportOutcome::Shared, _) => Some("Shared ✅"),
            (ExportOutcome::SaveView { .. }, ExportIntent::Download) => {
                Some("Tip: long‑press QR to save")
            }
            (ExportOutcome::SaveView { .. }, _) => Some("Tip: long‑press QR to save/copy"),
            _ => None,
        }
    }
}

/// One way of exporting a file. Failing lets the next step run.
#[async_trait]
pub trait ExportStep: Send + Sync {
    fn name(&self) -> &'static str;

    async fn attempt(&self, file: &ImageFile) -> Result<ExportOutcome, ExportError>;
}

/// Runs `steps` in order and returns the first success.
///
/// Failures before the last step are logged and swallowed. When every step
/// fails the last error is returned; an empty chain is [`ExportError::NoSteps`].
pub async fn attempt_in_order(
    steps: &[Box<dyn ExportStep>],
    file: &ImageFile,
) -> Result<ExportOutcome, ExportError> {
    let mut last = ExportError::NoSteps;
    for step in steps {
        match step.attempt(file).await {
            Ok(outcome) => {
                log::debug!("export step {} succeeded", step.name());
                return Ok(outcome);
            }
            Err(err) => {
                log::debug!("export step {} failed: {}", step.name(), err);
                last = err;
            }
        }
    }
    log::warn!("every export step failed for {}: {}", file.name, last);
    Err(last)
}

pub struct ClipboardStep {
    clipboard: Arc<dyn Clipboard>,
}

#[async_trait]
impl ExportStep for ClipboardStep {
    fn name(&self) -> &'static str {
        "clipboard"
    }

    async fn attempt(&self, file: &ImageFile) -> Result<ExportOutcome, ExportError> {
        if !self.clipboard.is_available() {
            return Err(CapabilityError::Unavailable(self.clipboard.kind()).into());
        }
        self.clipboard.write_image(file).await?;
        Ok(ExportOutcome::Copied)
    }
}

pub struct ShareSheetStep {
    share: Arc<dyn ShareSheet>,
}

#[async_trait]
impl ExportStep for ShareSheetStep {
    fn name(&self) -> &'static str {
        "share sheet"
    }

    async fn attempt(&self, file: &ImageFile) -> Result<ExportOutcome, ExportError> {
        if !self.share.is_available() || !self.share.can_share(file) {
            return Err(CapabilityError::Unavailable(self.share.kind()).into());
        }
        let request = ShareRequest {
            title: "QR".to_string(),
            files: vec![file.clone()],
        };
        self.share.share(request).await?;
        Ok(ExportOutcome::Shared)
    }
}

pub struct DownloadStep {
    downloader: Arc<dyn Downloader>,
}

#[async_trait]
impl ExportStep for DownloadStep {
    fn name(&self) -> &'static str {
        "download"
    }

    async fn attempt(&self, file: &ImageFile) -> Result<ExportOutcome, ExportError> {
        self.downloader.download(file).await?;
        Ok(ExportOutcome::Downloaded {
            file_name: file.name.clone(),
        })
    }
}

/// Stores the image and navigates to `/save`.
pub struct SaveViewStep {
    store: HandoffStore,
    navigator: Arc<dyn Navigator>,
    label: String,
}

#[async_trait]
impl ExportStep for SaveViewStep {
    fn name(&self) -> &'static str {
        "save view"
    }

    async fn attempt(&self, file: &ImageFile) -> Result<ExportOutcome, ExportError> {
        let key = self.store.put_png(&file.bytes).map_err(ExportError::SaveView)?;
        let href = Route::Save {
            id: key.clone(),
            label: self.label.clone(),
        }
        .href();
        self.navigator
            .push(&href)
            .await
            .map_err(|e| ExportError::SaveView(HandoffError::Navigation(e)))?;
        Ok(ExportOutcome::SaveView { key, href })
    }
}

/// Picks and runs the export chain for the current host.
#[derive(Clone)]
pub struct ExportResolver {
    caps: HostCapabilities,
    store: HandoffStore,
}

impl ExportResolver {
    pub fn new(caps: HostCapabilities) -> Self {
        let store = HandoffStore::new(caps.storage.clone());
        Self { caps, store }
    }

    pub fn capabilities(&self) -> &HostCapabilities {
        &self.caps
    }

    pub fn store(&self) -> &HandoffStore {
        &self.store
    }

    /// Whether we run inside a mini-app host. A failed query means no.
    pub async fn in_mini_app(&self) -> bool {
        match self.caps.host.is_in_mini_app().await {
            Ok(inside) => inside,
            Err(err) => {
                log::debug!("mini-app context query failed: {}", err);
                false
            }
        }
    }

    fn save_view_step(&self, label: &str) -> Box<dyn ExportStep> {
        Box::new(SaveViewStep {
            store: self.store.clone(),
            navigator: self.caps.navigator.clone(),
            label: handoff_label(label),
        })
    }

    /// The ordered steps for `intent`. Sharing has no file chain.
    pub async fn chain(&self, intent: &ExportIntent, label: &str) -> Vec<Box<dyn ExportStep>> {
        let sandboxed = matches!(intent, ExportIntent::Download) && self.in_mini_app().await;
        match intent {
            ExportIntent::Copy => vec![
                Box::new(ClipboardStep {
                    clipboard: self.caps.clipboard.clone(),
                }) as Box<dyn ExportStep>,
                Box::new(ShareSheetStep {
                    share: self.caps.share.clone(),
                }),
                self.save_view_step(label),
            ],
            // sandboxed hosts block programmatic downloads
            ExportIntent::Download if sandboxed => vec![self.save_view_step(label)],
            ExportIntent::Download => vec![Box::new(DownloadStep {
                downloader: self.caps.downloader.clone(),
            }) as Box<dyn ExportStep>],
            ExportIntent::Share(_) => Vec::new(),
        }
    }

    /// Exports `image` labelled `label` according to `intent`.
    ///
    /// # Errors
    ///
    /// Only the terminal failure is returned; its `Display` is the message to
    /// show the user.
    pub async fn export_image(
        &self,
        image: &RenderedImage,
        label: &str,
        intent: &ExportIntent,
    ) -> Result<ExportOutcome, ExportError> {
        if let ExportIntent::Share(embed) = intent {
            self.caps.host.compose_cast(embed).await?;
            return Ok(ExportOutcome::Composed);
        }

        let file = ImageFile::png(format!("{}.png", safe_filename(label)), image.to_png()?);
        let steps = self.chain(intent, label).await;
        attempt_in_order(&steps, &file).await
    }
}
