//! The main screen: content, label and size, plus everything derived from them.
//!
//! The editor renders on demand from its current fields, grades the content
//! length, and turns button presses into [`ExportResolver`] calls. Failures end
//! up in [`Editor::error`]; confirmations in the toast.

use url::Url;

use crate::capability::{Clipboard, MiniAppHost};
use crate::error::RenderError;
use crate::export::{ExportIntent, ExportResolver};
use crate::params::PREVIEW_SIZE;
use crate::render::{render, QrRequest, RenderedImage, PREVIEW_MARGIN};
use crate::route::Route;
use crate::share::{ellipsize, is_probably_url, ShareEmbed};
use crate::toast::Toast;

pub const DEFAULT_LABEL: &str = "My QR";

/// Longest content that still counts as comfortably scannable.
pub const NORMAL_MAX_CHARS: usize = 250;

/// Past this length the symbol gets dense enough that scanners may fail.
pub const DENSE_AFTER_CHARS: usize = 550;

pub const PREVIEW_TEXT_CHARS: usize = 180;

pub const EMPTY_PREVIEW_TEXT: &str = "Type anything to generate a QR.";
pub const EMPTY_SYMBOL_TEXT: &str = "Nothing to encode yet.";
pub const DENSE_ADVISORY: &str =
    "This is pretty long — scanners may struggle. Shorten the text or use a link.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Density {
    Empty,
    Normal,
    Long,
    Dense,
}

impl Density {
    /// Grades a trimmed content length. Only `Empty` disables rendering.
    pub fn of(chars: usize) -> Self {
        match chars {
            0 => Density::Empty,
            n if n <= NORMAL_MAX_CHARS => Density::Normal,
            n if n <= DENSE_AFTER_CHARS => Density::Long,
            _ => Density::Dense,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PillTone {
    Ok,
    Neutral,
    Warn,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LengthPill {
    pub tone: PillTone,
    pub text: String,
}

impl LengthPill {
    pub fn for_length(chars: usize) -> Self {
        match Density::of(chars) {
            Density::Empty => LengthPill {
                tone: PillTone::Neutral,
                text: "0 chars".to_string(),
            },
            Density::Normal => LengthPill {
                tone: PillTone::Ok,
                text: format!("{} chars", chars),
            },
            Density::Long => LengthPill {
                tone: PillTone::Neutral,
                text: format!("{} chars", chars),
            },
            Density::Dense => LengthPill {
                tone: PillTone::Warn,
                text: format!("{} chars (dense)", chars),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentKind {
    Empty,
    Url,
    Text,
}

impl ContentKind {
    pub fn badge(self) -> &'static str {
        match self {
            ContentKind::Empty => "QR",
            ContentKind::Url => "URL",
            ContentKind::Text => "TEXT",
        }
    }
}

pub struct Editor {
    content: String,
    label: String,
    size: u32,
    error: Option<String>,
    toast: Toast,
    resolver: ExportResolver,
    app_url: Url,
}

impl Editor {
    pub fn new(resolver: ExportResolver, app_url: Url) -> Self {
        Self {
            content: String::new(),
            label: DEFAULT_LABEL.to_string(),
            size: PREVIEW_SIZE.default,
            error: None,
            toast: Toast::default(),
            resolver,
            app_url,
        }
    }

    /// Opens the editor at `route`: signals readiness to the host and applies
    /// any prefill carried by the URL.
    pub async fn mount(resolver: ExportResolver, app_url: Url, route: &Route) -> Self {
        if let Err(err) = resolver.capabilities().host.ready().await {
            log::debug!("host ready signal failed: {}", err);
        }
        let mut editor = Self::new(resolver, app_url);
        editor.prefill(route);
        editor
    }

    /// Seeds content and label from `/?text=...&label=...`.
    pub fn prefill(&mut self, route: &Route) {
        if let Route::Editor { text, label } = route {
            if let Some(label) = label {
                self.label = label.clone();
            }
            if let Some(text) = text {
                self.content = text.clone();
            }
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn set_size(&mut self, size: u32) {
        self.size = PREVIEW_SIZE.clamp(size);
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn toast(&self) -> &Toast {
        &self.toast
    }

    pub fn trimmed(&self) -> &str {
        self.content.trim()
    }

    pub fn char_count(&self) -> usize {
        self.trimmed().chars().count()
    }

    pub fn can_make(&self) -> bool {
        self.char_count() > 0
    }

    pub fn density(&self) -> Density {
        Density::of(self.char_count())
    }

    pub fn length_pill(&self) -> LengthPill {
        LengthPill::for_length(self.char_count())
    }

    pub fn advisory(&self) -> Option<&'static str> {
        (self.density() == Density::Dense).then_some(DENSE_ADVISORY)
    }

    pub fn preview_text(&self) -> String {
        if !self.can_make() {
            return EMPTY_PREVIEW_TEXT.to_string();
        }
        ellipsize(self.trimmed(), PREVIEW_TEXT_CHARS)
    }

    /// Shown in place of the symbol while there is nothing to encode.
    pub fn symbol_placeholder(&self) -> Option<&'static str> {
        (!self.can_make()).then_some(EMPTY_SYMBOL_TEXT)
    }

    pub fn content_kind(&self) -> ContentKind {
        if !self.can_make() {
            ContentKind::Empty
        } else if is_probably_url(self.trimmed()) {
            ContentKind::Url
        } else {
            ContentKind::Text
        }
    }

    pub fn display_label(&self) -> &str {
        match self.label.trim() {
            "" => "Untitled",
            label => label,
        }
    }

    /// Link that reopens this editor with the current content and label.
    pub fn share_url(&self) -> String {
        let route = Route::Editor {
            text: Some(self.trimmed().to_string()).filter(|t| !t.is_empty()),
            label: Some(self.label.trim().to_string()).filter(|l| !l.is_empty()),
        };
        match route.absolute(&self.app_url) {
            Ok(url) => url.to_string(),
            Err(_) => self.app_url.to_string(),
        }
    }

    pub fn qr_request(&self) -> Option<QrRequest> {
        QrRequest::new(self.trimmed(), self.size)
            .ok()
            .map(|r| r.with_margin(PREVIEW_MARGIN))
    }

    /// The symbol currently on screen, or `None` while there is nothing to encode.
    pub fn preview(&self) -> Result<Option<RenderedImage>, RenderError> {
        self.qr_request().map(|request| render(&request)).transpose()
    }

    pub async fn paste_from_clipboard(&mut self) {
        self.error = None;
        match self.resolver.capabilities().clipboard.read_text().await {
            Ok(text) => {
                let text = text.trim();
                if !text.is_empty() {
                    self.content = text.to_string();
                }
            }
            Err(err) => {
                log::debug!("clipboard read failed: {}", err);
                self.error = Some("Clipboard permission blocked. Paste manually.".to_string());
            }
        }
    }

    pub fn clear(&mut self) {
        self.error = None;
        self.content.clear();
    }

    pub async fn copy_qr(&mut self) {
        self.export(ExportIntent::Copy, "Copy failed.").await;
    }

    pub async fn download_qr(&mut self) {
        self.export(ExportIntent::Download, "Download failed.").await;
    }

    pub async fn share(&mut self) {
        let embed = ShareEmbed::compose(&self.content, &self.label, &self.app_url);
        self.export(ExportIntent::Share(embed), "Share failed.").await;
    }

    pub async fn add_to_apps(&mut self) {
        self.error = None;
        if let Err(err) = self.resolver.capabilities().host.add_mini_app().await {
            log::warn!("add mini app failed: {}", err);
            self.error = Some(err.to_string());
        }
    }

    async fn export(&mut self, intent: ExportIntent, fallback: &str) {
        self.error = None;
        if !self.can_make() {
            return;
        }

        let image = match self.preview() {
            Ok(Some(image)) => image,
            Ok(None) => return,
            Err(err) => {
                self.error = Some(err.to_string());
                return;
            }
        };

        match self.resolver.export_image(&image, &self.label, &intent).await {
            Ok(outcome) => {
                if let Some(message) = outcome.toast(&intent) {
                    self.toast.show(message);
                }
            }
            Err(err) => {
                let message = err.to_string();
                self.error = Some(if message.is_empty() {
                    fallback.to_string()
                } else {
                    message
                });
            }
        }
    }
}
