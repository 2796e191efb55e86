//! Host capabilities the export chain probes.
//!
//! Clipboard, share sheet and storage are polymorphic [`Capability`]s: each
//! can be asked independently whether it is usable before anything is tried.
//! The downloader, navigator and mini-app host are plain collaborators.
//!
//! Browser and host-SDK bindings live outside this crate. The types at the
//! bottom of this module are the standalone implementations used by the
//! command line and by tests.

use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::error::CapabilityError;
use crate::handoff::MemoryStorage;
use crate::share::ShareEmbed;

pub const PNG_MIME: &str = "image/png";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
    ClipboardImageWrite,
    NativeShare,
    Storage,
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CapabilityKind::ClipboardImageWrite => "clipboard image write",
            CapabilityKind::NativeShare => "native share",
            CapabilityKind::Storage => "session storage",
        };
        f.write_str(name)
    }
}

/// Something the host may or may not provide.
pub trait Capability: Send + Sync {
    fn kind(&self) -> CapabilityKind;

    fn is_available(&self) -> bool;
}

/// A named file handed to the OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl ImageFile {
    pub fn png(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: PNG_MIME,
            bytes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    pub title: String,
    pub files: Vec<ImageFile>,
}

#[async_trait]
pub trait Clipboard: Capability {
    /// Writes the file under its MIME type.
    async fn write_image(&self, file: &ImageFile) -> Result<(), CapabilityError>;

    async fn read_text(&self) -> Result<String, CapabilityError>;
}

#[async_trait]
pub trait ShareSheet: Capability {
    /// Whether the sheet would accept `file` as an attachment.
    fn can_share(&self, file: &ImageFile) -> bool;

    async fn share(&self, request: ShareRequest) -> Result<(), CapabilityError>;
}

/// Tab-scoped string storage.
pub trait SessionStorage: Capability {
    fn get_item(&self, key: &str) -> Result<Option<String>, CapabilityError>;

    fn set_item(&self, key: &str, value: String) -> Result<(), CapabilityError>;
}

#[async_trait]
pub trait Downloader: Send + Sync {
    async fn download(&self, file: &ImageFile) -> Result<(), CapabilityError>;
}

#[async_trait]
pub trait Navigator: Send + Sync {
    async fn push(&self, url: &str) -> Result<(), CapabilityError>;

    async fn back(&self) -> Result<(), CapabilityError>;
}

/// The mini-app host SDK surface.
#[async_trait]
pub trait MiniAppHost: Send + Sync {
    async fn ready(&self) -> Result<(), CapabilityError>;

    async fn is_in_mini_app(&self) -> Result<bool, CapabilityError>;

    async fn compose_cast(&self, embed: &ShareEmbed) -> Result<(), CapabilityError>;

    async fn open_url(&self, url: &str) -> Result<(), CapabilityError>;

    async fn add_mini_app(&self) -> Result<(), CapabilityError>;
}

/// Everything the current environment offers.
#[derive(Clone)]
pub struct HostCapabilities {
    pub clipboard: Arc<dyn Clipboard>,
    pub share: Arc<dyn ShareSheet>,
    pub storage: Arc<dyn SessionStorage>,
    pub downloader: Arc<dyn Downloader>,
    pub navigator: Arc<dyn Navigator>,
    pub host: Arc<dyn MiniAppHost>,
}

impl HostCapabilities {
    /// Capabilities of a plain process: no clipboard, no share sheet,
    /// in-memory storage, downloads written into `download_dir`.
    pub fn standalone(download_dir: impl Into<PathBuf>) -> Self {
        Self {
            clipboard: Arc::new(NoClipboard),
            share: Arc::new(NoShareSheet),
            storage: Arc::new(MemoryStorage::default()),
            downloader: Arc::new(DirectoryDownloader::new(download_dir)),
            navigator: Arc::new(HistoryNavigator::default()),
            host: Arc::new(StandaloneHost),
        }
    }

    pub fn is_available(&self, kind: CapabilityKind) -> bool {
        match kind {
            CapabilityKind::ClipboardImageWrite => self.clipboard.is_available(),
            CapabilityKind::NativeShare => self.share.is_available(),
            CapabilityKind::Storage => self.storage.is_available(),
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoClipboard;

impl Capability for NoClipboard {
    fn kind(&self) -> CapabilityKind {
        CapabilityKind::ClipboardImageWrite
    }

    fn is_available(&self) -> bool {
        false
    }
}

#[async_trait]
impl Clipboard for NoClipboard {
    async fn write_image(&self, _file: &ImageFile) -> Result<(), CapabilityError> {
        Err(CapabilityError::Unavailable(self.kind()))
    }

    async fn read_text(&self) -> Result<String, CapabilityError> {
        Err(CapabilityError::Unavailable(self.kind()))
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoShareSheet;

impl Capability for NoShareSheet {
    fn kind(&self) -> CapabilityKind {
        CapabilityKind::NativeShare
    }

    fn is_available(&self) -> bool {
        false
    }
}

#[async_trait]
impl ShareSheet for NoShareSheet {
    fn can_share(&self, _file: &ImageFile) -> bool {
        false
    }

    async fn share(&self, _request: ShareRequest) -> Result<(), CapabilityError> {
        Err(CapabilityError::Unavailable(self.kind()))
    }
}

/// Saves downloads as files in a directory, creating it on first use.
#[derive(Debug, Clone)]
pub struct DirectoryDownloader {
    dir: PathBuf,
}

impl DirectoryDownloader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, file: &ImageFile) -> PathBuf {
        self.dir.join(&file.name)
    }
}

#[async_trait]
impl Downloader for DirectoryDownloader {
    async fn download(&self, file: &ImageFile) -> Result<(), CapabilityError> {
        tokio::fs::create_dir_all(&self.dir).await?;
        let path = self.path_for(file);
        tokio::fs::write(&path, &file.bytes).await?;
        log::info!("saved {} ({} bytes)", path.display(), file.bytes.len());
        Ok(())
    }
}

/// Keeps visited URLs in memory.
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    entries: Mutex<Vec<String>>,
}

impl HistoryNavigator {
    pub fn current(&self) -> Option<String> {
        self.entries.lock().ok()?.last().cloned()
    }
}

#[async_trait]
impl Navigator for HistoryNavigator {
    async fn push(&self, url: &str) -> Result<(), CapabilityError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| CapabilityError::Failed("navigation history poisoned".into()))?;
        entries.push(url.to_string());
        Ok(())
    }

    async fn back(&self) -> Result<(), CapabilityError> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| CapabilityError::Failed("navigation history poisoned".into()))?;
        entries.pop();
        Ok(())
    }
}

/// Host stand-in for running outside any mini-app client.
#[derive(Debug, Default, Clone, Copy)]
pub struct StandaloneHost;

#[async_trait]
impl MiniAppHost for StandaloneHost {
    async fn ready(&self) -> Result<(), CapabilityError> {
        Ok(())
    }

    async fn is_in_mini_app(&self) -> Result<bool, CapabilityError> {
        Ok(false)
    }

    async fn compose_cast(&self, _embed: &ShareEmbed) -> Result<(), CapabilityError> {
        Err(CapabilityError::Failed("Open this app in a mini-app client to share.".into()))
    }

    async fn open_url(&self, _url: &str) -> Result<(), CapabilityError> {
        Err(CapabilityError::Failed("Open this app in a mini-app client to open links.".into()))
    }

    async fn add_mini_app(&self) -> Result<(), CapabilityError> {
        Err(CapabilityError::Failed("Open this app in a mini-app client to add it.".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standalone_reports_each_capability() {
        let dir = tempfile::tempdir().unwrap();
        let caps = HostCapabilities::standalone(dir.path());
        assert!(!caps.is_available(CapabilityKind::ClipboardImageWrite));
        assert!(!caps.is_available(CapabilityKind::NativeShare));
        assert!(caps.is_available(CapabilityKind::Storage));
    }

    #[tokio::test]
    async fn directory_downloader_creates_missing_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let downloader = DirectoryDownloader::new(dir.path().join("nested/generated"));
        let file = ImageFile::png("my-qr.png", vec![1, 2, 3]);

        downloader.download(&file).await.unwrap();

        let written = std::fs::read(downloader.path_for(&file)).unwrap();
        assert_eq!(written, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn history_navigator_tracks_push_and_back() {
        let nav = HistoryNavigator::default();
        nav.push("/").await.unwrap();
        nav.push("/save?id=x").await.unwrap();
        assert_eq!(nav.current().as_deref(), Some("/save?id=x"));
        nav.back().await.unwrap();
        assert_eq!(nav.current().as_deref(), Some("/"));
    }

    #[tokio::test]
    async fn unavailable_capabilities_fail_without_panicking() {
        let file = ImageFile::png("qr.png", vec![]);
        assert!(matches!(
            NoClipboard.write_image(&file).await,
            Err(CapabilityError::Unavailable(CapabilityKind::ClipboardImageWrite))
        ));
        assert!(!NoShareSheet.can_share(&file));
        assert!(StandaloneHost.compose_cast(&ShareEmbed::default()).await.is_err());
    }
}
