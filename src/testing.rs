//! Scriptable host capabilities for unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::capability::{
    Capability, CapabilityKind, Clipboard, Downloader, HistoryNavigator, HostCapabilities,
    ImageFile, MiniAppHost, ShareRequest, ShareSheet,
};
use crate::error::CapabilityError;
use crate::handoff::MemoryStorage;
use crate::share::ShareEmbed;

#[derive(Default)]
pub struct FakeClipboard {
    pub available: bool,
    pub refuse: bool,
    pub text: Option<String>,
    pub written: Mutex<Vec<ImageFile>>,
}

impl Capability for FakeClipboard {
    fn kind(&self) -> CapabilityKind {
        CapabilityKind::ClipboardImageWrite
    }

    fn is_available(&self) -> bool {
        self.available
    }
}

#[async_trait]
impl Clipboard for FakeClipboard {
    async fn write_image(&self, file: &ImageFile) -> Result<(), CapabilityError> {
        if self.refuse {
            return Err(CapabilityError::Denied("Document is not focused.".into()));
        }
        self.written.lock().unwrap().push(file.clone());
        Ok(())
    }

    async fn read_text(&self) -> Result<String, CapabilityError> {
        self.text
            .clone()
            .ok_or_else(|| CapabilityError::Denied("Read permission denied.".into()))
    }
}

#[derive(Default)]
pub struct FakeShareSheet {
    pub accepts_files: bool,
    pub refuse: bool,
    pub shared: Mutex<Vec<ShareRequest>>,
}

impl Capability for FakeShareSheet {
    fn kind(&self) -> CapabilityKind {
        CapabilityKind::NativeShare
    }

    fn is_available(&self) -> bool {
        self.accepts_files
    }
}

#[async_trait]
impl ShareSheet for FakeShareSheet {
    fn can_share(&self, _file: &ImageFile) -> bool {
        self.accepts_files
    }

    async fn share(&self, request: ShareRequest) -> Result<(), CapabilityError> {
        if self.refuse {
            return Err(CapabilityError::Failed("Share canceled".into()));
        }
        self.shared.lock().unwrap().push(request);
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeDownloader {
    pub downloaded: Mutex<Vec<ImageFile>>,
}

#[async_trait]
impl Downloader for FakeDownloader {
    async fn download(&self, file: &ImageFile) -> Result<(), CapabilityError> {
        self.downloaded.lock().unwrap().push(file.clone());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeHost {
    pub in_mini_app: Option<bool>,
    pub composed: Mutex<Vec<ShareEmbed>>,
    pub opened: Mutex<Vec<String>>,
    pub added: Mutex<u32>,
    pub ready_calls: Mutex<u32>,
}

#[async_trait]
impl MiniAppHost for FakeHost {
    async fn ready(&self) -> Result<(), CapabilityError> {
        *self.ready_calls.lock().unwrap() += 1;
        Ok(())
    }

    async fn is_in_mini_app(&self) -> Result<bool, CapabilityError> {
        self.in_mini_app
            .ok_or_else(|| CapabilityError::Failed("sdk context unavailable".into()))
    }

    async fn compose_cast(&self, embed: &ShareEmbed) -> Result<(), CapabilityError> {
        self.composed.lock().unwrap().push(embed.clone());
        Ok(())
    }

    async fn open_url(&self, url: &str) -> Result<(), CapabilityError> {
        self.opened.lock().unwrap().push(url.to_string());
        Ok(())
    }

    async fn add_mini_app(&self) -> Result<(), CapabilityError> {
        *self.added.lock().unwrap() += 1;
        Ok(())
    }
}

/// Handles to every fake so tests can inspect what happened.
pub struct Fakes {
    pub clipboard: Arc<FakeClipboard>,
    pub share: Arc<FakeShareSheet>,
    pub storage: Arc<MemoryStorage>,
    pub downloader: Arc<FakeDownloader>,
    pub navigator: Arc<HistoryNavigator>,
    pub host: Arc<FakeHost>,
}

impl Fakes {
    pub fn new(clipboard: FakeClipboard, share: FakeShareSheet, host: FakeHost) -> Self {
        Self {
            clipboard: Arc::new(clipboard),
            share: Arc::new(share),
            storage: Arc::new(MemoryStorage::default()),
            downloader: Arc::new(FakeDownloader::default()),
            navigator: Arc::new(HistoryNavigator::default()),
            host: Arc::new(host),
        }
    }

    pub fn capabilities(&self) -> HostCapabilities {
        HostCapabilities {
            clipboard: self.clipboard.clone(),
            share: self.share.clone(),
            storage: self.storage.clone(),
            downloader: self.downloader.clone(),
            navigator: self.navigator.clone(),
            host: self.host.clone(),
        }
    }
}
