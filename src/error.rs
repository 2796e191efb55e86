//! Error types shared across the crate.
//!
//! Every capability call is fallible. Errors are values that either advance an
//! export chain to its next step or end up as a one-line, human-readable
//! message in the UI model; none of them abort the process.

use thiserror::Error;

use crate::capability::CapabilityKind;

/// Failure to turn a payload into a PNG.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The payload was empty after trimming.
    #[error("Nothing to encode yet.")]
    EmptyPayload,

    /// The payload does not fit in any QR version at error correction level M.
    #[error("Content is too long for a QR code: {0}")]
    Encode(#[from] qrcode::types::QrError),

    /// PNG encoding of the rasterized symbol failed.
    #[error("Could not create image.")]
    Png(#[from] image::ImageError),
}

/// Failure to parse a `data:image/png;base64,...` URL.
#[derive(Debug, Error)]
pub enum DataUrlError {
    #[error("not a PNG data URL")]
    NotPng,

    #[error("could not decode image data: {0}")]
    Decode(#[from] base64::DecodeError),
}

/// A host capability was missing, refused, or failed mid-call.
#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error("{0} is not available in this environment")]
    Unavailable(CapabilityKind),

    #[error("{0}")]
    Denied(String),

    #[error("{0}")]
    Failed(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Failure while storing or recovering a hand-off entry.
#[derive(Debug, Error)]
pub enum HandoffError {
    #[error("Missing image id.")]
    MissingId,

    #[error("Image not found. Go back and generate again.")]
    NotFound(String),

    #[error("Storage blocked in this environment.")]
    Storage(#[source] CapabilityError),

    #[error("Could not read image.")]
    Corrupt(#[from] DataUrlError),

    #[error("Could not open save view.")]
    Navigation(#[source] CapabilityError),
}

/// Terminal failure of an export action, surfaced to the user as-is.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No export method is available here.")]
    NoSteps,

    #[error(transparent)]
    Capability(#[from] CapabilityError),

    #[error("Could not open save view.")]
    SaveView(#[source] HandoffError),

    #[error(transparent)]
    Render(#[from] RenderError),
}
