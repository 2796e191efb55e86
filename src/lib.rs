//! # qrstudio
//!
//! Turn any text or link into a clean QR code, and get that image to the user
//! whatever the host environment allows.
//!
//! `qrstudio` renders QR symbols (error correction level M) into PNG images
//! and models the small app around them: an editor with live density
//! validation, an export chain that tries the clipboard, then the native share
//! sheet, then a save screen, and a session-scoped hand-off store that passes
//! images between the two screens. It also serves the images over HTTP for
//! mini-app hosts such as Farcaster and Base.
//!
//! ## Features
//!
//! - Render any non-empty text as a PNG of an exact pixel size.
//! - Export with ordered fallbacks: clipboard → share sheet → save view.
//! - Hand images to the save view through injectable session storage.
//! - Serve `GET /api/qr` and the mini-app manifest with axum.
//! - Write PNGs to a directory from the command line.
//!
//! ## Example
//!
//! Render a PNG in memory:
//!
//! ```rust
//! use qrstudio::render::{render_png, QrRequest};
//!
//! let request = QrRequest::new("https://base.org", 300).unwrap();
//! let png = render_png(&request).unwrap();
//! assert_eq!(&png[1..4], b"PNG");
//! ```
//!
//! Export through the standalone capabilities (no clipboard, no share sheet,
//! downloads written to a directory):
//!
//! ```rust,no_run
//! use qrstudio::capability::HostCapabilities;
//! use qrstudio::export::{ExportIntent, ExportResolver};
//! use qrstudio::render::{render, QrRequest};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let resolver = ExportResolver::new(HostCapabilities::standalone("generated"));
//! let image = render(&QrRequest::new("gm", 280)?)?;
//! resolver.export_image(&image, "My QR", &ExportIntent::Download).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Modules
//!
//! - [`render`]: QR rasterizing and PNG encoding.
//! - [`export`]: the export chain.
//! - [`handoff`]: the save-view hand-off store.
//! - [`editor`] and [`save_view`]: the two screens.
//! - [`server`]: the HTTP endpoints.

pub mod capability;
pub mod commands;
pub mod config;
pub mod data_url;
pub mod editor;
pub mod error;
pub mod export;
pub mod handoff;
pub mod params;
pub mod render;
pub mod route;
pub mod save_view;
pub mod server;
pub mod share;
pub mod toast;

#[cfg(test)]
mod testing;
