//! Command line and environment configuration.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use url::Url;

use crate::editor::DEFAULT_LABEL;

#[derive(Debug, Parser)]
#[command(name = "qrstudio")]
#[command(about = "Turn any text or link into a clean QR code", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log filter, e.g. `info` or `qrstudio=debug`
    #[arg(long, global = true, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the QR image endpoint and the mini-app manifest
    Serve(ServeConfig),

    /// Render a QR code into a PNG file
    Render(RenderArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ServeConfig {
    /// Address to listen on
    #[arg(long, env = "QRSTUDIO_LISTEN", default_value = "127.0.0.1:3000")]
    pub listen: SocketAddr,

    /// Public URL of the app, used in the manifest and share links
    #[arg(long, env = "QRSTUDIO_APP_URL", default_value = "http://localhost:3000/")]
    pub app_url: Url,

    /// Serve this JSON file as the mini-app manifest instead of the generated one
    #[arg(long, env = "QRSTUDIO_MANIFEST")]
    pub manifest: Option<PathBuf>,

    /// App name shown by mini-app hosts
    #[arg(long, default_value = crate::share::APP_NAME)]
    pub app_name: String,
}

#[derive(Debug, Clone, Args)]
pub struct RenderArgs {
    /// Text or link to encode
    #[arg(value_name = "TEXT")]
    pub text: String,

    /// Label used for the file name
    #[arg(short, long, default_value = DEFAULT_LABEL)]
    pub label: String,

    /// Image size in pixels, clamped to 256..=2048
    #[arg(short, long, default_value_t = 960)]
    pub size: u32,

    /// Directory the PNG is written to
    #[arg(short, long, default_value = "generated")]
    pub out_dir: PathBuf,

    /// Also print the symbol to the terminal
    #[arg(long)]
    pub print: bool,
}
