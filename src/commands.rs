//! What the binary's subcommands do.

use crate::capability::HostCapabilities;
use crate::config::RenderArgs;
use crate::error::ExportError;
use crate::export::{ExportIntent, ExportOutcome, ExportResolver};
use crate::params::ENDPOINT_SIZE;
use crate::render::{render, to_terminal_string, QrRequest, ENDPOINT_MARGIN};

/// Renders `args.text` and downloads it into `args.out_dir` through the
/// standalone capabilities.
pub async fn render_to_dir(args: &RenderArgs) -> Result<ExportOutcome, ExportError> {
    let size = ENDPOINT_SIZE.clamp(args.size);
    let request = QrRequest::new(args.text.as_str(), size)?.with_margin(ENDPOINT_MARGIN);
    let image = render(&request)?;

    if args.print {
        print!("{}", to_terminal_string(request.payload())?);
    }

    let resolver = ExportResolver::new(HostCapabilities::standalone(&args.out_dir));
    resolver
        .export_image(&image, &args.label, &ExportIntent::Download)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RenderError;

    fn args(text: &str, dir: &std::path::Path) -> RenderArgs {
        RenderArgs {
            text: text.to_string(),
            label: "Base Meetup".to_string(),
            size: 100,
            out_dir: dir.to_path_buf(),
            print: false,
        }
    }

    #[tokio::test]
    async fn writes_png_named_after_label() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = render_to_dir(&args("https://base.org", dir.path())).await.unwrap();

        assert_eq!(
            outcome,
            ExportOutcome::Downloaded {
                file_name: "base-meetup.png".into()
            }
        );
        let png = std::fs::read(dir.path().join("base-meetup.png")).unwrap();
        let img = image::load_from_memory(&png).unwrap();
        assert_eq!((img.width(), img.height()), (256, 256));
    }

    #[tokio::test]
    async fn blank_text_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = render_to_dir(&args("  ", dir.path())).await.unwrap_err();
        assert!(matches!(err, ExportError::Render(RenderError::EmptyPayload)));
    }
}
