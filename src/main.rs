use std::process::ExitCode;

use clap::Parser;
use qrstudio::commands::render_to_dir;
use qrstudio::config::{Cli, Command};
use qrstudio::export::ExportOutcome;
use qrstudio::server;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .parse_filters(&cli.log_level)
        .init();

    match cli.command {
        Command::Serve(config) => {
            if let Err(err) = server::run(config).await {
                log::error!("server error: {}", err);
                return ExitCode::FAILURE;
            }
        }
        Command::Render(args) => match render_to_dir(&args).await {
            Ok(ExportOutcome::Downloaded { file_name }) => {
                println!("{}", args.out_dir.join(file_name).display());
            }
            Ok(other) => log::info!("exported: {:?}", other),
            Err(err) => {
                log::error!("{}", err);
                return ExitCode::FAILURE;
            }
        },
    }

    ExitCode::SUCCESS
}
