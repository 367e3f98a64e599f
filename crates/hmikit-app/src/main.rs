//! Main application entry point (headless).

use clap::Parser;
use hmikit_app::{App, AppError};
use hmikit_core::EditorConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hmikit")]
#[command(about = "Run a scripted HMI editor session and print the final frame as JSON")]
struct Cli {
    /// JSON editor configuration (defaults apply when omitted)
    config: Option<PathBuf>,
}

fn main() {
    env_logger::init();
    log::info!("Starting HMI Kit");

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        log::error!("{err}");
        eprintln!("hmikit: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config = match cli.config {
        Some(path) => {
            log::info!("loading config from {}", path.display());
            EditorConfig::load(path)?
        }
        None => EditorConfig::default(),
    };

    let mut app = App::new(config);
    let script = app.demo_script();
    app.run(script);
    println!("{}", app.report_json()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_optional_config() {
        let cli = Cli::try_parse_from(["hmikit"]).unwrap();
        assert!(cli.config.is_none());

        let cli = Cli::try_parse_from(["hmikit", "panel.json"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("panel.json")));
    }

    #[test]
    fn test_cli_rejects_extra_arguments() {
        assert!(Cli::try_parse_from(["hmikit", "panel.json", "extra"]).is_err());
    }

    #[test]
    fn test_cli_help_is_not_a_path() {
        let err = Cli::try_parse_from(["hmikit", "--help"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }
}
