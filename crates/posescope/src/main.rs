//! Command-line entry point.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use posescope::{init_logging, PoseViewer, Result, ViewerOptions};

/// Show a sequence of 3D poses stored as a (frames, joints, 3) .npy file.
#[derive(Debug, Parser)]
#[command(name = "posescope", version, about)]
struct Cli {
    /// Pose file to open. Files can also be dropped on the window.
    path: Option<PathBuf>,

    /// JSON file with viewer options.
    #[arg(long, value_name = "FILE")]
    options: Option<PathBuf>,
}

fn run(cli: Cli) -> Result<()> {
    let options = match &cli.options {
        Some(path) => ViewerOptions::from_json_file(path)?,
        None => ViewerOptions::default(),
    };

    // Load before the event loop starts so the slider range is known up front
    let mut viewer = PoseViewer::new(options);
    if let Some(path) = &cli.path {
        viewer.load(path)?;
    }

    posescope::show(viewer)
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("posescope: {e}");
            ExitCode::FAILURE
        }
    }
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
    fn test_cli_arguments() {
        let cli = Cli::try_parse_from(["posescope", "walk.npy", "--options", "view.json"]).unwrap();
        assert_eq!(cli.path, Some(PathBuf::from("walk.npy")));
        assert_eq!(cli.options, Some(PathBuf::from("view.json")));

        let cli = Cli::try_parse_from(["posescope"]).unwrap();
        assert!(cli.path.is_none());
    }

    #[test]
    fn test_missing_file_fails_before_window() {
        let cli = Cli::try_parse_from(["posescope", "/nonexistent/poses.npy"]).unwrap();
        let err = run(cli).unwrap_err();
        assert!(matches!(err, posescope::PosescopeError::NotFound(_)));
    }
}
