//! Lectern - Entry Point

use clap::Parser;
use lectern::model::AppError;
use std::path::PathBuf;
use tracing::info;

/// Lectern - terminal reader with auto-hiding controls
#[derive(Parser, Debug)]
#[command(name = "lectern")]
#[command(version)]
#[command(about = "Terminal scripture reader whose controls hide while you read")]
pub struct Args {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Keep the reader controls visible at all times
    #[arg(long)]
    pub always_show: bool,

    /// Reduce motion (keeps the controls visible)
    #[arg(long)]
    pub reduce_motion: bool,

    /// Write tracing output to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

fn main() -> Result<(), AppError> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        let config_file = lectern::config::load_config_with_precedence(args.config.clone())?;
        let merged = lectern::config::merge_config(config_file);
        let with_env = lectern::config::apply_env_overrides(merged);

        // Flags only override when explicitly set
        let always_show_override = args.always_show.then_some(true);
        let reduce_motion_override = args.reduce_motion.then_some(true);

        lectern::config::apply_cli_overrides(
            with_env,
            always_show_override,
            reduce_motion_override,
            args.log_file.clone(),
        )
        .validate()?
    };

    lectern::logging::init(&config.log_file_path)?;

    info!(config = ?config, "Configuration loaded and resolved");

    lectern::view::run(&config)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_help_does_not_error() {
        let result = Args::try_parse_from(["lectern", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_version_does_not_error() {
        let result = Args::try_parse_from(["lectern", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_no_args_defaults() {
        let args = Args::parse_from(["lectern"]);
        assert_eq!(args.config, None);
        assert!(!args.always_show);
        assert!(!args.reduce_motion);
        assert_eq!(args.log_file, None);
    }

    #[test]
    fn test_config_path() {
        let args = Args::parse_from(["lectern", "--config", "/custom/config.toml"]);
        assert_eq!(args.config, Some(PathBuf::from("/custom/config.toml")));
    }

    #[test]
    fn test_combined_flags() {
        let args = Args::parse_from([
            "lectern",
            "--always-show",
            "--reduce-motion",
            "--log-file",
            "/tmp/lectern.log",
        ]);
        assert!(args.always_show);
        assert!(args.reduce_motion);
        assert_eq!(args.log_file, Some(PathBuf::from("/tmp/lectern.log")));
    }

    #[test]
    fn test_unknown_flag_rejected() {
        let result = Args::try_parse_from(["lectern", "--follow"]);
        assert!(result.is_err());
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::UnknownArgument
        );
    }

    #[test]
    fn test_cli_flags_win_over_config_file() {
        use lectern::config::{apply_cli_overrides, merge_config, ConfigFile};

        let config_file = ConfigFile {
            always_show_controls: Some(false),
            reduce_motion: Some(false),
            ..Default::default()
        };

        let merged = merge_config(Some(config_file));
        assert!(!merged.always_show_controls);

        let with_cli = apply_cli_overrides(merged, Some(true), Some(true), None);
        assert!(with_cli.always_show_controls);
        assert!(with_cli.reduce_motion);
        assert!(with_cli.preferences().accessibility.forces_visible());
    }
}
