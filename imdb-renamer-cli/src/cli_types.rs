//! CLI type definitions.

use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "imdb-renamer")]
#[command(about = "Rename movie folders to 'Title (Year) - IMDb- Rating'", long_about = None)]
pub(crate) struct Cli {
    /// Directory whose subfolders are renamed (defaults to the settings file, then the current directory)
    #[arg(short, long)]
    pub base_path: Option<PathBuf>,

    /// Show planned renames without executing
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Settings file to use instead of the default location
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Append the run log to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Number of folders processed concurrently
    #[arg(short, long)]
    pub workers: Option<usize>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["imdb-renamer"]).unwrap();
        assert!(cli.base_path.is_none());
        assert!(!cli.dry_run);
        assert!(cli.workers.is_none());
    }

    #[test]
    fn test_all_flags() {
        let cli = Cli::try_parse_from([
            "imdb-renamer",
            "--base-path",
            "/movies",
            "-n",
            "--config",
            "alt.toml",
            "--log-file",
            "run.log",
            "--workers",
            "3",
            "-v",
        ])
        .unwrap();
        assert_eq!(cli.base_path, Some(PathBuf::from("/movies")));
        assert!(cli.dry_run);
        assert_eq!(cli.config, Some(PathBuf::from("alt.toml")));
        assert_eq!(cli.log_file, Some(PathBuf::from("run.log")));
        assert_eq!(cli.workers, Some(3));
        assert!(cli.verbose);
    }

    #[test]
    fn test_quiet_and_verbose_conflict() {
        assert!(Cli::try_parse_from(["imdb-renamer", "--quiet", "--verbose"]).is_err());
    }

    #[test]
    fn test_workers_must_be_a_number() {
        assert!(Cli::try_parse_from(["imdb-renamer", "--workers", "many"]).is_err());
    }
}
