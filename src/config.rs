use clap::Parser;
use std::path::PathBuf;

/// Media intelligence dashboard: sentiment, engagement, platform, media type
/// and location insights from a CSV of social-media mentions.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// CSV files to process in order. Without files an interactive menu starts.
    pub files: Vec<PathBuf>,

    /// Export aggregates as CSV and the full dashboard as JSON into this directory
    #[arg(short, long, env = "DASHBOARD_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Print the dashboard as JSON instead of Markdown
    #[arg(long)]
    pub json: bool,

    /// Maximum rows shown per table
    #[arg(long, env = "DASHBOARD_PREVIEW_ROWS", default_value_t = 10)]
    pub preview_rows: usize,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    pub files: Vec<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub json: bool,
    pub preview_rows: usize,
    pub log_level: &'static str,
}

impl Args {
    pub fn into_config(self) -> DashboardConfig {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "debug",
            _ => "trace",
        };
        DashboardConfig {
            files: self.files,
            output_dir: self.output_dir,
            json: self.json,
            preview_rows: self.preview_rows,
            log_level,
        }
    }
}

impl DashboardConfig {
    pub fn interactive(&self) -> bool {
        self.files.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_files_means_interactive() {
        let cfg = Args::try_parse_from(["media_insights"]).unwrap().into_config();
        assert!(cfg.interactive());
        assert_eq!(cfg.log_level, "warn");
    }

    #[test]
    fn parses_files_and_flags() {
        let cfg = Args::try_parse_from([
            "media_insights",
            "a.csv",
            "b.csv",
            "--json",
            "-vv",
            "--preview-rows",
            "3",
            "-o",
            "out",
        ])
        .unwrap()
        .into_config();
        assert_eq!(cfg.files.len(), 2);
        assert!(cfg.json);
        assert_eq!(cfg.preview_rows, 3);
        assert_eq!(cfg.output_dir, Some(PathBuf::from("out")));
        assert_eq!(cfg.log_level, "trace");
    }
}
