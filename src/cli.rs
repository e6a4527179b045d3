//! Command-line interface definitions and parsing
//!
//! Options come first, then the root directory, then the criteria. Criteria
//! use single-dash words, so everything after the root is handed to the
//! criteria parser untouched:
//!
//! ```text
//! vidsift [OPTIONS] <ROOT> [CRITERIA]...
//! vidsift -t 8 --filelist /media/films -size gte 700:mb -a -height gte 1080
//! vidsift /media -- -container mkv -o -container mp4
//! ```
//!
//! # Examples
//!
//! ```
//! use vidsift::cli::Cli;
//!
//! let cli = Cli::parse_from_args(["vidsift", "/media", "--", "-size", "gte", "100:mb"]).unwrap();
//! assert_eq!(cli.criteria, vec!["-size", "gte", "100:mb"]);
//! ```

use clap::{ArgAction, Parser};
use std::path::PathBuf;

use crate::config::VidsiftConfig;
use crate::output::resolve_filelist_path;

const CRITERIA_HELP: &str = "\
Criteria:
  -path <text>            directory contains text
  -filename <text>        file name contains text
  -container <ext>        extension equals ext
  -duration [op] <n:unit> sec | min | hr
  -size [op] <n:unit>     b | kb | mb | gb (binary multiples)
  -bitrate [op] <n:unit>  b | kb | mb | gb (kb = probe kbps)
  -codec_name <name>      e.g. h264, hevc
  -codec_tag <tag>        e.g. avc1
  -pix_fmt <fmt>          e.g. yuv420p
  -aspect <ratio>         display aspect ratio, e.g. 16:9
  -width [op] <n>
  -height [op] <n>
  -framerate [op] <n>
  -orientation <o>        landscape | portrait | square

Operators: eq (default, within 1%) gt gte lt lte, or = > >= < <=
Join criteria with -a/-and or -o/-or; they are applied left to right.";

/// Command-line arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "vidsift")]
#[command(about = "Find video files by duration, size, resolution, codec and more", long_about = None)]
#[command(version)]
#[command(after_help = CRITERIA_HELP)]
pub struct Cli {
    /// Directory to search recursively
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// Search criteria (see below); matches everything when empty
    #[arg(
        value_name = "CRITERIA",
        num_args = 0..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    pub criteria: Vec<String>,

    /// Number of concurrent probes (defaults to the number of CPUs)
    #[arg(short = 't', long = "threads", value_name = "N")]
    pub threads: Option<usize>,

    /// Also write matches to a file list (default /tmp/video-filelist.txt)
    #[arg(
        long = "filelist",
        value_name = "PATH",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = ""
    )]
    pub filelist: Option<String>,

    /// Append to the file list instead of replacing it
    #[arg(long = "append", requires = "filelist")]
    pub append: bool,

    /// Use this config file instead of the default one
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Probe program to run
    #[arg(long = "ffprobe", value_name = "PROGRAM")]
    pub ffprobe: Option<String>,

    /// Also probe partial downloads (.part, .crdownload, ...)
    #[arg(long = "include-partial")]
    pub include_partial: bool,

    /// Follow symbolic links while walking
    #[arg(long = "follow-links")]
    pub follow_links: bool,

    /// Only print matching paths
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,

    /// More diagnostics on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Parse command line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parse from an explicit argument list
    ///
    /// # Errors
    ///
    /// Returns `clap::Error` for invalid arguments.
    pub fn parse_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::try_parse_from(args)
    }

    /// Default tracing filter for the chosen verbosity. A quiet config
    /// silences warnings too, unless `-v` asks for more.
    #[must_use]
    pub const fn log_filter(&self, config: &VidsiftConfig) -> &'static str {
        if self.quiet || (config.quiet && self.verbose == 0) {
            return "vidsift=error";
        }
        match self.verbose {
            0 => "vidsift=warn",
            1 => "vidsift=info",
            2 => "vidsift=debug",
            _ => "vidsift=trace",
        }
    }

    /// Overlay command-line settings on a loaded configuration
    pub fn apply_to(&self, config: &mut VidsiftConfig) {
        if let Some(threads) = self.threads {
            config.threads = Some(threads);
        }
        if let Some(ffprobe) = &self.ffprobe {
            config.ffprobe.clone_from(ffprobe);
        }
        config.quiet |= self.quiet;
        config.include_partial |= self.include_partial;
        config.follow_links |= self.follow_links;
    }

    /// Resolved file list path, if `--filelist` was given
    #[must_use]
    pub fn filelist_path(&self, config: &VidsiftConfig) -> Option<PathBuf> {
        self.filelist.as_deref().map(|value| {
            resolve_filelist_path(Some(value), &config.filelist_dir, &config.filelist_name)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::parse_from_args(args.iter().copied()).unwrap()
    }

    #[test]
    fn test_root_only() {
        let cli = parse(&["vidsift", "/media"]);
        assert_eq!(cli.root, PathBuf::from("/media"));
        assert!(cli.criteria.is_empty());
        assert!(cli.filelist.is_none());
    }

    #[test]
    fn test_criteria_after_double_dash() {
        let cli = parse(&["vidsift", "-t", "4", "/media", "--", "-size", "gte", "100:mb", "-o", "-container", "mkv"]);
        assert_eq!(cli.threads, Some(4));
        assert_eq!(cli.criteria, vec!["-size", "gte", "100:mb", "-o", "-container", "mkv"]);
    }

    #[test]
    fn test_criteria_without_double_dash() {
        let cli = parse(&["vidsift", "/media", "-size", "gte", "100:mb"]);
        assert_eq!(cli.criteria, vec!["-size", "gte", "100:mb"]);
    }

    #[test]
    fn test_filelist_forms() {
        let cli = parse(&["vidsift", "--filelist", "/media"]);
        assert_eq!(cli.filelist.as_deref(), Some(""));
        assert_eq!(cli.root, PathBuf::from("/media"));

        let cli = parse(&["vidsift", "--filelist=/out/list.txt", "--append", "/media"]);
        assert_eq!(cli.filelist.as_deref(), Some("/out/list.txt"));
        assert!(cli.append);

        let config = VidsiftConfig::default();
        assert_eq!(
            cli.filelist_path(&config),
            Some(PathBuf::from("/out/list.txt"))
        );
        let cli = parse(&["vidsift", "--filelist", "/media"]);
        assert_eq!(
            cli.filelist_path(&config),
            Some(PathBuf::from("/tmp/video-filelist.txt"))
        );
    }

    #[test]
    fn test_append_requires_filelist() {
        assert!(Cli::parse_from_args(["vidsift", "--append", "/media"]).is_err());
    }

    #[test]
    fn test_missing_root_is_an_error() {
        assert!(Cli::parse_from_args(["vidsift"]).is_err());
    }

    #[test]
    fn test_log_filter() {
        let config = VidsiftConfig::default();
        assert_eq!(parse(&["vidsift", "/m"]).log_filter(&config), "vidsift=warn");
        assert_eq!(parse(&["vidsift", "-vv", "/m"]).log_filter(&config), "vidsift=debug");
        assert_eq!(parse(&["vidsift", "-q", "/m"]).log_filter(&config), "vidsift=error");
    }

    #[test]
    fn test_quiet_config_lowers_log_filter() {
        let config = VidsiftConfig {
            quiet: true,
            ..VidsiftConfig::default()
        };
        assert_eq!(parse(&["vidsift", "/m"]).log_filter(&config), "vidsift=error");
        assert_eq!(parse(&["vidsift", "-v", "/m"]).log_filter(&config), "vidsift=info");
    }

    #[test]
    fn test_apply_to_config() {
        let mut config = VidsiftConfig {
            threads: Some(2),
            ..VidsiftConfig::default()
        };
        parse(&["vidsift", "--ffprobe", "/opt/ffprobe", "--include-partial", "/m"]).apply_to(&mut config);
        assert_eq!(config.threads, Some(2));
        assert_eq!(config.ffprobe, "/opt/ffprobe");
        assert!(config.include_partial);

        parse(&["vidsift", "-t", "6", "/m"]).apply_to(&mut config);
        assert_eq!(config.threads, Some(6));
    }
}
