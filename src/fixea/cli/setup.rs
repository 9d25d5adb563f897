use clap::Parser;
use fixea::config::{AppendMode, Options};
use std::ffi::OsString;
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

const EXIT_CODES: &str = "\
Exit codes:
  0   not corrupted, or fixed
  1   corrupted (or a write failed)
  64  usage error
  65  attributes could not be read or grown
  71  path could not be resolved, stat'ed or opened

If standard input is not a terminal, the path is read from its first line.";

#[derive(Parser, Debug)]
#[command(
    name = "fix_ea",
    bin_name = "fix_ea",
    version = get_version(),
    about = "Check and fix corrupted AFP (DosStream.*) extended attributes",
    long_about = None,
    after_help = EXIT_CODES,
    args_override_self = true
)]
pub struct Cli {
    /// Append a null byte to all extended attributes
    #[arg(short = 'a', overrides_with = "name")]
    pub all: bool,

    /// Check if AFP extended attributes are corrupted
    #[arg(short = 'c', overrides_with = "fix")]
    pub check: bool,

    /// Dry run (no changes are made)
    #[arg(short = 'C')]
    pub dry_run: bool,

    /// Debug mode
    #[arg(short = 'd')]
    pub debug: bool,

    /// Fix AFP extended attributes
    #[arg(short = 'f', overrides_with = "check")]
    pub fix: bool,

    /// Append a null byte to this extended attribute
    #[arg(short = 'n', value_name = "EA", overrides_with = "all")]
    pub name: Option<OsString>,

    /// Recursive
    #[arg(short = 'r')]
    pub recursive: bool,

    /// Verbose
    #[arg(short = 'v')]
    pub verbose: bool,

    /// File or directory to process
    pub path: Option<PathBuf>,
}

impl Cli {
    pub fn options(&self) -> Options {
        let append = match (&self.name, self.all) {
            (Some(name), _) => Some(AppendMode::Named(name.clone())),
            (None, true) => Some(AppendMode::All),
            (None, false) => None,
        };

        Options {
            check: self.check,
            fix: self.fix,
            dry_run: self.dry_run,
            debug: self.debug,
            verbose: self.verbose,
            recursive: self.recursive,
            append,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Options {
        let mut argv = vec!["fix_ea"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap().options()
    }

    #[test]
    fn flags_map_to_options() {
        let opts = parse(&["-c", "-C", "-d", "-r", "-v", "/tmp"]);
        assert!(opts.check && opts.dry_run && opts.debug && opts.recursive && opts.verbose);
        assert!(!opts.fix);
        assert!(opts.append.is_none());
    }

    #[test]
    fn later_check_or_fix_wins() {
        let opts = parse(&["-c", "-f", "/tmp"]);
        assert!(opts.fix && !opts.check);

        let opts = parse(&["-f", "-c", "/tmp"]);
        assert!(opts.check && !opts.fix);
    }

    #[test]
    fn later_append_selection_wins() {
        assert_eq!(
            parse(&["-n", "DosStream.x", "-a", "/tmp"]).append,
            Some(AppendMode::All)
        );
        assert_eq!(
            parse(&["-a", "-n", "DosStream.x", "/tmp"]).append,
            Some(AppendMode::Named(OsString::from("DosStream.x")))
        );
    }

    #[test]
    fn repeated_name_keeps_the_last_one() {
        assert_eq!(
            parse(&["-n", "DosStream.a", "-n", "DosStream.b", "/tmp"]).append,
            Some(AppendMode::Named(OsString::from("DosStream.b")))
        );
    }

    #[test]
    fn repeated_switches_are_accepted() {
        let opts = parse(&["-v", "-v", "-C", "-C", "-r", "-r", "/tmp"]);
        assert!(opts.verbose && opts.dry_run && opts.recursive);

        let opts = parse(&["-cc", "-ff", "/tmp"]);
        assert!(opts.fix && !opts.check);
    }

    #[test]
    fn combined_short_flags() {
        let opts = parse(&["-cv", "/tmp"]);
        assert!(opts.check && opts.verbose);
    }

    #[test]
    fn path_is_optional() {
        let cli = Cli::try_parse_from(["fix_ea", "-c"]).unwrap();
        assert!(cli.path.is_none());
    }

    #[test]
    fn unknown_flag_is_rejected() {
        assert!(Cli::try_parse_from(["fix_ea", "-x", "/tmp"]).is_err());
    }
}
