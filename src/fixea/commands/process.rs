use crate::commands::{append, classify, read, repair, ObjectContext, Reporter};
use crate::config::Options;
use crate::error::FixEaError;
use crate::model::{AttributeSet, Outcome};
use crate::store::{AttrHandle, AttrHost};
use std::path::Path;
use tracing::{trace, warn};

/// One opened object and the attributes read from it.
///
/// Built as soon as the object is open. Dropping the cycle releases the
/// handle and the set, so every exit from [`run`] after a successful open
/// goes through it.
struct Cycle<'a, A: AttrHandle> {
    path: &'a Path,
    handle: A,
    set: AttributeSet,
}

impl<A: AttrHandle> Cycle<'_, A> {
    fn process(&mut self, options: &Options, reporter: &mut dyn Reporter) -> Outcome {
        let mut ctx = ObjectContext::new(self.path, options, reporter);
        let mut outcome = Outcome::OK;

        if options.wants_repair() {
            let corrupted = classify::run(&self.set);
            trace!(path = %self.path.display(), selected = corrupted.len(), "classified");
            outcome |= repair::run(&self.handle, &mut self.set, &corrupted, &mut ctx);
        }

        if let Some(mode) = &options.append {
            let to_append = append::select(&self.set, mode);
            trace!(path = %self.path.display(), selected = to_append.len(), "selected for append");
            outcome |= append::run(&self.handle, &mut self.set, &to_append, &mut ctx);
        }

        outcome
    }
}

impl<A: AttrHandle> Drop for Cycle<'_, A> {
    fn drop(&mut self) {
        trace!(path = %self.path.display(), records = self.set.len(), "released");
    }
}

/// Open, read, repair and/or append, then release one filesystem object.
pub fn run<H: AttrHost>(
    host: &H,
    path: &Path,
    options: &Options,
    reporter: &mut dyn Reporter,
) -> Outcome {
    let handle = match host.open(path) {
        Ok(handle) => handle,
        Err(source) => {
            let err = FixEaError::Unavailable {
                path: path.to_path_buf(),
                source,
            };
            warn!("{err}");
            return Outcome::OBJECT_UNAVAILABLE;
        }
    };

    let mut cycle = Cycle {
        path,
        handle,
        set: AttributeSet::new(),
    };

    cycle.set = match read::run(&cycle.handle, path) {
        Ok(set) => set,
        Err(err) => {
            warn!("{err}");
            return Outcome::READ_FAILED;
        }
    };
    trace!(path = %path.display(), records = cycle.set.len(), "read");

    cycle.process(options, reporter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Event;
    use crate::config::AppendMode;
    use crate::store::memory::fixtures::{HostFixture, CORRUPTED_RSRC, REPAIRED_RSRC};
    use std::path::PathBuf;

    fn process(fx: &HostFixture, path: &str, options: &Options) -> (Outcome, Vec<(PathBuf, Event)>) {
        let mut events: Vec<(PathBuf, Event)> = Vec::new();
        let outcome = run(&fx.host, Path::new(path), options, &mut events);
        (outcome, events)
    }

    #[test]
    fn check_scenario() {
        let fx = HostFixture::new().with_corrupted("/f");
        let (outcome, events) = process(&fx, "/f", &Options::check().with_verbose(true));
        assert_eq!(outcome.exit_code(), 1);
        assert_eq!(events.len(), 1);
        assert_eq!(fx.host.open_handles(), 0);
    }

    #[test]
    fn fix_scenario() {
        let fx = HostFixture::new().with_corrupted("/f");
        let (outcome, _) = process(&fx, "/f", &Options::fix());
        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(fx.host.attr("/f", "DosStream.rsrc").unwrap(), REPAIRED_RSRC);
    }

    #[test]
    fn dry_run_fix_scenario() {
        let fx = HostFixture::new().with_corrupted("/f");
        let (outcome, _) = process(&fx, "/f", &Options::fix().with_dry_run(true));
        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(fx.host.attr("/f", "DosStream.rsrc").unwrap(), CORRUPTED_RSRC);
    }

    #[test]
    fn dry_run_check_and_append_never_write() {
        let fx = HostFixture::new().with_corrupted("/f");
        let options = Options {
            check: true,
            fix: true,
            dry_run: true,
            append: Some(AppendMode::All),
            ..Options::default()
        };
        let (outcome, _) = process(&fx, "/f", &options);
        assert_eq!(outcome, Outcome::CORRUPTED);
        assert_eq!(fx.host.write_count(), 0);
        assert_eq!(fx.host.attr("/f", "DosStream.rsrc").unwrap(), CORRUPTED_RSRC);
    }

    #[test]
    fn append_scenario() {
        let fx = HostFixture::new().with_attr("/f", "DosStream.info", b"hello");
        let (outcome, _) = process(&fx, "/f", &Options::append(AppendMode::All));
        assert!(outcome.is_ok());
        let value = fx.host.attr("/f", "DosStream.info").unwrap();
        assert_eq!(value, b"hello\0");
        assert_eq!(value.len(), 6);
    }

    #[test]
    fn repair_and_append_share_one_read() {
        let fx = HostFixture::new().with_corrupted("/f");
        let options = Options::fix().with_append(Some(AppendMode::All));
        let (outcome, _) = process(&fx, "/f", &options);

        assert!(outcome.is_ok());
        assert_eq!(
            fx.host.attr("/f", "DosStream.rsrc").unwrap(),
            [0x41, 0x46, 0x50, 0x01, 0x02, 0x00]
        );
        assert_eq!(fx.host.opened().len(), 1);
        assert_eq!(fx.host.write_count(), 2);
    }

    #[test]
    fn outcomes_of_both_stages_are_combined() {
        let fx = HostFixture::new()
            .with_corrupted("/f")
            .with_attr("/f", "DosStream.info", b"x");
        fx.host.fail_set("/f", "DosStream.info");
        let options = Options::check().with_append(Some(AppendMode::All));

        let (outcome, _) = process(&fx, "/f", &options);
        assert_eq!(outcome, Outcome::CORRUPTED | Outcome::WRITE_FAILED);
    }

    #[test]
    fn unavailable_object() {
        let fx = HostFixture::new().with_corrupted("/f");
        fx.host.fail_open("/f");
        let (outcome, events) = process(&fx, "/f", &Options::check().with_verbose(true));
        assert_eq!(outcome, Outcome::OBJECT_UNAVAILABLE);
        assert!(events.is_empty());
        assert_eq!(fx.host.open_handles(), 0);
    }

    #[test]
    fn read_failure_still_releases_handle() {
        let fx = HostFixture::new().with_corrupted("/f");
        fx.host.fail_listing_fatally("/f");
        let (outcome, _) = process(&fx, "/f", &Options::fix());
        assert_eq!(outcome, Outcome::READ_FAILED);
        assert_eq!(fx.host.opened().len(), 1);
        assert_eq!(fx.host.open_handles(), 0);
        assert_eq!(fx.host.write_count(), 0);
    }

    #[test]
    fn nothing_requested_reads_and_releases() {
        let fx = HostFixture::new().with_corrupted("/f");
        let (outcome, events) = process(&fx, "/f", &Options::default());
        assert!(outcome.is_ok());
        assert!(events.is_empty());
        assert_eq!(fx.host.open_handles(), 0);
    }
}
