use std::ffi::OsString;

/// Which records the null appender touches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendMode {
    /// Every `DosStream.` record of the object.
    All,
    /// The first record with exactly this name.
    Named(OsString),
}

/// Run configuration, built by the CLI from its flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    /// Report corrupted records.
    pub check: bool,
    /// Rewrite corrupted records.
    pub fix: bool,
    /// Never write anything back.
    pub dry_run: bool,
    /// Dump record bytes before touching them.
    pub debug: bool,
    /// Report every classified, fixed or appended record.
    pub verbose: bool,
    pub recursive: bool,
    pub append: Option<AppendMode>,
}

impl Options {
    pub fn check() -> Self {
        Self {
            check: true,
            ..Self::default()
        }
    }

    pub fn fix() -> Self {
        Self {
            fix: true,
            ..Self::default()
        }
    }

    pub fn append(mode: AppendMode) -> Self {
        Self {
            append: Some(mode),
            ..Self::default()
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_append(mut self, mode: Option<AppendMode>) -> Self {
        self.append = mode;
        self
    }

    /// Whether the classifier and repairer run at all.
    pub fn wants_repair(&self) -> bool {
        self.check || self.fix
    }
}
