use std::path::PathBuf;

#[derive(Debug)]
pub enum CommandSummary {
    Build(BuildSummary),
    Resolve(ResolveSummary),
    Init(InitSummary),
}

/// A key used in source that no loaded locale translates.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MissingKey {
    pub key: String,
    pub source_id: String,
}

#[derive(Debug)]
pub struct BuildSummary {
    /// Locale codes in load order.
    pub locales: Vec<String>,
    pub source_files: usize,
    pub files_with_keys: usize,
    pub key_count: usize,
    /// Errors in strict mode, warnings otherwise.
    pub missing: Vec<MissingKey>,
    pub strict: bool,
    /// False when no config file was found and defaults were used.
    pub from_file: bool,
    /// Where the virtual module was written, if it was.
    pub out: Option<PathBuf>,
}

#[derive(Debug)]
pub struct ResolveSummary {
    pub key: String,
    pub locale: String,
    pub value: String,
    /// True when no message matched and the key came back unchanged.
    pub fell_back: bool,
}

#[derive(Debug)]
pub struct InitSummary {
    pub path: PathBuf,
    pub error: Option<String>,
}

/// Result of running i18n-bundler commands
#[derive(Debug)]
pub struct CommandResult {
    pub summary: CommandSummary,
    pub error_count: usize,
    pub warning_count: usize,
}

impl CommandResult {
    pub fn new(summary: CommandSummary) -> Self {
        let (error_count, warning_count) = match &summary {
            CommandSummary::Build(build) if build.strict => (build.missing.len(), 0),
            CommandSummary::Build(build) => (0, build.missing.len()),
            CommandSummary::Resolve(resolve) => (0, usize::from(resolve.fell_back)),
            CommandSummary::Init(init) => (usize::from(init.error.is_some()), 0),
        };

        Self {
            summary,
            error_count,
            warning_count,
        }
    }
}
