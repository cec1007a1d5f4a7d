use std::path::PathBuf;

/// Spreadsheet opened at startup when no path is given.
pub const DEFAULT_SOURCE: &str = "corporativo.xlsx";

/// Startup configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub source_path: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source_path: PathBuf::from(DEFAULT_SOURCE),
        }
    }
}

impl Settings {
    /// The first positional argument, if any, replaces the default source.
    pub fn from_args<I>(args: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        match args.into_iter().nth(1) {
            Some(path) if !path.trim().is_empty() => Self {
                source_path: PathBuf::from(path),
            },
            _ => Self::default(),
        }
    }
}
