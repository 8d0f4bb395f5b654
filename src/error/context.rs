//! Error context types for better error messages.

/// Filesystem operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IoOperation {
    CreateDir,
    Move,
    Copy,
    Delete,
    OpenLog,
}

impl std::fmt::Display for IoOperation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreateDir => write!(f, "create directory"),
            Self::Move => write!(f, "move"),
            Self::Copy => write!(f, "copy"),
            Self::Delete => write!(f, "delete"),
            Self::OpenLog => write!(f, "open log file"),
        }
    }
}
