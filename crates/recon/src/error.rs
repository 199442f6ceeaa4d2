use std::fmt;

#[derive(Debug)]
pub enum ReconError {
    /// A canonical declaration line could not be parsed. Aborts the run.
    StructuralParse {
        source: String,
        line: usize,
        text: String,
        reason: String,
    },
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (blank name, empty tier, etc.).
    ConfigValidation(String),
    /// IO error (file read, etc.).
    Io(String),
}

impl ReconError {
    pub(crate) fn structural(source: &str, line: usize, text: &str, reason: impl Into<String>) -> Self {
        Self::StructuralParse {
            source: source.to_string(),
            line,
            text: text.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StructuralParse { source, line, text, reason } => {
                write!(f, "{source}: invalid line N{line}: \"{text}\" ({reason})")
            }
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}
