use std::path::PathBuf;

pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Error taxonomy shared by the library and the CLI exit-code mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisErrorCategory {
    Configuration,
    IoSystem,
    Parse,
    Schema,
    Computation,
}

impl AnalysisErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Configuration | Self::Parse => 2,
            Self::IoSystem => 3,
            Self::Schema | Self::Computation => 4,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("configuration: {0}")]
    Config(String),

    #[error("i/o failure on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse error at {location}: {message}")]
    Parse { location: String, message: String },

    #[error("unknown histogram '{0}'")]
    UnknownHistogram(String),

    #[error("histogram shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("computation: {0}")]
    Computation(String),
}

impl AnalysisError {
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn parse(location: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            location: location.into(),
            message: message.into(),
        }
    }

    pub fn computation(message: impl Into<String>) -> Self {
        Self::Computation(message.into())
    }

    pub const fn category(&self) -> AnalysisErrorCategory {
        match self {
            Self::Config(_) => AnalysisErrorCategory::Configuration,
            Self::Io { .. } => AnalysisErrorCategory::IoSystem,
            Self::Parse { .. } => AnalysisErrorCategory::Parse,
            Self::UnknownHistogram(_) | Self::ShapeMismatch(_) => AnalysisErrorCategory::Schema,
            Self::Computation(_) => AnalysisErrorCategory::Computation,
        }
    }

    pub const fn exit_code(&self) -> i32 {
        self.category().exit_code()
    }
}
