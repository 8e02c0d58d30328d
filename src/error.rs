use itertools::Itertools;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Reference map is not available or empty. Please load a project first.")]
    CatalogUnavailable,

    #[error("Error parsing the input SQL query: {message} at byte {offset}")]
    Parse { message: String, offset: usize },

    #[error(
        "The following tables were not found in the loaded dbt project: {}",
        .0.iter().join(", ")
    )]
    UnresolvedReferences(Vec<String>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Project walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("YAML error in {path}: {source}")]
    Yaml {
        path: String,
        source: serde_yaml::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Coarse classification of an [`Error`], stable for callers that branch on
/// the failure without matching payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ErrorKind {
    CatalogUnavailable,
    ParseFailure,
    UnresolvedReferences,
    Io,
    Config,
}

impl Error {
    pub fn parse(message: impl Into<String>, offset: usize) -> Self {
        Error::Parse {
            message: message.into(),
            offset,
        }
    }

    /// Unmatched names are reported sorted and de-duplicated.
    pub fn unresolved(names: impl IntoIterator<Item = String>) -> Self {
        Error::UnresolvedReferences(names.into_iter().sorted().dedup().collect())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::CatalogUnavailable => ErrorKind::CatalogUnavailable,
            Error::Parse { .. } => ErrorKind::ParseFailure,
            Error::UnresolvedReferences(_) => ErrorKind::UnresolvedReferences,
            Error::Io(_) | Error::Walk(_) | Error::Yaml { .. } => ErrorKind::Io,
            Error::Config(_) => ErrorKind::Config,
        }
    }
}

impl From<confique::Error> for Error {
    fn from(value: confique::Error) -> Self {
        Error::Config(value.to_string())
    }
}

pub type Result<T = ()> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_message_lists_sorted_names() {
        let err = Error::unresolved(["zeta".to_string(), "alpha".to_string(), "zeta".to_string()]);
        assert_eq!(
            err.to_string(),
            "The following tables were not found in the loaded dbt project: alpha, zeta"
        );
        assert_eq!(err.kind(), ErrorKind::UnresolvedReferences);
    }

    #[test]
    fn parse_error_carries_offset() {
        let err = Error::parse("unterminated string literal", 7);
        assert_eq!(err.kind(), ErrorKind::ParseFailure);
        assert!(err.to_string().contains("at byte 7"));
    }
}
