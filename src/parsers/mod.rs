pub mod version;

use nom::{
    error::{ErrorKind, ParseError},
    IResult,
};

type Result<'a, T> = IResult<&'a str, T, VersionParseError>;

/// Errors that can happen while reading a NIF version string.
/// Most errors are simply `NomError` but a few of them are specific for better error reporting.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum VersionParseError {
    #[error("malformed version string ({kind:?})")]
    NomError {
        kind: ErrorKind,
        other: Option<Box<VersionParseError>>,
    },
    /// Every dotted component is stored in a single byte of the packed version.
    #[error("version component {0} does not fit in a byte")]
    ComponentOutOfRange(u64),
    /// Versions have at most four components (`20.2.0.7`).
    #[error("version has more than four components")]
    TooManyComponents,
    /// Returned when the header line is neither a Gamebryo nor a NetImmerse header.
    #[error("not a NIF header line")]
    UnknownHeader,
    /// Returned when text is left after a complete version.
    #[error("unexpected trailing input '{0}'")]
    TrailingInput(String),
}

impl ParseError<&str> for VersionParseError {
    fn from_error_kind(_input: &str, kind: ErrorKind) -> Self {
        VersionParseError::NomError { kind, other: None }
    }

    fn append(_input: &str, kind: ErrorKind, other: Self) -> Self {
        VersionParseError::NomError {
            kind,
            other: Some(Box::new(other)),
        }
    }
}
