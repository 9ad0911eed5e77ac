#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    NotFound(String),

    #[error("unauthorized")]
    Unauthorized,

    #[error("{0}")]
    TransientIo(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Fields(#[from] validator::ValidationErrors),

    #[error("{0}")]
    Unknown(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Stable machine-readable name of the error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::NotFound(_) => "NotFound",
            Error::Unauthorized => "Unauthorized",
            Error::TransientIo(_) => "TransientIO",
            Error::Validation(_) | Error::Fields(_) => "Validation",
            Error::Unknown(_) => "Internal",
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::Fields(_))
    }
}

impl From<sqlx::Error> for Error {
    fn from(value: sqlx::Error) -> Self {
        Self::Unknown(value.into())
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::Unknown(value.into())
    }
}

#[macro_export]
macro_rules! not_found {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::NotFound(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::NotFound(format!($fmt, $($arg)*)))
    };
}

#[macro_export]
macro_rules! invalid {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::Validation(format!($msg)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::Validation(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(id: &str) -> Result<()> {
        if id.is_empty() {
            invalid!("id must not be empty");
        }
        not_found!("habit {} not found", id);
    }

    #[test]
    fn test_macros_produce_expected_kinds() {
        assert_eq!(lookup("").unwrap_err().kind(), "Validation");

        let err = lookup("01J0").unwrap_err();
        assert_eq!(err.kind(), "NotFound");
        assert_eq!(err.to_string(), "habit 01J0 not found");
    }
}
