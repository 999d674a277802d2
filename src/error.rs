use {
    crate::constants::*,
    http::status::StatusCode,
    scratchstack_errors::ServiceError,
    std::{
        error::Error,
        fmt::{Display, Formatter, Result as FmtResult},
    },
};

/// Error returned when an AWS SigV4 signature cannot be generated.
///
/// Signing is a pure computation, so every error here is a programming or configuration error
/// on the caller's side. None of them are transient and retrying with the same inputs will fail
/// the same way.
#[derive(Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum SignerError {
    /// A required input was missing or malformed. Sample messages:
    /// `Host must not be empty`
    /// `Object key must not be empty`
    /// `Unsupported request method: POST`
    /// `Timestamp year out of range: 10000`
    InvalidArgument(/* message */ String),
}

impl SignerError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => ERR_CODE_INVALID_ARGUMENT,
        }
    }

    fn http_status(&self) -> StatusCode {
        match self {
            Self::InvalidArgument(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// Shorthand for building an [`InvalidArgument`][SignerError::InvalidArgument] error.
    pub(crate) fn invalid_argument<S: Into<String>>(message: S) -> Self {
        Self::InvalidArgument(message.into())
    }
}

impl ServiceError for SignerError {
    fn error_code(&self) -> &'static str {
        SignerError::error_code(self)
    }

    fn http_status(&self) -> StatusCode {
        SignerError::http_status(self)
    }
}

impl Display for SignerError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Self::InvalidArgument(msg) => f.write_str(msg),
        }
    }
}

impl Error for SignerError {}

/// Builders report missing required fields through their own error type. These are caller
/// errors just like an empty field, so fold them into `InvalidArgument`.
macro_rules! from_builder_error {
    ($($builder_error:ty),* $(,)?) => {
        $(
            impl From<$builder_error> for SignerError {
                fn from(e: $builder_error) -> SignerError {
                    SignerError::InvalidArgument(e.to_string())
                }
            }
        )*
    };
}

from_builder_error!(
    crate::RequestDescriptorBuilderError,
    crate::ObjectRequestBuilderError,
    crate::SignerConfigBuilderError,
);

#[cfg(test)]
mod tests {
    use {
        crate::{RequestDescriptor, SignerError},
        scratchstack_errors::ServiceError,
    };

    #[test_log::test]
    fn test_error_code_and_status() {
        let e = SignerError::InvalidArgument("Host must not be empty".to_string());
        assert_eq!(e.error_code(), "InvalidArgument");
        assert_eq!(e.http_status(), 400);
        assert_eq!(format!("{}", e), "Host must not be empty");
        assert_eq!(e.clone(), e);
    }

    #[test_log::test]
    fn test_from_builder_error() {
        let e: SignerError = RequestDescriptor::builder().object_key("a.txt").build().unwrap_err().into();
        match e {
            SignerError::InvalidArgument(ref msg) => assert!(msg.contains("host"), "unexpected message: {msg}"),
        }
        assert_eq!(ServiceError::error_code(&e), "InvalidArgument");
    }
}
