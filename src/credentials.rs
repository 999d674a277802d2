use {
    crate::{constants::*, KSecretKey, SignerError},
    std::{
        fmt::{Debug, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

/// Static AWS-style credentials: an access key id and its secret access key.
///
/// The secret is never printed; `Debug` shows only the access key id. Credentials are read-only
/// for the signer. Ownership and rotation belong to whoever constructs them.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_key_id: String,
    secret_access_key: String,
}

impl Credentials {
    /// Create a new set of credentials.
    ///
    /// This does not validate the values; empty or malformed values are rejected when a request
    /// is signed.
    pub fn new<A: Into<String>, S: Into<String>>(access_key_id: A, secret_access_key: S) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
        }
    }

    /// Retrieve the access key id.
    #[inline]
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    /// Check that both halves of the credentials can be used in a signature.
    ///
    /// The access key id ends up verbatim inside the `Authorization` header's `Credential=`
    /// parameter, so it must be printable ASCII without slashes or commas.
    pub(crate) fn validate(&self) -> Result<(), SignerError> {
        if self.access_key_id.is_empty() {
            return Err(SignerError::invalid_argument(MSG_EMPTY_ACCESS_KEY_ID));
        }

        if !self.access_key_id.bytes().all(|c| c.is_ascii_graphic() && c != b'/' && c != b',') {
            return Err(SignerError::invalid_argument(format!(
                "{}{:?}",
                MSG_INVALID_ACCESS_KEY_ID, self.access_key_id
            )));
        }

        if self.secret_access_key.is_empty() {
            return Err(SignerError::invalid_argument(MSG_EMPTY_SECRET_ACCESS_KEY));
        }

        Ok(())
    }

    /// Convert the secret access key into the root of the signing key chain.
    pub(crate) fn to_ksecret(&self) -> Result<KSecretKey, SignerError> {
        KSecretKey::from_str(&self.secret_access_key)
    }
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .finish()
    }
}
