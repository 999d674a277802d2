use {
    crate::{constants::*, crypto::sha256_hex},
    bytes::Bytes,
    std::borrow::Cow,
};

/// How the request body is represented in the signature.
///
/// This is the value of both the `x-amz-content-sha256` header and the last line of the
/// canonical request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PayloadHashPolicy {
    /// The body is not covered by the signature; `UNSIGNED-PAYLOAD` is used instead of a hash.
    /// This is the usual choice for uploads whose bytes are streamed separately.
    #[default]
    Unsigned,

    /// The body is hashed with SHA-256 and the hash is covered by the signature.
    HashedBody(Bytes),
}

impl PayloadHashPolicy {
    /// Create a policy that signs the SHA-256 hash of `body`.
    pub fn hashed<B: Into<Bytes>>(body: B) -> Self {
        Self::HashedBody(body.into())
    }

    /// The payload hash token: `UNSIGNED-PAYLOAD` or the lowercase hex SHA-256 of the body.
    pub fn payload_hash(&self) -> Cow<'static, str> {
        match self {
            Self::Unsigned => Cow::Borrowed(XACS_UNSIGNED_PAYLOAD),
            Self::HashedBody(body) => Cow::Owned(sha256_hex(body)),
        }
    }
}
