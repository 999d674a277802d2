use {
    crate::{constants::*, sigv4_sign_request_with_options, Credentials, ObjectRequest, SignedRequest, SignerError},
    chrono::{DateTime, Utc},
    derive_builder::Builder,
};

/// Options that can be used to configure how requests are signed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SigningOptions {
    /// Percent-encode the object key (RFC 3986 unreserved characters and `/` are kept as-is)
    /// before it is placed in the canonical URI and the request URL.
    pub encode_object_key: bool,
}

impl SigningOptions {
    /// Encode object keys. This is the default and matches what S3 expects on the wire.
    pub const ENCODED_KEY: Self = Self {
        encode_object_key: true,
    };

    /// Use object keys verbatim.
    ///
    /// Only safe when keys are known to consist of unreserved characters and `/`, or are
    /// already percent-encoded by the caller. Otherwise the signed path will not match the path
    /// the backend sees and the request is rejected.
    pub const VERBATIM_KEY: Self = Self {
        encode_object_key: false,
    };
}

impl Default for SigningOptions {
    fn default() -> Self {
        Self::ENCODED_KEY
    }
}

/// Process-wide signer configuration: credentials and the target bucket endpoint.
///
/// Build this once at startup from whatever configuration source the application uses and pass
/// it by reference to signing calls. The signer never reads the environment itself.
///
/// SignerConfig structs are immutable. Use [`SignerConfigBuilder`] to programmatically construct
/// a configuration.
#[derive(Builder, Clone, Debug)]
#[non_exhaustive]
pub struct SignerConfig {
    /// The credentials used to sign requests.
    credentials: Credentials,

    /// The bucket endpoint host, e.g. `examplebucket.s3.amazonaws.com`.
    #[builder(setter(into))]
    bucket_host: String,

    /// The region in the credential scope. Defaults to `auto`.
    #[builder(setter(into), default = "DEFAULT_REGION.to_string()")]
    region: String,

    /// The service in the credential scope. Defaults to `s3`.
    #[builder(setter(into), default = "DEFAULT_SERVICE.to_string()")]
    service: String,

    /// Signing options.
    #[builder(default)]
    options: SigningOptions,
}

impl SignerConfig {
    /// Create a [`SignerConfigBuilder`] to construct a [`SignerConfig`].
    #[inline]
    pub fn builder() -> SignerConfigBuilder {
        SignerConfigBuilder::default()
    }

    /// Retrieve the credentials.
    #[inline]
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Retrieve the bucket endpoint host.
    #[inline]
    pub fn bucket_host(&self) -> &str {
        &self.bucket_host
    }

    /// Retrieve the region.
    #[inline]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Retrieve the service.
    #[inline]
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Retrieve the signing options.
    #[inline]
    pub fn options(&self) -> SigningOptions {
        self.options
    }

    /// Sign a request for an object in the configured bucket at the instant `now`.
    ///
    /// # Errors
    /// Returns [`SignerError::InvalidArgument`] if the configuration or the request is invalid.
    pub fn sign(&self, object: &ObjectRequest, now: DateTime<Utc>) -> Result<SignedRequest, SignerError> {
        let request = object.to_descriptor(&self.bucket_host);
        sigv4_sign_request_with_options(&self.credentials, &request, &self.region, &self.service, now, self.options)
    }
}
