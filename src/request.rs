use {
    crate::{constants::*, PayloadHashPolicy, SignerError},
    derive_builder::Builder,
    http::Method,
};

/// Request methods that can be signed. These are the object operations that carry no query
/// string and can use an unsigned payload.
pub const SUPPORTED_METHODS: [Method; 4] = [Method::PUT, Method::GET, Method::HEAD, Method::DELETE];

/// The shape of a single object request to sign.
///
/// RequestDescriptor structs are immutable. Use [`RequestDescriptorBuilder`] to programmatically
/// construct a descriptor.
#[derive(Builder, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct RequestDescriptor {
    /// The HTTP method. Defaults to `PUT`.
    #[builder(default = "Method::PUT")]
    method: Method,

    /// The bucket endpoint host, e.g. `examplebucket.s3.amazonaws.com`.
    #[builder(setter(into))]
    host: String,

    /// The object key, without a leading slash.
    #[builder(setter(into))]
    object_key: String,

    /// The `Content-Type` of the object. Defaults to `application/octet-stream`.
    #[builder(setter(into), default = "APPLICATION_OCTET_STREAM.to_string()")]
    content_type: String,

    /// How the body is represented in the signature. Defaults to an unsigned payload.
    #[builder(default)]
    payload: PayloadHashPolicy,
}

impl RequestDescriptor {
    /// Create a [`RequestDescriptorBuilder`] to construct a [`RequestDescriptor`].
    #[inline]
    pub fn builder() -> RequestDescriptorBuilder {
        RequestDescriptorBuilder::default()
    }

    /// Retrieve the HTTP method.
    #[inline]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Retrieve the host.
    #[inline]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Retrieve the object key.
    #[inline]
    pub fn object_key(&self) -> &str {
        &self.object_key
    }

    /// Retrieve the content type.
    #[inline]
    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    /// Retrieve the payload hash policy.
    #[inline]
    pub fn payload(&self) -> &PayloadHashPolicy {
        &self.payload
    }

    /// Check the descriptor before any hashing is done.
    pub(crate) fn validate(&self) -> Result<(), SignerError> {
        if !SUPPORTED_METHODS.contains(&self.method) {
            return Err(SignerError::invalid_argument(format!("{}{}", MSG_UNSUPPORTED_METHOD, self.method)));
        }

        if self.host.is_empty() {
            return Err(SignerError::invalid_argument(MSG_EMPTY_HOST));
        }

        if self.object_key.is_empty() {
            return Err(SignerError::invalid_argument(MSG_EMPTY_OBJECT_KEY));
        }

        Ok(())
    }
}

/// A request for an object in a bucket whose endpoint is supplied separately, usually by a
/// [`SignerConfig`][crate::SignerConfig].
///
/// ObjectRequest structs are immutable. Use [`ObjectRequestBuilder`] to programmatically construct
/// a request.
#[derive(Builder, Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub struct ObjectRequest {
    /// The HTTP method. Defaults to `PUT`.
    #[builder(default = "Method::PUT")]
    method: Method,

    /// The object key, without a leading slash.
    #[builder(setter(into))]
    object_key: String,

    /// The `Content-Type` of the object. Defaults to `application/octet-stream`.
    #[builder(setter(into), default = "APPLICATION_OCTET_STREAM.to_string()")]
    content_type: String,

    /// How the body is represented in the signature. Defaults to an unsigned payload.
    #[builder(default)]
    payload: PayloadHashPolicy,
}

impl ObjectRequest {
    /// Create an [`ObjectRequestBuilder`] to construct an [`ObjectRequest`].
    #[inline]
    pub fn builder() -> ObjectRequestBuilder {
        ObjectRequestBuilder::default()
    }

    /// Retrieve the object key.
    #[inline]
    pub fn object_key(&self) -> &str {
        &self.object_key
    }

    /// Attach this request to a bucket endpoint.
    pub fn to_descriptor(&self, host: &str) -> RequestDescriptor {
        RequestDescriptor {
            method: self.method.clone(),
            host: host.to_string(),
            object_key: self.object_key.clone(),
            content_type: self.content_type.clone(),
            payload: self.payload.clone(),
        }
    }
}
