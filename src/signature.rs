use {
    crate::{
        canonical::{canonical_uri_path, credential_scope, normalize_header_value, CanonicalRequest},
        constants::*,
        Credentials, RequestDescriptor, RequestTimestamp, SignerError, SigningOptions,
    },
    chrono::{DateTime, Utc},
    http::{
        header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE, HOST},
        method::Method,
        request::Request,
        uri::{Authority, Uri},
    },
    log::debug,
};

/// A request that has been signed with AWS SigV4 and is ready to be sent.
///
/// This holds everything the HTTP client needs (method, URL, and headers) along with the
/// intermediate canonical request and string to sign for debugging. It never holds the secret key
/// or any key derived from it.
#[derive(Clone, Debug)]
pub struct SignedRequest {
    method: Method,
    url: String,
    uri: Uri,
    headers: HeaderMap,
    authorization: String,
    canonical_request: String,
    string_to_sign: String,
    signature: String,
}

impl SignedRequest {
    /// Retrieve the HTTP method.
    #[inline]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Retrieve the request URL, `https://{host}{canonical uri}`.
    #[inline]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Retrieve the request URL as a parsed [`Uri`].
    #[inline]
    pub fn uri(&self) -> &Uri {
        &self.uri
    }

    /// Retrieve the headers the caller must send: `Host`, `Content-Type`, `X-Amz-Date`,
    /// `X-Amz-Content-Sha256`, and `Authorization`. The `Authorization` value is marked
    /// sensitive.
    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Retrieve the `Authorization` header value.
    #[inline]
    pub fn authorization(&self) -> &str {
        &self.authorization
    }

    /// Retrieve the canonical request that was hashed into the string to sign.
    #[inline]
    pub fn canonical_request(&self) -> &str {
        &self.canonical_request
    }

    /// Retrieve the string to sign.
    #[inline]
    pub fn string_to_sign(&self) -> &str {
        &self.string_to_sign
    }

    /// Retrieve the hex-encoded signature.
    #[inline]
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Build an HTTP [`Request`] carrying `body` with the signed method, URI, and headers.
    ///
    /// For a [hashed payload][crate::PayloadHashPolicy::HashedBody], `body` must be the same bytes
    /// that were hashed or the backend will reject the request.
    pub fn into_http_request<B>(self, body: B) -> Request<B> {
        let mut request = Request::new(body);
        *request.method_mut() = self.method;
        *request.uri_mut() = self.uri;
        *request.headers_mut() = self.headers;
        request
    }
}

/// Sign an object request with AWS SigV4, encoding the object key.
///
/// This is [`sigv4_sign_request_with_options`] with [`SigningOptions::default()`].
///
/// # Parameters
/// * `credentials` - The access key id and secret access key to sign with.
/// * `request` - The request to sign.
/// * `region` - The region in the credential scope, e.g. `us-east-1` or `auto`.
/// * `service` - The service in the credential scope, usually `s3`.
/// * `now` - The instant used for `X-Amz-Date` and the credential scope date.
///
/// # Errors
/// Returns [`SignerError::InvalidArgument`] if any input is missing or malformed.
pub fn sigv4_sign_request(
    credentials: &Credentials,
    request: &RequestDescriptor,
    region: &str,
    service: &str,
    now: DateTime<Utc>,
) -> Result<SignedRequest, SignerError> {
    sigv4_sign_request_with_options(credentials, request, region, service, now, SigningOptions::default())
}

/// Sign an object request with AWS SigV4.
///
/// This is a pure function: the same inputs always produce the same signature, and nothing is
/// cached between calls. No network I/O is performed; the caller sends the returned request.
///
/// # Errors
/// Returns [`SignerError::InvalidArgument`] if the method is unsupported; the host, object key,
/// access key id, secret access key, region, or service is empty or malformed; or `now` cannot
/// be represented as an `X-Amz-Date`. All validation happens before any hashing.
///
/// The content type is trimmed and runs of spaces are collapsed before it is signed and sent, as
/// SigV4 verifiers do when they canonicalize the header.
pub fn sigv4_sign_request_with_options(
    credentials: &Credentials,
    request: &RequestDescriptor,
    region: &str,
    service: &str,
    now: DateTime<Utc>,
    options: SigningOptions,
) -> Result<SignedRequest, SignerError> {
    request.validate()?;
    credentials.validate()?;
    validate_scope_element(region, MSG_EMPTY_REGION, MSG_INVALID_REGION)?;
    validate_scope_element(service, MSG_EMPTY_SERVICE, MSG_INVALID_SERVICE)?;

    let authority = Authority::try_from(request.host())
        .map_err(|e| SignerError::invalid_argument(format!("{}{:?}: {}", MSG_INVALID_HOST, request.host(), e)))?;
    if authority.as_str().contains('@') {
        return Err(SignerError::invalid_argument(MSG_HOST_USERINFO));
    }

    let content_type = normalize_header_value(request.content_type());
    let content_type = HeaderValue::from_str(&content_type).map_err(|_| {
        SignerError::invalid_argument(format!("{}{:?}", MSG_INVALID_CONTENT_TYPE, request.content_type()))
    })?;

    let timestamp = RequestTimestamp::new(&now)?;

    let url = format!("{}{}{}", HTTPS_SCHEME, authority, canonical_uri_path(request.object_key(), options));
    let uri = Uri::try_from(url.as_str())
        .map_err(|e| SignerError::invalid_argument(format!("{}{:?}: {}", MSG_INVALID_REQUEST_URL, url, e)))?;

    // Validation is complete; everything past this point is hashing and formatting.
    let canonical_request = CanonicalRequest::from_descriptor(request, &timestamp, options);
    let ksecret = credentials.to_ksecret()?;
    let scope = credential_scope(timestamp.date_stamp(), region, service);
    let string_to_sign = canonical_request.string_to_sign(&scope);
    let signing_key = ksecret.to_ksigning(timestamp.date(), region, service);
    let signature = signing_key.sign(&string_to_sign);

    let authorization = format!(
        "{} Credential={}/{}, SignedHeaders={}, Signature={}",
        AWS4_HMAC_SHA256,
        credentials.access_key_id(),
        scope,
        canonical_request.signed_headers(),
        signature
    );

    let mut authorization_value = header_value(&authorization)?;
    authorization_value.set_sensitive(true);

    let mut headers = HeaderMap::with_capacity(5);
    headers.insert(HOST, header_value(authority.as_str())?);
    headers.insert(CONTENT_TYPE, content_type);
    headers.insert(HeaderName::from_static(HDR_X_AMZ_DATE), header_value(timestamp.amz_date())?);
    headers.insert(HeaderName::from_static(HDR_X_AMZ_CONTENT_SHA256), header_value(canonical_request.payload_hash())?);
    headers.insert(AUTHORIZATION, authorization_value);

    debug!(
        "Signed request method={} url={} access_key_id={} credential_scope={}",
        request.method(),
        url,
        credentials.access_key_id(),
        scope
    );

    Ok(SignedRequest {
        method: request.method().clone(),
        url,
        uri,
        headers,
        authorization,
        canonical_request: canonical_request.canonical_request(),
        string_to_sign,
        signature,
    })
}

/// Region and service names sit between slashes in the credential scope.
fn validate_scope_element(value: &str, empty_msg: &str, invalid_msg: &str) -> Result<(), SignerError> {
    if value.is_empty() {
        return Err(SignerError::invalid_argument(empty_msg));
    }

    if !value.bytes().all(|c| c.is_ascii_graphic() && c != b'/' && c != b',') {
        return Err(SignerError::invalid_argument(format!("{}{:?}", invalid_msg, value)));
    }

    Ok(())
}

fn header_value(value: &str) -> Result<HeaderValue, SignerError> {
    HeaderValue::from_str(value)
        .map_err(|_| SignerError::invalid_argument(format!("{}{:?}", MSG_INVALID_HEADER_VALUE, value)))
}
