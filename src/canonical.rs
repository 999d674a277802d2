//! Canonicalization functionality for signature generation.
//!
//! This builds the AWS SigV4 canonical request for an object request and the string to sign
//! derived from it. The layout is a bit-exact contract with the storage backend: header order,
//! line endings, and the date format all feed the hash.
//!
//! **Stability of this module is not guaranteed except for items exposed at the crate root**.
//! The functions and types are subject to change in minor/patch versions. This is exposed for
//! testing purposes only.

use {
    crate::{constants::*, crypto::sha256, RequestDescriptor, RequestTimestamp, SigningOptions},
    lazy_static::lazy_static,
    log::trace,
    qualifier_attr::qualifiers,
    regex::Regex,
    std::fmt::{Debug, Formatter, Result as FmtResult},
};

lazy_static! {
    /// Multiple space pattern.
    static ref MULTISPACE: Regex = Regex::new("  +").unwrap();
}

/// A canonicalized object request for AWS SigV4.
///
/// This is mainly used internally for generating the canonical request for signing, but is
/// exposed for testing and debugging purposes.
///
/// **The stability of this struct is not guaranteed.** The fields and methods are subject to
/// change in minor/patch versions.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
#[derive(Clone, PartialEq, Eq)]
struct CanonicalRequest {
    /// The HTTP method for the request, e.g. "PUT".
    request_method: String,

    /// The canonical URI path: `/` followed by the (possibly encoded) object key.
    canonical_uri: String,

    /// Value of the `content-type` header.
    content_type: String,

    /// Value of the `host` header.
    host: String,

    /// Value of the `x-amz-content-sha256` header: a hex SHA-256 or `UNSIGNED-PAYLOAD`.
    payload_hash: String,

    /// Value of the `x-amz-date` header.
    amz_date: String,
}

impl CanonicalRequest {
    /// Canonicalize an object request made at `timestamp`.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    fn from_descriptor(request: &RequestDescriptor, timestamp: &RequestTimestamp, options: SigningOptions) -> Self {
        Self {
            request_method: request.method().as_str().to_string(),
            canonical_uri: canonical_uri_path(request.object_key(), options),
            content_type: normalize_header_value(request.content_type()),
            host: request.host().to_string(),
            payload_hash: request.payload().payload_hash().into_owned(),
            amz_date: timestamp.amz_date().to_string(),
        }
    }

    /// Retrieve the HTTP method.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    #[inline(always)]
    fn request_method(&self) -> &str {
        &self.request_method
    }

    /// Retrieve the canonical URI path. This is also the path sent on the wire.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    #[inline(always)]
    fn canonical_uri(&self) -> &str {
        &self.canonical_uri
    }

    /// The canonical query string. Object requests sign no query parameters, so this is empty.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    #[inline(always)]
    fn canonical_query_string(&self) -> &str {
        ""
    }

    /// Retrieve the payload hash.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    #[inline(always)]
    fn payload_hash(&self) -> &str {
        &self.payload_hash
    }

    /// The list of signed headers, `;`-separated.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    #[inline(always)]
    fn signed_headers(&self) -> &'static str {
        SIGNED_HEADERS
    }

    /// The canonical headers block: one lowercase `name:value` line per signed header, in the
    /// same order as [`signed_headers`][Self::signed_headers], each ending in `\n`.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    fn canonical_headers(&self) -> String {
        let headers = [
            (HDR_CONTENT_TYPE, self.content_type.as_str()),
            (HDR_HOST, self.host.as_str()),
            (HDR_X_AMZ_CONTENT_SHA256, self.payload_hash.as_str()),
            (HDR_X_AMZ_DATE, self.amz_date.as_str()),
        ];

        let mut result = String::with_capacity(256);
        for (name, value) in headers {
            result.push_str(name);
            result.push(':');
            result.push_str(value);
            result.push('\n');
        }

        result
    }

    /// Get the [canonical request to hash](https://docs.aws.amazon.com/general/latest/gr/sigv4-create-canonical-request.html)
    /// for the request.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    fn canonical_request(&self) -> String {
        let mut result = String::with_capacity(512);
        result.push_str(self.request_method());
        result.push('\n');
        result.push_str(self.canonical_uri());
        result.push('\n');
        result.push_str(self.canonical_query_string());
        result.push('\n');
        // The headers block carries its own trailing newline.
        result.push_str(&self.canonical_headers());
        result.push('\n');
        result.push_str(self.signed_headers());
        result.push('\n');
        result.push_str(self.payload_hash());

        trace!("Canonical request:\n{}", result);

        result
    }

    /// Get the SHA-256 hash of the [canonical request](https://docs.aws.amazon.com/general/latest/gr/sigv4-create-canonical-request.html).
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    fn canonical_request_sha256(&self) -> [u8; SHA256_OUTPUT_LEN] {
        sha256(self.canonical_request().as_bytes())
    }

    /// Get the [string to sign](https://docs.aws.amazon.com/general/latest/gr/sigv4-create-string-to-sign.html)
    /// for the request within the given credential scope.
    #[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
    #[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
    fn string_to_sign(&self, credential_scope: &str) -> String {
        let result = format!(
            "{}\n{}\n{}\n{}",
            AWS4_HMAC_SHA256,
            self.amz_date,
            credential_scope,
            hex::encode(self.canonical_request_sha256())
        );

        trace!("String to sign:\n{}", result);

        result
    }
}

impl Debug for CanonicalRequest {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("CanonicalRequest")
            .field("request_method", &self.request_method)
            .field("canonical_uri", &self.canonical_uri)
            .field("canonical_headers", &self.canonical_headers())
            .field("payload_hash", &self.payload_hash)
            .finish()
    }
}

/// The credential scope, `YYYYMMDD/region/service/aws4_request`.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
fn credential_scope(date_stamp: &str, region: &str, service: &str) -> String {
    format!("{}/{}/{}/{}", date_stamp, region, service, AWS4_REQUEST)
}

/// The canonical URI path for an object key: `/` followed by the key, encoded per `options`.
/// This is also the path sent on the wire.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
fn canonical_uri_path(key: &str, options: SigningOptions) -> String {
    let key = canonicalize_object_key(key, options.encode_object_key);
    let mut result = String::with_capacity(key.len() + 1);
    result.push('/');
    result.push_str(&key);
    result
}

/// Normalize a header value the way SigV4 verifiers do: leading and trailing whitespace is
/// removed and runs of spaces collapse to a single space.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
fn normalize_header_value(value: &str) -> String {
    MULTISPACE.replace_all(value.trim(), " ").into_owned()
}

/// Canonicalize an object key for use as the URI path.
///
/// When `encode` is set, every byte outside the RFC 3986 unreserved set is percent-encoded with
/// uppercase hex digits, except `/` which separates path segments. The key is treated as raw
/// bytes, so an existing `%` in the key is itself encoded (`%` -> `%25`); S3 does not decode
/// object keys before checking the signature. When `encode` is not set the key is used as-is.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
fn canonicalize_object_key(key: &str, encode: bool) -> String {
    if !encode {
        return key.to_string();
    }

    let mut result = String::with_capacity(key.len());
    for c in key.bytes() {
        if is_rfc3986_unreserved(c) || c == b'/' {
            result.push(char::from(c));
        } else {
            let [hi, lo] = u8_to_upper_hex(c);
            result.push('%');
            result.push(char::from(hi));
            result.push(char::from(lo));
        }
    }

    result
}

/// Indicates whether the specified byte is RFC3986 unreserved -- i.e., can be represented without being
/// percent-encoded, e.g. '?' -> '%3F'.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
#[inline(always)]
fn is_rfc3986_unreserved(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'-' || c == b'.' || c == b'_' || c == b'~'
}

/// Convert a byte to uppercase hex representation.
#[cfg_attr(any(doc, feature = "unstable"), qualifiers(pub))]
#[cfg_attr(not(any(doc, feature = "unstable")), qualifiers(pub(crate)))]
#[inline(always)]
const fn u8_to_upper_hex(b: u8) -> [u8; 2] {
    let result: [u8; 2] = [HEX_DIGITS_UPPER[((b >> 4) & 0xf) as usize], HEX_DIGITS_UPPER[(b & 0xf) as usize]];
    result
}

#[cfg(test)]
mod tests {
    use {
        crate::{
            canonical::{
                canonical_uri_path, canonicalize_object_key, credential_scope, is_rfc3986_unreserved,
                normalize_header_value, u8_to_upper_hex, CanonicalRequest,
            },
            PayloadHashPolicy, RequestDescriptor, RequestTimestamp, SigningOptions,
        },
        chrono::{TimeZone, Utc},
    };

    fn example_request(key: &str, payload: PayloadHashPolicy) -> RequestDescriptor {
        RequestDescriptor::builder()
            .host("examplebucket.s3.amazonaws.com")
            .object_key(key)
            .content_type("text/plain")
            .payload(payload)
            .build()
            .unwrap()
    }

    fn example_timestamp() -> RequestTimestamp {
        RequestTimestamp::new(&Utc.with_ymd_and_hms(2013, 5, 24, 0, 0, 0).unwrap()).unwrap()
    }

    #[test_log::test]
    fn test_canonical_headers() {
        let cr = CanonicalRequest::from_descriptor(
            &example_request("test.txt", PayloadHashPolicy::Unsigned),
            &example_timestamp(),
            SigningOptions::default(),
        );

        let headers = cr.canonical_headers();
        assert_eq!(
            headers,
            "content-type:text/plain\nhost:examplebucket.s3.amazonaws.com\nx-amz-content-sha256:UNSIGNED-PAYLOAD\n\
             x-amz-date:20130524T000000Z\n"
        );

        let lines: Vec<&str> = headers.split_terminator('\n').collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(headers.matches('\n').count(), 4);
        let names: Vec<&str> = lines.iter().map(|line| line.split(':').next().unwrap()).collect();
        assert_eq!(names.join(";"), cr.signed_headers());
        assert_eq!(cr.signed_headers(), "content-type;host;x-amz-content-sha256;x-amz-date");
    }

    #[test_log::test]
    fn test_canonical_request_unsigned() {
        let cr = CanonicalRequest::from_descriptor(
            &example_request("test.txt", PayloadHashPolicy::Unsigned),
            &example_timestamp(),
            SigningOptions::default(),
        );

        assert_eq!(cr.request_method(), "PUT");
        assert_eq!(cr.canonical_uri(), "/test.txt");
        assert_eq!(cr.canonical_query_string(), "");
        assert_eq!(cr.payload_hash(), "UNSIGNED-PAYLOAD");
        assert_eq!(
            cr.canonical_request(),
            "PUT\n/test.txt\n\ncontent-type:text/plain\nhost:examplebucket.s3.amazonaws.com\n\
             x-amz-content-sha256:UNSIGNED-PAYLOAD\nx-amz-date:20130524T000000Z\n\n\
             content-type;host;x-amz-content-sha256;x-amz-date\nUNSIGNED-PAYLOAD"
        );
        assert_eq!(
            hex::encode(cr.canonical_request_sha256()),
            "33045b79cb5b27ca97fb2914bb06fa827c9c028ee5a4a3705b33c36fe20d2afa"
        );

        let scope = credential_scope("20130524", "us-east-1", "s3");
        assert_eq!(scope, "20130524/us-east-1/s3/aws4_request");
        assert_eq!(
            cr.string_to_sign(&scope),
            "AWS4-HMAC-SHA256\n20130524T000000Z\n20130524/us-east-1/s3/aws4_request\n\
             33045b79cb5b27ca97fb2914bb06fa827c9c028ee5a4a3705b33c36fe20d2afa"
        );
    }

    #[test_log::test]
    fn test_canonical_request_hashed() {
        let cr = CanonicalRequest::from_descriptor(
            &example_request("test.txt", PayloadHashPolicy::hashed("Welcome to Amazon S3.")),
            &example_timestamp(),
            SigningOptions::default(),
        );

        assert_eq!(cr.payload_hash(), "44ce7dd67c959e0d3524ffac1771dfbba87d2b6b4b4e99e42034a8b803f8b072");
        assert!(cr.canonical_request().ends_with("\n44ce7dd67c959e0d3524ffac1771dfbba87d2b6b4b4e99e42034a8b803f8b072"));
        assert_eq!(
            hex::encode(cr.canonical_request_sha256()),
            "93d7555376bfc4e8e757482e9df0cddae18ae961f3d0f2f192bcb660fcbbcfd2"
        );

        // Debug output shows the headers block.
        assert!(format!("{:?}", cr).contains("x-amz-content-sha256:44ce7dd6"));
    }

    #[test_log::test]
    fn test_object_key_encoding() {
        assert_eq!(canonicalize_object_key("photos/2024/cat.jpg", true), "photos/2024/cat.jpg");
        assert_eq!(canonicalize_object_key("my photo+1.jpg", true), "my%20photo%2B1.jpg");
        assert_eq!(canonicalize_object_key("100%.txt", true), "100%25.txt");
        assert_eq!(canonicalize_object_key("a~b_c-d.e", true), "a~b_c-d.e");
        assert_eq!(canonicalize_object_key("caf\u{e9}", true), "caf%C3%A9");
        assert_eq!(canonicalize_object_key("test$file.text", true), "test%24file.text");

        assert_eq!(canonicalize_object_key("my photo+1.jpg", false), "my photo+1.jpg");

        let cr = CanonicalRequest::from_descriptor(
            &example_request("my photo+1.jpg", PayloadHashPolicy::Unsigned),
            &example_timestamp(),
            SigningOptions::VERBATIM_KEY,
        );
        assert_eq!(cr.canonical_uri(), "/my photo+1.jpg");
    }

    #[test_log::test]
    fn test_canonical_uri_path() {
        assert_eq!(canonical_uri_path("photos/2024/cat.jpg", SigningOptions::default()), "/photos/2024/cat.jpg");
        assert_eq!(canonical_uri_path("my photo.jpg", SigningOptions::default()), "/my%20photo.jpg");
        assert_eq!(canonical_uri_path("my photo.jpg", SigningOptions::VERBATIM_KEY), "/my photo.jpg");
    }

    #[test_log::test]
    fn test_header_value_whitespace() {
        assert_eq!(normalize_header_value("text/plain"), "text/plain");
        assert_eq!(normalize_header_value("  text/plain;  charset=utf-8 "), "text/plain; charset=utf-8");
        assert_eq!(normalize_header_value("a   b    c"), "a b c");
        assert_eq!(normalize_header_value("\ttext/plain\t"), "text/plain");

        let request = RequestDescriptor::builder()
            .host("examplebucket.s3.amazonaws.com")
            .object_key("test.txt")
            .content_type("  text/plain;  charset=utf-8 ")
            .build()
            .unwrap();
        let cr = CanonicalRequest::from_descriptor(&request, &example_timestamp(), SigningOptions::default());
        assert!(cr.canonical_headers().starts_with("content-type:text/plain; charset=utf-8\n"));
    }

    #[test_log::test]
    fn test_hex_helpers() {
        assert_eq!(u8_to_upper_hex(0x00), *b"00");
        assert_eq!(u8_to_upper_hex(0x2b), *b"2B");
        assert_eq!(u8_to_upper_hex(0xff), *b"FF");

        for c in b"AZaz09-._~" {
            assert!(is_rfc3986_unreserved(*c));
        }

        for c in b" /+%$?#" {
            assert!(!is_rfc3986_unreserved(*c));
        }
    }
}
