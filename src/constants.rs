//! Common constants used throughout the crate.
//!
//! These are consolidated here so the canonicalization, key derivation, and header assembly code
//! agree on the exact bytes that go into a signature. A misspelled token here invalidates every
//! signature, so fix it in one spot.
//!
//! Tests that check the content of an error code, header, or message should not use these
//! constants; they should use hard-coded strings so the tests also catch misspellings.
//!
//! Please keep this file organized alphabetically.

/// Content type used when the caller does not specify one.
pub(crate) const APPLICATION_OCTET_STREAM: &str = "application/octet-stream";

/// Algorithm for AWS SigV4
pub(crate) const AWS4_HMAC_SHA256: &str = "AWS4-HMAC-SHA256";

/// Prefix applied to the raw secret key before deriving `kDate`.
pub(crate) const AWS4_PREFIX: &[u8] = b"AWS4";

/// String included at the end of the AWS SigV4 credential scope
pub(crate) const AWS4_REQUEST: &str = "aws4_request";

/// Default region token for S3-compatible providers that do not use AWS regions.
pub(crate) const DEFAULT_REGION: &str = "auto";

/// Default service name for object storage.
pub(crate) const DEFAULT_SERVICE: &str = "s3";

/// Error code: InvalidArgument
pub(crate) const ERR_CODE_INVALID_ARGUMENT: &str = "InvalidArgument";

/// Header for `content-type`
pub(crate) const HDR_CONTENT_TYPE: &str = "content-type";

/// Header for `host`
pub(crate) const HDR_HOST: &str = "host";

/// Header for `x-amz-content-sha256`
pub(crate) const HDR_X_AMZ_CONTENT_SHA256: &str = "x-amz-content-sha256";

/// Header for `x-amz-date`
pub(crate) const HDR_X_AMZ_DATE: &str = "x-amz-date";

/// Uppercase hex digits.
pub(crate) const HEX_DIGITS_UPPER: [u8; 16] =
    [b'0', b'1', b'2', b'3', b'4', b'5', b'6', b'7', b'8', b'9', b'A', b'B', b'C', b'D', b'E', b'F'];

/// Scheme used for the object URL.
pub(crate) const HTTPS_SCHEME: &str = "https://";

/// Compact ISO8601 format used for `x-amz-date` and the string to sign.
pub(crate) const ISO8601_COMPACT_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Short date format used in the credential scope.
pub(crate) const ISO8601_DATE_FORMAT: &str = "%Y%m%d";

/// Length of the `YYYYMMDD` date stamp.
pub(crate) const ISO8601_DATE_LENGTH: usize = 8;

/// Latest year that still formats as four digits.
pub(crate) const MAX_TIMESTAMP_YEAR: i32 = 9999;

/// Error message: `"Access key id must not be empty"`
pub(crate) const MSG_EMPTY_ACCESS_KEY_ID: &str = "Access key id must not be empty";

/// Error message: `"Host must not be empty"`
pub(crate) const MSG_EMPTY_HOST: &str = "Host must not be empty";

/// Error message: `"Object key must not be empty"`
pub(crate) const MSG_EMPTY_OBJECT_KEY: &str = "Object key must not be empty";

/// Error message: `"Region must not be empty"`
pub(crate) const MSG_EMPTY_REGION: &str = "Region must not be empty";

/// Error message: `"Secret access key must not be empty"`
pub(crate) const MSG_EMPTY_SECRET_ACCESS_KEY: &str = "Secret access key must not be empty";

/// Error message: `"Service must not be empty"`
pub(crate) const MSG_EMPTY_SERVICE: &str = "Service must not be empty";

/// Error message: `"Host must not contain userinfo"`
pub(crate) const MSG_HOST_USERINFO: &str = "Host must not contain userinfo";

/// Error message prefix: `"Invalid access key id: "`
pub(crate) const MSG_INVALID_ACCESS_KEY_ID: &str = "Invalid access key id: ";

/// Error message prefix: `"Invalid content type: "`
pub(crate) const MSG_INVALID_CONTENT_TYPE: &str = "Invalid content type: ";

/// Error message prefix: `"Invalid header value: "`
pub(crate) const MSG_INVALID_HEADER_VALUE: &str = "Invalid header value: ";

/// Error message prefix: `"Invalid host: "`
pub(crate) const MSG_INVALID_HOST: &str = "Invalid host: ";

/// Error message prefix: `"Invalid region: "`
pub(crate) const MSG_INVALID_REGION: &str = "Invalid region: ";

/// Error message prefix: `"Invalid request URL: "`
pub(crate) const MSG_INVALID_REQUEST_URL: &str = "Invalid request URL: ";

/// Error message prefix: `"Invalid service: "`
pub(crate) const MSG_INVALID_SERVICE: &str = "Invalid service: ";

/// Error message prefix: `"Timestamp year out of range: "`
pub(crate) const MSG_TIMESTAMP_OUT_OF_RANGE: &str = "Timestamp year out of range: ";

/// Error message prefix: `"Unsupported request method: "`
pub(crate) const MSG_UNSUPPORTED_METHOD: &str = "Unsupported request method: ";

/// The signed header list. This must match the order headers are written into the canonical
/// request.
pub(crate) const SIGNED_HEADERS: &str = "content-type;host;x-amz-content-sha256;x-amz-date";

/// The length of a SHA-256 digest in bytes.
pub(crate) const SHA256_OUTPUT_LEN: usize = 32;

/// Token used for `x-amz-content-sha256` when the payload is unsigned
pub(crate) const XACS_UNSIGNED_PAYLOAD: &str = "UNSIGNED-PAYLOAD";
