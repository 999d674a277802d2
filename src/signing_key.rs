use {
    crate::{constants::*, crypto::hmac_sha256, SignerError},
    chrono::NaiveDate,
    std::{
        fmt::{Debug, Display, Formatter, Result as FmtResult},
        str::FromStr,
    },
};

/// A raw AWS secret key (`kSecret`).
#[derive(Clone, PartialEq, Eq)]
pub struct KSecretKey {
    /// The secret key, prefixed with "AWS4".
    prefixed_key: Vec<u8>,
}

/// The `kDate` key: `HMAC_SHA256("AWS4" + KSecretKey, "YYYYMMDD")`
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct KDateKey {
    /// The raw key.
    key: [u8; SHA256_OUTPUT_LEN],
}

/// The `kRegion` key: an AWS `kDate` key, HMAC-SHA256 hashed with the region.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct KRegionKey {
    /// The raw key.
    key: [u8; SHA256_OUTPUT_LEN],
}

/// The `kService` key: an AWS `kRegion` key, HMAC-SHA256 hashed with the service.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct KServiceKey {
    /// The raw key.
    key: [u8; SHA256_OUTPUT_LEN],
}

/// The `kSigning` key: an AWS `kService` key, HMAC-SHA256 hashed with the "aws4_request" string.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct KSigningKey {
    /// The resulting raw signing key.
    key: [u8; SHA256_OUTPUT_LEN],
}

impl AsRef<[u8]> for KSecretKey {
    fn as_ref(&self) -> &[u8] {
        // Remove the "AWS4" prefix.
        &self.prefixed_key[AWS4_PREFIX.len()..]
    }
}

impl AsRef<[u8; SHA256_OUTPUT_LEN]> for KDateKey {
    fn as_ref(&self) -> &[u8; SHA256_OUTPUT_LEN] {
        &self.key
    }
}

impl AsRef<[u8; SHA256_OUTPUT_LEN]> for KRegionKey {
    fn as_ref(&self) -> &[u8; SHA256_OUTPUT_LEN] {
        &self.key
    }
}

impl AsRef<[u8; SHA256_OUTPUT_LEN]> for KServiceKey {
    fn as_ref(&self) -> &[u8; SHA256_OUTPUT_LEN] {
        &self.key
    }
}

impl AsRef<[u8; SHA256_OUTPUT_LEN]> for KSigningKey {
    fn as_ref(&self) -> &[u8; SHA256_OUTPUT_LEN] {
        &self.key
    }
}

/// Keys print as their type name only.
macro_rules! redacted_fmt {
    ($($key:ident),*) => {
        $(
            impl Debug for $key {
                fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
                    f.write_str(stringify!($key))
                }
            }

            impl Display for $key {
                fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
                    f.write_str(stringify!($key))
                }
            }
        )*
    };
}

redacted_fmt!(KSecretKey, KDateKey, KRegionKey, KServiceKey, KSigningKey);

impl FromStr for KSecretKey {
    type Err = SignerError;

    /// Create a new `KSecretKey` from a raw AWS secret key.
    fn from_str(raw: &str) -> Result<Self, SignerError> {
        if raw.is_empty() {
            return Err(SignerError::invalid_argument(MSG_EMPTY_SECRET_ACCESS_KEY));
        }

        let mut prefixed_key = Vec::with_capacity(AWS4_PREFIX.len() + raw.len());
        prefixed_key.extend_from_slice(AWS4_PREFIX);
        prefixed_key.extend_from_slice(raw.as_bytes());
        Ok(Self {
            prefixed_key,
        })
    }
}

impl KSecretKey {
    /// Create a new `KDateKey` from this `KSecretKey` and a date.
    pub fn to_kdate(&self, date: NaiveDate) -> KDateKey {
        let date = date.format(ISO8601_DATE_FORMAT).to_string();
        KDateKey {
            key: hmac_sha256(self.prefixed_key.as_slice(), date.as_bytes()),
        }
    }

    /// Create a new `KRegionKey` from this `KSecretKey`, a date, and a region.
    pub fn to_kregion(&self, date: NaiveDate, region: &str) -> KRegionKey {
        self.to_kdate(date).to_kregion(region)
    }

    /// Create a new `KServiceKey` from this `KSecretKey`, a date, a region, and a service.
    pub fn to_kservice(&self, date: NaiveDate, region: &str, service: &str) -> KServiceKey {
        self.to_kdate(date).to_kservice(region, service)
    }

    /// Create a new `KSigningKey` from this `KSecretKey`, a date, a region, and a service.
    pub fn to_ksigning(&self, date: NaiveDate, region: &str, service: &str) -> KSigningKey {
        self.to_kdate(date).to_ksigning(region, service)
    }
}

impl KDateKey {
    /// Create a new `KRegionKey` from this `KDateKey` and a region.
    pub fn to_kregion(&self, region: &str) -> KRegionKey {
        KRegionKey {
            key: hmac_sha256(self.key.as_slice(), region.as_bytes()),
        }
    }

    /// Create a new `KServiceKey` from this `KDateKey`, a region, and a service.
    pub fn to_kservice(&self, region: &str, service: &str) -> KServiceKey {
        self.to_kregion(region).to_kservice(service)
    }

    /// Create a new `KSigningKey` from this `KDateKey`, a region, and a service.
    pub fn to_ksigning(&self, region: &str, service: &str) -> KSigningKey {
        self.to_kregion(region).to_ksigning(service)
    }
}

impl KRegionKey {
    /// Create a new `KServiceKey` from this `KRegionKey` and a service.
    pub fn to_kservice(&self, service: &str) -> KServiceKey {
        KServiceKey {
            key: hmac_sha256(self.key.as_slice(), service.as_bytes()),
        }
    }

    /// Create a new `KSigningKey` from this `KRegionKey` and a service.
    pub fn to_ksigning(&self, service: &str) -> KSigningKey {
        self.to_kservice(service).to_ksigning()
    }
}

impl KServiceKey {
    /// Create a new `KSigningKey` from this `KServiceKey`.
    pub fn to_ksigning(&self) -> KSigningKey {
        KSigningKey {
            key: hmac_sha256(self.key.as_slice(), AWS4_REQUEST.as_bytes()),
        }
    }
}

impl KSigningKey {
    /// Sign a string to sign, returning the lowercase hex signature.
    pub fn sign(&self, string_to_sign: &str) -> String {
        hex::encode(hmac_sha256(self.key.as_slice(), string_to_sign.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use {
        crate::{KSecretKey, SignerError},
        chrono::NaiveDate,
        std::str::FromStr,
    };

    #[test_log::test]
    fn test_key_chain_steps() {
        let date = NaiveDate::from_ymd_opt(2013, 5, 24).unwrap();
        let ksecret = KSecretKey::from_str("wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY").unwrap();
        let rotated = KSecretKey::from_str("wJalrXUtnFEMI/K7MDENG/bPxRfiCZEXAMPLEKEY").unwrap();
        assert_ne!(ksecret, rotated);
        assert_eq!(format!("{:?} {}", ksecret, ksecret), "KSecretKey KSecretKey");

        let kdate = ksecret.to_kdate(date);
        assert_eq!(hex::encode(kdate.as_ref()), "68896419206d6240ad4cd7dc8ba658efbf3b43b53041950083a10833824fcfbb");
        assert_ne!(kdate, rotated.to_kdate(date));
        assert_ne!(kdate, ksecret.to_kdate(date.succ_opt().unwrap()));

        let kregion = kdate.to_kregion("us-east-1");
        assert_eq!(hex::encode(kregion.as_ref()), "0506335cc36b4a971f6beddf0adbd976ee71222cb42c131487e0c12c5c47a025");
        assert_ne!(kregion, kdate.to_kregion("auto"));

        let kservice = kregion.to_kservice("s3");
        assert_eq!(hex::encode(kservice.as_ref()), "05602c14e8b6aad30e7f6dec4b544071f6e4a742934bc5e36415733c47a67d44");
        assert_eq!(format!("{:?} {}", kservice, kregion), "KServiceKey KRegionKey");

        // Every shortcut lands on the same kSigning key as the step-by-step chain.
        let ksigning = kservice.to_ksigning();
        assert_eq!(ksecret.to_ksigning(date, "us-east-1", "s3"), ksigning);
        assert_eq!(kdate.to_ksigning("us-east-1", "s3"), ksigning);
        assert_eq!(kregion.to_ksigning("s3"), ksigning);
        assert_eq!(ksecret.to_kservice(date, "us-east-1", "s3"), kservice);
        assert_eq!(format!("{}", ksigning), "KSigningKey");
    }

    #[test_log::test]
    fn test_s3_signing_key() {
        // Example credentials and date from the AWS S3 SigV4 documentation.
        let date = NaiveDate::from_ymd_opt(2013, 5, 24).unwrap();
        let ksecret = KSecretKey::from_str("wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY").unwrap();

        let ksigning = ksecret.to_ksigning(date, "us-east-1", "s3");
        assert_eq!(
            ksigning.as_ref(),
            &[
                0xdbu8, 0xb8u8, 0x93u8, 0xacu8, 0xc0u8, 0x10u8, 0x96u8, 0x49u8, 0x18u8, 0xf1u8, 0xfdu8, 0x43u8, 0x3au8,
                0xddu8, 0x87u8, 0xc7u8, 0x0eu8, 0x8bu8, 0x0du8, 0xb6u8, 0xbeu8, 0x30u8, 0xc1u8, 0xfbu8, 0xeau8, 0xfeu8,
                0xfau8, 0x5eu8, 0xc6u8, 0xbau8, 0x83u8, 0x78u8
            ]
        );

        // Re-deriving yields the same bytes; there is no hidden nonce in the chain.
        assert_eq!(ksecret.to_ksigning(date, "us-east-1", "s3"), ksigning);

        // The derived key is never the raw secret.
        assert_ne!(ksigning.as_ref().as_slice(), ksecret.as_ref());
    }

    #[test_log::test]
    fn test_ksigning_sign() {
        let date = NaiveDate::from_ymd_opt(2013, 5, 24).unwrap();
        let ksigning = KSecretKey::from_str("wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY")
            .unwrap()
            .to_ksigning(date, "us-east-1", "s3");

        // The GET Object example from the AWS S3 SigV4 documentation.
        let string_to_sign = "AWS4-HMAC-SHA256\n20130524T000000Z\n20130524/us-east-1/s3/aws4_request\n\
            7344ae5b7ee6c3e7e6b0fe0640412a37625d1fbfff95c48bbb2dc43964946972";
        assert_eq!(ksigning.sign(string_to_sign), "f0e8bdb87c964420e857bd35b5d6ed310bd44f0170aba48dd91039c6036bdb41");
    }

    #[test_log::test]
    fn test_empty_secret() {
        assert_eq!(
            KSecretKey::from_str(""),
            Err(SignerError::InvalidArgument("Secret access key must not be empty".to_string()))
        );
    }

    #[test_log::test]
    fn test_long_secret() {
        // Secrets from S3-compatible providers are often longer than AWS's 40 characters.
        let secret = "064c0527a32d9e0241c752d754daad354617ba5f458caaf6d5f07db9e4c18438";
        let ksecret = KSecretKey::from_str(secret).unwrap();
        assert_eq!(ksecret.as_ref(), secret.as_bytes());
    }
}
