//! AWS Signature Version 4
//!
//! Just enough of SigV4 to sign a JSON POST with no query string.
//! Signed headers are `host` and `x-amz-date`.

use std::fmt;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use super::types::InvokeError;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";
const SIGNED_HEADERS: &str = "host;x-amz-date";

/// Static AWS access key pair
#[derive(Clone)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"***")
            .finish()
    }
}

/// What is being signed
pub struct SigningRequest<'a> {
    pub method: &'a str,
    pub host: &'a str,
    /// Path exactly as sent on the wire (already percent-encoded)
    pub path: &'a str,
    pub payload: &'a [u8],
    pub region: &'a str,
    pub service: &'a str,
}

/// Headers to attach to the outgoing request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub amz_date: String,
    pub authorization: String,
}

pub fn sign(
    credentials: &Credentials,
    request: &SigningRequest<'_>,
    now: DateTime<Utc>,
) -> Result<SignedHeaders, InvokeError> {
    let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
    let date = now.format("%Y%m%d").to_string();
    let scope = format!("{}/{}/{}/aws4_request", date, request.region, request.service);

    let canonical = canonical_request(request, &amz_date);
    let string_to_sign = format!(
        "{}\n{}\n{}\n{}",
        ALGORITHM,
        amz_date,
        scope,
        hex_sha256(canonical.as_bytes())
    );

    let key = signing_key(
        &credentials.secret_access_key,
        &date,
        request.region,
        request.service,
    )?;
    let signature = hex::encode(hmac_sha256(&key, string_to_sign.as_bytes())?);

    Ok(SignedHeaders {
        authorization: format!(
            "{} Credential={}/{}, SignedHeaders={}, Signature={}",
            ALGORITHM, credentials.access_key_id, scope, SIGNED_HEADERS, signature
        ),
        amz_date,
    })
}

/// Canonical request; path segments are encoded a second time as AWS
/// requires for every service but S3
pub fn canonical_request(request: &SigningRequest<'_>, amz_date: &str) -> String {
    let canonical_uri = request
        .path
        .split('/')
        .map(urlencoding::encode)
        .collect::<Vec<_>>()
        .join("/");

    format!(
        "{}\n{}\n\nhost:{}\nx-amz-date:{}\n\n{}\n{}",
        request.method,
        canonical_uri,
        request.host,
        amz_date,
        SIGNED_HEADERS,
        hex_sha256(request.payload)
    )
}

pub fn signing_key(
    secret: &str,
    date: &str,
    region: &str,
    service: &str,
) -> Result<Vec<u8>, InvokeError> {
    let k_date = hmac_sha256(format!("AWS4{}", secret).as_bytes(), date.as_bytes())?;
    let k_region = hmac_sha256(&k_date, region.as_bytes())?;
    let k_service = hmac_sha256(&k_region, service.as_bytes())?;
    hmac_sha256(&k_service, b"aws4_request")
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>, InvokeError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|e| InvokeError::Signing(e.to_string()))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

fn hex_sha256(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn request<'a>(path: &'a str, payload: &'a [u8]) -> SigningRequest<'a> {
        SigningRequest {
            method: "POST",
            host: "lambda.us-west-2.amazonaws.com",
            path,
            payload,
            region: "us-west-2",
            service: "lambda",
        }
    }

    #[test]
    fn test_signing_key_reference_vector() {
        let key = signing_key(
            "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
            "20120215",
            "us-east-1",
            "iam",
        )
        .unwrap();
        assert_eq!(
            hex::encode(key),
            "f4780e2d9f65fa895f9c67b32ce1baf0b0d8a43505a000a1a9e090d414db404d"
        );
    }

    #[test]
    fn test_canonical_request_layout() {
        let canonical = canonical_request(
            &request("/2015-03-31/functions/triage-bot/invocations", b""),
            "20240101T000000Z",
        );
        assert_eq!(
            canonical,
            "POST\n\
             /2015-03-31/functions/triage-bot/invocations\n\
             \n\
             host:lambda.us-west-2.amazonaws.com\n\
             x-amz-date:20240101T000000Z\n\
             \n\
             host;x-amz-date\n\
             e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_canonical_uri_double_encodes() {
        let canonical = canonical_request(
            &request("/2015-03-31/functions/arn%3Aaws%3Alambda/invocations", b"{}"),
            "20240101T000000Z",
        );
        assert!(canonical.contains("/functions/arn%253Aaws%253Alambda/invocations\n"));
    }

    #[test]
    fn test_authorization_header() {
        let credentials = Credentials {
            access_key_id: "AKIDEXAMPLE".to_string(),
            secret_access_key: "secret".to_string(),
        };
        let now = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        let payload = br#"{"identifier":"a1"}"#;
        let req = request("/2015-03-31/functions/triage-bot/invocations", payload);

        let signed = sign(&credentials, &req, now).unwrap();
        assert_eq!(signed.amz_date, "20240102T030405Z");
        assert!(signed.authorization.starts_with(
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20240102/us-west-2/lambda/aws4_request, \
             SignedHeaders=host;x-amz-date, Signature="
        ));

        let signature = signed.authorization.rsplit('=').next().unwrap();
        assert_eq!(signature.len(), 64);

        // Deterministic for identical input, sensitive to the payload.
        assert_eq!(sign(&credentials, &req, now).unwrap(), signed);
        let other = request("/2015-03-31/functions/triage-bot/invocations", b"{}");
        assert_ne!(sign(&credentials, &other, now).unwrap(), signed);
    }

    #[test]
    fn test_credentials_debug_redacted() {
        let credentials = Credentials {
            access_key_id: "AKID".to_string(),
            secret_access_key: "topsecret".to_string(),
        };
        assert!(!format!("{:?}", credentials).contains("topsecret"));
    }
}
