//! HMAC signature verification for inbound ingestion calls.
//!
//! Every trusted caller signs a canonical representation of its request —
//! `METHOD\nPATH\nTIMESTAMP\nIDEMPOTENCY_KEY`, newline-joined, exactly four
//! fields — with HMAC-SHA256 under the shared secret, and sends the result
//! as a lowercase hex header. The guard recomputes the MAC and compares it
//! in constant time.
//!
//! This is a stateless, single-shot predicate: one crypto operation per
//! request, no persisted state, no replay tracking. The idempotency key is
//! part of the signed base string (an absent header signs as the empty
//! string, not as a missing field) but uniqueness tracking is the storage
//! layer's job, not the guard's.

use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// The parts of an inbound request that participate in verification.
/// Absent headers are represented as empty strings.
#[derive(Debug, Clone)]
pub struct SignedRequest {
    pub method: String,
    pub path: String,
    /// Lowercase hex HMAC from the `X-Signature` header.
    pub signature: String,
    /// Caller-supplied timestamp from `X-Signature-Timestamp`, included in
    /// the signed base verbatim. The guard does not compare it to a clock.
    pub timestamp: String,
    /// Opaque dedup token from `X-Idempotency-Key`; may be empty.
    pub idempotency_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VerifyError {
    /// Signature or timestamp header absent/empty. Checked before any MAC
    /// computation.
    #[error("missing signature")]
    MissingSignature,
    /// Headers present but the MAC does not match (or is not valid hex).
    #[error("bad signature")]
    BadSignature,
    /// The MAC primitive itself failed. A deployment problem, not a
    /// malformed request; callers surface this as a 500, never a 401.
    #[error("signature backend failure: {0}")]
    Crypto(String),
}

/// MAC primitive seam. Production code uses [`HmacSha256Engine`]; tests can
/// substitute a double to observe whether the primitive was invoked.
pub trait MacEngine {
    fn mac(&self, key: &[u8], message: &[u8]) -> Result<Vec<u8>, String>;
}

pub struct HmacSha256Engine;

impl MacEngine for HmacSha256Engine {
    fn mac(&self, key: &[u8], message: &[u8]) -> Result<Vec<u8>, String> {
        let mut mac = HmacSha256::new_from_slice(key).map_err(|e| e.to_string())?;
        mac.update(message);
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

/// Builds the canonical base string. Both signer and verifier must agree on
/// this exactly, including the empty string for an absent idempotency key.
pub fn canonical_base(method: &str, path: &str, timestamp: &str, idempotency_key: &str) -> String {
    format!("{}\n{}\n{}\n{}", method, path, timestamp, idempotency_key)
}

/// Computes the lowercase hex signature for a request. Used by trusted
/// callers and by tests to produce valid headers.
pub fn sign(
    engine: &dyn MacEngine,
    secret: &[u8],
    method: &str,
    path: &str,
    timestamp: &str,
    idempotency_key: &str,
) -> Result<String, VerifyError> {
    let base = canonical_base(method, path, timestamp, idempotency_key);
    engine
        .mac(secret, base.as_bytes())
        .map(hex::encode)
        .map_err(VerifyError::Crypto)
}

/// Constant-time comparison for verification (no early exit).
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

/// Verifies one request against the shared secret.
///
/// Missing signature or timestamp short-circuits before the MAC primitive
/// is touched. A present-but-wrong signature is `BadSignature`; only a
/// failure of the primitive itself is `Crypto`.
pub fn verify(
    request: &SignedRequest,
    secret: &[u8],
    engine: &dyn MacEngine,
) -> Result<(), VerifyError> {
    if request.signature.is_empty() || request.timestamp.is_empty() {
        return Err(VerifyError::MissingSignature);
    }

    let supplied = match hex::decode(&request.signature) {
        Ok(bytes) => bytes,
        Err(_) => return Err(VerifyError::BadSignature),
    };

    let base = canonical_base(
        &request.method,
        &request.path,
        &request.timestamp,
        &request.idempotency_key,
    );
    let expected = engine
        .mac(secret, base.as_bytes())
        .map_err(VerifyError::Crypto)?;

    if constant_time_eq(&expected, &supplied) {
        Ok(())
    } else {
        Err(VerifyError::BadSignature)
    }
}
