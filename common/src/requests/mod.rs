use serde::{Deserialize, Serialize};

/// Body returned by the ingestion guard when a request is rejected.
/// The reason string is deliberately coarse ("missing signature" or
/// "bad signature"); specifics stay in the server log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RejectionBody {
    pub error: String,
    pub reason: String,
}

/// Body returned for an accepted ingestion call. Echoes the caller's
/// idempotency key so clients can correlate acks with submissions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestAck {
    pub status: String,
    pub idempotency_key: String,
}
