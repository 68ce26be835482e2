use crate::config::GuardConfig;
use crate::signature::{self, HmacSha256Engine, SignedRequest, VerifyError};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use common::requests::{IngestAck, RejectionBody};
use log::{error, warn};

const SIGNATURE_HEADER: &str = "X-Signature";
const TIMESTAMP_HEADER: &str = "X-Signature-Timestamp";
const IDEMPOTENCY_HEADER: &str = "X-Idempotency-Key";

/// Absent or non-UTF-8 headers verify as the empty string, which the
/// signature module treats as missing (or, for the idempotency key, as a
/// legitimate empty field in the signed base).
fn header_value(req: &HttpRequest, name: &str) -> String {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}

/// The Actix handler for `POST /api/ingest/events`.
///
/// The body is accepted but not part of the signed base; downstream
/// consumers pick it up once the call is authenticated. Replay suppression
/// via the idempotency key is the storage layer's concern, not handled here.
pub(crate) async fn process(
    req: HttpRequest,
    config: web::Data<GuardConfig>,
    _body: web::Bytes,
) -> impl Responder {
    let signed = SignedRequest {
        method: req.method().to_string(),
        path: req.path().to_string(),
        signature: header_value(&req, SIGNATURE_HEADER),
        timestamp: header_value(&req, TIMESTAMP_HEADER),
        idempotency_key: header_value(&req, IDEMPOTENCY_HEADER),
    };

    match signature::verify(&signed, &config.secret, &HmacSha256Engine) {
        Ok(()) => HttpResponse::Accepted().json(IngestAck {
            status: "accepted".to_string(),
            idempotency_key: signed.idempotency_key,
        }),
        Err(err @ (VerifyError::MissingSignature | VerifyError::BadSignature)) => {
            // Full detail stays in the log; the client only learns that it
            // was unauthorized.
            warn!(
                "rejected ingest call {} {}: {}",
                signed.method, signed.path, err
            );
            HttpResponse::Unauthorized().json(RejectionBody {
                error: "unauthorized".to_string(),
                reason: err.to_string(),
            })
        }
        Err(VerifyError::Crypto(detail)) => {
            error!("signature backend failure: {}", detail);
            HttpResponse::InternalServerError().json(RejectionBody {
                error: "internal".to_string(),
                reason: "signature backend".to_string(),
            })
        }
    }
}
