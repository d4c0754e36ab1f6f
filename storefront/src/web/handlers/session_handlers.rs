// modoya_storefront/src/web/handlers/session_handlers.rs

use actix_web::{FromRequest, HttpRequest, HttpResponse};
use serde_json::json;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::errors::AppError;

pub const SESSION_HEADER: &str = "X-Session-ID";

// --- Extractor for the caller's session ---
// Carts are keyed by this id. Any UUID is accepted; the store creates an
// empty cart the first time it sees one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId(pub String);

impl SessionId {
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl FromRequest for SessionId {
  type Error = AppError;
  type Future = futures_util::future::Ready<Result<Self, Self::Error>>;

  fn from_request(req: &HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
    let parsed = req
      .headers()
      .get(SESSION_HEADER)
      .and_then(|value| value.to_str().ok())
      .and_then(|value| Uuid::parse_str(value.trim()).ok());

    match parsed {
      Some(session_uuid) => futures_util::future::ready(Ok(SessionId(session_uuid.to_string()))),
      None => {
        warn!("SessionId extractor: Missing or invalid {} header.", SESSION_HEADER);
        futures_util::future::ready(Err(AppError::Session(format!(
          "A session is required. Send a valid {} header (see POST /api/v1/session).",
          SESSION_HEADER
        ))))
      }
    }
  }
}

#[instrument(name = "handler::create_session")]
pub async fn create_session_handler() -> HttpResponse {
  let session_id = Uuid::new_v4();
  info!("New session issued: {}", session_id);
  HttpResponse::Created().json(json!({
      "message": "Session created.",
      "sessionId": session_id.to_string(),
      "header": SESSION_HEADER,
  }))
}
