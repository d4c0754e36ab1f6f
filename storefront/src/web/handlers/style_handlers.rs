// modoya_storefront/src/web/handlers/style_handlers.rs

use actix_web::{web, HttpResponse};
use modoya::{ContextData, PipelineResult};
use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::pipelines::contexts::StyleMatchCtxData;
use crate::state::AppState;

#[derive(Deserialize, Debug)]
pub struct StyleMatchRequestPayload {
  #[serde(default)]
  pub images: Vec<String>,
}

#[instrument(name = "handler::style_match", skip(app_state, req_payload), fields(image_count = req_payload.images.len()))]
pub async fn style_match_handler(
  app_state: web::Data<AppState>,
  req_payload: web::Json<StyleMatchRequestPayload>,
) -> Result<HttpResponse, AppError> {
  let ctx_data = ContextData::new(StyleMatchCtxData::new(
    app_state.get_ref().clone(),
    req_payload.into_inner().images,
  ));

  match app_state.workflows.run(ctx_data.clone()).await {
    Ok(PipelineResult::Completed) => {
      let style_match = ctx_data
        .write()
        .style_match
        .take()
        .ok_or_else(|| AppError::Internal("Style match completed without a result.".to_string()))?;
      info!(
        "Style match complete: '{}' with {} recommendation(s).",
        style_match.style,
        style_match.recommendations.len()
      );

      Ok(HttpResponse::Ok().json(style_match))
    }
    Ok(PipelineResult::Stopped) => {
      warn!("Style match pipeline was stopped by a handler.");
      Err(AppError::PipelineHaltedByHandler)
    }
    Err(app_err) => {
      warn!("Style match pipeline failed: {:?}", app_err);
      Err(app_err)
    }
  }
}
