// modoya_storefront/src/pipelines/style_match_pipeline.rs
use crate::errors::AppError;
use crate::pipelines::contexts::StyleMatchCtxData;
use crate::state::AppState;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use modoya::style_match::MAX_STYLE_IMAGES;
use modoya::{match_style, ContextData, ModoyaError, Pipeline, PipelineControl, StyleImage, Workflows};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Accepts raw base64 or a `data:<mime>;base64,<payload>` URL.
pub fn decode_upload(encoded: &str) -> Result<Vec<u8>, base64::DecodeError> {
  let trimmed = encoded.trim();
  let payload = match trimmed.strip_prefix("data:") {
    Some(rest) => rest.split_once(',').map_or(rest, |(_, data)| data),
    None => trimmed,
  };
  STANDARD.decode(payload)
}

pub fn register_style_match_pipeline(workflows: &Arc<Workflows<AppError>>, _app_state: &AppState) {
  let mut p = Pipeline::<StyleMatchCtxData, AppError>::new(&[
    ("decode_style_uploads", false, None),
    ("match_uploaded_style", false, None),
  ]);

  // Step 1: Count and decode the uploads before anything leaves the process.
  p.on_root("decode_style_uploads", |ctx_data: ContextData<StyleMatchCtxData>| {
    Box::pin(async move {
      let encoded_images = ctx_data.read().encoded_images.clone();
      if encoded_images.len() > MAX_STYLE_IMAGES {
        warn!("Style Match Pipeline: {} images uploaded.", encoded_images.len());
        return Err(AppError::Validation(format!(
          "At most {} images can be analysed at once.",
          MAX_STYLE_IMAGES
        )));
      }

      let mut images = Vec::with_capacity(encoded_images.len());
      for (idx, encoded) in encoded_images.iter().enumerate() {
        let bytes = decode_upload(encoded).map_err(|e| {
          warn!("Style Match Pipeline: Image {} is not valid base64: {}", idx + 1, e);
          AppError::Validation(format!("Image {} is not valid base64.", idx + 1))
        })?;
        images.push(StyleImage { bytes });
      }

      info!("Style Match Pipeline: {} image(s) decoded.", images.len());
      ctx_data.write().images = images;
      Ok(PipelineControl::Continue)
    })
  });

  // Step 2: Classify the photos once, then sample catalog items in the top style.
  p.on_root("match_uploaded_style", |ctx_data: ContextData<StyleMatchCtxData>| {
    Box::pin(async move {
      let (classifier, catalog, images) = {
        let guard = ctx_data.read();
        (
          guard.app_state.classifier.clone(),
          guard.app_state.catalog.clone(),
          guard.images.clone(),
        )
      }; // guard dropped before the call

      let mut rng = StdRng::from_rng(&mut rand::rng());
      let style_match = match_style(classifier.as_ref(), &catalog, &images, &mut rng)
        .await
        .map_err(|e| {
          match &e {
            ModoyaError::ClassifierFailure(_) | ModoyaError::MalformedStyleAnalysis(_) => {
              error!("Style Match Pipeline: Vision service answer unusable: {}", e)
            }
            _ => warn!("Style Match Pipeline: Upload rejected: {}", e),
          }
          AppError::from_domain(e)
        })?;

      info!(
        "Style Match Pipeline: {} recommendation(s) for style '{}'.",
        style_match.recommendations.len(),
        style_match.style
      );
      ctx_data.write().style_match = Some(style_match);
      Ok::<_, AppError>(PipelineControl::Continue)
    })
  });

  workflows.register_pipeline(p);
  info!("Style Match pipeline registered.");
}
