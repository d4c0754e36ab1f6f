// modoya/src/flow/pipeline.rs

//! `Pipeline<TData, Err>`: step definitions, handler registration and execution.

use crate::error::ModoyaError;
use crate::flow::context_data::ContextData;
use crate::flow::control::{PipelineControl, PipelineResult};
use crate::flow::step::{SkipCondition, StepDef};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use tracing::{event, instrument, span, Instrument, Level};

/// A boxed async step handler.
///
/// Handlers receive their own clone of the pipeline's `ContextData` and must
/// release any lock guard before awaiting.
pub type Handler<TData, Err> = Box<
  dyn Fn(ContextData<TData>) -> Pin<Box<dyn Future<Output = Result<PipelineControl, Err>> + Send>>
    + Send
    + Sync,
>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
  Before,
  On,
  After,
}

impl Phase {
  fn label(self) -> &'static str {
    match self {
      Phase::Before => "before",
      Phase::On => "on",
      Phase::After => "after",
    }
  }
}

/// Ordered steps over a root context `TData`, with handlers returning `Err`.
///
/// `Err: From<ModoyaError>` lets the engine report its own failures (such as a
/// required step with no handlers) through the pipeline's error type.
pub struct Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<ModoyaError> + Send + Sync + 'static,
{
  steps: Vec<StepDef<TData>>,
  before: HashMap<String, Vec<Handler<TData, Err>>>,
  on: HashMap<String, Vec<Handler<TData, Err>>>,
  after: HashMap<String, Vec<Handler<TData, Err>>>,
}

impl<TData, Err> Pipeline<TData, Err>
where
  TData: 'static + Send + Sync,
  Err: std::error::Error + From<ModoyaError> + Send + Sync + 'static,
{
  /// Each tuple is `(name, optional, skip_if)`.
  pub fn new(step_defs: &[(&str, bool, Option<SkipCondition<TData>>)]) -> Self {
    let steps = step_defs
      .iter()
      .map(|(name, optional, skip_if)| StepDef {
        name: (*name).to_string(),
        optional: *optional,
        skip_if: skip_if.clone(),
      })
      .collect();

    Self {
      steps,
      before: HashMap::new(),
      on: HashMap::new(),
      after: HashMap::new(),
    }
  }

  /// Registering a handler for an undeclared step is a wiring bug, so it panics.
  fn ensure_step_exists(&self, step_name: &str) {
    if !self.steps.iter().any(|s| s.name == step_name) {
      panic!("Pipeline setup error: step '{}' is not declared.", step_name);
    }
  }

  fn push_handler<F, UserErr>(
    &mut self,
    phase: Phase,
    step_name: &str,
    handler_fn: impl Fn(ContextData<TData>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<PipelineControl, UserErr>> + Send + 'static,
    UserErr: Into<Err> + Send + Sync + 'static,
  {
    self.ensure_step_exists(step_name);
    let handler: Handler<TData, Err> = Box::new(move |ctx_data| {
      let fut = handler_fn(ctx_data);
      Box::pin(async move { fut.await.map_err(Into::into) })
    });
    let table = match phase {
      Phase::Before => &mut self.before,
      Phase::On => &mut self.on,
      Phase::After => &mut self.after,
    };
    table.entry(step_name.to_string()).or_default().push(handler);
  }

  pub fn before_root<F, UserErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(ContextData<TData>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<PipelineControl, UserErr>> + Send + 'static,
    UserErr: Into<Err> + Send + Sync + 'static,
  {
    self.push_handler(Phase::Before, step_name, handler_fn);
  }

  pub fn on_root<F, UserErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(ContextData<TData>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<PipelineControl, UserErr>> + Send + 'static,
    UserErr: Into<Err> + Send + Sync + 'static,
  {
    self.push_handler(Phase::On, step_name, handler_fn);
  }

  pub fn after_root<F, UserErr>(
    &mut self,
    step_name: &str,
    handler_fn: impl Fn(ContextData<TData>) -> F + Send + Sync + 'static,
  ) where
    F: Future<Output = Result<PipelineControl, UserErr>> + Send + 'static,
    UserErr: Into<Err> + Send + Sync + 'static,
  {
    self.push_handler(Phase::After, step_name, handler_fn);
  }

  fn handlers(&self, phase: Phase, step_name: &str) -> &[Handler<TData, Err>] {
    let table = match phase {
      Phase::Before => &self.before,
      Phase::On => &self.on,
      Phase::After => &self.after,
    };
    table.get(step_name).map(Vec::as_slice).unwrap_or(&[])
  }

  /// Runs every handler of one phase in registration order.
  async fn run_phase(
    &self,
    phase: Phase,
    step_name: &str,
    ctx_data: &ContextData<TData>,
  ) -> Result<PipelineControl, Err> {
    for (handler_idx, handler_fn) in self.handlers(phase, step_name).iter().enumerate() {
      let handler_span = span!(Level::DEBUG, "step_handler", phase = phase.label(), handler_index = handler_idx);
      match handler_fn(ctx_data.clone()).instrument(handler_span).await {
        Ok(PipelineControl::Continue) => {}
        Ok(PipelineControl::Stop) => {
          event!(Level::INFO, phase = phase.label(), "Pipeline stopped by handler.");
          return Ok(PipelineControl::Stop);
        }
        Err(e) => {
          event!(Level::ERROR, phase = phase.label(), error = %e, "Handler failed.");
          return Err(e);
        }
      }
    }
    Ok(PipelineControl::Continue)
  }

  /// Executes every step against `ctx_data`.
  #[instrument(
    name = "Pipeline::run",
    skip_all,
    fields(context_type = %std::any::type_name::<TData>(), num_steps = self.steps.len()),
    err(Display)
  )]
  pub async fn run(&self, ctx_data: ContextData<TData>) -> Result<PipelineResult, Err> {
    for (step_idx, step_def) in self.steps.iter().enumerate() {
      let step_name = step_def.name.as_str();
      let step_span = span!(Level::INFO, "pipeline_step", step_name, step_index = step_idx);

      let outcome = async {
        if let Some(skip_if) = &step_def.skip_if {
          if skip_if(ctx_data.clone()) {
            event!(Level::INFO, "Step skipped by its skip condition.");
            return Ok(PipelineControl::Continue);
          }
        }

        let has_handlers = [Phase::Before, Phase::On, Phase::After]
          .iter()
          .any(|phase| !self.handlers(*phase, step_name).is_empty());
        if !has_handlers {
          if step_def.optional {
            event!(Level::DEBUG, "Optional step has no handlers, skipping.");
            return Ok(PipelineControl::Continue);
          }
          return Err(Err::from(ModoyaError::HandlerMissing {
            step_name: step_def.name.clone(),
          }));
        }

        for phase in [Phase::Before, Phase::On, Phase::After] {
          if self.run_phase(phase, step_name, &ctx_data).await? == PipelineControl::Stop {
            return Ok(PipelineControl::Stop);
          }
        }
        Ok(PipelineControl::Continue)
      }
      .instrument(step_span)
      .await?;

      if outcome == PipelineControl::Stop {
        return Ok(PipelineResult::Stopped);
      }
    }

    event!(Level::DEBUG, "Pipeline completed.");
    Ok(PipelineResult::Completed)
  }
}
