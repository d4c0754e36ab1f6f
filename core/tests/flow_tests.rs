// tests/flow_tests.rs
mod common;

use common::*;
use modoya::flow::SkipCondition;
use modoya::{ContextData, ModoyaError, Pipeline, PipelineControl, PipelineResult, Workflows};
use serial_test::serial;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn three_step_pipeline() -> Pipeline<TestContext, TestError> {
  let mut pipeline = Pipeline::new(&[("first", false, None), ("second", false, None), ("third", false, None)]);
  pipeline.on_root("first", create_simple_handler("first", "a"));
  pipeline.on_root("second", create_simple_handler("second", "b"));
  pipeline.on_root("third", create_simple_handler("third", "c"));
  pipeline
}

#[tokio::test]
async fn test_steps_run_in_declared_order() {
  setup_tracing();
  let pipeline = three_step_pipeline();

  let ctx = ContextData::new(TestContext::default());
  let result = pipeline.run(ctx.clone()).await;

  assert_eq!(result, Ok(PipelineResult::Completed));
  let guard = ctx.read();
  assert_eq!(guard.message, "abc");
  assert_eq!(guard.steps_executed, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn test_before_on_after_order_within_a_step() {
  let mut pipeline = Pipeline::<TestContext, TestError>::new(&[("only", false, None)]);
  pipeline.after_root("only", create_simple_handler("after", "3"));
  pipeline.on_root("only", create_simple_handler("on", "2"));
  pipeline.before_root("only", create_simple_handler("before", "1"));

  let ctx = ContextData::new(TestContext::default());
  pipeline.run(ctx.clone()).await.unwrap();

  assert_eq!(ctx.read().message, "123");
}

#[tokio::test]
async fn test_stop_halts_remaining_steps() {
  let pipeline = three_step_pipeline();
  let ctx = ContextData::new(TestContext {
    should_stop_at: Some("second".to_string()),
    ..Default::default()
  });

  let result = pipeline.run(ctx.clone()).await;

  assert_eq!(result, Ok(PipelineResult::Stopped));
  assert_eq!(ctx.read().steps_executed, vec!["first", "second"]);
}

#[tokio::test]
async fn test_handler_error_propagates() {
  let mut pipeline = Pipeline::<TestContext, TestError>::new(&[("ok", false, None), ("boom", false, None), ("never", false, None)]);
  pipeline.on_root("ok", create_simple_handler("ok", "x"));
  pipeline.on_root("boom", create_failing_handler("boom", "kaput"));
  pipeline.on_root("never", create_simple_handler("never", "y"));

  let ctx = ContextData::new(TestContext::default());
  let result = pipeline.run(ctx.clone()).await;

  assert_eq!(result, Err(TestError::Handler("kaput".to_string())));
  assert_eq!(ctx.read().steps_executed, vec!["ok", "boom"]);
}

#[tokio::test]
async fn test_missing_handler_on_required_step_fails() {
  let mut pipeline = Pipeline::<TestContext, TestError>::new(&[("first", false, None), ("unwired", false, None)]);
  pipeline.on_root("first", create_simple_handler("first", "a"));

  let result = pipeline.run(ContextData::new(TestContext::default())).await;

  match result {
    Err(TestError::Engine(msg)) => {
      assert!(msg.contains("HandlerMissing"));
      assert!(msg.contains("unwired"));
    }
    other => panic!("Expected HandlerMissing, got {:?}", other),
  }
}

#[tokio::test]
async fn test_optional_step_without_handler_is_skipped() {
  let mut pipeline = Pipeline::<TestContext, TestError>::new(&[("first", false, None), ("hook", true, None)]);
  pipeline.on_root("first", create_simple_handler("first", "a"));

  let result = pipeline.run(ContextData::new(TestContext::default())).await;
  assert_eq!(result, Ok(PipelineResult::Completed));
}

#[tokio::test]
async fn test_skip_condition_bypasses_step() {
  let skip_when_counted: SkipCondition<TestContext> = Arc::new(|ctx: ContextData<TestContext>| ctx.read().counter > 0);
  let mut pipeline =
    Pipeline::<TestContext, TestError>::new(&[("first", false, None), ("second", false, Some(skip_when_counted))]);
  pipeline.on_root("first", create_simple_handler("first", "a"));
  pipeline.on_root("second", create_simple_handler("second", "b"));

  let ctx = ContextData::new(TestContext::default());
  pipeline.run(ctx.clone()).await.unwrap();

  assert_eq!(ctx.read().message, "a");
}

#[test]
#[should_panic(expected = "not declared")]
fn test_registering_undeclared_step_panics() {
  let mut pipeline = Pipeline::<TestContext, TestError>::new(&[("first", false, None)]);
  pipeline.on_root("ghost", create_simple_handler("ghost", "x"));
}

#[derive(Debug, Default)]
struct AlphaContext {
  value: String,
}

#[derive(Debug, Default)]
struct BetaContext {
  value: i32,
}

#[tokio::test]
async fn test_workflows_dispatch_by_context_type() {
  setup_tracing();
  let workflows = Workflows::<TestError>::new();

  let mut alpha = Pipeline::<AlphaContext, TestError>::new(&[("alpha", false, None)]);
  alpha.on_root("alpha", |ctx: ContextData<AlphaContext>| async move {
    ctx.write().value = "alpha ran".to_string();
    Ok::<_, TestError>(PipelineControl::Continue)
  });
  workflows.register_pipeline(alpha);

  let mut beta = Pipeline::<BetaContext, TestError>::new(&[("beta", false, None)]);
  beta.on_root("beta", |ctx: ContextData<BetaContext>| async move {
    ctx.write().value = 100;
    Ok::<_, ModoyaError>(PipelineControl::Continue)
  });
  workflows.register_pipeline(beta);

  assert!(workflows.is_registered::<AlphaContext>());
  assert!(workflows.is_registered::<BetaContext>());

  let alpha_ctx = ContextData::new(AlphaContext::default());
  assert_eq!(workflows.run(alpha_ctx.clone()).await, Ok(PipelineResult::Completed));
  assert_eq!(alpha_ctx.read().value, "alpha ran");

  let beta_ctx = ContextData::new(BetaContext::default());
  assert_eq!(workflows.run(beta_ctx.clone()).await, Ok(PipelineResult::Completed));
  assert_eq!(beta_ctx.read().value, 100);
}

#[tokio::test]
async fn test_workflows_unregistered_context_is_configuration_error() {
  let workflows = Workflows::<TestError>::new();

  #[derive(Debug, Default)]
  struct Unregistered;

  let result = workflows.run(ContextData::new(Unregistered)).await;

  match result {
    Err(TestError::Engine(msg)) => {
      assert!(msg.contains("ConfigurationError"));
      assert!(msg.contains("Unregistered"));
    }
    other => panic!("Expected ConfigurationError, got {:?}", other),
  }
}

static SHARED_RUNS: AtomicUsize = AtomicUsize::new(0);

#[tokio::test]
#[serial]
async fn test_registered_pipeline_is_reused_across_runs() {
  SHARED_RUNS.store(0, Ordering::SeqCst);
  let workflows = Workflows::<TestError>::new();
  let mut pipeline = Pipeline::<AlphaContext, TestError>::new(&[("count", false, None)]);
  pipeline.on_root("count", |_ctx: ContextData<AlphaContext>| async move {
    SHARED_RUNS.fetch_add(1, Ordering::SeqCst);
    Ok::<_, TestError>(PipelineControl::Continue)
  });
  workflows.register_pipeline(pipeline);

  for _ in 0..3 {
    workflows.run(ContextData::new(AlphaContext::default())).await.unwrap();
  }

  assert_eq!(SHARED_RUNS.load(Ordering::SeqCst), 3);
}
