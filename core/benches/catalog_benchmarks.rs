use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use modoya::{
  filter_items, recommend, Cart, CartAction, Catalog, ContextData, FilterCriteria, Item, ItemRecord, ModoyaError,
  Pipeline, PipelineControl, Workflows,
};
use modoya::flow::SkipCondition;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use tokio::runtime::Runtime;

const CATEGORIES: [&str; 5] = ["Sofa", "Chair", "Storage", "Lamp", "Table"];
const STYLES: [&str; 4] = ["Scandinavian", "Mid-Century Modern", "Art Deco", "Industrial"];
const MATERIALS: [&str; 4] = ["Velvet", "Oak", "Leather", "Steel"];
const COLORS: [&str; 3] = ["Black", "Natural", "Green"];

fn synthetic_catalog(size: u64) -> Catalog {
  let items = (0..size)
    .map(|i| {
      let idx = i as usize;
      Item::new(
        ItemRecord {
          row_id: Some(i),
          category: Some(CATEGORIES[idx % CATEGORIES.len()].to_string()),
          series: Some(format!("Series {}", i)),
          style: Some(STYLES[idx % STYLES.len()].to_string()),
          material: Some(MATERIALS[idx % MATERIALS.len()].to_string()),
          color: Some(COLORS[idx % COLORS.len()].to_string()),
          location: None,
          season: Some("All Season".to_string()),
          image_file: Some(format!("item_{}.png", i)),
        },
        None,
      )
    })
    .collect();
  Catalog::from_items(items)
}

// --- Catalog reads ---

fn bench_catalog_queries(c: &mut Criterion) {
  let mut group = c.benchmark_group("CatalogQueries");

  for size in [100u64, 1_000, 10_000].iter() {
    let catalog = synthetic_catalog(*size);
    let criteria = FilterCriteria {
      style: Some("art deco".to_string()),
      color: Some("Black".to_string()),
      ..Default::default()
    };

    group.throughput(Throughput::Elements(*size));
    group.bench_with_input(BenchmarkId::new("filter", size), &catalog, |b, catalog| {
      b.iter(|| filter_items(catalog.items(), &criteria).len())
    });
    group.bench_with_input(BenchmarkId::new("options", size), &catalog, |b, catalog| {
      b.iter(|| catalog.options())
    });
    group.bench_with_input(BenchmarkId::new("all_listings", size), &catalog, |b, catalog| {
      b.iter(|| catalog.all_listings().len())
    });
    group.bench_with_input(BenchmarkId::new("recommend", size), &catalog, |b, catalog| {
      let mut rng = StdRng::seed_from_u64(11);
      b.iter(|| recommend(catalog, "Scandinavian", &mut rng).len())
    });
  }
  group.finish();
}

// --- Cart reads ---

fn bench_cart_resolve(c: &mut Criterion) {
  let mut group = c.benchmark_group("CartResolve");
  let catalog = synthetic_catalog(1_000);

  for lines in [1u64, 10, 50].iter() {
    let mut cart = Cart::new();
    for item_id in 0..*lines {
      cart.add(&catalog, item_id * 7).ok();
      if item_id % 2 == 0 {
        cart.update(item_id * 7, CartAction::SetBuy);
      }
    }

    group.throughput(Throughput::Elements(*lines));
    group.bench_with_input(BenchmarkId::from_parameter(lines), &cart, |b, cart| {
      b.iter_batched(
        || cart.clone(),
        |mut cart| cart.resolve(&catalog),
        criterion::BatchSize::SmallInput,
      );
    });
  }
  group.finish();
}

// --- Workflow dispatch ---

#[derive(Default)]
struct BenchContext {
  counter: u64,
}

fn bench_workflow_dispatch(c: &mut Criterion) {
  let mut group = c.benchmark_group("WorkflowDispatch");
  let rt = Runtime::new().unwrap();

  for num_steps in [1usize, 4, 8].iter() {
    let names: Vec<String> = (0..*num_steps).map(|i| format!("step_{}", i)).collect();
    let step_defs: Vec<(&str, bool, Option<SkipCondition<BenchContext>>)> = names.iter().map(|name| (name.as_str(), false, None)).collect();
    let mut pipeline = Pipeline::<BenchContext, ModoyaError>::new(&step_defs);
    for name in &names {
      pipeline.on_root(name, |ctx: ContextData<BenchContext>| async move {
        ctx.write().counter += 1;
        Ok::<_, ModoyaError>(PipelineControl::Continue)
      });
    }
    let workflows = Arc::new(Workflows::<ModoyaError>::new());
    workflows.register_pipeline(pipeline);

    group.throughput(Throughput::Elements(*num_steps as u64));
    group.bench_with_input(BenchmarkId::from_parameter(num_steps), num_steps, |b, _| {
      b.to_async(&rt).iter_batched(
        || ContextData::new(BenchContext::default()),
        |ctx| {
          let workflows = workflows.clone();
          async move { workflows.run(ctx).await.unwrap() }
        },
        criterion::BatchSize::SmallInput,
      );
    });
  }
  group.finish();
}

criterion_group!(benches, bench_catalog_queries, bench_cart_resolve, bench_workflow_dispatch);
criterion_main!(benches);
