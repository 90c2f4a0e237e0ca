use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::{Duration, TimeZone, Utc};
use campkitchen_events::NoopEventBus;
use campkitchen_kitchen::{InMemoryKitchen, KitchenConfig, KitchenEngine};
use campkitchen_recipients::{Recipient, SpecialNeeds};
use campkitchen_stock::StockItem;

/// Engine with `items` stock lines (mixed categories) and `households` recipients.
/// Quantities are large enough that timed loops never run the kitchen dry.
fn setup_kitchen(items: usize, households: usize) -> InMemoryKitchen<NoopEventBus> {
    let mut engine = KitchenEngine::in_memory(KitchenConfig::default(), NoopEventBus);
    for i in 0..items {
        let name = format!("item-{i:04}");
        let item = match i % 3 {
            0 => StockItem::staple(name, 1.0e9),
            1 => StockItem::protein(name, 1.0e9),
            _ => StockItem::vegetable(name, 1.0e9),
        }
        .unwrap();
        engine.add_stock_item(item).unwrap();
    }
    for i in 0..households {
        let recipient = Recipient::new(
            format!("Household {i}"),
            format!("KRB-{i:04}"),
            SpecialNeeds::General,
            4,
        )
        .unwrap();
        engine.register_recipient(recipient).unwrap();
    }
    engine
}

fn bench_available_portions(c: &mut Criterion) {
    let mut group = c.benchmark_group("available_portions");

    for items in [3usize, 30, 300] {
        group.throughput(Throughput::Elements(items as u64));
        group.bench_with_input(BenchmarkId::from_parameter(items), &items, |b, &items| {
            let engine = setup_kitchen(items, 1);
            b.iter(|| black_box(engine.compute_available_portions()));
        });
    }

    group.finish();
}

fn bench_distribution_latency(c: &mut Criterion) {
    let mut group = c.benchmark_group("distribution_latency");
    group.sample_size(500);

    group.bench_function("distribute_with_history", |b| {
        let mut engine = setup_kitchen(30, 100);
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        let mut tick = 0i64;
        b.iter(|| {
            // Distribution ids are per-second; advance time so each call is unique.
            tick += 1;
            let at = start + Duration::seconds(tick);
            let rid = format!("KRB-{:04}", tick % 100);
            black_box(engine.distribute_at(&rid, 1, None, at).unwrap());
        });
    });

    group.finish();
}

fn bench_reports(c: &mut Criterion) {
    let mut group = c.benchmark_group("reports");
    let engine = setup_kitchen(300, 1_000);

    group.bench_function("stock_report", |b| b.iter(|| black_box(engine.stock_report())));
    group.bench_function("recipient_report", |b| b.iter(|| black_box(engine.recipient_report())));
    group.bench_function("nutrition_status", |b| b.iter(|| black_box(engine.nutrition_status())));

    group.finish();
}

criterion_group!(
    benches,
    bench_available_portions,
    bench_distribution_latency,
    bench_reports
);
criterion_main!(benches);
