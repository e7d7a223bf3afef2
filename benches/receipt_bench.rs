//! Benchmarks for receipt parsing, proxy matching and bill totals
//!
//! Run with: cargo bench

use billswithfriends::bills::{Bill, BillStore, NewItem};
use billswithfriends::config::ProxyConfig;
use billswithfriends::proxy::ProxyTable;
use billswithfriends::receipt::{write_csv, ReceiptParser};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn create_receipt_text(items: usize) -> String {
    let mut text = String::new();
    for i in 0..items {
        text.push_str(&format!("{} Item number {} ($3.50)\n", i % 4 + 1, i));
    }
    for i in 0..items {
        text.push_str(&format!("{}.{:02}\n", i % 50 + 1, i % 100));
    }
    text
}

fn bench_receipt(c: &mut Criterion) {
    let mut group = c.benchmark_group("receipt");
    let parser = ReceiptParser::new().unwrap();

    for size in [10, 100, 1000] {
        let text = create_receipt_text(size);

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("parse_{}", size), |b| {
            b.iter(|| parser.parse(black_box(&text)))
        });

        let lines = parser.parse(&text);

        group.bench_function(format!("csv_{}", size), |b| {
            b.iter(|| {
                let mut out = Vec::with_capacity(size * 32);
                write_csv(black_box(&lines), &mut out).unwrap();
                out
            })
        });
    }

    group.finish();
}

fn bench_proxy_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("proxy");
    let table = ProxyTable::from_config(&ProxyConfig::default()).unwrap();

    let paths = [
        "/bills",
        "/bills/42/items",
        "/leaderboard",
        "/billsplitter",
        "/socialaccountability",
        "/assets/app.wasm",
    ];

    group.throughput(Throughput::Elements(paths.len() as u64));
    group.bench_function("match_path", |b| {
        b.iter(|| {
            paths
                .iter()
                .filter(|p| table.match_path(black_box(p)).is_some())
                .count()
        })
    });

    group.finish();
}

fn bench_calculate_total(c: &mut Criterion) {
    let mut group = c.benchmark_group("bills");
    let rt = tokio::runtime::Runtime::new().unwrap();

    for size in [10, 1000] {
        let store = BillStore::new();
        let bill_id = rt.block_on(async {
            let id = store.create_bill(Bill::new("Bench dinner")).await;
            for i in 0..size {
                store
                    .add_item(id, NewItem::new(format!("item {}", i), 1.25))
                    .await
                    .unwrap();
            }
            id
        });

        group.throughput(Throughput::Elements(size as u64));
        group.bench_function(format!("calculate_total_{}", size), |b| {
            b.iter(|| rt.block_on(store.calculate_total(black_box(bill_id))).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_receipt, bench_proxy_match, bench_calculate_total);
criterion_main!(benches);
