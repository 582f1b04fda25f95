//! Resolution performance benchmarks
//!
//! Measures inventory construction from raw store listings and best-match
//! selection as the listing and the requirement list grow.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use parcel_benchmarks::{criterion_config, requirements, store_listing};
use parcel_core::types::Requirement;
use parcel_resolver::{Inventory, Resolver};

/// Parse a raw listing into an inventory
fn bench_inventory(c: &mut Criterion) {
    let mut group = c.benchmark_group("inventory");

    for packages in [10, 100, 1000] {
        let listing = store_listing(packages, 20);
        group.throughput(Throughput::Elements(listing.len() as u64));

        group.bench_with_input(BenchmarkId::new("from_names", packages), &listing, |b, listing| {
            b.iter(|| black_box(Inventory::from_names(listing)))
        });
    }

    group.finish();
}

/// Resolve one requirement per package against the whole store
fn bench_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolution");
    group.sample_size(20);

    for packages in [10, 100, 500] {
        let inventory = Inventory::from_names(store_listing(packages, 20));
        let requirements = requirements(packages);
        group.throughput(Throughput::Elements((inventory.len() * requirements.len()) as u64));

        group.bench_with_input(
            BenchmarkId::new("requirements", packages),
            &(inventory, requirements),
            |b, (inventory, requirements)| {
                b.iter(|| black_box(Resolver::new().resolve(requirements, inventory).unwrap()))
            },
        );
    }

    group.finish();
}

/// Many requirements satisfied by the same package
fn bench_shared_selection(c: &mut Criterion) {
    let inventory = Inventory::from_names(store_listing(1, 50));
    let requirements: Vec<Requirement> = (0..64)
        .map(|i| {
            let constraint = format!(">=0.{} <{}.{}", 1 + i % 9, 5 + i / 10, i % 10);
            Requirement::parse("pkg-0", &constraint).unwrap()
        })
        .collect();

    c.bench_function("shared_selection", |b| {
        b.iter(|| black_box(Resolver::new().resolve(&requirements, &inventory).unwrap()))
    });
}

criterion_group! {
    name = benches;
    config = criterion_config();
    targets = bench_inventory, bench_resolution, bench_shared_selection
}
criterion_main!(benches);
