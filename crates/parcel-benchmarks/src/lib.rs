//! Parcel benchmarking suite
//!
//! Benchmarks for constraint parsing, resolution over large store listings
//! and archive round trips.

use std::time::Duration;

use criterion::Criterion;
use parcel_core::types::Requirement;

/// Default criterion settings shared by all benches
pub fn criterion_config() -> Criterion {
    Criterion::default()
        .warm_up_time(Duration::from_secs(3))
        .measurement_time(Duration::from_secs(10))
        .sample_size(100)
}

/// Store listing with `packages` names, each published in `versions`
/// versions, plus a few entries that are not package archives
pub fn store_listing(packages: usize, versions: usize) -> Vec<String> {
    let mut names = Vec::with_capacity(packages * versions + 3);
    for package in 0..packages {
        for version in 0..versions {
            // 0.0 is not a valid version, so start at 0.1
            let (major, minor) = ((version + 1) / 10, (version + 1) % 10);
            names.push(format!("pkg-{}-{}.{}", package, major, minor));
        }
    }
    names.extend(["README".to_string(), "index.json".to_string(), "tmp-".to_string()]);
    names
}

/// One requirement per package, alternating between the constraint shapes
pub fn requirements(packages: usize) -> Vec<Requirement> {
    (0..packages)
        .map(|package| {
            let constraint = match package % 4 {
                0 => ">=0.1",
                1 => "<1.5",
                2 => ">=0.3 <2.0",
                _ => "0.2 - 1.8",
            };
            Requirement::parse(&format!("pkg-{}", package), constraint)
                .unwrap_or_else(|e| panic!("invalid benchmark requirement: {}", e))
        })
        .collect()
}

/// Constraint texts covering every grammar production
pub const CONSTRAINTS: &[&str] = &[
    "1.4",
    "=1.4",
    ">=0.1",
    "<12.30",
    ">1.0 <=2.5",
    "1.0 - 3.9",
];
