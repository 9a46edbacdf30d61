//! Performance benchmarks for the Settlement Engine.
//!
//! - Core pipeline (`calculate_settlement`) for a single fact
//! - Core pipeline across tenure lengths
//! - `/calculate` and `/calculate/csv` through the router
//! - Batch of 1000 settlements through the router
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use settlement_engine::api::{AppState, CalculationRequest, create_router};
use settlement_engine::calculation::calculate_settlement;
use settlement_engine::config::{CalculationPolicy, ConfigLoader};
use settlement_engine::models::EmploymentFact;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/clt").expect("Failed to load config")
}

/// Creates a fact dismissed without cause on 2024-06-20 after `years` years.
fn create_fact(years: i32) -> EmploymentFact {
    let request_json = serde_json::json!({
        "monthly_salary": "5432.10",
        "admission_date": format!("{:04}-01-10", 2024 - years),
        "termination_date": "2024-06-20",
        "termination_reason": "without_cause",
        "dependents_count": 2,
        "worked_days_in_final_month": 20,
        "unjustified_absences_prorated": 7,
        "accrued_leave_periods_simple": 1,
        "severance_fund_balance": "18000.00"
    });
    serde_json::from_value(request_json).expect("Failed to create fact")
}

fn create_request_body(years: i32) -> String {
    let request = CalculationRequest {
        fact: create_fact(years),
        policy: None,
    };
    serde_json::to_string(&request).unwrap()
}

/// Benchmark: core pipeline for one fact.
fn bench_calculate_settlement(c: &mut Criterion) {
    let config = load_config();
    let fact = create_fact(5);
    let tables = config
        .rate_tables_for(fact.termination_date)
        .expect("No rate tables");
    let policy = CalculationPolicy::default();

    c.bench_function("calculate_settlement", |b| {
        b.iter(|| black_box(calculate_settlement(black_box(&fact), tables, &policy)))
    });
}

/// Benchmark: core pipeline across tenure lengths.
fn bench_tenure_scaling(c: &mut Criterion) {
    let config = load_config();
    let policy = CalculationPolicy::default();
    let mut group = c.benchmark_group("tenure_scaling");

    for years in [1, 5, 10, 20, 35].iter() {
        let fact = create_fact(*years);
        let tables = config
            .rate_tables_for(fact.termination_date)
            .expect("No rate tables");

        group.bench_with_input(BenchmarkId::new("years", years), years, |b, _| {
            b.iter(|| black_box(calculate_settlement(&fact, tables, &policy)))
        });
    }

    group.finish();
}

/// Benchmark: both endpoints through the router.
fn bench_endpoints(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::new(load_config()));
    let body = create_request_body(5);

    let mut group = c.benchmark_group("endpoints");

    for uri in ["/calculate", "/calculate/csv"] {
        group.bench_with_input(BenchmarkId::new("post", uri), uri, |b, uri| {
            b.to_async(&rt).iter(|| async {
                let router = router.clone();
                let response = router
                    .oneshot(
                        Request::builder()
                            .method("POST")
                            .uri(uri)
                            .header("Content-Type", "application/json")
                            .body(Body::from(body.clone()))
                            .unwrap(),
                    )
                    .await
                    .unwrap();
                black_box(response)
            })
        });
    }

    group.finish();
}

/// Benchmark: batch of 1000 settlements through the router.
fn bench_batch_1000(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = AppState::new(load_config());

    let requests: Vec<String> = (0..1000).map(|i| create_request_body(1 + i % 30)).collect();

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(1000));
    group.sample_size(10);

    group.bench_function("batch_1000", |b| {
        b.to_async(&rt).iter(|| async {
            let mut results = Vec::with_capacity(1000);
            for body in &requests {
                let router = create_router(state.clone());
                let response = router
                    .oneshot(
                        Request::builder()
                            .method("POST")
                            .uri("/calculate")
                            .header("Content-Type", "application/json")
                            .body(Body::from(body.clone()))
                            .unwrap(),
                    )
                    .await
                    .unwrap();
                results.push(response);
            }
            black_box(results)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_calculate_settlement,
    bench_tenure_scaling,
    bench_endpoints,
    bench_batch_1000,
);
criterion_main!(benches);
