//! Performance benchmarks for the work tracker pay engine.
//!
//! This benchmark suite tracks the cost of minute-resolution pricing:
//! - An 8-hour session through `compute_pay`
//! - The same session with a full breakdown
//! - A month of sessions
//! - A `/calculate` request through the HTTP router
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::sync::Arc;

use chrono::{Duration, NaiveDateTime};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use work_tracker::api::{AppState, CalculationRequest, Workspace, create_router};
use work_tracker::calculation::{
    ItalianHolidays, ShiftSchedule, compute_pay, compute_pay_breakdown,
};
use work_tracker::config::{ConfigLoader, RateConfig};
use work_tracker::tracker::FixedClock;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn make_datetime(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
}

/// The sample weekly schedule.
fn create_schedule() -> ShiftSchedule {
    let loader = ConfigLoader::load("./config/tracker.yaml").expect("Failed to load config");
    let mut schedule = ShiftSchedule::new();
    for draft in loader.shifts() {
        schedule.add_draft(draft).unwrap();
    }
    schedule
}

/// Benchmark: one 8-hour weekday session.
fn bench_single_session(c: &mut Criterion) {
    let schedule = create_schedule();
    let config = RateConfig::default();
    let start = make_datetime("2024-03-04 09:00");
    let end = start + Duration::hours(8);

    c.bench_function("compute_pay_8h", |b| {
        b.iter(|| {
            compute_pay(
                black_box(start),
                black_box(end),
                &config,
                &ItalianHolidays,
                &schedule,
            )
        })
    });

    c.bench_function("compute_pay_breakdown_8h", |b| {
        b.iter(|| {
            compute_pay_breakdown(
                black_box(start),
                black_box(end),
                &config,
                &ItalianHolidays,
                &schedule,
            )
        })
    });
}

/// Benchmark: session lengths from one hour to a full day.
fn bench_scaling(c: &mut Criterion) {
    let schedule = create_schedule();
    let config = RateConfig::default();
    let start = make_datetime("2024-03-08 18:00");

    let mut group = c.benchmark_group("session_length");
    for hours in [1i64, 4, 8, 12, 24] {
        group.throughput(Throughput::Elements((hours * 60) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(hours), &hours, |b, &hours| {
            let end = start + Duration::hours(hours);
            b.iter(|| compute_pay(start, black_box(end), &config, &ItalianHolidays, &schedule))
        });
    }
    group.finish();
}

/// Benchmark: a month of 22 working days.
fn bench_month(c: &mut Criterion) {
    let schedule = create_schedule();
    let config = RateConfig::default();
    let first = make_datetime("2024-03-01 09:00");
    let sessions: Vec<(NaiveDateTime, NaiveDateTime)> = (0..22)
        .map(|day| {
            let start = first + Duration::days(day);
            (start, start + Duration::hours(8))
        })
        .collect();

    c.bench_function("month_22_sessions", |b| {
        b.iter(|| {
            sessions
                .iter()
                .map(|&(start, end)| compute_pay(start, end, &config, &ItalianHolidays, &schedule))
                .sum::<rust_decimal::Decimal>()
        })
    });
}

/// Benchmark: `/calculate` through the router.
fn bench_calculate_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let loader = ConfigLoader::load("./config/tracker.yaml").expect("Failed to load config");
    let workspace = Workspace::from_config(&loader).unwrap();
    let clock = Arc::new(FixedClock::new(make_datetime("2024-03-04 09:00")));
    let router = create_router(AppState::new(workspace, clock));

    let request = CalculationRequest {
        start: make_datetime("2024-03-04 09:00"),
        end: make_datetime("2024-03-04 17:00"),
        settings: None,
    };
    let body = serde_json::to_string(&request).unwrap();

    c.bench_function("calculate_endpoint_8h", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
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
            black_box(response)
        })
    });
}

criterion_group!(
    benches,
    bench_single_session,
    bench_scaling,
    bench_month,
    bench_calculate_endpoint,
);
criterion_main!(benches);
