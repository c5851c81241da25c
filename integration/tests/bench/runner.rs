use super::config_for;
use integration::payload_server::{unreachable_base_url, PayloadServerConfig, TestPayloadServer};
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use transfer_bench::config::BenchConfig;
use transfer_bench::runner::BenchmarkRunner;

#[tokio::test]
async fn sweep_should_produce_one_row_per_size_in_order() {
    let server = TestPayloadServer::start().await;
    let runner = BenchmarkRunner::new(config_for(&server)).unwrap();

    let summary = runner
        .run_benchmark(&[100, 500], Duration::ZERO, &CancellationToken::new())
        .await;

    assert_eq!(summary.sizes(), vec![100, 500]);
    assert!(summary.skipped.is_empty());
    assert!(!summary.cancelled);
}

#[tokio::test]
async fn sweep_should_use_configured_sizes() {
    let server = TestPayloadServer::start().await;
    let config = BenchConfig {
        sizes: vec![30, 10, 20],
        ..config_for(&server)
    };
    let runner = BenchmarkRunner::new(config).unwrap();

    let summary = runner.run(&CancellationToken::new()).await;

    assert_eq!(summary.sizes(), vec![30, 10, 20]);
}

#[tokio::test]
async fn sweep_should_record_failed_sizes_as_skipped() {
    let server = TestPayloadServer::start().await;
    let config = BenchConfig {
        archive_base_url: unreachable_base_url().await,
        ..config_for(&server)
    };
    let runner = BenchmarkRunner::new(config).unwrap();

    let summary = runner
        .run_benchmark(&[100, 500], Duration::ZERO, &CancellationToken::new())
        .await;

    assert!(summary.comparisons.is_empty());
    let skipped: Vec<_> = summary.skipped.iter().map(|s| s.size).collect();
    assert_eq!(skipped, vec![100, 500]);
    assert!(summary.skipped[0].reason.contains("Archive leg failed"));
}

#[tokio::test]
async fn cooldown_should_separate_sizes_but_not_follow_the_last_one() {
    let server = TestPayloadServer::start().await;
    let runner = BenchmarkRunner::new(config_for(&server)).unwrap();
    let cooldown = Duration::from_millis(300);

    let start = Instant::now();
    let summary = runner
        .run_benchmark(&[10, 10], cooldown, &CancellationToken::new())
        .await;
    let elapsed = start.elapsed();

    assert_eq!(summary.comparisons.len(), 2);
    assert!(elapsed >= cooldown);

    let start = Instant::now();
    runner
        .run_benchmark(&[10], Duration::from_secs(30), &CancellationToken::new())
        .await;
    assert!(start.elapsed() < Duration::from_secs(30));
}

#[tokio::test]
async fn cancelled_token_should_stop_before_first_size() {
    let server = TestPayloadServer::start().await;
    let runner = BenchmarkRunner::new(config_for(&server)).unwrap();
    let cancellation = CancellationToken::new();
    cancellation.cancel();

    let summary = runner
        .run_benchmark(&[100, 500], Duration::ZERO, &cancellation)
        .await;

    assert!(summary.cancelled);
    assert!(summary.is_empty());
    assert!(server.received_accept_encodings().is_empty());
}

#[tokio::test]
async fn cancellation_should_interrupt_in_flight_comparison() {
    let server = TestPayloadServer::start_with(PayloadServerConfig {
        response_delay: Some(Duration::from_secs(5)),
        ..Default::default()
    })
    .await;
    let runner = BenchmarkRunner::new(config_for(&server)).unwrap();
    let cancellation = CancellationToken::new();
    let trigger = cancellation.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(200)).await;
        trigger.cancel();
    });

    let start = Instant::now();
    let summary = runner
        .run_benchmark(&[100, 500], Duration::ZERO, &cancellation)
        .await;

    assert!(summary.cancelled);
    assert!(summary.comparisons.is_empty());
    assert!(start.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn cancellation_should_interrupt_cooldown() {
    let server = TestPayloadServer::start().await;
    let runner = BenchmarkRunner::new(config_for(&server)).unwrap();
    let cancellation = CancellationToken::new();
    let trigger = cancellation.clone();

    let sweep = runner.run_benchmark(&[10, 20], Duration::from_secs(60), &cancellation);
    let cancel = async move {
        tokio::time::sleep(Duration::from_millis(1500)).await;
        trigger.cancel();
    };
    let (summary, _) = tokio::join!(sweep, cancel);

    assert!(summary.cancelled);
    assert_eq!(summary.sizes(), vec![10]);
}

#[test]
fn runner_should_reject_malformed_base_urls() {
    let config = BenchConfig {
        encoded_base_url: "::".to_owned(),
        ..Default::default()
    };
    assert!(BenchmarkRunner::new(config).is_err());
}
