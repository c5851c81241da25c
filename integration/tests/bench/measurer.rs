use super::config_for;
use integration::payload_server::{
    compress, unreachable_base_url, PayloadServerConfig, TestPayloadServer,
};
use integration::sample_data::generate_sample_data;
use std::time::Duration;
use transfer_bench::config::{data_url, BenchConfig};
use transfer_bench::error::TransferError;
use transfer_bench::measurer::decoder::{decode, decoded_text_len, ContentCoding};
use transfer_bench::measurer::TransferMeasurer;
use transfer_bench_report::encoding_variant::EncodingVariant;

fn measurer(server: &TestPayloadServer) -> TransferMeasurer {
    TransferMeasurer::new(&config_for(server)).unwrap()
}

#[tokio::test]
async fn encoded_leg_should_recover_payload_size_for_every_codec() {
    let server = TestPayloadServer::start().await;
    let measurer = measurer(&server);
    let url = data_url(&server.encoded_base_url(), 200).unwrap();

    let expected = serde_json::to_vec(&generate_sample_data(200)).unwrap().len() as u64;
    for (variant, coding) in [
        (EncodingVariant::All, "gzip"),
        (EncodingVariant::Gzip, "gzip"),
        (EncodingVariant::Deflate, "deflate"),
        (EncodingVariant::Brotli, "br"),
    ] {
        let result = measurer.measure_encoded(&url, variant).await.unwrap();

        assert_eq!(result.encoding_variant, variant);
        assert_eq!(result.content_encoding.as_deref(), Some(coding));
        let uncompressed_size = result.uncompressed_size.unwrap();
        assert!(result.transfer_size < uncompressed_size);
        // Records differ only in the random score, one or two digits wide.
        assert!(uncompressed_size.abs_diff(expected) <= 200);
    }
}

#[test]
fn decoded_length_should_match_pre_encoding_length() {
    let payload = serde_json::to_vec(&generate_sample_data(50)).unwrap();
    for (name, coding) in [
        ("gzip", ContentCoding::Gzip),
        ("deflate", ContentCoding::Deflate),
        ("br", ContentCoding::Brotli),
    ] {
        let decoded = decode(coding, &compress(name, &payload)).unwrap();
        assert_eq!(decoded_text_len(&decoded), payload.len() as u64);
    }
}

#[tokio::test]
async fn transfer_size_should_count_wire_bytes() {
    let server = TestPayloadServer::start().await;
    let measurer = measurer(&server);
    let url = data_url(&server.encoded_base_url(), 100).unwrap();

    let result = measurer
        .measure_encoded(&url, EncodingVariant::Gzip)
        .await
        .unwrap();

    let content_length = result
        .content_length
        .as_deref()
        .map(|length| length.parse::<u64>().unwrap());
    assert_eq!(content_length, Some(result.transfer_size));
}

#[tokio::test]
async fn unknown_content_encoding_should_count_received_bytes_as_payload() {
    let server = TestPayloadServer::start_with(PayloadServerConfig {
        forced_content_encoding: Some("zstd".to_owned()),
        ..Default::default()
    })
    .await;
    let measurer = measurer(&server);
    let url = data_url(&server.encoded_base_url(), 30).unwrap();

    let result = measurer
        .measure_encoded(&url, EncodingVariant::All)
        .await
        .unwrap();

    assert_eq!(result.content_encoding.as_deref(), Some("zstd"));
    assert_eq!(result.uncompressed_size, Some(result.transfer_size));
    assert_eq!(result.compression_ratio(), Some(0.0));
}

#[tokio::test]
async fn identity_response_should_count_received_bytes_as_payload() {
    let server = TestPayloadServer::start().await;
    let measurer = measurer(&server);
    let url = data_url(&server.encoded_base_url(), 30).unwrap();

    let result = measurer
        .measure_encoded(&url, EncodingVariant::None)
        .await
        .unwrap();

    assert_eq!(result.content_encoding, None);
    assert_eq!(result.uncompressed_size, Some(result.transfer_size));
}

#[tokio::test]
async fn corrupted_body_should_still_produce_a_measurement() {
    let server = TestPayloadServer::start_with(PayloadServerConfig {
        corrupt_encoded_bodies: true,
        ..Default::default()
    })
    .await;
    let measurer = measurer(&server);
    let url = data_url(&server.encoded_base_url(), 100).unwrap();

    for variant in [EncodingVariant::Gzip, EncodingVariant::Deflate] {
        let result = measurer.measure_encoded(&url, variant).await.unwrap();
        assert_eq!(result.uncompressed_size, Some(result.transfer_size));
    }
    assert!(measurer
        .measure_encoded(&url, EncodingVariant::Brotli)
        .await
        .is_ok());
}

#[tokio::test]
async fn archive_leg_should_record_attachment_without_decoding() {
    let server = TestPayloadServer::start().await;
    let measurer = measurer(&server);
    let url = data_url(&server.archive_base_url(), 100).unwrap();

    let result = measurer.measure_archive(&url).await.unwrap();

    assert_eq!(result.label, "Manual ZIP");
    assert_eq!(result.encoding_variant, EncodingVariant::None);
    assert_eq!(result.uncompressed_size, None);
    assert_eq!(result.content_type.as_deref(), Some("application/zip"));
    assert_eq!(result.content_encoding.as_deref(), Some("none"));
    assert!(result.transfer_size > 0);
}

#[tokio::test]
async fn connection_failure_should_be_a_transport_error() {
    let measurer = TransferMeasurer::new(&Default::default()).unwrap();
    let url = data_url(&unreachable_base_url().await, 10).unwrap();

    let encoded = measurer.measure_encoded(&url, EncodingVariant::Gzip).await;
    let archive = measurer.measure_archive(&url).await;

    assert!(matches!(encoded, Err(TransferError::Transport(_))));
    assert!(matches!(archive, Err(TransferError::Transport(_))));
}

#[tokio::test]
async fn server_error_should_fail_the_leg() {
    let server = TestPayloadServer::start_with(PayloadServerConfig {
        failing_accept_encodings: vec!["deflate".to_owned()],
        ..Default::default()
    })
    .await;
    let measurer = measurer(&server);
    let url = data_url(&server.encoded_base_url(), 10).unwrap();

    let result = measurer
        .measure_encoded(&url, EncodingVariant::Deflate)
        .await;

    assert!(matches!(result, Err(TransferError::UnexpectedStatus(500))));
}

#[tokio::test]
async fn slow_source_should_time_out() {
    let server = TestPayloadServer::start_with(PayloadServerConfig {
        response_delay: Some(Duration::from_secs(5)),
        ..Default::default()
    })
    .await;
    let config = BenchConfig {
        request_timeout: Some(Duration::from_millis(100)),
        ..config_for(&server)
    };
    let measurer = TransferMeasurer::new(&config).unwrap();
    let url = data_url(&server.archive_base_url(), 10).unwrap();

    let result = measurer.measure_archive(&url).await;

    assert!(matches!(
        result,
        Err(TransferError::Timeout(timeout)) if timeout == Duration::from_millis(100)
    ));
}
