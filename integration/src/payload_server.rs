use crate::sample_data::{generate_sample_data, parse_size};
use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use flate2::write::{GzEncoder, ZlibEncoder};
use flate2::{Compression, GzBuilder};
use serde_json::json;
use std::collections::HashMap;
use std::io::{Cursor, Read, Write};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tracing::error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";
const ARCHIVE_ENTRY_NAME: &str = "data.json";
const COMPRESSION_LEVEL: u32 = 9;

/// Knobs for simulating misbehaving payload sources.
#[derive(Debug, Clone, Default)]
pub struct PayloadServerConfig {
    /// `Accept-Encoding` values answered with HTTP 500
    pub failing_accept_encodings: Vec<String>,
    /// Keep the `Content-Encoding` header but mangle the compressed body
    pub corrupt_encoded_bodies: bool,
    /// Send the raw JSON labelled with this `Content-Encoding`
    pub forced_content_encoding: Option<String>,
    /// Wait this long before answering any data request
    pub response_delay: Option<Duration>,
    /// Pre-encoded bodies served for a negotiated coding instead of generated records
    pub fixed_encoded_bodies: HashMap<String, Vec<u8>>,
    /// Body served by the archive source instead of a zipped record set
    pub fixed_archive_body: Option<Vec<u8>>,
}

struct ServerState {
    config: PayloadServerConfig,
    received_accept_encodings: Mutex<Vec<Option<String>>>,
}

/// Both payload sources on one ephemeral port: `/encoded/data/{size}` negotiates
/// `Content-Encoding`, `/archive/data/{size}` answers with a zipped attachment.
pub struct TestPayloadServer {
    address: SocketAddr,
    state: Arc<ServerState>,
    shutdown: Option<oneshot::Sender<()>>,
}

impl TestPayloadServer {
    pub async fn start() -> Self {
        Self::start_with(PayloadServerConfig::default()).await
    }

    pub async fn start_with(config: PayloadServerConfig) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind payload server");
        let address = listener
            .local_addr()
            .expect("Failed to get payload server address");
        let state = Arc::new(ServerState {
            config,
            received_accept_encodings: Mutex::new(Vec::new()),
        });
        let (shutdown, shutdown_signal) = oneshot::channel::<()>();

        let app = router(state.clone());
        tokio::spawn(async move {
            let server = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown_signal.await;
            });
            if let Err(e) = server.await {
                error!("Payload server failed: {e}");
            }
        });

        Self {
            address,
            state,
            shutdown: Some(shutdown),
        }
    }

    pub fn encoded_base_url(&self) -> String {
        format!("http://{}/encoded/", self.address)
    }

    pub fn archive_base_url(&self) -> String {
        format!("http://{}/archive/", self.address)
    }

    /// `Accept-Encoding` of every request that reached the encoded source, in arrival order.
    pub fn received_accept_encodings(&self) -> Vec<Option<String>> {
        self.state
            .received_accept_encodings
            .lock()
            .expect("Accept-Encoding log poisoned")
            .clone()
    }
}

impl Drop for TestPayloadServer {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}

/// Base URL of a port that nothing listens on.
pub async fn unreachable_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe listener");
    let address = listener
        .local_addr()
        .expect("Failed to get probe listener address");
    drop(listener);
    format!("http://{address}/")
}

/// Reads the JSON document out of an archive served by the archive source.
pub fn read_archive_entry(archive: &[u8]) -> zip::result::ZipResult<String> {
    let mut archive = ZipArchive::new(Cursor::new(archive))?;
    let mut entry = archive.by_name(ARCHIVE_ENTRY_NAME)?;
    let mut json = String::new();
    entry.read_to_string(&mut json)?;
    Ok(json)
}

/// Gzips `data` and pads the gzip header comment so the whole body is exactly
/// `target_len` bytes long. Returns `None` when the compressed data alone is too large.
pub fn gzip_padded_to(data: &[u8], target_len: usize) -> Option<Vec<u8>> {
    let unpadded = compress("gzip", data).len();
    // the comment is terminated by a NUL byte
    let padding = target_len.checked_sub(unpadded + 1)?;
    let mut encoder = GzBuilder::new()
        .comment(vec![b'x'; padding])
        .write(Vec::new(), Compression::new(COMPRESSION_LEVEL));
    encoder.write_all(data).expect("Failed to gzip payload");
    Some(encoder.finish().expect("Failed to gzip payload"))
}

pub fn compress(coding: &str, data: &[u8]) -> Vec<u8> {
    match coding {
        "gzip" => {
            let mut encoder = GzEncoder::new(Vec::new(), Compression::new(COMPRESSION_LEVEL));
            encoder.write_all(data).expect("Failed to gzip payload");
            encoder.finish().expect("Failed to gzip payload")
        }
        "deflate" => {
            let mut encoder = ZlibEncoder::new(Vec::new(), Compression::new(COMPRESSION_LEVEL));
            encoder.write_all(data).expect("Failed to deflate payload");
            encoder.finish().expect("Failed to deflate payload")
        }
        "br" => {
            let mut output = Vec::new();
            {
                let mut writer =
                    brotli::CompressorWriter::new(&mut output, 4096, COMPRESSION_LEVEL, 22);
                writer.write_all(data).expect("Failed to brotli payload");
            }
            output
        }
        _ => data.to_vec(),
    }
}

fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        .route("/encoded/data", get(encoded_default))
        .route("/encoded/data/{size}", get(encoded_sized))
        .route(
            "/encoded/health",
            get(|| async { Json(json!({ "status": "ok", "compression": "enabled" })) }),
        )
        .route("/archive/data", get(archive_default))
        .route("/archive/data/{size}", get(archive_sized))
        .route(
            "/archive/health",
            get(|| async { Json(json!({ "status": "ok", "compression": "manual-zip" })) }),
        )
        .with_state(state)
}

async fn encoded_default(State(state): State<Arc<ServerState>>, headers: HeaderMap) -> Response {
    serve_encoded(&state, None, &headers).await
}

async fn encoded_sized(
    State(state): State<Arc<ServerState>>,
    Path(size): Path<String>,
    headers: HeaderMap,
) -> Response {
    serve_encoded(&state, Some(&size), &headers).await
}

async fn archive_default(State(state): State<Arc<ServerState>>) -> Response {
    serve_archive(&state, None).await
}

async fn archive_sized(
    State(state): State<Arc<ServerState>>,
    Path(size): Path<String>,
) -> Response {
    serve_archive(&state, Some(&size)).await
}

async fn serve_encoded(state: &ServerState, size: Option<&str>, headers: &HeaderMap) -> Response {
    let accept_encoding = headers
        .get(header::ACCEPT_ENCODING)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    state
        .received_accept_encodings
        .lock()
        .expect("Accept-Encoding log poisoned")
        .push(accept_encoding.clone());

    if let Some(delay) = state.config.response_delay {
        tokio::time::sleep(delay).await;
    }

    let config = &state.config;
    if let Some(accept_encoding) = &accept_encoding {
        if config.failing_accept_encodings.contains(accept_encoding) {
            return (StatusCode::INTERNAL_SERVER_ERROR, "Simulated failure").into_response();
        }
    }

    if let Some(coding) = negotiate(accept_encoding.as_deref()) {
        if let Some(body) = config.fixed_encoded_bodies.get(coding) {
            return (
                [
                    (header::CONTENT_TYPE, JSON_CONTENT_TYPE),
                    (header::CONTENT_ENCODING, coding),
                ],
                body.clone(),
            )
                .into_response();
        }
    }

    let records = generate_sample_data(parse_size(size));
    let json = match serde_json::to_vec(&records) {
        Ok(json) => json,
        Err(e) => return (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    };

    if let Some(forced) = &config.forced_content_encoding {
        return (
            [
                (header::CONTENT_TYPE, JSON_CONTENT_TYPE),
                (header::CONTENT_ENCODING, forced.as_str()),
            ],
            json,
        )
            .into_response();
    }

    let Some(coding) = negotiate(accept_encoding.as_deref()) else {
        return ([(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], json).into_response();
    };

    let mut body = compress(coding, &json);
    if config.corrupt_encoded_bodies {
        body.iter_mut().take(4).for_each(|byte| *byte = 0xff);
    }

    (
        [
            (header::CONTENT_TYPE, JSON_CONTENT_TYPE),
            (header::CONTENT_ENCODING, coding),
            (header::VARY, "Accept-Encoding"),
        ],
        body,
    )
        .into_response()
}

async fn serve_archive(state: &ServerState, size: Option<&str>) -> Response {
    if let Some(delay) = state.config.response_delay {
        tokio::time::sleep(delay).await;
    }

    if let Some(body) = &state.config.fixed_archive_body {
        return ([(header::CONTENT_TYPE, "application/zip")], body.clone()).into_response();
    }

    let records = generate_sample_data(parse_size(size));
    let archive = serde_json::to_string_pretty(&records)
        .map_err(|e| e.to_string())
        .and_then(|json| zip_payload(&json).map_err(|e| e.to_string()));

    match archive {
        Ok(archive) => (
            [
                (header::CONTENT_TYPE, "application/zip"),
                (header::CONTENT_DISPOSITION, "attachment; filename=\"data.zip\""),
            ],
            archive,
        )
            .into_response(),
        Err(e) => {
            error!("Archive error: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Error creating zip file").into_response()
        }
    }
}

/// First supported coding in the client's order of preference.
fn negotiate(accept_encoding: Option<&str>) -> Option<&'static str> {
    accept_encoding?
        .split(',')
        .filter_map(|token| token.split(';').next())
        .map(|token| token.trim().to_ascii_lowercase())
        .find_map(|token| match token.as_str() {
            "gzip" => Some("gzip"),
            "deflate" => Some("deflate"),
            "br" => Some("br"),
            _ => None,
        })
}

fn zip_payload(json: &str) -> zip::result::ZipResult<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .compression_level(Some(COMPRESSION_LEVEL as i64));
    writer.start_file(ARCHIVE_ENTRY_NAME, options)?;
    writer.write_all(json.as_bytes())?;
    Ok(writer.finish()?.into_inner())
}
