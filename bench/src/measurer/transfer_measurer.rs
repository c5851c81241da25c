use super::decoder::{self, ContentCoding};
use crate::config::BenchConfig;
use crate::error::{BenchError, TransferError};
use human_repr::HumanCount;
use reqwest::header::{
    HeaderMap, HeaderName, ACCEPT, ACCEPT_ENCODING, CONTENT_ENCODING, CONTENT_LENGTH,
    CONTENT_TYPE,
};
use reqwest::{RequestBuilder, Url};
use std::time::Duration;
use tokio::time::Instant;
use tracing::{error, info, warn};
use transfer_bench_report::encoding_variant::EncodingVariant;
use transfer_bench_report::transfer_result::TransferResult;

pub const ARCHIVE_LABEL: &str = "Manual ZIP";
const ENCODED_LABEL_PREFIX: &str = "HTTP Compression";
const USER_AGENT: &str = concat!("transfer-bench/", env!("CARGO_PKG_VERSION"));

/// Issues single GET requests and records what went over the wire.
///
/// The underlying client never decompresses on its own, so the counted bytes are
/// exactly the encoded body the server sent.
#[derive(Debug, Clone)]
pub struct TransferMeasurer {
    client: reqwest::Client,
    request_timeout: Option<Duration>,
}

struct RawTransfer {
    body: Vec<u8>,
    duration_ms: u64,
    content_length: Option<String>,
    content_encoding: Option<String>,
    content_type: Option<String>,
}

impl TransferMeasurer {
    pub fn new(config: &BenchConfig) -> Result<Self, BenchError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(BenchError::CannotCreateClient)?;

        Ok(Self {
            client,
            request_timeout: config.request_timeout,
        })
    }

    pub fn encoded_label(variant: EncodingVariant) -> String {
        format!("{ENCODED_LABEL_PREFIX} ({variant})")
    }

    /// Fetches `url` advertising the codecs of `variant` and decodes the body
    /// afterwards to learn the payload size. Decoding is not part of the duration.
    pub async fn measure_encoded(
        &self,
        url: &Url,
        variant: EncodingVariant,
    ) -> Result<TransferResult, TransferError> {
        let label = Self::encoded_label(variant);
        info!("{label} → fetching {url}...");

        let mut request = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json");
        if let Some(accept_encoding) = variant.accept_encoding() {
            request = request.header(ACCEPT_ENCODING, accept_encoding);
        }

        let transfer = self
            .execute(request)
            .await
            .inspect_err(|e| error!("{label} → request to {url} failed: {e}"))?;
        let transfer_size = transfer.body.len() as u64;
        let uncompressed_size = Self::uncompressed_size(&label, &transfer);

        info!(
            "{label} → received {} ({} decoded) in {} ms.",
            transfer_size.human_count_bytes(),
            uncompressed_size.human_count_bytes(),
            transfer.duration_ms
        );

        Ok(TransferResult::new(
            label,
            transfer_size,
            Some(uncompressed_size),
            transfer.duration_ms,
            transfer.content_length,
            transfer.content_encoding,
            transfer.content_type,
            variant,
        ))
    }

    /// Fetches the zipped attachment at `url`. The archive is never opened, only
    /// its byte length is recorded.
    pub async fn measure_archive(&self, url: &Url) -> Result<TransferResult, TransferError> {
        info!("{ARCHIVE_LABEL} → fetching {url}...");
        let request = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/zip");

        let transfer = self
            .execute(request)
            .await
            .inspect_err(|e| error!("{ARCHIVE_LABEL} → request to {url} failed: {e}"))?;
        let transfer_size = transfer.body.len() as u64;

        info!(
            "{ARCHIVE_LABEL} → received {} in {} ms.",
            transfer_size.human_count_bytes(),
            transfer.duration_ms
        );

        Ok(TransferResult::new(
            ARCHIVE_LABEL.to_owned(),
            transfer_size,
            None,
            transfer.duration_ms,
            transfer.content_length,
            Some(
                transfer
                    .content_encoding
                    .unwrap_or_else(|| "none".to_owned()),
            ),
            transfer.content_type,
            EncodingVariant::None,
        ))
    }

    async fn execute(&self, request: RequestBuilder) -> Result<RawTransfer, TransferError> {
        let start = Instant::now();
        let mut response = request
            .send()
            .await
            .map_err(|e| self.map_error(e, TransferError::Transport))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransferError::UnexpectedStatus(status.as_u16()));
        }

        let headers = response.headers();
        let content_length = header_value(headers, CONTENT_LENGTH);
        let content_encoding = header_value(headers, CONTENT_ENCODING);
        let content_type = header_value(headers, CONTENT_TYPE);

        let mut body = Vec::new();
        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| self.map_error(e, TransferError::Body))?
        {
            body.extend_from_slice(&chunk);
        }
        let duration_ms = start.elapsed().as_millis() as u64;

        Ok(RawTransfer {
            body,
            duration_ms,
            content_length,
            content_encoding,
            content_type,
        })
    }

    fn uncompressed_size(label: &str, transfer: &RawTransfer) -> u64 {
        let received = transfer.body.len() as u64;
        let Some(coding) = transfer
            .content_encoding
            .as_deref()
            .and_then(ContentCoding::from_header)
        else {
            return received;
        };

        match decoder::decode(coding, &transfer.body) {
            Ok(decoded) => decoder::decoded_text_len(&decoded),
            Err(e) => {
                warn!("{label} → {e}, counting received bytes as the payload size.");
                received
            }
        }
    }

    fn map_error(
        &self,
        error: reqwest::Error,
        otherwise: fn(reqwest::Error) -> TransferError,
    ) -> TransferError {
        match self.request_timeout {
            Some(timeout) if error.is_timeout() => TransferError::Timeout(timeout),
            _ => otherwise(error),
        }
    }
}

fn header_value(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}
