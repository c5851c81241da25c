use crate::encoding_variant::EncodingVariant;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// Outcome of one HTTP round-trip.
///
/// `transfer_size` is the number of body bytes received on the wire, before any
/// decoding. `uncompressed_size` is only known for negotiated legs, where the body
/// was decoded after the transfer finished.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, new)]
pub struct TransferResult {
    pub label: String,
    pub transfer_size: u64,
    pub uncompressed_size: Option<u64>,
    pub duration_ms: u64,
    pub content_length: Option<String>,
    pub content_encoding: Option<String>,
    pub content_type: Option<String>,
    pub encoding_variant: EncodingVariant,
}

impl TransferResult {
    /// Share of the payload saved on the wire, `1 - transfer / uncompressed`.
    ///
    /// `None` when nothing was decoded, `NaN` for an empty decoded payload. A
    /// negative value means the encoded body was larger than the payload.
    pub fn compression_ratio(&self) -> Option<f64> {
        let uncompressed = self.uncompressed_size?;
        if uncompressed == 0 {
            return Some(f64::NAN);
        }

        Some(1.0 - self.transfer_size as f64 / uncompressed as f64)
    }

    pub fn content_encoding_or_none(&self) -> &str {
        self.content_encoding.as_deref().unwrap_or("none")
    }
}
