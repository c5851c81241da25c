use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Value advertised in `Accept-Encoding` for a single measured leg.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    Serialize,
    Deserialize,
    Default,
    PartialOrd,
    Ord,
)]
pub enum EncodingVariant {
    #[default]
    #[display("all")]
    #[serde(rename = "all")]
    All,
    #[display("gzip")]
    #[serde(rename = "gzip")]
    Gzip,
    #[display("deflate")]
    #[serde(rename = "deflate")]
    Deflate,
    #[display("brotli")]
    #[serde(rename = "brotli")]
    Brotli,
    #[display("none")]
    #[serde(rename = "none")]
    None,
}

impl EncodingVariant {
    /// Negotiated variants in the order a comparison measures them.
    pub const ENCODED: [EncodingVariant; 4] = [
        EncodingVariant::All,
        EncodingVariant::Gzip,
        EncodingVariant::Deflate,
        EncodingVariant::Brotli,
    ];

    pub fn accept_encoding(&self) -> Option<&'static str> {
        match self {
            EncodingVariant::All => Some("gzip, deflate, br"),
            EncodingVariant::Gzip => Some("gzip"),
            EncodingVariant::Deflate => Some("deflate"),
            EncodingVariant::Brotli => Some("br"),
            EncodingVariant::None => None,
        }
    }

    pub fn is_negotiated(&self) -> bool {
        self.accept_encoding().is_some()
    }
}

impl FromStr for EncodingVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(EncodingVariant::All),
            "gzip" => Ok(EncodingVariant::Gzip),
            "deflate" => Ok(EncodingVariant::Deflate),
            "brotli" | "br" => Ok(EncodingVariant::Brotli),
            "none" => Ok(EncodingVariant::None),
            _ => Err(format!("Unknown encoding variant: {}", s)),
        }
    }
}
