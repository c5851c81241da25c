use chrono::{SecondsFormat, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const DEFAULT_RECORD_COUNT: usize = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    pub id: usize,
    pub name: String,
    pub email: String,
    pub description: String,
    pub timestamp: String,
    pub metadata: RecordMetadata,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordMetadata {
    pub active: bool,
    pub role: String,
    pub score: u32,
}

/// Parses the `{size}` path segment, anything non-numeric means the default.
pub fn parse_size(size: Option<&str>) -> usize {
    size.and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_RECORD_COUNT)
}

/// Generates `size` user records with repetitive text so that they compress well.
pub fn generate_sample_data(size: usize) -> Vec<SampleRecord> {
    let mut rng = rand::thread_rng();
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    (0..size)
        .map(|i| SampleRecord {
            id: i,
            name: format!("User {i}"),
            email: format!("user{i}@example.com"),
            description: format!(
                "This is a sample description for user {i}. It contains some repetitive text to make compression more effective. Lorem ipsum dolor sit amet, consectetur adipiscing elit."
            ),
            timestamp: timestamp.clone(),
            metadata: RecordMetadata {
                active: i % 2 == 0,
                role: if i % 3 == 0 { "admin" } else { "user" }.to_owned(),
                score: rng.gen_range(0..100),
            },
        })
        .collect()
}
