pub mod payload_server;
pub mod sample_data;
