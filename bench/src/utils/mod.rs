pub mod record_count;
