pub mod decoder;
mod transfer_measurer;

pub use transfer_measurer::{TransferMeasurer, ARCHIVE_LABEL};
