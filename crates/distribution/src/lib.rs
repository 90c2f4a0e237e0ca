//! Distribution receipts.

pub mod record;

pub use record::{DistributionRecord, distribution_id_for};
