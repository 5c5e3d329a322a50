pub mod record_builder;

pub use record_builder::{RecordBuilder, SrvDedup};
