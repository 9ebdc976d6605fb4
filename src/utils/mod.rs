//! Utility modules for the Stratum analyzer

pub mod order;

pub use order::{order_classes, order_files};
