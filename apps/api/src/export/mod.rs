pub mod layout;
pub mod metrics;
pub mod pdf;
pub mod word;
