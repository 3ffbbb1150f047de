//! CLI command implementations.

pub mod backup;
pub mod export;
pub mod history;
pub mod member;
pub mod payment;
pub mod settings;
pub mod summary;
pub mod years;
