//! Utility modules for kubectl-zones

pub mod errors;
pub mod logger;

pub use errors::display_error_and_exit;
