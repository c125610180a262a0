//! kubectl-zones: list pods with the availability zone of their node

pub mod commands;
pub mod config;
pub mod k8s;
pub mod utils;
