//! Kubernetes operations

pub mod kubectl;
pub mod nodes;
pub mod pods;
