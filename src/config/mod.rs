//! Configuration for kubectl-zones

pub mod settings;
