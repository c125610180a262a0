//! Command implementations for kubectl-zones

pub mod zones;
