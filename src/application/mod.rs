//! Application layer: connection lifecycle orchestration over the ports.

pub mod manager;
