// src/services/mod.rs
pub mod completion;
pub mod diagnostics;
pub mod metrics_manager;
pub mod relay;
