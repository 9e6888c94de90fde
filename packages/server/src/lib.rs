// PII Masking Service - API Core
//
// Thin HTTP wrapper around the `pii` analyzer/anonymizer pair. Handlers talk to
// a `BasePiiMasker` from the kernel so masking can be switched off by config.

pub mod config;
pub mod kernel;
pub mod server;

pub use config::*;
