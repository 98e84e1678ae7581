//! Flutter bridge crate for Loopletter core.
//!
//! Codegen output (`frb_generated`) is produced by `flutter_rust_bridge_codegen`
//! from the functions in `api`.

pub mod api;
