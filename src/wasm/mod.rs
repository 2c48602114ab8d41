//! WebAssembly bindings for the tiny6502 core.
//!
//! Compiled only with the `wasm` feature.

pub mod api;

pub use api::Emulator;
