//! Platform abstraction layer
//!
//! The simulation and scheduler are platform-free. This module binds them to
//! a host:
//! - `web`: browser sensor, tap input, canvas drawing and DOM HUD (wasm32)
//!
//! The native binary drives the same pieces headlessly from `main.rs`.

#[cfg(target_arch = "wasm32")]
pub mod web;
