//! Platform abstraction layer
//!
//! The browser host owns the canvas, the DOM events and the frame callback.
//! `web` exposes a [`crate::sim::Session`] to it through `wasm-bindgen`.

#[cfg(target_arch = "wasm32")]
pub mod web;
