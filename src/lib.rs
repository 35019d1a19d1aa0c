//! Client for the activity sign-up board.
//!
//! The controller, markup rendering and request interpretation are
//! platform-independent; the `wasm` feature adds the browser transport and
//! DOM wiring, the default `no-wasm` feature adds the reqwest transport used
//! by the CLI and the tests.

pub mod app;
pub mod error;
pub mod model;
pub mod request;
pub mod view;
