//! photoviews - photo albums stored in a local key-value store
//!
//! Users create named views (albums), add photos to them from image files and
//! browse or remove them. Photos are rescaled and stored inline as JPEG data
//! URLs. The same [`Controller`] drives a browser frontend (WASM, backed by
//! `localStorage`) and a terminal frontend (native, backed by JSON files).

pub mod config;
pub mod constants;
pub mod controller;
pub mod error;
pub mod handlers;
pub mod ingest;
pub mod message;
pub mod model;
pub mod panel;
pub mod storage;

#[cfg(not(target_arch = "wasm32"))]
pub mod shell;

pub use controller::Controller;
pub use message::{Command, Message};
pub use panel::{Panel, Screen};

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod wasm;
#[cfg(target_arch = "wasm32")]
mod wasm_file;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
