//! Portfolio page effects
//!
//! - Particle network: drifting violet discs on a full-viewport canvas,
//!   linked by fading lines when close
//! - Scroll reveals: tagged sections animate in once they enter the
//!   viewport (bottom edge pulled in by 100px)
//! - Cursor follower ring and sticky nav state
//!
//! `core` is platform-agnostic and drives both the browser bindings
//! (`wasm` feature) and the headless `fx-cli` binary (`cli` feature).

pub mod core;
pub mod theme;
pub mod time;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
mod web;

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub use web::Effects;
