//! Platform-agnostic core - shared between the browser bindings and the CLI

pub mod config;
pub mod field;
pub mod lifecycle;
pub mod particle;
pub mod pointer;
pub mod reveal;
pub mod surface;
pub mod visibility;

pub use config::{EffectsConfig, FieldConfig, PointerConfig, RevealConfig, MAX_PARTICLES};
pub use field::{link_alpha, FrameStats, ParticleField};
pub use lifecycle::Lifecycle;
pub use particle::Particle;
pub use pointer::{CursorVariant, PointerState};
pub use reveal::{transition_duration, RevealKind, RevealStyle};
pub use surface::{DrawCall, DrawSurface, FrameRecorder};
pub use visibility::{
    IntersectionEntry, Rect, Transition, Viewport, VisibilityTracker, VisibleSnapshot,
};
