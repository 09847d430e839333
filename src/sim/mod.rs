//! Deterministic choreography module
//!
//! All sequencing logic lives here. This module must be pure and deterministic:
//! - Injected clock only (`now` in milliseconds)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod dialogue;
pub mod easter_egg;
pub mod flourish;
pub mod loading;
pub mod motion;
pub mod timeline;
pub mod typewriter;

pub use dialogue::{Dialogue, DialogueCue, DialoguePhase};
pub use easter_egg::TriggerBuffer;
pub use flourish::{Blink, GlitchPulse, Ripple};
pub use loading::{LoadingPhase, LoadingProgress, LoadingTick};
pub use motion::{FieldConfig, Link, MotionField, MotionPoint, Tint};
pub use timeline::{BootPhase, Timeline};
pub use typewriter::{TypeStep, Typewriter};
