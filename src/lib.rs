//! A pointer-driven spinning torus widget.
//!
//! The widget renders a single torus lit by a directional and an ambient
//! light, and eases its orientation towards wherever the pointer or the
//! first touch point sits in the window. The core (viewport profiles,
//! geometry, input mapping, damping, frame loop and lifecycle) is platform
//! independent and talks to the outside world through [`lifecycle::Host`];
//! the `web` module mounts it into a page on wasm, the `app` module opens a
//! desktop window natively, and [`replay`] drives it headless.

pub mod animation;
#[cfg(not(target_arch = "wasm32"))]
pub mod app;
pub mod error;
pub mod geometry;
pub mod input;
pub mod lifecycle;
pub mod motion;
pub mod render;
pub mod replay;
pub mod scene;
pub mod viewport;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use animation::{FrameLoop, FrameScheduler, LoopState};
pub use error::RenderError;
pub use geometry::{TorusGeometry, TorusParams, Vertex};
pub use input::{PointerTracker, TouchPhase, TouchPoints};
pub use lifecycle::{Host, Widget};
pub use motion::{DampedRotation, Orientation, DAMPING_FACTOR};
pub use render::Renderer;
pub use replay::{run_headless, HeadlessHost, ReplayReport, TraceEvent};
pub use scene::Scene;
pub use viewport::{SharedViewport, ViewportClass, ViewportProfile, ViewportProvider};
