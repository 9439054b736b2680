//! Sillage drives scroll-linked motion: continuous host input in, compositable styles out.
//!
//! Every effect is the same four-stage pipeline, evaluated once per render tick:
//!
//! 1. **Signal**: scroll progress through a region, scroll velocity, or pointer progress, read
//!    from a shared [`SignalRegistry`] that holds one host listener per channel.
//! 2. **Transform**: a piecewise-linear [`RangeMap`] from signal domain to style values.
//! 3. **Smoothing** (optional): a damped [`Spring`] that follows the mapped target, stable for any
//!    frame time.
//! 4. **Binding**: the value is written to a [`RenderNode`] as one of five compositable
//!    properties ([`VisualProperty`]).
//!
//! Effects are plain data ([`EffectSpec`]), built with [`EffectBuilder`], taken from a
//! [`Preset`], or loaded from JSON. Mounting one on a [`FrameLoop`] returns a
//! [`MountedEffect`] guard; dropping the guard unmounts it before the next tick.
//!
//! The runtime is single-threaded. Shared state lives in `Rc<RefCell<_>>`, and nodes are held
//! weakly so a detached node is never written.
//!
//! Headless runs use a [`ScriptedHost`] driven by a [`SceneSpec`] (see [`run_scene`]).
//! [`CountSource`] and [`TextGenerator`] cover the page's two remote collaborators. Their
//! failures are reported or replaced by a fixed fallback, never propagated to the page.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod backend;
mod binding;
mod content;
mod effect;
mod foundation;
mod runtime;
mod scene;
mod signal;
mod smoothing;
mod transform;

pub use animation::ease::Ease;
pub use animation::keyframes::{InterpMode, Keyframe, Keyframes, Lerp};
pub use backend::count::{CountReport, CountSource, Filter, JsonTable, report_count};
pub use backend::text::{CONSULTATION_APOLOGY, CommandGenerator, TextGenerator, consult, describe};
pub use binding::bound::{Binding, BindingSpec};
pub use binding::node::{NodeRef, NodeStyle, Offset, RenderNode, StyledNode};
pub use binding::property::{StyleValue, Unit, VisualProperty};
pub use content::model::{DisplayRecord, parse_records};
pub use effect::mount::MountedEffect;
pub use effect::presets::Preset;
pub use effect::spec::{EffectBuilder, EffectSpec};
pub use foundation::core::{Affine, Axis, Fps, FrameIndex, Point, Size, Vec2};
pub use foundation::error::{SillageError, SillageResult};
pub use runtime::frame_loop::{FrameCtx, FrameLoop, FrameSubscription};
pub use scene::host::ScriptedHost;
pub use scene::model::{EffectSource, MAX_SCENE_FRAMES, SceneEffect, SceneRegion, SceneSpec};
pub use scene::simulate::{FrameReport, NodeReport, SceneReport, run_scene};
pub use signal::host::{Channel, Host, HostSample, ListenerId, RegionKey, ScrollRange};
pub use signal::registry::{ChannelSubscription, RegionSubscription, SignalRegistry};
pub use signal::source::{Region, Signal, SignalSource, SignalSpec, progress_in};
pub use smoothing::spring::{Spring, SpringParams};
pub use transform::range_map::{Extrapolate, RangeMap, RangeMapSpec};
