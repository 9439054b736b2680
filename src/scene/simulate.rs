use std::{cell::RefCell, fmt::Write as _, rc::Rc};

use crate::{
    binding::node::{NodeStyle, StyledNode},
    effect::mount::MountedEffect,
    foundation::core::FrameIndex,
    foundation::error::SillageResult,
    runtime::frame_loop::FrameLoop,
    scene::host::ScriptedHost,
    scene::model::SceneSpec,
    signal::registry::SignalRegistry,
};

/// Styles of every node after each simulated tick.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct SceneReport {
    /// One entry per tick.
    pub frames: Vec<FrameReport>,
}

/// Node styles after one tick.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct FrameReport {
    /// Tick index.
    pub frame: FrameIndex,
    /// Tick timestamp in seconds.
    pub time: f64,
    /// Scripted vertical scroll offset.
    pub scroll: f64,
    /// Node styles in scene order.
    pub nodes: Vec<NodeReport>,
}

/// One node's style.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct NodeReport {
    /// Node id.
    pub id: String,
    /// Style after the tick.
    pub style: NodeStyle,
}

impl SceneReport {
    /// Style of `node` at `frame`, if both exist.
    pub fn style(&self, frame: u64, node: &str) -> Option<&NodeStyle> {
        self.frames
            .iter()
            .find(|f| f.frame.0 == frame)?
            .nodes
            .iter()
            .find(|n| n.id == node)
            .map(|n| &n.style)
    }

    /// Last tick's report.
    pub fn last(&self) -> Option<&FrameReport> {
        self.frames.last()
    }

    /// One line per node per tick: `frame time node { transform: ...; opacity: ... }`.
    pub fn to_css(&self) -> String {
        let mut out = String::new();
        for frame in &self.frames {
            for node in &frame.nodes {
                let _ = writeln!(
                    out,
                    "{:>5} {:>8.3}s {} {{ transform: {}; opacity: {} }}",
                    frame.frame.0,
                    frame.time,
                    node.id,
                    node.style.css_transform(),
                    node.style.opacity
                );
            }
        }
        out
    }
}

struct Mounted {
    node: Rc<RefCell<StyledNode>>,
    _effect: MountedEffect,
}

/// Mount every effect of `scene` on a scripted host and run it tick by tick.
#[tracing::instrument(skip(scene), fields(frames = scene.duration, effects = scene.effects.len()))]
pub fn run_scene(scene: &SceneSpec) -> SillageResult<SceneReport> {
    scene.validate()?;

    let host = ScriptedHost::new(scene.viewport, scene.document);
    for region in &scene.regions {
        host.set_region(region.id.clone(), region.axis, region.range());
    }
    let frame_loop = FrameLoop::new(SignalRegistry::new(host.clone()));

    let mut mounted = Vec::with_capacity(scene.effects.len());
    for entry in &scene.effects {
        let spec = entry.effect.resolve()?;
        let (typed, node) = StyledNode::shared(entry.node.clone());
        let effect = spec.mount(&frame_loop, &node)?;
        mounted.push(Mounted {
            node: typed,
            _effect: effect,
        });
    }

    let mut frames = Vec::new();
    for f in 0..scene.duration {
        let frame = FrameIndex(f);
        let scroll = scene.scroll.sample(frame)?;
        host.set_scroll_y(scroll);
        if let Some(pointer) = &scene.pointer {
            host.set_pointer(Some(pointer.sample(frame)?));
        }

        let time = scene.fps.frames_to_secs(f);
        frame_loop.tick(time);

        let nodes = mounted
            .iter()
            .map(|m| {
                let node = m.node.borrow();
                NodeReport {
                    id: node.id.clone(),
                    style: node.style,
                }
            })
            .collect();
        frames.push(FrameReport {
            frame,
            time,
            scroll,
            nodes,
        });
    }
    tracing::debug!(ticks = frame_loop.ticks(), "scene finished");

    Ok(SceneReport { frames })
}

#[cfg(test)]
#[path = "../../tests/unit/scene/simulate.rs"]
mod tests;
