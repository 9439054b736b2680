use std::collections::BTreeSet;

use crate::{
    animation::keyframes::Keyframes,
    effect::presets::Preset,
    effect::spec::EffectSpec,
    foundation::core::{Axis, Fps, Point, Size},
    foundation::error::{SillageError, SillageResult},
    signal::host::ScrollRange,
};

/// Longest scene accepted, in ticks (one hour at 60 fps).
pub const MAX_SCENE_FRAMES: u64 = 216_000;

/// A headless page: sizes, tracked regions, scripted input and the effects mounted on it.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct SceneSpec {
    /// Simulated tick rate.
    pub fps: Fps,
    /// Number of ticks to run.
    pub duration: u64,
    /// Visible viewport size.
    pub viewport: Size,
    /// Full document size.
    pub document: Size,
    /// Element scroll ranges known to the host.
    #[serde(default)]
    pub regions: Vec<SceneRegion>,
    /// Vertical scroll offset per tick.
    pub scroll: Keyframes<f64>,
    /// Pointer position per tick; absent means the pointer never enters the viewport.
    #[serde(default)]
    pub pointer: Option<Keyframes<Point>>,
    /// One effect per node.
    pub effects: Vec<SceneEffect>,
}

/// An element the host can resolve to a scroll range.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneRegion {
    /// Element id.
    pub id: String,
    /// Scroll axis.
    #[serde(default)]
    pub axis: Axis,
    /// Offset at which progress is 0.
    pub start: f64,
    /// Offset at which progress is 1.
    pub end: f64,
}

impl SceneRegion {
    /// The region's scroll range.
    pub fn range(&self) -> ScrollRange {
        ScrollRange::new(self.start, self.end)
    }
}

/// A node and the effect driving it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SceneEffect {
    /// Node id, unique within the scene.
    pub node: String,
    /// Effect configuration.
    pub effect: EffectSource,
}

/// Either a named preset or a full effect.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum EffectSource {
    /// A preset, optionally retargeted at another element.
    Preset {
        /// Preset name.
        preset: Preset,
        /// Element id replacing the preset's default.
        #[serde(default)]
        region: Option<String>,
    },
    /// A full effect definition.
    Custom(EffectSpec),
}

impl EffectSource {
    /// Materialize into a validated effect.
    pub fn resolve(&self) -> SillageResult<EffectSpec> {
        match self {
            Self::Preset { preset, region } => preset.spec_for(region.as_deref()),
            Self::Custom(spec) => {
                spec.validate()?;
                Ok(spec.clone())
            }
        }
    }
}

impl SceneSpec {
    /// Check sizes, scripts and every effect.
    pub fn validate(&self) -> SillageResult<()> {
        Fps::new(self.fps.num, self.fps.den)?;
        if self.duration == 0 {
            return Err(SillageError::validation("scene duration must be > 0"));
        }
        if self.duration > MAX_SCENE_FRAMES {
            return Err(SillageError::validation(format!(
                "scene duration must be <= {MAX_SCENE_FRAMES} frames, got {}",
                self.duration
            )));
        }
        for (what, size) in [("viewport", self.viewport), ("document", self.document)] {
            if !(size.width.is_finite() && size.height.is_finite())
                || size.width <= 0.0
                || size.height <= 0.0
            {
                return Err(SillageError::validation(format!(
                    "{what} size must be finite and > 0, got {}x{}",
                    size.width, size.height
                )));
            }
        }

        let mut regions = BTreeSet::new();
        for region in &self.regions {
            if region.id.trim().is_empty() {
                return Err(SillageError::validation("region id must not be empty"));
            }
            if !region.start.is_finite() || !region.end.is_finite() {
                return Err(SillageError::validation(format!(
                    "region '{}' bounds must be finite",
                    region.id
                )));
            }
            if !regions.insert((region.id.as_str(), region.axis)) {
                return Err(SillageError::validation(format!(
                    "region '{}' is defined more than once",
                    region.id
                )));
            }
        }

        self.scroll
            .validate()
            .map_err(|err| SillageError::validation(format!("scroll script: {err}")))?;
        if let Some(pointer) = &self.pointer {
            pointer
                .validate()
                .map_err(|err| SillageError::validation(format!("pointer script: {err}")))?;
        }

        if self.effects.is_empty() {
            return Err(SillageError::validation("scene has no effects"));
        }
        let mut nodes = BTreeSet::new();
        for effect in &self.effects {
            if effect.node.trim().is_empty() {
                return Err(SillageError::validation("node id must not be empty"));
            }
            if !nodes.insert(effect.node.as_str()) {
                return Err(SillageError::validation(format!(
                    "node '{}' appears more than once",
                    effect.node
                )));
            }
            effect
                .effect
                .resolve()
                .map_err(|err| SillageError::validation(format!("node '{}': {err}", effect.node)))?;
        }
        Ok(())
    }

    /// Parse and validate a scene from JSON.
    pub fn from_json(json: &str) -> SillageResult<Self> {
        let scene: Self = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
