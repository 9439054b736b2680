//! Ready-made effects for the storytelling page.

use crate::{
    binding::property::{Unit, VisualProperty},
    effect::spec::{EffectBuilder, EffectSpec},
    foundation::core::Axis,
    foundation::error::SillageResult,
    signal::source::SignalSpec,
    smoothing::spring::SpringParams,
};

/// Named effect configurations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// Scroll progress through the gallery slides the track from `0%` to `-75%`.
    HorizontalGallery,
    /// Scroll velocity skews text by up to 5 degrees either way, spring-smoothed.
    VelocitySkew,
    /// Progress through the chronicle grows an index bar from 0 to full scale.
    ChronicleIndex,
    /// Vertical pointer position drifts orbs by up to 40px, spring-smoothed.
    FloatingOrbs,
    /// A chapter fades and grows in, then out, as it scrolls through.
    ChapterTransition,
}

impl Preset {
    /// Every preset.
    pub const ALL: [Preset; 5] = [
        Preset::HorizontalGallery,
        Preset::VelocitySkew,
        Preset::ChronicleIndex,
        Preset::FloatingOrbs,
        Preset::ChapterTransition,
    ];

    /// Stable name, matching the serialized form.
    pub fn name(self) -> &'static str {
        match self {
            Self::HorizontalGallery => "horizontal_gallery",
            Self::VelocitySkew => "velocity_skew",
            Self::ChronicleIndex => "chronicle_index",
            Self::FloatingOrbs => "floating_orbs",
            Self::ChapterTransition => "chapter_transition",
        }
    }

    /// Look a preset up by name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Element id tracked by default, for presets following an element.
    pub fn default_region(self) -> Option<&'static str> {
        match self {
            Self::HorizontalGallery => Some("gallery"),
            Self::ChronicleIndex => Some("chronicle"),
            Self::ChapterTransition => Some("chapter"),
            Self::VelocitySkew | Self::FloatingOrbs => None,
        }
    }

    /// Effect with the default tracked element.
    pub fn spec(self) -> SillageResult<EffectSpec> {
        self.spec_for(None)
    }

    /// Effect tracking `region` instead of the default element. Ignored by presets that do not
    /// follow an element.
    pub fn spec_for(self, region: Option<&str>) -> SillageResult<EffectSpec> {
        let progress = || {
            let id = region.or(self.default_region()).unwrap_or_default();
            SignalSpec::element_progress(id)
        };

        match self {
            Self::HorizontalGallery => EffectBuilder::new(self.name(), progress())
                .bind(VisualProperty::TranslateX, [0.0, 1.0], [0.0, -75.0])?
                .unit(Unit::Percent)?
                .build(),
            Self::VelocitySkew => EffectBuilder::new(self.name(), SignalSpec::scroll_velocity())
                .bind(VisualProperty::SkewY, [-3000.0, 3000.0], [-5.0, 5.0])?
                .spring(SpringParams::new(400.0, 50.0))?
                .build(),
            Self::ChronicleIndex => EffectBuilder::new(self.name(), progress())
                .bind(VisualProperty::Scale, [0.0, 1.0], [0.0, 1.0])?
                .spring(SpringParams::new(100.0, 30.0))?
                .build(),
            Self::FloatingOrbs => EffectBuilder::new(
                self.name(),
                SignalSpec::PointerProgress { axis: Axis::Y },
            )
            .bind(VisualProperty::TranslateY, [0.0, 1.0], [-40.0, 40.0])?
            .unit(Unit::Px)?
            .spring(SpringParams::new(50.0, 20.0))?
            .build(),
            Self::ChapterTransition => EffectBuilder::new(self.name(), progress())
                .bind(VisualProperty::Opacity, [0.0, 0.5, 1.0], [0.0, 1.0, 0.0])?
                .bind(VisualProperty::Scale, [0.0, 0.5, 1.0], [0.9, 1.0, 0.9])?
                .build(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effect/presets.rs"]
mod tests;
