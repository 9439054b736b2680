use std::collections::VecDeque;

use crate::{
    foundation::core::Axis,
    foundation::error::{SillageError, SillageResult},
    foundation::math::{clamp01, inverse_lerp},
    signal::host::{Channel, HostSample, RegionKey, ScrollRange},
    signal::registry::{ChannelSubscription, RegionSubscription, SignalRegistry},
};

fn default_velocity_window() -> f64 {
    0.05
}

/// Scroll-through range tracked by a progress signal.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Region {
    /// Whole document, from top to the last scrollable offset.
    #[default]
    Viewport,
    /// A host element's own scroll-through range.
    Element {
        /// Element id known to the host.
        id: String,
    },
}

/// Which host input an effect follows.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SignalSpec {
    /// Scroll progress through a region, in `[0, 1]`.
    ScrollProgress {
        /// Tracked region.
        #[serde(default)]
        region: Region,
        /// Scroll axis.
        #[serde(default)]
        axis: Axis,
    },
    /// Signed scroll velocity in pixels per second.
    ScrollVelocity {
        /// Scroll axis.
        #[serde(default)]
        axis: Axis,
        /// Derivative sampling window in seconds.
        #[serde(default = "default_velocity_window")]
        window: f64,
    },
    /// Pointer position normalized by the viewport, in `[0, 1]`.
    PointerProgress {
        /// Pointer axis.
        #[serde(default)]
        axis: Axis,
    },
}

impl SignalSpec {
    /// Vertical progress through the whole page.
    pub fn page_progress() -> Self {
        Self::ScrollProgress {
            region: Region::Viewport,
            axis: Axis::Y,
        }
    }

    /// Vertical progress through a host element.
    pub fn element_progress(id: impl Into<String>) -> Self {
        Self::ScrollProgress {
            region: Region::Element { id: id.into() },
            axis: Axis::Y,
        }
    }

    /// Vertical scroll velocity with the default sampling window.
    pub fn scroll_velocity() -> Self {
        Self::ScrollVelocity {
            axis: Axis::Y,
            window: default_velocity_window(),
        }
    }

    /// Reject unusable signal configuration.
    pub fn validate(&self) -> SillageResult<()> {
        match self {
            Self::ScrollProgress {
                region: Region::Element { id },
                ..
            } if id.trim().is_empty() => Err(SillageError::validation(
                "tracked element id must not be empty",
            )),
            Self::ScrollVelocity { window, .. } if !window.is_finite() || *window <= 0.0 => {
                Err(SillageError::validation(format!(
                    "velocity sampling window must be finite and > 0, got {window}"
                )))
            }
            _ => Ok(()),
        }
    }

    /// Subscribe to the host channels this signal needs.
    pub fn attach(&self, registry: &SignalRegistry) -> SillageResult<SignalSource> {
        self.validate()?;
        let (channel, region) = match self {
            Self::ScrollProgress { region, axis } => {
                let region = match region {
                    Region::Viewport => None,
                    Region::Element { id } => Some(registry.subscribe_region(id.clone(), *axis)),
                };
                (Channel::Scroll, region)
            }
            Self::ScrollVelocity { .. } => (Channel::Scroll, None),
            Self::PointerProgress { .. } => (Channel::Pointer, None),
        };
        Ok(SignalSource {
            spec: self.clone(),
            _channel: registry.subscribe(channel),
            region,
            last: 0.0,
            history: VecDeque::new(),
        })
    }
}

/// One sampled signal value.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Signal {
    /// Bounded `[0, 1]` progress.
    Progress(f64),
    /// Unbounded signed velocity.
    Velocity(f64),
}

impl Signal {
    /// Scalar value.
    pub fn value(self) -> f64 {
        match self {
            Self::Progress(v) | Self::Velocity(v) => v,
        }
    }
}

/// Progress of `offset` through `range`; `0` for an empty range.
pub fn progress_in(range: ScrollRange, offset: f64) -> f64 {
    if range.is_empty() {
        return 0.0;
    }
    clamp01(inverse_lerp(range.start, range.end, offset))
}

/// Live signal attached to a registry. Dropping it releases its subscriptions.
#[derive(Debug)]
pub struct SignalSource {
    spec: SignalSpec,
    _channel: ChannelSubscription,
    region: Option<RegionSubscription>,
    last: f64,
    history: VecDeque<(f64, f64)>,
}

impl SignalSource {
    /// Configuration this source was attached with.
    pub fn spec(&self) -> &SignalSpec {
        &self.spec
    }

    /// Read the signal from this tick's sample.
    ///
    /// A tracked region missing from the sample freezes progress at its last value.
    pub fn read(&mut self, sample: &HostSample) -> Signal {
        match &self.spec {
            SignalSpec::ScrollProgress { region, axis } => {
                let range = match (region, &self.region) {
                    (Region::Element { .. }, Some(sub)) => sample.region(sub.key()),
                    _ => Some(sample.viewport_range(*axis)),
                };
                if let Some(range) = range {
                    self.last = progress_in(range, axis.of_vec(sample.scroll));
                }
                Signal::Progress(self.last)
            }
            SignalSpec::ScrollVelocity { axis, window } => {
                self.last = self.push_velocity(sample.time, axis.of_vec(sample.scroll), *window);
                Signal::Velocity(self.last)
            }
            SignalSpec::PointerProgress { axis } => {
                if let Some(p) = sample.pointer {
                    let extent = axis.of_size(sample.viewport);
                    self.last = progress_in(ScrollRange::new(0.0, extent), axis.of_point(p));
                }
                Signal::Progress(self.last)
            }
        }
    }

    fn push_velocity(&mut self, time: f64, offset: f64, window: f64) -> f64 {
        if !time.is_finite() || !offset.is_finite() {
            return self.last;
        }
        match self.history.back() {
            Some(&(t, _)) if time < t => self.history.clear(),
            Some(&(t, _)) if time == t => {
                self.history.pop_back();
            }
            _ => {}
        }
        self.history.push_back((time, offset));
        while self
            .history
            .front()
            .is_some_and(|&(t, _)| t < time - window - f64::EPSILON)
        {
            self.history.pop_front();
        }

        let (Some(&(t0, o0)), Some(&(t1, o1))) = (self.history.front(), self.history.back())
        else {
            return 0.0;
        };
        let span = t1 - t0;
        if span <= 0.0 {
            return 0.0;
        }
        (o1 - o0) / span
    }

    /// Region subscription key, for element-tracking progress signals.
    pub fn region(&self) -> Option<&RegionKey> {
        self.region.as_ref().map(|r| r.key())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/signal/source.rs"]
mod tests;
