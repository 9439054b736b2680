use std::collections::BTreeMap;

use crate::{
    foundation::core::{Axis, Point, Size, Vec2},
    foundation::error::SillageResult,
};

/// Low-level host input channel.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Channel {
    /// Viewport scroll offset.
    Scroll,
    /// Pointer position.
    Pointer,
}

/// Opaque id of a listener registered with a [`Host`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// Scroll offsets at which a tracked region starts and ends.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScrollRange {
    /// Offset at which progress is 0.
    pub start: f64,
    /// Offset at which progress is 1.
    pub end: f64,
}

impl ScrollRange {
    /// Build a range.
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// `end - start`; zero or negative means the region cannot be traversed.
    pub fn len(&self) -> f64 {
        self.end - self.start
    }

    /// True when the region has no scrollable length.
    pub fn is_empty(&self) -> bool {
        let len = self.len();
        len.is_nan() || len <= 0.0
    }
}

/// Region lookup key: element id plus axis.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegionKey {
    /// Element id known to the host.
    pub id: String,
    /// Scroll axis.
    pub axis: Axis,
}

/// The environment a page runs in: viewport, document, scroll and pointer state.
///
/// Implementations wrap a real windowing or DOM layer, or a scripted simulation.
pub trait Host {
    /// Register a low-level listener for `channel`.
    fn listen(&mut self, channel: Channel) -> SillageResult<ListenerId>;

    /// Remove a listener previously returned by [`Host::listen`].
    fn unlisten(&mut self, id: ListenerId) -> SillageResult<()>;

    /// Current scroll offset.
    fn scroll_offset(&self) -> Vec2;

    /// Current pointer position in viewport coordinates, if known.
    fn pointer(&self) -> Option<Point>;

    /// Visible viewport size.
    fn viewport(&self) -> Size;

    /// Full scrollable document size.
    fn document(&self) -> Size;

    /// Scroll range of a tracked element, or `None` when it no longer exists.
    fn region(&self, id: &str, axis: Axis) -> Option<ScrollRange>;
}

/// Host state captured once per tick. All effects in a tick read the same sample.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HostSample {
    /// Render clock time in seconds.
    pub time: f64,
    /// Scroll offset.
    pub scroll: Vec2,
    /// Pointer position.
    pub pointer: Option<Point>,
    /// Viewport size.
    pub viewport: Size,
    /// Document size.
    pub document: Size,
    /// Resolved ranges of subscribed regions.
    pub regions: BTreeMap<RegionKey, ScrollRange>,
}

impl HostSample {
    /// Scroll range of the whole document along `axis`.
    pub fn viewport_range(&self, axis: Axis) -> ScrollRange {
        let scrollable = axis.of_size(self.document) - axis.of_size(self.viewport);
        ScrollRange::new(0.0, scrollable.max(0.0))
    }

    /// Resolved range for a subscribed region.
    pub fn region(&self, key: &RegionKey) -> Option<ScrollRange> {
        self.regions.get(key).copied()
    }
}
