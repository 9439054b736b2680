use std::{
    cell::RefCell,
    collections::{BTreeMap, BTreeSet},
    rc::Rc,
};

use crate::{
    foundation::core::{Axis, Point, Size, Vec2},
    foundation::error::{SillageError, SillageResult},
    signal::host::{Channel, Host, ListenerId, ScrollRange},
};

#[derive(Debug, Default)]
struct ScriptedState {
    scroll: Vec2,
    pointer: Option<Point>,
    viewport: Size,
    document: Size,
    regions: BTreeMap<(String, Axis), ScrollRange>,
    listeners: BTreeMap<u64, Channel>,
    next_listener: u64,
    refuse: BTreeSet<Channel>,
    listen_calls: u64,
}

/// In-memory [`Host`] whose state is set by a script or a test.
///
/// Clones share state, so one handle can be given to a registry while another drives it.
#[derive(Clone, Debug, Default)]
pub struct ScriptedHost {
    state: Rc<RefCell<ScriptedState>>,
}

impl ScriptedHost {
    /// Host with the given viewport and document sizes.
    pub fn new(viewport: Size, document: Size) -> Self {
        let host = Self::default();
        {
            let mut s = host.state.borrow_mut();
            s.viewport = viewport;
            s.document = document;
        }
        host
    }

    /// Set the scroll offset.
    pub fn set_scroll(&self, scroll: Vec2) {
        self.state.borrow_mut().scroll = scroll;
    }

    /// Set the vertical scroll offset, keeping the horizontal one.
    pub fn set_scroll_y(&self, y: f64) {
        self.state.borrow_mut().scroll.y = y;
    }

    /// Set or clear the pointer position.
    pub fn set_pointer(&self, pointer: Option<Point>) {
        self.state.borrow_mut().pointer = pointer;
    }

    /// Define or move a tracked region.
    pub fn set_region(&self, id: impl Into<String>, axis: Axis, range: ScrollRange) {
        self.state
            .borrow_mut()
            .regions
            .insert((id.into(), axis), range);
    }

    /// Remove a tracked region, as if its element left the document.
    pub fn remove_region(&self, id: &str, axis: Axis) {
        self.state
            .borrow_mut()
            .regions
            .remove(&(id.to_string(), axis));
    }

    /// Make future [`Host::listen`] calls for `channel` fail.
    pub fn refuse_listeners(&self, channel: Channel) {
        self.state.borrow_mut().refuse.insert(channel);
    }

    /// Number of listeners currently registered on `channel`.
    pub fn listeners(&self, channel: Channel) -> usize {
        self.state
            .borrow()
            .listeners
            .values()
            .filter(|c| **c == channel)
            .count()
    }

    /// Total number of listen attempts.
    pub fn listen_calls(&self) -> u64 {
        self.state.borrow().listen_calls
    }
}

impl Host for ScriptedHost {
    fn listen(&mut self, channel: Channel) -> SillageResult<ListenerId> {
        let mut s = self.state.borrow_mut();
        s.listen_calls += 1;
        if s.refuse.contains(&channel) {
            return Err(SillageError::signal(format!(
                "host refused {channel:?} listener"
            )));
        }
        let id = s.next_listener;
        s.next_listener += 1;
        s.listeners.insert(id, channel);
        Ok(ListenerId(id))
    }

    fn unlisten(&mut self, id: ListenerId) -> SillageResult<()> {
        match self.state.borrow_mut().listeners.remove(&id.0) {
            Some(_) => Ok(()),
            None => Err(SillageError::signal(format!(
                "unknown listener {}",
                id.0
            ))),
        }
    }

    fn scroll_offset(&self) -> Vec2 {
        self.state.borrow().scroll
    }

    fn pointer(&self) -> Option<Point> {
        self.state.borrow().pointer
    }

    fn viewport(&self) -> Size {
        self.state.borrow().viewport
    }

    fn document(&self) -> Size {
        self.state.borrow().document
    }

    fn region(&self, id: &str, axis: Axis) -> Option<ScrollRange> {
        self.state
            .borrow()
            .regions
            .get(&(id.to_string(), axis))
            .copied()
    }
}
