//! Render clock: one tick samples the host once, then runs every per-frame callback.

use std::{
    cell::{Cell, RefCell},
    collections::BTreeMap,
    rc::{Rc, Weak},
};

use crate::signal::{host::HostSample, registry::SignalRegistry};

/// What a per-frame callback sees.
#[derive(Debug)]
pub struct FrameCtx<'a> {
    /// Zero-based tick count.
    pub tick: u64,
    /// Render clock time in seconds.
    pub time: f64,
    /// Seconds since the previous tick; 0 on the first tick or if the clock went backwards.
    pub dt: f64,
    /// Host state shared by every callback in this tick.
    pub sample: &'a HostSample,
    cancel: Cell<bool>,
}

impl FrameCtx<'_> {
    /// Unregister the running callback once it returns. Its guard becomes inactive.
    pub fn cancel(&self) {
        self.cancel.set(true);
    }
}

type FrameCallback = Box<dyn FnMut(&FrameCtx<'_>)>;

#[derive(Default)]
struct LoopInner {
    next_id: u64,
    // `None` while the callback is running.
    callbacks: BTreeMap<u64, Option<FrameCallback>>,
    last_time: Option<f64>,
    ticks: u64,
}

/// Single-threaded animation-frame scheduler.
#[derive(Clone)]
pub struct FrameLoop {
    registry: SignalRegistry,
    inner: Rc<RefCell<LoopInner>>,
}

impl std::fmt::Debug for FrameLoop {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("FrameLoop")
            .field("callbacks", &inner.callbacks.len())
            .field("ticks", &inner.ticks)
            .finish()
    }
}

impl FrameLoop {
    /// Loop sampling `registry` at every tick.
    pub fn new(registry: SignalRegistry) -> Self {
        Self {
            registry,
            inner: Rc::new(RefCell::new(LoopInner::default())),
        }
    }

    /// Registry sampled by this loop.
    pub fn registry(&self) -> &SignalRegistry {
        &self.registry
    }

    /// Run `callback` on every tick until the returned guard is dropped.
    pub fn request(&self, callback: impl FnMut(&FrameCtx<'_>) + 'static) -> FrameSubscription {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.callbacks.insert(id, Some(Box::new(callback)));
        FrameSubscription {
            inner: Rc::downgrade(&self.inner),
            id,
        }
    }

    /// Number of registered callbacks.
    pub fn active_callbacks(&self) -> usize {
        self.inner.borrow().callbacks.len()
    }

    /// Ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.inner.borrow().ticks
    }

    /// Advance the clock to `now` seconds and run callbacks in registration order.
    ///
    /// Callbacks registered during the tick first run on the next one. A callback cancelled
    /// during the tick does not run again. Returns the number of callbacks invoked.
    pub fn tick(&self, now: f64) -> usize {
        let (tick, dt, ids) = {
            let mut inner = self.inner.borrow_mut();
            let dt = match inner.last_time {
                Some(last) if now.is_finite() => (now - last).max(0.0),
                _ => 0.0,
            };
            if now.is_finite() {
                inner.last_time = Some(now);
            }
            let tick = inner.ticks;
            inner.ticks += 1;
            let ids: Vec<u64> = inner.callbacks.keys().copied().collect();
            (tick, dt, ids)
        };

        let sample = self.registry.sample(now);
        let ctx = FrameCtx {
            tick,
            time: now,
            dt,
            sample: &sample,
            cancel: Cell::new(false),
        };

        let mut invoked = 0;
        for id in ids {
            let taken = self
                .inner
                .borrow_mut()
                .callbacks
                .get_mut(&id)
                .and_then(Option::take);
            let Some(mut callback) = taken else {
                continue;
            };
            ctx.cancel.set(false);
            callback(&ctx);
            invoked += 1;

            let cancelled = {
                let mut inner = self.inner.borrow_mut();
                if ctx.cancel.get() {
                    inner.callbacks.remove(&id);
                    Some(callback)
                } else {
                    match inner.callbacks.get_mut(&id) {
                        Some(slot) => {
                            *slot = Some(callback);
                            None
                        }
                        None => Some(callback),
                    }
                }
            };
            drop(cancelled);
        }
        invoked
    }
}

/// Keeps a per-frame callback registered; dropping it cancels the callback.
#[must_use = "dropping the subscription cancels the frame callback"]
pub struct FrameSubscription {
    inner: Weak<RefCell<LoopInner>>,
    id: u64,
}

impl FrameSubscription {
    /// Whether the callback is still registered.
    pub fn is_active(&self) -> bool {
        self.inner
            .upgrade()
            .is_some_and(|inner| inner.borrow().callbacks.contains_key(&self.id))
    }
}

impl std::fmt::Debug for FrameSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameSubscription")
            .field("id", &self.id)
            .finish()
    }
}

impl Drop for FrameSubscription {
    fn drop(&mut self) {
        let Some(inner) = self.inner.upgrade() else {
            return;
        };
        let removed = inner.borrow_mut().callbacks.remove(&self.id);
        drop(removed);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/runtime/frame_loop.rs"]
mod tests;
