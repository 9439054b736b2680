//! Shared, reference-counted access to host input.
//!
//! Every mounted effect reads host state through one [`SignalRegistry`]. The registry keeps a
//! single low-level host listener per [`Channel`] no matter how many effects subscribe, and
//! captures one [`HostSample`] per tick so every effect in that tick sees the same values.

use std::{
    cell::RefCell,
    collections::BTreeMap,
    rc::{Rc, Weak},
};

use crate::{
    foundation::core::Axis,
    signal::host::{Channel, Host, HostSample, ListenerId, RegionKey, ScrollRange},
};

#[derive(Debug, Default)]
struct ChannelState {
    subscribers: usize,
    listener: Option<ListenerId>,
    frozen: bool,
}

#[derive(Debug, Default)]
struct RegionState {
    subscribers: usize,
    last: Option<ScrollRange>,
    missing: bool,
}

struct RegistryInner {
    host: Box<dyn Host>,
    channels: BTreeMap<Channel, ChannelState>,
    regions: BTreeMap<RegionKey, RegionState>,
    sample: HostSample,
}

impl RegistryInner {
    fn refresh(&mut self, now: f64) {
        let scroll_live = self.is_live(Channel::Scroll);
        let pointer_live = self.is_live(Channel::Pointer);

        self.sample.time = now;
        self.sample.viewport = self.host.viewport();
        self.sample.document = self.host.document();
        if scroll_live {
            self.sample.scroll = self.host.scroll_offset();
        }
        if pointer_live {
            self.sample.pointer = self.host.pointer();
        }

        self.sample.regions.clear();
        for (key, state) in self.regions.iter_mut() {
            match self.host.region(&key.id, key.axis) {
                Some(range) => {
                    state.last = Some(range);
                    state.missing = false;
                }
                None if !state.missing => {
                    tracing::warn!(region = %key.id, "tracked region vanished; freezing its signal");
                    state.missing = true;
                }
                None => {}
            }
            if !state.missing
                && let Some(range) = state.last
            {
                self.sample.regions.insert(key.clone(), range);
            }
        }
    }

    fn is_live(&self, channel: Channel) -> bool {
        self.channels
            .get(&channel)
            .is_some_and(|c| c.subscribers > 0 && !c.frozen)
    }
}

/// Process-wide registry of host signal subscriptions.
///
/// Cloning yields another handle to the same registry.
#[derive(Clone)]
pub struct SignalRegistry {
    inner: Rc<RefCell<RegistryInner>>,
}

impl std::fmt::Debug for SignalRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("SignalRegistry")
            .field("channels", &inner.channels)
            .field("regions", &inner.regions.len())
            .finish()
    }
}

impl SignalRegistry {
    /// Wrap a host.
    pub fn new(host: impl Host + 'static) -> Self {
        Self {
            inner: Rc::new(RefCell::new(RegistryInner {
                host: Box::new(host),
                channels: BTreeMap::new(),
                regions: BTreeMap::new(),
                sample: HostSample::default(),
            })),
        }
    }

    /// Subscribe to a channel. The first subscriber registers the host listener.
    ///
    /// Registration failure does not fail the subscription: the channel is frozen and keeps
    /// serving its last sampled value.
    pub fn subscribe(&self, channel: Channel) -> ChannelSubscription {
        let mut inner = self.inner.borrow_mut();
        let inner = &mut *inner;
        let state = inner.channels.entry(channel).or_default();
        state.subscribers += 1;
        if state.subscribers == 1 {
            match inner.host.listen(channel) {
                Ok(id) => {
                    tracing::debug!(?channel, listener = id.0, "host listener registered");
                    state.listener = Some(id);
                    state.frozen = false;
                }
                Err(err) => {
                    tracing::warn!(?channel, error = %err, "host listener registration failed; channel frozen");
                    state.listener = None;
                    state.frozen = true;
                }
            }
        }
        ChannelSubscription {
            registry: Rc::downgrade(&self.inner),
            channel,
        }
    }

    /// Subscribe to scroll-range updates of a tracked element.
    pub fn subscribe_region(&self, id: impl Into<String>, axis: Axis) -> RegionSubscription {
        let key = RegionKey {
            id: id.into(),
            axis,
        };
        let mut inner = self.inner.borrow_mut();
        inner.regions.entry(key.clone()).or_default().subscribers += 1;
        RegionSubscription {
            registry: Rc::downgrade(&self.inner),
            key,
        }
    }

    /// Capture host state for the tick at `now` and return it.
    pub fn sample(&self, now: f64) -> HostSample {
        let mut inner = self.inner.borrow_mut();
        inner.refresh(now);
        inner.sample.clone()
    }

    /// Last captured sample.
    pub fn snapshot(&self) -> HostSample {
        self.inner.borrow().sample.clone()
    }

    /// Number of live subscriptions on `channel`.
    pub fn subscriber_count(&self, channel: Channel) -> usize {
        self.inner
            .borrow()
            .channels
            .get(&channel)
            .map_or(0, |c| c.subscribers)
    }

    /// Whether a host listener is currently registered for `channel`.
    pub fn is_listening(&self, channel: Channel) -> bool {
        self.inner
            .borrow()
            .channels
            .get(&channel)
            .is_some_and(|c| c.listener.is_some())
    }

    /// Whether `channel` failed to register and is serving its last value.
    pub fn is_frozen(&self, channel: Channel) -> bool {
        self.inner
            .borrow()
            .channels
            .get(&channel)
            .is_some_and(|c| c.frozen)
    }

    /// Number of distinct regions with live subscriptions.
    pub fn tracked_regions(&self) -> usize {
        self.inner.borrow().regions.len()
    }
}

/// Keeps a channel subscription alive; dropping it releases the subscription.
#[must_use = "dropping the subscription releases the host listener"]
#[derive(Debug)]
pub struct ChannelSubscription {
    registry: Weak<RefCell<RegistryInner>>,
    channel: Channel,
}

impl ChannelSubscription {
    /// Subscribed channel.
    pub fn channel(&self) -> Channel {
        self.channel
    }
}

impl Drop for ChannelSubscription {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut inner = registry.borrow_mut();
        let inner = &mut *inner;
        let Some(state) = inner.channels.get_mut(&self.channel) else {
            return;
        };
        state.subscribers = state.subscribers.saturating_sub(1);
        if state.subscribers > 0 {
            return;
        }
        if let Some(id) = state.listener.take() {
            match inner.host.unlisten(id) {
                Ok(()) => {
                    tracing::debug!(channel = ?self.channel, listener = id.0, "host listener released")
                }
                Err(err) => {
                    tracing::warn!(channel = ?self.channel, error = %err, "host listener release failed")
                }
            }
        }
        inner.channels.remove(&self.channel);
    }
}

/// Keeps a region subscription alive; dropping it stops resolving the region.
#[must_use = "dropping the subscription stops tracking the region"]
#[derive(Debug)]
pub struct RegionSubscription {
    registry: Weak<RefCell<RegistryInner>>,
    key: RegionKey,
}

impl RegionSubscription {
    /// Tracked region.
    pub fn key(&self) -> &RegionKey {
        &self.key
    }
}

impl Drop for RegionSubscription {
    fn drop(&mut self) {
        let Some(registry) = self.registry.upgrade() else {
            return;
        };
        let mut inner = registry.borrow_mut();
        let Some(state) = inner.regions.get_mut(&self.key) else {
            return;
        };
        state.subscribers = state.subscribers.saturating_sub(1);
        if state.subscribers == 0 {
            inner.regions.remove(&self.key);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/signal/registry.rs"]
mod tests;
