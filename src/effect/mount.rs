use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

use crate::{
    binding::bound::Binding,
    binding::node::{NodeRef, RenderNode},
    effect::spec::EffectSpec,
    foundation::error::SillageResult,
    runtime::frame_loop::{FrameCtx, FrameLoop, FrameSubscription},
    signal::source::{Signal, SignalSource},
};

/// Per-instance pipeline state owned by the frame callback.
struct EffectInstance {
    name: String,
    // `None` once the node is gone and the host subscriptions are released.
    source: Option<SignalSource>,
    bindings: Vec<Binding>,
    last_signal: Rc<Cell<Option<Signal>>>,
}

impl EffectInstance {
    fn on_frame(&mut self, ctx: &FrameCtx<'_>, node: &Weak<RefCell<dyn RenderNode>>) {
        let (Some(source), Some(node)) = (self.source.as_mut(), node.upgrade()) else {
            tracing::debug!(effect = %self.name, "node dropped; releasing effect");
            self.source = None;
            ctx.cancel();
            return;
        };
        let signal = source.read(ctx.sample);
        self.last_signal.set(Some(signal));

        let Ok(mut node) = node.try_borrow_mut() else {
            tracing::debug!(effect = %self.name, tick = ctx.tick, "node busy; skipping tick");
            return;
        };
        for binding in &mut self.bindings {
            node.apply(binding.evaluate(signal.value(), ctx.dt));
        }
    }
}

impl EffectSpec {
    /// Attach this effect to `node` and start driving it from `frame_loop`.
    ///
    /// Configuration is validated first, so an invalid effect never subscribes to anything.
    #[tracing::instrument(skip(self, frame_loop, node), fields(effect = %self.name))]
    pub fn mount(&self, frame_loop: &FrameLoop, node: &NodeRef) -> SillageResult<MountedEffect> {
        self.validate()?;
        let bindings = self
            .bindings
            .iter()
            .map(|b| b.instantiate())
            .collect::<SillageResult<Vec<_>>>()?;
        let source = self.signal.attach(frame_loop.registry())?;

        let last_signal = Rc::new(Cell::new(None));
        let mut instance = EffectInstance {
            name: self.name.clone(),
            source: Some(source),
            bindings,
            last_signal: last_signal.clone(),
        };
        let weak_node = Rc::downgrade(node);
        let frame = frame_loop.request(move |ctx| instance.on_frame(ctx, &weak_node));
        tracing::debug!("effect mounted");

        Ok(MountedEffect {
            name: self.name.clone(),
            last_signal,
            frame,
        })
    }
}

/// A live effect. Dropping it unmounts: its frame callback and host subscriptions are released
/// before the next tick. The effect also releases itself on the first tick after its node is
/// dropped.
#[must_use = "dropping a mounted effect unmounts it"]
#[derive(Debug)]
pub struct MountedEffect {
    name: String,
    last_signal: Rc<Cell<Option<Signal>>>,
    frame: FrameSubscription,
}

impl MountedEffect {
    /// Effect name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Signal read on the most recent tick.
    pub fn last_signal(&self) -> Option<Signal> {
        self.last_signal.get()
    }

    /// Whether the frame callback is still registered.
    pub fn is_live(&self) -> bool {
        self.frame.is_active()
    }

    /// Unmount explicitly.
    pub fn unmount(self) {
        tracing::debug!(effect = %self.name, "effect unmounted");
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effect/mount.rs"]
mod tests;
