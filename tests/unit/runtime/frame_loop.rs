use std::cell::Cell;

use super::*;
use crate::{
    foundation::core::{Size, Vec2},
    scene::host::ScriptedHost,
    signal::host::Channel,
};

fn frame_loop() -> (ScriptedHost, FrameLoop) {
    let host = ScriptedHost::new(Size::new(100.0, 100.0), Size::new(100.0, 1000.0));
    let registry = SignalRegistry::new(host.clone());
    (host, FrameLoop::new(registry))
}

#[test]
fn runs_callbacks_until_guard_drops() {
    let (_host, fl) = frame_loop();
    let calls = Rc::new(Cell::new(0u32));
    let c = calls.clone();
    let sub = fl.request(move |_| c.set(c.get() + 1));

    assert_eq!(fl.tick(0.0), 1);
    assert_eq!(fl.tick(0.016), 1);
    assert!(sub.is_active());
    drop(sub);
    assert_eq!(fl.tick(0.032), 0);
    assert_eq!(calls.get(), 2);
    assert_eq!(fl.active_callbacks(), 0);
    assert_eq!(fl.ticks(), 3);
}

#[test]
fn dt_is_measured_between_ticks() {
    let (_host, fl) = frame_loop();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let s = seen.clone();
    let _sub = fl.request(move |ctx| s.borrow_mut().push((ctx.tick, ctx.dt)));

    fl.tick(1.0);
    fl.tick(1.5);
    fl.tick(1.25);
    fl.tick(f64::NAN);
    assert_eq!(
        *seen.borrow(),
        vec![(0, 0.0), (1, 0.5), (2, 0.0), (3, 0.0)]
    );
}

#[test]
fn every_callback_in_a_tick_sees_the_same_sample() {
    let (host, fl) = frame_loop();
    let _scroll = fl.registry().subscribe(Channel::Scroll);
    host.set_scroll_y(10.0);

    let seen = Rc::new(RefCell::new(Vec::new()));
    let mover = host.clone();
    let s1 = seen.clone();
    let _a = fl.request(move |ctx| {
        s1.borrow_mut().push(ctx.sample.scroll);
        mover.set_scroll_y(500.0);
    });
    let s2 = seen.clone();
    let _b = fl.request(move |ctx| s2.borrow_mut().push(ctx.sample.scroll));

    fl.tick(0.0);
    assert_eq!(*seen.borrow(), vec![Vec2::new(0.0, 10.0); 2]);
}

#[test]
fn callback_cancelled_mid_tick_does_not_run() {
    let (_host, fl) = frame_loop();
    let victim_calls = Rc::new(Cell::new(0u32));
    let slot: Rc<RefCell<Option<FrameSubscription>>> = Rc::new(RefCell::new(None));

    let s = slot.clone();
    let _killer = fl.request(move |_| {
        s.borrow_mut().take();
    });
    let v = victim_calls.clone();
    *slot.borrow_mut() = Some(fl.request(move |_| v.set(v.get() + 1)));

    assert_eq!(fl.tick(0.0), 1);
    assert_eq!(victim_calls.get(), 0);
    assert_eq!(fl.active_callbacks(), 1);
}

#[test]
fn callback_may_cancel_itself() {
    let (_host, fl) = frame_loop();
    let calls = Rc::new(Cell::new(0u32));
    let slot: Rc<RefCell<Option<FrameSubscription>>> = Rc::new(RefCell::new(None));

    let s = slot.clone();
    let c = calls.clone();
    *slot.borrow_mut() = Some(fl.request(move |_| {
        c.set(c.get() + 1);
        s.borrow_mut().take();
    }));

    fl.tick(0.0);
    fl.tick(0.1);
    assert_eq!(calls.get(), 1);
    assert_eq!(fl.active_callbacks(), 0);
}

#[test]
fn callbacks_registered_mid_tick_start_next_tick() {
    let (_host, fl) = frame_loop();
    let late_calls = Rc::new(Cell::new(0u32));
    let held: Rc<RefCell<Vec<FrameSubscription>>> = Rc::new(RefCell::new(Vec::new()));

    let fl2 = fl.clone();
    let h = held.clone();
    let l = late_calls.clone();
    let _spawner = fl.request(move |ctx| {
        if ctx.tick == 0 {
            let l = l.clone();
            h.borrow_mut()
                .push(fl2.request(move |_| l.set(l.get() + 1)));
        }
    });

    assert_eq!(fl.tick(0.0), 1);
    assert_eq!(late_calls.get(), 0);
    assert_eq!(fl.tick(0.1), 2);
    assert_eq!(late_calls.get(), 1);
}

#[test]
fn callback_can_cancel_itself() {
    let (_host, fl) = frame_loop();
    let calls = Rc::new(Cell::new(0u32));
    let c = calls.clone();
    let sub = fl.request(move |ctx| {
        c.set(c.get() + 1);
        if ctx.tick == 1 {
            ctx.cancel();
        }
    });
    let other = fl.request(|_| {});

    assert_eq!(fl.tick(0.0), 2);
    assert_eq!(fl.tick(0.016), 2);
    assert!(!sub.is_active());
    assert!(other.is_active());
    assert_eq!(fl.tick(0.032), 1);
    assert_eq!(calls.get(), 2);
    drop(sub);
    assert_eq!(fl.active_callbacks(), 1);
}
