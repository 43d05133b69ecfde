//! End-to-end scheduler behavior: completion protocol, replacement
//! continuity, ping-pong looping, chains and the event registry.

use std::cell::RefCell;
use std::rc::Rc;
use tweenlet::prelude::*;

/// Shared recorder for callback and event traces
#[derive(Default)]
struct Trace {
    entries: RefCell<Vec<String>>,
}

impl Trace {
    fn push(&self, entry: impl Into<String>) {
        self.entries.borrow_mut().push(entry.into());
    }

    fn entries(&self) -> Vec<String> {
        self.entries.borrow().clone()
    }

    fn count_of(&self, prefix: &str) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|e| e.starts_with(prefix))
            .count()
    }
}

fn tick(tweener: &mut Tweener, t: f64) {
    tweener.tick(&TickClock::new(t, t));
}

#[test]
fn completes_with_exactly_one_ready() {
    let mut tweener = Tweener::new();
    let trace = Rc::new(Trace::default());
    let (ready, abort) = (Rc::clone(&trace), Rc::clone(&trace));

    tweener
        .tween_to(
            0,
            TweenParams::new(10.0)
                .duration(1.0)
                .on_ready(move || ready.push("ready"))
                .on_abort(move || abort.push("abort")),
            &TickClock::new(0.0, 0.0),
        )
        .unwrap();

    for step in 1..=10 {
        tick(&mut tweener, step as f64 * 0.125);
    }

    let tween = tweener.tween(0).unwrap();
    assert_eq!(tween.current(), 10.0);
    assert!(!tween.is_running());
    assert_eq!(trace.count_of("ready"), 1);
    assert_eq!(trace.count_of("abort"), 0);
    assert!(!tweener.is_any_running());
}

#[test]
fn terminal_update_delivers_exact_target() {
    let mut tweener = Tweener::new();
    let values = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&values);

    tweener
        .tween_to(
            0,
            TweenParams::new(1.0)
                .duration(0.3)
                .easing(EasingMode::Smoother)
                .on_update(move |v| sink.borrow_mut().push(v)),
            &TickClock::new(0.0, 0.0),
        )
        .unwrap();

    // The last sampled time overshoots the window; the terminal update must
    // still land exactly on the target.
    for t in [0.1, 0.2, 0.299, 0.4] {
        tick(&mut tweener, t);
    }
    assert_eq!(*values.borrow().last().unwrap(), 1.0);
}

#[test]
fn replacement_aborts_old_run_before_new_update() {
    let mut tweener = Tweener::new();
    let trace = Rc::new(Trace::default());

    let abort = Rc::clone(&trace);
    tweener
        .tween_to(
            7,
            TweenParams::new(10.0)
                .duration(1.0)
                .on_abort(move || abort.push("abort-old")),
            &TickClock::new(0.0, 0.0),
        )
        .unwrap();
    tick(&mut tweener, 0.5);
    let mid = tweener.tween(7).unwrap().current();
    assert_eq!(mid, 5.0);

    let update = Rc::clone(&trace);
    tweener
        .tween_to(
            7,
            TweenParams::new(0.0)
                .duration(1.0)
                .on_update(move |v| update.push(format!("update-new {}", v))),
            &TickClock::new(0.5, 0.5),
        )
        .unwrap();

    let entries = trace.entries();
    assert_eq!(entries[0], "abort-old");
    assert!(entries[1].starts_with("update-new"));
    // The new run inherited the old run's value at the moment of
    // replacement.
    assert_eq!(entries[1], format!("update-new {}", mid));
    assert_eq!(tweener.tween(7).unwrap().from(), mid);
}

#[test]
fn disabled_replacement_still_aborts_running_tween() {
    let mut tweener = Tweener::new();
    let trace = Rc::new(Trace::default());

    let abort_old = Rc::clone(&trace);
    tweener
        .tween_to(
            2,
            TweenParams::new(10.0)
                .duration(1.0)
                .on_abort(move || abort_old.push("abort-old")),
            &TickClock::new(0.0, 0.0),
        )
        .unwrap();
    tick(&mut tweener, 0.5);
    assert!(tweener.is_any_running());

    tweener.set_enabled(false);
    let abort_new = Rc::clone(&trace);
    tweener
        .tween_to(
            2,
            TweenParams::new(0.0)
                .duration(1.0)
                .on_abort(move || abort_new.push("abort-new")),
            &TickClock::new(0.5, 0.5),
        )
        .unwrap();

    // The live run still gets its abort; the new run never starts, so its
    // own abort callback stays silent.
    assert_eq!(trace.count_of("abort-old"), 1);
    assert_eq!(trace.count_of("abort-new"), 0);
    assert!(!tweener.is_any_running());
    assert!(!tweener.tween(2).unwrap().is_scheduled());

    tick(&mut tweener, 1.5);
    assert_eq!(trace.entries().len(), 1);
}

#[test]
fn ping_pong_traverses_and_fires_single_ready() {
    let mut tweener = Tweener::new();
    let trace = Rc::new(Trace::default());
    let values = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&values);
    let ready = Rc::clone(&trace);
    tweener
        .tween_to(
            0,
            TweenParams::new(1.0)
                .from(0.0)
                .duration(1.0)
                .ping_pong(2, 0.0)
                .on_update(move |v| sink.borrow_mut().push(v))
                .on_ready(move || ready.push("ready")),
            &TickClock::new(0.0, 0.0),
        )
        .unwrap();

    let mut t = 0.0;
    for _ in 0..40 {
        t += 0.25;
        tick(&mut tweener, t);
    }

    let observed = values.borrow().clone();
    // Rises to 1, falls back to 0, rises to 1 again, then stops.
    let first_top = observed.iter().position(|&v| v == 1.0).unwrap();
    let back_to_zero = first_top
        + observed[first_top..]
            .iter()
            .position(|&v| v == 0.0)
            .unwrap();
    assert!(observed[..=first_top].windows(2).all(|w| w[0] <= w[1]));
    assert!(observed[first_top..=back_to_zero]
        .windows(2)
        .all(|w| w[0] >= w[1]));
    assert!(observed[back_to_zero..].windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(*observed.last().unwrap(), 1.0);
    assert_eq!(trace.count_of("ready"), 1);
    assert!(!tweener.tween(0).unwrap().is_running());
}

#[test]
fn ping_pong_wait_freezes_value_between_cycles() {
    let mut tweener = Tweener::new();
    let values = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&values);

    tweener
        .tween_to(
            0,
            TweenParams::new(1.0)
                .from(0.0)
                .duration(1.0)
                .ping_pong(1, 2.0)
                .on_update(move |v| sink.borrow_mut().push(v)),
            &TickClock::new(0.0, 0.0),
        )
        .unwrap();

    tick(&mut tweener, 1.0); // terminal update of the first cycle
    let updates_at_peak = values.borrow().len();

    // Ticks inside the wait window deliver no updates at all.
    for t in [1.5, 2.0, 2.5] {
        tick(&mut tweener, t);
    }
    assert_eq!(values.borrow().len(), updates_at_peak);
    assert_eq!(tweener.tween(0).unwrap().current(), 1.0);

    // Past the wait, the reversed cycle resumes updating.
    tick(&mut tweener, 3.5);
    tick(&mut tweener, 4.0);
    assert!(values.borrow().len() > updates_at_peak);
    assert!(tweener.tween(0).unwrap().current() < 1.0);
}

#[test]
fn zero_duration_completes_on_first_tick() {
    let mut tweener = Tweener::new();
    let trace = Rc::new(Trace::default());
    let ready = Rc::clone(&trace);

    tweener
        .tween_to(
            0,
            TweenParams::new(5.0)
                .duration(0.0)
                .on_ready(move || ready.push("ready")),
            &TickClock::new(1.0, 1.0),
        )
        .unwrap();
    assert!(tweener.is_any_running());

    tick(&mut tweener, 1.0);
    assert_eq!(tweener.tween(0).unwrap().current(), 5.0);
    assert_eq!(trace.count_of("ready"), 1);
    assert!(!tweener.is_any_running());
}

#[test]
fn ping_pong_count_zero_behaves_like_plain_tween() {
    let mut tweener = Tweener::new();
    tweener
        .tween_to(
            0,
            TweenParams::new(1.0).duration(1.0).ping_pong(0, 0.5),
            &TickClock::new(0.0, 0.0),
        )
        .unwrap();
    tick(&mut tweener, 1.0);
    assert!(!tweener.tween(0).unwrap().is_running());
    assert_eq!(tweener.tween(0).unwrap().current(), 1.0);
}

#[test]
fn independent_keys_coexist() {
    let mut tweener = Tweener::new();
    let clock = TickClock::new(0.0, 0.0);
    tweener
        .tween_to(1, TweenParams::new(10.0).duration(1.0), &clock)
        .unwrap();
    tweener
        .tween_to(2, TweenParams::new(-10.0).duration(2.0), &clock)
        .unwrap();

    tick(&mut tweener, 1.0);
    assert!(!tweener.tween(1).unwrap().is_running());
    assert!(tweener.tween(2).unwrap().is_running());
    assert_eq!(tweener.iter().filter(|t| t.is_running()).count(), 1);
    assert_eq!(tweener.tween(1).unwrap().current(), 10.0);
    assert_eq!(tweener.tween(2).unwrap().current(), -5.0);

    tick(&mut tweener, 2.0);
    assert_eq!(tweener.tween(2).unwrap().current(), -10.0);
    assert!(!tweener.is_any_running());
}

#[test]
fn unscaled_tween_ignores_scaled_clock() {
    let mut tweener = Tweener::new();
    tweener
        .tween_to(
            0,
            TweenParams::new(1.0).duration(1.0).unscaled(),
            &TickClock::new(0.0, 0.0),
        )
        .unwrap();

    // Scaled time frozen, unscaled advancing.
    tweener.tick(&TickClock::new(0.0, 0.5));
    assert_eq!(tweener.tween(0).unwrap().current(), 0.5);
    tweener.tick(&TickClock::new(0.0, 1.0));
    assert!(!tweener.tween(0).unwrap().is_running());
    assert_eq!(tweener.tween(0).unwrap().current(), 1.0);
}

#[test]
fn chain_starts_after_ready_and_dies_with_stop() {
    // Completed chain.
    let mut tweener = Tweener::new();
    let trace = Rc::new(Trace::default());
    let (first, second) = (Rc::clone(&trace), Rc::clone(&trace));
    tweener
        .tween_to(
            0,
            TweenParams::new(1.0)
                .duration(1.0)
                .on_ready(move || first.push("first-ready"))
                .then(
                    TweenParams::new(0.0)
                        .duration(1.0)
                        .on_ready(move || second.push("second-ready")),
                ),
            &TickClock::new(0.0, 0.0),
        )
        .unwrap();

    tick(&mut tweener, 1.0);
    assert_eq!(trace.count_of("first-ready"), 1);
    assert_eq!(trace.count_of("second-ready"), 0);
    // The continuation inherited the first run's end value.
    assert_eq!(tweener.tween(0).unwrap().from(), 1.0);
    assert!(tweener.tween(0).unwrap().is_running());

    tick(&mut tweener, 2.0);
    assert_eq!(trace.count_of("second-ready"), 1);
    assert_eq!(tweener.tween(0).unwrap().current(), 0.0);

    // Cancelled chain: stopping during the first run drops the follow-up.
    let mut tweener = Tweener::new();
    let trace = Rc::new(Trace::default());
    let (abort, second) = (Rc::clone(&trace), Rc::clone(&trace));
    tweener
        .tween_to(
            0,
            TweenParams::new(1.0)
                .duration(1.0)
                .on_abort(move || abort.push("abort"))
                .then(TweenParams::new(0.0).on_ready(move || second.push("second-ready"))),
            &TickClock::new(0.0, 0.0),
        )
        .unwrap();
    tick(&mut tweener, 0.5);
    tweener.stop_all();
    for t in [1.0, 2.0, 3.0] {
        tick(&mut tweener, t);
    }
    assert_eq!(trace.count_of("abort"), 1);
    assert_eq!(trace.count_of("second-ready"), 0);
    assert!(!tweener.is_any_running());
}

#[test]
fn event_registry_observes_lifecycle_in_order() {
    let mut tweener = Tweener::new();
    let trace = Rc::new(Trace::default());
    let listener = Rc::clone(&trace);
    tweener.events_mut().subscribe(move |event| {
        let key = event.key();
        match event {
            TweenEvent::Started { .. } => listener.push(format!("started {}", key)),
            TweenEvent::Ready { .. } => listener.push(format!("ready {}", key)),
            TweenEvent::Aborted { .. } => listener.push(format!("aborted {}", key)),
            TweenEvent::ValueUpdated { .. } => listener.push("value".to_string()),
        }
    });

    tweener
        .tween_to(
            4,
            TweenParams::new(1.0).duration(1.0),
            &TickClock::new(0.0, 0.0),
        )
        .unwrap();
    // Synchronous start: first value update precedes the started event.
    assert_eq!(trace.entries(), vec!["value", "started 4"]);

    tick(&mut tweener, 0.5);
    tweener
        .tween_to(
            4,
            TweenParams::new(0.0).duration(0.5),
            &TickClock::new(0.5, 0.5),
        )
        .unwrap();
    let entries = trace.entries();
    // Replacement: aborted(old) observed before the new run's first value.
    assert_eq!(
        entries[entries.len() - 3..],
        ["aborted 4", "value", "started 4"]
    );

    tick(&mut tweener, 1.0);
    assert_eq!(trace.entries().last().unwrap(), "ready 4");
    assert_eq!(trace.count_of("ready"), 1);
}

#[test]
fn stopped_tween_remains_inspectable() {
    let mut tweener = Tweener::new();
    tweener
        .tween_to(
            0,
            TweenParams::new(10.0).duration(1.0),
            &TickClock::new(0.0, 0.0),
        )
        .unwrap();
    tick(&mut tweener, 0.4);
    tweener.stop_all();

    let tween = tweener.tween(0).unwrap();
    assert!(!tween.is_running());
    assert_eq!(tween.current(), 4.0);
    assert_eq!(tween.from(), 0.0);
    assert_eq!(tween.to(), 10.0);
    assert_eq!(tweener.len(), 1);

    // A later run on the same key resumes from the stopped value.
    tweener
        .tween_to(
            0,
            TweenParams::new(10.0).duration(1.0),
            &TickClock::new(1.0, 1.0),
        )
        .unwrap();
    assert_eq!(tweener.tween(0).unwrap().from(), 4.0);
}

#[test]
fn in_out_envelope_rises_then_falls() {
    let mut envelope = InOutTweener::new();
    envelope.target_weight = 2.0;
    envelope.duration_in = 1.0;
    envelope.duration_out = 1.0;

    let trace = Rc::new(Trace::default());
    let values = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&values);
    let reset = Rc::clone(&trace);
    envelope
        .tween_in_out(
            move |v| sink.borrow_mut().push(v),
            move || reset.push("reset"),
            &TickClock::new(0.0, 0.0),
        )
        .unwrap();

    let mut t = 0.0;
    for _ in 0..20 {
        t += 0.25;
        envelope.tick(&TickClock::new(t, t));
    }

    let observed = values.borrow().clone();
    let max = observed.iter().cloned().fold(f64::MIN, f64::max);
    assert_eq!(max, 2.0);
    assert_eq!(*observed.last().unwrap(), 0.0);
    assert_eq!(envelope.weight(), 0.0);
    assert!(!envelope.is_running());
    assert_eq!(trace.count_of("reset"), 1);
}

#[test]
fn stopping_envelope_fires_reset_once_in_either_phase() {
    // Stopped while still rising.
    let mut envelope = InOutTweener::new();
    envelope.target_weight = 2.0;
    let trace = Rc::new(Trace::default());
    let reset = Rc::clone(&trace);
    envelope
        .tween_in_out(
            |_| {},
            move || reset.push("reset"),
            &TickClock::new(0.0, 0.0),
        )
        .unwrap();
    envelope.tick(&TickClock::new(0.5, 0.5));
    envelope.stop();
    assert_eq!(trace.count_of("reset"), 1);
    assert_eq!(envelope.weight(), 1.0);
    assert!(!envelope.is_running());

    // Stopping again or ticking on changes nothing; the queued out-phase
    // died with the in-phase.
    envelope.stop();
    envelope.tick(&TickClock::new(2.0, 2.0));
    assert_eq!(trace.count_of("reset"), 1);
    assert_eq!(envelope.weight(), 1.0);

    // Stopped during the falling half.
    let mut envelope = InOutTweener::new();
    envelope.target_weight = 2.0;
    let trace = Rc::new(Trace::default());
    let reset = Rc::clone(&trace);
    envelope
        .tween_in_out(
            |_| {},
            move || reset.push("reset"),
            &TickClock::new(0.0, 0.0),
        )
        .unwrap();
    envelope.tick(&TickClock::new(1.0, 1.0)); // in-phase done, out-phase live
    envelope.tick(&TickClock::new(1.5, 1.5));
    assert_eq!(envelope.weight(), 1.0);

    envelope.stop();
    assert_eq!(trace.count_of("reset"), 1);
    assert!(!envelope.is_running());
}
