use std::cell::RefCell;
use std::rc::Rc;
use std::thread;
use std::time::Duration;
use tweenlet::prelude::*;

/// Example of driving a fade in real time with a HostClock
fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("tweenlet value fade");
    println!("===================");

    let mut clock = HostClock::new();
    let mut tweener = Tweener::new();

    tweener.events_mut().subscribe(|event| {
        if let TweenEvent::Ready { key } = event {
            println!("   tween {} ready", key);
        }
    });

    let alpha = Rc::new(RefCell::new(0.0));
    let sink = Rc::clone(&alpha);
    tweener.tween_to(
        0,
        TweenParams::new(1.0)
            .duration(0.5)
            .easing(EasingMode::Smooth)
            .ping_pong(1, 0.1)
            .on_update(move |value| *sink.borrow_mut() = value),
        &clock.sample(),
    )?;

    // Simulate a ~60fps host loop until the fade settles.
    while tweener.is_any_running() {
        thread::sleep(Duration::from_millis(16));
        tweener.tick(&clock.sample());
        println!("   alpha = {:.3}", alpha.borrow());
    }

    // A bezier hop on top: same scheduler pattern, 3D output.
    let mut mover = PositionTweener::new();
    mover.easing = EasingMode::EaseOut;
    mover.tween_curve(
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(4.0, 0.0, 0.0),
        Point3::new(2.0, 3.0, 0.0),
        8.0,
        MotionHooks::new().on_ready(|| println!("   hop landed")),
        &clock.sample(),
    )?;

    while mover.is_running() {
        thread::sleep(Duration::from_millis(16));
        mover.tick(&clock.sample());
        let p = mover.current_point();
        println!("   point = ({:.2}, {:.2})", p.x, p.y);
    }

    println!("done");
    Ok(())
}
