use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crate::controller::App;
use crate::view::View;

const SECOND: Duration = Duration::from_secs(1);
/// Longest sleep between checks of the stop flag.
const POLL: Duration = Duration::from_millis(50);

/// Blocks until the countdown runs out or `stop` is raised. Returns false
/// when the practice could not start.
pub fn run<V: View>(app: &mut App<V>, frame_interval: Duration, stop: &AtomicBool) -> bool {
    stop.store(false, Ordering::SeqCst);
    if !app.start_breath_practice() {
        return false;
    }

    let started = Instant::now();
    let mut next_frame = started;
    let mut next_tick = started + SECOND;
    let mut animating = true;

    loop {
        if stop.swap(false, Ordering::SeqCst) {
            app.stop_breath_practice();
            break;
        }

        let now = Instant::now();
        if animating && now >= next_frame {
            animating = app.animation_frame();
            next_frame += frame_interval;
        }
        if now >= next_tick {
            if !app.countdown_tick() {
                break;
            }
            next_tick += SECOND;
        }
        if !app.session().is_practicing() {
            break;
        }

        let wake = if animating {
            next_frame.min(next_tick)
        } else {
            next_tick
        };
        thread::sleep(wake.saturating_duration_since(Instant::now()).min(POLL));
    }

    true
}
