use anyhow::Result;
use std::sync::atomic::AtomicBool;
use std::time::Duration;

use crate::commands::breathe;
use crate::controller::App;
use crate::view::View;

/// What to do with the ticket once it is drawn.
#[derive(Debug, Clone, Copy, Default)]
pub struct FollowUp {
    pub save: bool,
    pub share: bool,
    pub breathe: bool,
}

pub fn run<V: View>(
    app: &mut App<V>,
    input: &str,
    follow_up: FollowUp,
    frame_interval: Duration,
    stop: &AtomicBool,
) -> Result<()> {
    app.draw(input)?;
    finish(app, follow_up, frame_interval, stop)
}

pub fn run_random<V: View>(
    app: &mut App<V>,
    follow_up: FollowUp,
    frame_interval: Duration,
    stop: &AtomicBool,
) -> Result<()> {
    app.draw_random()?;
    finish(app, follow_up, frame_interval, stop)
}

fn finish<V: View>(
    app: &mut App<V>,
    follow_up: FollowUp,
    frame_interval: Duration,
    stop: &AtomicBool,
) -> Result<()> {
    // Rejected input already told the user why
    if app.session().current().is_none() {
        return Ok(());
    }

    if follow_up.save {
        app.save()?;
    }
    if follow_up.share {
        app.share();
    }
    if follow_up.breathe {
        breathe::run(app, frame_interval, stop);
    }
    Ok(())
}
