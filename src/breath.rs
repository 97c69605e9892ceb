use crate::models::Pattern;

pub const PRACTICE_SECONDS: u32 = 60;

const MIN_SCALE: f64 = 0.8;
const MAX_SCALE: f64 = 1.2;
const MIN_OPACITY: f64 = 0.4;
const MAX_OPACITY: f64 = 0.8;
const SWING: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Inhale,
    Hold,
    Exhale,
}

impl Phase {
    pub fn instruction(&self) -> &'static str {
        match self {
            Phase::Inhale => "吸氣",
            Phase::Hold => "停留",
            Phase::Exhale => "吐氣",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BreathState {
    pub phase: Phase,
    pub progress: f64,
    pub scale: f64,
    pub opacity: f64,
}

/// Animation state at tick `t`. `pattern` must have a non-zero cycle.
pub fn state_at(pattern: &Pattern, t: u64) -> BreathState {
    let inhale = pattern.inhale as u64;
    let hold = pattern.hold as u64;
    let exhale = pattern.exhale as u64;
    let pos = t % pattern.cycle_len();

    if pos < inhale {
        let progress = pos as f64 / inhale as f64;
        BreathState {
            phase: Phase::Inhale,
            progress,
            scale: MIN_SCALE + progress * SWING,
            opacity: MIN_OPACITY + progress * SWING,
        }
    } else if pos < inhale + hold {
        BreathState {
            phase: Phase::Hold,
            progress: 1.0,
            scale: MAX_SCALE,
            opacity: MAX_OPACITY,
        }
    } else {
        let progress = (pos - inhale - hold) as f64 / exhale as f64;
        BreathState {
            phase: Phase::Exhale,
            progress,
            scale: MAX_SCALE - progress * SWING,
            opacity: MAX_OPACITY - progress * SWING,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BreathCycle {
    pattern: Pattern,
    t: u64,
}

impl BreathCycle {
    pub fn new(pattern: Pattern) -> Self {
        BreathCycle { pattern, t: 0 }
    }

    /// State for the current tick, then advance.
    pub fn step(&mut self) -> BreathState {
        let state = state_at(&self.pattern, self.t);
        self.t += 1;
        state
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
}

impl Default for Countdown {
    fn default() -> Self {
        Countdown::new(PRACTICE_SECONDS)
    }
}

impl Countdown {
    pub fn new(seconds: u32) -> Self {
        Countdown { remaining: seconds }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn is_finished(&self) -> bool {
        self.remaining == 0
    }

    /// One second elapsed. Returns true once the countdown has run out.
    pub fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        self.is_finished()
    }

    pub fn label(&self) -> String {
        format!("{}:{:02}", self.remaining / 60, self.remaining % 60)
    }
}
