use clap::Parser;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "driftfish", about = "A school of fish drifting around your terminal")]
pub(crate) struct Args {
    /// how many fish to spawn
    #[arg(long, default_value_t = 12)]
    pub(crate) fish: usize,

    /// spawn by viewport area instead: fish per cell (overrides --fish)
    #[arg(long)]
    pub(crate) density: Option<f32>,

    /// max per-axis drift speed, cells per tick
    #[arg(long, default_value_t = 3.0)]
    pub(crate) speed: f32,

    /// ms between position updates for each fish
    #[arg(long, default_value_t = 150)]
    pub(crate) tick_ms: u64,

    /// render frame cap
    #[arg(long, default_value_t = 30)]
    pub(crate) fps: u32,

    /// rng seed (0 = derive from the clock)
    #[arg(long, default_value_t = 0)]
    pub(crate) seed: u64,

    /// monochrome sprites
    #[arg(long)]
    pub(crate) no_color: bool,
}

/// Tuning handed to the tank at construction. `speed` bounds each velocity
/// axis to [-speed/2, +speed/2]; `tick` is the fixed period of every fish's
/// timer.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Config {
    pub(crate) speed: f32,
    pub(crate) tick: Duration,
}

impl Config {
    pub(crate) fn from_args(args: &Args) -> Self {
        Self {
            speed: args.speed,
            tick: Duration::from_millis(args.tick_ms),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            speed: 3.0,
            tick: Duration::from_millis(150),
        }
    }
}
