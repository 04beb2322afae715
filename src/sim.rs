use crate::config::Config;
use crate::model::{Fish, Vec2, Viewport};
use crate::sched::TimerWheel;
use crate::sprite::SPECIES;
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::time::Instant;

/// The school and its timers. All randomness flows through the seeded rng so
/// a school is reproducible from its seed.
pub(crate) struct Tank {
    pub(crate) fish: Vec<Fish>,
    pub(crate) timers: TimerWheel,
    cfg: Config,
    rng: StdRng,
}

impl Tank {
    pub(crate) fn new(cfg: Config, seed: u64) -> Self {
        Self {
            fish: Vec::new(),
            timers: TimerWheel::new(),
            cfg,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Spawn one fish: a random species, a start anywhere in
    /// [-size, viewport] on each axis (so it may begin partially or fully
    /// off-screen), a heading with each axis in [-speed/2, +speed/2], and
    /// its own recurring tick timer.
    pub(crate) fn spawn_one(&mut self, name: usize, vp: Viewport, now: Instant) {
        let species = self.rng.gen_range(0..SPECIES.len());
        let (w, h) = SPECIES[species].dims();
        let pos = Vec2::new(
            self.rng.gen::<f32>() * (vp.w + w) - w,
            self.rng.gen::<f32>() * (vp.h + h) - h,
        );
        let vel = self.roll_heading();
        let timer = self.timers.register(self.fish.len(), self.cfg.tick, now);
        self.fish.push(Fish {
            id: format!("fish_{name}"),
            species,
            pos,
            vel,
            size: Vec2::new(w, h),
            timer,
        });
    }

    pub(crate) fn spawn_many(&mut self, count: usize, vp: Viewport, now: Instant) {
        for i in 0..count {
            self.spawn_one(i, vp, now);
        }
    }

    /// count = viewport area x density, truncated toward zero. No cap; a
    /// generous density simply means a very full tank.
    pub(crate) fn spawn_by_density(&mut self, density: f32, vp: Viewport, now: Instant) {
        let count = (vp.w * vp.h * density) as usize;
        self.spawn_many(count, vp, now);
    }

    /// Remove the newest fish and cancel its timer.
    pub(crate) fn despawn_last(&mut self) {
        if let Some(f) = self.fish.pop() {
            self.timers.cancel(f.timer);
        }
    }

    /// One tick for fish `i`. A fish that has drifted out of view rerolls
    /// its heading but is NOT moved back; it keeps wandering from where it
    /// is until a roll points it home. Every tick then advances position by
    /// velocity, in or out of view.
    pub(crate) fn tick_fish(&mut self, i: usize, vp: Viewport) {
        if out_of_bounds(self.fish[i].pos, self.fish[i].size, vp) {
            self.fish[i].vel = self.roll_heading();
        }
        let vel = self.fish[i].vel;
        self.fish[i].pos += vel;
    }

    fn roll_heading(&mut self) -> Vec2 {
        Vec2::new(
            self.cfg.speed * (self.rng.gen::<f32>() - 0.5),
            self.cfg.speed * (self.rng.gen::<f32>() - 0.5),
        )
    }
}

/// A fish is lost once it passes more than its own size beyond the left/top
/// edge, or beyond the right/bottom edge. The boundary values themselves
/// still count as visible.
pub(crate) fn out_of_bounds(pos: Vec2, size: Vec2, vp: Viewport) -> bool {
    pos.x < -size.x || pos.x > vp.w || pos.y < -size.y || pos.y > vp.h
}
