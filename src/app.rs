use crate::config::{Args, Config};
use crate::model::Viewport;
use crate::render::{self, Terminal};
use crate::sim::Tank;
use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::style::Color;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

pub(crate) fn run() -> Result<()> {
    let args = Args::parse();
    let cfg = Config::from_args(&args);

    let seed = if args.seed != 0 {
        args.seed
    } else {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0xF15C_F00D)
    };

    let mut term = Terminal::begin()?;
    let res = run_loop(&mut term, &args, cfg, seed);
    // Leave the terminal sane even when the loop errors out.
    let end = term.end();
    res.and(end)
}

fn run_loop(term: &mut Terminal, args: &Args, cfg: Config, seed: u64) -> Result<()> {
    let mut tank = Tank::new(cfg, seed);

    let vp = Viewport::from_cells(term.cols, term.rows);
    let now = Instant::now();
    match args.density {
        Some(d) => tank.spawn_by_density(d, vp, now),
        None => tank.spawn_many(args.fish, vp, now),
    }

    let frame_dt = Duration::from_secs_f32(1.0 / args.fps.clamp(5, 240) as f32);
    let mut paused = false;
    let mut show_help = false;

    loop {
        let frame_start = Instant::now();

        term.resize_if_needed()?;
        let vp = Viewport::from_cells(term.cols, term.rows);

        while event::poll(Duration::from_millis(0))? {
            match event::read()? {
                Event::Key(k) if k.kind != KeyEventKind::Release => match k.code {
                    KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char(' ') => paused = !paused,
                    KeyCode::Char('h') | KeyCode::Char('H') => show_help = !show_help,
                    KeyCode::Char('+') | KeyCode::Char('=') => {
                        tank.spawn_one(tank.fish.len(), vp, Instant::now());
                    }
                    KeyCode::Char('-') => tank.despawn_last(),
                    _ => {}
                },
                _ => {}
            }
        }

        // While paused the deadlines keep aging; on resume each fish fires
        // once and re-arms rather than replaying the gap.
        if !paused {
            let now = Instant::now();
            for i in tank.timers.pop_due(now) {
                tank.tick_fish(i, vp);
            }
        }

        term.cur.clear();
        for f in &tank.fish {
            render::draw_fish(&mut term.cur, f, !args.no_color);
        }
        let hud = render::hud_line(tank.fish.len(), args.speed, paused);
        render::draw_text(&mut term.cur, 0, 0, &hud, Color::DarkGrey);
        if show_help {
            render::draw_help(&mut term.cur, &tank.fish);
        }
        term.present()?;

        let spent = frame_start.elapsed();
        if spent < frame_dt {
            std::thread::sleep(frame_dt - spent);
        }
    }
}
