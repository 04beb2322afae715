use crate::model::Fish;
use crate::sprite::SPECIES;
use anyhow::Result;
use crossterm::{
    cursor, execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
        EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use std::io::{self, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    pub(crate) ch: char,
    pub(crate) fg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::White,
        }
    }
}

pub(crate) struct CellBuffer {
    pub(crate) w: u16,
    pub(crate) h: u16,
    pub(crate) cells: Vec<Cell>,
}

impl CellBuffer {
    pub(crate) fn new(w: u16, h: u16) -> Self {
        Self {
            w,
            h,
            cells: vec![Cell::default(); (w as usize) * (h as usize)],
        }
    }

    pub(crate) fn idx(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.w as usize) + (x as usize)
    }

    pub(crate) fn set(&mut self, x: u16, y: u16, c: Cell) {
        if x < self.w && y < self.h {
            let i = self.idx(x, y);
            self.cells[i] = c;
        }
    }

    pub(crate) fn clear(&mut self) {
        self.cells.fill(Cell::default());
    }
}

/// Stamp sprite art at a cell position, clipping at every edge; fish are
/// allowed to hang partly or fully off-screen. Blanks in the art are
/// transparent so overlapping fish don't punch holes in each other.
pub(crate) fn draw_sprite(buf: &mut CellBuffer, x: i32, y: i32, art: &[&str], fg: Color) {
    for (row, line) in art.iter().enumerate() {
        let yy = y + row as i32;
        if yy < 0 || yy >= buf.h as i32 {
            continue;
        }
        let mut xx = x;
        for ch in line.chars() {
            if ch != ' ' && xx >= 0 && xx < buf.w as i32 {
                buf.set(xx as u16, yy as u16, Cell { ch, fg });
            }
            xx += 1;
        }
    }
}

pub(crate) fn draw_fish(buf: &mut CellBuffer, f: &Fish, color: bool) {
    let sp = &SPECIES[f.species];
    // Facing follows the current heading; drawn position rounds to cells.
    let art = if f.vel.x < 0.0 { sp.left } else { sp.right };
    let fg = if color { sp.color } else { Color::White };
    draw_sprite(buf, f.pos.x.round() as i32, f.pos.y.round() as i32, art, fg);
}

pub(crate) fn draw_text(buf: &mut CellBuffer, x: u16, y: u16, s: &str, fg: Color) {
    for (i, ch) in s.chars().enumerate() {
        let xx = x.saturating_add(i as u16);
        if xx >= buf.w || y >= buf.h {
            break;
        }
        buf.set(xx, y, Cell { ch, fg });
    }
}

pub(crate) fn hud_line(count: usize, speed: f32, paused: bool) -> String {
    format!(
        "driftfish  fish:{}  speed:{:.1}  [{}]  q quit  h help",
        count,
        speed,
        if paused { "paused" } else { "drifting" }
    )
}

pub(crate) fn draw_help(buf: &mut CellBuffer, fish: &[Fish]) {
    let roster = SPECIES
        .iter()
        .map(|sp| sp.name)
        .collect::<Vec<_>>()
        .join(" ");
    let roster = format!("species   {roster}");
    let lines = [
        "q / Esc   quit",
        "Space     pause",
        "+ / -     add / remove a fish",
        "h         close this help",
        roster.as_str(),
    ];
    let footer = format!(
        "fish: {}  newest: {}",
        fish.len(),
        fish.last().map(|f| f.id.as_str()).unwrap_or("-")
    );

    let bw = (lines
        .iter()
        .copied()
        .chain([footer.as_str()])
        .map(|l| l.len())
        .max()
        .unwrap_or(0)
        + 4) as u16;
    let bh = lines.len() as u16 + 6;
    if buf.w < bw + 2 || buf.h < bh + 2 {
        return;
    }
    let x0 = (buf.w - bw) / 2;
    let y0 = (buf.h - bh) / 2;
    let fg = Color::White;

    for y in y0..y0 + bh {
        for x in x0..x0 + bw {
            let ch = match (x, y) {
                _ if x == x0 && y == y0 => '┌',
                _ if x == x0 + bw - 1 && y == y0 => '┐',
                _ if x == x0 && y == y0 + bh - 1 => '└',
                _ if x == x0 + bw - 1 && y == y0 + bh - 1 => '┘',
                _ if y == y0 || y == y0 + bh - 1 => '─',
                _ if x == x0 || x == x0 + bw - 1 => '│',
                _ => ' ',
            };
            buf.set(x, y, Cell { ch, fg });
        }
    }

    draw_text(buf, x0 + 2, y0 + 1, "driftfish", fg);
    for (i, line) in lines.iter().enumerate() {
        draw_text(buf, x0 + 2, y0 + 3 + i as u16, line, fg);
    }
    draw_text(buf, x0 + 2, y0 + bh - 2, &footer, fg);
}

/// Raw-mode alternate-screen session with a diff-presented cell buffer.
pub(crate) struct Terminal {
    out: io::Stdout,
    pub(crate) cols: u16,
    pub(crate) rows: u16,
    prev: CellBuffer,
    pub(crate) cur: CellBuffer,
    full_redraw: bool,
}

impl Terminal {
    pub(crate) fn begin() -> Result<Self> {
        let mut out = io::stdout();
        execute!(
            out,
            EnterAlternateScreen,
            cursor::Hide,
            DisableLineWrap,
            Clear(ClearType::All)
        )?;
        terminal::enable_raw_mode()?;

        let (cols, rows) = terminal::size()?;
        Ok(Self {
            out,
            cols,
            rows,
            prev: CellBuffer::new(cols, rows),
            cur: CellBuffer::new(cols, rows),
            full_redraw: true,
        })
    }

    pub(crate) fn end(&mut self) -> Result<()> {
        queue!(
            self.out,
            ResetColor,
            Clear(ClearType::All),
            cursor::Show,
            EnableLineWrap,
            LeaveAlternateScreen
        )?;
        self.out.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub(crate) fn resize_if_needed(&mut self) -> Result<bool> {
        let (c, r) = terminal::size()?;
        if c == self.cols && r == self.rows {
            return Ok(false);
        }
        self.cols = c;
        self.rows = r;
        self.prev = CellBuffer::new(c, r);
        self.cur = CellBuffer::new(c, r);
        self.full_redraw = true;
        Ok(true)
    }

    pub(crate) fn present(&mut self) -> Result<()> {
        queue!(
            self.out,
            BeginSynchronizedUpdate,
            SetBackgroundColor(Color::Black)
        )?;

        let mut last_fg = None;
        for y in 0..self.rows {
            for x in 0..self.cols {
                let i = self.cur.idx(x, y);
                let c = self.cur.cells[i];
                if !self.full_redraw && c == self.prev.cells[i] {
                    continue;
                }
                queue!(self.out, cursor::MoveTo(x, y))?;
                if last_fg != Some(c.fg) {
                    queue!(self.out, SetForegroundColor(c.fg))?;
                    last_fg = Some(c.fg);
                }
                queue!(self.out, Print(c.ch))?;
            }
        }

        self.full_redraw = false;
        queue!(self.out, ResetColor, EndSynchronizedUpdate)?;
        self.out.flush()?;
        self.prev.cells.copy_from_slice(&self.cur.cells);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Vec2, Viewport};
    use crate::sim::Tank;
    use std::time::Instant;

    #[test]
    fn set_ignores_out_of_range() {
        let mut buf = CellBuffer::new(4, 2);
        buf.set(
            4,
            0,
            Cell {
                ch: 'x',
                fg: Color::White,
            },
        );
        buf.set(
            0,
            2,
            Cell {
                ch: 'x',
                fg: Color::White,
            },
        );
        assert!(buf.cells.iter().all(|c| c.ch == ' '));
    }

    #[test]
    fn sprite_clips_at_every_edge() {
        let mut buf = CellBuffer::new(6, 3);
        let art = ["><>"];
        draw_sprite(&mut buf, -2, 0, &art, Color::White);
        draw_sprite(&mut buf, 5, 1, &art, Color::White);
        draw_sprite(&mut buf, 0, -1, &art, Color::White);
        draw_sprite(&mut buf, 0, 3, &art, Color::White);
        // Only the visible slivers land.
        assert_eq!(buf.cells[buf.idx(0, 0)].ch, '>');
        assert_eq!(buf.cells[buf.idx(5, 1)].ch, '>');
        assert_eq!(buf.cells[buf.idx(1, 0)].ch, ' ');
    }

    #[test]
    fn sprite_blanks_are_transparent() {
        let mut buf = CellBuffer::new(8, 2);
        draw_sprite(&mut buf, 0, 0, &["aaaa", "aaaa"], Color::White);
        draw_sprite(&mut buf, 0, 0, &[" bb ", "b  b"], Color::White);
        assert_eq!(buf.cells[buf.idx(0, 0)].ch, 'a');
        assert_eq!(buf.cells[buf.idx(1, 0)].ch, 'b');
        assert_eq!(buf.cells[buf.idx(3, 0)].ch, 'a');
        assert_eq!(buf.cells[buf.idx(1, 1)].ch, 'a');
    }

    #[test]
    fn fish_faces_its_heading() {
        let mut t = Tank::new(crate::config::Config::default(), 11);
        t.spawn_one(0, Viewport { w: 40.0, h: 10.0 }, Instant::now());
        t.fish[0].species = 0; // minnow: ><> right, <>< left
        t.fish[0].pos = Vec2::new(10.0, 5.0);

        let mut buf = CellBuffer::new(40, 10);
        t.fish[0].vel = Vec2::new(1.0, 0.0);
        draw_fish(&mut buf, &t.fish[0], false);
        assert_eq!(buf.cells[buf.idx(12, 5)].ch, '>');

        buf.clear();
        t.fish[0].vel = Vec2::new(-1.0, 0.0);
        draw_fish(&mut buf, &t.fish[0], false);
        assert_eq!(buf.cells[buf.idx(12, 5)].ch, '<');
    }

    #[test]
    fn help_overlay_names_the_newest_fish() {
        let mut t = Tank::new(crate::config::Config::default(), 12);
        t.spawn_many(3, Viewport { w: 60.0, h: 20.0 }, Instant::now());
        let mut buf = CellBuffer::new(60, 20);
        draw_help(&mut buf, &t.fish);
        let flat: String = buf.cells.iter().map(|c| c.ch).collect();
        assert!(flat.contains("newest: fish_2"));
        assert!(flat.contains("species"));
    }

    #[test]
    fn hud_reports_count_and_pause() {
        let line = hud_line(7, 3.0, true);
        assert!(line.contains("fish:7"));
        assert!(line.contains("paused"));
    }
}
