use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
        EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use solsim::{Point, Rgb, Session, Surface, ViewBounds};
use std::io::{self, Write};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    pub(crate) ch: char,
    pub(crate) fg: Color,
    pub(crate) bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::White,
            bg: Color::Black,
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
    fn idx(&self, x: u16, y: u16) -> usize {
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

pub(crate) fn draw_text(buf: &mut CellBuffer, x: u16, y: u16, s: &str, fg: Color) {
    for (i, ch) in s.chars().enumerate() {
        let xx = x.saturating_add(i as u16);
        if xx >= buf.w || y >= buf.h {
            break;
        }
        buf.set(xx, y, Cell { ch, fg, bg: Color::Black });
    }
}

fn box_draw(buf: &mut CellBuffer, r: Rect, fg: Color) {
    if r.w < 2 || r.h < 2 {
        return;
    }
    let x1 = r.x + r.w - 1;
    let y1 = r.y + r.h - 1;
    let bg = Color::Black;
    for x in r.x + 1..x1 {
        buf.set(x, r.y, Cell { ch: '─', fg, bg });
        buf.set(x, y1, Cell { ch: '─', fg, bg });
    }
    for y in r.y + 1..y1 {
        buf.set(r.x, y, Cell { ch: '│', fg, bg });
        buf.set(x1, y, Cell { ch: '│', fg, bg });
    }
    buf.set(r.x, r.y, Cell { ch: '┌', fg, bg });
    buf.set(x1, r.y, Cell { ch: '┐', fg, bg });
    buf.set(r.x, y1, Cell { ch: '└', fg, bg });
    buf.set(x1, y1, Cell { ch: '┘', fg, bg });
}

/* -----------------------------
   Layout: plot on the left, controls on the right
------------------------------ */

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Rect {
    pub(crate) x: u16,
    pub(crate) y: u16,
    pub(crate) w: u16,
    pub(crate) h: u16,
}

impl Rect {
    pub(crate) fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.x && col < self.x + self.w && row >= self.y && row < self.y + self.h
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Layout {
    /// Square drawing area in cells; clicks outside it are off-plot.
    pub(crate) plot: Rect,
    pub(crate) hud: Rect,
    pub(crate) speed: Rect,
    pub(crate) zoom: Rect,
    pub(crate) pause: Rect,
    pub(crate) reset: Rect,
    pub(crate) labels: Rect,
    pub(crate) legend_y: u16,
}

const HUD_W: u16 = 34;
const SLIDER_W: u16 = 24;

impl Layout {
    pub(crate) fn new(cols: u16, rows: u16) -> Self {
        let hud_w = HUD_W.min(cols / 2);
        let main_w = cols.saturating_sub(hud_w);

        // braille dots are square when a cell is twice as tall as wide:
        // a w×h cell block is 2w×4h dots, so square needs w = 2h
        let side_rows = rows.min(main_w / 2);
        let side_cols = side_rows * 2;
        let plot = Rect {
            x: (main_w - side_cols) / 2,
            y: (rows - side_rows) / 2,
            w: side_cols,
            h: side_rows,
        };

        let hud = Rect {
            x: main_w,
            y: 0,
            w: hud_w,
            h: rows,
        };
        let px = hud.x + 2;
        let slider_w = SLIDER_W.min(hud_w.saturating_sub(4));
        Self {
            plot,
            hud,
            speed: Rect { x: px, y: 5, w: slider_w, h: 1 },
            zoom: Rect { x: px, y: 8, w: slider_w, h: 1 },
            pause: Rect { x: px, y: 10, w: 12, h: 1 },
            reset: Rect { x: px + 13, y: 10, w: 7, h: 1 },
            labels: Rect { x: px, y: 11, w: 15, h: 1 },
            legend_y: 13,
        }
    }

    pub(crate) fn mapping(&self, view: ViewBounds) -> PlotMapping {
        PlotMapping::new(self.plot, view)
    }
}

/// Data space (AU, y up) to braille dot space (y down) inside the plot rect.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PlotMapping {
    plot: Rect,
    view: ViewBounds,
    dots_per_au: f64,
}

impl PlotMapping {
    fn new(plot: Rect, view: ViewBounds) -> Self {
        let dots = (plot.w as f64 * 2.0).min(plot.h as f64 * 4.0);
        Self {
            plot,
            view,
            dots_per_au: dots / view.width().max(1e-9),
        }
    }

    fn dot_w(&self) -> f64 {
        self.plot.w as f64 * 2.0
    }

    fn dot_h(&self) -> f64 {
        self.plot.h as f64 * 4.0
    }

    /// Dot coordinates relative to the plot's top-left dot.
    pub(crate) fn to_dot(&self, p: Point) -> (f64, f64) {
        let x = (p.x - self.view.x_min) * self.dots_per_au;
        let y = (self.view.y_max - p.y) * self.dots_per_au;
        (x, y)
    }

    pub(crate) fn to_cell(&self, p: Point) -> Option<(u16, u16)> {
        let (dx, dy) = self.to_dot(p);
        if dx < 0.0 || dy < 0.0 || dx >= self.dot_w() || dy >= self.dot_h() {
            return None;
        }
        Some((
            self.plot.x + (dx / 2.0) as u16,
            self.plot.y + (dy / 4.0) as u16,
        ))
    }

    /// Data coordinates under a terminal cell, or `None` off the plot.
    pub(crate) fn from_cell(&self, col: u16, row: u16) -> Option<Point> {
        if !self.plot.contains(col, row) {
            return None;
        }
        let dx = (col - self.plot.x) as f64 * 2.0 + 1.0;
        let dy = (row - self.plot.y) as f64 * 4.0 + 2.0;
        Some(Point::new(
            self.view.x_min + dx / self.dots_per_au,
            self.view.y_max - dy / self.dots_per_au,
        ))
    }
}

/* -----------------------------
   Braille plot canvas: 2×4 dots per cell
------------------------------ */

fn braille_bit(dx: usize, dy: usize) -> u8 {
    match (dx, dy) {
        (0, 0) => 0x01,
        (0, 1) => 0x02,
        (0, 2) => 0x04,
        (0, 3) => 0x40,
        (1, 0) => 0x08,
        (1, 1) => 0x10,
        (1, 2) => 0x20,
        (1, 3) => 0x80,
        _ => 0x00,
    }
}

pub(crate) struct DotCanvas {
    w: usize,
    h: usize,
    dots: Vec<Option<Rgb>>,
}

impl DotCanvas {
    pub(crate) fn new(plot: Rect) -> Self {
        let w = plot.w as usize * 2;
        let h = plot.h as usize * 4;
        Self {
            w,
            h,
            dots: vec![None; w * h],
        }
    }

    fn plot(&mut self, x: f64, y: f64, c: Rgb) {
        if x < 0.0 || y < 0.0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x < self.w && y < self.h {
            self.dots[y * self.w + x] = Some(c);
        }
    }

    fn line(&mut self, a: (f64, f64), b: (f64, f64), c: Rgb) {
        let (w, h) = (self.w as f64, self.h as f64);
        if (a.0 < 0.0 && b.0 < 0.0)
            || (a.1 < 0.0 && b.1 < 0.0)
            || (a.0 >= w && b.0 >= w)
            || (a.1 >= h && b.1 >= h)
        {
            return;
        }
        let dx = b.0 - a.0;
        let dy = b.1 - a.1;
        let steps = dx.abs().max(dy.abs()).ceil().clamp(1.0, 4096.0) as usize;
        for s in 0..=steps {
            let t = s as f64 / steps as f64;
            self.plot(a.0 + dx * t, a.1 + dy * t, c);
        }
    }

    fn disc(&mut self, cx: f64, cy: f64, r: f64, c: Rgb) {
        let ri = r.ceil() as i64;
        for oy in -ri..=ri {
            for ox in -ri..=ri {
                if ((ox * ox + oy * oy) as f64) <= r * r {
                    self.plot(cx + ox as f64, cy + oy as f64, c);
                }
            }
        }
    }

    fn to_cells(&self, out: &mut CellBuffer, origin: Rect, enable_color: bool) {
        for cy in 0..origin.h as usize {
            for cx in 0..origin.w as usize {
                let mut mask: u8 = 0;
                let (mut r, mut g, mut b, mut n) = (0u32, 0u32, 0u32, 0u32);
                for dy in 0..4 {
                    for dx in 0..2 {
                        let x = cx * 2 + dx;
                        let y = cy * 4 + dy;
                        if let Some(c) = self.dots[y * self.w + x] {
                            mask |= braille_bit(dx, dy);
                            r += c.r as u32;
                            g += c.g as u32;
                            b += c.b as u32;
                            n += 1;
                        }
                    }
                }
                if mask == 0 {
                    continue;
                }
                let ch = char::from_u32(0x2800 + mask as u32).unwrap_or(' ');
                let fg = if enable_color {
                    Color::Rgb {
                        r: (r / n) as u8,
                        g: (g / n) as u8,
                        b: (b / n) as u8,
                    }
                } else {
                    Color::White
                };
                out.set(
                    origin.x + cx as u16,
                    origin.y + cy as u16,
                    Cell { ch, fg, bg: Color::Black },
                );
            }
        }
    }
}

fn to_color(c: Rgb, enable_color: bool) -> Color {
    if enable_color {
        Color::Rgb { r: c.r, g: c.g, b: c.b }
    } else {
        Color::White
    }
}

/// Collects one frame of drawing calls: curves into the braille canvas,
/// markers and text as glyph overlays written afterwards.
pub(crate) struct PlotSurface {
    layout: Layout,
    mapping: PlotMapping,
    canvas: DotCanvas,
    markers: Vec<(Point, char, Rgb)>,
    labels: Vec<(String, Rgb, Point)>,
    time_text: String,
    info_text: String,
}

impl PlotSurface {
    pub(crate) fn new(layout: Layout) -> Self {
        Self {
            layout,
            mapping: layout.mapping(ViewBounds::home()),
            canvas: DotCanvas::new(layout.plot),
            markers: Vec::new(),
            labels: Vec::new(),
            time_text: String::new(),
            info_text: String::new(),
        }
    }

    fn flush(&self, buf: &mut CellBuffer, enable_color: bool) {
        self.canvas.to_cells(buf, self.layout.plot, enable_color);

        for (p, ch, c) in &self.markers {
            if let Some((x, y)) = self.mapping.to_cell(*p) {
                buf.set(x, y, Cell { ch: *ch, fg: to_color(*c, enable_color), bg: Color::Black });
            }
        }
        for (text, c, p) in &self.labels {
            if let Some((x, y)) = self.mapping.to_cell(*p) {
                let half = (text.chars().count() / 2) as u16;
                draw_text(buf, x.saturating_sub(half), y, text, to_color(*c, enable_color));
            }
        }

        let plot = self.layout.plot;
        draw_text(buf, plot.x + 1, plot.y, &self.time_text, Color::White);
        draw_text(buf, plot.x + 1, plot.y + 1, &self.info_text, Color::White);
    }
}

impl Surface for PlotSurface {
    fn set_view(&mut self, view: ViewBounds) {
        self.mapping = self.layout.mapping(view);
    }

    fn draw_curve(&mut self, color: Rgb, points: &[Point]) {
        for pair in points.windows(2) {
            let a = self.mapping.to_dot(pair[0]);
            let b = self.mapping.to_dot(pair[1]);
            self.canvas.line(a, b, color);
        }
    }

    fn draw_sun(&mut self, at: Point) {
        let (x, y) = self.mapping.to_dot(at);
        self.canvas.disc(x, y, 2.0, Rgb::new(255, 230, 0));
        self.markers.push((at, '●', Rgb::new(255, 230, 0)));
    }

    fn draw_point(&mut self, color: Rgb, at: Point, selected: bool) {
        let ch = if selected { '◆' } else { '●' };
        self.markers.push((at, ch, color));
    }

    fn draw_label(&mut self, text: &str, color: Rgb, at: Point) {
        self.labels.push((text.to_string(), color, at));
    }

    fn set_time_text(&mut self, text: &str) {
        self.time_text = text.to_string();
    }

    fn set_info_text(&mut self, text: &str) {
        self.info_text = text.to_string();
    }
}

/* -----------------------------
   Backdrop
------------------------------ */

#[derive(Clone, Copy)]
pub(crate) struct Star {
    x: u16,
    y: u16,
    depth: f32,
}

pub(crate) fn build_stars(plot: Rect, seed: u64) -> Vec<Star> {
    let mut rng = StdRng::seed_from_u64(seed ^ ((plot.w as u64) << 32) ^ plot.h as u64);
    let area = plot.w as usize * plot.h as usize;
    if area == 0 {
        return Vec::new();
    }
    let count = (area / 70).clamp(20, 240);
    (0..count)
        .map(|_| Star {
            x: plot.x + rng.gen_range(0..plot.w),
            y: plot.y + rng.gen_range(0..plot.h),
            depth: rng.gen_range(0.25..1.0),
        })
        .collect()
}

fn draw_stars(buf: &mut CellBuffer, stars: &[Star]) {
    for s in stars {
        let c = (40.0 + s.depth * 110.0) as u8;
        buf.set(
            s.x,
            s.y,
            Cell {
                ch: '·',
                fg: Color::Rgb { r: c, g: c, b: c.saturating_add(20) },
                bg: Color::Black,
            },
        );
    }
}

/* -----------------------------
   Controls panel
------------------------------ */

fn slider_bar(fraction: f64, width: u16) -> String {
    let width = width.saturating_sub(2) as usize;
    let fill = (fraction.clamp(0.0, 1.0) * width as f64 + 0.5) as usize;
    let mut s = String::with_capacity(width + 2);
    s.push('[');
    for i in 0..width {
        s.push(if i < fill { '█' } else { '─' });
    }
    s.push(']');
    s
}

fn draw_hud(buf: &mut CellBuffer, layout: &Layout, session: &Session, enable_color: bool) {
    let fg = Color::Rgb { r: 220, g: 220, b: 220 };
    let dim = Color::Rgb { r: 130, g: 130, b: 130 };
    let edge = Color::Rgb { r: 80, g: 95, b: 120 };
    let hud = layout.hud;
    if hud.w < 8 {
        return;
    }
    box_draw(buf, hud, edge);
    let px = hud.x + 2;
    let st = session.state();

    draw_text(buf, px, 1, "Solar System Simulator", fg);
    draw_text(
        buf,
        px,
        2,
        &format!("State: {}", if st.paused { "paused" } else { "running" }),
        dim,
    );

    draw_text(buf, px, layout.speed.y - 1, &format!("Speed  {:.2}x", st.speed_factor), fg);
    draw_text(buf, px, layout.speed.y, &slider_bar(session.speed().fraction(), layout.speed.w), dim);
    draw_text(buf, px, layout.zoom.y - 1, &format!("Zoom   {:.2}x", st.zoom), fg);
    draw_text(buf, px, layout.zoom.y, &slider_bar(session.zoom().fraction(), layout.zoom.w), dim);

    draw_text(buf, layout.pause.x, layout.pause.y, "[Pause/Play]", fg);
    draw_text(buf, layout.reset.x, layout.reset.y, "[Reset]", fg);
    let labels = if st.show_labels { "[Labels: on ]" } else { "[Labels: off]" };
    draw_text(buf, layout.labels.x, layout.labels.y, labels, fg);

    let bottom = hud.y + hud.h.saturating_sub(1);
    let mut y = layout.legend_y;
    if y < bottom {
        draw_text(buf, px, y, "Legend", fg);
        y += 1;
    }
    for (i, b) in session.bodies().iter().enumerate() {
        if y >= bottom {
            break;
        }
        let tracked = st.target_body.as_deref() == Some(b.name());
        let key = if i < 9 { format!("{}", i + 1) } else { " ".to_string() };
        draw_text(buf, px, y, "●", to_color(b.color(), enable_color));
        draw_text(
            buf,
            px + 2,
            y,
            &format!("{key} {}{}", b.name(), if tracked { "  ◆" } else { "" }),
            if tracked { fg } else { dim },
        );
        y += 1;
    }

    y += 1;
    for line in [
        "Click body: track | empty: clear",
        "Wheel / W S: zoom",
        "+ -: speed | Space: pause",
        "R reset | L labels | 0 clear",
        "Q quit",
    ] {
        if y >= bottom {
            break;
        }
        draw_text(buf, px, y, line, dim);
        y += 1;
    }
}

/* -----------------------------
   Terminal
------------------------------ */

pub(crate) struct Terminal {
    out: io::Stdout,
    pub(crate) cols: u16,
    pub(crate) rows: u16,
    prev: CellBuffer,
    pub(crate) cur: CellBuffer,
}

impl Terminal {
    pub(crate) fn begin() -> anyhow::Result<Self> {
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            out,
            EnterAlternateScreen,
            cursor::Hide,
            DisableLineWrap,
            EnableMouseCapture,
            Clear(ClearType::All)
        )?;
        let (cols, rows) = terminal::size()?;
        Ok(Self {
            out,
            cols,
            rows,
            prev: CellBuffer::new(cols, rows),
            cur: CellBuffer::new(cols, rows),
        })
    }

    pub(crate) fn end(&mut self) -> anyhow::Result<()> {
        queue!(
            self.out,
            ResetColor,
            Clear(ClearType::All),
            DisableMouseCapture,
            cursor::Show,
            EnableLineWrap,
            LeaveAlternateScreen
        )?;
        self.out.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub(crate) fn resize_if_needed(&mut self) -> anyhow::Result<bool> {
        let (c, r) = terminal::size()?;
        if c == self.cols && r == self.rows {
            return Ok(false);
        }
        self.cols = c;
        self.rows = r;
        self.prev = CellBuffer::new(c, r);
        self.cur = CellBuffer::new(c, r);
        execute!(self.out, Clear(ClearType::All))?;
        Ok(true)
    }

    pub(crate) fn present(&mut self) -> anyhow::Result<()> {
        queue!(self.out, BeginSynchronizedUpdate)?;
        let mut last_fg = None;
        let mut last_bg = None;
        for y in 0..self.rows {
            for x in 0..self.cols {
                let i = self.cur.idx(x, y);
                let c = self.cur.cells[i];
                if c == self.prev.cells[i] {
                    continue;
                }
                queue!(self.out, cursor::MoveTo(x, y))?;
                if last_fg != Some(c.fg) {
                    queue!(self.out, SetForegroundColor(c.fg))?;
                    last_fg = Some(c.fg);
                }
                if last_bg != Some(c.bg) {
                    queue!(self.out, SetBackgroundColor(c.bg))?;
                    last_bg = Some(c.bg);
                }
                queue!(self.out, Print(c.ch))?;
            }
        }
        queue!(self.out, ResetColor, EndSynchronizedUpdate)?;
        self.out.flush()?;
        self.prev.cells.copy_from_slice(&self.cur.cells);
        Ok(())
    }
}

/// Composes one full frame into `term.cur` and presents it.
pub(crate) fn render_frame(
    term: &mut Terminal,
    layout: &Layout,
    session: &Session,
    stars: &[Star],
    enable_color: bool,
) -> anyhow::Result<()> {
    term.cur.clear();
    draw_stars(&mut term.cur, stars);

    let mut surface = PlotSurface::new(*layout);
    session.draw(&mut surface);
    surface.flush(&mut term.cur, enable_color);

    draw_hud(&mut term.cur, layout, session, enable_color);
    term.present()
}
