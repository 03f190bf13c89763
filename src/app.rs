use crate::input::{collect_events_nonblocking, map_event, Action};
use crate::render::{build_stars, render_frame, Layout, Star, Terminal};
use log::{debug, error, info};
use solsim::{config::Settings, Session};
use std::time::{Duration, Instant};

pub(crate) struct App {
    settings: Settings,
    session: Session,
    term: Terminal,
    layout: Layout,
    stars: Vec<Star>,
    /// Driver-owned frame counter, wraps at `frames_per_cycle`.
    frame: u64,
    should_quit: bool,
}

impl App {
    fn init(settings: Settings, session: Session) -> anyhow::Result<Self> {
        let term = Terminal::begin()?;
        let layout = Layout::new(term.cols, term.rows);
        let stars = if settings.show_stars {
            build_stars(layout.plot, settings.star_seed)
        } else {
            Vec::new()
        };
        info!("terminal {}x{}", term.cols, term.rows);
        Ok(Self {
            settings,
            session,
            term,
            layout,
            stars,
            frame: 0,
            should_quit: false,
        })
    }

    fn run(&mut self) -> anyhow::Result<()> {
        let frame_dt = Duration::from_millis(self.settings.tick_ms);

        while !self.should_quit {
            let started = Instant::now();

            if self.term.resize_if_needed()? {
                self.relayout();
            }

            for ev in collect_events_nonblocking(frame_dt)? {
                match map_event(&ev, &self.layout, &self.session) {
                    Some(Action::Quit) => {
                        self.should_quit = true;
                        break;
                    }
                    Some(Action::Resize) => {
                        if self.term.resize_if_needed()? {
                            self.relayout();
                        }
                    }
                    Some(Action::Control(c)) => self.session.dispatch(c),
                    None => {}
                }
            }
            if self.should_quit {
                break;
            }

            self.session.tick(self.frame);
            self.frame = (self.frame + 1) % self.settings.frames_per_cycle;

            render_frame(
                &mut self.term,
                &self.layout,
                &self.session,
                &self.stars,
                self.settings.enable_color,
            )?;

            spin_sleep(frame_dt, started);
        }
        Ok(())
    }

    fn relayout(&mut self) {
        self.layout = Layout::new(self.term.cols, self.term.rows);
        if self.settings.show_stars {
            self.stars = build_stars(self.layout.plot, self.settings.star_seed);
        }
        debug!("resized to {}x{}", self.term.cols, self.term.rows);
    }
}

/// Runs until the user quits. The terminal is restored even when the loop
/// fails.
pub(crate) fn run(settings: Settings, session: Session) -> anyhow::Result<()> {
    let mut app = App::init(settings, session)?;
    let res = app.run();
    let restored = app.term.end();
    info!("session ended after frame {}", app.frame);
    keep_loop_error(res, restored)
}

/// A failed restore is reported only when the loop itself succeeded.
fn keep_loop_error(res: anyhow::Result<()>, restored: anyhow::Result<()>) -> anyhow::Result<()> {
    if let Err(e) = &res {
        error!("main loop failed: {e:#}");
    }
    res.and(restored)
}

/* -----------------------------
   Frame pacing helper
------------------------------ */

fn spin_sleep(target: Duration, now: Instant) {
    let end = now + target;
    loop {
        let t = Instant::now();
        if t >= end {
            break;
        }
        let left = end - t;
        if left > Duration::from_millis(2) {
            std::thread::sleep(Duration::from_millis(1));
        } else {
            std::hint::spin_loop();
        }
    }
}
