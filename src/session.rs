//! One interactive session: the orbit table, the mutable state, and the
//! controls that act on it.
//!
//! Front ends translate their widget events into [`Control`] values and
//! hand them to [`Session::dispatch`]; the animation driver calls
//! [`Session::tick`] once per frame and then [`Session::draw`] against
//! whatever implements [`Surface`].

use crate::body::{validate_table, Body, Rgb};
use crate::error::ConfigError;
use crate::orbit::{OrbitTable, Point};
use crate::select::{resolve_click, Selection, SELECT_RADIUS};
use crate::state::{SimulationState, SPEED_RANGE, ZOOM_RANGE};
use crate::trail::Trail;
use crate::updater::{FrameUpdater, UpdateResult};
use crate::viewport::{compute_view, scroll_zoom, ScrollDirection, Slider, ViewBounds};
use log::{debug, info};

/// Labels sit this far above their body, in AU.
pub const LABEL_OFFSET: f64 = 1.5;

#[derive(Clone, Debug, PartialEq)]
pub enum Control {
    SetSpeed(f64),
    SetZoom(f64),
    TogglePause,
    Reset,
    ToggleLabels,
    /// Click in data coordinates; `None` when it landed outside the plot.
    Click(Option<Point>),
    Scroll(ScrollDirection),
    /// Direct selection by name (keyboard shortcut), `None` clears.
    Select(Option<String>),
}

/// Drawing primitives a front end provides.
pub trait Surface {
    fn set_view(&mut self, view: ViewBounds);
    fn draw_curve(&mut self, color: Rgb, points: &[Point]);
    fn draw_sun(&mut self, at: Point);
    fn draw_point(&mut self, color: Rgb, at: Point, selected: bool);
    fn draw_label(&mut self, text: &str, color: Rgb, at: Point);
    fn set_time_text(&mut self, text: &str);
    fn set_info_text(&mut self, text: &str);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SessionOptions {
    pub steps_per_year: u32,
    pub trajectory_length: usize,
    pub select_radius: f64,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            steps_per_year: 500,
            trajectory_length: 500,
            select_radius: SELECT_RADIUS,
        }
    }
}

pub struct Session {
    bodies: Vec<Body>,
    orbits: OrbitTable,
    updater: FrameUpdater,
    state: SimulationState,
    speed: Slider,
    zoom: Slider,
    view: ViewBounds,
    select_radius: f64,
    time_text: String,
    info_text: String,
}

impl Session {
    pub fn new(bodies: Vec<Body>, opts: SessionOptions) -> Result<Self, ConfigError> {
        validate_table(&bodies)?;
        if !(opts.select_radius > 0.0) {
            return Err(ConfigError::NonPositiveSelectRadius(opts.select_radius));
        }
        let orbits = OrbitTable::build(&bodies, opts.steps_per_year)?;
        for o in orbits.iter() {
            debug!("orbit {}: {} samples, period {} yr", o.name, o.points.len(), o.period);
        }
        let updater = FrameUpdater::new(&orbits, opts.trajectory_length);
        let state = SimulationState::default();
        Ok(Self {
            speed: Slider::new(SPEED_RANGE, state.speed_factor),
            zoom: Slider::new(ZOOM_RANGE, state.zoom),
            bodies,
            orbits,
            updater,
            state,
            view: ViewBounds::home(),
            select_radius: opts.select_radius,
            time_text: String::new(),
            info_text: String::new(),
        })
    }

    pub fn dispatch(&mut self, control: Control) {
        match control {
            Control::SetSpeed(v) => {
                self.state.speed_factor = self.speed.set(v);
            }
            Control::SetZoom(v) => {
                self.state.zoom = self.zoom.set(v);
            }
            Control::Scroll(dir) => {
                self.state.zoom = self.zoom.set(scroll_zoom(self.state.zoom, dir));
            }
            Control::TogglePause => {
                self.state.paused = !self.state.paused;
                debug!("paused = {}", self.state.paused);
            }
            Control::ToggleLabels => self.state.show_labels = !self.state.show_labels,
            Control::Reset => self.reset(),
            Control::Click(at) => {
                let positions = self
                    .updater
                    .last()
                    .positions
                    .iter()
                    .map(|(n, p)| (n.as_str(), *p));
                if let Selection::Set(target) = resolve_click(at, positions, self.select_radius) {
                    self.set_target(target);
                }
            }
            Control::Select(target) => {
                let known = target
                    .as_deref()
                    .map_or(true, |n| self.bodies.iter().any(|b| b.name() == n));
                if known {
                    self.set_target(target);
                }
            }
        }
    }

    fn set_target(&mut self, target: Option<String>) {
        if self.state.target_body != target {
            info!("tracking {}", target.as_deref().unwrap_or("nothing"));
        }
        self.state.target_body = target;
    }

    /// Clears the target and history, restores zoom 1 and the home view.
    /// Speed and pause are left as they are.
    pub fn reset(&mut self) {
        self.state.target_body = None;
        self.state.zoom = self.zoom.set(1.0);
        self.view = ViewBounds::home();
        self.updater.clear_trails();
        info!("view reset");
    }

    /// One animation tick. While paused nothing moves, including the view.
    pub fn tick(&mut self, frame: u64) -> &UpdateResult {
        if self.state.paused {
            return self.updater.last();
        }
        let res = self
            .updater
            .advance(frame, &self.state, &self.orbits, &self.bodies);

        self.time_text = res.time_text();
        let target = res.telemetry.as_ref().and_then(|t| res.position(&t.name));
        self.info_text = res.telemetry.as_ref().map(|t| t.describe()).unwrap_or_default();

        // zoom comes from a clamped slider, so this only fails on a bug upstream
        if let Ok(view) = compute_view(self.state.zoom, target) {
            self.view = view;
        }
        self.updater.last()
    }

    pub fn draw<S: Surface>(&self, surface: &mut S) {
        surface.set_view(self.view);
        let last = self.updater.last();

        for (body, orbit) in self.bodies.iter().zip(self.orbits.iter()) {
            surface.draw_curve(body.color(), &orbit.points);
        }

        surface.draw_sun(Point::ORIGIN);
        surface.draw_label("Sun", Rgb::new(255, 255, 0), Point::new(0.0, LABEL_OFFSET));

        for body in &self.bodies {
            let Some(p) = last.position(body.name()) else {
                continue;
            };
            let selected = self.state.target_body.as_deref() == Some(body.name());
            surface.draw_point(body.color(), p, selected);
            if self.state.show_labels {
                surface.draw_label(body.name(), body.color(), Point::new(p.x, p.y + LABEL_OFFSET));
            }
        }

        surface.set_time_text(&self.time_text);
        surface.set_info_text(&self.info_text);
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn orbits(&self) -> &OrbitTable {
        &self.orbits
    }

    pub fn view(&self) -> ViewBounds {
        self.view
    }

    pub fn speed(&self) -> Slider {
        self.speed
    }

    pub fn zoom(&self) -> Slider {
        self.zoom
    }

    pub fn last(&self) -> &UpdateResult {
        self.updater.last()
    }

    pub fn trails(&self) -> &[Trail] {
        self.updater.trails()
    }

    pub fn time_text(&self) -> &str {
        &self.time_text
    }

    pub fn info_text(&self) -> &str {
        &self.info_text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::body::solar_system;

    fn session() -> Session {
        Session::new(solar_system(), SessionOptions::default()).unwrap()
    }

    #[test]
    fn controls_are_clamped_by_their_sliders() {
        let mut s = session();
        s.dispatch(Control::SetSpeed(12.0));
        assert_eq!(s.state().speed_factor, 5.0);
        s.dispatch(Control::SetZoom(0.0));
        assert_eq!(s.state().zoom, 0.1);
        s.dispatch(Control::Scroll(ScrollDirection::Down));
        assert_eq!(s.state().zoom, 0.1);
    }

    #[test]
    fn select_by_unknown_name_is_ignored() {
        let mut s = session();
        s.dispatch(Control::Select(Some("Earth".to_string())));
        s.dispatch(Control::Select(Some("Pluto".to_string())));
        assert_eq!(s.state().target_body.as_deref(), Some("Earth"));
        s.dispatch(Control::Select(None));
        assert_eq!(s.state().target_body, None);
    }

    #[test]
    fn view_follows_target_only_while_running() {
        let mut s = session();
        s.dispatch(Control::Select(Some("Jupiter".to_string())));
        s.tick(100);
        let jup = s.last().position("Jupiter").unwrap();
        assert_eq!(s.view(), ViewBounds::square(jup, 15.0));
        assert!(s.info_text().starts_with("Body: Jupiter"));

        s.dispatch(Control::TogglePause);
        s.dispatch(Control::SetZoom(3.0));
        s.tick(200);
        assert_eq!(s.view(), ViewBounds::square(jup, 15.0));

        s.dispatch(Control::TogglePause);
        s.tick(200);
        let jup = s.last().position("Jupiter").unwrap();
        assert_eq!(s.view(), ViewBounds::square(jup, 5.0));
    }

    #[test]
    fn invalid_options_fail_construction() {
        let opts = SessionOptions {
            steps_per_year: 0,
            ..Default::default()
        };
        assert!(matches!(
            Session::new(solar_system(), opts),
            Err(ConfigError::NonPositiveStepsPerYear)
        ));
        assert!(matches!(
            Session::new(Vec::new(), SessionOptions::default()),
            Err(ConfigError::EmptyBodyTable)
        ));
    }

    #[test]
    fn select_radius_must_be_positive() {
        for r in [0.0, -1.0, f64::NAN] {
            let opts = SessionOptions {
                select_radius: r,
                ..Default::default()
            };
            assert!(
                matches!(
                    Session::new(solar_system(), opts),
                    Err(ConfigError::NonPositiveSelectRadius(_))
                ),
                "radius {r} accepted"
            );
        }
    }
}
