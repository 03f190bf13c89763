use solsim::{
    compute_view, solar_system, Body, Control, Point, Rgb, ScrollDirection, Session,
    SessionOptions, Surface, ViewBounds,
};

/// Records every drawing call so tests can inspect one frame.
#[derive(Default)]
struct Recorder {
    view: Option<ViewBounds>,
    curves: Vec<usize>,
    points: Vec<(Point, bool)>,
    labels: Vec<(String, Point)>,
    suns: usize,
    time_text: String,
    info_text: String,
}

impl Surface for Recorder {
    fn set_view(&mut self, view: ViewBounds) {
        self.view = Some(view);
    }
    fn draw_curve(&mut self, _color: Rgb, points: &[Point]) {
        self.curves.push(points.len());
    }
    fn draw_sun(&mut self, _at: Point) {
        self.suns += 1;
    }
    fn draw_point(&mut self, _color: Rgb, at: Point, selected: bool) {
        self.points.push((at, selected));
    }
    fn draw_label(&mut self, text: &str, _color: Rgb, at: Point) {
        self.labels.push((text.to_string(), at));
    }
    fn set_time_text(&mut self, text: &str) {
        self.time_text = text.to_string();
    }
    fn set_info_text(&mut self, text: &str) {
        self.info_text = text.to_string();
    }
}

fn solar() -> Session {
    Session::new(solar_system(), SessionOptions::default()).unwrap()
}

fn two_bodies(a: Point, b: Point) -> Session {
    // circular orbits with one-year periods start on the +x axis
    let bodies = vec![
        Body::new("Near", a.x, 0.0, 1.0, Rgb::new(255, 0, 0)).unwrap(),
        Body::new("Far", b.x, 0.0, 1.0, Rgb::new(0, 255, 0)).unwrap(),
    ];
    Session::new(bodies, SessionOptions::default()).unwrap()
}

fn frame(s: &Session) -> Recorder {
    let mut r = Recorder::default();
    s.draw(&mut r);
    r
}

// ==================================================================================
// Selection
// ==================================================================================

#[test]
fn click_on_a_body_tracks_it_and_empty_space_clears() {
    let mut s = two_bodies(Point::new(5.0, 0.0), Point::new(20.0, 0.0));
    s.tick(0);

    s.dispatch(Control::Click(Some(Point::new(20.0, 0.0))));
    assert_eq!(s.state().target_body.as_deref(), Some("Far"));

    s.dispatch(Control::Click(Some(Point::new(20.0, 2.99))));
    assert_eq!(s.state().target_body.as_deref(), Some("Far"));

    s.dispatch(Control::Click(Some(Point::new(20.0, 3.01))));
    assert_eq!(s.state().target_body, None);
}

#[test]
fn click_outside_the_plot_changes_nothing() {
    let mut s = two_bodies(Point::new(5.0, 0.0), Point::new(20.0, 0.0));
    s.tick(0);
    s.dispatch(Control::Click(Some(Point::new(5.0, 0.0))));
    s.dispatch(Control::Click(None));
    assert_eq!(s.state().target_body.as_deref(), Some("Near"));
}

#[test]
fn tracking_reframes_and_reports_telemetry() {
    let mut s = two_bodies(Point::new(5.0, 0.0), Point::new(20.0, 0.0));
    s.tick(0);
    s.dispatch(Control::Click(Some(Point::new(19.0, 1.0))));
    s.tick(0);

    let r = frame(&s);
    assert_eq!(r.view.unwrap().as_tuple(), (5.0, 35.0, -15.0, 15.0));
    assert_eq!(
        r.info_text,
        "Body: Far | Distance: 20.00 AU | Period: 1.00 yr | Eccentricity: 0.000"
    );
    assert_eq!(r.points.iter().filter(|(_, sel)| *sel).count(), 1);
}

// ==================================================================================
// Playback
// ==================================================================================

#[test]
fn pause_freezes_everything_drawn() {
    let mut s = solar();
    s.tick(120);
    let before = frame(&s);
    let result = s.last().clone();

    s.dispatch(Control::TogglePause);
    s.tick(300);
    s.tick(4000);
    let after = frame(&s);

    assert_eq!(s.last(), &result);
    assert_eq!(before.points, after.points);
    assert_eq!(before.time_text, after.time_text);
    assert_eq!(after.time_text, "Simulated time: 0.24 years");
}

#[test]
fn earth_is_opposite_after_half_a_year() {
    let mut s = solar();
    let res = s.tick(250);
    let p = res.position("Earth").unwrap();
    assert!(p.y.abs() < 0.01, "y = {}", p.y);
    assert!((p.x + 1.017).abs() < 1e-3, "x = {}", p.x);
}

#[test]
fn speed_multiplies_the_sampled_frame() {
    let mut s = solar();
    s.dispatch(Control::SetSpeed(2.0));
    assert_eq!(s.tick(100).real_frame, 200);
    s.dispatch(Control::SetSpeed(0.0));
    assert_eq!(s.state().speed_factor, 0.1);
    assert_eq!(s.tick(100).real_frame, 10);
}

#[test]
fn full_orbits_are_drawn_not_trails() {
    let mut s = solar();
    for f in 0..10 {
        s.tick(f);
    }
    let r = frame(&s);
    let expected: Vec<usize> = s.orbits().iter().map(|o| o.points.len()).collect();
    assert_eq!(r.curves, expected);
    assert!(s.trails().iter().all(|t| t.len() == 10));
    assert_eq!(r.suns, 1);
}

// ==================================================================================
// Labels, zoom and reset
// ==================================================================================

#[test]
fn labels_follow_bodies_when_enabled() {
    let mut s = two_bodies(Point::new(5.0, 0.0), Point::new(20.0, 0.0));
    s.tick(0);
    let r = frame(&s);
    assert_eq!(r.labels.len(), 1, "only the sun label is always shown");

    s.dispatch(Control::ToggleLabels);
    let r = frame(&s);
    assert!(r
        .labels
        .iter()
        .any(|(t, p)| t == "Far" && *p == Point::new(20.0, 1.5)));
    assert_eq!(r.labels.len(), 3);
}

#[test]
fn scroll_zoom_applies_on_the_next_tick() {
    let mut s = solar();
    s.dispatch(Control::Scroll(ScrollDirection::Up));
    s.dispatch(Control::Scroll(ScrollDirection::Up));
    assert!((s.state().zoom - 1.21).abs() < 1e-12);
    assert_eq!(s.view(), ViewBounds::home());
    s.tick(1);
    assert_eq!(s.view(), compute_view(s.state().zoom, None).unwrap());
}

#[test]
fn reset_restores_defaults_but_keeps_speed_and_pause() {
    let mut s = solar();
    s.dispatch(Control::SetSpeed(3.0));
    s.dispatch(Control::SetZoom(8.0));
    s.dispatch(Control::Select(Some("Saturn".to_string())));
    for f in 0..20 {
        s.tick(f);
    }
    s.dispatch(Control::TogglePause);
    s.dispatch(Control::Reset);

    assert_eq!(s.state().target_body, None);
    assert_eq!(s.state().zoom, 1.0);
    assert_eq!(s.zoom().value(), 1.0);
    assert_eq!(s.view(), ViewBounds::home());
    assert!(s.trails().iter().all(|t| t.is_empty()));
    assert_eq!(s.state().speed_factor, 3.0);
    assert!(s.state().paused);
}
