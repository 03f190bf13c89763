use crate::error::ConfigError;
use crate::orbit::Point;
use crate::state::ZOOM_RANGE;

/// Half-width of the view around a tracked body at zoom 1.
pub const TRACK_HALF_WIDTH: f64 = 15.0;
/// Half-width of the sun-centred view at zoom 1.
pub const HOME_HALF_WIDTH: f64 = 35.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewBounds {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl ViewBounds {
    pub fn square(center: Point, half_width: f64) -> Self {
        Self {
            x_min: center.x - half_width,
            x_max: center.x + half_width,
            y_min: center.y - half_width,
            y_max: center.y + half_width,
        }
    }

    /// The unzoomed, sun-centred view.
    pub fn home() -> Self {
        Self::square(Point::ORIGIN, HOME_HALF_WIDTH)
    }

    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    pub fn center(&self) -> Point {
        Point::new((self.x_min + self.x_max) / 2.0, (self.y_min + self.y_max) / 2.0)
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x_min && p.x <= self.x_max && p.y >= self.y_min && p.y <= self.y_max
    }

    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.x_min, self.x_max, self.y_min, self.y_max)
    }
}

/// Square window around `target`, or around the origin when nothing is
/// tracked. Zoom is expected pre-clamped; non-positive zoom is rejected.
pub fn compute_view(zoom: f64, target: Option<Point>) -> Result<ViewBounds, ConfigError> {
    if !(zoom > 0.0) {
        return Err(ConfigError::NonPositiveZoom(zoom));
    }
    Ok(match target {
        Some(t) => ViewBounds::square(t, TRACK_HALF_WIDTH / zoom),
        None => ViewBounds::square(Point::ORIGIN, HOME_HALF_WIDTH / zoom),
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScrollDirection {
    Up,
    Down,
}

/// One wheel tick: ×1.1 up, ×0.9 down, clamped to the zoom range.
pub fn scroll_zoom(zoom: f64, dir: ScrollDirection) -> f64 {
    let factor = match dir {
        ScrollDirection::Up => 1.1,
        ScrollDirection::Down => 0.9,
    };
    (zoom * factor).clamp(ZOOM_RANGE.0, ZOOM_RANGE.1)
}

/// A bounded continuous control. Writes are clamped to `[min, max]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Slider {
    min: f64,
    max: f64,
    value: f64,
}

impl Slider {
    pub fn new(range: (f64, f64), init: f64) -> Self {
        Self {
            min: range.0,
            max: range.1,
            value: init.clamp(range.0, range.1),
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    pub fn set(&mut self, v: f64) -> f64 {
        self.value = v.clamp(self.min, self.max);
        self.value
    }

    /// Position of the value along the track, 0..=1.
    pub fn fraction(&self) -> f64 {
        (self.value - self.min) / (self.max - self.min)
    }

    /// Exact at both ends of the track.
    pub fn value_at(&self, fraction: f64) -> f64 {
        let f = fraction.clamp(0.0, 1.0);
        (1.0 - f) * self.min + f * self.max
    }
}
