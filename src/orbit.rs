//! Precomputed closed-curve samples, one revolution per body.
//!
//! The curve is a geometric parameterization: the polar angle is swept
//! uniformly, so bodies do not speed up near perihelion. This is not a
//! solution of Kepler's equation.

use crate::body::Body;
use crate::error::ConfigError;
use std::f64::consts::TAU;

/// Plane coordinates in AU.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn dist(self, o: Point) -> f64 {
        ((self.x - o.x).powi(2) + (self.y - o.y).powi(2)).sqrt()
    }

    pub fn norm(self) -> f64 {
        self.dist(Point::ORIGIN)
    }
}

#[derive(Clone, Debug)]
pub struct OrbitSample {
    pub name: String,
    pub points: Vec<Point>,
    pub period: f64,
}

impl OrbitSample {
    /// Wrapping index: the orbit loops forever.
    pub fn at(&self, real_frame: u64) -> Point {
        let idx = (real_frame % self.points.len() as u64) as usize;
        self.points[idx]
    }
}

/// Orbit samples in body-table order.
#[derive(Clone, Debug)]
pub struct OrbitTable {
    steps_per_year: u32,
    orbits: Vec<OrbitSample>,
}

impl OrbitTable {
    pub fn build(bodies: &[Body], steps_per_year: u32) -> Result<Self, ConfigError> {
        if steps_per_year == 0 {
            return Err(ConfigError::NonPositiveStepsPerYear);
        }
        let mut orbits = Vec::with_capacity(bodies.len());
        for b in bodies {
            if !(b.period() > 0.0) {
                return Err(ConfigError::NonPositivePeriod {
                    body: b.name().to_string(),
                    value: b.period(),
                });
            }
            let n = (b.period() * steps_per_year as f64).floor() as usize;
            if n < 2 {
                return Err(ConfigError::TooFewSamples {
                    body: b.name().to_string(),
                    samples: n,
                });
            }
            orbits.push(OrbitSample {
                name: b.name().to_string(),
                points: sample_ellipse(b.semi_major_axis(), b.eccentricity(), n),
                period: b.period(),
            });
        }
        Ok(Self {
            steps_per_year,
            orbits,
        })
    }

    pub fn steps_per_year(&self) -> u32 {
        self.steps_per_year
    }

    pub fn iter(&self) -> impl Iterator<Item = &OrbitSample> {
        self.orbits.iter()
    }

    pub fn len(&self) -> usize {
        self.orbits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orbits.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&OrbitSample> {
        self.orbits.iter().find(|o| o.name == name)
    }
}

/// `n` angles over [0, 2π] inclusive of both ends, so the first and last
/// points coincide.
fn sample_ellipse(a: f64, e: f64, n: usize) -> Vec<Point> {
    let p = a * (1.0 - e * e);
    let step = TAU / (n - 1) as f64;
    (0..n)
        .map(|i| {
            let theta = if i == n - 1 { TAU } else { i as f64 * step };
            let r = p / (1.0 + e * theta.cos());
            Point::new(r * theta.cos(), r * theta.sin())
        })
        .collect()
}
