use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// A body on a simplified Keplerian ellipse around the origin.
///
/// Fields are private so that every `Body` in circulation went through
/// [`Body::new`]: `a > 0`, `period > 0` and `0 <= e < 1`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBody", into = "RawBody")]
pub struct Body {
    name: String,
    semi_major_axis: f64,
    eccentricity: f64,
    period: f64,
    color: Rgb,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub(crate) struct RawBody {
    name: String,
    /// AU
    a: f64,
    e: f64,
    /// years
    period: f64,
    color: Rgb,
}

impl TryFrom<RawBody> for Body {
    type Error = ConfigError;

    fn try_from(raw: RawBody) -> Result<Self, Self::Error> {
        Body::new(raw.name, raw.a, raw.e, raw.period, raw.color)
    }
}

impl From<Body> for RawBody {
    fn from(b: Body) -> Self {
        RawBody {
            name: b.name,
            a: b.semi_major_axis,
            e: b.eccentricity,
            period: b.period,
            color: b.color,
        }
    }
}

impl Body {
    pub fn new(
        name: impl Into<String>,
        semi_major_axis: f64,
        eccentricity: f64,
        period: f64,
        color: Rgb,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        // `!(x > 0.0)` also rejects NaN.
        if !(semi_major_axis > 0.0) {
            return Err(ConfigError::NonPositiveSemiMajorAxis {
                body: name,
                value: semi_major_axis,
            });
        }
        if !(0.0..1.0).contains(&eccentricity) {
            return Err(ConfigError::EccentricityOutOfRange {
                body: name,
                value: eccentricity,
            });
        }
        if !(period > 0.0) {
            return Err(ConfigError::NonPositivePeriod { body: name, value: period });
        }
        Ok(Self {
            name,
            semi_major_axis,
            eccentricity,
            period,
            color,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn semi_major_axis(&self) -> f64 {
        self.semi_major_axis
    }
    pub fn eccentricity(&self) -> f64 {
        self.eccentricity
    }
    pub fn period(&self) -> f64 {
        self.period
    }
    pub fn color(&self) -> Rgb {
        self.color
    }
}

/// Checks a whole table: non-empty, unique names.
pub fn validate_table(bodies: &[Body]) -> Result<(), ConfigError> {
    if bodies.is_empty() {
        return Err(ConfigError::EmptyBodyTable);
    }
    for (i, b) in bodies.iter().enumerate() {
        if bodies[..i].iter().any(|o| o.name == b.name) {
            return Err(ConfigError::DuplicateBody(b.name.clone()));
        }
    }
    Ok(())
}

const GRAY: Rgb = Rgb::new(128, 128, 128);
const ORANGE: Rgb = Rgb::new(255, 165, 0);
const BLUE: Rgb = Rgb::new(70, 110, 255);
const RED: Rgb = Rgb::new(255, 60, 50);
const BROWN: Rgb = Rgb::new(165, 42, 42);
const GOLD: Rgb = Rgb::new(255, 215, 0);
const CYAN: Rgb = Rgb::new(0, 255, 255);
const PURPLE: Rgb = Rgb::new(160, 60, 200);
const WHITE: Rgb = Rgb::new(255, 255, 255);

/// The eight planets plus asteroid 2024 YR4: (name, a [AU], e, T [yr], color).
const SOLAR_SYSTEM: [(&str, f64, f64, f64, Rgb); 9] = [
    ("Mercury", 0.39, 0.206, 0.24, GRAY),
    ("Venus", 0.72, 0.007, 0.62, ORANGE),
    ("Earth", 1.00, 0.017, 1.00, BLUE),
    ("Mars", 1.52, 0.093, 1.88, RED),
    ("Jupiter", 5.20, 0.049, 11.86, BROWN),
    ("Saturn", 9.58, 0.056, 29.46, GOLD),
    ("Uranus", 19.22, 0.046, 84.01, CYAN),
    ("Neptune", 30.05, 0.010, 164.79, PURPLE),
    ("2024 YR4", 2.515865550528513, 0.6615479033633554, 4.04, WHITE),
];

pub fn solar_system() -> Vec<Body> {
    SOLAR_SYSTEM
        .iter()
        .map(|&(name, a, e, t, color)| Body {
            name: name.to_string(),
            semi_major_axis: a,
            eccentricity: e,
            period: t,
            color,
        })
        .collect()
}
