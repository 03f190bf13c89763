//! Per-tick sampling of every body's current position.

use crate::body::Body;
use crate::orbit::{OrbitTable, Point};
use crate::state::SimulationState;
use crate::trail::Trail;

#[derive(Clone, Debug, PartialEq)]
pub struct Telemetry {
    pub name: String,
    /// distance from the origin, AU
    pub distance: f64,
    pub period: f64,
    pub eccentricity: f64,
}

impl Telemetry {
    pub fn describe(&self) -> String {
        format!(
            "Body: {} | Distance: {:.2} AU | Period: {:.2} yr | Eccentricity: {:.3}",
            self.name, self.distance, self.period, self.eccentricity
        )
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpdateResult {
    pub real_frame: u64,
    pub simulated_years: f64,
    /// (name, position) in body-table order
    pub positions: Vec<(String, Point)>,
    pub telemetry: Option<Telemetry>,
}

impl UpdateResult {
    pub fn position(&self, name: &str) -> Option<Point> {
        self.positions.iter().find(|(n, _)| n == name).map(|&(_, p)| p)
    }

    pub fn time_text(&self) -> String {
        format!("Simulated time: {:.2} years", self.simulated_years)
    }
}

pub struct FrameUpdater {
    trails: Vec<Trail>,
    last: UpdateResult,
}

impl FrameUpdater {
    /// Primed with the frame-0 positions so a session that starts paused
    /// still has something to show. Trails start empty.
    pub fn new(orbits: &OrbitTable, trajectory_length: usize) -> Self {
        let positions = orbits.iter().map(|o| (o.name.clone(), o.at(0))).collect();
        Self {
            trails: orbits.iter().map(|_| Trail::new(trajectory_length)).collect(),
            last: UpdateResult {
                real_frame: 0,
                simulated_years: 0.0,
                positions,
                telemetry: None,
            },
        }
    }

    /// Paused: returns the previous result untouched. Otherwise samples
    /// `floor(frame * speed)` with wraparound, records history, and fills
    /// telemetry for the tracked body.
    pub fn advance(
        &mut self,
        frame: u64,
        state: &SimulationState,
        orbits: &OrbitTable,
        bodies: &[Body],
    ) -> &UpdateResult {
        if state.paused {
            return &self.last;
        }

        let real_frame = (frame as f64 * state.speed_factor).floor() as u64;
        let simulated_years = real_frame as f64 / orbits.steps_per_year() as f64;

        let mut positions = Vec::with_capacity(orbits.len());
        let mut telemetry = None;
        for (i, orbit) in orbits.iter().enumerate() {
            let p = orbit.at(real_frame);
            self.trails[i].push(p);

            if state.target_body.as_deref() == Some(orbit.name.as_str()) {
                if let Some(body) = bodies.iter().find(|b| b.name() == orbit.name) {
                    telemetry = Some(Telemetry {
                        name: orbit.name.clone(),
                        distance: p.norm(),
                        period: body.period(),
                        eccentricity: body.eccentricity(),
                    });
                }
            }
            positions.push((orbit.name.clone(), p));
        }

        self.last = UpdateResult {
            real_frame,
            simulated_years,
            positions,
            telemetry,
        };
        &self.last
    }

    pub fn last(&self) -> &UpdateResult {
        &self.last
    }

    pub fn trails(&self) -> &[Trail] {
        &self.trails
    }

    pub fn clear_trails(&mut self) {
        for t in &mut self.trails {
            t.clear();
        }
    }
}
