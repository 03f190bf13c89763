pub const SPEED_RANGE: (f64, f64) = (0.1, 5.0);
pub const ZOOM_RANGE: (f64, f64) = (0.1, 15.0);

/// Interactive session state, mutated by controls between ticks.
///
/// The frame counter is not stored here; the driver owns it and passes it
/// to every update.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationState {
    pub paused: bool,
    pub speed_factor: f64,
    pub zoom: f64,
    pub show_labels: bool,
    pub target_body: Option<String>,
}

impl Default for SimulationState {
    fn default() -> Self {
        Self {
            paused: false,
            speed_factor: 1.0,
            zoom: 1.0,
            show_labels: false,
            target_body: None,
        }
    }
}
