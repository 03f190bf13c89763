use std::fmt;

/// Startup-time configuration failures. Every variant is fatal: the
/// binary reports it and exits before entering the terminal.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    NonPositiveSemiMajorAxis { body: String, value: f64 },
    EccentricityOutOfRange { body: String, value: f64 },
    NonPositivePeriod { body: String, value: f64 },
    NonPositiveStepsPerYear,
    TooFewSamples { body: String, samples: usize },
    NonPositiveZoom(f64),
    NonPositiveSelectRadius(f64),
    DuplicateBody(String),
    EmptyBodyTable,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositiveSemiMajorAxis { body, value } => {
                write!(f, "invalid configuration: {body}: semi-major axis must be > 0 (got {value})")
            }
            ConfigError::EccentricityOutOfRange { body, value } => {
                write!(f, "invalid configuration: {body}: eccentricity must be in [0, 1) (got {value})")
            }
            ConfigError::NonPositivePeriod { body, value } => {
                write!(f, "invalid configuration: {body}: orbital period must be > 0 (got {value})")
            }
            ConfigError::NonPositiveStepsPerYear => {
                write!(f, "invalid configuration: steps per year must be > 0")
            }
            ConfigError::TooFewSamples { body, samples } => {
                write!(f, "invalid configuration: {body}: orbit needs at least 2 samples (got {samples})")
            }
            ConfigError::NonPositiveZoom(z) => {
                write!(f, "invalid configuration: zoom must be > 0 (got {z})")
            }
            ConfigError::NonPositiveSelectRadius(r) => {
                write!(f, "invalid configuration: select radius must be > 0 (got {r})")
            }
            ConfigError::DuplicateBody(name) => {
                write!(f, "invalid configuration: body {name:?} listed twice")
            }
            ConfigError::EmptyBodyTable => write!(f, "invalid configuration: body table is empty"),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_body() {
        let e = ConfigError::EccentricityOutOfRange {
            body: "Comet".to_string(),
            value: 1.2,
        };
        let msg = e.to_string();
        assert!(msg.contains("Comet"));
        assert!(msg.starts_with("invalid configuration"));
    }
}
