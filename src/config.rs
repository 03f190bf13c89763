use crate::body::{solar_system, validate_table, Body, RawBody};
use crate::error::ConfigError;
use crate::select::SELECT_RADIUS;
use crate::session::SessionOptions;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use log::warn;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Settings {
    pub steps_per_year: u32,
    pub trajectory_length: usize,
    pub tick_ms: u64,
    /// The driver's frame counter wraps back to 0 here.
    pub frames_per_cycle: u64,
    pub select_radius: f64,
    pub enable_color: bool,
    pub show_stars: bool,
    pub star_seed: u64,
    /// Replaces the built-in solar system when present.
    pub bodies: Option<Vec<Body>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            steps_per_year: 500,
            trajectory_length: 500,
            tick_ms: 20,
            frames_per_cycle: 500 * 10,
            select_radius: SELECT_RADIUS,
            enable_color: true,
            show_stars: true,
            star_seed: 0x5015_5015,
            bodies: None,
        }
    }
}

/// What `settings.json` may contain. Bodies stay raw so that a file which
/// parses but names an invalid body is reported instead of replaced.
#[derive(Deserialize)]
#[serde(default)]
struct SettingsFile {
    steps_per_year: u32,
    trajectory_length: usize,
    tick_ms: u64,
    /// Defaults to ten years of frames at `steps_per_year`.
    frames_per_cycle: Option<u64>,
    select_radius: f64,
    enable_color: bool,
    show_stars: bool,
    star_seed: u64,
    bodies: Option<Vec<RawBody>>,
}

impl Default for SettingsFile {
    fn default() -> Self {
        let d = Settings::default();
        Self {
            steps_per_year: d.steps_per_year,
            trajectory_length: d.trajectory_length,
            tick_ms: d.tick_ms,
            frames_per_cycle: None,
            select_radius: d.select_radius,
            enable_color: d.enable_color,
            show_stars: d.show_stars,
            star_seed: d.star_seed,
            bodies: None,
        }
    }
}

impl TryFrom<SettingsFile> for Settings {
    type Error = ConfigError;

    fn try_from(f: SettingsFile) -> Result<Self, Self::Error> {
        let bodies = match f.bodies {
            Some(raw) => {
                let bodies = raw
                    .into_iter()
                    .map(Body::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                validate_table(&bodies)?;
                Some(bodies)
            }
            None => None,
        };
        Ok(Settings {
            steps_per_year: f.steps_per_year,
            trajectory_length: f.trajectory_length,
            tick_ms: f.tick_ms,
            frames_per_cycle: f
                .frames_per_cycle
                .unwrap_or(f.steps_per_year as u64 * 10),
            select_radius: f.select_radius,
            enable_color: f.enable_color,
            show_stars: f.show_stars,
            star_seed: f.star_seed,
            bodies,
        })
    }
}

impl Settings {
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            steps_per_year: self.steps_per_year,
            trajectory_length: self.trajectory_length,
            select_radius: self.select_radius,
        }
    }

    pub fn body_table(&self) -> Vec<Body> {
        self.bodies.clone().unwrap_or_else(solar_system)
    }
}

pub fn default_settings_path() -> Result<PathBuf> {
    let proj = ProjectDirs::from("org", "solsim", "Solsim")
        .context("could not resolve project directories")?;
    Ok(proj.config_dir().join("settings.json"))
}

/// Missing or unparseable settings fall back to defaults. A file that
/// parses but holds an invalid body table is an error.
pub fn load_settings(path: &Path) -> Result<Settings> {
    let s = match fs::read_to_string(path) {
        Ok(s) => s,
        Err(_) => return Ok(Settings::default()),
    };
    let file = match serde_json::from_str::<SettingsFile>(&s) {
        Ok(v) => v,
        Err(e) => {
            warn!("ignoring {}: {e}", path.display());
            return Ok(Settings::default());
        }
    };
    Settings::try_from(file).with_context(|| format!("loading {}", path.display()))
}

/// A JSON array of bodies. Unlike settings, a bad file here is an error:
/// the user asked for this table explicitly.
pub fn load_bodies(path: &Path) -> Result<Vec<Body>> {
    let s = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let bodies: Vec<Body> =
        serde_json::from_str(&s).with_context(|| format!("parsing {}", path.display()))?;
    validate_table(&bodies)?;
    Ok(bodies)
}

pub fn save_settings_atomic(path: &Path, s: &Settings) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }
    let tmp = path.with_extension("json.tmp");
    let data = serde_json::to_vec_pretty(s)?;
    fs::write(&tmp, data)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("solsim-{}-{name}", std::process::id()))
    }

    #[test]
    fn missing_file_gives_defaults() {
        let s = load_settings(&scratch("does-not-exist.json")).unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.body_table().len(), 9);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let path = scratch("partial.json");
        fs::write(&path, r#"{ "steps_per_year": 100 }"#).unwrap();
        let s = load_settings(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(s.steps_per_year, 100);
        assert_eq!(s.frames_per_cycle, 1000);
        assert_eq!(s.tick_ms, 20);
    }

    #[test]
    fn explicit_cycle_length_wins() {
        let path = scratch("cycle.json");
        fs::write(&path, r#"{ "steps_per_year": 100, "frames_per_cycle": 777 }"#).unwrap();
        let s = load_settings(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(s.frames_per_cycle, 777);
    }

    #[test]
    fn garbage_file_gives_defaults() {
        let path = scratch("garbage.json");
        fs::write(&path, "{ not json").unwrap();
        let s = load_settings(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn invalid_body_in_settings_is_an_error() {
        let path = scratch("bad-body.json");
        fs::write(
            &path,
            r#"{"tick_ms":40,"bodies":[{"name":"Comet","a":3.0,"e":1.5,"period":5.0,"color":{"r":1,"g":2,"b":3}}]}"#,
        )
        .unwrap();
        let err = load_settings(&path).unwrap_err();
        fs::remove_file(&path).ok();
        let msg = format!("{err:#}");
        assert!(msg.contains("eccentricity"), "{msg}");
        assert!(msg.contains("Comet"), "{msg}");
    }

    #[test]
    fn save_then_load() {
        let path = scratch("roundtrip/settings.json");
        let s = Settings {
            tick_ms: 33,
            enable_color: false,
            ..Default::default()
        };
        save_settings_atomic(&path, &s).unwrap();
        let back = load_settings(&path).unwrap();
        fs::remove_dir_all(path.parent().unwrap()).ok();
        assert_eq!(back, s);
    }

    #[test]
    fn body_file_is_validated() {
        let path = scratch("bodies.json");
        fs::write(
            &path,
            r#"[{"name":"A","a":1.0,"e":0.1,"period":1.0,"color":{"r":1,"g":2,"b":3}},
                {"name":"A","a":2.0,"e":0.1,"period":2.0,"color":{"r":1,"g":2,"b":3}}]"#,
        )
        .unwrap();
        let err = load_bodies(&path).unwrap_err();
        fs::remove_file(&path).ok();
        assert!(err.to_string().contains("listed twice"), "{err}");
    }
}
