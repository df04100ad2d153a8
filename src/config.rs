//! Demo renderer settings.
//!
//! [`RenderConfig`] gathers the knobs the demo binary exposes. Setters return
//! `&mut Self` for chaining:
//!
//! ```ignore
//! let mut config = RenderConfig::default();
//! config.set_size(1024, 768).set_fov_degrees(60.0);
//! ```

use std::path::PathBuf;

use crate::colors;
use crate::projection::Projection;

pub const WINDOW_WIDTH: u32 = 800;
pub const WINDOW_HEIGHT: u32 = 600;
pub const FPS: u64 = 60;
pub const FRAME_TARGET_TIME: f64 = 1000.0 / FPS as f64;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    width: u32,
    height: u32,
    fov_degrees: f32,
    near: f32,
    far: f32,
    /// Distance from the camera to the mesh centre.
    distance: f32,
    /// Degrees per second about each of x, y, z.
    spin: [f32; 3],
    background: u32,
    fill: u32,
    obj_path: Option<PathBuf>,
    snapshot_path: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: WINDOW_WIDTH,
            height: WINDOW_HEIGHT,
            fov_degrees: 60.0,
            near: 0.1,
            far: 100.0,
            distance: 5.0,
            spin: [20.0, 35.0, 0.0],
            background: colors::BACKGROUND,
            fill: colors::FILL,
            obj_path: None,
            snapshot_path: None,
        }
    }
}

/// Command line problems.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing value for {0}")]
    MissingValue(String),

    #[error("invalid value {value:?} for {flag}")]
    InvalidValue { flag: String, value: String },

    #[error("unknown argument {0:?}")]
    UnknownArgument(String),
}

impl RenderConfig {
    /// Parse `--size WxH`, `--fov DEG`, `--distance D`, `--obj PATH` and
    /// `--snapshot PATH` on top of the defaults.
    pub fn from_args<I, S>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut config = Self::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(flag) = args.next() {
            let mut value = || {
                args.next()
                    .ok_or_else(|| ConfigError::MissingValue(flag.clone()))
            };
            match flag.as_str() {
                "--size" => {
                    let raw = value()?;
                    let (w, h) = raw
                        .split_once('x')
                        .and_then(|(w, h)| Some((w.parse().ok()?, h.parse().ok()?)))
                        .ok_or_else(|| ConfigError::InvalidValue {
                            flag: flag.clone(),
                            value: raw.clone(),
                        })?;
                    config.set_size(w, h);
                }
                "--fov" => {
                    let fov = parse_number(&flag, value()?)?;
                    config.set_fov_degrees(fov);
                }
                "--distance" => {
                    let distance = parse_number(&flag, value()?)?;
                    config.set_distance(distance);
                }
                "--obj" => {
                    config.set_obj_path(value()?);
                }
                "--snapshot" => {
                    config.set_snapshot_path(value()?);
                }
                other => return Err(ConfigError::UnknownArgument(other.to_string())),
            }
        }

        Ok(config)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn set_size(&mut self, width: u32, height: u32) -> &mut Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn fov_degrees(&self) -> f32 {
        self.fov_degrees
    }

    pub fn set_fov_degrees(&mut self, fov_degrees: f32) -> &mut Self {
        self.fov_degrees = fov_degrees;
        self
    }

    pub fn set_planes(&mut self, near: f32, far: f32) -> &mut Self {
        self.near = near;
        self.far = far;
        self
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    pub fn set_distance(&mut self, distance: f32) -> &mut Self {
        self.distance = distance;
        self
    }

    pub fn spin(&self) -> [f32; 3] {
        self.spin
    }

    pub fn set_spin(&mut self, spin: [f32; 3]) -> &mut Self {
        self.spin = spin;
        self
    }

    pub fn background(&self) -> u32 {
        self.background
    }

    pub fn fill(&self) -> u32 {
        self.fill
    }

    pub fn set_colors(&mut self, background: u32, fill: u32) -> &mut Self {
        self.background = background;
        self.fill = fill;
        self
    }

    pub fn obj_path(&self) -> Option<&PathBuf> {
        self.obj_path.as_ref()
    }

    pub fn set_obj_path(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.obj_path = Some(path.into());
        self
    }

    pub fn snapshot_path(&self) -> Option<&PathBuf> {
        self.snapshot_path.as_ref()
    }

    pub fn set_snapshot_path(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.snapshot_path = Some(path.into());
        self
    }

    pub fn projection(&self) -> Projection {
        Projection::new(self.near, self.far, self.fov_degrees)
    }
}

fn parse_number(flag: &str, raw: String) -> Result<f32, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidValue {
        flag: flag.to_string(),
        value: raw,
    })
}
