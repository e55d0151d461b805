//! This crate provides the palette, tree geometry, and the rest of the configuration for the
//! Evergreen greeting card.
//!
//! The config is stored as RON in `$EVERGREEN_DATA_DIR/config/card.ron`. See
//! [`CardConfig::from_file`] for how a missing or broken file is handled.

mod error;
mod palette;

pub use self::{
    error::ConfigError,
    palette::{linear_rgb, Palette, RGBArray},
};

use serde::{Deserialize, Serialize};
use std::{
    env, fs, io,
    path::{Path, PathBuf},
};
use tracing::{debug, info, instrument, warn};
use tracing_unwrap::ResultExt;

/// The environment variable naming the directory that holds the `config/` folder.
pub const DATA_DIR_VAR: &str = "EVERGREEN_DATA_DIR";

/// The lowest height that an ornament can hang at.
pub const ORNAMENT_MIN_Y: f32 = 0.5;

/// How far below the tip of the tree the highest ornament hangs.
pub const ORNAMENT_TOP_MARGIN: f32 = 1.5;

/// The geometry of the tree cone.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TreeConfig {
    /// The number of visual layers of the tree.
    pub layers: u8,

    /// The height of the cone, from the base to the tip.
    pub height: f32,

    /// The radius of the cone at `y = 0`.
    pub base_radius: f32,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            layers: 6,
            height: 9.,
            base_radius: 3.5,
        }
    }
}

impl TreeConfig {
    /// The radius of the cone at the given height, which shrinks linearly to zero at the tip.
    pub fn radius_at(&self, y: f32) -> f32 {
        self.base_radius * (1. - y / self.height)
    }

    /// The range of heights `(min, max)` that ornaments are placed in, keeping them away from
    /// the tip and the base.
    pub fn ornament_band(&self) -> (f32, f32) {
        (ORNAMENT_MIN_Y, self.height - ORNAMENT_TOP_MARGIN)
    }
}

/// How many of each generated thing to put in the scene.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Populations {
    /// The number of foliage particles.
    pub foliage: usize,

    /// The number of gift boxes.
    pub heavy_ornaments: usize,

    /// The number of baubles.
    pub light_ornaments: usize,

    /// The number of tiny drifting lights around the tree.
    pub sparkles: usize,
}

impl Default for Populations {
    fn default() -> Self {
        Self {
            foliage: 4000,
            heavy_ornaments: 25,
            light_ornaments: 50,
            sparkles: 200,
        }
    }
}

/// The text of the card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Greeting {
    /// The first line of the heading.
    pub title: String,

    /// The second, larger line of the heading.
    pub title_emphasis: String,

    /// The line under the heading.
    pub subtitle: String,

    /// Who the card is for, shown next to the buttons.
    pub recipient: String,
}

impl Default for Greeting {
    fn default() -> Self {
        Self {
            title: "A very Merry".to_string(),
            title_emphasis: "Christmas".to_string(),
            subtitle: "And a happy new year".to_string(),
            recipient: "to huang".to_string(),
        }
    }
}

/// The whole configuration of the card.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CardConfig {
    /// All the colours.
    pub palette: Palette,

    /// The shape of the tree.
    pub tree: TreeConfig,

    /// How many particles and ornaments to generate.
    pub populations: Populations,

    /// The words on the card.
    pub greeting: Greeting,

    /// The auto-rotation speed of the camera, where 1 is one full orbit per minute.
    #[serde(default = "default_auto_rotate_speed")]
    pub auto_rotate_speed: f32,

    /// A seed for the procedural generation. `None` means a new tree every time.
    #[serde(default)]
    pub seed: Option<u64>,
}

/// The default value of [`CardConfig::auto_rotate_speed`].
fn default_auto_rotate_speed() -> f32 {
    0.5
}

impl CardConfig {
    /// The default path of the config file, using [`DATA_DIR_VAR`] if it's set and the current
    /// directory otherwise.
    pub fn default_path() -> PathBuf {
        let data_dir = env::var_os(DATA_DIR_VAR).map_or_else(|| PathBuf::from("."), PathBuf::from);
        data_dir.join("config").join("card.ron")
    }

    /// Check that the config describes a tree that we can actually build.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let TreeConfig {
            height,
            base_radius,
            ..
        } = self.tree;

        if !(height.is_finite() && height > 0.) {
            return Err(ConfigError::InvalidHeight(height));
        }
        if !(base_radius.is_finite() && base_radius > 0.) {
            return Err(ConfigError::InvalidBaseRadius(base_radius));
        }
        if height <= ORNAMENT_MIN_Y + ORNAMENT_TOP_MARGIN {
            return Err(ConfigError::NoOrnamentBand(height));
        }

        Ok(())
    }

    /// Load the config from the given file.
    ///
    /// If the file doesn't exist, then the default config is written to it and returned. If the
    /// file can't be read or parsed, then we warn and return the default without touching the
    /// file. Only a config that parses but fails [`validate`](Self::validate) is an error.
    #[instrument]
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let config = match Self::read_file(path) {
            Ok(config) => config,
            Err(ConfigError::Read { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
                info!("No config file found, writing the default");
                let default = Self::default();
                default.save_to_file(path);
                default
            }
            Err(error) => {
                warn!(%error, "Falling back to the default config");
                Self::default()
            }
        };

        config.validate()?;
        debug!(?config, "Loaded config");
        Ok(config)
    }

    /// Read and parse the given file without any fallback.
    pub fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        ron::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save the config as pretty RON to the given file, creating its parent directory.
    ///
    /// Failing to write is only logged, since the card works fine without the file.
    pub fn save_to_file(&self, path: &Path) {
        if let Some(parent) = path.parent() {
            let _ = fs::DirBuilder::new().recursive(true).create(parent);
        }

        let text = ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default().struct_names(true),
        )
        .expect_or_log("The card config should be serializable");

        if let Err(error) = fs::write(path, text) {
            warn!(%error, ?path, "Unable to save config file");
        }
    }
}
