//! Demo data, optionally loaded from a TOML file.
//!
//! Every field has a default matching the lessons' built-in data, so an empty
//! file (or no file at all) reproduces the stock output.
//!
//! ```toml
//! [format]
//! student_name = "Ming"
//! items = [{ name = "Tea", price = 3.2 }]
//!
//! [span]
//! squad = [10, 20, 30, 40, 50, 60]
//! red = [1.0, 0.2, 0.2]
//! ```

use std::fs;
use std::path::Path;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info};

use crate::error::ConfigError;
use crate::model::{Item, Point};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DemoConfig {
    pub format: FormatConfig,
    pub span: SpanConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FormatConfig {
    pub student_name: String,
    pub score: i64,
    pub name_width: usize,
    pub price_width: usize,
    pub price_precision: usize,
    pub items: Vec<Item>,
    pub point: Point,
    pub number: i64,
    pub player: String,
    pub level: i64,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            student_name: "Xiao Ming".to_string(),
            score: 95,
            name_width: 12,
            price_width: 10,
            price_precision: 2,
            items: vec![
                Item::new("Apple", 5.0),
                Item::new("Banana", 2.5),
                Item::new("Berry cake", 25.8),
            ],
            point: Point::new(10, 20),
            number: 42,
            player: "Alex".to_string(),
            level: 99,
        }
    }
}

/// Storage for the view lesson. Fixed-size fields keep their length in the
/// type, so a TOML list of the wrong length fails to deserialize.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpanConfig {
    pub elite: Vec<i32>,
    #[serde(deserialize_with = "exact_length")]
    pub guard: [i32; 4],
    pub veteran: Vec<i32>,
    pub squad: Vec<i32>,
    #[serde(deserialize_with = "exact_length")]
    pub red: [f32; 3],
    #[serde(deserialize_with = "exact_length")]
    pub blue: [f32; 3],
    pub safe_data: Vec<i32>,
}

impl Default for SpanConfig {
    fn default() -> Self {
        Self {
            elite: vec![1, 2, 3],
            guard: [4, 5, 6, 7],
            veteran: vec![8, 9],
            squad: vec![1, 2, 3, 4, 5],
            red: [1.0, 0.0, 0.0],
            blue: [0.0, 0.0, 1.0],
            safe_data: vec![7, 7, 7],
        }
    }
}

/// Reads a list into `[T; N]`, rejecting any other length instead of
/// truncating it.
fn exact_length<'de, D, T, const N: usize>(deserializer: D) -> Result<[T; N], D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let items = Vec::<T>::deserialize(deserializer)?;
    let len = items.len();
    <[T; N]>::try_from(items)
        .map_err(|_| D::Error::invalid_length(len, &format!("exactly {N} elements").as_str()))
}

impl DemoConfig {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: DemoConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads `path` if given, otherwise returns the built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            debug!("no config file given, using built-in demo data");
            return Ok(Self::default());
        };

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&content)?;
        info!(path = %path.display(), "loaded demo config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let format = &self.format;
        if format.name_width == 0 {
            return Err(ConfigError::invalid("format.name_width", "must be positive"));
        }
        if format.price_width == 0 {
            return Err(ConfigError::invalid("format.price_width", "must be positive"));
        }

        let span = &self.span;
        if span.squad.len() < 4 {
            return Err(ConfigError::invalid(
                "span.squad",
                format!("needs at least 4 elements, got {}", span.squad.len()),
            ));
        }
        if span.safe_data.is_empty() {
            return Err(ConfigError::invalid("span.safe_data", "must not be empty"));
        }
        Ok(())
    }
}
