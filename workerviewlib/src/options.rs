//! Options that control how tables are built and drawn.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Default maximum rendered table width, in columns.
pub const DEFAULT_MAX_WIDTH: u16 = 150;

/// Unit system for memory sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ByteUnits {
    /// Powers of 1000: kB, MB, GB
    #[default]
    Decimal,
    /// Powers of 1024: KiB, MiB, GiB
    Binary,
}

/// When to emit terminal colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorMode {
    /// Follow the terminal (respects `NO_COLOR`, `CLICOLOR_FORCE`)
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve `Auto` against the current terminal
    pub fn enabled(self) -> bool {
        match self {
            ColorMode::Auto => console::colors_enabled(),
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(ColorMode::Auto),
            "always" => Ok(ColorMode::Always),
            "never" => Ok(ColorMode::Never),
            _ => Err(format!("Unknown color mode: {}", s)),
        }
    }
}

/// Output format for the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    /// Drawn terminal table
    #[default]
    Table,
    /// Table data as JSON
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown output format: {}", s)),
        }
    }
}

/// Options for table builders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Unit system for the memory column
    pub byte_units: ByteUnits,
    /// Maximum rendered width in columns
    pub max_width: u16,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderOptions {
    /// Decimal units, 150 columns
    pub fn new() -> Self {
        Self {
            byte_units: ByteUnits::Decimal,
            max_width: DEFAULT_MAX_WIDTH,
        }
    }

    /// Builder: set the unit system for memory sizes
    pub fn byte_units(mut self, units: ByteUnits) -> Self {
        self.byte_units = units;
        self
    }

    /// Builder: set the maximum table width
    pub fn max_width(mut self, width: u16) -> Self {
        self.max_width = width;
        self
    }
}
