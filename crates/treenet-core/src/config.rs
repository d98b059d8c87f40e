//! Builder configuration.
//!
//! Configuration can come from:
//! 1. A YAML file
//! 2. Environment variables (with the `TREENET_` prefix)
//!
//! Precedence (highest to lowest): environment, file, defaults.
//!
//! ```yaml
//! complex_struct: false
//! rotation: ry
//! entangler: cx
//! parameter_prefix: theta
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;
use treenet_ir::{ParameterExpression, StandardGate};

/// Axis of the single-qubit rotations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RotationAxis {
    /// `rx`
    #[serde(rename = "rx", alias = "x")]
    X,
    /// `ry`
    #[default]
    #[serde(rename = "ry", alias = "y")]
    Y,
    /// `rz`
    #[serde(rename = "rz", alias = "z")]
    Z,
}

impl RotationAxis {
    /// The rotation gate about this axis.
    pub fn gate(self, theta: impl Into<ParameterExpression>) -> StandardGate {
        match self {
            RotationAxis::X => StandardGate::Rx(theta.into()),
            RotationAxis::Y => StandardGate::Ry(theta.into()),
            RotationAxis::Z => StandardGate::Rz(theta.into()),
        }
    }
}

impl FromStr for RotationAxis {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rx" | "x" => Ok(RotationAxis::X),
            "ry" | "y" => Ok(RotationAxis::Y),
            "rz" | "z" => Ok(RotationAxis::Z),
            _ => Err(ConfigError::InvalidValue {
                key: "rotation".into(),
                value: s.into(),
            }),
        }
    }
}

impl fmt::Display for RotationAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RotationAxis::X => "rx",
            RotationAxis::Y => "ry",
            RotationAxis::Z => "rz",
        };
        f.write_str(name)
    }
}

/// Two-qubit entangling operation of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Entangler {
    /// Controlled-X.
    #[default]
    Cx,
    /// Controlled-Z.
    Cz,
}

impl Entangler {
    /// The entangling gate.
    pub fn gate(self) -> StandardGate {
        match self {
            Entangler::Cx => StandardGate::CX,
            Entangler::Cz => StandardGate::CZ,
        }
    }
}

impl FromStr for Entangler {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cx" | "cnot" => Ok(Entangler::Cx),
            "cz" => Ok(Entangler::Cz),
            _ => Err(ConfigError::InvalidValue {
                key: "entangler".into(),
                value: s.into(),
            }),
        }
    }
}

impl fmt::Display for Entangler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Entangler::Cx => "cx",
            Entangler::Cz => "cz",
        })
    }
}

/// TTN builder configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TtnConfig {
    /// Select the complex-rotation variant (not implemented).
    #[serde(default)]
    pub complex_struct: bool,

    /// Rotation gate used inside blocks and for the final rotation.
    #[serde(default)]
    pub rotation: RotationAxis,

    /// Entangling gate used inside blocks.
    #[serde(default)]
    pub entangler: Entangler,

    /// Name of the trainable parameter vector.
    #[serde(default = "default_parameter_prefix")]
    pub parameter_prefix: String,
}

/// Names that clash with the emitted registers or with OpenQASM 3
/// keywords and builtins.
const RESERVED_NAMES: &[&str] = &[
    // registers
    "q", "c",
    // keywords and types
    "OPENQASM", "include", "defcalgrammar", "def", "cal", "defcal", "gate", "opaque", "extern",
    "box", "let", "break", "continue", "if", "else", "end", "return", "for", "while", "in",
    "switch", "case", "default", "input", "output", "const", "readonly", "mutable", "qreg",
    "qubit", "creg", "bool", "bit", "int", "uint", "float", "angle", "complex", "array", "void",
    "duration", "stretch", "gphase", "inv", "pow", "ctrl", "negctrl", "durationof", "delay",
    "reset", "measure", "barrier", "true", "false",
    // constants and functions
    "pi", "tau", "euler", "im", "dt", "ns", "us", "ms", "s", "arccos", "arcsin", "arctan",
    "ceiling", "cos", "exp", "floor", "log", "mod", "popcount", "real", "imag", "rotl",
    "rotr", "sin", "sizeof", "sqrt", "tan",
    // standard gates
    "U", "CX", "u", "u1", "u2", "u3", "p", "phase", "id", "x", "y", "z", "h", "sdg", "t",
    "tdg", "sx", "rx", "ry", "rz", "cx", "cy", "cz", "cp", "cphase", "crx", "cry", "crz", "ch",
    "cu", "swap", "ccx", "cswap",
];

fn default_parameter_prefix() -> String {
    "theta".to_string()
}

impl Default for TtnConfig {
    fn default() -> Self {
        TtnConfig {
            complex_struct: false,
            rotation: RotationAxis::default(),
            entangler: Entangler::default(),
            parameter_prefix: default_parameter_prefix(),
        }
    }
}

impl TtnConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::Io(format!("{}: {e}", path.as_ref().display())))?;

        Self::from_yaml(&contents)
    }

    /// Parse configuration from YAML text.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: TtnConfig =
            serde_yaml_ng::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = TtnConfig::default();
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Load a file if one is given (defaults otherwise), then apply
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => TtnConfig::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `TREENET_*` overrides looked up through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("TREENET_COMPLEX_STRUCT") {
            self.complex_struct = parse_bool("complex_struct", &value)?;
        }
        if let Some(value) = lookup("TREENET_ROTATION") {
            self.rotation = value.parse()?;
        }
        if let Some(value) = lookup("TREENET_ENTANGLER") {
            self.entangler = value.parse()?;
        }
        if let Some(value) = lookup("TREENET_PARAMETER_PREFIX") {
            self.parameter_prefix = value;
        }
        Ok(())
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut chars = self.parameter_prefix.chars();
        let valid_start = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
        if !valid_start || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(ConfigError::Validation(format!(
                "parameter_prefix '{}' must be an identifier",
                self.parameter_prefix
            )));
        }
        if RESERVED_NAMES.contains(&self.parameter_prefix.as_str()) {
            return Err(ConfigError::Validation(format!(
                "parameter_prefix '{}' is a reserved OpenQASM name",
                self.parameter_prefix
            )));
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key: key.into(),
            value: value.into(),
        }),
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(String),

    /// The configuration file is not valid YAML for [`TtnConfig`].
    #[error("Parse error: {0}")]
    Parse(String),

    /// An override carries an unrecognised value.
    #[error("Invalid value '{value}' for '{key}'")]
    InvalidValue {
        /// Configuration key.
        key: String,
        /// Rejected value.
        value: String,
    },

    /// A value failed validation.
    #[error("Validation error: {0}")]
    Validation(String),
}
