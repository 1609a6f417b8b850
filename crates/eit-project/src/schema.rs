//! Simulation configuration schema.
//!
//! Every section and field except `version` and `name` has a default, so a
//! minimal file is just:
//!
//! ```yaml
//! version: 1
//! name: phantom
//! ```

use serde::{Deserialize, Serialize};

pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimulationConfig {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub mesh: MeshDef,
    #[serde(default)]
    pub excitation: ExcitationDef,
    #[serde(default)]
    pub solver: SolverDef,
}

impl SimulationConfig {
    /// A config with every section at its defaults.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            version: LATEST_VERSION,
            name: name.into(),
            mesh: MeshDef::default(),
            excitation: ExcitationDef::default(),
            solver: SolverDef::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MeshDef {
    /// Mask radius in cells; half the grid's column count when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default = "default_min_resistance")]
    pub min_resistance: f64,
    #[serde(default = "default_max_resistance")]
    pub max_resistance: f64,
    /// Grid samples are floored to this value before meshing.
    #[serde(default = "default_min_intensity")]
    pub min_intensity: f64,
}

impl Default for MeshDef {
    fn default() -> Self {
        Self {
            radius: None,
            min_resistance: default_min_resistance(),
            max_resistance: default_max_resistance(),
            min_intensity: default_min_intensity(),
        }
    }
}

impl MeshDef {
    /// Radius to use for a grid with `cols` columns.
    pub fn radius_for(&self, cols: usize) -> f64 {
        self.radius.unwrap_or(cols as f64 / 2.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExcitationDef {
    #[serde(default = "default_reference_voltage")]
    pub reference_voltage: f64,
    #[serde(default)]
    pub selection: BoundarySelectionDef,
}

impl Default for ExcitationDef {
    fn default() -> Self {
        Self {
            reference_voltage: default_reference_voltage(),
            selection: BoundarySelectionDef::default(),
        }
    }
}

/// How the ground/reference pair is chosen among boundary nodes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(tag = "type")]
pub enum BoundarySelectionDef {
    /// Reference is the first boundary node, ground the one halfway down the
    /// boundary list.
    MidpointIndex,
    /// Reference is the first boundary node, ground the boundary node
    /// farthest from it.
    #[default]
    Farthest,
    /// Caller-chosen node ids.
    Explicit { ground: u32, reference: u32 },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SolverMethodDef {
    #[default]
    Direct,
    ConjugateGradient,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SolverDef {
    #[serde(default)]
    pub method: SolverMethodDef,
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// Wall-clock budget for the whole run, in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_s: Option<f64>,
}

impl Default for SolverDef {
    fn default() -> Self {
        Self {
            method: SolverMethodDef::default(),
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
            timeout_s: None,
        }
    }
}

fn default_min_resistance() -> f64 {
    0.5
}

fn default_max_resistance() -> f64 {
    1000.0
}

fn default_min_intensity() -> f64 {
    1.0
}

fn default_reference_voltage() -> f64 {
    1.0
}

fn default_tolerance() -> f64 {
    1e-9
}

fn default_max_iterations() -> usize {
    10_000
}
