//! Configuration validation logic.

use crate::schema::{BoundarySelectionDef, LATEST_VERSION, SimulationConfig};

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

fn invalid(field: &str, value: impl ToString, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn require_positive(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(invalid(field, value, "must be finite and > 0"))
    }
}

pub fn validate_config(config: &SimulationConfig) -> Result<(), ValidationError> {
    if config.version == 0 || config.version > LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: config.version,
        });
    }

    let mesh = &config.mesh;
    if let Some(radius) = mesh.radius
        && !(radius.is_finite() && radius >= 0.0)
    {
        return Err(invalid("mesh.radius", radius, "must be finite and >= 0"));
    }
    require_positive("mesh.min_resistance", mesh.min_resistance)?;
    require_positive("mesh.max_resistance", mesh.max_resistance)?;
    if mesh.max_resistance <= mesh.min_resistance {
        return Err(invalid(
            "mesh.max_resistance",
            mesh.max_resistance,
            "must exceed mesh.min_resistance",
        ));
    }
    require_positive("mesh.min_intensity", mesh.min_intensity)?;

    let excitation = &config.excitation;
    if !excitation.reference_voltage.is_finite() {
        return Err(invalid(
            "excitation.reference_voltage",
            excitation.reference_voltage,
            "must be finite",
        ));
    }
    if let BoundarySelectionDef::Explicit { ground, reference } = excitation.selection
        && ground == reference
    {
        return Err(invalid(
            "excitation.selection",
            format!("ground = reference = {ground}"),
            "ground and reference must differ",
        ));
    }

    let solver = &config.solver;
    require_positive("solver.tolerance", solver.tolerance)?;
    if solver.max_iterations == 0 {
        return Err(invalid("solver.max_iterations", 0, "must be at least 1"));
    }
    if let Some(timeout) = solver.timeout_s {
        require_positive("solver.timeout_s", timeout)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(validate_config(&SimulationConfig::new("defaults")).is_ok());
    }

    #[test]
    fn rejects_inverted_resistance_range() {
        let mut config = SimulationConfig::new("bad");
        config.mesh.min_resistance = 10.0;
        config.mesh.max_resistance = 5.0;
        match validate_config(&config) {
            Err(ValidationError::InvalidValue { field, .. }) => {
                assert_eq!(field, "mesh.max_resistance")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn rejects_bad_fields() {
        let cases: [fn(&mut SimulationConfig); 9] = [
            |c| c.version = 0,
            |c| c.version = LATEST_VERSION + 1,
            |c| c.mesh.radius = Some(-1.0),
            |c| c.mesh.min_intensity = 0.0,
            |c| c.excitation.reference_voltage = f64::NAN,
            |c| {
                c.excitation.selection = BoundarySelectionDef::Explicit {
                    ground: 3,
                    reference: 3,
                }
            },
            |c| c.solver.tolerance = 0.0,
            |c| c.solver.max_iterations = 0,
            |c| c.solver.timeout_s = Some(f64::INFINITY),
        ];
        for (i, mutate) in cases.into_iter().enumerate() {
            let mut config = SimulationConfig::new("bad");
            mutate(&mut config);
            assert!(validate_config(&config).is_err(), "case {i} accepted");
        }
    }
}
