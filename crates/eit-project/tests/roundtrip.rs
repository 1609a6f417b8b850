use eit_core::ErrorKind;
use eit_project::schema::*;
use eit_project::{load, load_json, load_yaml, save_json, save_yaml, validate_config};

fn full_config() -> SimulationConfig {
    SimulationConfig {
        version: 1,
        name: "Chest phantom".to_string(),
        mesh: MeshDef {
            radius: Some(3.5),
            min_resistance: 0.5,
            max_resistance: 1000.0,
            min_intensity: 1.0,
        },
        excitation: ExcitationDef {
            reference_voltage: 12.0,
            selection: BoundarySelectionDef::Explicit {
                ground: 7,
                reference: 0,
            },
        },
        solver: SolverDef {
            method: SolverMethodDef::ConjugateGradient,
            tolerance: 1e-10,
            max_iterations: 500,
            timeout_s: Some(2.5),
        },
    }
}

#[test]
fn roundtrip_yaml_full_config() {
    let config = full_config();
    validate_config(&config).unwrap();

    let path = std::env::temp_dir().join("eit_project_roundtrip_full.yaml");
    save_yaml(&path, &config).unwrap();
    let loaded = load_yaml(&path).unwrap();
    assert_eq!(config, loaded);

    let dispatched = load(&path).unwrap();
    assert_eq!(config, dispatched);
}

#[test]
fn roundtrip_json_defaults() {
    let config = SimulationConfig::new("defaults");

    let path = std::env::temp_dir().join("eit_project_roundtrip_defaults.json");
    save_json(&path, &config).unwrap();
    let loaded = load_json(&path).unwrap();
    assert_eq!(config, loaded);
    assert_eq!(load(&path).unwrap(), config);
}

#[test]
fn minimal_yaml_fills_defaults() {
    let config: SimulationConfig = serde_yaml::from_str("version: 1\nname: minimal\n").unwrap();
    assert_eq!(config, SimulationConfig::new("minimal"));
    assert_eq!(config.mesh.radius_for(8), 4.0);
    assert_eq!(config.mesh.radius_for(7), 3.5);
    assert_eq!(config.excitation.selection, BoundarySelectionDef::Farthest);
    assert_eq!(config.solver.method, SolverMethodDef::Direct);
}

#[test]
fn tagged_selection_and_method_names() {
    let yaml = "\
version: 1
name: tagged
excitation:
  selection:
    type: MidpointIndex
solver:
  method: conjugate_gradient
";
    let config: SimulationConfig = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.excitation.selection, BoundarySelectionDef::MidpointIndex);
    assert_eq!(config.excitation.reference_voltage, 1.0);
    assert_eq!(config.solver.method, SolverMethodDef::ConjugateGradient);
    assert_eq!(config.solver.max_iterations, 10_000);
}

#[test]
fn invalid_file_is_config_error() {
    let path = std::env::temp_dir().join("eit_project_invalid.yaml");
    std::fs::write(&path, "version: 1\nname: bad\nsolver:\n  tolerance: -1.0\n").unwrap();
    let err = load_yaml(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);

    std::fs::write(&path, "version: [not a number]\n").unwrap();
    assert_eq!(load_yaml(&path).unwrap_err().kind(), ErrorKind::Config);

    let missing = std::env::temp_dir().join("eit_project_does_not_exist.yaml");
    assert_eq!(load(&missing).unwrap_err().kind(), ErrorKind::Io);
}

#[test]
fn save_refuses_invalid_config() {
    let mut config = SimulationConfig::new("bad");
    config.mesh.radius = Some(f64::NAN);
    let path = std::env::temp_dir().join("eit_project_never_written.yaml");
    assert!(save_yaml(&path, &config).is_err());
}
