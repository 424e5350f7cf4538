use gp_input::*;

fn minimal_config() -> RunConfig {
    RunConfig {
        name: "Roundtrip".to_string(),
        cylinder_count: 2,
        cylinders: vec![
            CylinderDef {
                name: "C1".to_string(),
                center_x: 0.0,
                x_min: Some(-45.0),
                x_max: Some(45.0),
            },
            CylinderDef {
                name: "C2".to_string(),
                center_x: 90.0,
                x_min: Some(45.0),
                x_max: Some(135.0),
            },
        ],
        bore_center_y: 0.0,
        initial_assembly_step: 1,
        hot_assembly_step: 2,
        fixed_steps: vec![3],
        firing_names: vec!["Full load".to_string()],
        relative_motion: true,
        fatigue_criteria: default_fatigue_criteria(),
        materials: vec![MaterialDef {
            name: "BEAD".to_string(),
            density: Some(7.85e-9),
            expansion: vec![[1.2e-5, 20.0]],
            behavior: MaterialBehaviorDef::Gasket {
                loading: vec![[0.0, 0.0], [100.0, 0.1]],
                unloading: vec![vec![[100.0, 0.1], [0.0, 0.08]]],
                membrane_modulus: None,
                transverse_modulus: None,
            },
        }],
        sections: vec![SectionDef {
            name: "GASKET_BEAD".to_string(),
            kind: SectionKind::Gasket,
            material: "BEAD".to_string(),
            thickness: Some(0.25),
            fatigue: None,
        }],
        report_sets: vec!["BEAD".to_string()],
        fatigue_sets: vec![],
        added_element_sets: vec![LabelListSetDef {
            name: "EXTRA".to_string(),
            labels: "9001, 9002".to_string(),
        }],
        bore: Some(BoreConfig {
            mode: BoreModeDef::Automatic {
                points: 36,
                layers: 3,
                z_start: -1.0,
                z_end: -10.0,
                region: Some("BLOCK_BORE".to_string()),
            },
            radius: 40.0,
            order: None,
            unique_center: true,
            report_steps: vec![],
        }),
        cam: None,
        bolt_nodes: vec![501, 502],
        limits: Limits::default(),
    }
}

#[test]
fn roundtrip_yaml_config() {
    let config = minimal_config();
    validate_config(&config).unwrap();

    let path = std::env::temp_dir().join("gp_input_roundtrip_config.yaml");
    save_config(&path, &config).unwrap();
    let loaded = load_config(&path).unwrap();

    assert_eq!(config, loaded);
}

#[test]
fn roundtrip_json_dataset() {
    let dataset = ResultDataset {
        steps: vec!["A".to_string(), "B".to_string()],
        nodes: vec![NodeRecord {
            label: 1,
            coord: [0.0, 1.0, 2.0],
            displacements: vec![[0.0; 3], [0.1, 0.0, 0.0]],
            relative: vec![],
        }],
        bolt_forces: vec![BoltForceRecord {
            node: 501,
            values: vec![30_000.0, 29_500.0],
        }],
        free_body_report: Some("Step = A\nResultant force = 0 0 12.5\n".to_string()),
        ..ResultDataset::default()
    };

    let path = std::env::temp_dir().join("gp_input_roundtrip_dataset.json");
    save_dataset(&path, &dataset).unwrap();
    let loaded = load_dataset(&path).unwrap();

    assert_eq!(dataset, loaded);
}

#[test]
fn yaml_defaults_fill_limits_and_criteria() {
    let text = r#"
name: defaults
cylinder_count: 1
cylinders:
  - name: C1
    center_x: 0.0
initial_assembly_step: 1
hot_assembly_step: 2
fixed_steps: [3]
"#;
    let config: RunConfig = serde_yaml::from_str(text).unwrap();
    assert!(config.relative_motion);
    assert_eq!(config.fatigue_criteria.len(), 5);
    assert_eq!(config.limits.fourier_order, 12);
    assert_eq!(config.limits.safe_factor, 3.0);
    assert_eq!(config.cycle_name(0), "Cycle_1");
    assert_eq!(config.fixed_step_indices(), vec![2]);
}
