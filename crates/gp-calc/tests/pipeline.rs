//! Geometry, relative motion, fatigue and summaries over one small model.

use gp_calc::{
    FatigueStatus, build_summaries, check_stress_ratio, compute_geometry, compute_relative,
    evaluate_fatigue,
};
use gp_input::{
    CylinderDef, ElementRecord, FatigueTableDef, Limits, MaterialBehaviorDef, MaterialDef,
    NodalSampleRecord, NodeRecord, ResultDataset, RunConfig, SectionDef, SectionKind,
};
use gp_model::{InMemoryProvider, Model, ModelBuilder};

fn config(with_table: bool) -> RunConfig {
    RunConfig {
        name: "pipeline".to_string(),
        cylinder_count: 1,
        cylinders: vec![CylinderDef {
            name: "C1".to_string(),
            center_x: 0.0,
            x_min: None,
            x_max: None,
        }],
        bore_center_y: 0.0,
        initial_assembly_step: 1,
        hot_assembly_step: 2,
        fixed_steps: vec![3],
        firing_names: vec!["Rated power".to_string()],
        relative_motion: true,
        fatigue_criteria: vec!["A".to_string()],
        materials: vec![MaterialDef {
            name: "BEAD".to_string(),
            density: None,
            expansion: vec![],
            behavior: MaterialBehaviorDef::Gasket {
                loading: vec![],
                unloading: vec![],
                membrane_modulus: None,
                transverse_modulus: None,
            },
        }],
        sections: vec![SectionDef {
            name: "GASKET_BEAD".to_string(),
            kind: SectionKind::Gasket,
            material: "BEAD".to_string(),
            thickness: None,
            fatigue: with_table.then(|| FatigueTableDef {
                loads: vec![100.0, 200.0],
                ratios: vec![0.0, 0.5],
                values: vec![vec![vec![1.0], vec![2.0]], vec![vec![3.0], vec![4.0]]],
            }),
        }],
        report_sets: vec![],
        fatigue_sets: vec![],
        added_element_sets: vec![],
        bore: None,
        cam: None,
        bolt_nodes: vec![],
        limits: Limits::default(),
    }
}

fn dataset() -> ResultDataset {
    let coords = [
        [10.0, 0.0, 0.0],
        [11.0, 0.0, 0.0],
        [11.0, 1.0, 0.0],
        [10.0, 1.0, 0.0],
    ];
    let nodes = coords
        .iter()
        .enumerate()
        .map(|(i, &coord)| NodeRecord {
            label: i as u64 + 1,
            coord,
            displacements: vec![[0.0; 3]; 4],
            relative: vec![
                [0.0, 0.0, 0.0, 0.0],
                [10.0, 0.0, 0.001, 0.0],
                [10.0, 0.0, 0.002, 0.0],
                [10.0, 0.0, 0.005, 0.0],
            ],
        })
        .collect();
    let samples = (1..=4)
        .map(|node| NodalSampleRecord {
            node,
            values: vec![[120.0, 0.0], [110.0, 0.0], [100.0, 0.001], [80.0, 0.003]],
        })
        .collect();
    ResultDataset {
        steps: ["ASSEMBLY", "HOT", "FIRE_A", "FIRE_B"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        nodes,
        elements: vec![ElementRecord {
            label: 100,
            connectivity: vec![1, 2, 3, 4],
            section: "GASKET_BEAD".to_string(),
            samples,
        }],
        ..ResultDataset::default()
    }
}

fn build(config: &RunConfig) -> Model {
    let provider = InMemoryProvider::new(dataset());
    let (model, issues) = ModelBuilder::new(config).build(&provider).unwrap();
    assert!(issues.is_empty());
    model
}

#[test]
fn node_summary_matches_hand_calculation() {
    let cfg = config(true);
    let model = build(&cfg);

    let geometry = compute_geometry(&model, &cfg).unwrap();
    assert!((geometry[0].width - 1.0).abs() < 1e-12);
    assert!(geometry[0].angle_deg > 0.0 && geometry[0].angle_deg < 90.0);

    let relative = compute_relative(&model, &cfg);
    let fatigue = evaluate_fatigue(&model, &cfg);
    assert_eq!(fatigue[0].status, FatigueStatus::Succeed);

    let summaries = build_summaries(&model, &geometry, &relative, &fatigue, &cfg);
    assert_eq!(summaries.len(), 4);
    let s = &summaries[0];
    assert!((s.assembly_line_load - 120.0).abs() < 1e-9);
    assert!((s.hot_line_load - 110.0).abs() < 1e-9);
    assert!((s.thermal_motion.unwrap() - 1.0).abs() < 1e-9);

    let c = &s.cycles[0];
    assert_eq!(c.name, "Rated power");
    assert!((c.line_load_range - 20.0).abs() < 1e-9);
    assert!((c.head_lift_um - 2.0).abs() < 1e-9);
    // allowable 1 + (1/6)/0.5 at fix load 100, unload ratio 0.2
    assert!((c.safety[0] - (4.0 / 3.0) / 0.2).abs() < 1e-9);
    assert!((c.wear - 30.0).abs() < 1e-9);
    assert!((s.wear - 30.0).abs() < 1e-9);
}

#[test]
fn material_without_table_is_abandoned() {
    let cfg = config(false);
    let model = build(&cfg);
    let fatigue = evaluate_fatigue(&model, &cfg);
    assert_eq!(fatigue[0].status, FatigueStatus::Abandon);
    assert!(fatigue[0].nodes.iter().all(|n| n.cycles.is_empty()));
}

#[test]
fn uniform_stress_raises_no_warning() {
    let cfg = config(true);
    let model = build(&cfg);
    assert!(check_stress_ratio(&model, cfg.limits.stress_differ_ratio).is_empty());
    assert_eq!(check_stress_ratio(&model, 0.5).len(), 4);
}

#[test]
fn unloaded_node_is_flagged() {
    let cfg = config(true);
    let mut data = dataset();
    for v in &mut data.elements[0].samples[0].values {
        v[0] = 0.0;
    }
    let provider = InMemoryProvider::new(data);
    let (model, _) = ModelBuilder::new(&cfg).build(&provider).unwrap();

    let warnings = check_stress_ratio(&model, cfg.limits.stress_differ_ratio);
    assert_eq!(warnings.len(), 4);
    assert!(warnings.iter().all(|w| w.element == 100 && w.ratio.is_finite()));
}
