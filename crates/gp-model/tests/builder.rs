//! Model construction against an in-memory result dataset.

use gp_input::{
    CylinderDef, ElementRecord, FatigueTableDef, LabelListSetDef, Limits, MaterialBehaviorDef,
    MaterialDef, NamedLabelSet, NodalSampleRecord, NodeRecord, ResultDataset, RunConfig,
    SectionDef, SectionKind, default_fatigue_criteria,
};
use gp_model::{InMemoryProvider, ModelBuilder, ModelError};

fn config() -> RunConfig {
    RunConfig {
        name: "unit".to_string(),
        cylinder_count: 1,
        cylinders: vec![CylinderDef {
            name: "C1".to_string(),
            center_x: 0.0,
            x_min: None,
            x_max: None,
        }],
        bore_center_y: 0.0,
        initial_assembly_step: 1,
        hot_assembly_step: 1,
        fixed_steps: vec![2],
        firing_names: vec![],
        relative_motion: true,
        fatigue_criteria: default_fatigue_criteria(),
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
            thickness: Some(0.25),
            fatigue: Some(FatigueTableDef {
                loads: vec![100.0, 200.0],
                ratios: vec![0.0, 0.5],
                values: vec![vec![vec![1.0; 5]; 2]; 2],
            }),
        }],
        report_sets: vec!["BEAD".to_string()],
        fatigue_sets: vec![],
        added_element_sets: vec![],
        bore: None,
        cam: None,
        bolt_nodes: vec![],
        limits: Limits::default(),
    }
}

fn node(label: u64, x: f64, y: f64) -> NodeRecord {
    NodeRecord {
        label,
        coord: [x, y, 0.0],
        displacements: vec![[0.0; 3], [0.0, 0.0, 0.01]],
        relative: vec![[0.0; 4], [1.0, 2.0, 0.1, 0.2]],
    }
}

fn dataset() -> ResultDataset {
    let samples = |nodes: &[u64]| {
        nodes
            .iter()
            .map(|&n| NodalSampleRecord {
                node: n,
                values: vec![[-50.0, -0.01], [-40.0, -0.008]],
            })
            .collect()
    };
    ResultDataset {
        steps: vec!["ASSEMBLY".to_string(), "FIRE_1".to_string()],
        nodes: vec![
            node(1, 0.0, 0.0),
            node(2, 1.0, 0.0),
            node(3, 1.0, 1.0),
            node(4, 0.0, 1.0),
            node(5, 2.0, 0.0),
        ],
        elements: vec![
            ElementRecord {
                label: 10,
                connectivity: vec![1, 2, 3, 4],
                section: "GASKET_BEAD".to_string(),
                samples: samples(&[1, 2, 3, 4]),
            },
            ElementRecord {
                label: 11,
                connectivity: vec![2, 5, 3],
                section: "GASKET_BEAD".to_string(),
                samples: samples(&[2, 5]),
            },
        ],
        element_sets: vec![NamedLabelSet {
            name: "BEAD".to_string(),
            labels: vec![10, 11],
        }],
        ..ResultDataset::default()
    }
}

#[test]
fn shared_nodes_are_created_once() {
    let cfg = config();
    let provider = InMemoryProvider::new(dataset());
    let (model, _) = ModelBuilder::new(&cfg).build(&provider).unwrap();

    assert_eq!(model.elements().len(), 2);
    assert_eq!(model.nodes().len(), 5);
    let e = model.element_by_label(11).unwrap();
    let labels: Vec<u64> = model.element_nodes(e).map(|n| n.label).collect();
    assert_eq!(labels, vec![2, 5, 3]);
    assert_eq!(model.node_by_label(3).unwrap().step_count(), 2);
    assert_eq!(model.node_by_label(3).unwrap().relative()[1].cslip2, 0.2);
}

#[test]
fn gasket_material_carries_its_fatigue_table() {
    let cfg = config();
    let provider = InMemoryProvider::new(dataset());
    let (model, _) = ModelBuilder::new(&cfg).build(&provider).unwrap();

    let e = model.element_by_label(10).unwrap();
    let fatigue = model.element_material(e).and_then(|m| m.fatigue()).unwrap();
    assert_eq!(fatigue.criteria_count(), 5);
    assert_eq!(model.fatigue_elements().len(), 2);
}

#[test]
fn missing_samples_are_reported_not_fatal() {
    let cfg = config();
    let provider = InMemoryProvider::new(dataset());
    let (model, issues) = ModelBuilder::new(&cfg).build(&provider).unwrap();

    // element 11 has no sample at node 3
    assert_eq!(issues.len(), 2);
    let e = model.element_by_label(11).unwrap();
    assert!(e.s11_series(2).iter().all(|v| v.is_nan()));
    assert_eq!(e.s11_series(0), vec![-50.0, -40.0]);
}

#[test]
fn bad_label_list_is_skipped() {
    let mut cfg = config();
    cfg.added_element_sets = vec![
        LabelListSetDef {
            name: "EXTRA".to_string(),
            labels: "10, x".to_string(),
        },
        LabelListSetDef {
            name: "ONE".to_string(),
            labels: "11".to_string(),
        },
    ];
    let provider = InMemoryProvider::new(dataset());
    let (model, issues) = ModelBuilder::new(&cfg).build(&provider).unwrap();

    assert!(issues.iter().any(|i| i.context == "EXTRA"));
    assert!(model.element_sets().contains_key("ONE"));
    assert!(!model.element_sets().contains_key("EXTRA"));
}

#[test]
fn unknown_section_is_fatal() {
    let cfg = config();
    let mut data = dataset();
    data.elements[0].section = "NOPE".to_string();
    let provider = InMemoryProvider::new(data);
    let err = ModelBuilder::new(&cfg).build(&provider).unwrap_err();
    assert_eq!(
        err,
        ModelError::UnknownSection {
            element: 10,
            section: "NOPE".to_string()
        }
    );
}

#[test]
fn no_elements_is_fatal() {
    let mut cfg = config();
    cfg.report_sets = vec!["MISSING".to_string()];
    let provider = InMemoryProvider::new(dataset());
    let err = ModelBuilder::new(&cfg).build(&provider).unwrap_err();
    assert_eq!(err, ModelError::NoElements);
}

#[test]
fn fatigue_set_alone_selects_its_elements() {
    let mut cfg = config();
    cfg.report_sets = vec![];
    cfg.fatigue_sets = vec!["BEAD".to_string()];
    let provider = InMemoryProvider::new(dataset());
    let (model, issues) = ModelBuilder::new(&cfg).build(&provider).unwrap();

    assert!(!model.element_sets().contains_key("ALL"));
    assert_eq!(model.elements().len(), 2);
    assert_eq!(model.fatigue_elements().len(), 2);
    assert!(issues.iter().all(|i| i.context != "BEAD"));
}

#[test]
fn fatigue_set_adds_elements_beyond_report_sets() {
    let mut cfg = config();
    cfg.report_sets = vec!["FB".to_string()];
    cfg.fatigue_sets = vec!["BEAD".to_string()];
    let mut data = dataset();
    data.element_sets.push(NamedLabelSet {
        name: "FB".to_string(),
        labels: vec![10],
    });
    let provider = InMemoryProvider::new(data);
    let (model, _) = ModelBuilder::new(&cfg).build(&provider).unwrap();

    assert_eq!(model.elements().len(), 2);
    assert!(model.element_by_label(11).is_ok());
    assert_eq!(model.element_sets()["FB"].len(), 1);
    assert_eq!(model.fatigue_elements().len(), 2);
}

#[test]
fn unknown_fatigue_set_is_an_issue() {
    let mut cfg = config();
    cfg.fatigue_sets = vec!["NOPE".to_string()];
    let provider = InMemoryProvider::new(dataset());
    let (model, issues) = ModelBuilder::new(&cfg).build(&provider).unwrap();

    assert_eq!(model.elements().len(), 2);
    assert!(model.fatigue_elements().is_empty());
    assert_eq!(issues.iter().filter(|i| i.context == "NOPE").count(), 1);
}

#[test]
fn node_without_contact_output_keeps_no_relative_series() {
    let cfg = config();
    let mut data = dataset();
    data.nodes[4].relative.clear();
    let provider = InMemoryProvider::new(data);
    let (model, issues) = ModelBuilder::new(&cfg).build(&provider).unwrap();

    assert!(!model.node_by_label(5).unwrap().has_relative());
    assert_eq!(model.node_by_label(2).unwrap().relative().len(), 2);
    // only the two missing stress samples of element 11
    assert_eq!(issues.len(), 2);
}
