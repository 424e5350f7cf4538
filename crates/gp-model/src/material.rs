//! Materials and sections.

use crate::fatigue::FatigueData;
use gp_input::{MaterialBehaviorDef, MaterialDef, SectionDef, SectionKind};

/// Density and `[coefficient, temperature]` expansion rows shared by both variants.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ThermalData {
    pub density: Option<f64>,
    pub expansion: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolidMaterial {
    pub name: String,
    pub thermal: ThermalData,
    pub elastic: Vec<[f64; 2]>,
    pub plastic: Vec<[f64; 2]>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GasketMaterial {
    pub name: String,
    pub thermal: ThermalData,
    pub loading: Vec<[f64; 2]>,
    pub unloading: Vec<Vec<[f64; 2]>>,
    pub membrane_modulus: Option<f64>,
    pub transverse_modulus: Option<f64>,
    pub fatigue: Option<FatigueData>,
}

/// A material is either a solid or a gasket, decided by which property set the
/// source data carried.
#[derive(Debug, Clone, PartialEq)]
pub enum Material {
    Solid(SolidMaterial),
    Gasket(GasketMaterial),
}

impl Material {
    pub fn from_def(def: &MaterialDef) -> Self {
        let thermal = ThermalData {
            density: def.density,
            expansion: def.expansion.clone(),
        };
        match &def.behavior {
            MaterialBehaviorDef::Solid { elastic, plastic } => Material::Solid(SolidMaterial {
                name: def.name.clone(),
                thermal,
                elastic: elastic.clone(),
                plastic: plastic.clone(),
            }),
            MaterialBehaviorDef::Gasket {
                loading,
                unloading,
                membrane_modulus,
                transverse_modulus,
            } => Material::Gasket(GasketMaterial {
                name: def.name.clone(),
                thermal,
                loading: loading.clone(),
                unloading: unloading.clone(),
                membrane_modulus: *membrane_modulus,
                transverse_modulus: *transverse_modulus,
                fatigue: None,
            }),
        }
    }

    /// Fatigue table, present only on gasket materials that were given one.
    pub fn fatigue(&self) -> Option<&FatigueData> {
        match self {
            Material::Solid(_) => None,
            Material::Gasket(m) => m.fatigue.as_ref(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub name: String,
    pub kind: SectionKind,
    pub material: String,
    pub thickness: Option<f64>,
}

impl From<&SectionDef> for Section {
    fn from(def: &SectionDef) -> Self {
        Self {
            name: def.name.clone(),
            kind: def.kind,
            material: def.material.clone(),
            thickness: def.thickness,
        }
    }
}
