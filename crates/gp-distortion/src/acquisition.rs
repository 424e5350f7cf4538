//! Bore node acquisition.
//!
//! Manual mode partitions a user node set into cylinder/depth layers. Automatic
//! mode lays a ring of points around every cylinder at evenly spaced depths and
//! samples the displacement field along that path.

use crate::circle::Circle;
use crate::error::{DistortionError, DistortionResult};
use crate::layer::{BoreNodeLayer, LayerNode};
use gp_calc::geometry::assign_cylinder;
use gp_core::{Label, deg_to_rad};
use gp_input::{Limits, RunConfig};
use gp_model::ResultProvider;
use tracing::{debug, info};

fn nominal_circle(config: &RunConfig, cylinder: usize, radius: f64) -> Circle {
    Circle {
        center: [config.cylinders[cylinder].center_x, config.bore_center_y],
        radius,
    }
}

/// Split nodes sorted by depth wherever two neighbours are further apart than `spacing`.
fn depth_groups(mut nodes: Vec<LayerNode>, spacing: f64) -> Vec<Vec<LayerNode>> {
    nodes.sort_by(|a, b| b.coord[2].total_cmp(&a.coord[2]));
    let mut groups: Vec<Vec<LayerNode>> = Vec::new();
    for node in nodes {
        match groups.last_mut() {
            Some(group)
                if group
                    .last()
                    .is_some_and(|prev| (prev.coord[2] - node.coord[2]).abs() <= spacing) =>
            {
                group.push(node)
            }
            _ => groups.push(vec![node]),
        }
    }
    groups
}

/// Layers from an explicit bore node set.
pub fn manual_layers(
    provider: &dyn ResultProvider,
    config: &RunConfig,
    labels: &[Label],
    radius: f64,
) -> DistortionResult<Vec<BoreNodeLayer>> {
    if labels.is_empty() {
        return Err(DistortionError::MissingBoreNodes);
    }
    let coords = provider.node_coordinates(labels)?;
    let step_count = provider.step_names().len();
    let mut per_step = Vec::with_capacity(step_count);
    for step in 0..step_count {
        per_step.push(provider.node_displacements(step, labels)?);
    }

    let mut by_cylinder: Vec<Vec<LayerNode>> = vec![Vec::new(); config.cylinders.len()];
    for (i, (&label, coord)) in labels.iter().zip(coords).enumerate() {
        let cylinder = assign_cylinder(coord[0], &config.cylinders)?;
        by_cylinder[cylinder].push(LayerNode {
            label: Some(label),
            coord,
            displacements: per_step.iter().map(|u| u[i]).collect(),
        });
    }

    let mut layers = Vec::new();
    for (cylinder, nodes) in by_cylinder.into_iter().enumerate() {
        for (layer, group) in depth_groups(nodes, config.limits.layer_spacing)
            .into_iter()
            .enumerate()
        {
            let z = group.iter().map(|n| n.coord[2]).sum::<f64>() / group.len() as f64;
            debug!(cylinder, layer, z, nodes = group.len(), "manual bore layer");
            layers.push(BoreNodeLayer {
                cylinder,
                layer,
                z,
                nominal: nominal_circle(config, cylinder, radius),
                nodes: group,
            });
        }
    }
    info!(layers = layers.len(), "bore layers from node set");
    Ok(layers)
}

/// Evenly spaced depths from `z_start` to `z_end` inclusive.
pub fn layer_depths(z_start: f64, z_end: f64, layers: usize) -> Vec<f64> {
    if layers <= 1 {
        return vec![z_start];
    }
    let step = (z_end - z_start) / (layers - 1) as f64;
    (0..layers).map(|i| z_start + i as f64 * step).collect()
}

/// Ring of `points` points around `center` at `radius`, starting at `start_deg`.
pub fn ring_points(center: [f64; 2], radius: f64, z: f64, points: usize, start_deg: f64) -> Vec<[f64; 3]> {
    (0..points)
        .map(|i| {
            let angle = deg_to_rad(start_deg + 360.0 * i as f64 / points as f64);
            [
                center[0] + radius * angle.cos(),
                center[1] + radius * angle.sin(),
                z,
            ]
        })
        .collect()
}

/// Parameters of one automatic ring search.
struct RingSearch<'a> {
    provider: &'a dyn ResultProvider,
    region: Option<&'a str>,
    limits: &'a Limits,
    center: [f64; 2],
    z: f64,
    points: usize,
    cylinder: usize,
    layer: usize,
}

impl RingSearch<'_> {
    fn hits(&self, radius: f64, start_deg: f64) -> DistortionResult<Vec<Option<[f64; 3]>>> {
        let path = ring_points(self.center, radius, self.z, self.points, start_deg);
        Ok(self.provider.interpolate_displacements(0, self.region, &path)?)
    }

    /// Grow the radius until more than `interpolation_done` points interpolate.
    fn radius(&self, nominal: f64) -> DistortionResult<f64> {
        for i in 0..self.limits.max_path_iteration {
            let radius = nominal + i as f64 * self.limits.radius_search_increment;
            let found = self.hits(radius, 0.0)?.iter().flatten().count();
            if found > self.limits.interpolation_done {
                return Ok(radius);
            }
        }
        Err(DistortionError::RadiusSearchExhausted {
            cylinder: self.cylinder,
            layer: self.layer,
            iterations: self.limits.max_path_iteration,
        })
    }

    /// Turn the ring until every point interpolates.
    fn start_angle(&self, radius: f64) -> DistortionResult<f64> {
        for i in 0..self.limits.max_path_iteration {
            let start = i as f64 * self.limits.start_angle_shift_deg;
            if self.hits(radius, start)?.iter().all(Option::is_some) {
                return Ok(start);
            }
        }
        Err(DistortionError::StartAngleSearchExhausted {
            cylinder: self.cylinder,
            layer: self.layer,
            iterations: self.limits.max_path_iteration,
        })
    }
}

/// Parameters of the automatic acquisition.
#[derive(Debug, Clone, PartialEq)]
pub struct AutoRing<'a> {
    pub points: usize,
    pub layers: usize,
    pub z_start: f64,
    pub z_end: f64,
    pub region: Option<&'a str>,
    pub radius: f64,
}

/// Layers sampled along rings. A search that does not converge aborts the run.
pub fn automatic_layers(
    provider: &dyn ResultProvider,
    config: &RunConfig,
    ring: &AutoRing<'_>,
) -> DistortionResult<Vec<BoreNodeLayer>> {
    let step_count = provider.step_names().len();
    let mut layers = Vec::new();
    for cylinder in 0..config.cylinders.len() {
        let center = nominal_circle(config, cylinder, ring.radius).center;
        for (layer, z) in layer_depths(ring.z_start, ring.z_end, ring.layers)
            .into_iter()
            .enumerate()
        {
            let search = RingSearch {
                provider,
                region: ring.region,
                limits: &config.limits,
                center,
                z,
                points: ring.points,
                cylinder,
                layer,
            };
            let radius = search.radius(ring.radius)?;
            let start = search.start_angle(radius)?;
            let path = ring_points(center, radius, z, ring.points, start);

            let mut nodes: Vec<LayerNode> = path
                .iter()
                .map(|&coord| LayerNode {
                    label: None,
                    coord,
                    displacements: Vec::with_capacity(step_count),
                })
                .collect();
            for step in 0..step_count {
                let values = provider.interpolate_displacements(step, ring.region, &path)?;
                for (node, value) in nodes.iter_mut().zip(values) {
                    let u = value.ok_or(DistortionError::InterpolationFailed {
                        cylinder,
                        layer,
                        step,
                    })?;
                    node.displacements.push(u);
                }
            }
            debug!(cylinder, layer, z, radius, start, "automatic bore layer");
            layers.push(BoreNodeLayer {
                cylinder,
                layer,
                z,
                nominal: Circle { center, radius },
                nodes,
            });
        }
    }
    info!(layers = layers.len(), "bore layers from ring paths");
    Ok(layers)
}
