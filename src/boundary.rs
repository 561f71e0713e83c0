//! Per-node output grids.
//!
//! The playground colours every node with the output it produces over a
//! square region of input space. [`decision_boundary`] samples that region on
//! a `density x density` grid; drawing the result is up to the caller.

use std::collections::HashMap;

use crate::{Error, FeatureSet, InputFeature, Network, Result};

/// Row-major grids keyed by node id: `grid[i][j]` is the value at the `i`-th
/// x sample and the `j`-th y sample (y runs from the top of the domain down).
#[derive(Debug, Clone, PartialEq)]
pub struct Boundary {
    density: usize,
    grids: HashMap<String, Vec<Vec<f32>>>,
}

impl Boundary {
    #[inline]
    pub fn density(&self) -> usize {
        self.density
    }

    /// Grid for a non-input node id or any input feature id.
    pub fn get(&self, id: &str) -> Option<&[Vec<f32>]> {
        self.grids.get(id).map(Vec::as_slice)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.grids.keys().map(String::as_str)
    }
}

/// Evaluates `network` over a grid spanning `domain` on both axes.
///
/// Records the output of every non-input node and the raw value of every
/// feature in the catalogue, selected or not, so unselected features can be
/// previewed before they are added to the network.
pub fn decision_boundary(
    network: &mut Network,
    features: &FeatureSet,
    density: usize,
    domain: (f32, f32),
) -> Result<Boundary> {
    if density < 2 {
        return Err(Error::InvalidConfig(format!(
            "grid density must be >= 2, got {density}"
        )));
    }
    let (lo, hi) = domain;
    if !(lo.is_finite() && hi.is_finite() && lo < hi) {
        return Err(Error::InvalidConfig(format!(
            "domain must be a finite, non-empty range, got {domain:?}"
        )));
    }
    network.check_features(features)?;

    let mut ids: Vec<String> = Vec::new();
    network.for_each_node(true, |n| ids.push(n.id().to_owned()));
    let num_nodes = ids.len();
    ids.extend(InputFeature::ALL.iter().map(|f| f.id().to_owned()));

    let mut grids: Vec<Vec<Vec<f32>>> = vec![vec![vec![0.0; density]; density]; ids.len()];
    let step = (hi - lo) / (density - 1) as f32;
    let mut input = vec![0.0_f32; features.len()];

    for i in 0..density {
        let x = lo + step * i as f32;
        for j in 0..density {
            let y = hi - step * j as f32;
            features.construct_input_into(x, y, &mut input);
            network.forward_prop(&input)?;

            let mut k = 0;
            network.for_each_node(true, |n| {
                grids[k][i][j] = n.output();
                k += 1;
            });
            for (offset, feature) in InputFeature::ALL.iter().enumerate() {
                grids[num_nodes + offset][i][j] = feature.apply(x, y);
            }
        }
    }

    Ok(Boundary {
        density,
        grids: ids.into_iter().zip(grids).collect(),
    })
}

/// Averages non-overlapping `factor x factor` blocks of a square grid.
pub fn reduce_matrix(grid: &[Vec<f32>], factor: usize) -> Result<Vec<Vec<f32>>> {
    let n = grid.len();
    if grid.iter().any(|row| row.len() != n) {
        return Err(Error::InvalidShape("grid must be square".to_owned()));
    }
    if factor == 0 || n % factor != 0 {
        return Err(Error::InvalidShape(format!(
            "grid size {n} is not divisible by factor {factor}"
        )));
    }

    let m = n / factor;
    let scale = 1.0 / (factor * factor) as f32;
    let mut out = vec![vec![0.0_f32; m]; m];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().enumerate() {
            let mut sum = 0.0;
            for k in 0..factor {
                for l in 0..factor {
                    sum += grid[i * factor + k][j * factor + l];
                }
            }
            *cell = sum * scale;
        }
    }
    Ok(out)
}
