//! Weight updates.
//!
//! `update_weights` is the only place weights and biases change during
//! training. It averages the gradients accumulated by `back_prop` since the
//! last update, applies them together with the regularization penalty, and
//! clears the accumulators.
//!
//! L1 pruning: when the L1 penalty drives a weight across zero, the weight is
//! set to exactly `0` and the link is marked dead. A weight that lands exactly
//! on `0` without changing sign stays alive.

use crate::{Error, Network, Regularization, Result};

impl Network {
    /// Applies one mini-batch step of plain SGD.
    ///
    /// Nodes and links without accumulated derivatives are left untouched.
    pub fn update_weights(&mut self, learning_rate: f32, regularization_rate: f32) {
        let mut pruned = 0usize;

        for layer in &self.layers[1..] {
            for &id in layer {
                let node = &mut self.nodes[id.0];
                if node.num_accumulated_ders > 0 {
                    node.bias -=
                        learning_rate * node.acc_input_der / node.num_accumulated_ders as f32;
                    node.acc_input_der = 0.0;
                    node.num_accumulated_ders = 0;
                }

                for &link_id in &self.nodes[id.0].input_links {
                    let link = &mut self.links[link_id.0];
                    if link.is_dead || link.num_accumulated_ders == 0 {
                        continue;
                    }

                    let weight = link.weight;
                    let regul_der = link.regularization.map_or(0.0, |r| r.derivative(weight));
                    let grad = link.acc_error_der / link.num_accumulated_ders as f32;
                    let new_weight =
                        weight - learning_rate * (grad + regularization_rate * regul_der);

                    if link.regularization == Some(Regularization::L1)
                        && weight * new_weight < 0.0
                    {
                        link.weight = 0.0;
                        link.is_dead = true;
                        pruned += 1;
                        log::trace!("pruned link {} (weight {weight} -> {new_weight})", link.id);
                    } else {
                        link.weight = new_weight;
                    }
                    link.acc_error_der = 0.0;
                    link.num_accumulated_ders = 0;
                }
            }
        }

        if pruned > 0 {
            log::debug!("L1 regularization pruned {pruned} links");
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
/// Validated SGD hyperparameters.
pub struct Sgd {
    learning_rate: f32,
    regularization_rate: f32,
}

impl Sgd {
    /// Returns an error unless `learning_rate` is finite and `> 0` and
    /// `regularization_rate` is finite and `>= 0`.
    pub fn new(learning_rate: f32, regularization_rate: f32) -> Result<Self> {
        if !(learning_rate.is_finite() && learning_rate > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "learning rate must be finite and > 0, got {learning_rate}"
            )));
        }
        if !(regularization_rate.is_finite() && regularization_rate >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "regularization rate must be finite and >= 0, got {regularization_rate}"
            )));
        }
        Ok(Self {
            learning_rate,
            regularization_rate,
        })
    }

    #[inline]
    pub fn learning_rate(&self) -> f32 {
        self.learning_rate
    }

    #[inline]
    pub fn regularization_rate(&self) -> f32 {
        self.regularization_rate
    }

    #[inline]
    pub fn step(&self, network: &mut Network) {
        network.update_weights(self.learning_rate, self.regularization_rate);
    }
}
