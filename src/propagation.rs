//! Forward and backward propagation.
//!
//! Both passes walk the layers in topological order (forward: input to output,
//! backward: output to layer 1) and leave their results in the nodes and links:
//!
//! - forward: `total_input` and `output` of every node
//! - backward: `output_der` / `input_der` of every non-input node, and the
//!   per-example `error_der` of every live link, added into the batch accumulators
//!
//! Dead links are skipped by both passes.

use crate::{Error, ErrorFunction, Network, Result};

impl Network {
    /// Evaluates the network on `input` and returns the output node's value.
    ///
    /// Every node keeps its `total_input` / `output` until the next call.
    pub fn forward_prop(&mut self, input: &[f32]) -> Result<f32> {
        let input_layer = &self.layers[0];
        if input.len() != input_layer.len() {
            return Err(Error::InputLength {
                expected: input_layer.len(),
                actual: input.len(),
            });
        }
        for (&id, &value) in input_layer.iter().zip(input) {
            self.nodes[id.0].output = value;
        }

        for layer in &self.layers[1..] {
            for &id in layer {
                let node = &self.nodes[id.0];
                let mut total = node.bias;
                for &link_id in &node.input_links {
                    let link = &self.links[link_id.0];
                    if link.is_dead {
                        continue;
                    }
                    total = link.weight.mul_add(self.nodes[link.source.0].output, total);
                }

                let node = &mut self.nodes[id.0];
                node.total_input = total;
                node.output = match node.activation {
                    Some(act) => act.output(total),
                    None => total,
                };
            }
        }

        Ok(self.output_node().output)
    }

    /// Back-propagates the error of the last forward pass against `target`.
    ///
    /// Must follow a [`forward_prop`](Self::forward_prop) on the same example.
    /// Gradients are added to the node/link accumulators; weights and biases
    /// are left untouched until [`update_weights`](Self::update_weights).
    pub fn back_prop(&mut self, target: f32, error_func: ErrorFunction) {
        let out = self.output_node_id();
        let prediction = self.nodes[out.0].output;
        self.nodes[out.0].output_der = error_func.derivative(prediction, target);

        for layer_idx in (1..self.layers.len()).rev() {
            let layer = &self.layers[layer_idx];

            // dE/d(total_input) of each node, folded into the bias accumulator.
            for &id in layer {
                let node = &mut self.nodes[id.0];
                let Some(act) = node.activation else {
                    continue;
                };
                node.input_der = node.output_der * act.derivative(node.total_input);
                node.acc_input_der += node.input_der;
                node.num_accumulated_ders += 1;
            }

            // dE/d(weight) of each incoming link.
            for &id in layer {
                let node = &self.nodes[id.0];
                let input_der = node.input_der;
                for &link_id in &node.input_links {
                    let link = &mut self.links[link_id.0];
                    if link.is_dead {
                        continue;
                    }
                    link.error_der = input_der * self.nodes[link.source.0].output;
                    link.acc_error_der += link.error_der;
                    link.num_accumulated_ders += 1;
                }
            }

            if layer_idx == 1 {
                continue;
            }

            // dE/d(output) of each node in the previous layer.
            for &id in &self.layers[layer_idx - 1] {
                let node = &self.nodes[id.0];
                let mut output_der = 0.0;
                for &link_id in &node.outputs {
                    let link = &self.links[link_id.0];
                    if link.is_dead {
                        continue;
                    }
                    output_der =
                        link.weight.mul_add(self.nodes[link.dest.0].input_der, output_der);
                }
                self.nodes[id.0].output_der = output_der;
            }
        }
    }
}
