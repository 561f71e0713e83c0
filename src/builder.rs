//! Network builder.
//!
//! [`build_network`] turns a shape descriptor into a fully-connected layered
//! graph. [`NetworkBuilder`] wraps it with the playground's defaults:
//!
//! - hidden and output activation: `tanh`
//! - no regularization
//! - inputs: the `x` and `y` features
//! - random weights in `[-0.5, 0.5)`, biases at `0.1`

use std::collections::HashSet;

use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::graph::{Link, LinkId, Node, NodeId};
use crate::{Activation, Error, FeatureSet, Network, Regularization, Result};

/// Initial bias of every non-input node unless the network is zero-initialized.
pub const INITIAL_BIAS: f32 = 0.1;

/// Half-width of the uniform weight initialization range.
pub const INITIAL_WEIGHT_RANGE: f32 = 0.5;

/// Builds a fully-connected network.
///
/// - `shape[0]` is the number of inputs and must equal `input_ids.len()`.
/// - the last entry must be `1` (single scalar output).
/// - hidden nodes use `activation`, the output node uses `output_activation`.
/// - every link carries `regularization`.
///
/// With `init_zero` all weights and biases start at exactly `0` and `rng` is
/// not consumed.
#[allow(clippy::too_many_arguments)]
pub fn build_network<S, R>(
    shape: &[usize],
    activation: Activation,
    output_activation: Activation,
    regularization: Option<Regularization>,
    input_ids: &[S],
    init_zero: bool,
    rng: &mut R,
) -> Result<Network>
where
    S: AsRef<str>,
    R: Rng + ?Sized,
{
    validate_shape(shape, input_ids)?;

    let num_nodes: usize = shape.iter().sum();
    let num_links: usize = shape.windows(2).map(|w| w[0] * w[1]).sum();
    let mut nodes = Vec::with_capacity(num_nodes);
    let mut links = Vec::with_capacity(num_links);
    let mut layers: Vec<Vec<NodeId>> = Vec::with_capacity(shape.len());

    let dist = Uniform::new(-INITIAL_WEIGHT_RANGE, INITIAL_WEIGHT_RANGE);
    let bias = if init_zero { 0.0 } else { INITIAL_BIAS };
    let last = shape.len() - 1;

    for (layer_idx, &width) in shape.iter().enumerate() {
        let mut layer = Vec::with_capacity(width);
        for i in 0..width {
            let node = if layer_idx == 0 {
                Node::new(input_ids[i].as_ref().to_owned(), 0, None, 0.0)
            } else {
                let act = if layer_idx == last {
                    output_activation
                } else {
                    activation
                };
                Node::new(format!("{layer_idx}_{i}"), layer_idx, Some(act), bias)
            };
            let id = NodeId(nodes.len());
            nodes.push(node);

            if let Some(prev) = layers.last() {
                for &source in prev {
                    let weight = if init_zero { 0.0 } else { dist.sample(rng) };
                    let link_id = LinkId(links.len());
                    let name = format!("{}-{}", nodes[source.0].id, nodes[id.0].id);
                    links.push(Link::new(name, source, id, weight, regularization));
                    nodes[source.0].outputs.push(link_id);
                    nodes[id.0].input_links.push(link_id);
                }
            }
            layer.push(id);
        }
        layers.push(layer);
    }

    log::debug!(
        "built network shape={shape:?} nodes={} links={} activation={} output={} regularization={:?}",
        nodes.len(),
        links.len(),
        activation.name(),
        output_activation.name(),
        regularization.map(Regularization::name),
    );

    Ok(Network {
        nodes,
        links,
        layers,
    })
}

fn validate_shape<S: AsRef<str>>(shape: &[usize], input_ids: &[S]) -> Result<()> {
    if shape.len() < 2 {
        return Err(Error::InvalidShape(format!(
            "shape must include input and output layers, got {shape:?}"
        )));
    }
    if shape.contains(&0) {
        return Err(Error::InvalidShape(format!(
            "all layer sizes must be > 0, got {shape:?}"
        )));
    }
    if shape[shape.len() - 1] != 1 {
        return Err(Error::InvalidShape(format!(
            "output layer must have exactly one node, got {shape:?}"
        )));
    }
    if shape[0] != input_ids.len() {
        return Err(Error::InvalidShape(format!(
            "shape[0] = {} does not match {} input ids",
            shape[0],
            input_ids.len()
        )));
    }

    let mut seen = HashSet::with_capacity(input_ids.len());
    for id in input_ids {
        if !seen.insert(id.as_ref()) {
            return Err(Error::InvalidConfig(format!(
                "duplicate input id {:?}",
                id.as_ref()
            )));
        }
    }
    Ok(())
}

#[derive(Debug, Clone)]
/// Builder for a [`Network`].
///
/// ```rust
/// use playground_nn::{Activation, NetworkBuilder, Regularization};
///
/// # fn main() -> playground_nn::Result<()> {
/// let net = NetworkBuilder::new(&[2, 4, 2, 1])
///     .activation(Activation::ReLU)
///     .output_activation(Activation::Linear)
///     .regularization(Some(Regularization::L2))
///     .build_with_seed(0)?;
/// assert_eq!(net.num_links(), 2 * 4 + 4 * 2 + 2);
/// # Ok(())
/// # }
/// ```
pub struct NetworkBuilder {
    shape: Vec<usize>,
    activation: Activation,
    output_activation: Activation,
    regularization: Option<Regularization>,
    input_ids: Vec<String>,
    init_zero: bool,
}

impl NetworkBuilder {
    /// Start from a full shape (input width, hidden widths, `1`).
    pub fn new(shape: &[usize]) -> Self {
        Self {
            shape: shape.to_vec(),
            activation: Activation::Tanh,
            output_activation: Activation::Tanh,
            regularization: None,
            input_ids: FeatureSet::default()
                .ids()
                .map(str::to_owned)
                .collect(),
            init_zero: false,
        }
    }

    /// Shape `[features.len(), hidden..., 1]` with the feature ids as inputs.
    pub fn for_features(features: &FeatureSet, hidden: &[usize]) -> Self {
        let mut shape = Vec::with_capacity(hidden.len() + 2);
        shape.push(features.len());
        shape.extend_from_slice(hidden);
        shape.push(1);
        Self::new(&shape).features(features)
    }

    /// Activation of hidden nodes.
    pub fn activation(mut self, activation: Activation) -> Self {
        self.activation = activation;
        self
    }

    /// Activation of the output node.
    pub fn output_activation(mut self, activation: Activation) -> Self {
        self.output_activation = activation;
        self
    }

    pub fn regularization(mut self, regularization: Option<Regularization>) -> Self {
        self.regularization = regularization;
        self
    }

    pub fn input_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.input_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Use the ids of `features` as input ids.
    pub fn features(self, features: &FeatureSet) -> Self {
        self.input_ids(features.ids())
    }

    pub fn init_zero(mut self, init_zero: bool) -> Self {
        self.init_zero = init_zero;
        self
    }

    /// Build using a deterministic seed.
    pub fn build_with_seed(self, seed: u64) -> Result<Network> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.build_with_rng(&mut rng)
    }

    /// Build using the provided RNG.
    pub fn build_with_rng<R: Rng + ?Sized>(self, rng: &mut R) -> Result<Network> {
        build_network(
            &self.shape,
            self.activation,
            self.output_activation,
            self.regularization,
            &self.input_ids,
            self.init_zero,
            rng,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InputFeature;

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("f{i}")).collect()
    }

    #[test]
    fn rejects_invalid_shapes() {
        let mut rng = StdRng::seed_from_u64(0);
        let act = Activation::Tanh;

        let err = build_network(&[2], act, act, None, &ids(2), false, &mut rng).unwrap_err();
        assert!(matches!(err, Error::InvalidShape(_)));

        let err = build_network(&[2, 0, 1], act, act, None, &ids(2), false, &mut rng).unwrap_err();
        assert!(matches!(err, Error::InvalidShape(_)));

        let err = build_network(&[2, 3, 2], act, act, None, &ids(2), false, &mut rng).unwrap_err();
        assert!(matches!(err, Error::InvalidShape(_)));

        let err = build_network(&[3, 1], act, act, None, &ids(2), false, &mut rng).unwrap_err();
        assert!(matches!(err, Error::InvalidShape(_)));

        let err = build_network(&[2, 1], act, act, None, &["x", "x"], false, &mut rng).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }

    #[test]
    fn input_nodes_use_feature_ids_and_have_no_activation() {
        let net = NetworkBuilder::new(&[3, 2, 1])
            .input_ids(["sinX", "x", "xTimesY"])
            .build_with_seed(0)
            .unwrap();

        assert_eq!(net.input_ids(), ["sinX", "x", "xTimesY"]);
        for &id in net.layer(0) {
            let node = net.node(id);
            assert_eq!(node.activation(), None);
            assert!(node.input_links().is_empty());
            assert_eq!(node.outputs().len(), 2);
        }
    }

    #[test]
    fn activations_and_biases_are_assigned_per_layer() {
        let net = NetworkBuilder::new(&[2, 3, 1])
            .activation(Activation::ReLU)
            .output_activation(Activation::Linear)
            .regularization(Some(Regularization::L1))
            .build_with_seed(7)
            .unwrap();

        for &id in net.layer(1) {
            assert_eq!(net.node(id).activation(), Some(Activation::ReLU));
            assert_eq!(net.node(id).bias(), INITIAL_BIAS);
        }
        assert_eq!(net.output_node().activation(), Some(Activation::Linear));
        assert_eq!(net.output_node().bias(), INITIAL_BIAS);

        for (_, link) in net.links() {
            assert!(link.weight() >= -INITIAL_WEIGHT_RANGE && link.weight() < INITIAL_WEIGHT_RANGE);
            assert_eq!(link.regularization(), Some(Regularization::L1));
            assert!(!link.is_dead());
        }
    }

    #[test]
    fn init_zero_zeroes_weights_and_biases() {
        let net = NetworkBuilder::new(&[2, 4, 1])
            .init_zero(true)
            .build_with_seed(0)
            .unwrap();
        assert!(net.output_weights().iter().all(|&w| w == 0.0));
        net.for_each_node(false, |n| assert_eq!(n.bias(), 0.0));
    }

    #[test]
    fn same_seed_gives_identical_networks() {
        let a = NetworkBuilder::new(&[2, 5, 3, 1]).build_with_seed(42).unwrap();
        let b = NetworkBuilder::new(&[2, 5, 3, 1]).build_with_seed(42).unwrap();
        let c = NetworkBuilder::new(&[2, 5, 3, 1]).build_with_seed(43).unwrap();

        assert_eq!(a.output_weights(), b.output_weights());
        assert_ne!(a.output_weights(), c.output_weights());

        let ids_a: Vec<_> = a.links().map(|(_, l)| l.id().to_owned()).collect();
        let ids_b: Vec<_> = b.links().map(|(_, l)| l.id().to_owned()).collect();
        assert_eq!(ids_a, ids_b);
    }

    #[test]
    fn for_features_derives_shape() {
        let features = FeatureSet::new([InputFeature::X, InputFeature::Y, InputFeature::XSquared])
            .unwrap();
        let net = NetworkBuilder::for_features(&features, &[4, 2])
            .build_with_seed(0)
            .unwrap();
        assert_eq!(net.shape(), [3, 4, 2, 1]);
        assert_eq!(net.input_ids(), ["x", "y", "xSquared"]);
    }
}
