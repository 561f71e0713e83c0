//! A small node/link neural network engine.
//!
//! `playground-nn` implements the network behind an interactive "neural network
//! playground": a fully-connected, strictly layered feed-forward network fed
//! with 2-D points, trained in place by mini-batch SGD with optional L1/L2
//! regularization. Each node and link is an explicit object holding its own
//! state, so callers can read (and draw) every bias, weight and node output
//! between training steps.
//!
//! # Model
//!
//! - Nodes and links live in arenas owned by the [`Network`] and are addressed
//!   by [`NodeId`] / [`LinkId`].
//! - Layer 0 holds the input nodes, named after their input features; the last
//!   layer holds a single output node.
//! - Pruned links are flagged dead instead of removed, so iteration order never
//!   changes.
//!
//! # Panics vs `Result`
//!
//! - Building, forward propagation and the training driver validate their
//!   inputs and return [`Result`].
//! - Handle lookups ([`Network::node`], [`Network::link`]) panic on ids from
//!   another network.
//! - Numerical trouble (NaN/inf from a diverging learning rate) is not caught;
//!   it shows up in node state and losses.
//!
//! # Training loop
//!
//! ```rust
//! use playground_nn::{Activation, ErrorFunction, NetworkBuilder};
//!
//! # fn main() -> playground_nn::Result<()> {
//! let mut net = NetworkBuilder::new(&[2, 4, 1])
//!     .activation(Activation::Tanh)
//!     .output_activation(Activation::Tanh)
//!     .build_with_seed(0)?;
//!
//! let points = [([0.5_f32, 0.5_f32], 1.0_f32), ([-0.5, -0.5], -1.0)];
//! let batch_size = 2;
//! for (i, (input, label)) in points.iter().enumerate() {
//!     net.forward_prop(input)?;
//!     net.back_prop(*label, ErrorFunction::Square);
//!     if (i + 1) % batch_size == 0 {
//!         net.update_weights(0.03, 0.0);
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Driving from 2-D points
//!
//! ```rust
//! use playground_nn::{Example2D, FeatureSet, InputFeature, NetworkBuilder, TrainConfig, Trainer};
//!
//! # fn main() -> playground_nn::Result<()> {
//! let features = FeatureSet::new([InputFeature::X, InputFeature::Y, InputFeature::XTimesY])?;
//! let net = NetworkBuilder::for_features(&features, &[4, 2]).build_with_seed(0)?;
//! let mut trainer = Trainer::new(net, features, TrainConfig::default())?;
//!
//! let train = vec![
//!     Example2D::new(1.0, 1.0, 1.0),
//!     Example2D::new(-1.0, 1.0, -1.0),
//!     Example2D::new(1.0, -1.0, -1.0),
//!     Example2D::new(-1.0, -1.0, 1.0),
//! ];
//! let report = trainer.step(&train, None)?;
//! assert_eq!(report.iteration, 1);
//! # Ok(())
//! # }
//! ```

pub mod activation;
pub mod boundary;
pub mod builder;
pub mod data;
pub mod error;
pub mod features;
pub mod graph;
pub mod loss;
pub mod network;
pub mod optim;
mod propagation;
pub mod regularization;
pub mod train;

pub use activation::Activation;
pub use boundary::{decision_boundary, reduce_matrix, Boundary};
pub use builder::{build_network, NetworkBuilder};
pub use data::Example2D;
pub use error::{Error, Result};
pub use features::{FeatureSet, InputFeature};
pub use graph::{Link, LinkId, Node, NodeId};
pub use loss::ErrorFunction;
pub use network::Network;
pub use optim::Sgd;
pub use regularization::Regularization;
pub use train::{EpochReport, TrainConfig, Trainer};

/// Forward pass: see [`Network::forward_prop`].
pub fn forward_prop(network: &mut Network, input: &[f32]) -> Result<f32> {
    network.forward_prop(input)
}

/// Backward pass: see [`Network::back_prop`].
pub fn back_prop(network: &mut Network, target: f32, error_func: ErrorFunction) {
    network.back_prop(target, error_func)
}

/// Weight update: see [`Network::update_weights`].
pub fn update_weights(network: &mut Network, learning_rate: f32, regularization_rate: f32) {
    network.update_weights(learning_rate, regularization_rate)
}

/// Node traversal: see [`Network::for_each_node`].
pub fn for_each_node<F: FnMut(&Node)>(network: &Network, ignore_inputs: bool, visit: F) {
    network.for_each_node(ignore_inputs, visit)
}

/// The single output node: see [`Network::output_node`].
pub fn output_node(network: &Network) -> &Node {
    network.output_node()
}
