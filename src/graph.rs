//! Graph model: nodes and links.
//!
//! Nodes and links live in per-network arenas (see [`crate::Network`]) and refer
//! to each other through [`NodeId`] / [`LinkId`] handles. The graph is strictly
//! layered, so the back references never form an ownership cycle.

use crate::{Activation, Regularization};

/// Handle to a node inside its owning [`crate::Network`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// Handle to a link inside its owning [`crate::Network`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LinkId(pub(crate) usize);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

impl LinkId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A computational unit: bias, activation and the cached state of the last
/// forward/backward pass.
#[derive(Debug, Clone)]
pub struct Node {
    pub(crate) id: String,
    pub(crate) layer: usize,
    pub(crate) bias: f32,
    pub(crate) activation: Option<Activation>,
    /// Incoming links, ordered by ascending source index.
    pub(crate) input_links: Vec<LinkId>,
    /// Outgoing links, ordered by ascending destination index.
    pub(crate) outputs: Vec<LinkId>,

    pub(crate) total_input: f32,
    pub(crate) output: f32,

    // Backprop state.
    pub(crate) output_der: f32,
    pub(crate) input_der: f32,
    pub(crate) acc_input_der: f32,
    pub(crate) num_accumulated_ders: u32,
}

impl Node {
    pub(crate) fn new(id: String, layer: usize, activation: Option<Activation>, bias: f32) -> Self {
        Self {
            id,
            layer,
            bias,
            activation,
            input_links: Vec::new(),
            outputs: Vec::new(),
            total_input: 0.0,
            output: 0.0,
            output_der: 0.0,
            input_der: 0.0,
            acc_input_der: 0.0,
            num_accumulated_ders: 0,
        }
    }

    /// Stable identifier: the feature id for input nodes, `"<layer>_<index>"` otherwise.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn layer(&self) -> usize {
        self.layer
    }

    #[inline]
    pub fn bias(&self) -> f32 {
        self.bias
    }

    /// `None` for input nodes.
    #[inline]
    pub fn activation(&self) -> Option<Activation> {
        self.activation
    }

    #[inline]
    pub fn input_links(&self) -> &[LinkId] {
        &self.input_links
    }

    #[inline]
    pub fn outputs(&self) -> &[LinkId] {
        &self.outputs
    }

    /// Pre-activation sum from the last forward pass.
    #[inline]
    pub fn total_input(&self) -> f32 {
        self.total_input
    }

    /// Output from the last forward pass (0 before the first one).
    #[inline]
    pub fn output(&self) -> f32 {
        self.output
    }

    /// dE/d(output) from the last backward pass.
    #[inline]
    pub fn output_der(&self) -> f32 {
        self.output_der
    }

    /// dE/d(total_input) from the last backward pass.
    #[inline]
    pub fn input_der(&self) -> f32 {
        self.input_der
    }

    #[inline]
    pub fn acc_input_der(&self) -> f32 {
        self.acc_input_der
    }

    #[inline]
    pub fn num_accumulated_ders(&self) -> u32 {
        self.num_accumulated_ders
    }

    #[inline]
    pub fn is_input(&self) -> bool {
        self.layer == 0
    }
}

/// A directed, weighted edge between nodes of adjacent layers.
#[derive(Debug, Clone)]
pub struct Link {
    pub(crate) id: String,
    pub(crate) source: NodeId,
    pub(crate) dest: NodeId,
    pub(crate) weight: f32,
    pub(crate) is_dead: bool,
    pub(crate) regularization: Option<Regularization>,

    pub(crate) error_der: f32,
    pub(crate) acc_error_der: f32,
    pub(crate) num_accumulated_ders: u32,
}

impl Link {
    pub(crate) fn new(
        id: String,
        source: NodeId,
        dest: NodeId,
        weight: f32,
        regularization: Option<Regularization>,
    ) -> Self {
        Self {
            id,
            source,
            dest,
            weight,
            is_dead: false,
            regularization,
            error_der: 0.0,
            acc_error_der: 0.0,
            num_accumulated_ders: 0,
        }
    }

    /// `"<source id>-<dest id>"`.
    #[inline]
    pub fn id(&self) -> &str {
        &self.id
    }

    #[inline]
    pub fn source(&self) -> NodeId {
        self.source
    }

    #[inline]
    pub fn dest(&self) -> NodeId {
        self.dest
    }

    #[inline]
    pub fn weight(&self) -> f32 {
        self.weight
    }

    /// Dead links stay in the graph but are skipped by propagation and updates.
    #[inline]
    pub fn is_dead(&self) -> bool {
        self.is_dead
    }

    #[inline]
    pub fn regularization(&self) -> Option<Regularization> {
        self.regularization
    }

    /// dE/d(weight) for the last back-propagated example.
    #[inline]
    pub fn error_der(&self) -> f32 {
        self.error_der
    }

    #[inline]
    pub fn acc_error_der(&self) -> f32 {
        self.acc_error_der
    }

    #[inline]
    pub fn num_accumulated_ders(&self) -> u32 {
        self.num_accumulated_ders
    }
}
