use crate::graph::{Link, LinkId, Node, NodeId};

/// A fully-connected, strictly layered network.
///
/// Layer 0 holds the input nodes, the last layer holds the single output node.
/// The network owns every node and link; nodes refer to links (and links to
/// nodes) by index into these arenas.
///
/// All mutation goes through `&mut Network`, so one training loop owns one
/// network at a time.
#[derive(Debug, Clone)]
pub struct Network {
    pub(crate) nodes: Vec<Node>,
    pub(crate) links: Vec<Link>,
    pub(crate) layers: Vec<Vec<NodeId>>,
}

impl Network {
    #[inline]
    pub fn num_layers(&self) -> usize {
        self.layers.len()
    }

    /// Node handles of layer `idx`, in index order.
    ///
    /// Panics if `idx >= num_layers()`.
    #[inline]
    pub fn layer(&self, idx: usize) -> &[NodeId] {
        &self.layers[idx]
    }

    #[inline]
    pub fn layers(&self) -> &[Vec<NodeId>] {
        &self.layers
    }

    /// Layer widths, input layer first.
    pub fn shape(&self) -> Vec<usize> {
        self.layers.iter().map(Vec::len).collect()
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    #[inline]
    pub fn num_links(&self) -> usize {
        self.links.len()
    }

    /// Number of input nodes (expected input vector length).
    #[inline]
    pub fn input_dim(&self) -> usize {
        self.layers[0].len()
    }

    /// Ids of the input nodes, in input order.
    pub fn input_ids(&self) -> Vec<&str> {
        self.layers[0].iter().map(|&id| self.node(id).id()).collect()
    }

    /// Panics if `id` does not belong to this network.
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Panics if `id` does not belong to this network.
    #[inline]
    pub fn link(&self, id: LinkId) -> &Link {
        &self.links[id.0]
    }

    /// Source node of `link`.
    #[inline]
    pub fn source(&self, link: LinkId) -> &Node {
        self.node(self.link(link).source)
    }

    /// Destination node of `link`.
    #[inline]
    pub fn dest(&self, link: LinkId) -> &Node {
        self.node(self.link(link).dest)
    }

    /// All links, in creation order.
    pub fn links(&self) -> impl Iterator<Item = (LinkId, &Link)> + '_ {
        self.links.iter().enumerate().map(|(i, l)| (LinkId(i), l))
    }

    /// Finds a node by its string identifier.
    pub fn node_by_id(&self, id: &str) -> Option<NodeId> {
        self.nodes.iter().position(|n| n.id == id).map(NodeId)
    }

    /// Handle of the single node of the last layer.
    #[inline]
    pub fn output_node_id(&self) -> NodeId {
        let last = self
            .layers
            .last()
            .expect("network must have at least two layers");
        debug_assert_eq!(last.len(), 1, "output layer must hold exactly one node");
        last[0]
    }

    #[inline]
    pub fn output_node(&self) -> &Node {
        self.node(self.output_node_id())
    }

    /// Visits every node in layer order, then index order within a layer.
    ///
    /// With `ignore_inputs` the input layer is skipped.
    pub fn for_each_node<F>(&self, ignore_inputs: bool, mut visit: F)
    where
        F: FnMut(&Node),
    {
        let start = usize::from(ignore_inputs);
        for layer in &self.layers[start..] {
            for &id in layer {
                visit(&self.nodes[id.0]);
            }
        }
    }

    /// Mutable variant of [`for_each_node`](Self::for_each_node), same order.
    pub fn for_each_node_mut<F>(&mut self, ignore_inputs: bool, mut visit: F)
    where
        F: FnMut(&mut Node),
    {
        let start = usize::from(ignore_inputs);
        for layer in &self.layers[start..] {
            for &id in layer {
                visit(&mut self.nodes[id.0]);
            }
        }
    }

    /// Overrides a node bias (e.g. a user edit between training steps).
    pub fn set_bias(&mut self, node: NodeId, bias: f32) {
        self.nodes[node.0].bias = bias;
    }

    /// Overrides a link weight (e.g. a user edit between training steps).
    ///
    /// The link's dead flag is left untouched.
    pub fn set_weight(&mut self, link: LinkId, weight: f32) {
        self.links[link.0].weight = weight;
    }

    /// Every link weight, walking layers in order, nodes in order and each
    /// node's outgoing links in order.
    pub fn output_weights(&self) -> Vec<f32> {
        let mut weights = Vec::with_capacity(self.links.len());
        for layer in &self.layers[..self.layers.len() - 1] {
            for &id in layer {
                for &link in &self.nodes[id.0].outputs {
                    weights.push(self.links[link.0].weight);
                }
            }
        }
        weights
    }

    /// Number of links currently marked dead.
    pub fn num_dead_links(&self) -> usize {
        self.links.iter().filter(|l| l.is_dead).count()
    }
}

#[cfg(test)]
mod tests {
    use crate::{Activation, NetworkBuilder};

    #[test]
    fn node_and_link_counts_follow_shape() {
        for shape in [vec![2, 1], vec![2, 4, 1], vec![3, 4, 2, 1], vec![7, 8, 8, 8, 1]] {
            let ids: Vec<String> = (0..shape[0]).map(|i| format!("in{i}")).collect();
            let net = NetworkBuilder::new(&shape)
                .input_ids(ids)
                .build_with_seed(0)
                .unwrap();

            let non_input: usize = shape[1..].iter().sum();
            let links: usize = shape.windows(2).map(|w| w[0] * w[1]).sum();

            let mut visited = 0;
            net.for_each_node(true, |_| visited += 1);
            assert_eq!(visited, non_input);
            assert_eq!(net.num_nodes(), non_input + shape[0]);
            assert_eq!(net.num_links(), links);
            assert_eq!(net.shape(), shape);
        }
    }

    #[test]
    fn for_each_node_visits_in_layer_then_index_order() {
        let net = NetworkBuilder::new(&[2, 3, 2, 1])
            .build_with_seed(0)
            .unwrap();

        let mut all = Vec::new();
        net.for_each_node(false, |n| all.push(n.id().to_owned()));
        assert_eq!(all, ["x", "y", "1_0", "1_1", "1_2", "2_0", "2_1", "3_0"]);

        let mut hidden = Vec::new();
        net.for_each_node(true, |n| hidden.push((n.layer(), n.id().to_owned())));
        assert_eq!(hidden.len(), 6);
        assert!(hidden.iter().all(|(layer, _)| *layer > 0));
        assert_eq!(hidden[0].1, "1_0");
        assert_eq!(hidden[5].1, "3_0");
    }

    #[test]
    fn for_each_node_mut_edits_in_place() {
        let mut net = NetworkBuilder::new(&[2, 2, 1]).build_with_seed(0).unwrap();
        net.for_each_node_mut(true, |n| n.bias = -1.0);
        net.for_each_node(true, |n| assert_eq!(n.bias(), -1.0));
        net.for_each_node(false, |n| {
            if n.is_input() {
                assert_eq!(n.bias(), 0.0);
            }
        });
    }

    #[test]
    fn output_node_is_stable() {
        let net = NetworkBuilder::new(&[2, 3, 1]).build_with_seed(1).unwrap();
        let a = net.output_node_id();
        let b = net.output_node_id();
        assert_eq!(a, b);
        assert!(std::ptr::eq(net.output_node(), net.output_node()));
        assert_eq!(net.output_node().id(), "2_0");
    }

    #[test]
    fn link_order_and_identifiers() {
        let net = NetworkBuilder::new(&[2, 3, 1])
            .activation(Activation::ReLU)
            .build_with_seed(0)
            .unwrap();

        for layer_idx in 1..net.num_layers() {
            for &id in net.layer(layer_idx) {
                let node = net.node(id);
                let sources: Vec<_> = node
                    .input_links()
                    .iter()
                    .map(|&l| net.link(l).source())
                    .collect();
                assert_eq!(sources, net.layer(layer_idx - 1));
            }
        }
        for &id in net.layer(0) {
            let dests: Vec<_> = net
                .node(id)
                .outputs()
                .iter()
                .map(|&l| net.link(l).dest())
                .collect();
            assert_eq!(dests, net.layer(1));
        }

        let first = net.node(net.layer(1)[0]).input_links()[0];
        assert_eq!(net.link(first).id(), "x-1_0");
        assert_eq!(net.source(first).id(), "x");
        assert_eq!(net.dest(first).id(), "1_0");
    }

    #[test]
    fn output_weights_walks_outgoing_links() {
        let mut net = NetworkBuilder::new(&[2, 2, 1]).build_with_seed(3).unwrap();
        let x = net.node_by_id("x").unwrap();
        let first = net.node(x).outputs()[0];
        net.set_weight(first, 0.25);

        let weights = net.output_weights();
        assert_eq!(weights.len(), 6);
        assert_eq!(weights[0], 0.25);

        let y = net.node_by_id("y").unwrap();
        let y_second = net.node(y).outputs()[1];
        assert_eq!(weights[3], net.link(y_second).weight());
    }

    #[test]
    fn node_by_id_finds_hidden_and_input_nodes() {
        let net = NetworkBuilder::new(&[2, 2, 1]).build_with_seed(0).unwrap();
        assert!(net.node_by_id("x").is_some());
        assert!(net.node_by_id("1_1").is_some());
        assert!(net.node_by_id("1_2").is_none());
        assert_eq!(net.input_ids(), ["x", "y"]);
    }
}
