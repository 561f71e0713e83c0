//! Activation functions.
//!
//! Every non-input node computes a pre-activation value
//! `total_input = bias + sum(weight * source.output)` and then applies its
//! activation: `output = activation.output(total_input)`.
//!
//! Unlike a dense layer that caches post-activation outputs, each node keeps its
//! `total_input` around, so derivatives are evaluated at the pre-activation value.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Node activation function.
pub enum Activation {
    Tanh,
    ReLU,
    Sigmoid,
    /// Identity.
    Linear,
}

impl Activation {
    /// All activations, in the order the playground lists them.
    pub const ALL: [Activation; 4] = [
        Activation::ReLU,
        Activation::Tanh,
        Activation::Sigmoid,
        Activation::Linear,
    ];

    /// Short lowercase name (`"tanh"`, `"relu"`, ...).
    pub fn name(self) -> &'static str {
        match self {
            Activation::Tanh => "tanh",
            Activation::ReLU => "relu",
            Activation::Sigmoid => "sigmoid",
            Activation::Linear => "linear",
        }
    }

    /// Looks up an activation by its [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|a| a.name() == name)
    }

    #[inline]
    pub fn output(self, x: f32) -> f32 {
        match self {
            Activation::Tanh => x.tanh(),
            Activation::ReLU => x.max(0.0),
            Activation::Sigmoid => sigmoid(x),
            Activation::Linear => x,
        }
    }

    /// Derivative of [`output`](Self::output), evaluated at the pre-activation `x`.
    #[inline]
    pub fn derivative(self, x: f32) -> f32 {
        match self {
            Activation::Tanh => {
                let y = x.tanh();
                1.0 - y * y
            }
            Activation::ReLU => {
                if x <= 0.0 {
                    0.0
                } else {
                    1.0
                }
            }
            Activation::Sigmoid => {
                let s = sigmoid(x);
                s * (1.0 - s)
            }
            Activation::Linear => 1.0,
        }
    }
}

#[inline]
fn sigmoid(x: f32) -> f32 {
    // Numerically stable sigmoid.
    if x >= 0.0 {
        let z = (-x).exp();
        1.0 / (1.0 + z)
    } else {
        let z = x.exp();
        z / (1.0 + z)
    }
}
