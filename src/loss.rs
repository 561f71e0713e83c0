//! Error (loss) functions.
//!
//! The network has a single scalar output, so an error function compares one
//! prediction with one target. It is used like:
//!
//! - run `network.forward_prop(...)`
//! - run `network.back_prop(target, ErrorFunction::Square)`, which seeds the output
//!   node with `ErrorFunction::derivative`
//! - every `batch_size` examples, `network.update_weights(...)`

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Supported error functions.
pub enum ErrorFunction {
    /// Half squared error: `0.5 * (pred - target)^2`.
    #[default]
    Square,
}

impl ErrorFunction {
    #[inline]
    pub fn error(self, predicted: f32, target: f32) -> f32 {
        match self {
            ErrorFunction::Square => {
                let diff = predicted - target;
                0.5 * diff * diff
            }
        }
    }

    /// Derivative of [`error`](Self::error) with respect to `predicted`.
    #[inline]
    pub fn derivative(self, predicted: f32, target: f32) -> f32 {
        match self {
            ErrorFunction::Square => predicted - target,
        }
    }
}
