//! Weight regularization.
//!
//! Links carry an `Option<Regularization>`; `None` means no penalty term is
//! applied at all during the weight update.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Penalty applied to link weights during the weight update.
pub enum Regularization {
    /// `|w|`. Weights driven across zero by the penalty are pruned.
    L1,
    /// `w^2 / 2`.
    L2,
}

impl Regularization {
    pub fn name(self) -> &'static str {
        match self {
            Regularization::L1 => "L1",
            Regularization::L2 => "L2",
        }
    }

    /// Penalty magnitude.
    #[inline]
    pub fn output(self, weight: f32) -> f32 {
        match self {
            Regularization::L1 => weight.abs(),
            Regularization::L2 => 0.5 * weight * weight,
        }
    }

    /// Derivative of the penalty with respect to the weight.
    #[inline]
    pub fn derivative(self, weight: f32) -> f32 {
        match self {
            Regularization::L1 => {
                if weight < 0.0 {
                    -1.0
                } else if weight > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Regularization::L2 => weight,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn l1_is_sign_with_zero_at_origin() {
        assert_eq!(Regularization::L1.output(-0.3), 0.3);
        assert_eq!(Regularization::L1.derivative(-0.3), -1.0);
        assert_eq!(Regularization::L1.derivative(0.3), 1.0);
        assert_eq!(Regularization::L1.derivative(0.0), 0.0);
    }

    #[test]
    fn l2_is_half_square() {
        assert_eq!(Regularization::L2.output(2.0), 2.0);
        assert_eq!(Regularization::L2.derivative(-0.5), -0.5);
    }
}
