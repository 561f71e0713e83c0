//! Training driver.
//!
//! One epoch walks the training points in order: forward, backward, and a
//! weight update after every `batch_size`-th point. Examples left over after
//! the last full batch stay accumulated and are folded into the first update
//! of the next epoch.

use crate::{Error, ErrorFunction, Example2D, FeatureSet, Network, Result, Sgd};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainConfig {
    pub learning_rate: f32,
    pub regularization_rate: f32,
    /// Number of examples accumulated per weight update.
    pub batch_size: usize,
    pub error: ErrorFunction,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.03,
            regularization_rate: 0.0,
            batch_size: 10,
            error: ErrorFunction::Square,
        }
    }
}

impl TrainConfig {
    pub fn validate(&self) -> Result<()> {
        self.sgd().map(|_| ())
    }

    fn sgd(&self) -> Result<Sgd> {
        if self.batch_size == 0 {
            return Err(Error::InvalidConfig("batch_size must be > 0".to_owned()));
        }
        Sgd::new(self.learning_rate, self.regularization_rate)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochReport {
    /// 1-based epoch counter.
    pub iteration: usize,
    pub loss_train: f32,
    pub loss_test: Option<f32>,
}

impl Network {
    /// Checks that `features` produces the inputs this network was built for.
    pub fn check_features(&self, features: &FeatureSet) -> Result<()> {
        let expected = self.input_ids();
        if !features.ids().eq(expected.iter().copied()) {
            return Err(Error::InvalidConfig(format!(
                "features {:?} do not match network inputs {expected:?}",
                features.ids().collect::<Vec<_>>()
            )));
        }
        Ok(())
    }

    /// Mean error of the network over `points`.
    ///
    /// Runs a forward pass per point, so node outputs reflect the last point.
    pub fn loss(
        &mut self,
        points: &[Example2D],
        features: &FeatureSet,
        error: ErrorFunction,
    ) -> Result<f32> {
        if points.is_empty() {
            return Err(Error::InvalidData("points must not be empty".to_owned()));
        }
        self.check_features(features)?;

        let mut input = vec![0.0_f32; features.len()];
        let mut total = 0.0_f32;
        for p in points {
            features.construct_input_into(p.x, p.y, &mut input);
            let output = self.forward_prop(&input)?;
            total += error.error(output, p.label);
        }
        Ok(total / points.len() as f32)
    }

    /// Runs one training epoch over `points` and returns the mean training loss
    /// measured after the epoch.
    pub fn train_epoch(
        &mut self,
        points: &[Example2D],
        features: &FeatureSet,
        cfg: &TrainConfig,
    ) -> Result<f32> {
        let sgd = cfg.sgd()?;
        if points.is_empty() {
            return Err(Error::InvalidData(
                "train points must not be empty".to_owned(),
            ));
        }
        self.check_features(features)?;

        let mut input = vec![0.0_f32; features.len()];
        for (i, p) in points.iter().enumerate() {
            features.construct_input_into(p.x, p.y, &mut input);
            self.forward_prop(&input)?;
            self.back_prop(p.label, cfg.error);
            if (i + 1) % cfg.batch_size == 0 {
                sgd.step(self);
            }
        }

        self.loss(points, features, cfg.error)
    }
}

/// Owns a network together with the feature mapping and hyperparameters used
/// to train it, and counts epochs.
#[derive(Debug, Clone)]
pub struct Trainer {
    network: Network,
    features: FeatureSet,
    config: TrainConfig,
    iteration: usize,
}

impl Trainer {
    pub fn new(network: Network, features: FeatureSet, config: TrainConfig) -> Result<Self> {
        config.validate()?;
        network.check_features(&features)?;
        Ok(Self {
            network,
            features,
            config,
            iteration: 0,
        })
    }

    #[inline]
    pub fn network(&self) -> &Network {
        &self.network
    }

    /// Mutable access for reads that run forward passes or for manual edits.
    #[inline]
    pub fn network_mut(&mut self) -> &mut Network {
        &mut self.network
    }

    #[inline]
    pub fn features(&self) -> &FeatureSet {
        &self.features
    }

    #[inline]
    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    /// Replaces the hyperparameters; takes effect at the next step.
    pub fn set_config(&mut self, config: TrainConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    #[inline]
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn into_network(self) -> Network {
        self.network
    }

    /// Swaps in a freshly built network and restarts the epoch counter.
    pub fn reset(&mut self, network: Network) -> Result<()> {
        network.check_features(&self.features)?;
        self.network = network;
        self.iteration = 0;
        Ok(())
    }

    /// Trains for one epoch on `train`, then measures the test loss if given.
    pub fn step(&mut self, train: &[Example2D], test: Option<&[Example2D]>) -> Result<EpochReport> {
        let loss_train = self
            .network
            .train_epoch(train, &self.features, &self.config)?;
        let loss_test = match test {
            Some(points) if !points.is_empty() => {
                Some(self.network.loss(points, &self.features, self.config.error)?)
            }
            _ => None,
        };
        self.iteration += 1;

        if !loss_train.is_finite() {
            log::warn!(
                "training loss is {loss_train} at iteration {}; consider a smaller learning rate",
                self.iteration
            );
        }
        log::debug!(
            "iteration={} loss_train={loss_train:.4} loss_test={loss_test:?}",
            self.iteration
        );

        Ok(EpochReport {
            iteration: self.iteration,
            loss_train,
            loss_test,
        })
    }

    /// Runs `epochs` steps and returns one report per epoch.
    pub fn run(
        &mut self,
        epochs: usize,
        train: &[Example2D],
        test: Option<&[Example2D]>,
    ) -> Result<Vec<EpochReport>> {
        let mut reports = Vec::with_capacity(epochs);
        for _ in 0..epochs {
            reports.push(self.step(train, test)?);
        }
        Ok(reports)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Activation, InputFeature, NetworkBuilder};

    fn line_points() -> Vec<Example2D> {
        (0..20)
            .map(|i| {
                let x = i as f32 / 10.0 - 1.0;
                Example2D::new(x, 0.5, if x > 0.0 { 1.0 } else { -1.0 })
            })
            .collect()
    }

    #[test]
    fn config_validation() {
        assert!(TrainConfig::default().validate().is_ok());
        let bad = TrainConfig {
            batch_size: 0,
            ..TrainConfig::default()
        };
        assert!(bad.validate().is_err());
        let bad = TrainConfig {
            learning_rate: -1.0,
            ..TrainConfig::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn features_must_match_inputs() {
        let net = NetworkBuilder::new(&[2, 2, 1]).build_with_seed(0).unwrap();
        let other = FeatureSet::new([InputFeature::X, InputFeature::SinY]).unwrap();
        assert!(net.check_features(&FeatureSet::default()).is_ok());
        assert!(net.check_features(&other).is_err());
        assert!(Trainer::new(net, other, TrainConfig::default()).is_err());
    }

    #[test]
    fn loss_rejects_empty_points() {
        let mut net = NetworkBuilder::new(&[2, 1]).build_with_seed(0).unwrap();
        let err = net
            .loss(&[], &FeatureSet::default(), ErrorFunction::Square)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn loss_is_mean_error() {
        let mut net = NetworkBuilder::new(&[2, 1])
            .output_activation(Activation::Linear)
            .init_zero(true)
            .build_with_seed(0)
            .unwrap();
        let points = [Example2D::new(0.0, 0.0, 1.0), Example2D::new(1.0, 1.0, 3.0)];
        let loss = net
            .loss(&points, &FeatureSet::default(), ErrorFunction::Square)
            .unwrap();
        // (0.5 * 1 + 0.5 * 9) / 2
        assert_eq!(loss, 2.5);
    }

    #[test]
    fn partial_batches_stay_accumulated() {
        let mut net = NetworkBuilder::new(&[2, 2, 1]).build_with_seed(0).unwrap();
        let points = line_points();
        let cfg = TrainConfig {
            batch_size: 3,
            ..TrainConfig::default()
        };
        net.train_epoch(&points[..7], &FeatureSet::default(), &cfg)
            .unwrap();

        // 7 = 2 * 3 + 1: one example waits for the next update.
        for (_, link) in net.links() {
            assert_eq!(link.num_accumulated_ders(), 1);
        }
        net.for_each_node(true, |n| assert_eq!(n.num_accumulated_ders(), 1));
    }

    #[test]
    fn trainer_counts_iterations_and_reduces_loss() {
        let features = FeatureSet::default();
        let net = NetworkBuilder::for_features(&features, &[3])
            .build_with_seed(1)
            .unwrap();
        let cfg = TrainConfig {
            learning_rate: 0.1,
            batch_size: 1,
            ..TrainConfig::default()
        };
        let mut trainer = Trainer::new(net, features, cfg).unwrap();
        let points = line_points();

        let initial = trainer
            .network_mut()
            .loss(&points, &FeatureSet::default(), ErrorFunction::Square)
            .unwrap();
        let reports = trainer.run(50, &points, Some(&points)).unwrap();

        assert_eq!(trainer.iteration(), 50);
        assert_eq!(reports.len(), 50);
        assert_eq!(reports[49].iteration, 50);
        let last = reports[49];
        assert!(last.loss_train < initial, "{} >= {initial}", last.loss_train);
        assert_eq!(last.loss_test, Some(last.loss_train));

        let fresh = NetworkBuilder::new(&[2, 5, 1]).build_with_seed(2).unwrap();
        trainer.reset(fresh).unwrap();
        assert_eq!(trainer.iteration(), 0);
        assert_eq!(trainer.network().shape(), [2, 5, 1]);

        let wrong = NetworkBuilder::new(&[1, 1])
            .input_ids(["sinX"])
            .build_with_seed(0)
            .unwrap();
        assert!(trainer.reset(wrong).is_err());
    }
}
