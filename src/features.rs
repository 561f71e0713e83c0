//! Input features.
//!
//! The network is fed 2-D points. A [`FeatureSet`] maps a point `(x, y)` to the
//! input vector, one value per selected [`InputFeature`], always in catalogue
//! order. The feature ids double as the ids of the input nodes.

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// A derived input computed from a 2-D point.
pub enum InputFeature {
    X,
    Y,
    XSquared,
    YSquared,
    XTimesY,
    SinX,
    SinY,
}

impl InputFeature {
    /// Catalogue order. Input vectors follow this order.
    pub const ALL: [InputFeature; 7] = [
        InputFeature::X,
        InputFeature::Y,
        InputFeature::XSquared,
        InputFeature::YSquared,
        InputFeature::XTimesY,
        InputFeature::SinX,
        InputFeature::SinY,
    ];

    /// Node id used for the matching input node.
    pub fn id(self) -> &'static str {
        match self {
            InputFeature::X => "x",
            InputFeature::Y => "y",
            InputFeature::XSquared => "xSquared",
            InputFeature::YSquared => "ySquared",
            InputFeature::XTimesY => "xTimesY",
            InputFeature::SinX => "sinX",
            InputFeature::SinY => "sinY",
        }
    }

    /// Display label (TeX-ish).
    pub fn label(self) -> &'static str {
        match self {
            InputFeature::X => "X_1",
            InputFeature::Y => "X_2",
            InputFeature::XSquared => "X_1^2",
            InputFeature::YSquared => "X_2^2",
            InputFeature::XTimesY => "X_1X_2",
            InputFeature::SinX => "sin(X_1)",
            InputFeature::SinY => "sin(X_2)",
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.id() == id)
    }

    #[inline]
    pub fn apply(self, x: f32, y: f32) -> f32 {
        match self {
            InputFeature::X => x,
            InputFeature::Y => y,
            InputFeature::XSquared => x * x,
            InputFeature::YSquared => y * y,
            InputFeature::XTimesY => x * y,
            InputFeature::SinX => x.sin(),
            InputFeature::SinY => y.sin(),
        }
    }
}

/// A non-empty selection of input features, kept in catalogue order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSet {
    features: Vec<InputFeature>,
}

impl Default for FeatureSet {
    fn default() -> Self {
        Self {
            features: vec![InputFeature::X, InputFeature::Y],
        }
    }
}

impl FeatureSet {
    /// Selects `features`; duplicates are dropped and the order is normalized.
    pub fn new<I>(features: I) -> Result<Self>
    where
        I: IntoIterator<Item = InputFeature>,
    {
        let mut features: Vec<InputFeature> = features.into_iter().collect();
        features.sort_unstable();
        features.dedup();
        if features.is_empty() {
            return Err(Error::InvalidConfig(
                "at least one input feature must be selected".to_owned(),
            ));
        }
        Ok(Self { features })
    }

    /// Selects features by id (`"x"`, `"sinY"`, ...).
    pub fn from_ids<I, S>(ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut features = Vec::new();
        for id in ids {
            let id = id.as_ref();
            let feature = InputFeature::from_id(id)
                .ok_or_else(|| Error::InvalidConfig(format!("unknown input feature {id:?}")))?;
            features.push(feature);
        }
        Self::new(features)
    }

    /// Every feature in the catalogue.
    pub fn all() -> Self {
        Self {
            features: InputFeature::ALL.to_vec(),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    #[inline]
    pub fn features(&self) -> &[InputFeature] {
        &self.features
    }

    pub fn contains(&self, feature: InputFeature) -> bool {
        self.features.contains(&feature)
    }

    /// Input node ids, in input order.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.features.iter().map(|f| f.id())
    }

    /// Input vector for the point `(x, y)`.
    pub fn construct_input(&self, x: f32, y: f32) -> Vec<f32> {
        let mut out = vec![0.0; self.features.len()];
        self.construct_input_into(x, y, &mut out);
        out
    }

    /// Non-allocating variant of [`construct_input`](Self::construct_input).
    ///
    /// Panics if `out.len() != self.len()`.
    pub fn construct_input_into(&self, x: f32, y: f32, out: &mut [f32]) {
        assert_eq!(
            out.len(),
            self.features.len(),
            "output len {} does not match feature count {}",
            out.len(),
            self.features.len()
        );
        for (slot, feature) in out.iter_mut().zip(&self.features) {
            *slot = feature.apply(x, y);
        }
    }
}
