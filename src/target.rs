//! Target scoring profiles used to select swatches for named aesthetic
//! slots (vibrant/muted × dark/normal/light).

const WEIGHT_SATURATION: f32 = 0.24;
const WEIGHT_LUMA: f32 = 0.52;
const WEIGHT_POPULATION: f32 = 0.24;

const MIN_VIBRANT_SATURATION: f32 = 0.35;
const TARGET_VIBRANT_SATURATION: f32 = 1.0;

const TARGET_MUTED_SATURATION: f32 = 0.3;
const MAX_MUTED_SATURATION: f32 = 0.4;

const MIN_LIGHT_LUMA: f32 = 0.55;
const TARGET_LIGHT_LUMA: f32 = 0.74;

const TARGET_DARK_LUMA: f32 = 0.26;
const MAX_DARK_LUMA: f32 = 0.45;

const MIN_NORMAL_LUMA: f32 = 0.3;
const TARGET_NORMAL_LUMA: f32 = 0.5;
const MAX_NORMAL_LUMA: f32 = 0.7;

/// An immutable scoring profile used to pick the best-matching swatch for a
/// named aesthetic target.
///
/// Built either via one of the six preset constructors ([`Target::vibrant`]
/// and friends) or via [`Target::builder`] for a custom profile.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Target {
    // (min, target, max)
    saturation_targets: (f32, f32, f32),
    // (min, target, max)
    lightness_targets: (f32, f32, f32),
    // (saturation, lightness, population)
    weights: (f32, f32, f32),
    exclusive: bool,
}

impl Default for Target {
    fn default() -> Self {
        Self::new()
    }
}

impl Target {
    /// A blank target with the default range `[0, 0.5, 1]` on both axes and
    /// the standard `(0.24, 0.52, 0.24)` weighting.
    pub const fn new() -> Self {
        Self {
            saturation_targets: (0.0, 0.5, 1.0),
            lightness_targets: (0.0, 0.5, 1.0),
            weights: (WEIGHT_SATURATION, WEIGHT_LUMA, WEIGHT_POPULATION),
            exclusive: true,
        }
    }

    pub const fn light_vibrant() -> Self {
        Self {
            saturation_targets: (MIN_VIBRANT_SATURATION, TARGET_VIBRANT_SATURATION, 1.0),
            lightness_targets: (MIN_LIGHT_LUMA, TARGET_LIGHT_LUMA, 1.0),
            ..Self::new()
        }
    }

    pub const fn vibrant() -> Self {
        Self {
            saturation_targets: (MIN_VIBRANT_SATURATION, TARGET_VIBRANT_SATURATION, 1.0),
            lightness_targets: (MIN_NORMAL_LUMA, TARGET_NORMAL_LUMA, MAX_NORMAL_LUMA),
            ..Self::new()
        }
    }

    pub const fn dark_vibrant() -> Self {
        Self {
            saturation_targets: (MIN_VIBRANT_SATURATION, TARGET_VIBRANT_SATURATION, 1.0),
            lightness_targets: (0.0, TARGET_DARK_LUMA, MAX_DARK_LUMA),
            ..Self::new()
        }
    }

    pub const fn light_muted() -> Self {
        Self {
            saturation_targets: (0.0, TARGET_MUTED_SATURATION, MAX_MUTED_SATURATION),
            lightness_targets: (MIN_LIGHT_LUMA, TARGET_LIGHT_LUMA, 1.0),
            ..Self::new()
        }
    }

    pub const fn muted() -> Self {
        Self {
            saturation_targets: (0.0, TARGET_MUTED_SATURATION, MAX_MUTED_SATURATION),
            lightness_targets: (MIN_NORMAL_LUMA, TARGET_NORMAL_LUMA, MAX_NORMAL_LUMA),
            ..Self::new()
        }
    }

    pub const fn dark_muted() -> Self {
        Self {
            saturation_targets: (0.0, TARGET_MUTED_SATURATION, MAX_MUTED_SATURATION),
            lightness_targets: (0.0, TARGET_DARK_LUMA, MAX_DARK_LUMA),
            ..Self::new()
        }
    }

    /// The six built-in targets, in the order a [`crate::Palette`] selects
    /// them against by default.
    pub const fn default_targets() -> [Target; 6] {
        [
            Self::light_vibrant(),
            Self::vibrant(),
            Self::dark_vibrant(),
            Self::light_muted(),
            Self::muted(),
            Self::dark_muted(),
        ]
    }

    /// Starts a [`TargetBuilder`] for a custom profile.
    pub const fn builder() -> TargetBuilder {
        TargetBuilder::new()
    }

    /// Normalizes this target's weights in place: each positive weight is
    /// divided by the sum of positive weights; zero (or negative) weights
    /// are left untouched. If all weights are non-positive, no change is
    /// made and every component score will evaluate to zero.
    pub(crate) fn normalize_weights(&mut self) {
        let sum = self.weights.0.max(0.0) + self.weights.1.max(0.0) + self.weights.2.max(0.0);

        if sum == 0.0 {
            return;
        }

        if self.weights.0 > 0.0 {
            self.weights.0 /= sum;
        }
        if self.weights.1 > 0.0 {
            self.weights.1 /= sum;
        }
        if self.weights.2 > 0.0 {
            self.weights.2 /= sum;
        }
    }

    pub fn minimum_saturation(self) -> f32 {
        self.saturation_targets.0
    }

    pub fn target_saturation(self) -> f32 {
        self.saturation_targets.1
    }

    pub fn maximum_saturation(self) -> f32 {
        self.saturation_targets.2
    }

    pub fn minimum_lightness(self) -> f32 {
        self.lightness_targets.0
    }

    pub fn target_lightness(self) -> f32 {
        self.lightness_targets.1
    }

    pub fn maximum_lightness(self) -> f32 {
        self.lightness_targets.2
    }

    pub fn saturation_weight(self) -> f32 {
        self.weights.0
    }

    pub fn lightness_weight(self) -> f32 {
        self.weights.1
    }

    pub fn population_weight(self) -> f32 {
        self.weights.2
    }

    pub fn is_exclusive(self) -> bool {
        self.exclusive
    }
}

/// A chainable builder for a custom [`Target`].
///
/// Every scalar left unset retains `Target::new()`'s default for that slot.
#[derive(Debug, Clone, Copy)]
pub struct TargetBuilder {
    target: Target,
}

impl Default for TargetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TargetBuilder {
    pub const fn new() -> Self {
        Self { target: Target::new() }
    }

    pub const fn minimum_saturation(mut self, v: f32) -> Self {
        self.target.saturation_targets.0 = v;
        self
    }

    pub const fn target_saturation(mut self, v: f32) -> Self {
        self.target.saturation_targets.1 = v;
        self
    }

    pub const fn maximum_saturation(mut self, v: f32) -> Self {
        self.target.saturation_targets.2 = v;
        self
    }

    pub const fn minimum_lightness(mut self, v: f32) -> Self {
        self.target.lightness_targets.0 = v;
        self
    }

    pub const fn target_lightness(mut self, v: f32) -> Self {
        self.target.lightness_targets.1 = v;
        self
    }

    pub const fn maximum_lightness(mut self, v: f32) -> Self {
        self.target.lightness_targets.2 = v;
        self
    }

    pub const fn saturation_weight(mut self, v: f32) -> Self {
        self.target.weights.0 = v;
        self
    }

    pub const fn lightness_weight(mut self, v: f32) -> Self {
        self.target.weights.1 = v;
        self
    }

    pub const fn population_weight(mut self, v: f32) -> Self {
        self.target.weights.2 = v;
        self
    }

    pub const fn exclusive(mut self, v: bool) -> Self {
        self.target.exclusive = v;
        self
    }

    pub const fn build(self) -> Target {
        self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_weights_sums_to_one() {
        let mut t = Target::new();
        t.normalize_weights();
        let sum = t.saturation_weight() + t.lightness_weight() + t.population_weight();
        assert!((sum - 1.0).abs() < 1e-6);
    }

    #[test]
    fn normalize_weights_keeps_zero_weights_zero() {
        let mut t = Target::builder()
            .saturation_weight(0.0)
            .lightness_weight(1.0)
            .population_weight(0.0)
            .build();
        t.normalize_weights();
        assert_eq!(t.saturation_weight(), 0.0);
        assert_eq!(t.population_weight(), 0.0);
        assert_eq!(t.lightness_weight(), 1.0);
    }

    #[test]
    fn normalize_weights_all_zero_stays_zero() {
        let mut t = Target::builder()
            .saturation_weight(0.0)
            .lightness_weight(0.0)
            .population_weight(0.0)
            .build();
        t.normalize_weights();
        assert_eq!(t.saturation_weight(), 0.0);
        assert_eq!(t.lightness_weight(), 0.0);
        assert_eq!(t.population_weight(), 0.0);
    }

    #[test]
    fn default_targets_has_six() {
        assert_eq!(Target::default_targets().len(), 6);
    }

    #[test]
    fn builder_unset_slots_keep_defaults() {
        let t = Target::builder().target_saturation(0.9).build();
        assert_eq!(t.minimum_saturation(), 0.0);
        assert_eq!(t.maximum_saturation(), 1.0);
        assert_eq!(t.target_saturation(), 0.9);
        assert!(t.is_exclusive());
    }
}
