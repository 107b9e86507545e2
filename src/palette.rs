//! A generated set of swatches plus their selection against named aesthetic
//! [`Target`]s.

use std::collections::HashSet;

use crate::color::Argb;
use crate::swatch::Swatch;
use crate::target::Target;

/// The result of palette generation: every swatch the quantizer produced,
/// together with the best-matching swatch (if any) for each requested
/// [`Target`].
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Palette {
    swatches: Vec<Swatch>,
    targets: Vec<Target>,
    selected: Vec<Option<Swatch>>,
}

impl Palette {
    pub(crate) fn generate_from(swatches: Vec<Swatch>, mut targets: Vec<Target>) -> Self {
        for target in &mut targets {
            target.normalize_weights();
        }

        let max_population = dominant_swatch(&swatches).map_or(1, Swatch::population).max(1);

        let mut used: HashSet<Argb> = HashSet::new();
        let mut selected: Vec<Option<Swatch>> = Vec::with_capacity(targets.len());

        for target in &targets {
            let swatch = best_swatch_for_target(&swatches, target, &used, max_population);

            if target.is_exclusive() {
                if let Some(s) = &swatch {
                    used.insert(s.rgb());
                }
            }

            selected.push(swatch);
        }

        Self {
            swatches,
            targets,
            selected,
        }
    }

    /// Every swatch the quantizer produced, in quantizer output order.
    pub fn swatches(&self) -> &[Swatch] {
        &self.swatches
    }

    /// The targets this palette was selected against, in request order.
    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// The highest-population swatch, ties broken in favor of the
    /// earliest-produced swatch. `None` if the palette has no swatches.
    pub fn dominant_swatch(&self) -> Option<&Swatch> {
        dominant_swatch(&self.swatches)
    }

    /// The dominant swatch's color.
    pub fn dominant_color(&self) -> Option<Argb> {
        self.dominant_swatch().map(Swatch::rgb)
    }

    /// Looks up the swatch selected for `target`, by value equality against
    /// the targets this palette was generated with.
    pub fn swatch_for(&self, target: Target) -> Option<&Swatch> {
        self.targets
            .iter()
            .position(|&t| t == target)
            .and_then(|i| self.selected[i].as_ref())
    }

    /// The color of the swatch selected for `target`.
    pub fn color_for(&self, target: Target) -> Option<Argb> {
        self.swatch_for(target).map(Swatch::rgb)
    }

    pub fn light_vibrant_swatch(&self) -> Option<&Swatch> {
        self.swatch_for(Target::light_vibrant())
    }

    pub fn light_vibrant_color(&self) -> Option<Argb> {
        self.color_for(Target::light_vibrant())
    }

    pub fn vibrant_swatch(&self) -> Option<&Swatch> {
        self.swatch_for(Target::vibrant())
    }

    pub fn vibrant_color(&self) -> Option<Argb> {
        self.color_for(Target::vibrant())
    }

    pub fn dark_vibrant_swatch(&self) -> Option<&Swatch> {
        self.swatch_for(Target::dark_vibrant())
    }

    pub fn dark_vibrant_color(&self) -> Option<Argb> {
        self.color_for(Target::dark_vibrant())
    }

    pub fn light_muted_swatch(&self) -> Option<&Swatch> {
        self.swatch_for(Target::light_muted())
    }

    pub fn light_muted_color(&self) -> Option<Argb> {
        self.color_for(Target::light_muted())
    }

    pub fn muted_swatch(&self) -> Option<&Swatch> {
        self.swatch_for(Target::muted())
    }

    pub fn muted_color(&self) -> Option<Argb> {
        self.color_for(Target::muted())
    }

    pub fn dark_muted_swatch(&self) -> Option<&Swatch> {
        self.swatch_for(Target::dark_muted())
    }

    pub fn dark_muted_color(&self) -> Option<Argb> {
        self.color_for(Target::dark_muted())
    }
}

fn dominant_swatch(swatches: &[Swatch]) -> Option<&Swatch> {
    let mut best: Option<&Swatch> = None;

    for swatch in swatches {
        match best {
            Some(current) if current.population() >= swatch.population() => {}
            _ => best = Some(swatch),
        }
    }

    best
}

/// Finds the highest-scoring swatch for `target`, skipping swatches that
/// fall outside the target's saturation/lightness bounds and, separately,
/// swatches already claimed by an earlier exclusive target.
fn best_swatch_for_target(
    swatches: &[Swatch],
    target: &Target,
    used: &HashSet<Argb>,
    max_population: u32,
) -> Option<Swatch> {
    let mut best: Option<(&Swatch, f32)> = None;

    for swatch in swatches {
        if used.contains(&swatch.rgb()) {
            continue;
        }

        if !should_be_scored_for_target(swatch, target) {
            continue;
        }

        let score = generate_score(swatch, target, max_population);

        match best {
            Some((_, best_score)) if best_score >= score => {}
            _ => best = Some((swatch, score)),
        }
    }

    best.map(|(s, _)| s.clone())
}

fn should_be_scored_for_target(swatch: &Swatch, target: &Target) -> bool {
    let (_, s, l) = swatch.hsl();
    s >= target.minimum_saturation()
        && s <= target.maximum_saturation()
        && l >= target.minimum_lightness()
        && l <= target.maximum_lightness()
}

fn generate_score(swatch: &Swatch, target: &Target, max_population: u32) -> f32 {
    let (_, s, l) = swatch.hsl();

    let saturation_score = if target.saturation_weight() > 0.0 {
        target.saturation_weight() * (1.0 - (s - target.target_saturation()).abs())
    } else {
        0.0
    };

    let lightness_score = if target.lightness_weight() > 0.0 {
        target.lightness_weight() * (1.0 - (l - target.target_lightness()).abs())
    } else {
        0.0
    };

    let population_score = if target.population_weight() > 0.0 {
        target.population_weight() * (swatch.population() as f32 / max_population as f32)
    } else {
        0.0
    };

    saturation_score + lightness_score + population_score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swatch(r: u8, g: u8, b: u8, population: u32) -> Swatch {
        Swatch::new(Argb::rgb(r, g, b), population)
    }

    #[test]
    fn dominant_swatch_picks_highest_population() {
        let palette = Palette::generate_from(
            vec![swatch(10, 10, 10, 5), swatch(200, 200, 200, 50), swatch(0, 0, 0, 1)],
            vec![],
        );

        assert_eq!(palette.dominant_color(), Some(Argb::rgb(200, 200, 200)));
    }

    #[test]
    fn dominant_swatch_ties_prefer_earliest() {
        let palette = Palette::generate_from(vec![swatch(10, 10, 10, 5), swatch(20, 20, 20, 5)], vec![]);

        assert_eq!(palette.dominant_color(), Some(Argb::rgb(10, 10, 10)));
    }

    #[test]
    fn dominant_swatch_is_none_for_empty_palette() {
        let palette = Palette::generate_from(vec![], vec![]);
        assert_eq!(palette.dominant_swatch(), None);
    }

    #[test]
    fn vibrant_target_selects_saturated_swatch_over_muted() {
        // Saturated red: h=0, s=1.0, l=0.5 — squarely in vibrant's window.
        let vibrant_candidate = swatch(255, 0, 0, 10);
        // Desaturated mid-gray: s=0.0 — outside vibrant's minimum saturation.
        let muted_candidate = swatch(128, 128, 128, 100);

        let palette = Palette::generate_from(vec![vibrant_candidate, muted_candidate], vec![Target::vibrant()]);

        assert_eq!(palette.vibrant_color(), Some(Argb::rgb(255, 0, 0)));
    }

    #[test]
    fn non_exclusive_targets_may_share_a_swatch() {
        let shared = swatch(255, 0, 0, 10);
        let targets = vec![
            Target::builder().exclusive(false).build(),
            Target::builder().exclusive(false).build(),
        ];

        let palette = Palette::generate_from(vec![shared], targets.clone());

        assert_eq!(palette.swatch_for(targets[0]), palette.swatch_for(targets[1]));
    }

    #[test]
    fn exclusive_targets_do_not_share_a_swatch() {
        let only = swatch(255, 0, 0, 10);
        let targets = vec![Target::builder().exclusive(true).build(), Target::builder().exclusive(true).build()];

        let palette = Palette::generate_from(vec![only], targets.clone());

        assert!(palette.swatch_for(targets[0]).is_some());
        assert!(palette.swatch_for(targets[1]).is_none());
    }

    #[test]
    fn no_eligible_swatch_yields_none_for_target() {
        let out_of_range = swatch(128, 128, 128, 100);
        let palette = Palette::generate_from(vec![out_of_range], vec![Target::vibrant()]);
        assert_eq!(palette.vibrant_swatch(), None);
    }

    #[test]
    fn unknown_target_value_returns_none() {
        let palette = Palette::generate_from(vec![swatch(255, 0, 0, 1)], vec![Target::vibrant()]);
        assert_eq!(palette.swatch_for(Target::muted()), None);
    }
}
