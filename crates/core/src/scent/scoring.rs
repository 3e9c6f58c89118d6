//! Scoring algorithms for scent recommendations

use std::collections::HashSet;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use super::tables::{harmonizes, mood_complements};
use super::{
    INTENSITY_COMPLEMENT_POINTS, MOOD_COMPLEMENT_POINTS, NEUTRAL_NOTE_SCORE,
    NEUTRAL_PREFERENCE_RATIO, NOTE_HARMONY_CAP, NOTE_HARMONY_POINTS, SEASON_COMPLEMENT_POINTS,
};
use crate::domain::recommendation::MatchingAttributes;
use crate::domain::scent::{
    CustomerScentPreferences, Intensity, Mood, ScentNote, ScentProfile, Season,
};
use crate::errors::DomainError;

/// Weights for the four blended dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    /// Weight for note overlap (default: 0.40)
    pub notes: f64,
    /// Weight for intensity agreement (default: 0.20)
    pub intensity: f64,
    /// Weight for mood overlap (default: 0.20)
    pub mood: f64,
    /// Weight for season overlap (default: 0.20)
    pub season: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        super::DEFAULT_WEIGHTS
    }
}

impl ScoringWeights {
    pub fn total(&self) -> f64 {
        self.notes + self.intensity + self.mood + self.season
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        let weights = [self.notes, self.intensity, self.mood, self.season];
        if weights.iter().any(|weight| !weight.is_finite() || *weight < 0.0) {
            return Err(DomainError::InvariantViolation(
                "scoring weights must be finite and non-negative".to_owned(),
            ));
        }
        if (self.total() - 1.0).abs() > 0.001 {
            return Err(DomainError::InvariantViolation(format!(
                "scoring weights must sum to 1.0 (got {:.3})",
                self.total()
            )));
        }
        Ok(())
    }

    /// Blend four ratios in [0, 1] into a 0-100 score.
    pub fn blend(&self, notes: f64, intensity: f64, mood: f64, season: f64) -> u8 {
        let total = notes.clamp(0.0, 1.0) * self.notes
            + intensity.clamp(0.0, 1.0) * self.intensity
            + mood.clamp(0.0, 1.0) * self.mood
            + season.clamp(0.0, 1.0) * self.season;

        to_score(total * 100.0)
    }
}

/// How the overlap of two sets is normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlapDenominator {
    /// `|A ∩ B| / max(|A|, |B|)`; penalizes lists of unequal breadth.
    Max,
    /// `|A ∩ B| / |A ∪ B|`, the Jaccard index.
    Union,
}

/// Overlap ratio in [0, 1] between two lists, treated as sets.
///
/// Returns 0 when either side is empty.
pub fn overlap_ratio<T: Eq + Hash>(
    source: &[T],
    target: &[T],
    denominator: OverlapDenominator,
) -> f64 {
    let source: HashSet<&T> = source.iter().collect();
    let target: HashSet<&T> = target.iter().collect();
    if source.is_empty() || target.is_empty() {
        return 0.0;
    }

    let shared = source.intersection(&target).count() as f64;
    let base = match denominator {
        OverlapDenominator::Max => source.len().max(target.len()),
        OverlapDenominator::Union => source.union(&target).count(),
    };

    shared / base as f64
}

/// Unclamped note score in [-100, 200].
///
/// Per note: a favorite adds `intensity / 10 * 2`, an avoided note subtracts
/// `intensity / 10`, anything else adds `intensity / 20`. The mean is scaled by 100.
/// Favorites win when a name is on both lists. No notes yields [`NEUTRAL_NOTE_SCORE`].
pub fn raw_note_score<'a>(
    notes: impl IntoIterator<Item = &'a ScentNote>,
    favorites: &[String],
    avoided: &[String],
) -> f64 {
    let mut total = 0.0;
    let mut count = 0usize;

    for note in notes {
        let strength = f64::from(note.intensity);
        total += if favorites.iter().any(|name| *name == note.name) {
            strength / 10.0 * 2.0
        } else if avoided.iter().any(|name| *name == note.name) {
            -(strength / 10.0)
        } else {
            strength / 20.0
        };
        count += 1;
    }

    if count == 0 {
        return NEUTRAL_NOTE_SCORE;
    }

    total / count as f64 * 100.0
}

/// [`raw_note_score`] clamped to [0, 100].
pub fn note_match_score<'a>(
    notes: impl IntoIterator<Item = &'a ScentNote>,
    favorites: &[String],
    avoided: &[String],
) -> f64 {
    raw_note_score(notes, favorites, avoided).clamp(0.0, 100.0)
}

/// 100 when the intensity is among the preferred ones, otherwise 0.
pub fn intensity_match(intensity: Intensity, preferred: &[Intensity]) -> u8 {
    if preferred.contains(&intensity) {
        100
    } else {
        0
    }
}

/// 1.0 for identical, 0.5 for adjacent, 0.0 for opposite intensities.
pub fn intensity_similarity(left: Intensity, right: Intensity) -> f64 {
    let distance = f64::from(left.level().abs_diff(right.level()));
    1.0 - distance / 2.0
}

/// Pairing points for two intensities, scaled from the intensity distance.
pub fn intensity_complement_score(left: Intensity, right: Intensity) -> u8 {
    to_score(intensity_similarity(left, right) * f64::from(INTENSITY_COMPLEMENT_POINTS))
}

/// Season overlap on a 0-100 scale, rounded to two decimals.
///
/// Uses the union denominator: `[Spring, Summer]` against `[Summer, Fall]` is 33.33.
pub fn seasonal_match(source: &[Season], target: &[Season]) -> f64 {
    let ratio = overlap_ratio(source, target, OverlapDenominator::Union);
    (ratio * 100.0 * 100.0).round() / 100.0
}

/// Points for each distinct source mood that has a complement among the target moods.
pub fn mood_complement_score(source: &[Mood], target: &[Mood]) -> u32 {
    distinct(source)
        .into_iter()
        .filter(|mood| mood_complements(*mood).iter().any(|partner| target.contains(partner)))
        .count() as u32
        * MOOD_COMPLEMENT_POINTS
}

/// Points for each distinct source season whose following season the target covers.
pub fn season_complement_score(source: &[Season], target: &[Season]) -> u32 {
    distinct(source).into_iter().filter(|season| target.contains(&season.next())).count() as u32
        * SEASON_COMPLEMENT_POINTS
}

/// Points for harmonizing note pairs across the two profiles, capped.
pub fn note_harmony_score(source: &ScentProfile, target: &ScentProfile) -> u32 {
    let source_names = distinct(&source.note_names());
    let target_names = distinct(&target.note_names());

    let pairs = source_names
        .iter()
        .flat_map(|left| target_names.iter().map(move |right| (*left, *right)))
        .filter(|(left, right)| harmonizes(left, right))
        .count() as u32;

    (pairs * NOTE_HARMONY_POINTS).min(NOTE_HARMONY_CAP)
}

/// Which of the shopper's preferences a profile satisfies.
pub fn calculate_overall_match(
    profile: &ScentProfile,
    preferences: &CustomerScentPreferences,
) -> MatchingAttributes {
    let notes = distinct(&profile.note_names())
        .into_iter()
        .filter(|name| preferences.favorite_notes.iter().any(|favorite| favorite == name))
        .map(str::to_owned)
        .collect();

    let mood = distinct(&profile.mood)
        .into_iter()
        .filter(|mood| preferences.mood_preferences.contains(mood))
        .map(|mood| mood.label().to_owned())
        .collect();

    let season = distinct(&profile.season)
        .into_iter()
        .filter(|season| preferences.seasonal_preferences.contains(season))
        .map(|season| season.label().to_owned())
        .collect();

    MatchingAttributes {
        notes,
        intensity: intensity_match(profile.intensity, &preferences.preferred_intensity) == 100,
        mood,
        season,
    }
}

/// How well one profile satisfies a shopper's preferences, 0-100.
///
/// Dimensions the shopper left empty contribute a neutral half score.
pub fn preference_match_score(
    profile: &ScentProfile,
    preferences: &CustomerScentPreferences,
    weights: &ScoringWeights,
) -> u8 {
    let notes = note_match_score(
        profile.all_notes(),
        &preferences.favorite_notes,
        &preferences.avoided_notes,
    ) / 100.0;

    let intensity = if preferences.preferred_intensity.is_empty() {
        NEUTRAL_PREFERENCE_RATIO
    } else {
        f64::from(intensity_match(profile.intensity, &preferences.preferred_intensity)) / 100.0
    };

    let mood = if preferences.mood_preferences.is_empty() {
        NEUTRAL_PREFERENCE_RATIO
    } else {
        overlap_ratio(&profile.mood, &preferences.mood_preferences, OverlapDenominator::Union)
    };

    let season = if preferences.seasonal_preferences.is_empty() {
        NEUTRAL_PREFERENCE_RATIO
    } else {
        seasonal_match(&profile.season, &preferences.seasonal_preferences) / 100.0
    };

    weights.blend(notes, intensity, mood, season)
}

/// How similar two profiles are, 0-100. A profile compared with itself scores 100.
pub fn calculate_scent_compatibility(
    source: &ScentProfile,
    target: &ScentProfile,
    weights: &ScoringWeights,
) -> u8 {
    let notes =
        overlap_ratio(&source.note_names(), &target.note_names(), OverlapDenominator::Max);
    let intensity = intensity_similarity(source.intensity, target.intensity);
    let mood = overlap_ratio(&source.mood, &target.mood, OverlapDenominator::Max);
    let season = overlap_ratio(&source.season, &target.season, OverlapDenominator::Max);

    weights.blend(notes, intensity, mood, season)
}

/// How well two distinct profiles pair together, 0-100.
pub fn calculate_complementary_score(source: &ScentProfile, target: &ScentProfile) -> u8 {
    let total = mood_complement_score(&source.mood, &target.mood)
        + season_complement_score(&source.season, &target.season)
        + u32::from(intensity_complement_score(source.intensity, target.intensity))
        + note_harmony_score(source, target);

    total.min(100) as u8
}

/// Explanation for a complementary pairing.
pub fn match_reason(complementary_score: u8) -> &'static str {
    if complementary_score >= 90 {
        "Perfect complement"
    } else if complementary_score >= 70 {
        "Creates a harmonious blend"
    } else if complementary_score >= 50 {
        "Adds an interesting contrast"
    } else {
        "Provides a different experience"
    }
}

/// Explanation for a similar-scent pairing.
pub fn compatibility_reason(compatibility_score: u8) -> &'static str {
    if compatibility_score >= 85 {
        "Nearly identical scent profile"
    } else if compatibility_score >= 65 {
        "Very similar scent profile"
    } else if compatibility_score >= 45 {
        "Shares key scent characteristics"
    } else {
        "Loosely related scent"
    }
}

/// Human-readable "why recommended" badges.
pub fn preference_reasons(attributes: &MatchingAttributes) -> Vec<String> {
    if attributes.is_empty() {
        return vec!["Something new to explore".to_string()];
    }

    let mut reasons = Vec::new();

    if !attributes.notes.is_empty() {
        reasons.push(format!("Features your favorite notes: {}", attributes.notes.join(", ")));
    }

    if attributes.intensity {
        reasons.push("Matches your preferred intensity".to_string());
    }

    if !attributes.mood.is_empty() {
        let moods: Vec<String> = attributes.mood.iter().map(|mood| mood.to_lowercase()).collect();
        reasons.push(format!("Sets the {} mood you enjoy", moods.join(" and ")));
    }

    if !attributes.season.is_empty() {
        reasons.push(format!("Made for {}", attributes.season.join(" and ")));
    }

    reasons
}

fn distinct<T: Copy + Eq + Hash>(values: &[T]) -> Vec<T> {
    let mut seen = HashSet::new();
    values.iter().copied().filter(|value| seen.insert(*value)).collect()
}

fn to_score(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}
