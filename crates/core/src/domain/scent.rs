//! Fragrance data model: notes, profiles and the shopper preferences they are scored against.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

pub const MIN_NOTE_INTENSITY: u8 = 1;
pub const MAX_NOTE_INTENSITY: u8 = 10;

/// One aromatic component of a profile.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScentNote {
    pub name: String,
    /// Strength on a 1-10 scale.
    pub intensity: u8,
}

impl ScentNote {
    pub fn new(name: impl Into<String>, intensity: u8) -> Self {
        Self { name: name.into(), intensity }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Intensity {
    Light,
    Moderate,
    Strong,
}

impl Intensity {
    pub const ALL: [Intensity; 3] = [Self::Light, Self::Moderate, Self::Strong];

    /// Ordinal position used for distance calculations (1 = light, 3 = strong).
    pub fn level(self) -> u8 {
        match self {
            Self::Light => 1,
            Self::Moderate => 2,
            Self::Strong => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Moderate => "Moderate",
            Self::Strong => "Strong",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mood {
    Relaxing,
    Energizing,
    Romantic,
    Fresh,
    Cozy,
}

impl Mood {
    pub const ALL: [Mood; 5] =
        [Self::Relaxing, Self::Energizing, Self::Romantic, Self::Fresh, Self::Cozy];

    pub fn label(self) -> &'static str {
        match self {
            Self::Relaxing => "Relaxing",
            Self::Energizing => "Energizing",
            Self::Romantic => "Romantic",
            Self::Fresh => "Fresh",
            Self::Cozy => "Cozy",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Season {
    Spring,
    Summer,
    Fall,
    Winter,
}

impl Season {
    pub const ALL: [Season; 4] = [Self::Spring, Self::Summer, Self::Fall, Self::Winter];

    pub fn label(self) -> &'static str {
        match self {
            Self::Spring => "Spring",
            Self::Summer => "Summer",
            Self::Fall => "Fall",
            Self::Winter => "Winter",
        }
    }

    /// The season that follows this one in the yearly cycle.
    pub fn next(self) -> Season {
        match self {
            Self::Spring => Self::Summer,
            Self::Summer => Self::Fall,
            Self::Fall => Self::Winter,
            Self::Winter => Self::Spring,
        }
    }
}

macro_rules! closed_set_parsing {
    ($ty:ident, $kind:literal) => {
        impl FromStr for $ty {
            type Err = ValidationError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                let wanted = value.trim();
                $ty::ALL
                    .into_iter()
                    .find(|candidate| candidate.label().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| ValidationError::UnknownVariant {
                        kind: $kind,
                        value: value.to_owned(),
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

closed_set_parsing!(Intensity, "intensity");
closed_set_parsing!(Mood, "mood");
closed_set_parsing!(Season, "season");

/// Structured fragrance description attached to a product snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScentProfile {
    #[serde(default)]
    pub primary_notes: Vec<ScentNote>,
    #[serde(default)]
    pub middle_notes: Vec<ScentNote>,
    #[serde(default)]
    pub base_notes: Vec<ScentNote>,
    pub intensity: Intensity,
    #[serde(default)]
    pub mood: Vec<Mood>,
    #[serde(default)]
    pub season: Vec<Season>,
}

impl ScentProfile {
    /// Primary, middle and base notes in tier order.
    pub fn all_notes(&self) -> Vec<&ScentNote> {
        self.primary_notes.iter().chain(&self.middle_notes).chain(&self.base_notes).collect()
    }

    pub fn note_names(&self) -> Vec<&str> {
        self.all_notes().into_iter().map(|note| note.name.as_str()).collect()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let notes = self.all_notes();
        if notes.is_empty() {
            return Err(ValidationError::EmptyProfile);
        }

        for note in notes {
            if note.name.trim().is_empty() {
                return Err(ValidationError::BlankNoteName);
            }
            if !(MIN_NOTE_INTENSITY..=MAX_NOTE_INTENSITY).contains(&note.intensity) {
                return Err(ValidationError::NoteIntensityOutOfRange {
                    note: note.name.clone(),
                    intensity: note.intensity,
                });
            }
        }

        if self.mood.is_empty() {
            return Err(ValidationError::MissingMood);
        }
        if self.season.is_empty() {
            return Err(ValidationError::MissingSeason);
        }

        Ok(())
    }
}

/// A shopper's stated fragrance preferences.
///
/// Note names are compared with exact, case-sensitive string equality.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerScentPreferences {
    #[serde(default)]
    pub favorite_notes: Vec<String>,
    #[serde(default)]
    pub avoided_notes: Vec<String>,
    #[serde(default)]
    pub preferred_intensity: Vec<Intensity>,
    #[serde(default)]
    pub seasonal_preferences: Vec<Season>,
    #[serde(default)]
    pub mood_preferences: Vec<Mood>,
}

impl CustomerScentPreferences {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.favorite_notes.iter().chain(&self.avoided_notes).any(|name| name.trim().is_empty())
        {
            return Err(ValidationError::BlankPreferenceNote);
        }

        let avoided: HashSet<&str> = self.avoided_notes.iter().map(String::as_str).collect();
        if let Some(conflict) =
            self.favorite_notes.iter().find(|name| avoided.contains(name.as_str()))
        {
            return Err(ValidationError::ConflictingPreference { note: conflict.clone() });
        }

        Ok(())
    }

    pub fn apply(&mut self, update: PreferenceUpdate) {
        if let Some(favorite_notes) = update.favorite_notes {
            self.favorite_notes = dedupe(favorite_notes);
        }
        if let Some(avoided_notes) = update.avoided_notes {
            self.avoided_notes = dedupe(avoided_notes);
        }
        if let Some(preferred_intensity) = update.preferred_intensity {
            self.preferred_intensity = dedupe(preferred_intensity);
        }
        if let Some(seasonal_preferences) = update.seasonal_preferences {
            self.seasonal_preferences = dedupe(seasonal_preferences);
        }
        if let Some(mood_preferences) = update.mood_preferences {
            self.mood_preferences = dedupe(mood_preferences);
        }
    }
}

/// Partial update to a customer's preferences; `None` leaves a field untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferenceUpdate {
    pub favorite_notes: Option<Vec<String>>,
    pub avoided_notes: Option<Vec<String>>,
    pub preferred_intensity: Option<Vec<Intensity>>,
    pub seasonal_preferences: Option<Vec<Season>>,
    pub mood_preferences: Option<Vec<Mood>>,
}

fn dedupe<T: Clone + Eq + std::hash::Hash>(values: Vec<T>) -> Vec<T> {
    let mut seen = HashSet::new();
    values.into_iter().filter(|value| seen.insert(value.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> ScentProfile {
        ScentProfile {
            primary_notes: vec![ScentNote::new("Bergamot", 6)],
            middle_notes: vec![ScentNote::new("Lavender", 8)],
            base_notes: vec![ScentNote::new("Vanilla", 4)],
            intensity: Intensity::Moderate,
            mood: vec![Mood::Relaxing],
            season: vec![Season::Spring, Season::Summer],
        }
    }

    #[test]
    fn all_notes_keeps_tier_order() {
        assert_eq!(profile().note_names(), vec!["Bergamot", "Lavender", "Vanilla"]);
    }

    #[test]
    fn valid_profile_passes_validation() {
        assert_eq!(profile().validate(), Ok(()));
    }

    #[test]
    fn profile_without_notes_is_rejected() {
        let mut empty = profile();
        empty.primary_notes.clear();
        empty.middle_notes.clear();
        empty.base_notes.clear();

        assert_eq!(empty.validate(), Err(ValidationError::EmptyProfile));
    }

    #[test]
    fn out_of_range_note_intensity_is_rejected() {
        let mut loud = profile();
        loud.base_notes.push(ScentNote::new("Oud", 11));

        assert_eq!(
            loud.validate(),
            Err(ValidationError::NoteIntensityOutOfRange { note: "Oud".to_owned(), intensity: 11 })
        );

        let mut silent = profile();
        silent.primary_notes[0].intensity = 0;
        assert!(matches!(
            silent.validate(),
            Err(ValidationError::NoteIntensityOutOfRange { intensity: 0, .. })
        ));
    }

    #[test]
    fn missing_mood_or_season_is_rejected() {
        let mut no_mood = profile();
        no_mood.mood.clear();
        assert_eq!(no_mood.validate(), Err(ValidationError::MissingMood));

        let mut no_season = profile();
        no_season.season.clear();
        assert_eq!(no_season.validate(), Err(ValidationError::MissingSeason));
    }

    #[test]
    fn enums_parse_case_insensitively_and_reject_unknown_values() {
        assert_eq!("moderate".parse::<Intensity>(), Ok(Intensity::Moderate));
        assert_eq!(" FALL ".parse::<Season>(), Ok(Season::Fall));
        assert_eq!("Cozy".parse::<Mood>(), Ok(Mood::Cozy));
        assert_eq!(
            "smoky".parse::<Mood>(),
            Err(ValidationError::UnknownVariant { kind: "mood", value: "smoky".to_owned() })
        );
    }

    #[test]
    fn enums_use_screaming_case_on_the_wire() {
        let json = serde_json::to_string(&(Intensity::Strong, Mood::Energizing, Season::Winter))
            .expect("serialize enums");
        assert_eq!(json, r#"["STRONG","ENERGIZING","WINTER"]"#);

        let unknown = serde_json::from_str::<Season>(r#""MONSOON""#);
        assert!(unknown.is_err());
    }

    #[test]
    fn seasons_cycle_forward() {
        assert_eq!(Season::Spring.next(), Season::Summer);
        assert_eq!(Season::Winter.next(), Season::Spring);
    }

    #[test]
    fn conflicting_preferences_are_rejected() {
        let preferences = CustomerScentPreferences {
            favorite_notes: vec!["Vanilla".to_owned()],
            avoided_notes: vec!["Vanilla".to_owned()],
            ..CustomerScentPreferences::default()
        };

        assert_eq!(
            preferences.validate(),
            Err(ValidationError::ConflictingPreference { note: "Vanilla".to_owned() })
        );
    }

    #[test]
    fn note_names_are_case_sensitive_for_conflicts() {
        let preferences = CustomerScentPreferences {
            favorite_notes: vec!["Ylang-Ylang".to_owned()],
            avoided_notes: vec!["ylang-ylang".to_owned()],
            ..CustomerScentPreferences::default()
        };

        assert_eq!(preferences.validate(), Ok(()));
    }

    #[test]
    fn apply_update_replaces_only_provided_fields() {
        let mut preferences = CustomerScentPreferences {
            favorite_notes: vec!["Cedar".to_owned()],
            preferred_intensity: vec![Intensity::Light],
            ..CustomerScentPreferences::default()
        };

        preferences.apply(PreferenceUpdate {
            favorite_notes: Some(vec!["Rose".to_owned(), "Rose".to_owned(), "Musk".to_owned()]),
            ..PreferenceUpdate::default()
        });

        assert_eq!(preferences.favorite_notes, vec!["Rose".to_owned(), "Musk".to_owned()]);
        assert_eq!(preferences.preferred_intensity, vec![Intensity::Light]);
    }
}
