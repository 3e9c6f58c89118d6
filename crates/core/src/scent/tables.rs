//! Fixed pairing vocabularies for complementary scoring.

use crate::domain::scent::Mood;

/// Moods that pair well with `mood`. The relation is symmetric.
pub fn mood_complements(mood: Mood) -> &'static [Mood] {
    match mood {
        Mood::Relaxing => &[Mood::Energizing, Mood::Cozy],
        Mood::Energizing => &[Mood::Relaxing, Mood::Fresh],
        Mood::Romantic => &[Mood::Fresh, Mood::Cozy],
        Mood::Fresh => &[Mood::Romantic, Mood::Energizing],
        Mood::Cozy => &[Mood::Romantic, Mood::Relaxing],
    }
}

// Keys and values are lowercase; lookups fold case because this is our own vocabulary,
// not shopper input.
const NOTE_HARMONIES: &[(&str, &[&str])] = &[
    ("vanilla", &["cinnamon", "chocolate", "coffee", "tonka bean", "amber"]),
    ("lavender", &["vanilla", "bergamot", "chamomile", "cedarwood"]),
    ("bergamot", &["lavender", "neroli", "vetiver", "black tea"]),
    ("cinnamon", &["vanilla", "orange", "clove", "apple"]),
    ("sandalwood", &["rose", "jasmine", "vanilla", "cardamom"]),
    ("rose", &["sandalwood", "oud", "peony", "patchouli"]),
    ("lemon", &["basil", "verbena", "ginger", "sea salt"]),
    ("cedarwood", &["lavender", "amber", "pine", "leather"]),
    ("sea salt", &["sage", "driftwood", "lemon", "jasmine"]),
    ("coffee", &["vanilla", "cardamom", "hazelnut", "tobacco"]),
];

fn partners(note: &str) -> &'static [&'static str] {
    NOTE_HARMONIES
        .iter()
        .find(|(key, _)| *key == note)
        .map(|(_, partners)| *partners)
        .unwrap_or(&[])
}

/// Whether two notes are listed as pairing well, in either direction.
///
/// Notes missing from the table never harmonize.
pub fn harmonizes(left: &str, right: &str) -> bool {
    let left = left.trim().to_ascii_lowercase();
    let right = right.trim().to_ascii_lowercase();
    partners(&left).contains(&right.as_str()) || partners(&right).contains(&left.as_str())
}
