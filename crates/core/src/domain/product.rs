use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::scent::ScentProfile;

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A catalog product as seen by the recommendation layer: identity plus the scent profile
/// attached to the current catalog snapshot.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScentProduct {
    pub id: ProductId,
    pub sku: String,
    pub name: String,
    #[serde(default = "default_active")]
    pub active: bool,
    pub profile: ScentProfile,
}

fn default_active() -> bool {
    true
}
