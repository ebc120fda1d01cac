use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::continent::Continent;
use crate::model::ids::CountryId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CountryError {
    #[error("country display name cannot be empty")]
    EmptyDisplayName,

    #[error("country match name cannot be empty")]
    EmptyMatchName,
}

//
// ─── COUNTRY ───────────────────────────────────────────────────────────────────
//

/// A playable country.
///
/// `display_name` is what the player sees and picks from the dropdown.
/// `match_name` is the key the external map renderer uses to locate the
/// country on its map.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Country {
    id: CountryId,
    continent: Continent,
    display_name: String,
    match_name: String,
}

impl Country {
    /// Creates a country with trimmed, non-empty names.
    ///
    /// # Errors
    ///
    /// Returns `CountryError::EmptyDisplayName` or `CountryError::EmptyMatchName`
    /// if either name is blank.
    pub fn new(
        id: CountryId,
        continent: Continent,
        display_name: impl Into<String>,
        match_name: impl Into<String>,
    ) -> Result<Self, CountryError> {
        let display_name = display_name.into().trim().to_string();
        if display_name.is_empty() {
            return Err(CountryError::EmptyDisplayName);
        }
        let match_name = match_name.into().trim().to_string();
        if match_name.is_empty() {
            return Err(CountryError::EmptyMatchName);
        }

        Ok(Self {
            id,
            continent,
            display_name,
            match_name,
        })
    }

    #[must_use]
    pub fn id(&self) -> CountryId {
        self.id
    }

    #[must_use]
    pub fn continent(&self) -> Continent {
        self.continent
    }

    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    #[must_use]
    pub fn match_name(&self) -> &str {
        &self.match_name
    }
}

/// Catalog row without an id, as found in static data or a catalog file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryEntry {
    pub continent: Continent,
    pub display_name: String,
    pub match_name: String,
}

impl CountryEntry {
    #[must_use]
    pub fn new(
        continent: Continent,
        display_name: impl Into<String>,
        match_name: impl Into<String>,
    ) -> Self {
        Self {
            continent,
            display_name: display_name.into(),
            match_name: match_name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn country_trims_names() {
        let country =
            Country::new(CountryId::new(1), Continent::Europe, " Deutschland ", "Germany ").unwrap();
        assert_eq!(country.display_name(), "Deutschland");
        assert_eq!(country.match_name(), "Germany");
        assert_eq!(country.continent(), Continent::Europe);
    }

    #[test]
    fn country_rejects_blank_names() {
        let err = Country::new(CountryId::new(1), Continent::Asia, "  ", "Japan").unwrap_err();
        assert_eq!(err, CountryError::EmptyDisplayName);
        let err = Country::new(CountryId::new(1), Continent::Asia, "Japan", "").unwrap_err();
        assert_eq!(err, CountryError::EmptyMatchName);
    }
}
