use std::collections::HashSet;

use thiserror::Error;

use crate::model::{Continent, Country, CountryEntry, CountryError, CountryId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error("catalog contains no countries")]
    Empty,

    #[error("duplicate display name in catalog: {0}")]
    DuplicateDisplayName(String),

    #[error("duplicate match name in catalog: {0}")]
    DuplicateMatchName(String),

    #[error("invalid catalog entry {index}: {source}")]
    InvalidEntry {
        index: usize,
        #[source]
        source: CountryError,
    },

    #[error("malformed catalog file: {0}")]
    Json(#[from] serde_json::Error),
}

//
// ─── CATALOG ───────────────────────────────────────────────────────────────────
//

/// Read-only list of every playable country.
///
/// Ids are assigned from 1 in entry order, so the same source data always
/// yields the same ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    countries: Vec<Country>,
}

impl Catalog {
    /// Builds a catalog from id-less entries.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Empty` when no entries are given,
    /// `CatalogError::InvalidEntry` for blank names, and the duplicate variants
    /// when two entries share a display or match name.
    pub fn from_entries(
        entries: impl IntoIterator<Item = CountryEntry>,
    ) -> Result<Self, CatalogError> {
        let mut countries = Vec::new();
        let mut display_names = HashSet::new();
        let mut match_names = HashSet::new();

        for (index, entry) in entries.into_iter().enumerate() {
            let id = CountryId::new(u64::try_from(index + 1).unwrap_or(u64::MAX));
            let country = Country::new(id, entry.continent, entry.display_name, entry.match_name)
                .map_err(|source| CatalogError::InvalidEntry { index, source })?;

            if !display_names.insert(country.display_name().to_string()) {
                return Err(CatalogError::DuplicateDisplayName(
                    country.display_name().to_string(),
                ));
            }
            if !match_names.insert(country.match_name().to_string()) {
                return Err(CatalogError::DuplicateMatchName(
                    country.match_name().to_string(),
                ));
            }
            countries.push(country);
        }

        if countries.is_empty() {
            return Err(CatalogError::Empty);
        }

        Ok(Self { countries })
    }

    /// Parses a JSON array of `{continent, display_name, match_name}` objects.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Json` for malformed input, otherwise the same
    /// errors as [`Catalog::from_entries`].
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let entries: Vec<CountryEntry> = serde_json::from_str(raw)?;
        Self::from_entries(entries)
    }

    /// The bundled country table.
    ///
    /// # Errors
    ///
    /// Only fails if the bundled table itself is inconsistent.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_entries(
            BUILTIN
                .iter()
                .map(|&(continent, display, matched)| CountryEntry::new(continent, display, matched)),
        )
    }

    #[must_use]
    pub fn countries(&self) -> &[Country] {
        &self.countries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.countries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: CountryId) -> Option<&Country> {
        self.countries.iter().find(|c| c.id() == id)
    }

    #[must_use]
    pub fn by_display_name(&self, name: &str) -> Option<&Country> {
        let name = name.trim();
        self.countries.iter().find(|c| c.display_name() == name)
    }

    #[must_use]
    pub fn by_match_name(&self, name: &str) -> Option<&Country> {
        let name = name.trim();
        self.countries.iter().find(|c| c.match_name() == name)
    }

    /// Continents that have at least one country, in menu order.
    #[must_use]
    pub fn continents(&self) -> Vec<Continent> {
        Continent::ALL
            .into_iter()
            .filter(|continent| self.countries.iter().any(|c| c.continent() == *continent))
            .collect()
    }
}

//
// ─── BUILT-IN DATA ─────────────────────────────────────────────────────────────
//

const BUILTIN: &[(Continent, &str, &str)] = &[
    (Continent::Africa, "Marokko", "Morocco"),
    (Continent::Africa, "Algerien", "Algeria"),
    (Continent::Africa, "Tunesien", "Tunisia"),
    (Continent::Africa, "Libyen", "Libya"),
    (Continent::Africa, "Ägypten", "Egypt"),
    (Continent::Africa, "Äthiopien", "Ethiopia"),
    (Continent::Africa, "Eritrea", "Eritrea"),
    (Continent::Africa, "Kenia", "Kenya"),
    (Continent::Africa, "Somalia", "Somalia"),
    (Continent::Africa, "Mali", "Mali"),
    (Continent::Africa, "Ghana", "Ghana"),
    (Continent::Africa, "Demokratische Republik Kongo", "Democratic Republic of the Congo"),
    (Continent::Africa, "Nigeria", "Nigeria"),
    (Continent::Africa, "Madagaskar", "Madagascar"),
    (Continent::Africa, "Südafrika", "South Africa"),
    (Continent::Asia, "China", "China"),
    (Continent::Asia, "Indien", "India"),
    (Continent::Asia, "Indonesien", "Indonesia"),
    (Continent::Asia, "Thailand", "Thailand"),
    (Continent::Asia, "Bangladesch", "Bangladesh"),
    (Continent::Asia, "Japan", "Japan"),
    (Continent::Asia, "Pakistan", "Pakistan"),
    (Continent::Asia, "Afghanistan", "Afghanistan"),
    (Continent::Asia, "Saudi-Arabien", "Saudi Arabia"),
    (Continent::Asia, "Südkorea", "South Korea"),
    (Continent::Asia, "Nordkorea", "North Korea"),
    (Continent::Asia, "Syrien", "Syria"),
    (Continent::Asia, "Iran", "Iran"),
    (Continent::Asia, "Irak", "Iraq"),
    (Continent::Asia, "Malaysia", "Malaysia"),
    (Continent::Asia, "Philippinen", "Philippines"),
    (Continent::Europe, "Albanien", "Albania"),
    (Continent::Europe, "Andorra", "Andorra"),
    (Continent::Europe, "Belarus", "Belarus"),
    (Continent::Europe, "Belgien", "Belgium"),
    (Continent::Europe, "Bosnien-Herzegowina", "Bosnia and Herzegovina"),
    (Continent::Europe, "Bulgarien", "Bulgaria"),
    (Continent::Europe, "Dänemark", "Denmark"),
    (Continent::Europe, "Deutschland", "Germany"),
    (Continent::Europe, "Estland", "Estonia"),
    (Continent::Europe, "Finnland", "Finland"),
    (Continent::Europe, "Frankreich", "France"),
    (Continent::Europe, "Griechenland", "Greece"),
    (Continent::Europe, "Großbritannien", "United Kingdom"),
    (Continent::Europe, "Irland", "Ireland"),
    (Continent::Europe, "Island", "Iceland"),
    (Continent::Europe, "Italien", "Italy"),
    (Continent::Europe, "Kosovo", "Kosovo"),
    (Continent::Europe, "Kroatien", "Croatia"),
    (Continent::Europe, "Lettland", "Latvia"),
    (Continent::Europe, "Liechtenstein", "Liechtenstein"),
    (Continent::Europe, "Litauen", "Lithuania"),
    (Continent::Europe, "Luxemburg", "Luxembourg"),
    (Continent::Europe, "Malta", "Malta"),
    (Continent::Europe, "Moldowa", "Moldova"),
    (Continent::Europe, "Monaco", "Monaco"),
    (Continent::Europe, "Montenegro", "Montenegro"),
    (Continent::Europe, "Niederlande", "Netherlands"),
    (Continent::Europe, "Nordmazedonien", "North Macedonia"),
    (Continent::Europe, "Norwegen", "Norway"),
    (Continent::Europe, "Österreich", "Austria"),
    (Continent::Europe, "Polen", "Poland"),
    (Continent::Europe, "Portugal", "Portugal"),
    (Continent::Europe, "Rumänien", "Romania"),
    (Continent::Europe, "Russland", "Russia"),
    (Continent::Europe, "San Marino", "San Marino"),
    (Continent::Europe, "Schweiz", "Switzerland"),
    (Continent::Europe, "Schweden", "Sweden"),
    (Continent::Europe, "Serbien", "Serbia"),
    (Continent::Europe, "Slowakei", "Slovakia"),
    (Continent::Europe, "Slowenien", "Slovenia"),
    (Continent::Europe, "Spanien", "Spain"),
    (Continent::Europe, "Tschechien", "Czech Republic"),
    (Continent::Europe, "Türkei", "Turkey"),
    (Continent::Europe, "Ukraine", "Ukraine"),
    (Continent::Europe, "Ungarn", "Hungary"),
    (Continent::Europe, "Vatikanstadt", "Vatican City"),
    (Continent::NorthAmerica, "Jamaika", "Jamaica"),
    (Continent::NorthAmerica, "Kanada", "Canada"),
    (Continent::NorthAmerica, "Kuba", "Cuba"),
    (Continent::NorthAmerica, "Mexiko", "Mexico"),
    (Continent::NorthAmerica, "USA", "United States"),
    (Continent::SouthAmerica, "Argentinien", "Argentina"),
    (Continent::SouthAmerica, "Bolivien", "Bolivia"),
    (Continent::SouthAmerica, "Brasilien", "Brazil"),
    (Continent::SouthAmerica, "Chile", "Chile"),
    (Continent::SouthAmerica, "Peru", "Peru"),
    (Continent::SouthAmerica, "Venezuela", "Venezuela"),
    (Continent::SouthAmerica, "Kolumbien", "Colombia"),
    (Continent::SouthAmerica, "Ecuador", "Ecuador"),
    (Continent::Oceania, "Australien", "Australia"),
    (Continent::Oceania, "Neuseeland", "New Zealand"),
];

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
