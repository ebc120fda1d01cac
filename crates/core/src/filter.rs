use crate::catalog::Catalog;
use crate::model::{ContinentFilter, Country};

/// Countries selected by a continent filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub filter: ContinentFilter,
    pub countries: Vec<Country>,
    /// True when the filter matched nothing and the full catalog was used instead.
    pub fell_back: bool,
}

impl Resolution {
    #[must_use]
    pub fn len(&self) -> usize {
        self.countries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.countries.is_empty()
    }
}

/// Resolves a continent filter against the catalog.
///
/// An empty match falls back to the whole catalog so a session is never
/// started over nothing. Callers should surface `fell_back` as a warning.
#[must_use]
pub fn resolve(catalog: &Catalog, filter: ContinentFilter) -> Resolution {
    let countries: Vec<Country> = catalog
        .countries()
        .iter()
        .filter(|c| filter.admits(c.continent()))
        .cloned()
        .collect();

    if countries.is_empty() {
        return Resolution {
            filter,
            countries: catalog.countries().to_vec(),
            fell_back: true,
        };
    }

    Resolution {
        filter,
        countries,
        fell_back: false,
    }
}
