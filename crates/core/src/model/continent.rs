use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContinentError {
    #[error("unknown continent: {0}")]
    Unknown(String),
}

//
// ─── CONTINENT ─────────────────────────────────────────────────────────────────
//

/// Closed set of continents a country can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Continent {
    Africa,
    Asia,
    Europe,
    NorthAmerica,
    SouthAmerica,
    Oceania,
}

impl Continent {
    /// Every continent, in selection-menu order.
    pub const ALL: [Continent; 6] = [
        Continent::Africa,
        Continent::Asia,
        Continent::Europe,
        Continent::NorthAmerica,
        Continent::SouthAmerica,
        Continent::Oceania,
    ];

    /// Label shown in the continent selection menu.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Continent::Africa => "Afrika",
            Continent::Asia => "Asien",
            Continent::Europe => "Europa",
            Continent::NorthAmerica => "Nordamerika",
            Continent::SouthAmerica => "Südamerika",
            Continent::Oceania => "Australien/Ozeanien",
        }
    }

    /// Stable ASCII identifier, matching the serde representation.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Continent::Africa => "africa",
            Continent::Asia => "asia",
            Continent::Europe => "europe",
            Continent::NorthAmerica => "north-america",
            Continent::SouthAmerica => "south-america",
            Continent::Oceania => "oceania",
        }
    }

    /// Map framing the renderer should use when this continent is selected.
    #[must_use]
    pub fn map_scope(self) -> MapScope {
        match self {
            Continent::Africa => MapScope::Africa,
            Continent::Asia => MapScope::Asia,
            Continent::Europe => MapScope::Europe,
            Continent::NorthAmerica => MapScope::NorthAmerica,
            Continent::SouthAmerica => MapScope::SouthAmerica,
            // no dedicated oceania projection
            Continent::Oceania => MapScope::World,
        }
    }
}

impl fmt::Display for Continent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn normalize(raw: &str) -> String {
    raw.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '_' { '-' } else { c })
        .collect()
}

impl FromStr for Continent {
    type Err = ContinentError;

    /// Accepts either the menu label ("Europa") or the slug ("europe").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        Continent::ALL
            .into_iter()
            .find(|c| c.slug() == key || normalize(c.label()) == key)
            .ok_or_else(|| ContinentError::Unknown(s.trim().to_string()))
    }
}

//
// ─── FILTER ────────────────────────────────────────────────────────────────────
//

/// The user's continent choice for one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContinentFilter {
    #[default]
    All,
    Only(Continent),
}

impl ContinentFilter {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ContinentFilter::All => "Alle",
            ContinentFilter::Only(continent) => continent.label(),
        }
    }

    #[must_use]
    pub fn map_scope(self) -> MapScope {
        match self {
            ContinentFilter::All => MapScope::World,
            ContinentFilter::Only(continent) => continent.map_scope(),
        }
    }

    /// Returns true if a country tagged with `continent` passes this filter.
    #[must_use]
    pub fn admits(self, continent: Continent) -> bool {
        match self {
            ContinentFilter::All => true,
            ContinentFilter::Only(only) => only == continent,
        }
    }

    /// Menu options: "all" first, then every continent.
    #[must_use]
    pub fn options() -> Vec<ContinentFilter> {
        std::iter::once(ContinentFilter::All)
            .chain(Continent::ALL.into_iter().map(ContinentFilter::Only))
            .collect()
    }
}

impl From<Continent> for ContinentFilter {
    fn from(continent: Continent) -> Self {
        ContinentFilter::Only(continent)
    }
}

impl From<Option<Continent>> for ContinentFilter {
    fn from(continent: Option<Continent>) -> Self {
        continent.map_or(ContinentFilter::All, ContinentFilter::Only)
    }
}

impl fmt::Display for ContinentFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ContinentFilter {
    type Err = ContinentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "" | "all" | "alle" => Ok(ContinentFilter::All),
            _ => s.parse().map(ContinentFilter::Only),
        }
    }
}

//
// ─── MAP SCOPE ─────────────────────────────────────────────────────────────────
//

/// Region the external map renderer frames; zoom stays the renderer's call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MapScope {
    World,
    Europe,
    Asia,
    Africa,
    NorthAmerica,
    SouthAmerica,
}

impl MapScope {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MapScope::World => "world",
            MapScope::Europe => "europe",
            MapScope::Asia => "asia",
            MapScope::Africa => "africa",
            MapScope::NorthAmerica => "north america",
            MapScope::SouthAmerica => "south america",
        }
    }
}

impl fmt::Display for MapScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
