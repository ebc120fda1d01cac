use thiserror::Error;

use crate::catalog::CatalogError;
use crate::model::{ContinentError, CountryError, SessionSummaryError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Country(#[from] CountryError),
    #[error(transparent)]
    Continent(#[from] ContinentError),
    #[error(transparent)]
    Summary(#[from] SessionSummaryError),
}
