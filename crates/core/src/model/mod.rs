mod continent;
mod country;
mod ids;
mod session;

pub use continent::{Continent, ContinentError, ContinentFilter, MapScope};
pub use country::{Country, CountryEntry, CountryError};
pub use ids::{CountryId, ParseIdError};
pub use session::{SessionSummary, SessionSummaryError};
