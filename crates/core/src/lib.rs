#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod evaluator;
pub mod filter;
pub mod model;
pub mod time;

pub use catalog::{Catalog, CatalogError};
pub use error::Error;
pub use evaluator::{Verdict, evaluate};
pub use filter::{Resolution, resolve};
pub use time::Clock;
