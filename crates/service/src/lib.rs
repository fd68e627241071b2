//! Service layer for the ship catalog.
//! - Builds list filters from optional query parameters.
//! - Validates payloads and keeps `rating` in step with the fields it derives from.
//! - Talks to storage only through the [`ship::repository::ShipRepository`] trait.

pub mod errors;
pub mod pagination;
pub mod ship;
#[cfg(test)]
pub mod test_support;
