//! Ship catalog: three-layer architecture (domain, repository, service),
//! plus the filter builder that turns list query parameters into predicates.

pub mod domain;
pub mod filter;
pub mod repository;
pub mod service;
pub mod repo;

pub use service::{parse_id, ShipService};
