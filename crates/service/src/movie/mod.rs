//! Movie catalog: three-layer architecture (domain, repository, service).
//!
//! Transfer shapes (`MovieData`, `RatingData`) cross the service boundary;
//! domain entities stay behind the store traits.

pub mod domain;
pub mod mapping;
pub mod repository;
pub mod repo;
pub mod service;

pub use service::MovieService;
