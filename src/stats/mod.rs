//! Statistics collectors for the archival graph.
//!
//! Each collector walks a top-level entity set, issues follow-up aggregate
//! queries per entity, and assembles one row per entity. Collectors run
//! strictly sequentially; row order follows query result order.

pub mod authorities;
pub mod countries;
pub mod queries;
pub mod repositories;
pub mod vocabularies;
