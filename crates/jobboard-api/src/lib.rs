//! jobboard-api: Shared data types for the job-board backend
//!
//! Contains the canonical response shapes produced by the loaders, the
//! request parameter types, and the catalogue of known resource endpoints.

pub mod requests;
pub mod resources;
pub mod responses;

pub use requests::{Params, merge_params};
pub use resources::{ApiError, Resource, item_key_for};
pub use responses::{ItemResult, LoaderResult, NormalizedResponse, Pagination};
