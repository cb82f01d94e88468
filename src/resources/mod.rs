//! Resource facade
//!
//! [`LocationResource`] exposes the per-tenant listings; agency, calendar,
//! contact and conversation entities carry their own follow-up operations.

mod bound;
mod location;

pub use bound::api_get;
pub use location::{LocationResource, DEFAULT_LIMIT};

#[cfg(test)]
mod tests;
