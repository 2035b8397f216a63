//! Networking modules for the REST and GraphQL backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! `transport` performs raw HTTP, `http` adds auth and status mapping,
//! `graphql` wraps the query envelope, `api` exposes one function per
//! endpoint, and `types` defines the shared wire schema.

pub mod api;
pub mod graphql;
pub mod http;
pub mod queries;
#[cfg(test)]
pub mod test_support;
pub mod transport;
pub mod types;
