//! API client library for moviedb.
//!
//! Provides a client for the OMDb movie metadata API.

/// OMDb API client.
pub mod omdb;
