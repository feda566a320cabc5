//! fleetboard — dashboard client for a train fleet induction API.
//!
//! Everything of substance (scores, recommendations, conflicts) is computed
//! by the remote API; this crate fetches those records and renders them.
//! Four layers, mirrored by the module tree:
//!
//! - [`config`] — resolves which API base URL to talk to
//! - [`api`] — one HTTP round trip per remote operation
//! - [`metrics`] / [`render`] — pure aggregation and markup production
//! - [`controller`] — maps user intents to API calls and renderer output
//!
//! Two surfaces consume those layers: colored terminal subcommands
//! ([`cli`]) and an embedded single-page web dashboard ([`web`]).

pub mod api;
pub mod cli;
pub mod config;
pub mod controller;
pub mod metrics;
pub mod render;
pub mod web;
