//! Client-side state layer for the Maestranza inventory backend.
//!
//! Repositories wrap the REST API and never fail with `Err`: every finished
//! call is an [`Outcome`](outcome::Outcome). Screens hold the authoritative
//! lists, apply search and filter criteria, and only change their lists
//! once the server has confirmed a mutation.

pub mod api;
pub mod config;
pub mod logging;
pub mod mapper;
pub mod model;
pub mod outcome;
pub mod repository;
pub mod screens;
pub mod session;
pub mod state;
pub mod validation;
