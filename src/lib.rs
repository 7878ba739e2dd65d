//! Terminal client for a remote country directory
//!
//! The directory service owns storage, search, and pagination. This crate
//! keeps the client-side state (filter, sort, page) in [`controller`], talks
//! to the service through [`api::CountryApi`], and renders both views with
//! ratatui in [`country_tui`].

pub mod api;
pub mod cli;
pub mod config;
pub mod controller;
pub mod country_tui;
pub mod mapper;
pub mod models;
