//! Testing infrastructure for the dashboard's integration tests.
//!
//! This crate provides utilities for writing robust integration tests:
//! - `TestDeck`: fluent fixture builder over a temporary data directory
//! - `schemas`: producer-schema DDL for every known store
//! - `fixtures`: relative-date helpers for seeding time-windowed rows
//! - `assertions`: payload-shape checks for route-level JSON

pub mod assertions;
pub mod deck;
pub mod fixtures;
pub mod schemas;

pub use deck::TestDeck;
