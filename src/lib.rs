//! Work-hour tracker with a minute-resolution pay calculator.
//!
//! This crate records clock-in/clock-out sessions and prices each worked
//! minute against a weekly shift schedule, a night window, Sundays and the
//! Italian public holiday calendar. Finalized sessions are summarized per
//! month and served over an HTTP API.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod tracker;
