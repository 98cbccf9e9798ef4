//! Delayed-train board for the Budapest–Győr–Hegyeshalom line.
//!
//! Polls a nationwide vehicle-position feed, keeps the rail vehicles that
//! appear to run on the line, and serves their delays from a short-lived
//! cache.

pub mod cache;
pub mod classify;
pub mod feed;
pub mod web;
