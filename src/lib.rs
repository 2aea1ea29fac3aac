//! Gym Desk - membership management for a small gym
//!
//! This crate keeps members with their goals, workout plans and progress
//! photos, tracks subscriptions, and reminds members when their membership
//! is about to expire.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
