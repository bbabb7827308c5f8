//! Duty-Schedule & Attendance Compliance Engine
//!
//! This crate reconciles scheduled duty shifts against observed check-in and
//! check-out records and produces per-staff, per-period compliance metrics:
//! attendance, punctuality, GPS validity and schedule drift, together with
//! role-based verdicts, trends and recommendations.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
