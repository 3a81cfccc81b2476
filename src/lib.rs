//! Noova Privacy - Cookie Consent and Local Analytics
//!
//! This crate implements the consent-gated privacy subsystem of the Noova
//! website: consent capture and persistence, and the locally-stored
//! analytics and preference features that activate only when granted.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
