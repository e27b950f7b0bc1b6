//! Test fixtures for nearo.
//!
//! Provides:
//! - Sample Overpass elements around Indiranagar, Bangalore
//! - Builders for places with explicit price, rating and distance

pub mod indiranagar;

pub use indiranagar::*;
