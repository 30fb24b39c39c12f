//! Webless DNS Infrastructure Layer
//!
//! Adapters for the application ports: the health cache with its
//! background monitors, the HTTP website prober, the hickory request
//! handler, and the periodic cache sweep job.

pub mod cache;
pub mod dns;
pub mod health;
pub mod jobs;
pub mod observer;
