//! AnyVod - media catalog and video-embed proxy
//!
//! This library crate exposes the gateway, resolver and router for
//! integration testing.

pub mod catalog;
pub mod config;
pub mod embed;
pub mod error;
pub mod media;
pub mod server;
