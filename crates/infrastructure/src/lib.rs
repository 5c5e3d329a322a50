//! Kubezone Infrastructure Layer
pub mod cluster;
pub mod dns;
