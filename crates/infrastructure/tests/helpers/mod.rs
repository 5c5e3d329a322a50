#![allow(dead_code)]

mod cluster;
mod wire;

pub use cluster::*;
pub use wire::*;
