//! Implementation of udcheck CLI commands.

pub mod check;
pub mod explain;
