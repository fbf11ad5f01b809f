//! Command handlers, one module per area.

pub mod account;
pub mod entries;
pub mod misc;
pub mod transfer;
