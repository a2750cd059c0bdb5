//! Data models shared by the finder, parser and front ends.

pub mod config;
pub mod date;
pub mod report;
