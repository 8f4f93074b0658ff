//! CLI front end: argument parsing, the interactive loop, and report files.

pub mod cli;
pub mod report;
