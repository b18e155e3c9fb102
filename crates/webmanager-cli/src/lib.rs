//! Web Manager CLI library.
//!
//! This crate provides the command-line interface and the interactive
//! block browser for the Web Manager viewer.

pub mod browse;
pub mod cli;
pub mod commands;
pub mod prompt;
pub mod render;
pub mod simulate;
