//! mlcomp CLI library.
//!
//! This crate provides the host shell around the harmony library: loading
//! environment documents and the chord, validate, and generate commands.

pub mod commands;
pub mod input;
