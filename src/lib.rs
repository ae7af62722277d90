//! Ublock - std140 uniform block packing and validation
//!
//! Packs structured parameter blocks into std140 byte buffers, predicts
//! their byte sizes ahead of allocation, and cross-checks each layout
//! against the GLSL uniform block declaration that consumes it, so that
//! layout drift between CPU and shader is caught at startup instead of
//! surfacing as silently corrupted rendering.

pub mod core;
pub mod layout;
pub mod writer;
pub mod validate;
pub mod binding;
pub mod blocks;
