//! stageplot core types
//!
//! This crate provides the foundational types shared by the stageplot
//! crates:
//!
//! - **Colors**: CSS color handling ([`color::Color`])
//! - **Geometry**: Points, sizes and bounds in plot coordinates ([`geometry`] module)
//! - **Stages**: The pipeline stage model and its classification ([`stage`] module)

pub mod color;
pub mod geometry;
pub mod stage;
