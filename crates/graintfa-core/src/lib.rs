//! Graintfa Core Types and Definitions
//!
//! This crate provides the foundational types for composing Minecraft-style
//! inventory GUI textures. It includes:
//!
//! - **Identifiers**: Interned element type identifiers ([`identifier::ElementId`])
//! - **Colors**: CSS color parsing for configurable colors ([`color::Color`])
//! - **Geometry**: Integer pixel geometry in GUI space ([`geometry`] module)
//! - **Surface**: The minimal pixel surface every element draws into ([`surface`] module)
//! - **Schema**: Per-element configuration schemas and values ([`schema`] module)
//! - **Elements**: The element contract and the built-in elements ([`element`] module)
//! - **Registry**: The lookup table from identifier to element ([`registry`] module)

pub mod color;
pub mod element;
pub mod geometry;
pub mod identifier;
pub mod registry;
pub mod schema;
pub mod surface;

mod error;

pub use error::ElementError;
