//! # Data Studio Design Documentation
//!
//! This crate contains design documentation, architectural decision records,
//! and implementation guides for the Data Studio project.
//!
//! ## Documentation Location
//!
//! All design documents are located in the `docs/` directory at the root
//! of this crate.
//!
//! Key documents:
//! - `architecture.md` - Overall system architecture
//! - `metadata-taxonomy.md` - The four-part metadata model
//! - `adr/` - Architectural Decision Records

// This is a documentation-only crate
#![no_std]
