//! Build-context packaging for gantry.
//!
//! # Packaging strategy
//!
//! The build context is a plain tar stream of the project directory:
//!
//! - Regular files only, walked in sorted order, so packaging the same
//!   tree twice produces identical bytes
//! - Entries carry root-relative names, so the engine sees the same
//!   layout the project has on disk
//! - Anything whose root-relative path starts with `.git` is excluded
//! - The first unreadable file aborts packaging; a partial context is
//!   never handed to the engine

pub mod context;

pub use context::{ContextError, package, package_into};
