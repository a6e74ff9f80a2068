//! Consolidated test utilities for repo-view
//!
//! This module provides unified testing utilities for integration tests:
//! real git repositories for the CLI and the libgit2 provider, and a scripted
//! provider for driving the view-state store through exact interleavings.

pub mod assertions;
pub mod fixtures;
pub mod provider;
pub mod repository;
