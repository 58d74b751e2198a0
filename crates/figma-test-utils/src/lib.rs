//! Shared test utilities for the figma-mcp workspace.
//!
//! Dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`config`] - [`TestConfigDir`], a throwaway config directory
//! - [`upstream`] - [`MockFigma`], a mock Figma REST API
//! - [`rpc`] - JSON-RPC message builders and response accessors

pub mod config;
pub mod rpc;
pub mod upstream;

pub use config::TestConfigDir;
pub use upstream::MockFigma;

/// Token used by tests that need a configured server.
pub const TEST_TOKEN: &str = "figd_test_token_0123456789";
