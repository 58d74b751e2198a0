//! Credential persistence for the Figma MCP server
//!
//! Holds the personal access token in a small JSON document under the
//! user's home directory (`~/.mcp-figma/config.json` by default) and
//! provides the atomic I/O used to write it.

pub mod error;
pub mod io;
pub mod store;

pub use error::{Error, Result};
pub use store::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, CredentialStore, FigmaConfig};
