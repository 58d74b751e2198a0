//! Figma REST API access for the MCP server
//!
//! ```text
//! [ routes (tool -> path/query/body) ]
//!        |
//!        v
//! [ FigmaClient ] --X-Figma-Token--> https://api.figma.com/v1
//!        |
//!        v
//! [ AuthManager ] --> [ figma_config::CredentialStore ]
//! ```
//!
//! Every Figma tool is one row in [`routes::ROUTES`]; the client performs
//! exactly one request per call and passes the JSON response through.

pub mod auth;
pub mod client;
pub mod error;
pub mod query;
pub mod routes;

pub use auth::{AuthManager, mask_token};
pub use client::{BASE_URL, FigmaClient, Method, RequestDescriptor};
pub use error::{Error, Result};
pub use query::{QueryValue, build_query_string};
pub use routes::{BodySpec, QueryEncoding, QueryParam, Route, ROUTES, find_route};
