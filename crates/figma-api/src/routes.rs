//! Tool-to-endpoint mapping
//!
//! Every Figma tool is a row in [`ROUTES`]: a path template whose `{name}`
//! placeholders are filled from arguments, the query parameters to lift
//! out of the arguments (with renames and comma-joining), and what, if
//! anything, to send as the body. [`Route::build`] is the only code that
//! interprets the table.

use serde_json::{Map, Value};

use crate::client::{Method, RequestDescriptor};
use crate::query::{QueryValue, build_query_string};
use crate::{Error, Result};

/// How an argument becomes a query value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryEncoding {
    /// A string, number or boolean passed through as-is.
    Scalar,
    /// An array of scalars joined with `,` (a lone scalar is also accepted).
    CommaJoined,
}

/// A query parameter lifted from the tool arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryParam {
    /// Argument name as the tool receives it.
    pub arg: &'static str,
    /// Parameter name as Figma expects it.
    pub name: &'static str,
    pub encoding: QueryEncoding,
}

impl QueryParam {
    const fn scalar(name: &'static str) -> Self {
        Self {
            arg: name,
            name,
            encoding: QueryEncoding::Scalar,
        }
    }

    const fn joined(arg: &'static str, name: &'static str) -> Self {
        Self {
            arg,
            name,
            encoding: QueryEncoding::CommaJoined,
        }
    }
}

/// What to send as the request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodySpec {
    None,
    /// Every argument not consumed by the path, as a JSON object.
    RemainingArgs,
}

/// One Figma endpoint reachable as a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Route {
    pub tool: &'static str,
    pub method: Method,
    pub path: &'static str,
    pub query: &'static [QueryParam],
    pub body: BodySpec,
}

const PAGINATION: &[QueryParam] = &[QueryParam::scalar("page_size"), QueryParam::scalar("cursor")];

const FILE_QUERY: &[QueryParam] = &[
    QueryParam::scalar("version"),
    QueryParam::scalar("depth"),
    QueryParam::scalar("branch_data"),
];

const FILE_NODES_QUERY: &[QueryParam] = &[
    QueryParam::joined("node_ids", "ids"),
    QueryParam::scalar("version"),
    QueryParam::scalar("depth"),
];

const IMAGE_QUERY: &[QueryParam] = &[
    QueryParam::joined("ids", "ids"),
    QueryParam::scalar("scale"),
    QueryParam::scalar("format"),
    QueryParam::scalar("svg_include_id"),
    QueryParam::scalar("svg_simplify_stroke"),
    QueryParam::scalar("use_absolute_bounds"),
];

const PROJECT_FILES_QUERY: &[QueryParam] = &[
    QueryParam::scalar("page_size"),
    QueryParam::scalar("cursor"),
    QueryParam::scalar("branch_data"),
];

const NO_QUERY: &[QueryParam] = &[];

const fn get(tool: &'static str, path: &'static str, query: &'static [QueryParam]) -> Route {
    Route {
        tool,
        method: Method::Get,
        path,
        query,
        body: BodySpec::None,
    }
}

/// All Figma endpoints exposed as tools.
pub static ROUTES: &[Route] = &[
    // Files
    get("get_file", "/files/{fileKey}", FILE_QUERY),
    get("get_file_nodes", "/files/{fileKey}/nodes", FILE_NODES_QUERY),
    get("get_image", "/images/{fileKey}", IMAGE_QUERY),
    get("get_image_fills", "/files/{fileKey}/images", NO_QUERY),
    // Comments
    get("get_comments", "/files/{fileKey}/comments", NO_QUERY),
    Route {
        tool: "post_comment",
        method: Method::Post,
        path: "/files/{fileKey}/comments",
        query: NO_QUERY,
        body: BodySpec::RemainingArgs,
    },
    Route {
        tool: "delete_comment",
        method: Method::Delete,
        path: "/files/{fileKey}/comments/{comment_id}",
        query: NO_QUERY,
        body: BodySpec::None,
    },
    // Projects
    get("get_team_projects", "/teams/{team_id}/projects", PAGINATION),
    get("get_project_files", "/projects/{project_id}/files", PROJECT_FILES_QUERY),
    // Components and styles
    get("get_team_components", "/teams/{team_id}/components", PAGINATION),
    get("get_file_components", "/files/{fileKey}/components", NO_QUERY),
    get("get_component", "/components/{key}", NO_QUERY),
    get("get_team_component_sets", "/teams/{team_id}/component_sets", PAGINATION),
    get("get_team_styles", "/teams/{team_id}/styles", PAGINATION),
    get("get_file_styles", "/files/{fileKey}/styles", NO_QUERY),
    get("get_style", "/styles/{key}", NO_QUERY),
];

/// Look up the route for a tool name.
pub fn find_route(tool: &str) -> Option<&'static Route> {
    ROUTES.iter().find(|r| r.tool == tool)
}

impl Route {
    /// Names of the `{placeholders}` in the path template, in order.
    pub fn path_params(&self) -> impl Iterator<Item = &'static str> {
        self.path.split('/').filter_map(|segment| {
            segment
                .strip_prefix('{')
                .and_then(|s| s.strip_suffix('}'))
        })
    }

    /// Turn tool arguments into a concrete request.
    ///
    /// `null` arguments count as absent.
    pub fn build(&self, args: &Map<String, Value>) -> Result<RequestDescriptor> {
        let mut path = String::with_capacity(self.path.len());
        for segment in self.path.split('/').skip(1) {
            path.push('/');
            match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
                Some(name) => path.push_str(&path_segment(name, args)?),
                None => path.push_str(segment),
            }
        }

        let mut params = Vec::with_capacity(self.query.len());
        for param in self.query {
            params.push((param.name, query_value(param, args)?));
        }
        path.push_str(&build_query_string(params));

        let body = match self.body {
            BodySpec::None => None,
            BodySpec::RemainingArgs => {
                let consumed: Vec<&str> = self.path_params().collect();
                let remaining: Map<String, Value> = args
                    .iter()
                    .filter(|(k, v)| !consumed.contains(&k.as_str()) && !v.is_null())
                    .map(|(k, v)| (k.clone(), v.clone()))
                    .collect();
                Some(Value::Object(remaining))
            }
        };

        Ok(RequestDescriptor {
            method: self.method,
            path,
            body,
        })
    }
}

fn present<'a>(args: &'a Map<String, Value>, name: &str) -> Option<&'a Value> {
    args.get(name).filter(|v| !v.is_null())
}

/// A path placeholder value: a non-empty string or a number, with no
/// characters that would change the URL structure.
fn path_segment(name: &str, args: &Map<String, Value>) -> Result<String> {
    let value = match present(args, name) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(_) => {
            return Err(Error::invalid_arguments(format!(
                "{name} must be a string"
            )));
        }
        None => {
            return Err(Error::invalid_arguments(format!(
                "Missing required field: {name}"
            )));
        }
    };

    if value.is_empty() {
        return Err(Error::invalid_arguments(format!("{name} must not be empty")));
    }
    if value.contains(['/', '?', '#']) {
        return Err(Error::invalid_arguments(format!(
            "{name} contains characters not allowed in a path: {value}"
        )));
    }
    Ok(value)
}

fn query_value(param: &QueryParam, args: &Map<String, Value>) -> Result<Option<QueryValue>> {
    let Some(value) = present(args, param.arg) else {
        return Ok(None);
    };

    let not_scalar = || {
        Error::invalid_arguments(format!(
            "{} must be a string, number or boolean",
            param.arg
        ))
    };

    match (param.encoding, value) {
        (QueryEncoding::CommaJoined, Value::Array(items)) => {
            let parts = items
                .iter()
                .map(|item| QueryValue::from_json(item).map(|v| v.to_string()))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| {
                    Error::invalid_arguments(format!(
                        "{} must be an array of strings",
                        param.arg
                    ))
                })?;
            Ok(Some(QueryValue::Str(parts.join(","))))
        }
        (_, value) => QueryValue::from_json(value).map(Some).ok_or_else(not_scalar),
    }
}
