//! Raw API passthrough
//!
//! Sends an arbitrary request to the account's API base URL with the Basic
//! auth header. No session is started. Non-2xx responses fail the action
//! unless `failsafe` is set, in which case the status is returned as data.

use log::info;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;
use std::time::Duration;

use super::{Action, ActionOutput};
use crate::client::{HttpRequest, Method};
use crate::error::{AxigenError, Result};
use crate::piece::PieceContext;
use crate::props::{DropdownOption, PropertyDef, Props, parse_props};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CustomCallInput {
    #[serde(default = "default_method")]
    method: String,
    /// Relative to the API base URL, or an absolute URL under it
    url: String,
    #[serde(default)]
    query_params: BTreeMap<String, String>,
    #[serde(default)]
    headers: BTreeMap<String, String>,
    #[serde(default)]
    body: Option<Value>,
    /// Return failed responses instead of raising them
    #[serde(default)]
    failsafe: bool,
    /// Per-call timeout in seconds
    #[serde(default)]
    timeout: Option<u64>,
}

fn default_method() -> String {
    "GET".to_string()
}

/// Resolve the target URL; absolute URLs must stay under the base URL
fn resolve_url(base_url: &str, url: &str) -> Result<String> {
    if url.starts_with("http://") || url.starts_with("https://") {
        let under_base = url
            .strip_prefix(base_url)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/') || rest.starts_with('?'));
        if under_base {
            return Ok(url.to_string());
        }
        return Err(AxigenError::InvalidInput(format!(
            "URL must start with {}",
            base_url
        )));
    }

    if url.starts_with('/') {
        Ok(format!("{}{}", base_url, url))
    } else {
        Ok(format!("{}/{}", base_url, url))
    }
}

pub struct CustomApiCall;

impl Action for CustomApiCall {
    fn name(&self) -> &'static str {
        "customApiCall"
    }

    fn display_name(&self) -> &'static str {
        "Custom API Call"
    }

    fn description(&self) -> &'static str {
        "Make a custom API call to the Axigen server"
    }

    fn props(&self) -> Vec<PropertyDef> {
        let methods = ["GET", "POST", "PUT", "PATCH", "DELETE"]
            .into_iter()
            .map(|m| DropdownOption::new(m, m))
            .collect();

        vec![
            PropertyDef::static_dropdown("method", "Method", "HTTP method", methods)
                .required()
                .with_default("GET"),
            PropertyDef::short_text("url", "URL", "Path relative to the API base URL, e.g. /folders").required(),
            PropertyDef::short_text("queryParams", "Query Parameters", "Object of query parameters"),
            PropertyDef::short_text("headers", "Headers", "Object of extra request headers"),
            PropertyDef::short_text("body", "Body", "JSON request body"),
            PropertyDef::checkbox("failsafe", "No Error on Failure", "Return the response even when its status is not 2xx")
                .with_default(false),
            PropertyDef::number("timeout", "Timeout (in seconds)", "Give up on the request after this many seconds"),
        ]
    }

    fn run(&self, ctx: &PieceContext, props: &Props) -> Result<ActionOutput> {
        let input: CustomCallInput = parse_props(props)?;
        let method = Method::parse(&input.method)
            .ok_or_else(|| AxigenError::InvalidInput(format!("unsupported method: {}", input.method)))?;

        let client = ctx.client()?;
        let url = resolve_url(client.base_url(), &input.url)?;
        info!("Custom API call {} {}", method, url);

        let mut request = HttpRequest::new(method, url).headers(client.auth_headers());
        for (name, value) in input.headers {
            request = request.header(name, value);
        }
        for (key, value) in input.query_params {
            request = request.query(key, value);
        }
        request.body = input.body;
        if let Some(secs) = input.timeout.filter(|s| *s > 0) {
            request = request.timeout(Duration::from_secs(secs));
        }

        let mut response = client.transport().send(request)?;
        if !input.failsafe {
            response = response.error_for_status()?;
        }

        let body = serde_json::from_slice::<Value>(&response.body)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&response.body).into_owned()));

        let mut output = Map::new();
        output.insert("status".to_string(), json!(response.status));
        output.insert("body".to_string(), body);
        Ok(ActionOutput::Json(Value::Object(output)))
    }
}
