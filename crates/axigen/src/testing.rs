//! Scripted transport used by unit tests

use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::client::{HttpRequest, HttpResponse, Method, Transport};
use crate::error::{AxigenError, Result};

#[derive(Clone)]
enum Scripted {
    Response(HttpResponse),
    Failure(String),
}

#[derive(Default)]
struct Route {
    queue: VecDeque<Scripted>,
    last: Option<Scripted>,
}

/// Replays scripted responses keyed by method and API path
///
/// Responses for a route are consumed in order; once exhausted the last one
/// keeps being returned. Unscripted routes answer 404.
#[derive(Default)]
pub struct ScriptedTransport {
    routes: Mutex<HashMap<(Method, String), Route>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, method: Method, path: &str, status: u16, body: Value) {
        let bytes = serde_json::to_vec(&body).unwrap();
        self.push(method, path, Scripted::Response(HttpResponse::new(status, bytes)));
    }

    pub fn respond_bytes(&self, method: Method, path: &str, status: u16, body: &[u8], content_type: &str) {
        let mut response = HttpResponse::new(status, body.to_vec());
        response.content_type = Some(content_type.to_string());
        self.push(method, path, Scripted::Response(response));
    }

    pub fn fail(&self, method: Method, path: &str, message: &str) {
        self.push(method, path, Scripted::Failure(message.to_string()));
    }

    fn push(&self, method: Method, path: &str, scripted: Scripted) {
        self.routes
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .queue
            .push_back(scripted);
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, method: Method, path: &str) -> Vec<HttpRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && api_path(&r.url) == path)
            .collect()
    }

    pub fn count(&self, method: Method, path: &str) -> usize {
        self.requests_to(method, path).len()
    }
}

impl Transport for ScriptedTransport {
    fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let key = (request.method, api_path(&request.url).to_string());
        self.requests.lock().unwrap().push(request);

        let mut routes = self.routes.lock().unwrap();
        let scripted = match routes.get_mut(&key) {
            Some(route) => match route.queue.pop_front() {
                Some(next) => {
                    route.last = Some(next.clone());
                    Some(next)
                }
                None => route.last.clone(),
            },
            None => None,
        };

        match scripted {
            Some(Scripted::Response(response)) => Ok(response),
            Some(Scripted::Failure(message)) => Err(AxigenError::Transport(message)),
            None => Ok(HttpResponse::new(404, "not scripted")),
        }
    }
}

/// Path relative to the API base (`/api/v1`)
fn api_path(url: &str) -> &str {
    match url.find("/api/v1") {
        Some(idx) => &url[idx + "/api/v1".len()..],
        None => url,
    }
}
