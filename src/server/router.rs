use std::sync::Arc;

use crate::common::request::Request;
use crate::common::response::Response;
use crate::server::router::ListenerResult::Next;

/// The result of a request listener.
#[derive(Debug, PartialEq, Eq)]
pub enum ListenerResult {
    /// Continues to the next listener to be called on the request, if any.
    Next,
    /// Stops execution of listeners for the request and immediately sends the response.
    SendResponse(Response),
    /// Sends a shared response.
    SendResponseArc(Arc<Response>),
}

/// A router that calls functions when requests with certain paths are received.
pub struct Router {
    listeners: Vec<(String, Box<dyn Fn(&str, &Request) -> ListenerResult + 'static + Send + Sync>)>,
}

impl Router {
    /// Creates a new empty router.
    pub fn new() -> Router {
        Router { listeners: Vec::new() }
    }

    /// Calls the given function on requests with paths that start with prefix.
    /// If prefix is empty, then the function will be called on all requests directed to this router.
    /// The first argument to the listener function is the path local to this router.
    pub fn on_prefix(&mut self, prefix: &str, listener: impl Fn(&str, &Request) -> ListenerResult + 'static + Send + Sync) {
        self.listeners.push((prefix.into(), Box::new(listener)))
    }

    /// Calls the given function on only requests with paths that equal the given path.
    pub fn on(&mut self, path: &str, listener: impl Fn(&str, &Request) -> ListenerResult + 'static + Send + Sync) {
        let path_string = path.to_string();
        let listener = move |router_path: &str, request: &Request| {
            if path_string.eq(router_path) {
                return listener(router_path, request);
            }
            Next
        };
        self.on_prefix("", listener);
    }

    /// Like on_prefix, but instead passes all requests that start with the given path to router.
    /// The prefix is removed from the path before being passed to router.
    /// ```
    /// use sitebox::server::Router;
    /// use sitebox::server::ListenerResult::Next;
    /// use sitebox::common::request::Request;
    ///
    /// let mut router = Router::new();
    /// let mut sub_router = Router::new();
    /// sub_router.on("/bar", |_,_| { println!("will print on requests to /foo/bar"); Next });
    /// router.route("/foo", sub_router);
    /// ```
    pub fn route(&mut self, path: &str, router: Router) {
        let path_length = path.len();
        let listener = move |request_path: &str, request: &Request| {
            router.result_internal(&request_path[path_length..], request)
        };
        self.on_prefix(path, listener);
    }

    /// Calls listeners on the given request based on request_path and produces a listener result.
    fn result_internal(&self, request_path: &str, request: &Request) -> ListenerResult {
        self.listeners.iter()
            .filter(|(prefix, _)| request_path.starts_with(prefix))
            .map(|(_, listener)| listener(request_path, request))
            .find(|result| *result != Next)
            .unwrap_or(Next)
    }

    /// Gets the result from listeners that are called on the given request.
    /// The result from the last listener to be called on the given request is returned.
    /// If no listeners were called, then "Next" is returned.
    pub fn result(&self, request: &Request) -> ListenerResult {
        self.result_internal(&request.path, request)
    }
}
