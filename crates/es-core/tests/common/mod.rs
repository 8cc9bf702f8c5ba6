//! Shared mock monitoring API for integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;

use tiny_http::{Response, Server, StatusCode};

use es_config::ApiSettings;

/// One request as seen by the mock server.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path: String,
    pub authorization: Option<String>,
}

/// In-process monitoring API double. Answers every request with the
/// status the responder returns for its path, and records what it saw.
pub struct MockApi {
    port: u16,
    server: Arc<Server>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    worker: Option<JoinHandle<()>>,
}

impl MockApi {
    pub fn start<F>(responder: F) -> Self
    where
        F: Fn(&str) -> u16 + Send + 'static,
    {
        let server = Arc::new(Server::http("127.0.0.1:0").expect("bind mock api"));
        let port = server
            .server_addr()
            .to_ip()
            .expect("mock api listens on ip")
            .port();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let worker = {
            let server = Arc::clone(&server);
            let requests = Arc::clone(&requests);
            std::thread::spawn(move || {
                for request in server.incoming_requests() {
                    let authorization = request
                        .headers()
                        .iter()
                        .find(|h| h.field.equiv("Authorization"))
                        .map(|h| h.value.to_string());
                    requests.lock().unwrap().push(RecordedRequest {
                        path: request.url().to_string(),
                        authorization,
                    });
                    let status = responder(request.url());
                    let _ = request.respond(Response::empty(StatusCode(status)));
                }
            })
        };

        Self {
            port,
            server,
            requests,
            worker: Some(worker),
        }
    }

    /// A server that answers 200 to the listed paths and 404 otherwise.
    pub fn with_open_paths(open: &[&str]) -> Self {
        let open: Vec<String> = open.iter().map(|p| p.to_string()).collect();
        Self::start(move |path| {
            if open.iter().any(|p| p == path) {
                200
            } else {
                404
            }
        })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// API settings pointing at this mock.
    pub fn settings(&self) -> ApiSettings {
        ApiSettings {
            host: "127.0.0.1".to_string(),
            port: self.port,
            user: None,
            password: None,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for MockApi {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

/// A port nothing is listening on.
pub fn refused_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    port
}
