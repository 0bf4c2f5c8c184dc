//! Host side of the host-does-IO split: executes `HttpRequest`s with ureq.
//!
//! `Dispatcher` runs each `ApiCall` on its own thread and posts the outcome
//! back on a channel, so the UI loop never waits on the network.

use std::{
    sync::mpsc::{self, Receiver, Sender},
    thread,
    time::Duration,
};

use tasklist_core::{ApiCall, ApiError, ApiReply, HttpMethod, HttpRequest, HttpResponse, TodoClient};
use tracing::{debug, warn};

/// A finished call and what came of it.
pub type Completion = (ApiCall, Result<ApiReply, ApiError>);

/// Blocking HTTP executor with a fixed per-request timeout. No retries.
#[derive(Clone)]
pub struct Transport {
    agent: ureq::Agent,
}

impl Transport {
    pub fn new(timeout: Duration) -> Self {
        // Status interpretation belongs to `TodoClient`, so 4xx/5xx come back
        // as data.
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }

    pub fn execute(&self, req: HttpRequest) -> Result<HttpResponse, ApiError> {
        debug!(method = %req.method, path = %req.path, "sending request");
        let result = match (req.method, &req.body) {
            (HttpMethod::Get, _) => prepare(self.agent.get(&req.path), &req).call(),
            (HttpMethod::Delete, _) => prepare(self.agent.delete(&req.path), &req).call(),
            (HttpMethod::Post, Some(body)) => {
                prepare(self.agent.post(&req.path), &req).send(body.as_bytes())
            }
            (HttpMethod::Post, None) => prepare(self.agent.post(&req.path), &req).send_empty(),
            (HttpMethod::Put, Some(body)) => {
                prepare(self.agent.put(&req.path), &req).send(body.as_bytes())
            }
            (HttpMethod::Put, None) => prepare(self.agent.put(&req.path), &req).send_empty(),
        };
        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        debug!(status, "received response");

        Ok(HttpResponse::new(status, body))
    }
}

fn prepare<B>(builder: ureq::RequestBuilder<B>, req: &HttpRequest) -> ureq::RequestBuilder<B> {
    let mut builder =
        builder.query_pairs(req.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    for (key, value) in &req.headers {
        builder = builder.header(key.as_str(), value.as_str());
    }
    builder
}

/// Runs `ApiCall`s in the background.
pub struct Dispatcher {
    transport: Transport,
    client: TodoClient,
    completions: Sender<Completion>,
}

impl Dispatcher {
    pub fn new(transport: Transport, client: TodoClient) -> (Self, Receiver<Completion>) {
        let (completions, rx) = mpsc::channel();
        let dispatcher = Self {
            transport,
            client,
            completions,
        };
        (dispatcher, rx)
    }

    pub fn dispatch(&self, call: ApiCall) {
        let transport = self.transport.clone();
        let client = self.client.clone();
        let completions = self.completions.clone();
        thread::spawn(move || {
            let result = run_call(&transport, &client, &call);
            if completions.send((call, result)).is_err() {
                warn!("completion dropped, the UI has already exited");
            }
        });
    }
}

/// Build, execute and parse one call synchronously.
pub fn run_call(
    transport: &Transport,
    client: &TodoClient,
    call: &ApiCall,
) -> Result<ApiReply, ApiError> {
    let req = call.build(client)?;
    let response = transport.execute(req)?;
    call.parse(client, response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tasklist_core::CreateTodo;

    fn start_server() -> String {
        let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = std_listener.local_addr().unwrap();
        std_listener.set_nonblocking(true).unwrap();

        thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            rt.block_on(async {
                let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
                mock_server::run(listener).await
            })
            .unwrap();
        });

        format!("http://{addr}/api")
    }

    #[test]
    fn execute_returns_error_statuses_as_data() {
        let client = TodoClient::new(&start_server());
        let transport = Transport::new(Duration::from_secs(5));

        let response = transport.execute(client.build_get_todo(12345)).unwrap();
        assert_eq!(response.status, 404);
    }

    #[test]
    fn execute_encodes_search_keyword() {
        let client = TodoClient::new(&start_server());
        let transport = Transport::new(Duration::from_secs(5));
        let input = CreateTodo {
            title: "R&D budget?".to_string(),
            description: String::new(),
        };
        transport
            .execute(client.build_create_todo(&input).unwrap())
            .unwrap();

        let response = transport.execute(client.build_search_todos("r&d")).unwrap();
        let found = client.parse_search_todos(response).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].title, "R&D budget?");
    }

    #[test]
    fn dispatcher_posts_completions() {
        let client = TodoClient::new(&start_server());
        let (dispatcher, completions) =
            Dispatcher::new(Transport::new(Duration::from_secs(5)), client);

        dispatcher.dispatch(ApiCall::LoadAll);
        let (call, result) = completions
            .recv_timeout(Duration::from_secs(10))
            .unwrap();
        assert_eq!(call, ApiCall::LoadAll);
        assert_eq!(result.unwrap(), ApiReply::Loaded(Vec::new()));
    }

    #[test]
    fn unreachable_server_is_a_transport_error() {
        let client = TodoClient::new("http://127.0.0.1:9/api");
        let transport = Transport::new(Duration::from_secs(2));
        let err = run_call(&transport, &client, &ApiCall::LoadAll).unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
    }
}
