use std::net::SocketAddr;
use std::time::Duration;

use nasa_explorer::config::{AppConfig, RateLimitConfig};
use nasa_explorer::hooks::FacadeClient;
use tokio::net::TcpListener;
use tokio::task::AbortHandle;
use wiremock::MockServer;

pub const TEST_API_KEY: &str = "test-key";
pub const TEST_ORIGIN: &str = "http://localhost:5173";

pub struct TestApp {
    pub address: String,
    pub mock_server: MockServer,
    server_handle: AbortHandle,
}

impl TestApp {
    pub fn api_url(&self, path: &str) -> String {
        format!("{}/api{}", self.address, path)
    }

    pub fn facade_client(&self) -> FacadeClient {
        FacadeClient::new(format!("{}/api", self.address)).expect("valid facade client")
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        self.server_handle.abort();
    }
}

fn test_config(mock_server: &MockServer, rate_limit: RateLimitConfig) -> AppConfig {
    AppConfig {
        port: 0,
        nasa_base_url: mock_server.uri(),
        nasa_images_url: mock_server.uri(),
        nasa_api_key: TEST_API_KEY.to_string(),
        allowed_origins: vec![TEST_ORIGIN.to_string()],
        environment: "test".to_string(),
        rate_limit,
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with_rate_limit(RateLimitConfig {
        max_requests: 10_000,
        window: Duration::from_secs(60),
    })
    .await
}

pub async fn spawn_app_with_rate_limit(rate_limit: RateLimitConfig) -> TestApp {
    let mock_server = MockServer::start().await;
    let config = test_config(&mock_server, rate_limit);
    spawn_app_inner(config, mock_server).await
}

/// Point the NASA base URL somewhere other than the mock server
pub async fn spawn_app_with_nasa_base_url(base_url: &str) -> TestApp {
    let mock_server = MockServer::start().await;
    let mut config = test_config(&mock_server, RateLimitConfig::default());
    config.nasa_base_url = base_url.to_string();
    spawn_app_inner(config, mock_server).await
}

async fn spawn_app_inner(config: AppConfig, mock_server: MockServer) -> TestApp {
    let app = nasa_explorer::build_app(&config).expect("Failed to build app");

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let local_addr = listener.local_addr().expect("Failed to get local address");
    let address = format!("http://{}", local_addr);

    let server_handle = tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .expect("Server failed to start");
    })
    .abort_handle();

    TestApp {
        address,
        mock_server,
        server_handle,
    }
}

/// Address of a local port with nothing listening on it
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().expect("Failed to get local address");
    drop(listener);
    format!("http://{}", addr)
}

pub async fn get_json(url: &str) -> (u16, serde_json::Value) {
    let response = reqwest::get(url)
        .await
        .unwrap_or_else(|e| panic!("request to {url} failed: {e}"));
    let status = response.status().as_u16();
    let body = response
        .json()
        .await
        .unwrap_or_else(|e| panic!("failed to decode body from {url}: {e}"));
    (status, body)
}
