//! Test configuration pointing at a fake API

use pokeapi_csv::Config;
use std::path::Path;
use std::time::Duration;
use wiremock::MockServer;

/// Base URL of the fake API, with trailing slash
pub fn api_base(server: &MockServer) -> String {
    format!("{}/api/v2/", server.uri())
}

/// Config that reads from `server` and writes into `output`
pub fn test_config(server: &MockServer, output: &Path) -> Config {
    let mut config = Config::default();
    config.api.base_url = api_base(server);
    config.api.limit = 50;
    config.api.request_timeout = Duration::from_secs(5);
    config.output.dir = output.to_path_buf();
    config
}
