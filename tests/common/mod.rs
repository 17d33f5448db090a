#![allow(dead_code)]

pub mod fake_api;
pub mod mock_data;

use std::fs;
use std::process::{Command, Output};
use std::sync::Arc;

use tempfile::TempDir;

use artify::config::Config;
use artify::gallery::Gallery;
use artify::session::{Session, Viewer};

use fake_api::FakeApi;

/// Run artify commands against an isolated config directory
pub struct ArtifyTest {
    pub temp_dir: TempDir,
    binary_path: String,
    api_url: Option<String>,
}

impl ArtifyTest {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        ArtifyTest {
            temp_dir,
            binary_path: env!("CARGO_BIN_EXE_artify").to_string(),
            api_url: None,
        }
    }

    /// Point the binary at a gallery API
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = Some(url.into());
        self
    }

    pub fn run(&self, args: &[&str]) -> Output {
        let mut command = Command::new(&self.binary_path);
        command
            .args(args)
            .current_dir(self.temp_dir.path())
            .env("ARTIFY_HOME", self.temp_dir.path())
            .env_remove("ARTIFY_TOKEN")
            .env_remove("ARTIFY_LOG")
            .env("NO_COLOR", "1");
        match self.api_url {
            Some(ref url) => command.env("ARTIFY_API_URL", url),
            None => command.env_remove("ARTIFY_API_URL"),
        };
        command.output().expect("Failed to execute artify command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    pub fn write_config(&self, content: &str) {
        let path = self.temp_dir.path().join("config.yaml");
        fs::write(path, content).expect("Failed to write config file");
    }

    pub fn read_config(&self) -> String {
        let path = self.temp_dir.path().join("config.yaml");
        fs::read_to_string(path).expect("Failed to read config file")
    }
}

/// Session for the viewer the fake catalog treats as "jane"
pub fn signed_in() -> Session {
    Session::authenticated(
        Viewer::new("jane@example.com")
            .with_name("Jane Doe")
            .with_email("jane@example.com"),
        "test-token",
    )
}

/// Gallery over `api` with instant searches
pub fn gallery(api: Arc<FakeApi>, session: Session) -> Gallery<FakeApi> {
    let mut config = Config::default();
    config.search.debounce_ms = 0;
    Gallery::new(api, session, &config)
}
