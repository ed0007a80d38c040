#![allow(deprecated)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const DUNE_SEARCH: &str = r#"{
    "numFound": 2,
    "docs": [
        {
            "key": "/works/OL893415W",
            "title": "Dune",
            "author_name": ["Frank Herbert"],
            "first_publish_year": 1965,
            "number_of_pages_median": 612
        },
        {
            "key": "/works/OL893416W",
            "title": "Dune Messiah",
            "author_name": ["Frank Herbert"],
            "first_publish_year": 1969
        }
    ]
}"#;

/// Isolated config and data directory for one test
struct Env {
    temp: TempDir,
    catalog_url: String,
}

impl Env {
    fn new() -> Self {
        Self {
            temp: TempDir::new().unwrap(),
            catalog_url: "http://127.0.0.1:9".to_string(),
        }
    }

    fn with_catalog(catalog_url: String) -> Self {
        Self {
            temp: TempDir::new().unwrap(),
            catalog_url,
        }
    }

    fn data_dir(&self) -> PathBuf {
        self.temp.path().join("data")
    }

    fn list_file(&self) -> PathBuf {
        self.data_dir().join("readingList.json")
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("readlist").unwrap();
        cmd.env("READLIST_CONFIG", self.temp.path().join("config.toml"))
            .env("READLIST_DATA_DIR", self.data_dir())
            .env("READLIST_CATALOG_URL", &self.catalog_url)
            .env_remove("READLIST_LOG");
        cmd
    }

    fn seed(&self, json: &str) {
        fs::create_dir_all(self.data_dir()).unwrap();
        fs::write(self.list_file(), json).unwrap();
    }
}

/// Serve a fixed search response for every request
fn spawn_catalog(body: &'static str) -> (String, mpsc::Sender<()>) {
    let server = tiny_http::Server::http("127.0.0.1:0").expect("start tiny_http server");
    let base_url = format!("http://{}", server.server_addr());
    let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>();

    thread::spawn(move || loop {
        if shutdown_rx.try_recv().is_ok() {
            break;
        }
        let request = match server.recv_timeout(Duration::from_millis(50)) {
            Ok(Some(req)) => req,
            Ok(None) => continue,
            Err(_) => break,
        };
        let response = if request.url().starts_with("/search.json?") {
            tiny_http::Response::from_string(body).with_status_code(200)
        } else {
            tiny_http::Response::from_string("not found").with_status_code(404)
        };
        let _ = request.respond(response);
    });

    (base_url, shutdown_tx)
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

const THREE_BOOKS: &str = r#"[{"key":"/works/A","title":"Alpha","author_name":[],"first_publish_year":null,"number_of_pages_median":null,"status":"backlog"},{"key":"/works/X","title":"Xeno","author_name":[],"first_publish_year":null,"number_of_pages_median":null,"status":"done"},{"key":"/works/B","title":"Beta","author_name":[],"first_publish_year":null,"number_of_pages_median":null,"status":"backlog"}]"#;

#[test]
fn list_on_empty_shows_proverbs() {
    let env = Env::new();
    env.cmd()
        .args(["list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Currently Reading (0)"))
        .stdout(predicate::str::contains("A rolling stone gathers no moss."))
        .stdout(predicate::str::contains("Well done is better than well said."));

    assert!(!env.list_file().exists());
}

#[test]
fn search_marks_tracked_books() {
    let (url, shutdown) = spawn_catalog(DUNE_SEARCH);
    let env = Env::with_catalog(url);
    env.seed(r#"[{"key":"/works/OL893415W","title":"Dune","status":"done"}]"#);

    env.cmd()
        .args(["search", "dune"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✓ OL893415W"))
        .stdout(predicate::str::contains("Showing 1 - 2 out of 2"));

    let _ = shutdown.send(());
}

#[test]
fn add_from_search_persists_book() {
    let (url, shutdown) = spawn_catalog(DUNE_SEARCH);
    let env = Env::with_catalog(url);

    env.cmd()
        .args(["add", "dune", "--key", "OL893416W", "--status", "reading"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Added 'Dune Messiah' to Currently Reading"));

    let saved: serde_json::Value = serde_json::from_str(&read(&env.list_file())).unwrap();
    assert_eq!(saved[0]["key"], "/works/OL893416W");
    assert_eq!(saved[0]["status"], "inProgress");
    assert!(saved[0]["number_of_pages_median"].is_null());

    // Adding the same key again is refused
    env.cmd()
        .args(["add", "dune", "--key", "OL893416W"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Already on your list"));

    let _ = shutdown.send(());
}

#[test]
fn add_unknown_key_fails() {
    let (url, shutdown) = spawn_catalog(DUNE_SEARCH);
    let env = Env::with_catalog(url);

    env.cmd()
        .args(["add", "dune", "--key", "OL0W"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No result with key"));
    assert!(!env.list_file().exists());

    let _ = shutdown.send(());
}

#[test]
fn search_failure_is_reported() {
    let env = Env::new();
    env.cmd()
        .args(["search", "dune"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Search failed"));
}

#[test]
fn move_changes_status() {
    let env = Env::new();
    env.seed(THREE_BOOKS);

    env.cmd()
        .args(["move", "B", "done"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved 'Beta' to Done"));

    env.cmd()
        .args(["--quiet", "list", "--status", "done"])
        .assert()
        .success()
        .stdout("/works/X\n/works/B\n");
}

#[test]
fn reorder_within_partition() {
    let env = Env::new();
    env.seed(THREE_BOOKS);

    env.cmd()
        .args(["reorder", "later", "0", "1"])
        .assert()
        .success();

    let saved: serde_json::Value = serde_json::from_str(&read(&env.list_file())).unwrap();
    let keys: Vec<&str> = saved
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["key"].as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["/works/B", "/works/X", "/works/A"]);
}

#[test]
fn reorder_out_of_range_fails_without_writing() {
    let env = Env::new();
    env.seed(THREE_BOOKS);

    env.cmd()
        .args(["reorder", "later", "0", "5"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("out of range"));

    assert_eq!(read(&env.list_file()), THREE_BOOKS);
}

#[test]
fn remove_without_tty_is_cancelled() {
    let env = Env::new();
    env.seed(THREE_BOOKS);

    env.cmd()
        .args(["remove", "A"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cancelled."));

    assert_eq!(read(&env.list_file()), THREE_BOOKS);
}

#[test]
fn remove_with_yes() {
    let env = Env::new();
    env.seed(THREE_BOOKS);

    env.cmd()
        .args(["rm", "A", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Removed 'Alpha'"));

    assert!(!read(&env.list_file()).contains("/works/A\""));
}

#[test]
fn corrupt_list_is_set_aside() {
    let env = Env::new();
    env.seed("{not json");

    env.cmd()
        .args(["list"])
        .assert()
        .success()
        .stderr(predicate::str::contains("readingList.corrupt"));

    assert_eq!(
        read(&env.data_dir().join("readingList.corrupt.json")),
        "{not json"
    );
}

#[test]
fn status_json_reports_counts() {
    let env = Env::new();
    env.seed(THREE_BOOKS);

    let output = env.cmd().args(["--json", "status"]).output().unwrap();
    assert!(output.status.success());

    let status: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(status["total"], 3);
    assert_eq!(status["counts"]["backlog"], 2);
    assert_eq!(status["counts"]["done"], 1);
    assert_eq!(status["counts"]["inProgress"], 0);
}

#[test]
fn config_set_writes_file() {
    let env = Env::new();
    let config_path = env.temp.path().join("custom.toml");

    env.cmd()
        .args(["--config"])
        .arg(&config_path)
        .args(["config", "set", "catalog_url", "https://catalog.example"])
        .assert()
        .success();

    assert!(read(&config_path).contains("https://catalog.example"));

    env.cmd()
        .args(["config", "set", "catalog_url", "ftp://nope"])
        .assert()
        .failure();
}
