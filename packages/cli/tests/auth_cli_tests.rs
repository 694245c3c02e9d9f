// ABOUTME: Integration tests for the gwsctl auth command tree
// ABOUTME: Drives parsed command lines against the memory store and captures stdout, stderr and exit codes

use clap::Parser;
use pretty_assertions::assert_eq;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use gwsctl_auth::ConfirmInput;
use gwsctl_cli::{run, Cli, Runtime};
use gwsctl_secrets::{MemoryStore, SecretStore};

struct NoTerminal;

impl ConfirmInput for NoTerminal {
    fn is_interactive(&self) -> bool {
        false
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        panic!("non-interactive input must never be read")
    }

    fn show_prompt(&mut self, _prompt: &str) -> io::Result<()> {
        panic!("non-interactive input must never be prompted")
    }
}

struct Answer(&'static str);

impl ConfirmInput for Answer {
    fn is_interactive(&self) -> bool {
        true
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(Some(format!("{}\n", self.0)))
    }

    fn show_prompt(&mut self, _prompt: &str) -> io::Result<()> {
        Ok(())
    }
}

struct Invocation {
    code: i32,
    stdout: String,
    stderr: String,
}

struct Harness {
    store: Arc<MemoryStore>,
    dir: TempDir,
}

impl Harness {
    fn new() -> Self {
        colored::control::set_override(false);
        Self {
            store: Arc::new(MemoryStore::new()),
            dir: TempDir::new().unwrap(),
        }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    async fn invoke(&self, args: &[&str]) -> Invocation {
        self.invoke_with(args, Box::new(NoTerminal)).await
    }

    async fn invoke_with(
        &self,
        args: &[&str],
        input: Box<dyn ConfirmInput + Send>,
    ) -> Invocation {
        let cli = Cli::try_parse_from(std::iter::once("gwsctl").chain(args.iter().copied()))
            .unwrap();
        let mut runtime = Runtime::new(
            self.store.clone(),
            cli.global.confirm_flags(),
            input,
            self.path("config/credentials.json"),
        );

        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let code = run(&cli, &mut runtime, &mut stdout, &mut stderr).await;

        Invocation {
            code,
            stdout: String::from_utf8(stdout).unwrap(),
            stderr: String::from_utf8(stderr).unwrap(),
        }
    }

    async fn add(&self, account: &str) {
        let result = self
            .invoke(&[
                "auth",
                "add",
                account,
                "--services",
                "gmail,drive",
                "--refresh-token",
                "rt-secret",
            ])
            .await;
        assert_eq!(result.code, 0, "add failed: {}", result.stderr);
    }
}

#[tokio::test]
async fn test_empty_store_lists_report_no_tokens() {
    let h = Harness::new();

    for args in [&["auth", "list"][..], &["auth", "tokens", "list"][..]] {
        let result = h.invoke(args).await;
        assert_eq!(result.code, 0);
        assert!(result.stdout.is_empty());
        assert!(result.stderr.contains("No tokens stored"));
    }
}

#[tokio::test]
async fn test_add_then_tokens_list_shows_key() {
    let h = Harness::new();
    h.add("A@B.com").await;

    let result = h.invoke(&["auth", "tokens", "list"]).await;
    assert_eq!(result.code, 0);
    assert_eq!(result.stdout.trim(), "token:a@b.com");
}

#[tokio::test]
async fn test_add_output_never_contains_secret() {
    let h = Harness::new();
    let result = h
        .invoke(&[
            "auth",
            "add",
            "a@b.com",
            "--services",
            "gmail",
            "--refresh-token",
            "rt-secret",
            "--access-token",
            "at-secret",
            "--expiry",
            "2030-01-01T00:00:00Z",
        ])
        .await;

    assert_eq!(result.code, 0);
    assert!(result.stdout.contains("added"));
    assert!(!result.stdout.contains("rt-secret"));
    assert!(!result.stdout.contains("at-secret"));
}

#[tokio::test]
async fn test_add_unknown_service_is_usage_error() {
    let h = Harness::new();
    let result = h
        .invoke(&[
            "auth",
            "add",
            "a@b.com",
            "--services",
            "nope",
            "--refresh-token",
            "rt",
        ])
        .await;

    assert_eq!(result.code, 2);
    assert!(result.stderr.contains("nope"));
    assert!(h.store.keys().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_add_without_refresh_token_when_not_interactive() {
    let h = Harness::new();
    let result = h
        .invoke(&["auth", "add", "a@b.com", "--services", "gmail"])
        .await;

    assert_eq!(result.code, 2);
    assert!(result.stderr.contains("--refresh-token"));
}

#[tokio::test]
async fn test_list_json_shape() {
    let h = Harness::new();
    h.add("b@example.com").await;
    h.add("a@example.com").await;

    let result = h.invoke(&["--json", "auth", "list"]).await;
    assert_eq!(result.code, 0);

    let value: serde_json::Value = serde_json::from_str(&result.stdout).unwrap();
    let accounts = value["accounts"].as_array().unwrap();
    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0]["account"], "a@example.com");
    assert_eq!(accounts[0]["services"], serde_json::json!(["drive", "gmail"]));
}

#[tokio::test]
async fn test_tokens_list_json_empty() {
    let h = Harness::new();
    let result = h.invoke(&["auth", "tokens", "list", "--json"]).await;

    assert_eq!(result.code, 0);
    let value: serde_json::Value = serde_json::from_str(&result.stdout).unwrap();
    assert_eq!(value, serde_json::json!({ "keys": [] }));
}

#[tokio::test]
async fn test_delete_with_force() {
    let h = Harness::new();
    h.add("a@b.com").await;

    let result = h.invoke(&["auth", "tokens", "delete", "a@b.com", "--force"]).await;
    assert_eq!(result.code, 0);
    assert!(result.stdout.contains("a@b.com"));
    assert!(result.stdout.contains("deleted"));
    assert!(h.store.keys().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_remove_refuses_without_force_when_not_interactive() {
    let h = Harness::new();
    h.add("a@b.com").await;

    let result = h.invoke(&["auth", "remove", "a@b.com"]).await;
    assert_eq!(result.code, 2);
    assert!(result
        .stderr
        .contains("refusing to delete token for a@b.com without --force"));
    assert_eq!(h.store.keys().await.unwrap(), vec!["token:a@b.com"]);
}

#[tokio::test]
async fn test_remove_with_no_input_refuses_even_on_terminal() {
    let h = Harness::new();
    h.add("a@b.com").await;

    let result = h
        .invoke_with(&["--no-input", "auth", "remove", "a@b.com"], Box::new(Answer("y")))
        .await;
    assert_eq!(result.code, 2);
    assert_eq!(h.store.keys().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_remove_declined_is_cancelled() {
    let h = Harness::new();
    h.add("a@b.com").await;

    let result = h
        .invoke_with(&["auth", "remove", "a@b.com"], Box::new(Answer("n")))
        .await;
    assert_eq!(result.code, 3);
    assert!(result.stderr.contains("Cancelled"));
    assert_eq!(h.store.keys().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_remove_confirmed() {
    let h = Harness::new();
    h.add("a@b.com").await;

    let result = h
        .invoke_with(&["auth", "remove", "a@b.com"], Box::new(Answer("yes")))
        .await;
    assert_eq!(result.code, 0);
    assert!(h.store.keys().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_account_is_not_found() {
    let h = Harness::new();

    let show = h.invoke(&["auth", "tokens", "show", "ghost@b.com"]).await;
    assert_eq!(show.code, 4);
    assert!(show.stderr.contains("ghost@b.com"));

    let delete = h
        .invoke(&["auth", "tokens", "delete", "ghost@b.com", "--force"])
        .await;
    assert_eq!(delete.code, 4);
}

#[tokio::test]
async fn test_show_hides_secrets() {
    let h = Harness::new();
    h.add("a@b.com").await;

    let result = h.invoke(&["auth", "tokens", "show", "a@b.com"]).await;
    assert_eq!(result.code, 0);
    assert!(result.stdout.contains("a@b.com"));
    assert!(result.stdout.contains("drive, gmail"));
    assert!(!result.stdout.contains("rt-secret"));
}

#[tokio::test]
async fn test_export_delete_import_round_trip() {
    let h = Harness::new();
    h.add("a@b.com").await;
    let file = h.path("a.json");
    let file_arg = file.to_str().unwrap();

    let export = h
        .invoke(&["auth", "tokens", "export", "a@b.com", "--out", file_arg])
        .await;
    assert_eq!(export.code, 0);
    assert!(export.stdout.contains("exported"));
    assert!(export.stdout.contains(file_arg));
    assert!(file.exists());

    let delete = h.invoke(&["--force", "auth", "remove", "a@b.com"]).await;
    assert_eq!(delete.code, 0);

    let import = h.invoke(&["auth", "tokens", "import", file_arg]).await;
    assert_eq!(import.code, 0, "import failed: {}", import.stderr);
    assert!(import.stdout.contains("imported"));

    let token = h.store.get_token("a@b.com").await.unwrap();
    assert_eq!(token.refresh_token, "rt-secret");
}

#[tokio::test]
async fn test_export_over_existing_file_needs_confirmation() {
    let h = Harness::new();
    h.add("a@b.com").await;
    let file = h.path("a.json");
    std::fs::write(&file, "keep").unwrap();
    let file_arg = file.to_str().unwrap();

    let refused = h
        .invoke(&["auth", "tokens", "export", "a@b.com", "--out", file_arg])
        .await;
    assert_eq!(refused.code, 2);
    assert_eq!(std::fs::read_to_string(&file).unwrap(), "keep");

    let forced = h
        .invoke(&["auth", "tokens", "export", "a@b.com", "--out", file_arg, "--force"])
        .await;
    assert_eq!(forced.code, 0);
    assert_ne!(std::fs::read_to_string(&file).unwrap(), "keep");
}

#[tokio::test]
async fn test_export_json_outcome() {
    let h = Harness::new();
    h.add("a@b.com").await;
    let file = h.path("out/a.json");

    let result = h
        .invoke(&[
            "--json",
            "auth",
            "tokens",
            "export",
            "a@b.com",
            "--out",
            file.to_str().unwrap(),
        ])
        .await;
    assert_eq!(result.code, 0);

    let value: serde_json::Value = serde_json::from_str(&result.stdout).unwrap();
    assert_eq!(value["outcome"], "exported");
    assert_eq!(value["account"], "a@b.com");
    assert_eq!(value["path"], file.to_str().unwrap());
}

#[tokio::test]
async fn test_import_malformed_file_is_usage_error() {
    let h = Harness::new();
    let file = h.path("bad.json");
    std::fs::write(&file, r#"{"account":"a@b.com"}"#).unwrap();

    let result = h
        .invoke(&["auth", "tokens", "import", file.to_str().unwrap()])
        .await;
    assert_eq!(result.code, 2);
    assert!(h.store.keys().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_credentials_saved_to_config_dir() {
    let h = Harness::new();
    let source = h.path("client_secret.json");
    std::fs::write(
        &source,
        r#"{"installed":{"client_id":"id.apps","client_secret":"shh"}}"#,
    )
    .unwrap();

    let result = h
        .invoke(&["auth", "credentials", source.to_str().unwrap()])
        .await;
    assert_eq!(result.code, 0, "credentials failed: {}", result.stderr);
    assert!(result.stdout.contains("path"));

    let saved = h.path("config/credentials.json");
    assert!(result.stdout.contains(saved.to_str().unwrap()));
    assert!(!result.stdout.contains("shh"));
    assert!(saved.exists());
}

#[tokio::test]
async fn test_credentials_malformed_file() {
    let h = Harness::new();
    let source = h.path("client_secret.json");
    std::fs::write(&source, r#"{"other":{}}"#).unwrap();

    let result = h
        .invoke(&["auth", "credentials", source.to_str().unwrap()])
        .await;
    assert_eq!(result.code, 2);
    assert!(result.stderr.contains("Error:"));
    assert!(!h.path("config/credentials.json").exists());
}
