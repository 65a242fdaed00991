use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test harness for running CLI commands with temporary databases
pub struct CliTestHarness {
    temp_dir: TempDir,
    db_path: PathBuf,
}

impl CliTestHarness {
    /// Create a new test harness with a temporary database
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");

        Self { temp_dir, db_path }
    }

    /// Get a Command instance configured for testing
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("blockday").expect("Failed to find blockday binary");

        // Run inside the temp dir so no stray config.toml is picked up
        cmd.current_dir(self.temp_dir.path());
        cmd.env("BLOCKDAY_DATABASE_PATH", &self.db_path);
        cmd.env_remove("BLOCKDAY_LOG");

        cmd
    }

    pub fn temp_path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Helper to run a command and assert success
    pub fn run_success(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().success()
    }

    /// Helper to run a command and assert failure
    pub fn run_failure(&self, args: &[&str]) -> assert_cmd::assert::Assert {
        self.command().args(args).assert().failure()
    }

    /// Runs `export` and returns the stored blocks as JSON values
    pub fn exported_blocks(&self) -> Vec<serde_json::Value> {
        let output = self.run_success(&["export"]).get_output().stdout.clone();
        serde_json::from_slice(&output).expect("export should print a JSON array")
    }

    /// Id of the only block whose title matches
    pub fn block_id(&self, title: &str) -> String {
        let blocks = self.exported_blocks();
        let matching: Vec<_> = blocks.iter().filter(|b| b["title"] == title).collect();
        assert_eq!(matching.len(), 1, "expected exactly one block titled '{}'", title);
        matching[0]["id"].as_str().expect("block id").to_string()
    }
}

/// Common test fixtures
pub struct TestFixtures;

impl TestFixtures {
    /// A one-off block on a Monday morning
    pub fn sample_block_args() -> Vec<&'static str> {
        vec![
            "add", "Deep Work",
            "--date", "2024-06-03",
            "--start", "09:00",
            "--end", "10:30",
            "--priority", "high",
        ]
    }

    /// A block repeating every Monday
    pub fn sample_weekly_block_args() -> Vec<&'static str> {
        vec![
            "add", "Team Sync",
            "--date", "2024-06-03",
            "--start", "11:00",
            "--end", "11:30",
            "--category", "meeting",
            "--every", "weekly",
            "--on", "mon",
        ]
    }
}

/// Utility functions for test assertions
pub mod assertions {
    use predicates::prelude::*;

    /// Predicate to check if output contains block table headers
    pub fn has_block_table_headers() -> impl Predicate<str> {
        predicate::str::contains("ID")
            .and(predicate::str::contains("Title"))
            .and(predicate::str::contains("Category"))
    }

    /// Predicate to check if output indicates successful block creation
    pub fn block_created_successfully() -> impl Predicate<str> {
        predicate::str::contains("✓").and(predicate::str::contains("Created block"))
    }

    /// Predicate to check if output contains an error message
    pub fn has_error() -> impl Predicate<str> {
        predicate::str::contains("Error").or(predicate::str::contains("error"))
    }
}
