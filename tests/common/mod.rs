use std::path::PathBuf;
use std::process::{Command, Output};
use std::fs;
use tempfile::TempDir;

pub struct TestContext {
    pub temp_dir: TempDir,
    pub db_path: PathBuf,
    pub config_path: PathBuf,
    pub audit_dir: PathBuf,
}

impl TestContext {
    pub fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");

        // Everything the binary touches lives under temp_dir
        let db_path = temp_dir.path().join("data/names.db");
        let config_path = temp_dir.path().join("config/config.json");
        let audit_dir = temp_dir.path().join("audit");

        fs::create_dir_all(config_path.parent().unwrap()).expect("Failed to create config dir");
        let config = serde_json::json!({
            "db_path": db_path,
            "audit_dir": audit_dir,
            "log_level": "WARN",
            "audit_enabled": true,
        });
        fs::write(&config_path, config.to_string()).expect("Failed to write config");

        TestContext {
            temp_dir,
            db_path,
            config_path,
            audit_dir,
        }
    }

    /// Run the petalbook binary against this context's config
    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_petalbook"))
            .arg("--config")
            .arg(&self.config_path)
            .args(args)
            .env_remove("RUST_LOG")
            .output()
            .expect("Failed to run petalbook")
    }

    /// Replace the config file contents
    pub fn write_config(&self, content: &str) {
        fs::write(&self.config_path, content).expect("Failed to write config");
    }

    pub fn audit_log(&self) -> String {
        fs::read_to_string(self.audit_dir.join("audit.log")).unwrap_or_default()
    }
}
