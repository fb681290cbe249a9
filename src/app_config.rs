use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ApplicationConfig {
    pub log_level: Option<String>, // CLI --debug takes precedence
    pub split_file_count_limit: usize, // soft limit per sNN subdirectory
    pub use_shell: bool, // default for the `run` subcommand
    pub annotate_filename_column: String, // column holding test case file names
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        ApplicationConfig {
            log_level: Some("info".to_string()),
            split_file_count_limit: 1000,
            use_shell: false,
            annotate_filename_column: "filename".to_string(),
        }
    }
}
