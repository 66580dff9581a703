//! Configuration module
//!
//! Settings are read from the environment (and an optional `.env` file). Every value
//! has a default so the service starts with no configuration at all.

use std::env;
use std::path::PathBuf;

use crate::constants::{
    BYTES_PER_MB, DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_MAX_FILES_PER_UPLOAD,
    DEFAULT_MAX_FILE_SIZE_MB, DEFAULT_PROCESSED_DIR, DEFAULT_SERVER_PORT, DEFAULT_UPLOAD_DIR,
};

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub cors_origins: Vec<String>,
    pub environment: String,
    pub upload_dir: PathBuf,
    pub processed_dir: PathBuf,
    pub max_file_size_bytes: usize,
    pub max_files_per_upload: usize,
    pub allowed_extensions: Vec<String>,
    /// Cascade model for face detection; face ROI requests fail when unset.
    pub face_model_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: DEFAULT_SERVER_PORT,
            cors_origins: vec!["*".to_string()],
            environment: "development".to_string(),
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
            processed_dir: PathBuf::from(DEFAULT_PROCESSED_DIR),
            max_file_size_bytes: DEFAULT_MAX_FILE_SIZE_MB * BYTES_PER_MB,
            max_files_per_upload: DEFAULT_MAX_FILES_PER_UPLOAD,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            face_model_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins: Vec<String> = env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let server_port = env::var("SERVER_PORT")
            .or_else(|_| env::var("PORT"))
            .unwrap_or_else(|_| DEFAULT_SERVER_PORT.to_string())
            .parse()
            .map_err(|_| anyhow::anyhow!("SERVER_PORT must be a valid number"))?;

        let max_file_size_mb = env::var("MAX_FILE_SIZE_MB")
            .unwrap_or_else(|_| DEFAULT_MAX_FILE_SIZE_MB.to_string())
            .parse::<usize>()
            .unwrap_or(DEFAULT_MAX_FILE_SIZE_MB);

        let max_files_per_upload = env::var("MAX_FILES_PER_UPLOAD")
            .unwrap_or_else(|_| DEFAULT_MAX_FILES_PER_UPLOAD.to_string())
            .parse::<usize>()
            .unwrap_or(DEFAULT_MAX_FILES_PER_UPLOAD);

        let allowed_extensions = env::var("ALLOWED_EXTENSIONS")
            .unwrap_or_else(|_| DEFAULT_ALLOWED_EXTENSIONS.join(","))
            .split(',')
            .map(|s| s.trim().trim_start_matches('.').to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let config = Config {
            server_port,
            cors_origins,
            environment,
            upload_dir: env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| DEFAULT_UPLOAD_DIR.to_string())
                .into(),
            processed_dir: env::var("PROCESSED_DIR")
                .unwrap_or_else(|_| DEFAULT_PROCESSED_DIR.to_string())
                .into(),
            max_file_size_bytes: max_file_size_mb * BYTES_PER_MB,
            max_files_per_upload,
            allowed_extensions,
            face_model_path: env::var("FACE_MODEL_PATH").ok().map(PathBuf::from),
        };

        config.validate()?;
        Ok(config)
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.allowed_extensions.is_empty() {
            return Err(anyhow::anyhow!(
                "ALLOWED_EXTENSIONS must list at least one extension"
            ));
        }

        if self.max_file_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_FILE_SIZE_MB must be greater than 0"));
        }

        if self.max_files_per_upload == 0 {
            return Err(anyhow::anyhow!(
                "MAX_FILES_PER_UPLOAD must be greater than 0"
            ));
        }

        if self.upload_dir == self.processed_dir {
            return Err(anyhow::anyhow!(
                "UPLOAD_DIR and PROCESSED_DIR must be different directories"
            ));
        }

        if self.is_production() && self.cors_origins.iter().any(|o| o == "*") {
            return Err(anyhow::anyhow!(
                "CORS_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }

        Ok(())
    }
}
