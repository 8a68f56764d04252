use std::env;
use std::path::PathBuf;

#[derive(Clone, Debug)]
pub struct UploadConfig {
    /// Directory holding uploaded profile images, served at `/uploads`.
    pub dir: PathBuf,
    pub max_bytes: usize,
}

impl UploadConfig {
    pub fn from_env() -> Self {
        Self {
            dir: env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./uploads")),
            max_bytes: env::var("UPLOAD_MAX_BYTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5 * 1024 * 1024),
        }
    }
}
