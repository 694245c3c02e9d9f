// ABOUTME: Private file writing shared by credential save and token export
// ABOUTME: Writes through a sibling temp file and renames so readers never see a partial file

use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

use crate::error::{AuthError, AuthResult};

/// Write `contents` to `path` with owner-only permissions, replacing any
/// existing file in one rename
pub async fn write_private(path: &Path, contents: &[u8]) -> AuthResult<()> {
    let file_name = path
        .file_name()
        .ok_or_else(|| AuthError::Validation(format!("{} is not a file path", path.display())))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await?;
    }

    let mut temp_name = std::ffi::OsString::from(".");
    temp_name.push(file_name);
    temp_name.push(".tmp");
    let temp_path: PathBuf = path.with_file_name(temp_name);

    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(0o600);

    let result = async {
        let mut file = options.open(&temp_path).await?;
        file.write_all(contents).await?;
        file.sync_all().await?;
        drop(file);
        fs::rename(&temp_path, path).await
    }
    .await;

    if let Err(e) = result {
        let _ = fs::remove_file(&temp_path).await;
        return Err(e.into());
    }
    Ok(())
}
