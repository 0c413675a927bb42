use jpackstage_api::{Result, StageError};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes `<stem>.sha256` next to `file` holding its hex SHA-256 digest.
pub fn publish_sha256(file: &Path) -> Result<PathBuf> {
    let digest = sha256_hex(file).map_err(|source| StageError::Publish {
        path: file.to_path_buf(),
        source,
    })?;

    let out = checksum_path(file);
    std::fs::write(&out, format!("{}\n", digest)).map_err(|source| StageError::Publish {
        path: out.clone(),
        source,
    })?;

    info!("sha256 of {} written to {}", file.display(), out.display());
    Ok(out)
}

pub fn sha256_hex(file: &Path) -> io::Result<String> {
    let mut input = File::open(file)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];
    loop {
        let n = input.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }
    Ok(format!("{:x}", hasher.finalize()))
}

/// `app-1.0.zip` -> `app-1.0.sha256`; names without an extension keep their name.
fn checksum_path(file: &Path) -> PathBuf {
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let stem = match name.rfind('.') {
        Some(i) if i > 0 => &name[..i],
        _ => name.as_str(),
    };
    file.with_file_name(format!("{}.sha256", stem))
}
