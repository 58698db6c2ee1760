use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::GeneratedFile;

/// Write a generated file under `base`, replacing any previous content.
///
/// New files are created with mode `0644` on Unix. Errors are returned as-is:
/// there is no retry, no backup and no cleanup of a partially written file.
pub fn write_file(base: &Path, file: &GeneratedFile) -> io::Result<PathBuf> {
    fs::create_dir_all(base)?;
    let path = base.join(&file.path);

    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o644);
    }

    let mut handle = options.open(&path)?;
    handle.write_all(file.content.as_bytes())?;
    log::info!("wrote {} ({} bytes)", path.display(), file.content.len());
    Ok(path)
}
