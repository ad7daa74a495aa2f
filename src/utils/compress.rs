use std::fs;
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{anyhow, bail, Context, Result};
use log::debug;
use zip::{write::FileOptions, ZipWriter};

use crate::constants::HASH_CHUNK_SIZE as CHUNK_SIZE;

/// Compression options for capture entries.
pub fn entry_options() -> FileOptions {
    FileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .unix_permissions(0o644)
}

/// Package capture files into a ZIP archive at `archive_path`.
///
/// Each file becomes an entry named by its base file name. Every input must
/// exist, otherwise nothing is written. An existing archive at the same path
/// is replaced. The archive is assembled next to its final path and renamed
/// into place, so a failed write leaves no archive behind.
///
/// # Example
///
/// ```no_run
/// # use std::path::Path;
/// # use android_log_collector::utils::compress::package_captures;
/// package_captures(
///     &[Path::new("/evidence/logcat.txt"), Path::new("/evidence/dumpsys.txt")],
///     Path::new("/evidence/case.zip"),
/// )?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn package_captures(files: &[&Path], archive_path: &Path) -> Result<PathBuf> {
    let start = Instant::now();

    for file in files {
        if !file.is_file() {
            bail!("Capture file missing, refusing to package: {}", file.display());
        }
    }

    let partial_path = partial_path(archive_path);
    let result = write_archive(files, &partial_path).and_then(|()| {
        fs::rename(&partial_path, archive_path)
            .with_context(|| format!("Failed to move archive into place at {}", archive_path.display()))
    });

    if let Err(e) = result {
        fs::remove_file(&partial_path).ok();
        return Err(e);
    }

    debug!("Packaged {} files into {} in {:?}", files.len(), archive_path.display(), start.elapsed());
    Ok(archive_path.to_path_buf())
}

fn partial_path(archive_path: &Path) -> PathBuf {
    let mut name = archive_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".partial");
    archive_path.with_file_name(name)
}

fn write_archive(files: &[&Path], path: &Path) -> Result<()> {
    let zip_file = fs::File::create(path)
        .with_context(|| format!("Failed to create zip file {}", path.display()))?;
    let mut zip = ZipWriter::new(zip_file);
    let mut buffer = vec![0u8; CHUNK_SIZE];

    for file in files {
        let entry_name = file
            .file_name()
            .ok_or_else(|| anyhow!("Capture path has no file name: {}", file.display()))?
            .to_string_lossy()
            .to_string();

        let source = fs::File::open(file)
            .with_context(|| format!("Failed to open {}", file.display()))?;
        let mut reader = BufReader::new(source);

        zip.start_file(entry_name.clone(), entry_options())
            .with_context(|| format!("Failed to start file entry for {}", entry_name))?;

        loop {
            let bytes_read = reader
                .read(&mut buffer)
                .with_context(|| format!("Failed to read from {}", file.display()))?;
            if bytes_read == 0 {
                break;
            }
            zip.write_all(&buffer[..bytes_read])
                .with_context(|| format!("Failed to write to zip for {}", entry_name))?;
        }
    }

    let mut inner = zip.finish().context("Failed to finalize zip file")?;
    inner.flush().context("Failed to flush zip file")?;
    Ok(())
}
