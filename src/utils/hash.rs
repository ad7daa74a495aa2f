use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::Path;

use anyhow::{Context, Result};
use md5::Md5;
use sha2::{Digest, Sha256};

use crate::constants::HASH_CHUNK_SIZE;

/// Digests of one file, lowercase hex.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDigests {
    pub md5: String,
    pub sha256: String,
}

/// Hash a reader in fixed-size chunks with MD5 and SHA-256 in one pass.
pub fn digest_reader<R: Read>(mut reader: R) -> std::io::Result<FileDigests> {
    let mut md5 = Md5::new();
    let mut sha256 = Sha256::new();
    let mut buffer = [0; HASH_CHUNK_SIZE];

    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        md5.update(&buffer[..bytes_read]);
        sha256.update(&buffer[..bytes_read]);
    }

    Ok(FileDigests {
        md5: format!("{:x}", md5.finalize()),
        sha256: format!("{:x}", sha256.finalize()),
    })
}

/// Hash a file on disk.
pub fn digest_file(path: &Path) -> Result<FileDigests> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} for hashing", path.display()))?;
    digest_reader(BufReader::new(file))
        .with_context(|| format!("Failed to read {} for hashing", path.display()))
}

/// Hash the archive and write its MD5 to the sidecar file.
///
/// The sidecar holds the bare hex digest, no newline.
pub fn write_md5_sidecar(archive: &Path, sidecar: &Path) -> Result<FileDigests> {
    let digests = digest_file(archive)?;
    fs::write(sidecar, &digests.md5)
        .with_context(|| format!("Failed to write digest to {}", sidecar.display()))?;
    Ok(digests)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tempfile::TempDir;

    #[test]
    fn test_known_digests() {
        let empty = digest_reader(&b""[..]).unwrap();
        assert_eq!(empty.md5, "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(
            empty.sha256,
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );

        let abc = digest_reader(&b"abc"[..]).unwrap();
        assert_eq!(abc.md5, "900150983cd24fb0d6963f7d28e17f72");
        assert_eq!(
            abc.sha256,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_multi_chunk_matches_single_shot() {
        let data: Vec<u8> = (0..HASH_CHUNK_SIZE * 3 + 17).map(|i| (i % 251) as u8).collect();
        let streamed = digest_reader(&data[..]).unwrap();
        assert_eq!(streamed.md5, format!("{:x}", Md5::digest(&data)));
        assert_eq!(streamed.sha256, format!("{:x}", Sha256::digest(&data)));
    }

    #[test]
    fn test_sidecar_contents() {
        let temp_dir = TempDir::new().unwrap();
        let archive = temp_dir.path().join("case.zip");
        let sidecar = temp_dir.path().join("case.md5");
        fs::write(&archive, b"abc").unwrap();

        let digests = write_md5_sidecar(&archive, &sidecar).unwrap();
        assert_eq!(fs::read_to_string(&sidecar).unwrap(), "900150983cd24fb0d6963f7d28e17f72");
        assert_eq!(digests.md5, "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn test_missing_archive() {
        let temp_dir = TempDir::new().unwrap();
        let result = write_md5_sidecar(
            &temp_dir.path().join("missing.zip"),
            &temp_dir.path().join("missing.md5"),
        );
        assert!(result.is_err());
        assert!(!temp_dir.path().join("missing.md5").exists());
    }

    proptest! {
        #[test]
        fn prop_digest_is_deterministic_hex(data in proptest::collection::vec(any::<u8>(), 0..20_000)) {
            let first = digest_reader(&data[..]).unwrap();
            let second = digest_reader(&data[..]).unwrap();
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.md5.len(), 32);
            prop_assert!(first.md5.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        }
    }
}
