//! Packaging and integrity utilities for collected captures.
//!
//! ## Components
//!
//! - **Compression**: ZIP archive of the capture files
//! - **Hashing**: MD5 sidecar for chain of custody, SHA-256 for the session log
//!
//! ## Example
//!
//! ```no_run
//! use android_log_collector::utils::{compress::package_captures, hash::write_md5_sidecar};
//! use std::path::Path;
//!
//! # fn example() -> anyhow::Result<()> {
//! let captures = [Path::new("/evidence/logcat.txt"), Path::new("/evidence/dumpsys.txt")];
//! let archive = package_captures(&captures, Path::new("/evidence/case.zip"))?;
//! let digests = write_md5_sidecar(&archive, Path::new("/evidence/case.md5"))?;
//! println!("MD5: {}", digests.md5);
//! # Ok(())
//! # }
//! ```

/// ZIP archive creation
pub mod compress;

/// MD5 and SHA-256 file digests
pub mod hash;
