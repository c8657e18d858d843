//! File locking utilities for the JSON record files
//!
//! Provides locked read/write operations using `fs2` advisory locks so that
//! two `dealboard` invocations never interleave a read-modify-write of the
//! same record file.
//!
//! Advisory locks are cooperative - all participants must use these functions
//! for the locking to be effective.

use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

/// Read file contents with a shared (read) lock.
///
/// Acquires a shared lock before reading, allowing multiple concurrent readers
/// but blocking while an exclusive (write) lock is held.
pub fn locked_read(path: &Path) -> io::Result<String> {
    let file = File::open(path)?;
    file.lock_shared()?;
    let mut content = String::new();
    BufReader::new(&file).read_to_string(&mut content)?;
    Ok(content)
}

/// Write file contents with an exclusive (write) lock.
///
/// The sequence is: open → lock → truncate → write → flush. Truncating after
/// the lock is held keeps readers from observing an empty file.
pub fn locked_write(path: &Path, content: &str) -> io::Result<()> {
    #[allow(clippy::suspicious_open_options)]
    let file = OpenOptions::new().write(true).create(true).open(path)?;
    file.lock_exclusive()?;
    file.set_len(0)?;
    let mut writer = BufWriter::new(&file);
    writer.write_all(content.as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Read-modify-write a file under a single exclusive lock.
///
/// `apply` receives the current contents (empty if the file is new) and
/// returns the replacement contents plus a value handed back to the caller.
/// If `apply` fails the file is left untouched.
pub fn locked_update<T, E, F>(path: &Path, apply: F) -> Result<T, E>
where
    E: From<io::Error>,
    F: FnOnce(&str) -> Result<(String, T), E>,
{
    #[allow(clippy::suspicious_open_options)]
    let mut file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .open(path)?;
    file.lock_exclusive()?;

    let mut current = String::new();
    file.read_to_string(&mut current)?;

    let (replacement, value) = apply(&current)?;

    file.set_len(0)?;
    file.seek(SeekFrom::Start(0))?;
    let mut writer = BufWriter::new(&file);
    writer.write_all(replacement.as_bytes())?;
    writer.flush()?;
    Ok(value)
}
