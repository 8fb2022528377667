//! Atomic whole-file replacement inside a capability-scoped directory.
//!
//! Writes land in a hidden sibling temp file that is synced and renamed over
//! the target, so readers only ever observe the previous or the next document.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use cap_std::fs::{Dir, OpenOptions};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Replace `file_name` in `dir` with `contents`.
///
/// `file_name` must be a bare file name; nested paths are rejected with
/// [`io::ErrorKind::InvalidInput`].
pub(crate) fn write_atomic(dir: &Dir, file_name: &str, contents: &[u8]) -> io::Result<()> {
    if file_name.is_empty() || file_name.contains(['/', '\\']) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{file_name:?} is not a bare file name"),
        ));
    }

    let tmp_name = temp_name_for(file_name);
    if let Err(err) = write_temp(dir, &tmp_name, contents) {
        discard(dir, &tmp_name);
        return Err(err);
    }
    if let Err(err) = replace(dir, &tmp_name, file_name) {
        discard(dir, &tmp_name);
        return Err(err);
    }
    sync_dir(dir);
    Ok(())
}

fn temp_name_for(file_name: &str) -> String {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |elapsed| elapsed.as_nanos());
    format!(".{file_name}.tmp.{}.{nanos}.{counter}", std::process::id())
}

fn write_temp(dir: &Dir, tmp_name: &str, contents: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(tmp_name, &options)?;
    file.write_all(contents)?;
    file.sync_all()
}

#[cfg(windows)]
fn replace(dir: &Dir, tmp_name: &str, file_name: &str) -> io::Result<()> {
    // Windows rename refuses to overwrite.
    match dir.remove_file(file_name) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, file_name)
}

#[cfg(not(windows))]
fn replace(dir: &Dir, tmp_name: &str, file_name: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, file_name)
}

fn discard(dir: &Dir, tmp_name: &str) {
    drop(dir.remove_file(tmp_name));
}

fn sync_dir(dir: &Dir) {
    // Best effort; some filesystems refuse directory fsync.
    drop(dir.open(".").and_then(|handle| handle.sync_all()));
}

#[cfg(test)]
mod tests {
    use super::*;
    use cap_std::ambient_authority;
    use rstest::rstest;

    fn open_temp_dir() -> (tempfile::TempDir, Dir) {
        let tmp = tempfile::tempdir().expect("tempdir");
        let dir = Dir::open_ambient_dir(tmp.path(), ambient_authority()).expect("open dir");
        (tmp, dir)
    }

    #[rstest]
    fn replaces_existing_contents_without_leftovers() {
        let (_tmp, dir) = open_temp_dir();
        write_atomic(&dir, "doc.json", b"{\"v\":1}").expect("first write");
        write_atomic(&dir, "doc.json", b"{\"v\":2}").expect("second write");

        assert_eq!(dir.read_to_string("doc.json").expect("read"), "{\"v\":2}");
        let entries: Vec<_> = dir
            .entries()
            .expect("entries")
            .filter_map(Result::ok)
            .map(|entry| entry.file_name())
            .collect();
        assert_eq!(entries.len(), 1, "temp files must not linger: {entries:?}");
    }

    #[rstest]
    #[case("nested/doc.json")]
    #[case("")]
    fn rejects_non_bare_names(#[case] name: &str) {
        let (_tmp, dir) = open_temp_dir();
        let err = write_atomic(&dir, name, b"{}").expect_err("must reject");
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
