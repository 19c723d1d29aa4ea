//! Shared helpers for integration tests.

#![allow(dead_code)]

use filecache::error::{CacheError, CacheResult};
use filecache::source::FileSource;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// In-memory file store that counts every collaborator call.
///
/// Clones share state, so a test keeps one handle while the cache owns another.
#[derive(Clone, Default)]
pub struct FakeSource {
    files: Rc<RefCell<HashMap<PathBuf, (u64, Vec<u8>)>>>,
    fingerprint_calls: Rc<Cell<usize>>,
    read_calls: Rc<Cell<usize>>,
    fail_reads: Rc<Cell<bool>>,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or overwrite a file with an explicit fingerprint.
    pub fn put(&self, path: &str, fingerprint: u64, contents: &[u8]) {
        self.files
            .borrow_mut()
            .insert(PathBuf::from(path), (fingerprint, contents.to_vec()));
    }

    pub fn remove(&self, path: &str) {
        self.files.borrow_mut().remove(Path::new(path));
    }

    /// Make `read_contents` fail with a permission error while fingerprints still work.
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    pub fn fingerprint_calls(&self) -> usize {
        self.fingerprint_calls.get()
    }

    pub fn read_calls(&self) -> usize {
        self.read_calls.get()
    }

    pub fn calls(&self) -> (usize, usize) {
        (self.fingerprint_calls(), self.read_calls())
    }
}

impl FileSource for FakeSource {
    type Fingerprint = u64;

    fn fingerprint(&self, path: &Path) -> CacheResult<u64> {
        self.fingerprint_calls.set(self.fingerprint_calls.get() + 1);
        self.files
            .borrow()
            .get(path)
            .map(|(fp, _)| *fp)
            .ok_or_else(|| CacheError::NotFound(path.to_path_buf()))
    }

    fn read_contents(&self, path: &Path) -> CacheResult<Vec<u8>> {
        self.read_calls.set(self.read_calls.get() + 1);
        if self.fail_reads.get() {
            return Err(CacheError::PermissionDenied(path.to_path_buf()));
        }
        self.files
            .borrow()
            .get(path)
            .map(|(_, contents)| contents.clone())
            .ok_or_else(|| CacheError::NotFound(path.to_path_buf()))
    }
}
