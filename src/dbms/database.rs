use std::collections::HashMap;
use std::io;
use std::path::Path;
use std::rc::Rc;

use crate::config::DEFAULT_POOL_SIZE;
use crate::errors::Result;
use crate::storage::disk::disk_manager::{FileHandle, PagedFile};
use crate::storage::BufferPool;

/// A buffer pool plus a registry of the files it serves, keyed by
/// canonical path. Opening the same path twice hands back the cached
/// handle, so every caller shares one allocation state per file.
pub struct Database {
    buffer_pool: BufferPool,
    open_files: HashMap<Rc<str>, FileHandle>,
}

impl Database {
    pub fn new() -> Self {
        Database::with_pool_size(DEFAULT_POOL_SIZE)
    }

    pub fn with_pool_size(pool_size: usize) -> Self {
        Database {
            buffer_pool: BufferPool::new(pool_size),
            open_files: HashMap::new(),
        }
    }

    /// Opens (or creates) the paged file at the given path, reusing the
    /// registered handle if the path is already open.
    pub fn open_file<P: AsRef<Path>>(&mut self, path: P) -> io::Result<FileHandle> {
        let handle = PagedFile::open(path)?;
        let name = handle.borrow().filename();
        Ok(Rc::clone(self.open_files.entry(name).or_insert(handle)))
    }

    /// Flushes the file's pages through the pool and drops it from the
    /// registry. Fails if any of its pages is still pinned.
    pub fn close_file(&mut self, file: &FileHandle) -> Result<()> {
        self.buffer_pool.flush_file(file)?;
        let name = file.borrow().filename();
        self.open_files.remove(&name);
        Ok(())
    }

    pub fn pool(&self) -> &BufferPool {
        &self.buffer_pool
    }

    pub fn pool_mut(&mut self) -> &mut BufferPool {
        &mut self.buffer_pool
    }
}

impl Default for Database {
    fn default() -> Self {
        Database::new()
    }
}
