use std::{fs::remove_dir_all, io, path::Path};

/// The filesystem operations a cleaning run needs.
pub trait FileSystem {
    fn folder_exists(&self, path: &Path) -> bool;

    /// Deletes the folder and everything inside it.
    fn delete_folder(&self, path: &Path) -> io::Result<()>;
}

impl<F: FileSystem + ?Sized> FileSystem for &F {
    fn folder_exists(&self, path: &Path) -> bool {
        (**self).folder_exists(path)
    }

    fn delete_folder(&self, path: &Path) -> io::Result<()> {
        (**self).delete_folder(path)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn folder_exists(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn delete_folder(&self, path: &Path) -> io::Result<()> {
        remove_dir_all(path)
    }
}
