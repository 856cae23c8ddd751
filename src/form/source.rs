//! File sources accepted by the form builder.

use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// An open file that remembers the path it was opened with.
#[derive(Debug)]
pub struct NamedFile {
    path: PathBuf,
    file: File,
}

impl NamedFile {
    /// Opens the file at `path` for reading.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        Ok(Self {
            path: path.to_path_buf(),
            file: File::open(path)?,
        })
    }

    /// Wraps an already open file under the given path.
    pub fn new(path: impl Into<PathBuf>, file: File) -> Self {
        Self {
            path: path.into(),
            file,
        }
    }

    /// The name used as the part's filename: the path exactly as it was given.
    pub fn name(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }

    /// The path the file was opened with.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Unwraps the underlying file.
    pub fn into_file(self) -> File {
        self.file
    }
}

impl Read for NamedFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

/// A received upload: a filename plus a way to open its content.
///
/// Readers returned by [`UploadedFile::open`] are released when dropped.
pub trait UploadedFile {
    /// The filename carried by the upload's metadata.
    fn filename(&self) -> &str;

    /// Opens a fresh reader over the upload's content.
    fn open(&self) -> io::Result<Box<dyn Read + '_>>;
}

#[derive(Debug, Clone)]
enum Content {
    Memory(Arc<[u8]>),
    Disk(PathBuf),
}

/// Metadata and content accessor for one uploaded file.
#[derive(Debug, Clone)]
pub struct FileHeader {
    filename: String,
    size: u64,
    content: Content,
}

impl FileHeader {
    /// An upload held in memory.
    pub fn from_bytes(filename: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        let data: Vec<u8> = data.into();
        Self {
            filename: filename.into(),
            size: data.len() as u64,
            content: Content::Memory(data.into()),
        }
    }

    /// An upload backed by a file on disk, opened lazily each time it is read.
    ///
    /// The filename is the last component of `path`.
    pub fn from_path(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        let size = std::fs::metadata(path)?.len();
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            filename,
            size,
            content: Content::Disk(path.to_path_buf()),
        })
    }

    /// Size of the content in bytes, as recorded when the header was created.
    pub fn size(&self) -> u64 {
        self.size
    }
}

impl UploadedFile for FileHeader {
    fn filename(&self) -> &str {
        &self.filename
    }

    fn open(&self) -> io::Result<Box<dyn Read + '_>> {
        match &self.content {
            Content::Memory(data) => Ok(Box::new(&data[..])),
            Content::Disk(path) => Ok(Box::new(File::open(path)?)),
        }
    }
}
