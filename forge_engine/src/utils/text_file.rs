/// Text file reading
///
/// Readers report failure with an empty string, so an unreadable file and an
/// empty file look the same to callers. Resources that need text treat both as
/// "could not read".

use std::path::Path;

/// Capability to read a whole text file
pub trait TextFileReader {
    /// Read `path` into a string, returning an empty string on failure
    fn read(&self, path: &Path) -> String;
}

/// Reads files from the local file system
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSystemReader;

impl TextFileReader for FileSystemReader {
    fn read(&self, path: &Path) -> String {
        read_text_file(path)
    }
}

/// Read a text file, returning an empty string if it cannot be read
pub fn read_text_file(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            crate::engine_debug!("forge::utils", "Failed to read \"{}\": {}", path.display(), e);
            String::new()
        }
    }
}

#[cfg(test)]
#[path = "text_file_tests.rs"]
mod tests;
