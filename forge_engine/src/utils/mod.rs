//! Engine utilities

mod text_file;

pub use text_file::{TextFileReader, FileSystemReader, read_text_file};
