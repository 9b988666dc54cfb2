//! File system persistence adapters

mod file_system;
mod snippet_writer;

pub use file_system::TokioFileSystem;
pub use snippet_writer::FileSnippetWriter;
