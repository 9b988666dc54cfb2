//! RestDocs Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer: the `minijinja` template engine, the
//! built-in and directory-backed template stores, the snippet file writer,
//! and configuration loading.

pub mod config;
pub mod persistence;
pub mod template;

pub use config::{ConfigLoadError, config_from_env, config_from_vars, load_config_file};
pub use persistence::{FileSnippetWriter, TokioFileSystem};
pub use template::{BuiltinTemplateStore, FileTemplateStore, MiniJinjaRenderer};
