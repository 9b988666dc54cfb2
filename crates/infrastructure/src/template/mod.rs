//! Template stores and the template engine adapter

mod builtin;
mod file_store;
mod minijinja_renderer;

pub use builtin::BuiltinTemplateStore;
pub use file_store::FileTemplateStore;
pub use minijinja_renderer::MiniJinjaRenderer;
