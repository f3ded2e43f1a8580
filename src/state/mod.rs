pub mod context;
pub mod persistence;

pub use context::EditorContext;
pub use persistence::{EditorConfig, PersistenceError, PersistenceResult};
