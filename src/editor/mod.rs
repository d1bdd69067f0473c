//! Tour editing session

mod session;

pub use session::{EditorError, EditorMode, EditorOptions, EditorSession};
