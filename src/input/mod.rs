pub mod events;
pub mod handler;

// Re-export the essential types
pub use events::{EventKind, InputEvent, MapEvent};
pub use handler::{Action, EventCallback, EventManager, InputHandler, ListenerId};
