pub mod clock;
pub mod spring;
pub mod transition;

// Re-export commonly used types for convenience
pub use clock::FrameClock;
pub use spring::{Spring, SpringConfig};
pub use transition::{Transition, TransitionKind};
