//! Frame driver: session state, input, events and the per-tick pipeline

pub mod control;
pub mod events;
pub mod input;
pub mod session;
pub mod tick;

pub use events::{AudioSink, GameEvent, GameOutcome};
pub use input::{FrameInput, InputSource, SlotInput};
pub use session::GameSession;
pub use tick::{run_frame, run_tick};
