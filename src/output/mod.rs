pub mod events;
pub mod renderer;
pub mod sink;

pub use events::RunEvent;
pub use renderer::render_event;
pub use sink::{EventSink, TerminalSink};
