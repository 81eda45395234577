use tokio::sync::mpsc;

use super::events::RunEvent;
use super::renderer::render_event;

/// Receives run events as they happen.
pub trait EventSink: Send + Sync {
    fn handle(&self, event: &RunEvent);
}

/// Prints each event before the orchestrator moves on, so progress lines
/// stay in order with the inherited output of the child processes.
pub struct TerminalSink;

impl EventSink for TerminalSink {
    fn handle(&self, event: &RunEvent) {
        println!("{}", render_event(event));
    }
}

/// Forwards events to an async consumer such as the run log writer.
impl EventSink for mpsc::UnboundedSender<RunEvent> {
    fn handle(&self, event: &RunEvent) {
        let _ = self.send(event.clone());
    }
}
