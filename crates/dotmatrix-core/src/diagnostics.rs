use std::sync::OnceLock;

/// Notable core events, reported to whichever frontend is listening.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CoreEvent<'a> {
    /// A ROM image was copied onto the bus.
    RomLoaded { title: &'a str, size: usize },
    /// The dispatcher fetched an opcode with no encoding. Execution
    /// continues; the opcode is also latched in `Cpu::last_illegal_opcode`.
    IllegalOpcode { opcode: u8, pc: u16 },
}

pub trait EventSink: Send + Sync + 'static {
    fn on_event(&self, event: CoreEvent<'_>);
}

static EVENT_SINK: OnceLock<Box<dyn EventSink>> = OnceLock::new();

pub fn try_set_event_sink(sink: Box<dyn EventSink>) -> Result<(), Box<dyn EventSink>> {
    EVENT_SINK.set(sink)
}

pub(crate) fn notify(event: CoreEvent<'_>) {
    if let Some(sink) = EVENT_SINK.get() {
        sink.on_event(event);
    }
}
