//! Event listeners and the capturing `EventLog`.

use std::cell::{Ref, RefCell};
use std::io::Write;
use std::rc::Rc;

use csv::Writer;

use crate::{Event, SimResult};

/// Receives every [`Event`] synchronously, in the order it happens.
///
/// Listeners run on the engine's thread inside the tick that produced the
/// event; a slow listener stalls the tick.
///
/// Any `FnMut(&Event)` closure is a listener.
pub trait EventListener {
    fn on_event(&mut self, event: &Event);
}

impl<F: FnMut(&Event)> EventListener for F {
    fn on_event(&mut self, event: &Event) {
        self(event)
    }
}

/// Records every event it sees.
///
/// Clones share the same buffer, so a test can keep one handle and attach
/// the other to the simulation.
#[derive(Clone, Default, Debug)]
pub struct EventLog {
    events: Rc<RefCell<Vec<Event>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Borrow the captured events.
    pub fn events(&self) -> Ref<'_, Vec<Event>> {
        self.events.borrow()
    }

    /// Copy the captured events out.
    pub fn snapshot(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }

    /// Write the log as CSV with columns `tick,kind,elevator,floor,points`.
    ///
    /// Fields that do not apply to an event are left empty.
    pub fn write_csv<W: Write>(&self, out: W) -> SimResult<()> {
        write_events_csv(&self.events.borrow(), out)
    }
}

impl EventListener for EventLog {
    fn on_event(&mut self, event: &Event) {
        self.events.borrow_mut().push(*event);
    }
}

/// Write `events` as CSV to `out`.
pub fn write_events_csv<W: Write>(events: &[Event], out: W) -> SimResult<()> {
    fn cell<T: ToString>(value: Option<T>) -> String {
        value.map(|v| v.to_string()).unwrap_or_default()
    }

    let mut writer = Writer::from_writer(out);
    writer.write_record(["tick", "kind", "elevator", "floor", "points"])?;
    for event in events {
        writer.write_record([
            cell(event.tick().map(|t| t.0)),
            event.kind().to_string(),
            cell(event.elevator()),
            cell(event.floor()),
            cell(event.points()),
        ])?;
    }
    writer.flush()?;
    Ok(())
}
