use sequenced::Slot;

use crate::model::{Event, Guest, Rsvp};

/// The four snapshots the view is built from. Each is replaced wholesale, never merged.
///
/// Asynchronous loads go through the slots' tickets (see [`sequenced::Slot`]) so a response to an
/// older request cannot clobber one from a newer request. The plain setters replace immediately.
#[derive(Clone, Debug, Default)]
pub struct AppState {
    pub(crate) events: Slot<Vec<Event>>,
    pub(crate) selected: Slot<Option<Event>>,
    pub(crate) rsvps: Slot<Vec<Rsvp>>,
    pub(crate) guests: Slot<Vec<Guest>>,
}

impl AppState {
    pub fn events(&self) -> &[Event] {
        self.events.get()
    }

    pub fn selected(&self) -> Option<&Event> {
        self.selected.get().as_ref()
    }

    pub fn rsvps(&self) -> &[Rsvp] {
        self.rsvps.get()
    }

    pub fn guests(&self) -> &[Guest] {
        self.guests.get()
    }

    pub fn set_events(&mut self, events: Vec<Event>) {
        self.events.set(events);
    }

    pub fn set_selected(&mut self, selected: Option<Event>) {
        self.selected.set(selected);
    }

    pub fn set_rsvps(&mut self, rsvps: Vec<Rsvp>) {
        self.rsvps.set(rsvps);
    }

    pub fn set_guests(&mut self, guests: Vec<Guest>) {
        self.guests.set(guests);
    }

    /// Guests with an rsvp for `event`, in guest-list order.
    pub fn guests_attending(&self, event: &Event) -> Vec<&Guest> {
        self.guests()
            .iter()
            .filter(|guest| {
                self.rsvps()
                    .iter()
                    .any(|rsvp| rsvp.guest_id == guest.id && rsvp.event_id == event.id)
            })
            .collect()
    }
}
