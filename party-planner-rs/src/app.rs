//! Ties the remote client, the state and the renderer together.
//!
//! Everything runs on one thread. A `RefCell` borrow is never held across an `.await`, so user
//! actions can interleave freely while requests are in flight without "already borrowed" panics.

use std::cell::{Ref, RefCell};
use std::future::Future;

use sequenced::{Commit, Slot};

use crate::api::{Resources, TransportError};
use crate::model::{EventForm, Id, NewEvent};
use crate::render::{Mount, Renderer};
use crate::state::AppState;

/// What a user asked for, with any form input already read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Intent {
    Select(Id),
    Delete(Id),
    CreateEvent(EventForm),
}

pub struct App<R, M> {
    pub(crate) resources: R,
    state: RefCell<AppState>,
    renderer: RefCell<Renderer<M>>,
}

impl<R: Resources, M: Mount> App<R, M> {
    pub fn new(resources: R, mount: M) -> Self {
        Self {
            resources,
            state: RefCell::new(AppState::default()),
            renderer: RefCell::new(Renderer::new(mount)),
        }
    }

    pub fn state(&self) -> Ref<'_, AppState> {
        self.state.borrow()
    }

    pub fn renderer(&self) -> Ref<'_, Renderer<M>> {
        self.renderer.borrow()
    }

    pub fn render(&self) {
        let state = self.state.borrow();
        self.renderer.borrow_mut().render(&state);
    }

    /// Runs an intent to completion. Failures are logged and leave the state untouched.
    pub async fn perform(&self, intent: Intent) {
        match intent {
            Intent::Select(id) => self.select(&id).await,
            Intent::Delete(id) => self.delete(&id).await,
            Intent::CreateEvent(form) => self.create(form).await,
        }
    }

    pub async fn select(&self, id: &Id) {
        let result = self
            .load(|state| &mut state.selected, async {
                self.resources.get_event(id).await.map(Some)
            })
            .await;
        match result {
            Ok(Commit::Applied) => self.render(),
            Ok(Commit::Stale) => {}
            Err(e) => log::error!("Failed to load event {id}: {e}"),
        }
    }

    pub async fn delete(&self, id: &Id) {
        if let Err(e) = self.resources.delete_event(id).await {
            log::error!("Failed to delete event {id}: {e}");
            return;
        }
        self.state.borrow_mut().set_selected(None);
        self.refresh_events().await;
        self.render();
    }

    pub async fn create(&self, form: EventForm) {
        let new_event = match NewEvent::try_from(form) {
            Ok(new_event) => new_event,
            Err(e) => {
                log::error!("Failed to add event: {e}");
                return;
            }
        };
        if let Err(e) = self.resources.create_event(&new_event).await {
            log::error!("Failed to add event: {e}");
            return;
        }
        self.refresh_events().await;
        self.render();
    }

    /// Re-fetch the event list. Does not render.
    pub async fn refresh_events(&self) {
        if let Err(e) = self.load_events().await {
            log::error!("Failed to load events: {e}");
        }
    }

    pub(crate) async fn load_events(&self) -> Result<Commit, TransportError> {
        self.load(|state| &mut state.events, self.resources.list_events())
            .await
    }

    pub(crate) async fn load_rsvps(&self) -> Result<Commit, TransportError> {
        self.load(|state| &mut state.rsvps, self.resources.list_rsvps())
            .await
    }

    pub(crate) async fn load_guests(&self) -> Result<Commit, TransportError> {
        self.load(|state| &mut state.guests, self.resources.list_guests())
            .await
    }

    /// Reserve a ticket on `slot`, run `fetch`, then offer the result back to the slot.
    ///
    /// `fetch` is lazy, so the request is only issued after the ticket is taken.
    async fn load<T>(
        &self,
        slot: fn(&mut AppState) -> &mut Slot<T>,
        fetch: impl Future<Output = Result<T, TransportError>>,
    ) -> Result<Commit, TransportError> {
        let ticket = slot(&mut self.state.borrow_mut()).begin();
        let value = fetch.await?;
        Ok(slot(&mut self.state.borrow_mut()).commit(ticket, value))
    }
}
