use std::cell::RefCell;
use std::rc::Rc;
use std::thread::LocalKey;

use sequenced::{Commit, Slot};

use crate::api::Resources;
use crate::app::App;
use crate::render::Mount;

/// The initial load, one collection at a time, so the first paint sees a consistent snapshot.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BootStage {
    Idle,
    LoadingEvents,
    LoadingRsvps,
    LoadingGuests,
    Ready,
}

impl BootStage {
    pub fn next(self) -> Self {
        match self {
            BootStage::Idle => BootStage::LoadingEvents,
            BootStage::LoadingEvents => BootStage::LoadingRsvps,
            BootStage::LoadingRsvps => BootStage::LoadingGuests,
            BootStage::LoadingGuests | BootStage::Ready => BootStage::Ready,
        }
    }
}

impl<R: Resources, M: Mount> App<R, M> {
    /// Best effort: a failed stage is logged and skipped, never retried. Renders once, at the end.
    pub async fn bootstrap(&self) {
        self.load_initial().await;
        self.render();
    }

    /// Every stage up to `Ready`, without rendering.
    pub(crate) async fn load_initial(&self) {
        let mut stage = BootStage::Idle;
        while stage != BootStage::Ready {
            stage = stage.next();
            log::info!("Bootstrap: {stage:?}");
            let result = match stage {
                BootStage::Idle | BootStage::Ready => Ok(()),
                BootStage::LoadingEvents => self.load_events().await.map(drop),
                BootStage::LoadingRsvps => self.load_rsvps().await.map(drop),
                BootStage::LoadingGuests => self.load_guests().await.map(drop),
            };
            if let Err(e) = result {
                log::error!("Bootstrap stage {stage:?} failed: {e}");
            }
        }
    }
}

/// The app that owns the page, if any.
pub type Running<A> = RefCell<Slot<Option<Rc<A>>>>;

/// Runs the initial load of `app`, then installs and renders it.
///
/// Boots are ordered by when they started. If a later boot has already been installed by the
/// time this one finishes loading, `app` is dropped without ever touching the page.
pub async fn launch<R: Resources, M: Mount>(
    running: &'static LocalKey<Running<App<R, M>>>,
    app: Rc<App<R, M>>,
) -> Commit {
    let ticket = running.with(|running| running.borrow_mut().begin());
    app.load_initial().await;

    let commit = running.with(|running| running.borrow_mut().commit(ticket, Some(app.clone())));
    match commit {
        Commit::Applied => app.render(),
        Commit::Stale => log::info!("Boot #{} superseded by a later boot", ticket.sequence()),
    }
    commit
}
