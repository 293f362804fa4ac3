use crate::state::AppState;
use crate::view::{Node, regions};

#[derive(Debug, thiserror::Error)]
pub enum MountError {
    #[error("no element matches mount selector {0:?}")]
    MissingContainer(String),
    #[error("DOM operation failed: {0}")]
    Dom(String),
}

/// Somewhere a view tree can be shown. Implementations must swap the whole tree in one step.
pub trait Mount {
    fn replace(&mut self, nodes: &[Node]) -> Result<(), MountError>;
}

/// The only thing allowed to write into the mount.
pub struct Renderer<M> {
    mount: M,
}

impl<M: Mount> Renderer<M> {
    pub fn new(mount: M) -> Self {
        Self { mount }
    }

    pub fn mount(&self) -> &M {
        &self.mount
    }

    /// Rebuild the full view from `state` and swap it in. On failure the old tree stays up.
    pub fn render(&mut self, state: &AppState) {
        let nodes = regions::app(state);
        if let Err(e) = self.mount.replace(&nodes) {
            log::error!("Failed to render: {e}");
        }
    }
}
