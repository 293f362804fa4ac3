use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, FormData, HtmlFormElement};

use crate::app::Intent;
use crate::model::EventForm;
use crate::render::{Mount, MountError};
use crate::view::{self, Action, ListenerKind, Node};

/// Receives intents from DOM listeners. Must not render synchronously.
pub type Dispatch = Rc<dyn Fn(Intent)>;

type DomListener = Closure<dyn FnMut(web_sys::Event)>;

/// Renders view trees into a container element of the live document.
pub struct DomMount {
    document: Document,
    container: Element,
    dispatch: Dispatch,
    /// Closures behind the listeners of the tree that is currently mounted.
    listeners: Vec<DomListener>,
}

pub(crate) fn js_error(value: JsValue) -> MountError {
    MountError::Dom(format!("{value:?}"))
}

impl DomMount {
    pub fn new(document: Document, container: Element, dispatch: Dispatch) -> Self {
        Self {
            document,
            container,
            dispatch,
            listeners: Vec::new(),
        }
    }

    /// Looks up the container for `selector` in `document`.
    pub fn find_container(document: &Document, selector: &str) -> Result<Element, MountError> {
        document
            .query_selector(selector)
            .map_err(js_error)?
            .ok_or_else(|| MountError::MissingContainer(selector.to_string()))
    }

    /// Number of listener closures held for the mounted tree.
    pub fn live_listeners(&self) -> usize {
        self.listeners.len()
    }

    fn build(
        &self,
        node: &Node,
        listeners: &mut Vec<DomListener>,
    ) -> Result<web_sys::Node, MountError> {
        let element = match node {
            Node::Text(content) => return Ok(self.document.create_text_node(content).into()),
            Node::Element(element) => element,
        };

        let dom = self.document.create_element(element.tag).map_err(js_error)?;
        for (name, value) in &element.attributes {
            dom.set_attribute(name, value).map_err(js_error)?;
        }
        for child in &element.children {
            let child = self.build(child, listeners)?;
            dom.append_child(&child).map_err(js_error)?;
        }
        if let Some(listener) = &element.listener {
            let closure = self.listener(listener);
            dom.add_event_listener_with_callback(
                listener.kind.dom_event(),
                closure.as_ref().unchecked_ref(),
            )
            .map_err(js_error)?;
            listeners.push(closure);
        }
        Ok(dom.into())
    }

    fn listener(&self, listener: &view::Listener) -> DomListener {
        let dispatch = self.dispatch.clone();
        let action = listener.action.clone();
        let kind = listener.kind;
        Closure::new(move |event: web_sys::Event| {
            if kind == ListenerKind::Submit {
                event.prevent_default();
            }
            match resolve(&action, &event) {
                Ok(intent) => (*dispatch)(intent),
                Err(e) => log::error!("Ignoring {kind:?} event: {e}"),
            }
        })
    }
}

impl Mount for DomMount {
    fn replace(&mut self, nodes: &[Node]) -> Result<(), MountError> {
        // build everything into a detached fragment, so a failure leaves the old tree in place
        let mut listeners = Vec::new();
        let fragment = self.document.create_document_fragment();
        for node in nodes {
            let built = self.build(node, &mut listeners)?;
            fragment.append_child(&built).map_err(js_error)?;
        }

        self.container.replace_children_with_node_1(&fragment);
        // the old elements are detached now, so their closures can go
        self.listeners = listeners;
        Ok(())
    }
}

fn resolve(action: &Action, event: &web_sys::Event) -> Result<Intent, MountError> {
    Ok(match action {
        Action::SelectEvent(id) => Intent::Select(id.clone()),
        Action::DeleteEvent(id) => Intent::Delete(id.clone()),
        Action::SubmitEventForm => Intent::CreateEvent(read_form(event)?),
    })
}

fn read_form(event: &web_sys::Event) -> Result<EventForm, MountError> {
    let form: HtmlFormElement = event
        .current_target()
        .and_then(|target| target.dyn_into::<HtmlFormElement>().ok())
        .ok_or_else(|| MountError::Dom("submit event without a form".to_string()))?;
    let data = FormData::new_with_form(&form).map_err(js_error)?;
    let field = |name: &str| data.get(name).as_string().unwrap_or_default();

    Ok(EventForm {
        name: field("name"),
        description: field("description"),
        date: field("date"),
        location: field("location"),
    })
}
