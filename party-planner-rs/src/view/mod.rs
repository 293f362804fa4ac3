//! Plain-data view tree.
//!
//! Regions are built fresh from [`AppState`](crate::state::AppState) on every render; nothing here
//! holds on to DOM objects. Event handlers are described by [`Action`] values that carry the ids
//! they were built for, and are only turned into real listeners by the mount.

pub mod regions;

use crate::model::Id;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub tag: &'static str,
    pub attributes: Vec<(&'static str, String)>,
    pub children: Vec<Node>,
    pub listener: Option<Listener>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Listener {
    pub kind: ListenerKind,
    pub action: Action,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ListenerKind {
    Click,
    /// Default navigation is always prevented.
    Submit,
}

impl ListenerKind {
    pub fn dom_event(self) -> &'static str {
        match self {
            ListenerKind::Click => "click",
            ListenerKind::Submit => "submit",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    SelectEvent(Id),
    DeleteEvent(Id),
    /// Resolved against the form's field values when it fires.
    SubmitEventForm,
}

pub fn el(tag: &'static str) -> Element {
    Element {
        tag,
        attributes: Vec::new(),
        children: Vec::new(),
        listener: None,
    }
}

pub fn text(content: impl Into<String>) -> Node {
    Node::Text(content.into())
}

impl Element {
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    pub fn class(self, class: impl Into<String>) -> Self {
        self.attr("class", class)
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn text(self, content: impl Into<String>) -> Self {
        self.child(text(content))
    }

    pub fn on(mut self, kind: ListenerKind, action: Action) -> Self {
        self.listener = Some(Listener { kind, action });
        self
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Text(_) => None,
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        match self {
            Node::Text(s) => s.clone(),
            Node::Element(element) => element.children.iter().map(Node::text_content).collect(),
        }
    }

    /// Depth-first search for the first element matching `predicate`.
    pub fn find(&self, predicate: &dyn Fn(&Element) -> bool) -> Option<&Element> {
        let element = self.as_element()?;
        if predicate(element) {
            return Some(element);
        }
        element.children.iter().find_map(|child| child.find(predicate))
    }

    pub fn find_tag(&self, tag: &str) -> Option<&Element> {
        self.find(&|element| element.tag == tag)
    }

    /// Every listener in the subtree, in document order.
    pub fn listeners(&self) -> Vec<&Listener> {
        let mut out = Vec::new();
        self.collect_listeners(&mut out);
        out
    }

    fn collect_listeners<'a>(&'a self, out: &mut Vec<&'a Listener>) {
        if let Node::Element(element) = self {
            out.extend(element.listener.as_ref());
            for child in &element.children {
                child.collect_listeners(out);
            }
        }
    }
}
