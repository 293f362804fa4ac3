use crate::model::{Event, Guest};
use crate::state::AppState;
use crate::view::{Action, Element, ListenerKind, Node, el};

/// The whole page.
pub fn app(state: &AppState) -> Vec<Node> {
    vec![
        el("h1").text("Party Planner").into(),
        el("main")
            .child(
                el("section")
                    .child(el("h2").text("Upcoming Parties"))
                    .child(event_list(state)),
            )
            .child(
                el("section")
                    .child(el("h2").text("Add a new party"))
                    .child(add_event_form()),
            )
            .child(
                el("section")
                    .attr("id", "selected")
                    .child(el("h2").text("Party Details"))
                    .child(selected_event(state)),
            )
            .into(),
    ]
}

/// Events in the order the service listed them.
pub fn event_list(state: &AppState) -> Element {
    let selected_id = state.selected().map(|event| &event.id);
    el("ul").class("parties").children(
        state
            .events()
            .iter()
            .map(|event| Node::from(event_list_item(event, selected_id == Some(&event.id)))),
    )
}

pub fn event_list_item(event: &Event, is_selected: bool) -> Element {
    let item = el("li")
        .on(ListenerKind::Click, Action::SelectEvent(event.id.clone()))
        .child(el("a").attr("href", "#selected").text(event.name.clone()));
    if is_selected { item.class("selected") } else { item }
}

pub fn selected_event(state: &AppState) -> Node {
    let Some(event) = state.selected() else {
        return el("p")
            .text("Please select a party to learn more.")
            .into();
    };

    el("section")
        .child(el("h3").text(format!("{} #{}", event.name, event.id)))
        .child(
            el("time")
                .attr("datetime", event.date.clone())
                .text(event.day()),
        )
        .child(el("address").text(event.location.clone()))
        .child(el("p").text(event.description.clone()))
        .child(guest_list(&state.guests_attending(event)))
        .child(
            el("button")
                .on(ListenerKind::Click, Action::DeleteEvent(event.id.clone()))
                .text("Delete party"),
        )
        .into()
}

pub fn guest_list(guests: &[&Guest]) -> Element {
    el("ul").children(
        guests
            .iter()
            .map(|guest| Node::from(el("li").text(guest.name.clone()))),
    )
}

pub fn add_event_form() -> Element {
    el("form")
        .on(ListenerKind::Submit, Action::SubmitEventForm)
        .child(text_input("name", "Name"))
        .child(text_input("description", "Description"))
        .child(
            el("input")
                .attr("name", "date")
                .attr("type", "date")
                .attr("required", ""),
        )
        .child(text_input("location", "Location"))
        .child(el("button").text("Add party"))
}

fn text_input(name: &'static str, placeholder: &'static str) -> Element {
    el("input")
        .attr("name", name)
        .attr("placeholder", placeholder)
        .attr("required", "")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Id;
    use crate::state::tests::{event, guest, rsvp};
    use crate::view::Listener;

    fn populated() -> AppState {
        let mut state = AppState::default();
        state.set_events(vec![event(2, "Beta"), event(1, "Alpha"), event(3, "Gamma")]);
        state.set_guests(vec![guest(1, "Ada"), guest(2, "Bo"), guest(3, "Cy")]);
        state.set_rsvps(vec![rsvp(1, 3, 1), rsvp(2, 1, 1), rsvp(3, 2, 2)]);
        state
    }

    #[test]
    fn test_build_is_deterministic() {
        let mut state = populated();
        assert_eq!(app(&state), app(&state));
        state.set_selected(Some(event(1, "Alpha")));
        assert_eq!(app(&state), app(&state));
    }

    #[test]
    fn test_event_list_keeps_service_order() {
        let list: Node = event_list(&populated()).into();
        let names: Vec<_> = list
            .as_element()
            .unwrap()
            .children
            .iter()
            .map(Node::text_content)
            .collect();
        assert_eq!(names, vec!["Beta", "Alpha", "Gamma"]);
    }

    #[test]
    fn test_only_selected_item_is_marked() {
        let mut state = populated();
        state.set_selected(Some(event(1, "Alpha")));
        let list = event_list(&state);
        let classes: Vec<_> = list
            .children
            .iter()
            .map(|item| item.as_element().unwrap().get_attr("class"))
            .collect();
        assert_eq!(classes, vec![None, Some("selected"), None]);
    }

    #[test]
    fn test_selection_matches_by_id_not_contents() {
        let mut state = populated();
        // same id, stale contents: still the selected entry
        state.set_selected(Some(event(3, "Gamma (old name)")));
        let list = event_list(&state);
        assert_eq!(list.children[2].as_element().unwrap().get_attr("class"), Some("selected"));
    }

    #[test]
    fn test_each_item_selects_its_own_event() {
        let list: Node = event_list(&populated()).into();
        let actions: Vec<_> = list.listeners().into_iter().map(|l| l.action.clone()).collect();
        assert_eq!(
            actions,
            vec![
                Action::SelectEvent(Id::Number(2)),
                Action::SelectEvent(Id::Number(1)),
                Action::SelectEvent(Id::Number(3)),
            ]
        );
    }

    #[test]
    fn test_placeholder_without_selection() {
        let node = selected_event(&populated());
        assert_eq!(node.as_element().unwrap().tag, "p");
        assert_eq!(node.text_content(), "Please select a party to learn more.");
    }

    #[test]
    fn test_detail_panel() {
        let mut state = populated();
        state.set_selected(Some(event(1, "Alpha")));
        let node = selected_event(&state);

        assert_eq!(
            node.find_tag("h3").map(|h| Node::from(h.clone()).text_content()),
            Some("Alpha #1".to_string())
        );
        let time = node.find_tag("time").unwrap();
        assert_eq!(time.get_attr("datetime"), Some("2025-09-14T00:00:00.000Z"));
        assert_eq!(Node::from(time.clone()).text_content(), "2025-09-14");
        assert_eq!(
            node.find_tag("address").map(|a| Node::from(a.clone()).text_content()),
            Some("Alpha hall".to_string())
        );

        let guests = node.find_tag("ul").unwrap();
        let names: Vec<_> = guests.children.iter().map(Node::text_content).collect();
        assert_eq!(names, vec!["Ada", "Cy"]);

        assert_eq!(
            node.listeners(),
            vec![&Listener {
                kind: ListenerKind::Click,
                action: Action::DeleteEvent(Id::Number(1)),
            }]
        );
    }

    #[test]
    fn test_guest_list_empty_without_rsvps() {
        let mut state = populated();
        state.set_rsvps(vec![]);
        state.set_selected(Some(event(1, "Alpha")));
        let node = selected_event(&state);
        assert!(node.find_tag("ul").unwrap().children.is_empty());
    }

    #[test]
    fn test_form_fields() {
        let form = add_event_form();
        let names: Vec<_> = form
            .children
            .iter()
            .filter_map(|child| child.as_element()?.get_attr("name"))
            .collect();
        assert_eq!(names, vec!["name", "description", "date", "location"]);
        assert_eq!(
            form.listener,
            Some(Listener {
                kind: ListenerKind::Submit,
                action: Action::SubmitEventForm,
            })
        );
    }

    #[test]
    fn test_page_layout() {
        let page = app(&populated());
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].text_content(), "Party Planner");
        let selected_section = page[1].find(&|e| e.get_attr("id") == Some("selected"));
        assert!(selected_section.is_some());
    }
}
