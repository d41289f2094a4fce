//! in-memory surface, records everything the wires ask of it

use std::collections::BTreeMap;

use flagset::FlagSet;
use tracing::warn;

use super::{ElementClass, ElementId, ListenerToken, RenderSurface, Target};
use crate::{
    events::EventKind,
    transforms::{PxPoint, PxRect},
};

#[derive(Debug, Clone, PartialEq)]
pub struct ElementState {
    pub class: ElementClass,
    pub bounds: Option<PxRect>,
    pub text: String,
    pub position: Option<PxPoint>,
    pub visible: bool,
}

impl ElementState {
    fn new(class: ElementClass) -> Self {
        ElementState {
            class,
            bounds: None,
            text: String::new(),
            position: None,
            visible: true,
        }
    }
}

#[derive(Debug, Default)]
pub struct HeadlessSurface {
    next_element: u32,
    next_token: u64,
    elements: BTreeMap<ElementId, ElementState>,
    removals: BTreeMap<ElementId, usize>,
    listeners: BTreeMap<ListenerToken, (Target, EventKind)>,
}

impl HeadlessSurface {
    pub fn element(&self, el: ElementId) -> Option<&ElementState> {
        self.elements.get(&el)
    }
    pub fn contains(&self, el: ElementId) -> bool {
        self.elements.contains_key(&el)
    }
    /// number of attached elements
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }
    /// how many times `el` has been removed
    pub fn removal_count(&self, el: ElementId) -> usize {
        self.removals.get(&el).copied().unwrap_or_default()
    }
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
    pub fn is_listening(&self, token: ListenerToken) -> bool {
        self.listeners.contains_key(&token)
    }
    /// number of live listeners on `target`
    pub fn listener_count_on(&self, target: Target) -> usize {
        self.listeners.values().filter(|(t, _)| *t == target).count()
    }
    /// kinds of listener live on `target`
    pub fn listeners_on(&self, target: Target) -> FlagSet<EventKind> {
        self.listeners
            .values()
            .filter(|(t, _)| *t == target)
            .fold(FlagSet::default(), |acc, (_, kind)| acc | *kind)
    }
}

impl RenderSurface for HeadlessSurface {
    fn create_element(&mut self, class: ElementClass) -> ElementId {
        let el = ElementId(self.next_element);
        self.next_element += 1;
        self.elements.insert(el, ElementState::new(class));
        el
    }

    fn remove_element(&mut self, el: ElementId) -> bool {
        if self.elements.remove(&el).is_none() {
            warn!(element = el.0, "removing unknown element");
            return false;
        }
        *self.removals.entry(el).or_default() += 1;
        true
    }

    fn set_bounds(&mut self, el: ElementId, rect: PxRect) {
        if let Some(state) = self.elements.get_mut(&el) {
            state.bounds = Some(rect);
        }
    }

    fn bounds(&self, el: ElementId) -> Option<PxRect> {
        self.elements.get(&el).and_then(|s| s.bounds)
    }

    fn set_text(&mut self, el: ElementId, text: &str) {
        if let Some(state) = self.elements.get_mut(&el) {
            state.text = text.to_string();
        }
    }

    fn set_position(&mut self, el: ElementId, at: PxPoint) {
        if let Some(state) = self.elements.get_mut(&el) {
            state.position = Some(at);
        }
    }

    fn set_visible(&mut self, el: ElementId, visible: bool) {
        if let Some(state) = self.elements.get_mut(&el) {
            state.visible = visible;
        }
    }

    fn listen(&mut self, target: Target, kind: EventKind) -> ListenerToken {
        let token = ListenerToken(self.next_token);
        self.next_token += 1;
        self.listeners.insert(token, (target, kind));
        token
    }

    fn unlisten(&mut self, token: ListenerToken) -> bool {
        self.listeners.remove(&token).is_some()
    }
}
