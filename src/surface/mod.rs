//! rendering surface the wires lay themselves out on
//!
//! the surface owns the elements and listener registrations; wires only hold
//! ids and [`Subscription`] guards into it.

use std::{
    cell::RefCell,
    fmt,
    rc::{Rc, Weak},
};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    events::EventKind,
    transforms::{PxPoint, PxRect},
};

mod headless;
pub use headless::{ElementState, HeadlessSurface};

/// handle to an element created on a surface
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize,
)]
pub struct ElementId(pub u32);

/// handle to a listener registration
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerToken(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum ElementClass {
    Wire,
    Tooltip,
}

/// what a listener is attached to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Target {
    Element(ElementId),
    Document,
}

pub trait RenderSurface {
    /// create an element and attach it to the surface
    fn create_element(&mut self, class: ElementClass) -> ElementId;
    /// detach and forget an element. returns false if the element was unknown.
    fn remove_element(&mut self, el: ElementId) -> bool;
    /// set left, top, width and height of an element
    fn set_bounds(&mut self, el: ElementId, rect: PxRect);
    /// read back the laid out box of an element
    fn bounds(&self, el: ElementId) -> Option<PxRect>;
    fn set_text(&mut self, el: ElementId, text: &str);
    fn set_position(&mut self, el: ElementId, at: PxPoint);
    fn set_visible(&mut self, el: ElementId, visible: bool);
    /// register a listener, the token is needed to release it
    fn listen(&mut self, target: Target, kind: EventKind) -> ListenerToken;
    /// release a listener. returns false if the token was not live.
    fn unlisten(&mut self, token: ListenerToken) -> bool;
}

/// newtype wrapper for `Rc<RefCell<dyn RenderSurface>>`
#[derive(Clone)]
pub struct RcRSurface(pub Rc<RefCell<dyn RenderSurface>>);

impl RcRSurface {
    pub fn new<S: RenderSurface + 'static>(surface: Rc<RefCell<S>>) -> Self {
        Self(surface)
    }
    /// register a listener, released again when the returned guard drops
    pub fn subscribe(&self, target: Target, kind: EventKind) -> Subscription {
        let token = self.0.borrow_mut().listen(target, kind);
        Subscription {
            surface: Rc::downgrade(&self.0),
            token,
        }
    }
}

impl fmt::Debug for RcRSurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("RcRSurface")
    }
}

/// live listener registration. must not be dropped while the surface is borrowed.
#[derive(Debug)]
pub struct Subscription {
    surface: Weak<RefCell<dyn RenderSurface>>,
    token: ListenerToken,
}

impl Subscription {
    pub fn token(&self) -> ListenerToken {
        self.token
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        let Some(surface) = self.surface.upgrade() else {
            return;
        };
        match surface.try_borrow_mut() {
            Ok(mut surface) => {
                if !surface.unlisten(self.token) {
                    warn!(token = self.token.0, "listener already released");
                }
            }
            Err(_) => warn!(token = self.token.0, "surface busy, listener leaked"),
        };
    }
}
