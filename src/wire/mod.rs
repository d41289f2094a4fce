//! a single wire segment on the surface
//!
//! a wire owns two surface elements: the box drawn for the segment and a hover
//! tooltip showing its dc voltage. it listens for mouse-over for as long as it
//! lives; while hovered it additionally listens for mouse-leave and mouse-move
//! on its box and key-down on the document. deleting the wire releases
//! everything and asks the manager to forget its id.

use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    config::WireConfig,
    events::{EventKind, EventStatus, Key, WireEvent},
    manager::{WireId, WireManager},
    surface::{ElementClass, ElementId, RcRSurface, Subscription, Target},
    transforms::{PxPoint, PxRect},
};

mod orientation;
pub use orientation::{Horizontal, Layout, Orientation, Vertical};

mod route;
pub use route::{route, Segment};

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    #[error("wire {0} has been deleted")]
    Deleted(WireId),
    #[error("wire {0} has no box on the surface")]
    Detached(WireId),
    #[error("wire thickness must not be negative, got {0}")]
    Thickness(i32),
}

/// what every wire created by one manager shares
#[derive(Debug, Clone)]
pub struct WireContext {
    surface: RcRSurface,
    manager: Weak<dyn WireManager>,
    config: Rc<WireConfig>,
}

impl WireContext {
    pub fn new<M: WireManager + 'static>(
        surface: RcRSurface,
        manager: &Rc<M>,
        config: WireConfig,
    ) -> Self {
        let manager: Weak<M> = Rc::downgrade(manager);
        let manager: Weak<dyn WireManager> = manager;
        WireContext {
            surface,
            manager,
            config: Rc::new(config),
        }
    }
}

fn tooltip_text(voltage: f64) -> String {
    format!("DC: {}", voltage)
}

/// listeners held between mouse-over and mouse-leave
#[derive(Debug)]
struct HoverSession {
    _guards: [Subscription; 3],
}

#[derive(Debug)]
enum WireState {
    Idle,
    Hovering(HoverSession),
    Deleted,
}

/// serializable view of a wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireSnapshot {
    pub id: WireId,
    pub orientation: Orientation,
    pub start: PxPoint,
    pub end: PxPoint,
    pub offset: bool,
    pub thickness: i32,
    pub voltage: f64,
}

#[derive(Debug)]
pub struct Wire {
    id: WireId,
    orientation: Orientation,
    start: PxPoint,
    end: PxPoint,
    offset: bool,
    thickness: i32,
    voltage: f64,
    ctx: WireContext,
    element: Option<ElementId>,
    tooltip: Option<ElementId>,
    hover_listener: Option<Subscription>,
    state: WireState,
}

impl Wire {
    /// create the wire's box and tooltip on the surface and lay the box out
    pub fn new(
        orientation: Orientation,
        start: PxPoint,
        end: PxPoint,
        offset: bool,
        id: WireId,
        ctx: &WireContext,
    ) -> Self {
        let (element, tooltip) = {
            let mut surface = ctx.surface.0.borrow_mut();
            let element = surface.create_element(ElementClass::Wire);
            let tooltip = surface.create_element(ElementClass::Tooltip);
            surface.set_text(tooltip, &tooltip_text(0.));
            surface.set_visible(tooltip, false);
            (element, tooltip)
        };
        let hover_listener = ctx
            .surface
            .subscribe(Target::Element(element), EventKind::MouseOver);
        let wire = Wire {
            id,
            orientation,
            start,
            end,
            offset,
            thickness: ctx.config.thickness,
            voltage: 0.,
            ctx: ctx.clone(),
            element: Some(element),
            tooltip: Some(tooltip),
            hover_listener: Some(hover_listener),
            state: WireState::Idle,
        };
        let rect = wire.render(element);
        debug!(%id, ?orientation, ?rect, "wire created");
        wire
    }

    pub fn from_segment(seg: Segment, id: WireId, ctx: &WireContext) -> Self {
        Self::new(seg.orientation, seg.start, seg.end, false, id, ctx)
    }

    pub fn id(&self) -> WireId {
        self.id
    }
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }
    pub fn start(&self) -> PxPoint {
        self.start
    }
    pub fn end(&self) -> PxPoint {
        self.end
    }
    pub fn offset(&self) -> bool {
        self.offset
    }
    pub fn thickness(&self) -> i32 {
        self.thickness
    }
    pub fn voltage(&self) -> f64 {
        self.voltage
    }
    /// the box element, None once deleted
    pub fn element(&self) -> Option<ElementId> {
        self.element
    }
    /// the tooltip element, None once deleted
    pub fn tooltip(&self) -> Option<ElementId> {
        self.tooltip
    }
    pub fn is_deleted(&self) -> bool {
        matches!(self.state, WireState::Deleted)
    }
    pub fn is_hovering(&self) -> bool {
        matches!(self.state, WireState::Hovering(_))
    }

    fn live(&self) -> Result<(ElementId, ElementId), WireError> {
        match (self.element, self.tooltip) {
            (Some(element), Some(tooltip)) => Ok((element, tooltip)),
            _ => Err(WireError::Deleted(self.id)),
        }
    }

    fn render(&self, element: ElementId) -> PxRect {
        let rect = self
            .orientation
            .layout(self.start, self.end, self.offset, self.thickness);
        self.ctx.surface.0.borrow_mut().set_bounds(element, rect);
        rect
    }

    /// lay the box out from the current endpoints
    pub fn draw(&self) -> Result<PxRect, WireError> {
        let (element, _) = self.live()?;
        Ok(self.render(element))
    }

    /// the box as laid out on the surface
    pub fn rendered(&self) -> Result<PxRect, WireError> {
        let (element, _) = self.live()?;
        self.ctx
            .surface
            .0
            .borrow()
            .bounds(element)
            .ok_or(WireError::Detached(self.id))
    }

    pub fn update_start(&mut self, start: PxPoint) -> Result<(), WireError> {
        let (element, _) = self.live()?;
        self.start = start;
        self.render(element);
        Ok(())
    }

    pub fn update_end(&mut self, end: PxPoint) -> Result<(), WireError> {
        let (element, _) = self.live()?;
        self.end = end;
        self.render(element);
        Ok(())
    }

    pub fn set_thickness(&mut self, thickness: i32) -> Result<(), WireError> {
        let (element, _) = self.live()?;
        if thickness < 0 {
            return Err(WireError::Thickness(thickness));
        }
        self.thickness = thickness;
        self.render(element);
        Ok(())
    }

    /// store the dc voltage. the tooltip picks it up on the next mouse-over.
    pub fn set_voltage(&mut self, voltage: f64) -> Result<(), WireError> {
        self.live()?;
        self.voltage = voltage;
        Ok(())
    }

    pub fn tooltip_text(&self) -> String {
        tooltip_text(self.voltage)
    }

    pub fn on_mouse_over(&mut self, cursor: PxPoint) -> Result<(), WireError> {
        let (element, tooltip) = self.live()?;
        if !self.is_hovering() {
            let surface = &self.ctx.surface;
            let session = HoverSession {
                _guards: [
                    surface.subscribe(Target::Element(element), EventKind::MouseLeave),
                    surface.subscribe(Target::Document, EventKind::KeyDown),
                    surface.subscribe(Target::Element(element), EventKind::MouseMove),
                ],
            };
            self.state = WireState::Hovering(session);
            debug!(id = %self.id, "hover started");
        }
        let text = self.tooltip_text();
        let at = cursor + self.ctx.config.tooltip_enter_offset;
        let mut surface = self.ctx.surface.0.borrow_mut();
        surface.set_text(tooltip, &text);
        surface.set_position(tooltip, at);
        surface.set_visible(tooltip, true);
        Ok(())
    }

    pub fn on_mouse_move(&mut self, cursor: PxPoint) -> Result<(), WireError> {
        let (_, tooltip) = self.live()?;
        let at = cursor + self.ctx.config.tooltip_track_offset;
        self.ctx.surface.0.borrow_mut().set_position(tooltip, at);
        Ok(())
    }

    /// release the hover listeners and hide the tooltip. no-op when not hovering.
    pub fn on_mouse_leave(&mut self) -> Result<(), WireError> {
        self.live()?;
        self.end_hover();
        Ok(())
    }

    fn end_hover(&mut self) {
        if !self.is_hovering() {
            return;
        }
        // dropping the session releases its listeners, surface must not be borrowed here
        self.state = WireState::Idle;
        if let Some(tooltip) = self.tooltip {
            self.ctx.surface.0.borrow_mut().set_visible(tooltip, false);
        }
        debug!(id = %self.id, "hover ended");
    }

    /// deletes the wire if hovered and `key` is a delete key. returns whether it did.
    pub fn on_key_down(&mut self, key: &Key) -> Result<bool, WireError> {
        self.live()?;
        if self.is_hovering() && self.ctx.config.is_delete_key(key) {
            self.delete()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// route `event` to its handler if the matching listener is live
    pub fn handle_event(&mut self, event: &WireEvent) -> Result<EventStatus, WireError> {
        self.live()?;
        let subscribed = match event.kind() {
            EventKind::MouseOver => self.hover_listener.is_some(),
            _ => self.is_hovering(),
        };
        if !subscribed {
            return Ok(EventStatus::Ignored);
        }
        match event {
            WireEvent::MouseOver(cursor) => self.on_mouse_over(*cursor)?,
            WireEvent::MouseLeave => self.on_mouse_leave()?,
            WireEvent::MouseMove(cursor) => self.on_mouse_move(*cursor)?,
            WireEvent::KeyDown(key) => {
                if !self.on_key_down(key)? {
                    return Ok(EventStatus::Ignored);
                }
            }
        }
        Ok(EventStatus::Captured)
    }

    /// tear the wire down. the wire is unusable afterwards.
    pub fn delete(&mut self) -> Result<(), WireError> {
        let (element, tooltip) = self.live()?;
        self.hover_listener = None;
        self.end_hover();
        {
            let mut surface = self.ctx.surface.0.borrow_mut();
            surface.remove_element(element);
            surface.remove_element(tooltip);
        }
        self.element = None;
        self.tooltip = None;
        self.state = WireState::Deleted;
        match self.ctx.manager.upgrade() {
            Some(manager) => manager.delete_wire(self.id),
            None => debug!(id = %self.id, "manager gone, nothing to deregister"),
        }
        debug!(id = %self.id, "wire deleted");
        Ok(())
    }

    /// absorb `other` if it lies on the same row or column with the same breadth.
    /// on success this wire spans both and `other` is deleted.
    pub fn merge(&mut self, other: Option<&mut Wire>) -> Result<bool, WireError> {
        self.live()?;
        let Some(other) = other else {
            return Ok(false);
        };
        other.live()?;
        if self.orientation != other.orientation {
            return Ok(false);
        }
        let layout = self.orientation;
        let (mine, theirs) = (self.rendered()?, other.rendered()?);
        if layout.track(&mine) != layout.track(&theirs) {
            debug!(id = %self.id, other = %other.id, "not on the same track");
            return Ok(false);
        }
        if layout.breadth(&mine) != layout.breadth(&theirs) {
            debug!(id = %self.id, other = %other.id, "breadth differs");
            return Ok(false);
        }
        let (start, end) = layout.span((self.start, self.end), (other.start, other.end));
        self.update_end(end)?;
        self.update_start(start)?;
        other.delete()?;
        debug!(id = %self.id, other = %other.id, ?start, ?end, "wires merged");
        Ok(true)
    }

    pub fn snapshot(&self) -> WireSnapshot {
        WireSnapshot {
            id: self.id,
            orientation: self.orientation,
            start: self.start,
            end: self.end,
            offset: self.offset,
            thickness: self.thickness,
            voltage: self.voltage,
        }
    }
}
