//! Helper functions for container layout widgets

use crate::element::Element;
use crate::event::Event;
use crate::layout::Bounds;
use crate::renderer::Renderer;
use crate::widget::EventResult;

/// Dispatch an event to child elements with overlay-aware priority.
///
/// 1. `CursorLeft` goes to every child.
/// 2. Children with an active overlay (e.g. an expanded list) see positional
///    events first. A press inside an overlay's capture area is consumed even
///    when the overlay produces no message, so it never reaches widgets below.
/// 3. Remaining children get the event if it falls inside the container.
///
/// `child_bounds` are relative to the container; `container_bounds` is absolute.
pub fn dispatch_event_to_children<M: 'static>(
    children: &mut [Element<M>],
    child_bounds: &[Bounds],
    event: &Event,
    container_bounds: Bounds,
) -> EventResult<M> {
    if matches!(event, Event::CursorLeft) {
        let mut result = EventResult::none();
        for (child, bounds) in children.iter_mut().zip(child_bounds.iter()) {
            let absolute_bounds = translate_bounds(*bounds, container_bounds);
            result.merge(child.on_event(event, absolute_bounds));
        }
        return result;
    }

    let has_overlay = children.iter().any(|c| c.has_active_overlay());

    // Phase 1: overlays get priority over everything they cover
    if has_overlay {
        if let Some((x, y)) = event.position() {
            for (child, bounds) in children.iter_mut().zip(child_bounds.iter()) {
                if !child.has_active_overlay() {
                    continue;
                }
                let absolute_bounds = translate_bounds(*bounds, container_bounds);
                let capture = child
                    .capture_bounds(absolute_bounds)
                    .unwrap_or(absolute_bounds);
                if capture.contains(x, y) {
                    return child.on_event(event, absolute_bounds);
                }
            }
        }
    }

    if let Some((x, y)) = event.position() {
        if !container_bounds.contains(x, y) && !matches!(event, Event::MouseRelease { .. }) {
            return EventResult::none();
        }
    }

    // Phase 2: everyone else, first responder wins
    for (child, bounds) in children.iter_mut().zip(child_bounds.iter()) {
        if has_overlay && child.has_active_overlay() {
            continue;
        }
        let absolute_bounds = translate_bounds(*bounds, container_bounds);
        let result = child.on_event(event, absolute_bounds);
        if !result.is_empty() {
            return result;
        }
    }

    EventResult::none()
}

/// Translate relative child bounds to absolute bounds within the container.
#[inline]
pub fn translate_bounds(child_bounds: Bounds, container_bounds: Bounds) -> Bounds {
    child_bounds.translate(container_bounds.x, container_bounds.y)
}

/// Draw children at their cached bounds positions.
pub fn draw_children<M: 'static>(
    children: &[Element<M>],
    child_bounds: &[Bounds],
    renderer: &mut Renderer,
    container_bounds: Bounds,
) {
    for (child, bounds) in children.iter().zip(child_bounds.iter()) {
        child.draw(renderer, translate_bounds(*bounds, container_bounds));
    }
}
