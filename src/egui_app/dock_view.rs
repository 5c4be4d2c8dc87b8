//! Geometry, input routing and painting for the dock row.

use egui::{
    self, Align2, Color32, FontId, Painter, Pos2, Rect, Stroke, StrokeKind, Vec2,
};

use super::icons::DockIcon;
use crate::drag::{Point, PointerEvent};

const CORNER_RADIUS: f32 = 10.0;
const BAR_PADDING: f32 = 8.0;
const BOTTOM_MARGIN: f32 = 24.0;
const GHOST_ALPHA: f32 = 0.25;

/// Slot sizing for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DockGeometry {
    pub item_size: f32,
    pub spacing: f32,
}

impl DockGeometry {
    /// Resting slot rectangles, centred horizontally near the bottom of `area`.
    pub fn slot_rects(&self, area: Rect, count: usize) -> Vec<Rect> {
        if count == 0 {
            return Vec::new();
        }
        let total = count as f32 * self.item_size + (count - 1) as f32 * self.spacing;
        let top = area.bottom() - BOTTOM_MARGIN - BAR_PADDING - self.item_size;
        let left = area.center().x - total / 2.0;
        (0..count)
            .map(|index| {
                let x = left + index as f32 * (self.item_size + self.spacing);
                Rect::from_min_size(Pos2::new(x, top), Vec2::splat(self.item_size))
            })
            .collect()
    }

    /// Bar drawn behind the slots.
    pub fn bar_rect(&self, slots: &[Rect]) -> Option<Rect> {
        let first = slots.first()?;
        let last = slots.last()?;
        Some(first.union(*last).expand(BAR_PADDING))
    }
}

/// Slot whose bounds contain `pos`.
pub fn slot_at(slots: &[Rect], pos: Pos2) -> Option<usize> {
    slots.iter().position(|rect| rect.contains(pos))
}

pub fn to_point(pos: Pos2) -> Point {
    Point::new(pos.x, pos.y)
}

pub fn to_pos(point: Point) -> Pos2 {
    Pos2::new(point.x, point.y)
}

/// Translate this frame's raw pointer state into dock events, in arrival order.
pub fn pointer_events(ctx: &egui::Context, slots: &[Rect]) -> Vec<PointerEvent> {
    let (pressed, released, down, moving, pos) = ctx.input(|i| {
        (
            i.pointer.primary_pressed(),
            i.pointer.primary_released(),
            i.pointer.primary_down(),
            i.pointer.is_moving(),
            i.pointer.interact_pos(),
        )
    });
    let mut events = Vec::new();
    let Some(pos) = pos else {
        if released {
            events.push(PointerEvent::Drop(None));
        }
        return events;
    };
    if pressed && let Some(index) = slot_at(slots, pos) {
        events.push(PointerEvent::PressStart(index));
        events.push(PointerEvent::DragMove(to_point(pos)));
    }
    if down && moving {
        events.push(PointerEvent::DragMove(to_point(pos)));
        events.push(PointerEvent::DragOver(slot_at(slots, pos)));
    }
    if released {
        events.push(PointerEvent::Drop(slot_at(slots, pos)));
    }
    events
}

pub fn paint_bar(painter: &Painter, bar: Rect) {
    painter.rect_filled(
        bar,
        CORNER_RADIUS + BAR_PADDING,
        Color32::from_rgba_unmultiplied(40, 40, 48, 200),
    );
}

/// Draw `icon` centred in `slot`, grown by `scale`.
pub fn paint_icon(painter: &Painter, slot: Rect, icon: &DockIcon, scale: f32, ghosted: bool) {
    let rect = Rect::from_center_size(slot.center(), slot.size() * scale);
    let (fill, text) = if ghosted {
        (
            icon.fill.gamma_multiply(GHOST_ALPHA),
            Color32::WHITE.gamma_multiply(GHOST_ALPHA),
        )
    } else {
        (icon.fill, Color32::WHITE)
    };
    painter.rect_filled(rect, CORNER_RADIUS * scale, fill);
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        &icon.glyph,
        FontId::proportional(rect.height() * 0.5),
        text,
    );
}

/// Outline the hovered slot; accepted targets get the accent colour.
pub fn paint_hover_hint(painter: &Painter, slot: Rect, accepted: bool) {
    let color = if accepted {
        Color32::from_rgb(90, 176, 255)
    } else {
        Color32::from_gray(110)
    };
    painter.rect_stroke(
        slot.expand(3.0),
        CORNER_RADIUS + 3.0,
        Stroke::new(2.0, color),
        StrokeKind::Outside,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    const GEOMETRY: DockGeometry = DockGeometry {
        item_size: 40.0,
        spacing: 10.0,
    };

    fn area() -> Rect {
        Rect::from_min_size(Pos2::ZERO, Vec2::new(400.0, 200.0))
    }

    #[test]
    fn slots_are_centred_and_evenly_spaced() {
        let slots = GEOMETRY.slot_rects(area(), 3);
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0].left(), 200.0 - 70.0);
        assert_eq!(slots[1].left() - slots[0].right(), 10.0);
        assert_eq!(slots[2].right(), 200.0 + 70.0);
        assert_eq!(slots[0].bottom(), 200.0 - BOTTOM_MARGIN - BAR_PADDING);
    }

    #[test]
    fn hit_testing_finds_slot_or_gap() {
        let slots = GEOMETRY.slot_rects(area(), 3);
        assert_eq!(slot_at(&slots, slots[1].center()), Some(1));
        let gap = Pos2::new(slots[0].right() + 5.0, slots[0].center().y);
        assert_eq!(slot_at(&slots, gap), None);
    }

    #[test]
    fn empty_dock_has_no_bar() {
        assert!(GEOMETRY.slot_rects(area(), 0).is_empty());
        assert!(GEOMETRY.bar_rect(&[]).is_none());
    }
}
