use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use eframe::egui::{self, Align2, Area, Color32, Frame, Id, Order, RichText, Sense, Vec2};
use tracing::warn;

use super::dock_view::{self, DockGeometry};
use super::icons::{DockIcon, IconSet};
use crate::config::DockConfig;
use crate::dock::{Dock, DockError};
use crate::drag::DragEvent;

/// Longest frame delta fed to the animator, so a stalled frame does not skip
/// a whole transition.
const MAX_FRAME_DELTA: f32 = 0.1;

/// Renders the dock and routes pointer input into it.
pub struct DockApp {
    dock: Dock<String, String, DockIcon>,
    geometry: DockGeometry,
    drag_log: Rc<RefCell<Vec<DragEvent>>>,
    status: String,
    visuals_set: bool,
}

impl DockApp {
    /// Build the dock described by `config`.
    pub fn new(config: &DockConfig) -> Result<Self, DockError> {
        let icons = IconSet::new(&config.dock.items);
        let mut dock = Dock::new(
            config.dock.items.clone(),
            String::clone,
            move |name: &String| icons.icon(name),
            config.dock_settings(),
        )?;
        let drag_log = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&drag_log);
        dock.subscribe_drag(move |event| sink.borrow_mut().push(*event));
        Ok(Self {
            dock,
            geometry: DockGeometry {
                item_size: config.dock.item_size,
                spacing: config.dock.spacing,
            },
            drag_log,
            status: "Drag an icon to reorder".to_string(),
            visuals_set: false,
        })
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        visuals.panel_fill = Color32::from_rgb(16, 16, 16);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_dock(&mut self, ui: &mut egui::Ui) {
        let slots = self
            .geometry
            .slot_rects(ui.max_rect(), self.dock.len());
        for event in dock_view::pointer_events(ui.ctx(), &slots) {
            if let Err(err) = self.dock.handle(event) {
                warn!("Dock rejected {event:?}: {err}");
            }
        }
        let painter = ui.painter();
        if let Some(bar) = self.geometry.bar_rect(&slots) {
            dock_view::paint_bar(painter, bar);
        }
        if let Some(hint) = self.dock.hover_hint()
            && let Some(slot) = slots.get(hint.target)
        {
            dock_view::paint_hover_hint(painter, *slot, hint.accepted);
        }
        let idle = self.dock.drag_state().is_idle();
        for (frame, slot) in self.dock.frame().iter().zip(&slots) {
            dock_view::paint_icon(painter, *slot, &frame.visual, frame.scale, frame.dragging);
            if idle {
                ui.interact(*slot, ui.id().with(("dock_slot", frame.index)), Sense::hover())
                    .on_hover_text(&frame.visual.label);
            }
        }
    }

    fn render_feedback_visual(&self, ctx: &egui::Context) {
        let Some(feedback) = self.dock.feedback_visual() else {
            return;
        };
        let Some(pointer) = feedback.pointer else {
            return;
        };
        let size = Vec2::splat(self.geometry.item_size);
        Area::new(Id::new("dock_feedback"))
            .order(Order::Tooltip)
            .pivot(Align2::CENTER_CENTER)
            .current_pos(dock_view::to_pos(pointer))
            .interactable(false)
            .show(ctx, |ui| {
                let (rect, _) = ui.allocate_exact_size(size * feedback.scale, Sense::hover());
                let slot = egui::Rect::from_center_size(rect.center(), size);
                dock_view::paint_icon(ui.painter(), slot, &feedback.visual, feedback.scale, false);
            });
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        for event in self.drag_log.borrow_mut().drain(..) {
            self.status = self.describe(event);
        }
        egui::TopBottomPanel::top("status_bar")
            .frame(Frame::new().fill(Color32::from_rgb(24, 24, 24)))
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.add_space(8.0);
                    ui.label(RichText::new(&self.status).color(Color32::WHITE));
                });
            });
    }

    fn describe(&self, event: DragEvent) -> String {
        let name = |index: usize| self.dock.key_at(index).unwrap_or_default();
        match event {
            DragEvent::Started { index } => format!("Dragging {}", name(index)),
            DragEvent::Hovered {
                target, accepted, ..
            } if accepted => format!("Drop to move into slot {}", target + 1),
            DragEvent::Hovered { .. } => "Release to put it back".to_string(),
            DragEvent::Dropped {
                target,
                moved: true,
                ..
            } => format!("Moved {} to slot {}", name(target), target + 1),
            DragEvent::Dropped { .. } | DragEvent::Cancelled { .. } => {
                "Order unchanged".to_string()
            }
            DragEvent::PressAbandoned { .. } => "Hold to lift an icon".to_string(),
        }
    }
}

impl eframe::App for DockApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        let delta = ctx.input(|i| i.stable_dt).clamp(0.0, MAX_FRAME_DELTA);
        if let Err(err) = self.dock.tick(Duration::from_secs_f32(delta)) {
            warn!("Dock tick failed: {err}");
        }
        self.render_status(ctx);
        egui::CentralPanel::default().show(ctx, |ui| self.render_dock(ui));
        self.render_feedback_visual(ctx);
        if self.dock.is_animating() || self.dock.drag_state().session().is_some() {
            ctx.request_repaint();
        }
    }
}
