//! Explicit pointer-event model. The DOM listeners reduce raw mouse events to
//! `MenuEvent`s via hit testing and dispatch them synchronously here, so the
//! interaction logic runs identically under native tests and in the browser.

use crate::audio::{AudioCueManager, CueBackend, CueId};
use crate::scene::{
    HitTarget, MenuScene, BUTTON_FILL, BUTTON_FILL_HOVER, BUTTON_LABEL, BUTTON_LABEL_HOVER,
    BUTTON_SHINE_ALPHA, BUTTON_SHINE_ALPHA_HOVER,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuEvent {
    PointerEnter(HitTarget),
    PointerLeave(HitTarget),
    PointerDown(HitTarget),
}

pub fn handle_event<B: CueBackend>(
    scene: &mut MenuScene,
    audio: &mut AudioCueManager<B>,
    event: MenuEvent,
) {
    match event {
        MenuEvent::PointerEnter(HitTarget::Button(i)) => {
            if let Some(button) = scene.buttons.get_mut(i) {
                button.hovered = true;
                button.fill = BUTTON_FILL_HOVER;
                button.label_color = BUTTON_LABEL_HOVER;
                button.shine_alpha = BUTTON_SHINE_ALPHA_HOVER;
                button.node.scale = 1.02;
                audio.play_effect(CueId::Hover);
            }
        }
        MenuEvent::PointerLeave(HitTarget::Button(i)) => {
            if let Some(button) = scene.buttons.get_mut(i) {
                button.hovered = false;
                button.fill = BUTTON_FILL;
                button.label_color = BUTTON_LABEL;
                button.shine_alpha = BUTTON_SHINE_ALPHA;
                button.node.scale = 1.0;
            }
        }
        MenuEvent::PointerDown(HitTarget::Button(_)) => {
            audio.play_effect(CueId::Click);
        }
        MenuEvent::PointerEnter(HitTarget::Cat) => {
            scene.cat.state.is_happy = true;
        }
        MenuEvent::PointerLeave(HitTarget::Cat) => {
            scene.cat.state.is_happy = false;
        }
        MenuEvent::PointerDown(HitTarget::Cat) => {
            scene.cat.start_meow();
            audio.play_effect(CueId::Click);
        }
    }
}

/// Tracks which target the pointer is over and turns raw pointer positions
/// into enter/leave event pairs.
#[derive(Default)]
pub struct HoverTracker {
    current: Option<HitTarget>,
}

impl HoverTracker {
    /// Pointer moved to a design-space position; returns the leave/enter
    /// events the transition implies, in that order.
    pub fn moved(&mut self, scene: &MenuScene, x: f64, y: f64) -> Vec<MenuEvent> {
        let next = scene.hit_test(x, y);
        self.transition(next)
    }

    /// Pointer left the canvas entirely.
    pub fn left(&mut self) -> Vec<MenuEvent> {
        self.transition(None)
    }

    pub fn current(&self) -> Option<HitTarget> {
        self.current
    }

    fn transition(&mut self, next: Option<HitTarget>) -> Vec<MenuEvent> {
        if next == self.current {
            return Vec::new();
        }
        let mut events = Vec::new();
        if let Some(prev) = self.current {
            events.push(MenuEvent::PointerLeave(prev));
        }
        if let Some(target) = next {
            events.push(MenuEvent::PointerEnter(target));
        }
        self.current = next;
        events
    }
}
