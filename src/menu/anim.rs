//! Per-frame animation scheduler. Invoked once per rendered frame with the
//! elapsed delta (tick units) and a monotonic clock reading; mutates the
//! scene the compositor built. Nothing in here can fail at runtime.

use crate::cat;
use crate::scene::MenuScene;
use crate::{DESIGN_HEIGHT, DESIGN_WIDTH};

/// Hovered-button pulse: `1.02 + 0.01 * sin(clock / 200)`.
pub fn hover_pulse(clock_ms: f64) -> f64 {
    1.02 + (clock_ms / 200.0).sin() * 0.01
}

/// Title glow: `0.8 + 0.2 * sin(clock / 500)`.
pub fn title_alpha(clock_ms: f64) -> f64 {
    0.8 + (clock_ms / 500.0).sin() * 0.2
}

/// Tree sway angle for a given per-tree phase offset.
pub fn tree_sway(clock_ms: f64, phase: f64) -> f64 {
    (clock_ms / 2000.0 + phase).sin() * 0.02
}

pub fn tick(scene: &mut MenuScene, delta: f64, clock_ms: f64) {
    // Particles drift upward and wrap to the bottom with a fresh random x.
    for p in &mut scene.particles {
        p.y -= p.velocity * delta;
        if p.y < 0.0 {
            p.y = DESIGN_HEIGHT;
            p.x = scene.rng.range(0.0, DESIGN_WIDTH);
        }
    }

    scene.title.node.alpha = title_alpha(clock_ms);

    for tree in &mut scene.trees {
        tree.node.rotation = tree_sway(clock_ms, tree.sway_phase);
    }

    // Pulse applies only to the currently hovered button; the rest sit at 1.
    for button in &mut scene.buttons {
        button.node.scale = if button.hovered {
            hover_pulse(clock_ms)
        } else {
            1.0
        };
    }

    cat::tick(&mut scene.cat, delta, clock_ms);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Lcg;

    #[test]
    fn particles_wrap_to_bottom() {
        let mut scene = MenuScene::build(Lcg::new(99));
        scene.particles[0].y = 0.05;
        scene.particles[0].velocity = 0.5;
        tick(&mut scene, 1.0, 0.0);
        assert_eq!(scene.particles[0].y, DESIGN_HEIGHT);
        assert!(scene.particles[0].x >= 0.0 && scene.particles[0].x < DESIGN_WIDTH);
    }

    #[test]
    fn only_hovered_buttons_pulse() {
        let mut scene = MenuScene::build(Lcg::new(99));
        scene.buttons[1].hovered = true;
        tick(&mut scene, 1.0, 314.159); // sin(~pi/2) ~ 1
        assert!((scene.buttons[1].node.scale - 1.03).abs() < 1e-3);
        assert_eq!(scene.buttons[0].node.scale, 1.0);
        assert_eq!(scene.buttons[2].node.scale, 1.0);
    }

    #[test]
    fn title_alpha_oscillates_around_base() {
        assert!((title_alpha(0.0) - 0.8).abs() < 1e-9);
        let peak = title_alpha(500.0 * std::f64::consts::FRAC_PI_2);
        assert!((peak - 1.0).abs() < 1e-9);
    }

    #[test]
    fn trees_sway_out_of_phase() {
        let a = tree_sway(1000.0, 0.0);
        let b = tree_sway(1000.0, 1.0);
        assert!(a != b);
        assert!(a.abs() <= 0.02 && b.abs() <= 0.02);
    }
}
