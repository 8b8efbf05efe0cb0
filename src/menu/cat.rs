//! The animated pixel-art cat: body/ears/tail sprites, the face swapped per
//! expression, and the timer-driven expression state machine.
//!
//! Timers accumulate frame deltas in tick units (one unit = one frame at the
//! nominal ~60 Hz callback rate); thresholds are kept in those units rather
//! than milliseconds, matching the tuning of the original scene.

use crate::scene::{build_pixel_sprite, Color, Node, Sprite};

const PX: f64 = 4.0;

const ORANGE: Color = 0xFFA500;
const WHITE: Color = 0xFFFFFF;
const BLACK: Color = 0x000000;
const PINK: Color = 0xFFC0CB;

// Blink cadence: eyes close once the timer passes BLINK_CLOSE_AT and reopen
// (timer reset) once it passes BLINK_OPEN_AT. ~2s cycle with a 6-frame
// closed phase at 60 Hz.
pub const BLINK_CLOSE_AT: f64 = 120.0;
pub const BLINK_OPEN_AT: f64 = 126.0;
/// How long the mouth stays open after a press.
pub const MEOW_TICKS: f64 = 30.0;
/// Ear wiggle: tilted for EAR_WIGGLE_TICKS out of every EAR_WIGGLE_EVERY +
/// EAR_WIGGLE_TICKS.
pub const EAR_WIGGLE_EVERY: f64 = 180.0;
pub const EAR_WIGGLE_TICKS: f64 = 20.0;
pub const EAR_TILT: f64 = 0.15;

const BOB_AMPLITUDE: f64 = 5.0;
const BOB_PERIOD_MS: f64 = 1000.0;

// --- Patterns ----------------------------------------------------------------

const BODY_PALETTE: [Color; 2] = [ORANGE, WHITE];

// 1 = orange fur, 2 = white chest patch.
const BODY_PATTERN: [&[u8]; 7] = [
    &[0, 0, 1, 1, 1, 1, 0, 0],
    &[0, 1, 1, 1, 1, 1, 1, 0],
    &[1, 1, 1, 1, 1, 1, 1, 1],
    &[1, 1, 2, 2, 2, 2, 1, 1],
    &[1, 1, 2, 2, 2, 2, 1, 1],
    &[0, 1, 2, 2, 2, 2, 1, 0],
    &[0, 0, 1, 1, 1, 1, 0, 0],
];

const TAIL_PALETTE: [Color; 1] = [ORANGE];

const TAIL_PATTERN: [&[u8]; 5] = [
    &[1, 1],
    &[1, 1],
    &[1, 1],
    &[1, 1],
    &[1, 0],
];

/// Whisker line segments, local coordinates, three per side.
pub const WHISKERS: [((f64, f64), (f64, f64)); 6] = [
    ((2.0 * PX, 3.5 * PX), (0.0, 3.0 * PX)),
    ((2.0 * PX, 3.5 * PX), (0.0, 3.5 * PX)),
    ((2.0 * PX, 3.5 * PX), (0.0, 4.0 * PX)),
    ((6.0 * PX, 3.5 * PX), (8.0 * PX, 3.0 * PX)),
    ((6.0 * PX, 3.5 * PX), (8.0 * PX, 3.5 * PX)),
    ((6.0 * PX, 3.5 * PX), (8.0 * PX, 4.0 * PX)),
];

fn ears_sprite() -> Sprite {
    let mut s = Sprite::default();
    // Left ear
    s.push_cell(PX, 0.0, 2.0 * PX, PX, ORANGE);
    s.push_cell(0.0, -PX, 2.0 * PX, PX, ORANGE);
    // Right ear
    s.push_cell(5.0 * PX, 0.0, 2.0 * PX, PX, ORANGE);
    s.push_cell(6.0 * PX, -PX, 2.0 * PX, PX, ORANGE);
    // Inner ears (pink)
    s.push_cell(PX, -0.5 * PX, PX, PX, PINK);
    s.push_cell(6.0 * PX, -0.5 * PX, PX, PX, PINK);
    s
}

fn open_eyes(s: &mut Sprite) {
    // Eye whites with black pupils.
    s.push_cell(PX, PX, 2.0 * PX, 2.0 * PX, WHITE);
    s.push_cell(5.0 * PX, PX, 2.0 * PX, 2.0 * PX, WHITE);
    s.push_cell(2.0 * PX, 2.0 * PX, PX, PX, BLACK);
    s.push_cell(6.0 * PX, 2.0 * PX, PX, PX, BLACK);
}

fn nose(s: &mut Sprite) {
    s.push_cell(3.5 * PX, 3.0 * PX, PX, PX, PINK);
}

/// The face sprite for a given expression. Faces are whole-sprite swapped
/// (clear and redraw), never patched in place.
pub fn face_sprite(expression: Expression) -> Sprite {
    let mut s = Sprite::default();
    match expression {
        Expression::Normal => {
            open_eyes(&mut s);
            nose(&mut s);
        }
        Expression::Blinking => {
            // Thin closed-eye lines; no pupils, no whites.
            s.push_cell(PX, 2.0 * PX, 2.0 * PX, 1.0, BLACK);
            s.push_cell(5.0 * PX, 2.0 * PX, 2.0 * PX, 1.0, BLACK);
            nose(&mut s);
        }
        Expression::Meowing => {
            open_eyes(&mut s);
            nose(&mut s);
            // Open mouth below the nose.
            s.push_cell(3.0 * PX, 4.0 * PX, 2.0 * PX, 1.5 * PX, BLACK);
            s.push_cell(3.25 * PX, 4.75 * PX, 1.5 * PX, 0.75 * PX, PINK);
        }
        Expression::Happy => {
            // Upward-arc eyes, three short segments each.
            for base_x in [PX, 5.0 * PX] {
                s.push_cell(base_x, 2.0 * PX, 0.5 * PX, 2.0, BLACK);
                s.push_cell(base_x + 0.5 * PX, 1.5 * PX, PX, 2.0, BLACK);
                s.push_cell(base_x + 1.5 * PX, 2.0 * PX, 0.5 * PX, 2.0, BLACK);
            }
            nose(&mut s);
        }
    }
    s
}

// --- State -------------------------------------------------------------------

/// Face variant rendered this frame. Exactly one wins per frame, resolved in
/// the precedence order meow > blink > happy > normal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Expression {
    Normal,
    Blinking,
    Meowing,
    Happy,
}

/// Mutable mood/timer state, owned by the cat and touched only by `tick` and
/// the pointer-event handlers.
#[derive(Clone, Copy, Debug, Default)]
pub struct CatState {
    pub blink_timer: f64,
    pub meow_timer: f64,
    pub ear_timer: f64,
    pub is_blinking: bool,
    pub is_meowing: bool,
    pub is_wiggling_ears: bool,
    pub is_happy: bool,
}

pub struct Cat {
    /// Whole-cat transform; `y` bobs around `base_y`.
    pub node: Node,
    pub base_y: f64,
    pub state: CatState,
    pub expression: Expression,
    pub body: Sprite,
    pub face: Sprite,
    pub ears: Sprite,
    /// Ear tilt, toggled by the wiggle timer.
    pub ear_rotation: f64,
    pub tail: Sprite,
    /// Tail wag angle, recomputed every frame.
    pub tail_rotation: f64,
}

impl Cat {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            node: Node::at(x, y),
            base_y: y,
            state: CatState::default(),
            expression: Expression::Normal,
            body: build_pixel_sprite(&BODY_PATTERN, &BODY_PALETTE, PX),
            face: face_sprite(Expression::Normal),
            ears: ears_sprite(),
            ear_rotation: 0.0,
            tail: build_pixel_sprite(&TAIL_PATTERN, &TAIL_PALETTE, PX),
            tail_rotation: 0.0,
        }
    }

    /// Swap the face if the winning expression changed. Redraw-on-change only;
    /// the sprite is otherwise immutable.
    pub fn set_expression(&mut self, expression: Expression) {
        if self.expression != expression {
            self.expression = expression;
            self.face = face_sprite(expression);
        }
    }

    /// Pointer hit rectangle `(x, y, w, h)` in design space: the body extent
    /// expanded by a one-cell grab margin, with an extra cell on top for the
    /// ears and below for the bob travel. Anchored to `base_y` so the bob
    /// animation cannot make hover flicker.
    pub fn hit_rect(&self) -> (f64, f64, f64, f64) {
        let body_w = BODY_PATTERN[0].len() as f64 * PX;
        let body_h = BODY_PATTERN.len() as f64 * PX;
        (
            self.node.x - PX,
            self.base_y - 2.0 * PX,
            body_w + 2.0 * PX,
            body_h + 4.0 * PX,
        )
    }

    /// Pointer-down on the cat: enter the meow state from scratch.
    pub fn start_meow(&mut self) {
        self.state.is_meowing = true;
        self.state.meow_timer = 0.0;
    }

    fn resting_expression(&self) -> Expression {
        if self.state.is_happy {
            Expression::Happy
        } else {
            Expression::Normal
        }
    }
}

/// Advance the cat by one frame. `delta` is in tick units, `clock_ms` a
/// monotonic clock reading. Pure arithmetic; timers self-correct by reset.
pub fn tick(cat: &mut Cat, delta: f64, clock_ms: f64) {
    if cat.state.is_meowing {
        // Meowing suppresses blink processing for the frame.
        cat.state.meow_timer += delta;
        if cat.state.meow_timer > MEOW_TICKS {
            cat.state.is_meowing = false;
            cat.state.meow_timer = 0.0;
            cat.set_expression(cat.resting_expression());
        } else {
            cat.set_expression(Expression::Meowing);
        }
    } else {
        cat.state.blink_timer += delta;
        if cat.state.blink_timer > BLINK_OPEN_AT {
            cat.state.is_blinking = false;
            cat.state.blink_timer = 0.0;
            cat.set_expression(cat.resting_expression());
        } else if cat.state.blink_timer > BLINK_CLOSE_AT {
            cat.state.is_blinking = true;
            cat.set_expression(Expression::Blinking);
        } else {
            cat.set_expression(cat.resting_expression());
        }
    }

    // Ear wiggle runs on its own timer, independent of the face.
    cat.state.ear_timer += delta;
    if cat.state.ear_timer > EAR_WIGGLE_EVERY + EAR_WIGGLE_TICKS {
        cat.state.is_wiggling_ears = false;
        cat.state.ear_timer = 0.0;
        cat.ear_rotation = 0.0;
    } else if cat.state.ear_timer > EAR_WIGGLE_EVERY {
        cat.state.is_wiggling_ears = true;
        cat.ear_rotation = EAR_TILT;
    }

    // Continuous recompute: vertical bob and tail wag (livelier while happy).
    cat.node.y = cat.base_y + (clock_ms / BOB_PERIOD_MS).sin() * BOB_AMPLITUDE;
    cat.tail_rotation = if cat.state.is_happy {
        (clock_ms / 300.0).sin() * 0.35
    } else {
        (clock_ms / 500.0).sin() * 0.2
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_frames(cat: &mut Cat, frames: usize) {
        for f in 0..frames {
            tick(cat, 1.0, f as f64 * 16.0);
        }
    }

    #[test]
    fn fresh_cat_is_at_rest() {
        let cat = Cat::new(650.0, 480.0);
        assert!(!cat.state.is_blinking);
        assert!(!cat.state.is_meowing);
        assert!(!cat.state.is_happy);
        assert_eq!(cat.expression, Expression::Normal);
    }

    #[test]
    fn blink_cycle_closes_then_reopens() {
        let mut cat = Cat::new(650.0, 480.0);
        run_frames(&mut cat, 121);
        assert!(cat.state.is_blinking);
        assert_eq!(cat.expression, Expression::Blinking);
        assert_eq!(cat.face, face_sprite(Expression::Blinking));
        run_frames(&mut cat, 6);
        assert!(!cat.state.is_blinking);
        assert_eq!(cat.state.blink_timer, 0.0);
        assert_eq!(cat.expression, Expression::Normal);
        assert_eq!(cat.face, face_sprite(Expression::Normal));
    }

    #[test]
    fn meow_wins_over_a_due_blink() {
        let mut cat = Cat::new(650.0, 480.0);
        cat.state.blink_timer = 125.0;
        cat.start_meow();
        tick(&mut cat, 1.0, 0.0);
        assert_eq!(cat.expression, Expression::Meowing);
        // Blink timer untouched while meowing.
        assert_eq!(cat.state.blink_timer, 125.0);
    }

    #[test]
    fn meow_expires_back_to_rest() {
        let mut cat = Cat::new(650.0, 480.0);
        cat.start_meow();
        for f in 0..31 {
            tick(&mut cat, 1.0, f as f64 * 16.0);
        }
        assert!(!cat.state.is_meowing);
        assert_eq!(cat.state.meow_timer, 0.0);
        assert_eq!(cat.expression, Expression::Normal);
    }

    #[test]
    fn happy_overlay_applies_only_at_rest() {
        let mut cat = Cat::new(650.0, 480.0);
        cat.state.is_happy = true;
        tick(&mut cat, 1.0, 0.0);
        assert_eq!(cat.expression, Expression::Happy);
        // A blink suppresses the happy face until it completes.
        cat.state.blink_timer = 121.0;
        tick(&mut cat, 1.0, 16.0);
        assert_eq!(cat.expression, Expression::Blinking);
    }

    #[test]
    fn ear_wiggle_tilts_and_resets() {
        let mut cat = Cat::new(650.0, 480.0);
        run_frames(&mut cat, 181);
        assert!(cat.state.is_wiggling_ears);
        assert_eq!(cat.ear_rotation, EAR_TILT);
        run_frames(&mut cat, 20);
        assert!(!cat.state.is_wiggling_ears);
        assert_eq!(cat.ear_rotation, 0.0);
        assert_eq!(cat.state.ear_timer, 0.0);
    }

    #[test]
    fn hit_rect_encloses_body_and_ears() {
        let cat = Cat::new(650.0, 480.0);
        let (x, y, w, h) = cat.hit_rect();
        for cell in cat.body.cells.iter().chain(cat.ears.cells.iter()) {
            assert!(cat.node.x + cell.x >= x);
            assert!(cat.node.x + cell.x + cell.w <= x + w);
            assert!(cat.base_y + cell.y >= y);
            assert!(cat.base_y + cell.y + cell.h <= y + h);
        }
    }

    #[test]
    fn bob_recomputes_from_clock() {
        let mut cat = Cat::new(650.0, 480.0);
        tick(&mut cat, 1.0, 0.0);
        assert_eq!(cat.node.y, 480.0);
        tick(&mut cat, 1.0, 1570.8); // ~pi/2 * 1000
        assert!((cat.node.y - 485.0).abs() < 0.01);
    }
}
