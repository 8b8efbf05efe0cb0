//! Scene compositor: turns small integer pixel patterns into sets of filled
//! unit-cell rectangles and assembles them (with particles, scenery, text and
//! buttons) into the menu scene. Everything here is browser-free design-space
//! data; `menu::render` is what pushes it onto a canvas.

use crate::cat::Cat;
use crate::{DESIGN_HEIGHT, DESIGN_WIDTH};

/// Packed 0xRRGGBB color, matching the hex literals used throughout the
/// pattern tables.
pub type Color = u32;

/// Converts a packed color to a CSS hex string for canvas fill styles.
pub fn css_color(c: Color) -> String {
    format!("#{:06x}", c & 0xFF_FF_FF)
}

// --- Pixel sprites -----------------------------------------------------------

/// One filled rectangle of a sprite, in local design-space pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
    pub color: Color,
}

/// An ordered set of colored cells. Immutable once built except for explicit
/// whole-sprite replacement (used to swap the cat's face).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sprite {
    pub cells: Vec<Cell>,
}

impl Sprite {
    pub fn push_cell(&mut self, x: f64, y: f64, w: f64, h: f64, color: Color) {
        self.cells.push(Cell { x, y, w, h, color });
    }
}

/// Builds a sprite from a 2D pattern of palette indices. Index 0 draws
/// nothing; index `i > 0` maps to `palette[i - 1]`.
///
/// An index beyond the palette is a programming-contract violation and
/// panics (slice indexing); patterns are compile-time tables, so this is a
/// development-time failure, not a runtime condition to recover from.
pub fn build_pixel_sprite(pattern: &[&[u8]], palette: &[Color], cell_size: f64) -> Sprite {
    let mut sprite = Sprite::default();
    for (row, cols) in pattern.iter().enumerate() {
        for (col, &idx) in cols.iter().enumerate() {
            if idx == 0 {
                continue;
            }
            sprite.push_cell(
                col as f64 * cell_size,
                row as f64 * cell_size,
                cell_size,
                cell_size,
                palette[(idx - 1) as usize],
            );
        }
    }
    sprite
}

// --- Transforms & layout -----------------------------------------------------

/// Per-element transform: design-space position plus rotation / scale / alpha.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    pub scale: f64,
    pub alpha: f64,
}

impl Node {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            rotation: 0.0,
            scale: 1.0,
            alpha: 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Uniform fit of the 800x600 design space into a viewport, aspect ratio
/// preserved and centred. Pure function of the viewport, so recomputing on
/// resize is idempotent and never touches scene state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Layout {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Layout {
    pub fn fit(viewport: Viewport) -> Self {
        let scale = (viewport.width / DESIGN_WIDTH)
            .min(viewport.height / DESIGN_HEIGHT)
            .min(1.0);
        Self {
            scale,
            offset_x: (viewport.width - DESIGN_WIDTH * scale) / 2.0,
            offset_y: (viewport.height - DESIGN_HEIGHT * scale) / 2.0,
        }
    }

    /// Screen (canvas) coordinates of a design-space point.
    pub fn to_screen(&self, x: f64, y: f64) -> (f64, f64) {
        (x * self.scale + self.offset_x, y * self.scale + self.offset_y)
    }

    /// Design-space coordinates of a screen point (pointer events).
    pub fn to_design(&self, x: f64, y: f64) -> (f64, f64) {
        ((x - self.offset_x) / self.scale, (y - self.offset_y) / self.scale)
    }
}

// --- Prototype randomness ----------------------------------------------------

/// Linear congruential generator (not crypto secure). Seeded once from
/// `performance.now()` by the host; an explicit value rather than ambient
/// state so particle construction is deterministic under test.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed | 1)
    }

    fn next_u32(&mut self) -> u32 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.0 >> 33) as u32
    }

    /// Uniform-ish f64 in [0, 1).
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / f64::from(u32::MAX) * 0.999_999
    }

    /// Uniform-ish f64 in [lo, hi).
    pub fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    /// Uniform-ish index in [0, len).
    pub fn index(&mut self, len: usize) -> usize {
        (self.next_f64() * len as f64) as usize
    }
}

// --- Particles ---------------------------------------------------------------

/// A 2x2 white speck drifting upward; wraps to the bottom with a fresh random
/// x when it leaves the top edge.
#[derive(Clone, Copy, Debug)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub alpha: f64,
    pub velocity: f64,
}

pub const PARTICLE_COUNT: usize = 50;
pub const PARTICLE_SIZE: f64 = 2.0;

pub fn build_particle_field(count: usize, bounds: Viewport, rng: &mut Lcg) -> Vec<Particle> {
    (0..count)
        .map(|_| Particle {
            x: rng.range(0.0, bounds.width),
            y: rng.range(0.0, bounds.height),
            alpha: rng.range(0.0, 0.5),
            velocity: rng.range(0.1, 0.6),
        })
        .collect()
}

// --- Buttons -----------------------------------------------------------------

pub const BUTTON_WIDTH: f64 = 250.0;
pub const BUTTON_HEIGHT: f64 = 40.0;
pub const BUTTON_FILL: Color = 0x4169E1;
pub const BUTTON_FILL_HOVER: Color = 0x5179F1;
pub const BUTTON_LABEL: Color = 0xFFFFFF;
pub const BUTTON_LABEL_HOVER: Color = 0xFFFF00;
pub const BUTTON_SHINE_ALPHA: f64 = 0.3;
pub const BUTTON_SHINE_ALPHA_HOVER: f64 = 0.4;

const BUTTON_LABELS: [&str; 4] = ["START GAME", "OPTIONS", "CREDITS", "EXIT"];
const BUTTON_FIRST_Y: f64 = 300.0;
const BUTTON_SPACING: f64 = 60.0;

/// A menu button: filled body, translucent top-half shine, centred label.
/// Hover state drives tint / label color / pulse scale; pressing only fires
/// the click cue (there is no screen to navigate to yet).
#[derive(Clone, Debug)]
pub struct Button {
    pub label: &'static str,
    pub node: Node,
    pub width: f64,
    pub height: f64,
    pub fill: Color,
    pub label_color: Color,
    pub shine_alpha: f64,
    pub hovered: bool,
}

pub fn build_menu_buttons() -> Vec<Button> {
    BUTTON_LABELS
        .iter()
        .enumerate()
        .map(|(i, label)| Button {
            label,
            node: Node::at(
                (DESIGN_WIDTH - BUTTON_WIDTH) / 2.0,
                BUTTON_FIRST_Y + i as f64 * BUTTON_SPACING,
            ),
            width: BUTTON_WIDTH,
            height: BUTTON_HEIGHT,
            fill: BUTTON_FILL,
            label_color: BUTTON_LABEL,
            shine_alpha: BUTTON_SHINE_ALPHA,
            hovered: false,
        })
        .collect()
}

// --- Scenery -----------------------------------------------------------------

const PX: f64 = 4.0;

const LEAF_PALETTE: [Color; 3] = [0x2E8B57, 0x228B22, 0x006400];
const TRUNK: Color = 0x8B4513;
const TRUNK_SHADE: Color = 0x654321;

const LEAF_PATTERN: [&[u8]; 7] = [
    &[0, 0, 0, 1, 1, 0, 0, 0],
    &[0, 0, 1, 2, 2, 1, 0, 0],
    &[0, 1, 2, 2, 2, 2, 1, 0],
    &[1, 2, 2, 2, 2, 2, 2, 1],
    &[0, 0, 1, 2, 2, 1, 0, 0],
    &[0, 1, 2, 2, 2, 2, 1, 0],
    &[1, 2, 2, 2, 2, 2, 2, 1],
];

/// A tree sways around its trunk base with a per-tree phase offset.
#[derive(Clone, Debug)]
pub struct Tree {
    pub node: Node,
    pub sprite: Sprite,
    pub sway_phase: f64,
    /// Local pivot the sway rotation is applied around (trunk base).
    pub pivot: (f64, f64),
}

pub fn build_tree(x: f64, y: f64, sway_phase: f64) -> Tree {
    let mut sprite = build_pixel_sprite(&LEAF_PATTERN, &LEAF_PALETTE, PX);
    // Trunk below the canopy, with a darker shading stripe.
    sprite.push_cell(3.0 * PX, 7.0 * PX, 2.0 * PX, 4.0 * PX, TRUNK);
    sprite.push_cell(4.0 * PX, 7.0 * PX, PX, 4.0 * PX, TRUNK_SHADE);
    Tree {
        node: Node::at(x, y),
        sprite,
        sway_phase,
        pivot: (4.0 * PX, 11.0 * PX),
    }
}

const FENCE: Color = 0xDEB887;
const FENCE_SHADE: Color = 0xD2B48C;

/// One fence segment: four posts joined by two horizontal planks, each with a
/// shading stripe. Placed every 100 design px along the bottom of the scene.
pub fn build_fence_sprite() -> Sprite {
    let mut sprite = Sprite::default();
    for i in 0..4 {
        let px = i as f64 * 6.0 * PX;
        // Vertical post with shading
        sprite.push_cell(px, 0.0, PX, 6.0 * PX, FENCE);
        sprite.push_cell(px + PX, 0.0, PX / 2.0, 6.0 * PX, FENCE_SHADE);
        // Top horizontal plank with shading
        sprite.push_cell(px, PX, 6.0 * PX, PX, FENCE);
        sprite.push_cell(px, PX + PX / 2.0, 6.0 * PX, PX / 2.0, FENCE_SHADE);
        // Bottom horizontal plank with shading
        sprite.push_cell(px, 4.0 * PX, 6.0 * PX, PX, FENCE);
        sprite.push_cell(px, 4.0 * PX + PX / 2.0, 6.0 * PX, PX / 2.0, FENCE_SHADE);
    }
    sprite
}

const GRASS_SHADES: [Color; 3] = [0x90EE90, 0x98FB98, 0x32CD32];

/// Grass strip along the bottom edge: column height follows a sine profile,
/// shade per cell chosen at build time (static thereafter).
pub fn build_grass(rng: &mut Lcg) -> Sprite {
    let mut sprite = Sprite::default();
    let cols = (DESIGN_WIDTH / PX) as usize;
    for x in 0..cols {
        let height = (10.0 + (x as f64 * 0.5).sin() * 5.0) as usize;
        for y in 0..height {
            let shade = GRASS_SHADES[rng.index(GRASS_SHADES.len())];
            sprite.push_cell(
                x as f64 * PX,
                DESIGN_HEIGHT - (y as f64 + 1.0) * PX,
                PX,
                PX,
                shade,
            );
        }
    }
    sprite
}

const SKY: Color = 0x87CEEB;
const SKY_LOWER: Color = 0x6CA6CD;

fn build_background() -> Sprite {
    let mut sprite = Sprite::default();
    sprite.push_cell(0.0, 0.0, DESIGN_WIDTH, DESIGN_HEIGHT, SKY);
    sprite.push_cell(0.0, DESIGN_HEIGHT / 2.0, DESIGN_WIDTH, DESIGN_HEIGHT / 2.0, SKY_LOWER);
    sprite
}

// --- Text --------------------------------------------------------------------

/// A centred text element: title and subtitle. Title alpha is oscillated per
/// frame for the glow effect; subtitles keep alpha 1.
#[derive(Clone, Debug)]
pub struct TextNode {
    pub text: &'static str,
    pub node: Node,
    pub font_size: f64,
    pub fill: Color,
}

// --- The assembled scene -----------------------------------------------------

/// Which interactive element a pointer position maps to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTarget {
    Button(usize),
    Cat,
}

/// The whole menu scene in design space. Built once; the per-frame scheduler
/// mutates transforms and the cat's face, but the set of elements never
/// changes (resize only re-fits the `Layout`).
pub struct MenuScene {
    pub background: Sprite,
    pub particles: Vec<Particle>,
    pub trees: Vec<Tree>,
    pub fences: Vec<Node>,
    pub fence_sprite: Sprite,
    pub grass: Sprite,
    pub title: TextNode,
    pub subtitle: TextNode,
    pub buttons: Vec<Button>,
    pub cat: Cat,
    pub rng: Lcg,
}

impl MenuScene {
    pub fn build(mut rng: Lcg) -> Self {
        let design = Viewport {
            width: DESIGN_WIDTH,
            height: DESIGN_HEIGHT,
        };
        let particles = build_particle_field(PARTICLE_COUNT, design, &mut rng);
        let trees = [
            (150.0, DESIGN_HEIGHT - 180.0),
            (400.0, DESIGN_HEIGHT - 200.0),
            (600.0, DESIGN_HEIGHT - 190.0),
            (750.0, DESIGN_HEIGHT - 185.0),
        ]
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| build_tree(x, y, i as f64))
        .collect();
        let mut fences = Vec::new();
        let mut fx = 0.0;
        while fx < DESIGN_WIDTH {
            fences.push(Node::at(fx, DESIGN_HEIGHT - 80.0));
            fx += 100.0;
        }
        let grass = build_grass(&mut rng);
        Self {
            background: build_background(),
            particles,
            trees,
            fences,
            fence_sprite: build_fence_sprite(),
            grass,
            title: TextNode {
                text: "WHISKER QUEST",
                node: Node::at(DESIGN_WIDTH / 2.0, 120.0),
                font_size: 48.0,
                fill: 0xFFD700,
            },
            subtitle: TextNode {
                text: "A NEIGHBORHOOD GARDENS",
                node: Node::at(DESIGN_WIDTH / 2.0, 200.0),
                font_size: 16.0,
                fill: 0xFFFFFF,
            },
            buttons: build_menu_buttons(),
            cat: Cat::new(DESIGN_WIDTH - 150.0, DESIGN_HEIGHT - 120.0),
            rng,
        }
    }

    /// Maps a design-space pointer position to the interactive element under
    /// it, buttons first (they sit above the cat in z-order).
    pub fn hit_test(&self, x: f64, y: f64) -> Option<HitTarget> {
        for (i, b) in self.buttons.iter().enumerate() {
            if x >= b.node.x && x < b.node.x + b.width && y >= b.node.y && y < b.node.y + b.height {
                return Some(HitTarget::Button(i));
            }
        }
        let (cx, cy, cw, ch) = self.cat.hit_rect();
        if x >= cx && x < cx + cw && y >= cy && y < cy + ch {
            return Some(HitTarget::Cat);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lcg_range_stays_in_bounds() {
        let mut rng = Lcg::new(12345);
        for _ in 0..1000 {
            let v = rng.range(0.1, 0.6);
            assert!((0.1..0.6).contains(&v), "out of range: {v}");
        }
    }

    #[test]
    fn lcg_index_stays_in_bounds() {
        let mut rng = Lcg::new(5);
        for _ in 0..1000 {
            assert!(rng.index(3) < 3);
        }
        assert_eq!(rng.index(1), 0);
    }

    #[test]
    fn pixel_sprite_skips_index_zero() {
        let pattern: [&[u8]; 2] = [&[0, 1], &[2, 0]];
        let sprite = build_pixel_sprite(&pattern, &[0xFF0000, 0x00FF00], 4.0);
        assert_eq!(sprite.cells.len(), 2);
        assert_eq!(sprite.cells[0].x, 4.0);
        assert_eq!(sprite.cells[0].color, 0xFF0000);
        assert_eq!(sprite.cells[1].y, 4.0);
        assert_eq!(sprite.cells[1].color, 0x00FF00);
    }

    #[test]
    fn layout_fit_is_idempotent_and_centred() {
        let vp = Viewport {
            width: 1000.0,
            height: 600.0,
        };
        let a = Layout::fit(vp);
        let b = Layout::fit(vp);
        assert_eq!(a, b);
        // 800x600 fits at scale 1 with 100px horizontal bars.
        assert_eq!(a.scale, 1.0);
        assert_eq!(a.offset_x, 100.0);
        assert_eq!(a.offset_y, 0.0);
    }

    #[test]
    fn layout_round_trips_pointer_coordinates() {
        let layout = Layout::fit(Viewport {
            width: 400.0,
            height: 300.0,
        });
        let (sx, sy) = layout.to_screen(275.0, 300.0);
        let (dx, dy) = layout.to_design(sx, sy);
        assert!((dx - 275.0).abs() < 1e-9);
        assert!((dy - 300.0).abs() < 1e-9);
    }

    #[test]
    fn hit_test_finds_buttons_and_cat() {
        let scene = MenuScene::build(Lcg::new(7));
        assert_eq!(scene.hit_test(400.0, 310.0), Some(HitTarget::Button(0)));
        assert_eq!(scene.hit_test(400.0, 490.0), Some(HitTarget::Button(3)));
        assert_eq!(scene.hit_test(660.0, 490.0), Some(HitTarget::Cat));
        assert_eq!(scene.hit_test(10.0, 10.0), None);
    }
}
