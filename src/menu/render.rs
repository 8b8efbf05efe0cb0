//! Canvas renderer: pushes the design-space scene model onto a
//! `CanvasRenderingContext2d` each frame, in z-order (background, particles,
//! scenery, ground cover, cat, title text, buttons), applying the viewport
//! `Layout` once via a context transform.

use web_sys::CanvasRenderingContext2d;

use crate::cat::{Cat, WHISKERS};
use crate::scene::{css_color, Button, Layout, MenuScene, Sprite, TextNode, Viewport, PARTICLE_SIZE};

pub fn draw(ctx: &CanvasRenderingContext2d, viewport: Viewport, scene: &MenuScene, layout: &Layout) {
    // Letterbox bars outside the design rect.
    ctx.set_fill_style_str("#101018");
    ctx.fill_rect(0.0, 0.0, viewport.width, viewport.height);

    ctx.save();
    ctx.translate(layout.offset_x, layout.offset_y).ok();
    ctx.scale(layout.scale, layout.scale).ok();

    draw_sprite(ctx, &scene.background, 0.0, 0.0);

    ctx.set_fill_style_str("#ffffff");
    for p in &scene.particles {
        ctx.set_global_alpha(p.alpha);
        ctx.fill_rect(p.x, p.y, PARTICLE_SIZE, PARTICLE_SIZE);
    }
    ctx.set_global_alpha(1.0);

    for tree in &scene.trees {
        ctx.save();
        // Sway around the trunk base.
        ctx.translate(tree.node.x + tree.pivot.0, tree.node.y + tree.pivot.1).ok();
        ctx.rotate(tree.node.rotation).ok();
        draw_sprite(ctx, &tree.sprite, -tree.pivot.0, -tree.pivot.1);
        ctx.restore();
    }

    for fence in &scene.fences {
        draw_sprite(ctx, &scene.fence_sprite, fence.x, fence.y);
    }

    draw_sprite(ctx, &scene.grass, 0.0, 0.0);

    draw_cat(ctx, &scene.cat);

    draw_text(ctx, &scene.title, 6.0);
    draw_text(ctx, &scene.subtitle, 4.0);

    for button in &scene.buttons {
        draw_button(ctx, button);
    }

    ctx.restore();
}

fn draw_sprite(ctx: &CanvasRenderingContext2d, sprite: &Sprite, x: f64, y: f64) {
    for cell in &sprite.cells {
        ctx.set_fill_style_str(&css_color(cell.color));
        ctx.fill_rect(x + cell.x, y + cell.y, cell.w, cell.h);
    }
}

fn draw_cat(ctx: &CanvasRenderingContext2d, cat: &Cat) {
    ctx.save();
    ctx.translate(cat.node.x, cat.node.y).ok();

    // Tail wags behind the body, pivot at its top-left.
    ctx.save();
    ctx.translate(-4.0, 10.0).ok();
    ctx.rotate(cat.tail_rotation).ok();
    draw_sprite(ctx, &cat.tail, 0.0, 0.0);
    ctx.restore();

    draw_sprite(ctx, &cat.body, 0.0, 0.0);
    draw_sprite(ctx, &cat.face, 0.0, 0.0);

    // Ears tilt around the top of the head.
    ctx.save();
    ctx.translate(16.0, 0.0).ok();
    ctx.rotate(cat.ear_rotation).ok();
    draw_sprite(ctx, &cat.ears, -16.0, 0.0);
    ctx.restore();

    ctx.set_stroke_style_str("#ffffff");
    ctx.set_line_width(1.0);
    for &((x1, y1), (x2, y2)) in WHISKERS.iter() {
        ctx.begin_path();
        ctx.move_to(x1, y1);
        ctx.line_to(x2, y2);
        ctx.stroke();
    }

    ctx.restore();
}

fn draw_text(ctx: &CanvasRenderingContext2d, text: &TextNode, stroke_width: f64) {
    ctx.set_global_alpha(text.node.alpha);
    ctx.set_font(&format!(
        "{}px 'Press Start 2P', 'Courier New', monospace",
        text.font_size
    ));
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    // Layered stroke + fill for the retro outline.
    ctx.set_line_width(stroke_width);
    ctx.set_stroke_style_str("#000000");
    ctx.stroke_text(text.text, text.node.x, text.node.y).ok();
    ctx.set_fill_style_str(&css_color(text.fill));
    ctx.fill_text(text.text, text.node.x, text.node.y).ok();
    ctx.set_global_alpha(1.0);
}

fn draw_button(ctx: &CanvasRenderingContext2d, button: &Button) {
    ctx.save();
    // Pulse scales around the button centre.
    let cx = button.node.x + button.width / 2.0;
    let cy = button.node.y + button.height / 2.0;
    ctx.translate(cx, cy).ok();
    ctx.scale(button.node.scale, button.node.scale).ok();

    let left = -button.width / 2.0;
    let top = -button.height / 2.0;
    ctx.set_fill_style_str(&css_color(button.fill));
    ctx.fill_rect(left, top, button.width, button.height);
    ctx.set_stroke_style_str("#000000");
    ctx.set_line_width(2.0);
    ctx.stroke_rect(left, top, button.width, button.height);

    // Translucent shine over the top half.
    ctx.set_global_alpha(button.shine_alpha);
    ctx.set_fill_style_str("#ffffff");
    ctx.fill_rect(left, top, button.width, button.height / 2.0);
    ctx.set_global_alpha(1.0);

    ctx.set_font("20px 'Press Start 2P', 'Courier New', monospace");
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_line_width(4.0);
    ctx.set_stroke_style_str("#000000");
    ctx.stroke_text(button.label, 0.0, 0.0).ok();
    ctx.set_fill_style_str(&css_color(button.label_color));
    ctx.fill_text(button.label, 0.0, 0.0).ok();

    ctx.restore();
}
