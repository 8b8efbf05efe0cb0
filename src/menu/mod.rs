//! Menu host wiring: canvas creation, DOM overlays, pointer/resize listeners
//! and the requestAnimationFrame loop. Everything stateful lives in a
//! thread-local cell; the browser's callbacks run to completion one at a
//! time, so no further synchronization is needed.

pub mod anim;
pub mod audio;
pub mod cat;
pub mod event;
mod render;
pub mod scene;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{window, CanvasRenderingContext2d, HtmlCanvasElement, Window};

use self::audio::{AudioCueManager, WebCueBackend};
use self::event::{HoverTracker, MenuEvent};
use self::scene::{Layout, Lcg, MenuScene, Viewport};

struct MenuState {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    scene: MenuScene,
    layout: Layout,
    viewport: Viewport,
    dpr: f64,
    audio: AudioCueManager<WebCueBackend>,
    hover: HoverTracker,
    last_frame_ms: f64,
}

thread_local! {
    static MENU_STATE: RefCell<Option<MenuState>> = RefCell::new(None);
}

/// One frame at the nominal ~60 Hz callback rate, in milliseconds. Deltas are
/// converted to tick units against this so the timer thresholds keep their
/// original per-frame tuning.
const TICK_MS: f64 = 1000.0 / 60.0;

fn css_viewport(win: &Window) -> Result<Viewport, JsValue> {
    let width = win.inner_width()?.as_f64().unwrap_or(crate::DESIGN_WIDTH);
    let height = win.inner_height()?.as_f64().unwrap_or(crate::DESIGN_HEIGHT);
    Ok(Viewport { width, height })
}

fn size_canvas(canvas: &HtmlCanvasElement, viewport: Viewport, dpr: f64) {
    canvas.set_width((viewport.width * dpr) as u32);
    canvas.set_height((viewport.height * dpr) as u32);
}

pub fn start_menu() -> Result<(), JsValue> {
    let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
    let doc = win
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    // Create / reuse the fullscreen menu canvas.
    let canvas: HtmlCanvasElement = if let Some(el) = doc.get_element_by_id("wq-menu-canvas") {
        el.dyn_into()?
    } else {
        let c: HtmlCanvasElement = doc.create_element("canvas")?.dyn_into()?;
        c.set_id("wq-menu-canvas");
        c.set_attribute(
            "style",
            "position:fixed; left:0; top:0; width:100vw; height:100vh; display:block; background:#101018; image-rendering:pixelated; z-index:10;",
        )
        .ok();
        doc.body()
            .ok_or_else(|| JsValue::from_str("no body"))?
            .append_child(&c)?;
        c
    };

    let viewport = css_viewport(&win)?;
    let dpr = win.device_pixel_ratio();
    size_canvas(&canvas, viewport, dpr);
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("no 2d context"))?
        .dyn_into()?;

    let now = win.performance().map(|p| p.now()).unwrap_or(0.0);
    let state = MenuState {
        canvas: canvas.clone(),
        ctx,
        scene: MenuScene::build(Lcg::new(now.to_bits())),
        layout: Layout::fit(viewport),
        viewport,
        dpr,
        audio: AudioCueManager::new(WebCueBackend::new()?),
        hover: HoverTracker::default(),
        last_frame_ms: now,
    };
    MENU_STATE.with(|cell| cell.replace(Some(state)));

    install_sound_control(&doc)?;

    // First user gesture unlocks audio playback; start the ambient track then.
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            MENU_STATE.with(|cell| {
                if let Some(st) = cell.borrow_mut().as_mut() {
                    st.audio.start_ambient();
                }
            });
        }) as Box<dyn FnMut(_)>);
        let opts = web_sys::AddEventListenerOptions::new();
        opts.set_once(true);
        win.add_event_listener_with_callback_and_add_event_listener_options(
            "click",
            closure.as_ref().unchecked_ref(),
            &opts,
        )?;
        closure.forget();
    }

    // Pointer tracking on the canvas: reduce raw moves to enter/leave events.
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            let x = evt.offset_x() as f64;
            let y = evt.offset_y() as f64;
            MENU_STATE.with(|cell| {
                if let Some(st) = cell.borrow_mut().as_mut() {
                    let (dx, dy) = st.layout.to_design(x, y);
                    for ev in st.hover.moved(&st.scene, dx, dy) {
                        event::handle_event(&mut st.scene, &mut st.audio, ev);
                    }
                }
            });
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::MouseEvent| {
            MENU_STATE.with(|cell| {
                if let Some(st) = cell.borrow_mut().as_mut() {
                    for ev in st.hover.left() {
                        event::handle_event(&mut st.scene, &mut st.audio, ev);
                    }
                }
            });
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("mouseleave", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            let x = evt.offset_x() as f64;
            let y = evt.offset_y() as f64;
            MENU_STATE.with(|cell| {
                if let Some(st) = cell.borrow_mut().as_mut() {
                    let (dx, dy) = st.layout.to_design(x, y);
                    if let Some(target) = st.scene.hit_test(dx, dy) {
                        event::handle_event(
                            &mut st.scene,
                            &mut st.audio,
                            MenuEvent::PointerDown(target),
                        );
                    }
                }
            });
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    // Resize re-fits the layout; the scene itself is never rebuilt.
    {
        let closure = Closure::wrap(Box::new(move |_evt: web_sys::Event| {
            if let Some(win) = window() {
                let viewport = match css_viewport(&win) {
                    Ok(v) => v,
                    Err(_) => return,
                };
                let dpr = win.device_pixel_ratio();
                MENU_STATE.with(|cell| {
                    if let Some(st) = cell.borrow_mut().as_mut() {
                        st.viewport = viewport;
                        st.dpr = dpr;
                        size_canvas(&st.canvas, viewport, dpr);
                        st.layout = Layout::fit(viewport);
                    }
                });
            }
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    start_menu_loop();
    Ok(())
}

/// DOM mute toggle button; its `muted` class tracks the manager state so CSS
/// can swap the icon.
fn install_sound_control(doc: &web_sys::Document) -> Result<(), JsValue> {
    if doc.get_element_by_id("wq-sound-control").is_some() {
        return Ok(());
    }
    let body = doc.body().ok_or_else(|| JsValue::from_str("no body"))?;
    let el = doc.create_element("div")?;
    el.set_id("wq-sound-control");
    el.set_text_content(Some("\u{1F50A}"));
    el.set_attribute(
        "style",
        "position:fixed; top:12px; right:14px; font-size:22px; cursor:pointer; user-select:none; padding:4px 8px; background:rgba(0,0,0,0.35); border:1px solid #333; border-radius:6px; z-index:30;",
    )
    .ok();
    body.append_child(&el)?;

    let control = el.clone();
    let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
        // Keep the toggle from counting as the one-shot unlock gesture.
        evt.stop_propagation();
        let muted = MENU_STATE.with(|cell| {
            cell.borrow_mut()
                .as_mut()
                .map(|st| st.audio.toggle_mute())
                .unwrap_or(false)
        });
        control.class_list().toggle_with_force("muted", muted).ok();
    }) as Box<dyn FnMut(_)>);
    el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_menu_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        MENU_STATE.with(|cell| {
            if let Some(state) = cell.borrow_mut().as_mut() {
                menu_tick(state, ts);
            }
        });
        if let Some(w) = window() {
            let _ = w.request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut(f64)>));
    if let Some(w) = window() {
        let _ = w.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref());
    }
}

fn menu_tick(state: &mut MenuState, now: f64) {
    // Delta in tick units; clamped so a backgrounded tab does not fast-forward
    // the timers when frames resume.
    let delta = ((now - state.last_frame_ms) / TICK_MS).clamp(0.0, 4.0);
    state.last_frame_ms = now;

    anim::tick(&mut state.scene, delta, now);

    // Device-pixel base transform, then the fit layout inside `draw`.
    state
        .ctx
        .set_transform(state.dpr, 0.0, 0.0, state.dpr, 0.0, 0.0)
        .ok();
    render::draw(&state.ctx, state.viewport, &state.scene, &state.layout);
}
