use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, HtmlImageElement, MouseEvent, TouchEvent, TouchList, WheelEvent, Window};
use yew::prelude::*;

use crate::config::GameConfig;
use crate::game::{Game, InputEvent, PointerKind};
use crate::model::{Point, Size};
use crate::runtime::GameRuntime;
use crate::state::mapper::Layout;
use crate::util::{cwarn, random};

use super::{
    completion_overlay::CompletionOverlay, confetti_layer::ConfettiLayer,
    intro_overlay::IntroOverlay, progress_ring::ProgressRing, status_banner::StatusBanner,
    zoom_controls::ZoomControls,
};

#[derive(Properties, PartialEq, Clone)]
pub struct GameViewProps {
    pub config: GameConfig,
}

fn measure_layout(container: &HtmlElement, image: &HtmlImageElement) -> Layout {
    let rect = container.get_bounding_client_rect();
    let window_size = web_sys::window()
        .map(|w| {
            let width = w.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(800.0);
            let height = w.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(600.0);
            Size::new(width, height)
        })
        .unwrap_or(Size::new(800.0, 600.0));
    Layout {
        container_origin: Point::new(rect.left(), rect.top()),
        container_size: Size::new(container.client_width() as f64, container.client_height() as f64),
        // clientWidth/Height ignore CSS transforms: this is the unzoomed size
        display_size: Size::new(image.client_width() as f64, image.client_height() as f64),
        original_size: Size::ZERO,
        window_size,
    }
}

fn touch_point(touches: &TouchList, i: u32) -> Option<Point> {
    touches
        .item(i)
        .map(|t| Point::new(t.client_x() as f64, t.client_y() as f64))
}

fn mouse_point(e: &MouseEvent) -> Point {
    Point::new(e.client_x() as f64, e.client_y() as f64)
}

/// Wires DOM input to the runtime; the returned closure detaches it again.
fn attach_listeners(
    runtime: Rc<GameRuntime>,
    window: Window,
    container: HtmlElement,
    remeasure: Rc<dyn Fn()>,
) -> impl FnOnce() {
    let mousedown_cb = {
        let rt = runtime.clone();
        Closure::wrap(Box::new(move |e: MouseEvent| {
            e.prevent_default();
            let at = mouse_point(&e);
            match e.button() {
                0 => rt.dispatch(InputEvent::PointerDown {
                    at,
                    kind: PointerKind::Mouse,
                }),
                1 | 2 => rt.dispatch(InputEvent::PanStart { at }),
                _ => {}
            }
        }) as Box<dyn FnMut(_)>)
    };
    container
        .add_event_listener_with_callback("mousedown", mousedown_cb.as_ref().unchecked_ref())
        .ok();
    let mousemove_cb = {
        let rt = runtime.clone();
        Closure::wrap(Box::new(move |e: MouseEvent| {
            rt.dispatch(InputEvent::PointerMove { at: mouse_point(&e) });
        }) as Box<dyn FnMut(_)>)
    };
    container
        .add_event_listener_with_callback("mousemove", mousemove_cb.as_ref().unchecked_ref())
        .ok();
    let mouseup_cb = {
        let rt = runtime.clone();
        Closure::wrap(Box::new(move |_e: MouseEvent| {
            rt.dispatch(InputEvent::PointerUp);
        }) as Box<dyn FnMut(_)>)
    };
    window
        .add_event_listener_with_callback("mouseup", mouseup_cb.as_ref().unchecked_ref())
        .ok();
    let mouseleave_cb = {
        let rt = runtime.clone();
        Closure::wrap(Box::new(move |_e: MouseEvent| {
            rt.dispatch(InputEvent::PointerLeave);
        }) as Box<dyn FnMut(_)>)
    };
    container
        .add_event_listener_with_callback("mouseleave", mouseleave_cb.as_ref().unchecked_ref())
        .ok();
    let wheel_cb = {
        let rt = runtime.clone();
        Closure::wrap(Box::new(move |e: WheelEvent| {
            e.prevent_default();
            rt.dispatch(InputEvent::Wheel {
                at: Point::new(e.client_x() as f64, e.client_y() as f64),
                delta_y: e.delta_y(),
            });
        }) as Box<dyn FnMut(_)>)
    };
    container
        .add_event_listener_with_callback("wheel", wheel_cb.as_ref().unchecked_ref())
        .ok();
    let contextmenu_cb = {
        Closure::wrap(Box::new(move |e: web_sys::Event| {
            e.prevent_default();
        }) as Box<dyn FnMut(_)>)
    };
    container
        .add_event_listener_with_callback("contextmenu", contextmenu_cb.as_ref().unchecked_ref())
        .ok();
    let resize_cb = {
        let remeasure = remeasure.clone();
        Closure::wrap(Box::new(move |_e: web_sys::Event| {
            remeasure();
        }) as Box<dyn FnMut(_)>)
    };
    window
        .add_event_listener_with_callback("resize", resize_cb.as_ref().unchecked_ref())
        .ok();
    // Touch
    let touch_start_cb = {
        let rt = runtime.clone();
        Closure::wrap(Box::new(move |e: TouchEvent| {
            // also suppresses the emulated mouse events
            e.prevent_default();
            let touches = e.touches();
            if touches.length() >= 2 {
                if let (Some(a), Some(b)) = (touch_point(&touches, 0), touch_point(&touches, 1)) {
                    rt.dispatch(InputEvent::TwoFingers { a, b });
                }
            } else if let Some(at) = touch_point(&touches, 0) {
                rt.dispatch(InputEvent::PointerDown {
                    at,
                    kind: PointerKind::Touch,
                });
            }
        }) as Box<dyn FnMut(_)>)
    };
    container
        .add_event_listener_with_callback("touchstart", touch_start_cb.as_ref().unchecked_ref())
        .ok();
    // A second finger outside the picture (zoom buttons, banner) still
    // counts as a second touch. Touches on the container arrive here already
    // default-prevented and were handled above.
    let window_touch_cb = {
        let rt = runtime.clone();
        Closure::wrap(Box::new(move |e: TouchEvent| {
            if e.default_prevented() {
                return;
            }
            let touches = e.touches();
            if touches.length() >= 2 {
                if let (Some(a), Some(b)) = (touch_point(&touches, 0), touch_point(&touches, 1)) {
                    rt.dispatch(InputEvent::TwoFingers { a, b });
                }
            }
        }) as Box<dyn FnMut(_)>)
    };
    window
        .add_event_listener_with_callback("touchstart", window_touch_cb.as_ref().unchecked_ref())
        .ok();
    let touch_move_cb = {
        let rt = runtime.clone();
        Closure::wrap(Box::new(move |e: TouchEvent| {
            e.prevent_default();
            let touches = e.touches();
            if touches.length() >= 2 {
                if let (Some(a), Some(b)) = (touch_point(&touches, 0), touch_point(&touches, 1)) {
                    rt.dispatch(InputEvent::TwoFingers { a, b });
                }
            } else if let Some(at) = touch_point(&touches, 0) {
                rt.dispatch(InputEvent::PointerMove { at });
            }
        }) as Box<dyn FnMut(_)>)
    };
    container
        .add_event_listener_with_callback("touchmove", touch_move_cb.as_ref().unchecked_ref())
        .ok();
    let touch_end_cb = {
        let rt = runtime.clone();
        Closure::wrap(Box::new(move |e: TouchEvent| {
            e.prevent_default();
            if e.touches().length() < 2 {
                rt.dispatch(InputEvent::PinchEnd);
            }
            if e.touches().length() == 0 {
                rt.dispatch(InputEvent::PointerUp);
            }
        }) as Box<dyn FnMut(_)>)
    };
    container
        .add_event_listener_with_callback("touchend", touch_end_cb.as_ref().unchecked_ref())
        .ok();
    let touch_cancel_cb = {
        let rt = runtime.clone();
        Closure::wrap(Box::new(move |_e: TouchEvent| {
            rt.dispatch(InputEvent::PinchEnd);
            rt.dispatch(InputEvent::PointerLeave);
        }) as Box<dyn FnMut(_)>)
    };
    container
        .add_event_listener_with_callback("touchcancel", touch_cancel_cb.as_ref().unchecked_ref())
        .ok();
    move || {
        let _ = container.remove_event_listener_with_callback(
            "mousedown",
            mousedown_cb.as_ref().unchecked_ref(),
        );
        let _ = container.remove_event_listener_with_callback(
            "mousemove",
            mousemove_cb.as_ref().unchecked_ref(),
        );
        let _ = container.remove_event_listener_with_callback(
            "mouseleave",
            mouseleave_cb.as_ref().unchecked_ref(),
        );
        let _ = container.remove_event_listener_with_callback(
            "wheel",
            wheel_cb.as_ref().unchecked_ref(),
        );
        let _ = container.remove_event_listener_with_callback(
            "contextmenu",
            contextmenu_cb.as_ref().unchecked_ref(),
        );
        let _ = window.remove_event_listener_with_callback(
            "mouseup",
            mouseup_cb.as_ref().unchecked_ref(),
        );
        let _ = window.remove_event_listener_with_callback(
            "resize",
            resize_cb.as_ref().unchecked_ref(),
        );
        let _ = window.remove_event_listener_with_callback(
            "touchstart",
            window_touch_cb.as_ref().unchecked_ref(),
        );
        let _ = container.remove_event_listener_with_callback(
            "touchstart",
            touch_start_cb.as_ref().unchecked_ref(),
        );
        let _ = container.remove_event_listener_with_callback(
            "touchmove",
            touch_move_cb.as_ref().unchecked_ref(),
        );
        let _ = container.remove_event_listener_with_callback(
            "touchend",
            touch_end_cb.as_ref().unchecked_ref(),
        );
        let _ = container.remove_event_listener_with_callback(
            "touchcancel",
            touch_cancel_cb.as_ref().unchecked_ref(),
        );
    }
}

#[function_component(GameView)]
pub fn game_view(props: &GameViewProps) -> Html {
    let container_ref = use_node_ref();
    let image_ref = use_node_ref();
    let force_update = use_force_update();
    let show_intro = use_state(|| true);
    let runtime = {
        let config = props.config.clone();
        use_state(move || GameRuntime::new(Game::new(config, Box::new(random))))
    };

    // Re-measure whenever the picture finishes loading
    let remeasure: Rc<dyn Fn()> = {
        let runtime = (*runtime).clone();
        let container_ref = container_ref.clone();
        let image_ref = image_ref.clone();
        Rc::new(move || {
            let (Some(container), Some(image)) = (
                container_ref.cast::<HtmlElement>(),
                image_ref.cast::<HtmlImageElement>(),
            ) else {
                return;
            };
            runtime.dispatch(InputEvent::Resize(measure_layout(&container, &image)));
        })
    };

    // Main mount effect (listeners)
    {
        let runtime = (*runtime).clone();
        let container_ref = container_ref.clone();
        let remeasure = remeasure.clone();
        let force_update = force_update.clone();
        use_effect_with((), move |_| {
            runtime.set_redraw(Rc::new(move || force_update.force_update()));
            let teardown = match (web_sys::window(), container_ref.cast::<HtmlElement>()) {
                (Some(window), Some(container)) => {
                    remeasure();
                    Some(attach_listeners(runtime.clone(), window, container, remeasure))
                }
                _ => {
                    cwarn("game view mounted without a window or container");
                    None
                }
            };
            move || {
                if let Some(detach) = teardown {
                    detach();
                }
                runtime.shutdown();
            }
        });
    }

    let dispatch = {
        let runtime = (*runtime).clone();
        move |event: InputEvent| {
            let rt = runtime.clone();
            Callback::from(move |_: ()| rt.dispatch(event))
        }
    };
    let restart = {
        let rt = (*runtime).clone();
        Callback::from(move |_: ()| rt.restart())
    };
    let hide_intro = {
        let show_intro = show_intro.clone();
        Callback::from(move |_: ()| show_intro.set(false))
    };
    let on_image_load = {
        let remeasure = remeasure.clone();
        Callback::from(move |_: Event| remeasure())
    };

    let game = runtime.game();
    let cfg = game.config();
    let viewport = game.viewport();
    let markers = game.marker_positions().into_iter().map(|at| {
        html! {
            <div
                class="marker marker-found"
                style={format!(
                    "position:absolute; left:{:.1}px; top:{:.1}px; transform:translate(-50%, -50%); pointer-events:none; z-index:3;",
                    at.x, at.y
                )}
            ></div>
        }
    });
    let rings = game
        .active_indicator()
        .cloned()
        .into_iter()
        .chain(game.feedback().flashes().iter().map(|f| f.indicator.clone()))
        .map(|indicator| html! { <ProgressRing {indicator} /> });
    let registry = game.registry();
    let cursor = if game.is_panning() { "grabbing" } else { "crosshair" };

    html! {
        <div class="game-root" style="position:relative; width:100vw; height:100vh; overflow:hidden; background:#0e1116;">
            <div
                id="image-container"
                ref={container_ref}
                style={format!("position:relative; width:100%; max-height:100vh; overflow:hidden; touch-action:none; user-select:none; -webkit-user-select:none; cursor:{cursor};")}
            >
                <div
                    class="stage"
                    style={format!("position:relative; transform-origin:0 0; transform:{};", viewport.css_transform())}
                >
                    <img
                        id="game-image"
                        ref={image_ref}
                        src={cfg.image.src.clone()}
                        alt=""
                        draggable="false"
                        onload={on_image_load}
                        style="display:block; width:100%; height:auto; pointer-events:none;"
                    />
                </div>
                { for markers }
                { for rings }
            </div>
            <StatusBanner status={game.feedback().status().clone()} />
            <ZoomControls
                zoomed={viewport.is_zoomed()}
                on_zoom_in={dispatch(InputEvent::ZoomIn)}
                on_zoom_out={dispatch(InputEvent::ZoomOut)}
                on_reset={dispatch(InputEvent::ResetView)}
            />
            <ConfettiLayer burst={game.feedback().confetti().cloned()} />
            <CompletionOverlay
                show={game.is_complete()}
                found={registry.found_count()}
                subject={cfg.subject.clone()}
                restart={restart}
            />
            <IntroOverlay
                show={*show_intro}
                subject={cfg.subject.clone()}
                total={registry.total()}
                hold_secs={f64::from(cfg.timing.hold_duration_ms) / 1000.0}
                hide_intro={hide_intro}
            />
        </div>
    }
}
