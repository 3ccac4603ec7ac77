use leptos::html::Div;
use leptos::*;
use leptos_use::{use_event_listener, use_window};
use planmap_core::{
    CursorHint, PointerTarget, ScreenPoint, Size, ViewportController, ViewportTransform,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, Element, EventTarget, TouchEvent, TouchList, WheelEvent};

/// Attribute marking an element as a region shape.
pub const REGION_ATTRIBUTE: &str = "data-region-id";

/// Attribute marking an overlay control; presses inside one never pan.
pub const CONTROL_ATTRIBUTE: &str = "data-map-control";

const TOUCH_EVENTS: [&str; 4] = ["touchstart", "touchmove", "touchend", "touchcancel"];

/// Handle returned by [`use_viewport_interaction`].
#[derive(Clone, Copy)]
pub struct ViewportHandle {
    pub transform: Memo<ViewportTransform>,
    /// SVG `transform` attribute for the image layer, `None` until measured.
    pub svg_transform: Memo<Option<String>>,
    pub cursor: Memo<CursorHint>,
    pub container_size: Memo<Option<Size>>,
    controller: RwSignal<ViewportController>,
    container_ref: NodeRef<Div>,
}

impl ViewportHandle {
    /// Back to the fitted, centred view.
    pub fn reset(&self) {
        self.controller.update(|c| {
            c.reset();
        });
    }

    /// Whether a drag or pinch is in progress.
    pub fn is_panning(&self) -> bool {
        self.controller.with_untracked(|c| c.is_dragging() || c.is_pinching())
    }

    /// Container-relative position of a client (document) coordinate.
    pub fn to_container(&self, client_x: i32, client_y: i32) -> Option<ScreenPoint> {
        let container = self.container_ref.get_untracked()?;
        Some(container_point(&container, client_x as f64, client_y as f64))
    }
}

fn container_point(container: &Element, client_x: f64, client_y: f64) -> ScreenPoint {
    let rect = container.get_bounding_client_rect();
    ScreenPoint::from_client(client_x, client_y, rect.left(), rect.top())
}

fn touch_points(container: &Element, touches: &TouchList) -> Vec<ScreenPoint> {
    let rect = container.get_bounding_client_rect();
    (0..touches.length())
        .filter_map(|i| touches.get(i))
        .map(|t| {
            ScreenPoint::from_client(
                t.client_x() as f64,
                t.client_y() as f64,
                rect.left(),
                rect.top(),
            )
        })
        .collect()
}

/// What an event landed on: an overlay control, a region shape (or inside
/// one), or the background.
fn pointer_target(target: Option<EventTarget>) -> PointerTarget {
    let Some(element) = target.and_then(|t| t.dyn_into::<Element>().ok()) else {
        return PointerTarget::Background;
    };
    let inside = |attribute: &str| {
        element
            .closest(&format!("[{}]", attribute))
            .ok()
            .flatten()
            .is_some()
    };
    if inside(CONTROL_ATTRIBUTE) {
        PointerTarget::Control
    } else if inside(REGION_ATTRIBUTE) {
        PointerTarget::Region
    } else {
        PointerTarget::Background
    }
}

fn measure(container: &Element) -> Size {
    Size::new(container.client_width() as f64, container.client_height() as f64)
}

/// Listeners added by hand so they can be registered non-passive.
struct ManualListeners {
    target: Element,
    wheel: Closure<dyn FnMut(WheelEvent)>,
    touch: Closure<dyn FnMut(TouchEvent)>,
}

impl ManualListeners {
    fn remove(&self) {
        let _ = self
            .target
            .remove_event_listener_with_callback("wheel", self.wheel.as_ref().unchecked_ref());
        for name in TOUCH_EVENTS {
            let _ = self
                .target
                .remove_event_listener_with_callback(name, self.touch.as_ref().unchecked_ref());
        }
    }
}

/// Wire wheel, mouse, touch and resize input on `container_ref` into `controller`.
///
/// Mouse presses on region shapes (elements carrying [`REGION_ATTRIBUTE`]) or
/// overlay controls ([`CONTROL_ATTRIBUTE`]) never start a pan, and only the
/// primary button pans. Wheel and touch listeners are
/// registered non-passive so the page does not scroll underneath the map; all
/// listeners are removed when the owning scope is disposed.
pub fn use_viewport_interaction(
    container_ref: NodeRef<Div>,
    controller: ViewportController,
) -> ViewportHandle {
    let controller = create_rw_signal(controller);

    let transform = create_memo(move |_| controller.with(|c| c.transform()));
    let svg_transform = create_memo(move |_| controller.with(|c| c.svg_transform()));
    let cursor = create_memo(move |_| controller.with(|c| c.cursor()));
    let container_size = create_memo(move |_| controller.with(|c| c.container()));

    let resize = move || {
        if let Some(container) = container_ref.get_untracked() {
            let size = measure(&container);
            controller.update(|c| {
                c.resize(size);
            });
        }
    };

    // First measurement once the container mounts
    create_effect(move |_| {
        if container_ref.get().is_some() {
            resize();
        }
    });

    let _ = use_event_listener(use_window(), ev::resize, move |_| resize());

    let _ = use_event_listener(container_ref, ev::mousedown, move |ev| {
        if ev.button() != 0 {
            return;
        }
        let Some(container) = container_ref.get_untracked() else {
            return;
        };
        let position = container_point(&container, ev.client_x() as f64, ev.client_y() as f64);
        let target = pointer_target(ev.target());
        if controller.try_update(|c| c.pointer_down(position, target)) == Some(true) {
            // Keep the drag from selecting text
            ev.prevent_default();
        }
    });

    let _ = use_event_listener(container_ref, ev::mousemove, move |ev| {
        if !controller.with_untracked(|c| c.is_dragging()) {
            return;
        }
        if let Some(container) = container_ref.get_untracked() {
            let position = container_point(&container, ev.client_x() as f64, ev.client_y() as f64);
            controller.update(|c| {
                c.pointer_move(position);
            });
        }
    });

    let _ = use_event_listener(container_ref, ev::mouseleave, move |_| {
        controller.update(|c| c.pointer_leave());
    });

    let _ = use_event_listener(use_window(), ev::mouseup, move |_| {
        if controller.with_untracked(|c| c.is_dragging()) {
            controller.update(|c| c.pointer_up());
        }
    });

    let listeners = store_value::<Option<ManualListeners>>(None);

    create_effect(move |_| {
        let Some(container) = container_ref.get() else {
            return;
        };
        let target: Element = (*container).clone().into();

        listeners.update_value(|slot| {
            if let Some(old) = slot.take() {
                old.remove();
            }
        });

        let wheel_target = target.clone();
        let wheel = Closure::wrap(Box::new(move |ev: WheelEvent| {
            ev.prevent_default();
            let cursor = container_point(&wheel_target, ev.client_x() as f64, ev.client_y() as f64);
            controller.update(|c| {
                c.wheel(cursor, ev.delta_y());
            });
        }) as Box<dyn FnMut(WheelEvent)>);

        let touch_target = target.clone();
        let touch = Closure::wrap(Box::new(move |ev: TouchEvent| {
            let touches = touch_points(&touch_target, &ev.touches());
            let handled = match ev.type_().as_str() {
                "touchstart" => {
                    let target = pointer_target(ev.target());
                    controller.try_update(|c| c.touch_start(&touches, target)) == Some(true)
                }
                "touchmove" => {
                    let active = controller.with_untracked(|c| c.is_dragging() || c.is_pinching());
                    if active {
                        controller.update(|c| {
                            c.touch_move(&touches);
                        });
                    }
                    active
                }
                // touchend and touchcancel
                _ => {
                    controller.update(|c| c.touch_end(&touches));
                    false
                }
            };
            if handled {
                ev.prevent_default();
            }
        }) as Box<dyn FnMut(TouchEvent)>);

        let options = AddEventListenerOptions::new();
        options.set_passive(false);

        if let Err(e) = target.add_event_listener_with_callback_and_add_event_listener_options(
            "wheel",
            wheel.as_ref().unchecked_ref(),
            &options,
        ) {
            log::error!("Failed to add wheel listener: {:?}", e);
        }
        for name in TOUCH_EVENTS {
            if let Err(e) = target.add_event_listener_with_callback_and_add_event_listener_options(
                name,
                touch.as_ref().unchecked_ref(),
                &options,
            ) {
                log::error!("Failed to add {} listener: {:?}", name, e);
            }
        }

        listeners.set_value(Some(ManualListeners {
            target,
            wheel,
            touch,
        }));
    });

    on_cleanup(move || {
        listeners.update_value(|slot| {
            if let Some(old) = slot.take() {
                old.remove();
            }
        });
    });

    ViewportHandle {
        transform,
        svg_transform,
        cursor,
        container_size,
        controller,
        container_ref,
    }
}

#[cfg(test)]
mod browser_tests {
    use super::*;
    use planmap_core::ViewerConfig;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn controller() -> ViewportController {
        ViewportController::new(ViewerConfig::default().with_image_size(1920.0, 1080.0)).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_hook_starts_unmeasured() {
        let runtime = create_runtime();

        let container_ref = create_node_ref::<Div>();
        let handle = use_viewport_interaction(container_ref, controller());

        assert!(handle.container_size.get_untracked().is_none());
        assert!(handle.svg_transform.get_untracked().is_none());
        assert_eq!(handle.transform.get_untracked(), ViewportTransform::identity());
        assert!(handle.to_container(10, 10).is_none());
        assert!(!handle.is_panning());

        runtime.dispose();
    }

    #[wasm_bindgen_test]
    fn test_region_marker_is_detected() {
        let document = web_sys::window().unwrap().document().unwrap();
        let group = document
            .create_element_ns(Some("http://www.w3.org/2000/svg"), "g")
            .unwrap();
        group.set_attribute(REGION_ATTRIBUTE, "r1").unwrap();
        let child = document
            .create_element_ns(Some("http://www.w3.org/2000/svg"), "polygon")
            .unwrap();
        group.append_child(&child).unwrap();
        let background = document.create_element("div").unwrap();

        assert_eq!(pointer_target(Some(child.into())), PointerTarget::Region);
        assert_eq!(pointer_target(Some(background.into())), PointerTarget::Background);
        assert_eq!(pointer_target(None), PointerTarget::Background);
    }

    #[wasm_bindgen_test]
    fn test_control_marker_wins_over_background() {
        let document = web_sys::window().unwrap().document().unwrap();
        let overlay = document.create_element("div").unwrap();
        overlay.set_attribute(CONTROL_ATTRIBUTE, "").unwrap();
        let button = document.create_element("button").unwrap();
        let icon = document
            .create_element_ns(Some("http://www.w3.org/2000/svg"), "svg")
            .unwrap();
        button.append_child(&icon).unwrap();
        overlay.append_child(&button).unwrap();

        assert_eq!(pointer_target(Some(button.into())), PointerTarget::Control);
        assert_eq!(pointer_target(Some(icon.into())), PointerTarget::Control);
    }
}
