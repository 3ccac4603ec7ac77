use crate::components::{
    FullscreenButton, ImageError, ImageLoader, ResetViewButton, SelectionPanel, TooltipDisplay,
};
use crate::hooks::{
    use_image_loading, use_viewport_interaction, FullscreenHandle, ViewportHandle,
};
use leptos::html::Div;
use leptos::*;
use planmap_core::{
    svg_points, AreaEvent, InteractionLayer, LoadStatus, OutlineStyle, Region, RegionEntry,
    RegionGeometry, RegionSet, RegionStyle, ScreenPoint, ViewerConfig, ViewportController,
};

const GRID_PATTERN_ID: &str = "planmap-grid";

/// Keyframes for the hover outline: the dash offset runs from the outline
/// length (read from `--outline-length`) down to zero.
const OUTLINE_KEYFRAMES: &str =
    "@keyframes planmap-outline { from { stroke-dashoffset: var(--outline-length); } to { stroke-dashoffset: 0; } }";

/// Callbacks for area events, dispatched after the interaction state has been
/// updated.
#[derive(Clone, Copy)]
struct AreaCallbacks {
    on_click: Option<Callback<Region>>,
    on_hover: Option<Callback<Region>>,
}

impl AreaCallbacks {
    fn dispatch(&self, event: Option<AreaEvent>) {
        match event {
            Some(AreaEvent::Hovered(region)) => {
                if let Some(cb) = self.on_hover {
                    cb.call(region);
                }
            }
            Some(AreaEvent::Clicked(region)) => {
                if let Some(cb) = self.on_click {
                    cb.call(region);
                }
            }
            None => {}
        }
    }
}

fn outline_css(style: &RegionStyle, duration_ms: u32) -> String {
    match style.outline {
        OutlineStyle::Animated { draw_length } => format!(
            "cursor: pointer; --outline-length: {len}; stroke-dasharray: {len}; \
             animation: planmap-outline {ms}ms ease-out forwards;",
            len = draw_length,
            ms = duration_ms
        ),
        _ => "cursor: pointer; transition: fill 0.2s ease, stroke 0.2s ease;".to_string(),
    }
}

/// Hover entry, ignored while the map is being panned so a drag across
/// regions does not fire hover callbacks.
fn enter_region(
    layer: &mut InteractionLayer,
    region_id: &str,
    position: ScreenPoint,
    panning: bool,
) -> Option<AreaEvent> {
    if panning {
        return None;
    }
    layer.pointer_enter(region_id, position)
}

/// One region shape with its hover, move, leave and click handlers.
fn region_shape(
    entry: &RegionEntry,
    layer: RwSignal<InteractionLayer>,
    viewport: ViewportHandle,
    callbacks: AreaCallbacks,
    duration_ms: u32,
) -> View {
    let id = entry.region.id.clone();
    let style = {
        let id = id.clone();
        create_memo(move |_| layer.with(|l| l.style_for(&id)))
    };

    let fill = move || style.get().map(|s| s.fill).unwrap_or_default();
    let stroke = move || style.get().map(|s| s.stroke).unwrap_or_default();
    let stroke_width = move || style.get().map_or(0.0, |s| s.stroke_width);
    let css = move || {
        style
            .get()
            .map(|s| outline_css(&s, duration_ms))
            .unwrap_or_default()
    };

    let enter_id = id.clone();
    let on_enter = move |ev: ev::MouseEvent| {
        if let Some(position) = viewport.to_container(ev.client_x(), ev.client_y()) {
            let panning = viewport.is_panning();
            let event = layer
                .try_update(|l| enter_region(l, &enter_id, position, panning))
                .flatten();
            callbacks.dispatch(event);
        }
    };
    let on_move = move |ev: ev::MouseEvent| {
        if let Some(position) = viewport.to_container(ev.client_x(), ev.client_y()) {
            layer.update(|l| l.pointer_move(position));
        }
    };
    let on_leave = move |_: ev::MouseEvent| layer.update(|l| l.pointer_leave());
    let click_id = id.clone();
    let on_click = move |ev: ev::MouseEvent| {
        if let Some(position) = viewport.to_container(ev.client_x(), ev.client_y()) {
            let event = layer.try_update(|l| l.click(&click_id, position)).flatten();
            callbacks.dispatch(event);
        }
    };

    match &entry.geometry {
        RegionGeometry::Polygon(vertices) => view! {
            <polygon
                data-region-id=id
                points={svg_points(vertices)}
                fill=fill
                stroke=stroke
                stroke-width=stroke_width
                style=css
                on:mouseenter=on_enter
                on:mousemove=on_move
                on:mouseleave=on_leave
                on:click=on_click
            />
        }
        .into_view(),
        RegionGeometry::Rect { min, max } => view! {
            <rect
                data-region-id=id
                x={min.x()}
                y={min.y()}
                width={max.x() - min.x()}
                height={max.y() - min.y()}
                fill=fill
                stroke=stroke
                stroke-width=stroke_width
                style=css
                on:mouseenter=on_enter
                on:mousemove=on_move
                on:mouseleave=on_leave
                on:click=on_click
            />
        }
        .into_view(),
        RegionGeometry::Circle { center, radius } => view! {
            <circle
                data-region-id=id
                cx={center.x()}
                cy={center.y()}
                r={*radius}
                fill=fill
                stroke=stroke
                stroke-width=stroke_width
                style=css
                on:mouseenter=on_enter
                on:mousemove=on_move
                on:mouseleave=on_leave
                on:click=on_click
            />
        }
        .into_view(),
    }
}

/// Pan/zoom image map with hoverable, selectable regions.
#[component]
pub fn InteractiveMap(
    config: ViewerConfig,
    regions: RegionSet,
    /// Background image URL. Without one a grid placeholder is drawn.
    #[prop(optional_no_strip)]
    image_src: Option<String>,
    #[prop(optional, into)] on_area_click: Option<Callback<Region>>,
    /// Fired once per hover entry; leaving a region does not fire it.
    #[prop(optional, into)]
    on_area_hover: Option<Callback<Region>>,
    #[prop(optional)] fullscreen: Option<FullscreenHandle>,
) -> impl IntoView {
    let controller = match ViewportController::new(config.clone()) {
        Ok(controller) => controller,
        Err(e) => {
            log::error!("Invalid viewer configuration: {}", e);
            return view! {
                <div class="w-full h-full flex items-center justify-center bg-gray-800 text-red-300">
                    {format!("Configuration invalide : {}", e)}
                </div>
            }
            .into_view();
        }
    };

    let container_ref = create_node_ref::<Div>();
    let viewport = use_viewport_interaction(container_ref, controller);

    let has_image = image_src.is_some();
    let status = use_image_loading(MaybeSignal::Static(image_src.clone()));

    let layer = create_rw_signal(InteractionLayer::new(
        regions.clone(),
        config.tooltip,
        config.palette.clone(),
    ));
    let callbacks = AreaCallbacks {
        on_click: on_area_click,
        on_hover: on_area_hover,
    };
    let duration_ms = config.palette.outline_duration_ms;

    let tooltip = Signal::derive(move || layer.with(|l| l.tooltip()));
    let selected = Signal::derive(move || layer.with(|l| l.selected_region().cloned()));
    let on_close = Callback::new(move |_: ()| layer.update(|l| l.clear_selection()));
    let on_reset = Callback::new(move |_: ()| viewport.reset());

    let image_width = config.image_size.width;
    let image_height = config.image_size.height;

    let shapes = regions
        .iter()
        .map(|entry| region_shape(entry, layer, viewport, callbacks, duration_ms))
        .collect_view();

    let background = match image_src {
        Some(src) => view! {
            <image
                href=src
                width=image_width
                height=image_height
                preserveAspectRatio="xMidYMid slice"
            />
        }
        .into_view(),
        None => view! {
            <rect
                width=image_width
                height=image_height
                fill=format!("url(#{})", GRID_PATTERN_ID)
            />
        }
        .into_view(),
    };

    let status_overlay = move || {
        if !has_image {
            return ().into_view();
        }
        match status.get() {
            LoadStatus::Loading => view! { <ImageLoader /> }.into_view(),
            LoadStatus::Error => view! { <ImageError /> }.into_view(),
            LoadStatus::Loaded => ().into_view(),
        }
    };

    view! {
        <div
            node_ref=container_ref
            class="relative w-full h-full overflow-hidden select-none bg-gray-800"
            style:cursor=move || viewport.cursor.get().css()
            style:touch-action="none"
            on:mouseleave=move |_| layer.update(|l| l.clear_hover())
        >
            <style>{OUTLINE_KEYFRAMES}</style>
            <svg class="absolute inset-0 w-full h-full">
                <defs>
                    <pattern
                        id=GRID_PATTERN_ID
                        width="50"
                        height="50"
                        patternUnits="userSpaceOnUse"
                    >
                        <path d="M 50 0 L 0 0 0 50" fill="none" stroke="#374151" stroke-width="1"/>
                    </pattern>
                </defs>
                <g
                    transform=move || viewport.svg_transform.get().unwrap_or_default()
                    visibility=move || {
                        if viewport.svg_transform.get().is_some() { "visible" } else { "hidden" }
                    }
                >
                    {background}
                    {shapes}
                </g>
            </svg>

            {status_overlay}

            <TooltipDisplay tooltip=tooltip />
            <SelectionPanel region=selected on_close=on_close />

            <div class="absolute bottom-4 right-4 z-20 flex space-x-2">
                <ResetViewButton on_click=on_reset />
                {fullscreen.map(|handle| view! { <FullscreenButton handle=handle /> })}
            </div>
        </div>
    }
    .into_view()
}
