// planmap-ui/src/components/selection_panel.rs
use leptos::*;
use planmap_core::{Region, Shape};

fn shape_label(shape: Shape) -> &'static str {
    match shape {
        Shape::Polygon => "polygon",
        Shape::Rect => "rect",
        Shape::Circle => "circle",
    }
}

/// Details of the selected region with a close action.
#[component]
pub fn SelectionPanel(
    /// Selected region (None = hidden)
    region: Signal<Option<Region>>,
    on_close: Callback<()>,
) -> impl IntoView {
    move || {
        region.get().map(|region| {
            let title = region.tooltip_text().to_string();
            view! {
                <div
                    class="absolute top-4 right-4 z-20 bg-white rounded-lg shadow-lg p-4 max-w-sm"
                    data-map-control=""
                >
                    <h3 class="font-bold text-lg mb-2">{title}</h3>
                    <p class="text-sm text-gray-600">"ID: " {region.id}</p>
                    <p class="text-sm text-gray-600">"Type: " {shape_label(region.shape)}</p>
                    <p class="text-xs text-green-600 mt-1">"Sélectionné"</p>
                    <button
                        class="mt-2 text-xs text-gray-500 hover:text-gray-700"
                        on:click=move |_| on_close.call(())
                    >
                        "✕ Fermer"
                    </button>
                </div>
            }
        })
    }
}
