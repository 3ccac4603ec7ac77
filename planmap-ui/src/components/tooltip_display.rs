// planmap-ui/src/components/tooltip_display.rs
use leptos::*;
use planmap_core::Tooltip;

/// Floating label with a small arrow pointing down at the cursor.
/// Positioned in container coordinates, unaffected by the map transform.
#[component]
pub fn TooltipDisplay(tooltip: Signal<Tooltip>) -> impl IntoView {
    move || {
        let tooltip = tooltip.get();
        tooltip.visible.then(|| {
            view! {
                <div
                    class="absolute z-50 px-3 py-2 bg-white text-sm font-medium rounded-md pointer-events-none shadow-lg border border-gray-200 whitespace-nowrap -translate-x-1/2"
                    style:left=format!("{}px", tooltip.x)
                    style:top=format!("{}px", tooltip.y)
                >
                    <span class="text-gray-900">{tooltip.text}</span>
                    <div
                        class="absolute top-full left-1/2 -translate-x-1/2 w-0 h-0"
                        style="border-left: 6px solid transparent; border-right: 6px solid transparent; border-top: 6px solid white;"
                    />
                </div>
            }
        })
    }
}
