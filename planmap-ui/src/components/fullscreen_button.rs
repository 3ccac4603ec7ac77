// planmap-ui/src/components/fullscreen_button.rs
use crate::hooks::FullscreenHandle;
use leptos::*;

#[component]
fn MaximizeIcon() -> impl IntoView {
    view! {
        <svg width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
            <path d="M8 3H5a2 2 0 0 0-2 2v3m18 0V5a2 2 0 0 0-2-2h-3m0 18h3a2 2 0 0 0 2-2v-3M3 16v3a2 2 0 0 0 2 2h3"/>
        </svg>
    }
}

#[component]
fn MinimizeIcon() -> impl IntoView {
    view! {
        <svg width="24" height="24" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
            <path d="M8 3v3a2 2 0 0 1-2 2H3m18 0h-3a2 2 0 0 1-2-2V3m0 18v-3a2 2 0 0 1 2-2h3M3 16h3a2 2 0 0 1 2 2v3"/>
        </svg>
    }
}

/// Toggle for an injected full-screen capability. Renders nothing when the
/// host has no full-screen support.
#[component]
pub fn FullscreenButton(handle: FullscreenHandle) -> impl IntoView {
    if !handle.is_supported() {
        return ().into_view();
    }
    let is_fullscreen = handle.is_fullscreen;

    view! {
        <button
            class="text-white bg-black/40 hover:bg-black/60 rounded-full p-2 transition-colors"
            title="Plein écran"
            data-map-control=""
            on:click=move |_| handle.toggle()
        >
            {move || if is_fullscreen.get() {
                view! { <MinimizeIcon /> }.into_view()
            } else {
                view! { <MaximizeIcon /> }.into_view()
            }}
        </button>
    }
    .into_view()
}
