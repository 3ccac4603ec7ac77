// planmap-ui/src/components/image_status.rs
use leptos::*;

#[component]
fn SpinnerIcon() -> impl IntoView {
    view! {
        <svg class="animate-spin text-gray-500" width="32" height="32" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
            <path d="M21 12a9 9 0 1 1-6.219-8.56"/>
        </svg>
    }
}

#[component]
fn AlertIcon() -> impl IntoView {
    view! {
        <svg class="mb-2" width="28" height="28" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2">
            <path d="M10.29 3.86L1.82 18a2 2 0 0 0 1.71 3h16.94a2 2 0 0 0 1.71-3L13.71 3.86a2 2 0 0 0-3.42 0z"/>
            <line x1="12" y1="9" x2="12" y2="13"/>
            <line x1="12" y1="17" x2="12.01" y2="17"/>
        </svg>
    }
}

/// Overlay shown while the background image loads.
#[component]
pub fn ImageLoader() -> impl IntoView {
    view! {
        <div class="absolute inset-0 z-10 flex items-center justify-center bg-white/70 pointer-events-none">
            <SpinnerIcon />
        </div>
    }
}

/// Overlay shown when the background image failed to load. Regions stay
/// interactive underneath.
#[component]
pub fn ImageError() -> impl IntoView {
    view! {
        <div class="absolute inset-0 z-10 flex flex-col items-center justify-center bg-red-50/80 text-red-500 pointer-events-none">
            <AlertIcon />
            <p>"Erreur de chargement de l'image"</p>
        </div>
    }
}
