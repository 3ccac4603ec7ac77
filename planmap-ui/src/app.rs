use crate::components::InteractiveMap;
use crate::config::{default_config, get_config, MapConfig};
use crate::hooks::{use_fullscreen, DocumentFullscreen};
use leptos::*;
use planmap_core::{Region, RegionSet};

/// `map` query parameter of a location search string (`?map=site-plan`).
fn map_param(search: &str) -> Option<String> {
    web_sys::UrlSearchParams::new_with_str(search).ok()?.get("map")
}

/// Map requested by `?map=<id>`, falling back to the default map.
fn requested_config() -> &'static MapConfig {
    let requested = web_sys::window()
        .and_then(|w| w.location().search().ok())
        .and_then(|search| map_param(&search));

    match requested.as_deref() {
        Some(id) => get_config(id).unwrap_or_else(|| {
            log::warn!("Unknown map `{}`, using default", id);
            default_config()
        }),
        None => default_config(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let map = requested_config();
    log::info!("Loading map {}", map.display_name);

    let config = match map.viewer_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Map `{}` has an invalid configuration: {}", map.id, e);
            return view! {
                <div class="w-screen h-screen flex items-center justify-center bg-gray-900 text-red-300">
                    {e.to_string()}
                </div>
            }
            .into_view();
        }
    };

    let regions = map.regions().unwrap_or_else(|e| {
        log::error!("Map `{}` has unreadable region data: {}", map.id, e);
        RegionSet::default()
    });
    if !regions.skipped().is_empty() {
        log::warn!("Skipped {} malformed region(s)", regions.skipped().len());
    }

    let fullscreen = use_fullscreen(DocumentFullscreen);

    let on_area_click = Callback::new(|region: Region| {
        log::info!("Clicked: {}", region.tooltip_text());
    });
    let on_area_hover = Callback::new(|region: Region| {
        log::debug!("Hovering: {}", region.tooltip_text());
    });

    view! {
        <div class="w-screen h-screen">
            <InteractiveMap
                config=config
                regions=regions
                image_src=map.image_src()
                on_area_click=on_area_click
                on_area_hover=on_area_hover
                fullscreen=fullscreen
            />
        </div>
    }
    .into_view()
}

#[cfg(test)]
mod browser_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_map_param_is_decoded() {
        assert_eq!(map_param("?map=site%2Dplan").as_deref(), Some("site-plan"));
        assert_eq!(map_param("?debug=1&map=grid").as_deref(), Some("grid"));
        assert_eq!(map_param("?map=grid&map=site-plan").as_deref(), Some("grid"));
        assert_eq!(map_param("").as_deref(), None);
    }
}
