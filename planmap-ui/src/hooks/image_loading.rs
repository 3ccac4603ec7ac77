use leptos::*;
use planmap_core::LoadStatus;
use wasm_bindgen::prelude::*;
use web_sys::HtmlImageElement;

struct PendingImage {
    image: HtmlImageElement,
    _onload: Closure<dyn FnMut()>,
    _onerror: Closure<dyn FnMut()>,
}

fn detach(pending: StoredValue<Option<PendingImage>>) {
    pending.update_value(|slot| {
        if let Some(pending) = slot.take() {
            pending.image.set_onload(None);
            pending.image.set_onerror(None);
        }
    });
}

/// Track the load status of an image URL.
///
/// `None` means there is no image to wait for and reports [`LoadStatus::Loaded`].
/// Handlers of a superseded or unmounted load are detached, so a late
/// response never overwrites a newer status.
pub fn use_image_loading(src: MaybeSignal<Option<String>>) -> Signal<LoadStatus> {
    let status = create_rw_signal(LoadStatus::Loading);
    let pending = store_value::<Option<PendingImage>>(None);

    create_effect(move |_| {
        detach(pending);

        let Some(src) = src.get() else {
            status.set(LoadStatus::Loaded);
            return;
        };
        status.set(LoadStatus::Loading);

        let image = match HtmlImageElement::new() {
            Ok(image) => image,
            Err(e) => {
                log::error!("Failed to create image element: {:?}", e);
                status.set(LoadStatus::Error);
                return;
            }
        };

        let onload = Closure::wrap(Box::new(move || {
            status.set(LoadStatus::Loaded);
        }) as Box<dyn FnMut()>);

        let failed_src = src.clone();
        let onerror = Closure::wrap(Box::new(move || {
            log::warn!("Failed to load image {}", failed_src);
            status.set(LoadStatus::Error);
        }) as Box<dyn FnMut()>);

        image.set_onload(Some(onload.as_ref().unchecked_ref()));
        image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        image.set_src(&src);

        pending.set_value(Some(PendingImage {
            image,
            _onload: onload,
            _onerror: onerror,
        }));
    });

    on_cleanup(move || detach(pending));

    Signal::derive(move || status.get())
}
