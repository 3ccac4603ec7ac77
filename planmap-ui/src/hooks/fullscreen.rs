// planmap-ui/src/hooks/fullscreen.rs
use leptos::*;
use planmap_core::{FullscreenCapability, FullscreenError, FullscreenSupport};
use std::rc::Rc;
use web_sys::{window, Document};

fn document() -> Option<Document> {
    window().and_then(|w| w.document())
}

/// Full-screen capability backed by the document's Fullscreen API.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentFullscreen;

impl FullscreenCapability for DocumentFullscreen {
    fn support(&self) -> FullscreenSupport {
        match document() {
            Some(doc) if doc.fullscreen_enabled() => FullscreenSupport::Supported,
            _ => FullscreenSupport::Unsupported,
        }
    }

    fn is_active(&self) -> bool {
        document().is_some_and(|doc| doc.fullscreen_element().is_some())
    }

    fn enter(&self) -> Result<(), FullscreenError> {
        let element = document()
            .and_then(|doc| doc.document_element())
            .ok_or(FullscreenError::Unsupported)?;
        element
            .request_fullscreen()
            .map_err(|e| FullscreenError::Rejected(format!("{:?}", e)))
    }

    fn exit(&self) -> Result<(), FullscreenError> {
        let doc = document().ok_or(FullscreenError::Unsupported)?;
        doc.exit_fullscreen();
        Ok(())
    }
}

/// Reactive view of a full-screen capability.
#[derive(Clone)]
pub struct FullscreenHandle {
    pub is_fullscreen: ReadSignal<bool>,
    capability: Rc<dyn FullscreenCapability>,
}

impl FullscreenHandle {
    pub fn is_supported(&self) -> bool {
        self.capability.support() == FullscreenSupport::Supported
    }

    pub fn toggle(&self) {
        if let Err(e) = self.capability.toggle() {
            log::warn!("Full-screen toggle failed: {}", e);
        }
    }
}

/// Leptos hook to track full-screen state reactively.
///
/// The `fullscreenchange` listener is removed when the owning scope is
/// disposed.
pub fn use_fullscreen<C>(capability: C) -> FullscreenHandle
where
    C: FullscreenCapability + 'static,
{
    let capability: Rc<dyn FullscreenCapability> = Rc::new(capability);
    let (is_fullscreen, set_is_fullscreen) = create_signal(capability.is_active());

    let tracked = Rc::clone(&capability);
    let _ = leptos_use::use_event_listener(
        leptos_use::use_document(),
        ev::Custom::<web_sys::Event>::new("fullscreenchange"),
        move |_| set_is_fullscreen.set(tracked.is_active()),
    );

    FullscreenHandle {
        is_fullscreen,
        capability,
    }
}

#[cfg(test)]
mod browser_tests {
    use super::*;
    use planmap_core::UnsupportedFullscreen;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_document_fullscreen_starts_inactive() {
        assert!(!DocumentFullscreen.is_active());
    }

    #[wasm_bindgen_test]
    fn test_unsupported_capability_never_activates() {
        let runtime = create_runtime();

        let handle = use_fullscreen(UnsupportedFullscreen);
        assert!(!handle.is_supported());
        handle.toggle();
        assert!(!handle.is_fullscreen.get_untracked());

        runtime.dispose();
    }
}
