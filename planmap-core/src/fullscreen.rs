//! Full-screen control as an injected capability.

use crate::error::FullscreenError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FullscreenSupport {
    Supported,
    Unsupported,
}

/// Host full-screen facility. The viewer receives one of these instead of
/// reaching into the host document.
pub trait FullscreenCapability {
    fn support(&self) -> FullscreenSupport;

    fn is_active(&self) -> bool;

    fn enter(&self) -> Result<(), FullscreenError>;

    fn exit(&self) -> Result<(), FullscreenError>;

    fn toggle(&self) -> Result<(), FullscreenError> {
        if self.support() == FullscreenSupport::Unsupported {
            return Err(FullscreenError::Unsupported);
        }
        if self.is_active() {
            self.exit()
        } else {
            self.enter()
        }
    }
}

/// Capability for hosts without full-screen support, and for tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnsupportedFullscreen;

impl FullscreenCapability for UnsupportedFullscreen {
    fn support(&self) -> FullscreenSupport {
        FullscreenSupport::Unsupported
    }

    fn is_active(&self) -> bool {
        false
    }

    fn enter(&self) -> Result<(), FullscreenError> {
        Err(FullscreenError::Unsupported)
    }

    fn exit(&self) -> Result<(), FullscreenError> {
        Err(FullscreenError::Unsupported)
    }
}
