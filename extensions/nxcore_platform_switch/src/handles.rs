//! Native device handles
//!
//! Opaque, non-null wrappers around the pointers the graphics driver hands
//! out, and the registry that owns them for the lifetime of the surface.

use std::num::NonZeroUsize;

macro_rules! native_handle {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[repr(transparent)]
        pub struct $name(NonZeroUsize);

        impl $name {
            /// Wrap a raw handle value; `None` for the null handle
            pub fn from_raw(raw: usize) -> Option<Self> {
                NonZeroUsize::new(raw).map(Self)
            }

            /// Get the raw handle value
            pub fn as_raw(self) -> usize {
                self.0.get()
            }
        }
    };
}

native_handle!(
    /// Display connection
    DisplayHandle
);
native_handle!(
    /// Chosen framebuffer configuration
    ConfigHandle
);
native_handle!(
    /// Rendering context
    ContextHandle
);
native_handle!(
    /// Presentation surface
    SurfaceHandle
);
native_handle!(
    /// Native window the surface draws into
    NativeWindowHandle
);

/// Registry of the handles acquired by the surface lifecycle manager
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DeviceHandles {
    pub display: Option<DisplayHandle>,
    pub config: Option<ConfigHandle>,
    pub context: Option<ContextHandle>,
    pub surface: Option<SurfaceHandle>,
    pub native_window: Option<NativeWindowHandle>,
}

impl DeviceHandles {
    /// Context and surface are both held
    pub fn has_context_and_surface(&self) -> bool {
        self.context.is_some() && self.surface.is_some()
    }

    /// Nothing is held
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_handle_rejected() {
        assert!(DisplayHandle::from_raw(0).is_none());
        assert_eq!(SurfaceHandle::from_raw(0x40).map(SurfaceHandle::as_raw), Some(0x40));
    }

    #[test]
    fn test_registry_starts_empty() {
        let handles = DeviceHandles::default();
        assert!(handles.is_empty());
        assert!(!handles.has_context_and_surface());
    }
}
