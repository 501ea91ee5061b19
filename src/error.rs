//! Error type shared by the rendering backend, renderer lifecycle and capture.

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("no suitable GPU adapter found")]
    AdapterNotFound,

    #[error("surface error: {0}")]
    Surface(String),

    #[error("device error: {0}")]
    Device(String),

    #[error("event loop error: {0}")]
    EventLoop(String),

    #[error("frame capture failed: {0}")]
    Capture(String),

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl RenderError {
    /// Whether the backend should be torn down after this error.
    ///
    /// Surface errors are recovered inside the backend (reconfigure and skip),
    /// so anything that reaches the caller from a device or capture failure is
    /// treated as fatal for the mounted renderer.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, RenderError::Surface(_))
    }
}

impl From<wgpu::RequestDeviceError> for RenderError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        RenderError::Device(e.to_string())
    }
}

impl From<wgpu::CreateSurfaceError> for RenderError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        RenderError::Surface(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_errors_are_recoverable() {
        assert!(!RenderError::Surface("outdated".into()).is_fatal());
        assert!(RenderError::AdapterNotFound.is_fatal());
        assert!(RenderError::Device("lost".into()).is_fatal());
    }

    #[test]
    fn event_loop_errors_are_fatal() {
        let err = RenderError::EventLoop("not supported".into());
        assert!(err.is_fatal());
        assert_eq!(err.to_string(), "event loop error: not supported");
    }

    #[test]
    fn display_messages() {
        assert_eq!(
            RenderError::AdapterNotFound.to_string(),
            "no suitable GPU adapter found"
        );
        assert_eq!(
            RenderError::Capture("map failed".into()).to_string(),
            "frame capture failed: map failed"
        );
    }
}
