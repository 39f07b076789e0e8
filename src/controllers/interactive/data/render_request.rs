/// Which passes a render runs. Transient; never stored by the scheduler.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct RenderRequest {
    /// Run the coarse preview pass and publish it before the full pass.
    pub progressive: bool,
}

impl RenderRequest {
    pub const FULL: Self = Self { progressive: false };
    pub const PROGRESSIVE: Self = Self { progressive: true };
}
