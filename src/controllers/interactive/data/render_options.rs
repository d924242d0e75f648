/// Options carried by a render request. A later request's options replace
/// earlier ones within the same frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderOptions {
    pub preview: bool,
}

impl RenderOptions {
    pub const PREVIEW: Self = Self { preview: true };
    pub const FINAL: Self = Self { preview: false };
}
