//! CLI command implementations.

pub(crate) mod render;
pub(crate) mod sync;

pub(crate) use render::RenderArgs;
pub(crate) use sync::SyncArgs;
