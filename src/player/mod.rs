/// Embedded video player integration
///
/// `PlayerAdapter` is the only code that touches a player instance. It reaches
/// the embed SDK through the `EmbedSdk` trait; `CommandQueueSdk` is the
/// implementation used when the SDK runs in a browser page on the other side
/// of the HTTP bridge.
pub mod adapter;
pub mod bridge;
pub mod loader;
pub mod sdk;

pub use adapter::{PlayerAdapter, PlayerPhase};
pub use bridge::{CommandQueueSdk, PlayerCommand};
pub use loader::SdkLoader;
pub use sdk::{EmbedSdk, PlayerOptions, SdkError};
