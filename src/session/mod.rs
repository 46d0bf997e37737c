pub mod loader;
pub mod orchestrator;
pub mod pool;
pub mod refresh;

pub use loader::{FsImageLoader, ImageHandle, ImageLoader, LoadCompleter, LoadOptions, PendingLoad};
pub use orchestrator::{GenerateRequest, GenerationEvent, GenerationState, Orchestrator};
pub use pool::{ImagePool, ImageSource, Selection};
pub use refresh::GuideRefresh;
