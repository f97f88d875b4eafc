pub mod external;
pub mod native;
pub mod protocol;

pub use external::{ALGORITHM_PLACEHOLDER, ExternalBackend};
pub use native::serve;
