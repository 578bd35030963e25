pub mod state;
pub mod config;
pub mod counter;
pub mod animator;
pub mod coordinator;
pub mod global;
pub mod driver;

// Export state
pub use state::{LoadingState, LoadingSnapshot, PROGRESS_COMPLETE};

// Export configuration
pub use config::{LoaderConfig, ConfigError};

// Export the two core components
pub use counter::{RequestCounter, StartOutcome, EndOutcome};
pub use animator::{ProgressAnimator, AnimationPhase};

// Export the service layer
pub use coordinator::{LoadingCoordinator, LoadingHandle, RequestGuard};
pub use global::{install, global, CoordinatorError};
pub use driver::AnimationDriver;
