pub mod form_walker;
pub mod step;

pub use form_walker::FormWalker;
pub use step::{Step, StepRequest, WalkStage};
