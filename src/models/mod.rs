pub mod hidden_state;
pub mod outcome;
pub mod selection;
pub mod student;

pub use hidden_state::HiddenState;
pub use outcome::{FailureKind, LookupFailure, LookupOutcome, ResultSheet, ResultTable};
pub use selection::SelectionPath;
pub use student::{StudentField, StudentInfo};
