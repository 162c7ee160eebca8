pub mod session_state;

pub use session_state::{extract_hidden_fields, extract_hidden_fields_from_str, SessionState};
