pub mod form_client;

pub use form_client::{probe_status, FormClient, FormFields, FormTransport};
