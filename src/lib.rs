pub(crate) mod logging;

pub mod session;
pub mod tag;

// Re-export the NDEF codec crate
pub use tunetag_ndef as ndef;

pub use session::adapter::{NfcRadioAdapter, RadioAdapterError};
pub use session::dispatch::SessionListener;
pub use session::ffi::FfiTagSession;
pub use session::{SessionError, SessionMode, SessionOutcome, TagSession};
pub use tag::{NdefStatus, TagCapability, TagId};

uniffi::setup_scaffolding!();
