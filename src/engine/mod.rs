pub mod debounce;
pub mod fields;
pub mod form_sync;
pub mod format;
pub mod line_items;
pub mod notify;
pub mod preview;
pub mod pricing;

pub use fields::{Baseline, FieldKey, FormFields};
pub use form_sync::{EngineSettings, FormSync, InputTarget};
pub use line_items::{LineItemError, LineItems};
pub use notify::NotificationKind;
pub use preview::Preview;
