//! Domain layer: strong types with validation and invariants (no I/O).

mod params;
mod validation;
mod value;

pub use params::{ParamValue, RequestParams};
pub use validation::ValidationError;
pub use value::{ApiKey, MessageText, ProxyUrl, Receptor, SenderLine};
