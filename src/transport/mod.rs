//! Transport layer: wire-format details (URL, form encoding, envelope).

mod envelope;
mod form;
mod url;

pub use envelope::{DecodedEnvelope, EnvelopeError, EnvelopeStatus, SUCCESS_STATUS, decode_envelope};
pub use form::encode_params_form;
pub use url::{API_HOST, API_VERSION, build_url};
