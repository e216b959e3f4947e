//! `verify/*` endpoint wrappers: template lookups, voice calls, call OTP.

use serde_json::Value;

use crate::client::{KavenegarClient, KavenegarError};
use crate::domain::{Receptor, RequestParams};

impl KavenegarClient {
    /// `verify/lookup`: send a templated verification message. The caller
    /// supplies `receptor`, `template`, and `token*` parameters directly.
    pub async fn verify_lookup(
        &self,
        params: RequestParams,
    ) -> Result<Option<Value>, KavenegarError> {
        self.translate("verify", "lookup", params).await
    }

    /// [`KavenegarClient::verify_lookup`] with the common parameters named.
    ///
    /// `lookup_type` selects the delivery channel when the template supports
    /// more than one (for example `"sms"` or `"call"`).
    pub async fn verify_lookup_with_template(
        &self,
        template: &str,
        receptor: &Receptor,
        token: &str,
        token2: Option<&str>,
        token3: Option<&str>,
        lookup_type: Option<&str>,
    ) -> Result<Option<Value>, KavenegarError> {
        let mut params = RequestParams::new()
            .with(Receptor::FIELD, receptor)
            .with("token", token)
            .with("template", template);
        if let Some(token2) = token2 {
            params.insert("token2", token2);
        }
        if let Some(token3) = token3 {
            params.insert("token3", token3);
        }
        if let Some(lookup_type) = lookup_type {
            params.insert("type", lookup_type);
        }
        self.verify_lookup(params).await
    }

    /// [`KavenegarClient::verify_lookup`] with a free-form token map merged
    /// over the named `receptor`/`template` pair, for templates with
    /// non-standard token slots.
    pub async fn verify_lookup_advanced(
        &self,
        template: &str,
        receptor: &Receptor,
        tokens: RequestParams,
    ) -> Result<Option<Value>, KavenegarError> {
        let mut params = RequestParams::new()
            .with(Receptor::FIELD, receptor)
            .with("template", template);
        params.extend(tokens);
        self.verify_lookup(params).await
    }

    /// `verify/voicecall`: read a verification token out in a voice call.
    pub async fn verify_voicecall(
        &self,
        receptor: &Receptor,
        token: &str,
        template: &str,
    ) -> Result<Option<Value>, KavenegarError> {
        let params = RequestParams::new()
            .with(Receptor::FIELD, receptor)
            .with("token", token)
            .with("template", template);
        self.translate("verify", "voicecall", params).await
    }

    /// `verify/callotp`: deliver an OTP via an automated call.
    pub async fn verify_call_otp(
        &self,
        receptor: &Receptor,
        token: &str,
    ) -> Result<Option<Value>, KavenegarError> {
        let params = RequestParams::new()
            .with(Receptor::FIELD, receptor)
            .with("token", token);
        self.translate("verify", "callotp", params).await
    }
}
