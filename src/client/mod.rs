//! Client layer: orchestrates transport calls and maps wire ↔ domain.

mod account;
mod call;
mod sms;
mod verify;

use std::error::Error as StdError;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError, RwLock};
use std::time::Duration;

use serde_json::Value;

use crate::domain::{
    ApiKey, MessageText, ParamValue, ProxyUrl, Receptor, RequestParams, SenderLine,
    ValidationError,
};
use crate::transport::{self, API_HOST, API_VERSION, EnvelopeStatus};

/// Request timeout applied when the builder does not override it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Receptors per request used by [`KavenegarClient::send_bulk_chunked`]
/// callers that have no reason to pick their own group size.
pub const DEFAULT_CHUNK_SIZE: usize = 200;

/// Boxed future type used by [`HttpTransport`] implementations.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
/// Raw HTTP response body as received, before any decoding.
pub struct RawResponse {
    pub body: Vec<u8>,
}

#[derive(Debug, Clone)]
/// Per-call knobs forwarded to the transport.
pub struct CallOptions {
    pub timeout: Duration,
    pub proxy: Option<ProxyUrl>,
}

/// Minimal HTTP capability the client needs: one form-encoded POST.
///
/// The default implementation wraps `reqwest`; tests and embedders may
/// substitute their own. Implementations must be safe to share across
/// concurrent calls.
pub trait HttpTransport: Send + Sync {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        form: Vec<(String, String)>,
        options: CallOptions,
    ) -> BoxFuture<'a, Result<RawResponse, Box<dyn StdError + Send + Sync>>>;
}

impl fmt::Debug for dyn HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HttpTransport")
    }
}

#[derive(Debug)]
struct ReqwestTransport {
    client: reqwest::Client,
    // One extra client per active proxy; rebuilt only when the proxy changes.
    proxied: Mutex<Option<(ProxyUrl, reqwest::Client)>>,
}

impl ReqwestTransport {
    fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            proxied: Mutex::new(None),
        }
    }

    fn client_for(
        &self,
        proxy: Option<&ProxyUrl>,
    ) -> Result<reqwest::Client, Box<dyn StdError + Send + Sync>> {
        let Some(proxy) = proxy else {
            return Ok(self.client.clone());
        };

        let mut cached = self.proxied.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some((cached_proxy, client)) = cached.as_ref() {
            if cached_proxy == proxy {
                return Ok(client.clone());
            }
        }

        let client = reqwest::Client::builder()
            .proxy(reqwest::Proxy::all(proxy.as_str())?)
            .build()?;
        *cached = Some((proxy.clone(), client.clone()));
        Ok(client)
    }
}

impl HttpTransport for ReqwestTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        form: Vec<(String, String)>,
        options: CallOptions,
    ) -> BoxFuture<'a, Result<RawResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let client = self.client_for(options.proxy.as_ref())?;
            let response = client
                .post(url)
                .header(reqwest::header::ACCEPT, "application/json")
                .header("charset", "utf-8")
                .timeout(options.timeout)
                .form(&form)
                .send()
                .await?;
            let body = response.bytes().await?.to_vec();
            Ok(RawResponse { body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`KavenegarClient`].
pub enum KavenegarError {
    /// Network failure, timeout, or a response body that could not be decoded
    /// as UTF-8 JSON. The message never contains the raw API key; any
    /// occurrence is replaced with its masked form before the error is built.
    #[error("transport error: {0}")]
    Transport(String),

    /// The envelope's `return.status` was present but not the success
    /// sentinel. Carries the status as received, the service's message text,
    /// and the full envelope for diagnostics.
    #[error("api error [{status}] {message}")]
    Api {
        status: EnvelopeStatus,
        message: String,
        envelope: Value,
    },

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
/// Reachability summary produced by [`KavenegarClient::healthcheck`].
pub struct HealthReport {
    pub account: bool,
    pub sms: bool,
}

#[derive(Debug, Clone)]
/// Inbound webhook payload: raw JSON text, or a value something upstream has
/// already parsed.
pub enum WebhookPayload {
    Text(String),
    Structured(Value),
}

impl From<&str> for WebhookPayload {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for WebhookPayload {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Value> for WebhookPayload {
    fn from(value: Value) -> Self {
        Self::Structured(value)
    }
}

#[derive(Debug, Clone)]
struct ClientConfig {
    api_key: ApiKey,
    timeout: Duration,
    proxy: Option<ProxyUrl>,
}

#[derive(Debug, Clone)]
/// Builder for [`KavenegarClient`].
///
/// Use this when you need to customize the host, timeout, proxy, or the HTTP
/// transport itself.
pub struct KavenegarClientBuilder {
    api_key: ApiKey,
    host: String,
    timeout: Duration,
    proxy: Option<ProxyUrl>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl KavenegarClientBuilder {
    /// Create a builder with the default host, timeout, and transport.
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            api_key,
            host: API_HOST.to_owned(),
            timeout: DEFAULT_TIMEOUT,
            proxy: None,
            transport: None,
        }
    }

    /// Override the REST host (the default is `api.kavenegar.com`).
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Set the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Route requests through an outbound proxy.
    pub fn proxy(mut self, proxy: ProxyUrl) -> Self {
        self.proxy = Some(proxy);
        self
    }

    /// Supply an [`HttpTransport`] instead of the built-in `reqwest` one.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build a [`KavenegarClient`].
    pub fn build(self) -> Result<KavenegarClient, KavenegarError> {
        let http: Arc<dyn HttpTransport> = match self.transport {
            Some(transport) => transport,
            None => {
                let client = reqwest::Client::builder()
                    .build()
                    .map_err(|err| KavenegarError::Transport(err.to_string()))?;
                Arc::new(ReqwestTransport::new(client))
            }
        };

        Ok(KavenegarClient {
            host: self.host,
            config: Arc::new(RwLock::new(ClientConfig {
                api_key: self.api_key,
                timeout: self.timeout,
                proxy: self.proxy,
            })),
            http,
        })
    }
}

#[derive(Clone)]
/// High-level Kavenegar REST client.
///
/// Every endpoint wrapper funnels through [`KavenegarClient::translate`]:
/// parameters are normalized to the wire form, the keyed URL is built, the
/// POST is issued, and the response envelope is decoded into the `entries`
/// payload or an error.
///
/// The client is cheap to clone; clones share the transport's connection
/// pool and the mutable configuration (key, timeout, proxy). Configuration
/// setters are last-writer-wins: a call that is already in flight keeps the
/// snapshot it started with.
pub struct KavenegarClient {
    host: String,
    config: Arc<RwLock<ClientConfig>>,
    http: Arc<dyn HttpTransport>,
}

impl KavenegarClient {
    /// Create a client with default settings.
    ///
    /// For more customization, use [`KavenegarClient::builder`].
    pub fn new(api_key: ApiKey) -> Self {
        Self {
            host: API_HOST.to_owned(),
            config: Arc::new(RwLock::new(ClientConfig {
                api_key,
                timeout: DEFAULT_TIMEOUT,
                proxy: None,
            })),
            http: Arc::new(ReqwestTransport::new(reqwest::Client::new())),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(api_key: ApiKey) -> KavenegarClientBuilder {
        KavenegarClientBuilder::new(api_key)
    }

    fn config_snapshot(&self) -> ClientConfig {
        let guard = self.config.read().unwrap_or_else(PoisonError::into_inner);
        guard.clone()
    }

    /// Replace the API key. The masked form is part of [`ApiKey`], so key and
    /// mask change as one unit; calls started before the rotation finish with
    /// the old pair.
    pub fn rotate_api_key(&self, api_key: ApiKey) {
        let mut guard = self.config.write().unwrap_or_else(PoisonError::into_inner);
        guard.api_key = api_key;
    }

    /// Set the timeout for subsequent calls.
    pub fn set_timeout(&self, timeout: Duration) {
        let mut guard = self.config.write().unwrap_or_else(PoisonError::into_inner);
        guard.timeout = timeout;
    }

    /// Set or clear the outbound proxy for subsequent calls.
    pub fn set_proxy(&self, proxy: Option<ProxyUrl>) {
        let mut guard = self.config.write().unwrap_or_else(PoisonError::into_inner);
        guard.proxy = proxy;
    }

    /// The masked form of the current API key.
    pub fn masked_api_key(&self) -> String {
        self.config_snapshot().api_key.masked().to_owned()
    }

    /// Issue one `{action}/{method}` call.
    ///
    /// This is the single funnel behind every endpoint wrapper. Returns the
    /// envelope's `entries` payload (absent and `null` both map to `None`).
    ///
    /// Errors:
    /// - [`KavenegarError::Transport`] for network failures, timeouts, and
    ///   undecodable response bodies,
    /// - [`KavenegarError::Api`] when the envelope status is not 200.
    pub async fn translate(
        &self,
        action: &str,
        method: &str,
        params: RequestParams,
    ) -> Result<Option<Value>, KavenegarError> {
        let config = self.config_snapshot();
        let url = transport::build_url(&self.host, API_VERSION, &config.api_key, action, method);
        let form = transport::encode_params_form(&params);
        let options = CallOptions {
            timeout: config.timeout,
            proxy: config.proxy.clone(),
        };

        let response = match self.http.post_form(&url, form, options).await {
            Ok(response) => response,
            Err(err) => return Err(redacted_transport_error(err.as_ref(), &config.api_key)),
        };

        let decoded = transport::decode_envelope(&response.body).map_err(|err| {
            KavenegarError::Transport(redact(&err.to_string(), &config.api_key))
        })?;

        if !decoded.status.is_success() {
            return Err(KavenegarError::Api {
                status: decoded.status,
                message: decoded.message,
                envelope: decoded.envelope,
            });
        }

        Ok(decoded.entries)
    }

    /// Send one message to many receptors in a single `sms/send` call.
    ///
    /// The receptor list is submitted as JSON text, which is how the service
    /// expects array-shaped parameters.
    pub async fn send_bulk(
        &self,
        receptors: &[Receptor],
        message: &MessageText,
        sender: Option<&SenderLine>,
    ) -> Result<Option<Value>, KavenegarError> {
        let mut params = RequestParams::new();
        params.insert(
            Receptor::FIELD,
            ParamValue::List(receptors.iter().map(ParamValue::from).collect()),
        );
        params.insert(MessageText::FIELD, message.as_str());
        if let Some(sender) = sender {
            params.insert(SenderLine::FIELD, sender.as_str());
        }
        self.sms_send(params).await
    }

    /// Send to many receptors in consecutive groups of at most `chunk_size`
    /// (floored at 1), one sequential [`KavenegarClient::send_bulk`] call per
    /// group. Results come back in group order; the first failing group
    /// aborts the rest, so the caller sees exactly where the batch stopped.
    pub async fn send_bulk_chunked(
        &self,
        receptors: &[Receptor],
        message: &MessageText,
        sender: Option<&SenderLine>,
        chunk_size: usize,
    ) -> Result<Vec<Option<Value>>, KavenegarError> {
        let chunk_size = chunk_size.max(1);
        let mut results = Vec::with_capacity(receptors.len().div_ceil(chunk_size));
        for group in receptors.chunks(chunk_size) {
            results.push(self.send_bulk(group, message, sender).await?);
        }
        Ok(results)
    }

    /// Delivery status for one message id or a list of them (`sms/status`).
    pub async fn check_sms_delivery(
        &self,
        message_id: impl Into<ParamValue>,
    ) -> Result<Option<Value>, KavenegarError> {
        self.sms_status(RequestParams::new().with("messageid", message_id))
            .await
    }

    /// Parse an inbound webhook payload (delivery reports, inbound SMS).
    ///
    /// Text payloads are parsed as JSON; a parse failure is a
    /// [`KavenegarError::Transport`]. Already-structured payloads pass
    /// through unchanged.
    pub fn parse_webhook(
        &self,
        payload: impl Into<WebhookPayload>,
    ) -> Result<Value, KavenegarError> {
        match payload.into() {
            WebhookPayload::Text(text) => serde_json::from_str(&text)
                .map_err(|err| KavenegarError::Transport(err.to_string())),
            WebhookPayload::Structured(value) => Ok(value),
        }
    }

    /// Probe `account/info` and `sms/latestoutbox` independently and report
    /// each as reachable or not. Never returns an error; any probe failure,
    /// transport or API, reads as `false` for that flag.
    pub async fn healthcheck(&self) -> HealthReport {
        let account = self.account_info().await.is_ok();
        let sms = self.sms_latestoutbox(RequestParams::new()).await.is_ok();
        HealthReport { account, sms }
    }

    /// Remaining credit from `account/info`, when the service reports it as
    /// the `remaincredit` field of the first entries record. `None` when the
    /// payload has some other shape; API and transport errors still
    /// propagate.
    pub async fn account_balance(&self) -> Result<Option<Value>, KavenegarError> {
        let entries = self.account_info().await?;
        Ok(match entries {
            Some(Value::Array(records)) => records
                .first()
                .and_then(|record| record.get("remaincredit"))
                .cloned(),
            _ => None,
        })
    }
}

impl fmt::Debug for KavenegarClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.config_snapshot();
        f.debug_struct("KavenegarClient")
            .field("api_key", &config.api_key)
            .field("host", &self.host)
            .field("timeout", &config.timeout)
            .field("proxy", &config.proxy)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for KavenegarClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KavenegarClient({})", self.config_snapshot().api_key)
    }
}

fn redact(text: &str, api_key: &ApiKey) -> String {
    text.replace(api_key.secret(), api_key.masked())
}

/// Flatten the error chain into one line and mask the key everywhere.
/// Network errors routinely echo the request URL, which carries the raw key
/// in its path.
fn redacted_transport_error(
    err: &(dyn StdError + Send + Sync),
    api_key: &ApiKey,
) -> KavenegarError {
    let mut text = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        text.push_str(": ");
        text.push_str(&cause.to_string());
        source = cause.source();
    }
    KavenegarError::Transport(redact(&text, api_key))
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use super::{BoxFuture, CallOptions, HttpTransport, KavenegarClient, RawResponse};
    use crate::domain::{ApiKey, ProxyUrl};
    use std::error::Error as StdError;

    pub(crate) const TEST_KEY: &str = "SECRETKEY123";
    pub(crate) const TEST_KEY_MASKED: &str = "SE********23";

    pub(crate) fn ok_body(entries: &str) -> String {
        format!(r#"{{"return":{{"status":200,"message":""}},"entries":{entries}}}"#)
    }

    #[derive(Debug)]
    pub(crate) struct RecordedRequest {
        pub url: String,
        pub form: Vec<(String, String)>,
        pub timeout: Duration,
        pub proxy: Option<ProxyUrl>,
    }

    #[derive(Debug)]
    enum Scripted {
        Body(String),
        Error(String),
    }

    #[derive(Debug, Clone)]
    pub(crate) struct FakeTransport {
        state: Arc<Mutex<FakeState>>,
    }

    #[derive(Debug)]
    struct FakeState {
        requests: Vec<RecordedRequest>,
        script: VecDeque<Scripted>,
    }

    impl FakeTransport {
        pub(crate) fn new() -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeState {
                    requests: Vec::new(),
                    script: VecDeque::new(),
                })),
            }
        }

        pub(crate) fn push_body(&self, body: impl Into<String>) {
            self.state
                .lock()
                .unwrap()
                .script
                .push_back(Scripted::Body(body.into()));
        }

        pub(crate) fn push_error(&self, message: impl Into<String>) {
            self.state
                .lock()
                .unwrap()
                .script
                .push_back(Scripted::Error(message.into()));
        }

        pub(crate) fn request_count(&self) -> usize {
            self.state.lock().unwrap().requests.len()
        }

        pub(crate) fn urls(&self) -> Vec<String> {
            self.state
                .lock()
                .unwrap()
                .requests
                .iter()
                .map(|request| request.url.clone())
                .collect()
        }

        pub(crate) fn request(&self, index: usize) -> (String, Vec<(String, String)>) {
            let state = self.state.lock().unwrap();
            let request = &state.requests[index];
            (request.url.clone(), request.form.clone())
        }

        pub(crate) fn timeouts(&self) -> Vec<Duration> {
            self.state
                .lock()
                .unwrap()
                .requests
                .iter()
                .map(|request| request.timeout)
                .collect()
        }

        pub(crate) fn proxies(&self) -> Vec<Option<ProxyUrl>> {
            self.state
                .lock()
                .unwrap()
                .requests
                .iter()
                .map(|request| request.proxy.clone())
                .collect()
        }
    }

    impl HttpTransport for FakeTransport {
        fn post_form<'a>(
            &'a self,
            url: &'a str,
            form: Vec<(String, String)>,
            options: CallOptions,
        ) -> BoxFuture<'a, Result<RawResponse, Box<dyn StdError + Send + Sync>>> {
            Box::pin(async move {
                let scripted = {
                    let mut state = self.state.lock().unwrap();
                    state.requests.push(RecordedRequest {
                        url: url.to_owned(),
                        form,
                        timeout: options.timeout,
                        proxy: options.proxy.clone(),
                    });
                    state
                        .script
                        .pop_front()
                        .expect("FakeTransport script exhausted")
                };
                match scripted {
                    Scripted::Body(body) => Ok(RawResponse {
                        body: body.into_bytes(),
                    }),
                    Scripted::Error(message) => Err(message.into()),
                }
            })
        }
    }

    pub(crate) fn make_client(transport: FakeTransport) -> KavenegarClient {
        KavenegarClient::builder(ApiKey::new(TEST_KEY).unwrap())
            .transport(Arc::new(transport))
            .build()
            .unwrap()
    }
}
