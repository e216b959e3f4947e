//! `call/*` endpoint wrappers: text-to-speech and call control.

use serde_json::Value;

use crate::client::{KavenegarClient, KavenegarError};
use crate::domain::RequestParams;

impl KavenegarClient {
    /// `call/maketts`: place a call that reads `message` out as speech.
    pub async fn call_maketts(
        &self,
        params: RequestParams,
    ) -> Result<Option<Value>, KavenegarError> {
        self.translate("call", "maketts", params).await
    }

    /// `call/status`: status of placed calls by id.
    pub async fn call_status(
        &self,
        params: RequestParams,
    ) -> Result<Option<Value>, KavenegarError> {
        self.translate("call", "status", params).await
    }

    /// `call/outbound`: outbound call log.
    pub async fn call_outbound(
        &self,
        params: RequestParams,
    ) -> Result<Option<Value>, KavenegarError> {
        self.translate("call", "outbound", params).await
    }

    /// `call/cancel`: cancel a pending call.
    pub async fn call_cancel(
        &self,
        params: RequestParams,
    ) -> Result<Option<Value>, KavenegarError> {
        self.translate("call", "cancel", params).await
    }

    /// `call/inbound`: inbound call log.
    pub async fn call_inbound(
        &self,
        params: RequestParams,
    ) -> Result<Option<Value>, KavenegarError> {
        self.translate("call", "inbound", params).await
    }

    /// `call/play`: play a prerecorded message into a call.
    pub async fn call_play(&self, params: RequestParams) -> Result<Option<Value>, KavenegarError> {
        self.translate("call", "play", params).await
    }

    /// `call/transfer`: transfer a call to another line. Availability varies
    /// by account plan.
    pub async fn call_transfer(
        &self,
        params: RequestParams,
    ) -> Result<Option<Value>, KavenegarError> {
        self.translate("call", "transfer", params).await
    }

    /// `call/record`: retrieve call recordings. Availability varies by
    /// account plan.
    pub async fn call_record(
        &self,
        params: RequestParams,
    ) -> Result<Option<Value>, KavenegarError> {
        self.translate("call", "record", params).await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::testing::{FakeTransport, make_client, ok_body};
    use crate::domain::RequestParams;

    #[tokio::test]
    async fn wrappers_route_to_their_call_endpoints() {
        let transport = FakeTransport::new();
        for _ in 0..8 {
            transport.push_body(ok_body("[]"));
        }
        let client = make_client(transport.clone());

        client.call_maketts(RequestParams::new()).await.unwrap();
        client.call_status(RequestParams::new()).await.unwrap();
        client.call_outbound(RequestParams::new()).await.unwrap();
        client.call_cancel(RequestParams::new()).await.unwrap();
        client.call_inbound(RequestParams::new()).await.unwrap();
        client.call_play(RequestParams::new()).await.unwrap();
        client.call_transfer(RequestParams::new()).await.unwrap();
        client.call_record(RequestParams::new()).await.unwrap();

        let methods = [
            "maketts", "status", "outbound", "cancel", "inbound", "play", "transfer", "record",
        ];
        let urls = transport.urls();
        assert_eq!(urls.len(), methods.len());
        for (url, method) in urls.iter().zip(methods) {
            assert!(
                url.ends_with(&format!("/call/{method}.json")),
                "{url} does not route to call/{method}"
            );
        }
    }
}
