//! `sms/*` endpoint wrappers.
//!
//! Each method names one fixed `{action}/{method}` pair and forwards the
//! caller's parameters through [`KavenegarClient::translate`] verbatim.
//! Parameter names and semantics are the service's own; see
//! <https://kavenegar.com/rest.html>.

use serde_json::Value;

use crate::client::{KavenegarClient, KavenegarError};
use crate::domain::RequestParams;

impl KavenegarClient {
    /// `sms/send`: queue a message for one or more receptors.
    pub async fn sms_send(&self, params: RequestParams) -> Result<Option<Value>, KavenegarError> {
        self.translate("sms", "send", params).await
    }

    /// `sms/sendarray`: pairwise send, one message per receptor. The
    /// `receptor`, `sender`, and `message` parameters are parallel lists and
    /// are submitted as JSON text by the normalizer.
    pub async fn sms_sendarray(
        &self,
        params: RequestParams,
    ) -> Result<Option<Value>, KavenegarError> {
        self.translate("sms", "sendarray", params).await
    }

    /// `sms/status`: delivery status by message id.
    pub async fn sms_status(&self, params: RequestParams) -> Result<Option<Value>, KavenegarError> {
        self.translate("sms", "status", params).await
    }

    /// `sms/statuslocalmessageid`: delivery status by the caller's local id.
    pub async fn sms_statuslocalmessageid(
        &self,
        params: RequestParams,
    ) -> Result<Option<Value>, KavenegarError> {
        self.translate("sms", "statuslocalmessageid", params).await
    }

    /// `sms/select`: fetch messages by id.
    pub async fn sms_select(&self, params: RequestParams) -> Result<Option<Value>, KavenegarError> {
        self.translate("sms", "select", params).await
    }

    /// `sms/selectoutbox`: outbox messages in a date range.
    pub async fn sms_selectoutbox(
        &self,
        params: RequestParams,
    ) -> Result<Option<Value>, KavenegarError> {
        self.translate("sms", "selectoutbox", params).await
    }

    /// `sms/latestoutbox`: most recent sent messages.
    pub async fn sms_latestoutbox(
        &self,
        params: RequestParams,
    ) -> Result<Option<Value>, KavenegarError> {
        self.translate("sms", "latestoutbox", params).await
    }

    /// `sms/countoutbox`: sent-message counts in a date range.
    pub async fn sms_countoutbox(
        &self,
        params: RequestParams,
    ) -> Result<Option<Value>, KavenegarError> {
        self.translate("sms", "countoutbox", params).await
    }

    /// `sms/cancel`: cancel a scheduled message.
    pub async fn sms_cancel(&self, params: RequestParams) -> Result<Option<Value>, KavenegarError> {
        self.translate("sms", "cancel", params).await
    }

    /// `sms/receive`: drain received messages for a line.
    pub async fn sms_receive(
        &self,
        params: RequestParams,
    ) -> Result<Option<Value>, KavenegarError> {
        self.translate("sms", "receive", params).await
    }

    /// `sms/countinbox`: received-message counts in a date range.
    pub async fn sms_countinbox(
        &self,
        params: RequestParams,
    ) -> Result<Option<Value>, KavenegarError> {
        self.translate("sms", "countinbox", params).await
    }

    /// `sms/countpostalcode`: receptor counts per postal-code area.
    pub async fn sms_countpostalcode(
        &self,
        params: RequestParams,
    ) -> Result<Option<Value>, KavenegarError> {
        self.translate("sms", "countpostalcode", params).await
    }

    /// `sms/sendbypostalcode`: send to every number in a postal-code area.
    pub async fn sms_sendbypostalcode(
        &self,
        params: RequestParams,
    ) -> Result<Option<Value>, KavenegarError> {
        self.translate("sms", "sendbypostalcode", params).await
    }

    /// `sms/selectinbox`: fetch received messages in a date range.
    pub async fn sms_selectinbox(
        &self,
        params: RequestParams,
    ) -> Result<Option<Value>, KavenegarError> {
        self.translate("sms", "selectinbox", params).await
    }

    /// `sms/archive`: move inbox messages to the archive.
    pub async fn sms_archive(
        &self,
        params: RequestParams,
    ) -> Result<Option<Value>, KavenegarError> {
        self.translate("sms", "archive", params).await
    }

    /// `sms/blacklist`: manage blacklisted receptors. Availability varies by
    /// account plan.
    pub async fn sms_blacklist(
        &self,
        params: RequestParams,
    ) -> Result<Option<Value>, KavenegarError> {
        self.translate("sms", "blacklist", params).await
    }

    /// `sms/unsubscribe`: opt a receptor out. Availability varies by account
    /// plan.
    pub async fn sms_unsubscribe(
        &self,
        params: RequestParams,
    ) -> Result<Option<Value>, KavenegarError> {
        self.translate("sms", "unsubscribe", params).await
    }
}

#[cfg(test)]
mod tests {
    use crate::client::testing::{FakeTransport, make_client, ok_body};
    use crate::domain::RequestParams;

    #[tokio::test]
    async fn wrappers_route_to_their_sms_endpoints() {
        let transport = FakeTransport::new();
        for _ in 0..17 {
            transport.push_body(ok_body("[]"));
        }
        let client = make_client(transport.clone());

        client.sms_send(RequestParams::new()).await.unwrap();
        client.sms_sendarray(RequestParams::new()).await.unwrap();
        client.sms_status(RequestParams::new()).await.unwrap();
        client
            .sms_statuslocalmessageid(RequestParams::new())
            .await
            .unwrap();
        client.sms_select(RequestParams::new()).await.unwrap();
        client.sms_selectoutbox(RequestParams::new()).await.unwrap();
        client.sms_latestoutbox(RequestParams::new()).await.unwrap();
        client.sms_countoutbox(RequestParams::new()).await.unwrap();
        client.sms_cancel(RequestParams::new()).await.unwrap();
        client.sms_receive(RequestParams::new()).await.unwrap();
        client.sms_countinbox(RequestParams::new()).await.unwrap();
        client
            .sms_countpostalcode(RequestParams::new())
            .await
            .unwrap();
        client
            .sms_sendbypostalcode(RequestParams::new())
            .await
            .unwrap();
        client.sms_selectinbox(RequestParams::new()).await.unwrap();
        client.sms_archive(RequestParams::new()).await.unwrap();
        client.sms_blacklist(RequestParams::new()).await.unwrap();
        client.sms_unsubscribe(RequestParams::new()).await.unwrap();

        let methods = [
            "send",
            "sendarray",
            "status",
            "statuslocalmessageid",
            "select",
            "selectoutbox",
            "latestoutbox",
            "countoutbox",
            "cancel",
            "receive",
            "countinbox",
            "countpostalcode",
            "sendbypostalcode",
            "selectinbox",
            "archive",
            "blacklist",
            "unsubscribe",
        ];
        let urls = transport.urls();
        assert_eq!(urls.len(), methods.len());
        for (url, method) in urls.iter().zip(methods) {
            assert!(
                url.ends_with(&format!("/sms/{method}.json")),
                "{url} does not route to sms/{method}"
            );
        }
    }
}
