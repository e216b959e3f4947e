//! `account/*` endpoint wrappers.

use serde_json::Value;

use crate::client::{KavenegarClient, KavenegarError};
use crate::domain::RequestParams;

impl KavenegarClient {
    /// `account/info`: account status and remaining credit. Takes no
    /// parameters.
    pub async fn account_info(&self) -> Result<Option<Value>, KavenegarError> {
        self.translate("account", "info", RequestParams::new()).await
    }

    /// `account/config`: read or update account-level settings such as the
    /// daily report and the default sender line.
    pub async fn account_config(
        &self,
        params: RequestParams,
    ) -> Result<Option<Value>, KavenegarError> {
        self.translate("account", "config", params).await
    }

    /// `account/usage`: usage figures in a date range.
    pub async fn account_usage(
        &self,
        params: RequestParams,
    ) -> Result<Option<Value>, KavenegarError> {
        self.translate("account", "usage", params).await
    }

    /// `account/transactions`: credit transaction log.
    pub async fn account_transactions(
        &self,
        params: RequestParams,
    ) -> Result<Option<Value>, KavenegarError> {
        self.translate("account", "transactions", params).await
    }

    /// `account/webhooks`: registered webhook endpoints.
    pub async fn account_webhooks(
        &self,
        params: RequestParams,
    ) -> Result<Option<Value>, KavenegarError> {
        self.translate("account", "webhooks", params).await
    }

    /// `account/blocked`: receptors the account is blocked from reaching.
    pub async fn account_blocked(
        &self,
        params: RequestParams,
    ) -> Result<Option<Value>, KavenegarError> {
        self.translate("account", "blocked", params).await
    }
}
