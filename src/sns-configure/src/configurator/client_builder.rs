// Copyright 2026 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use super::client::Configurator;

const LOGGING_VAR: &str = "SNS_CONFIGURE_LOGGING";

/// A builder for [Configurator].
///
/// Settings that are not configured fall back to the AWS defaults: the region
/// and credentials come from the environment, the shared configuration files,
/// or the instance metadata service.
///
/// # Example
/// ```no_run
/// # use sns_configure::client::Configurator;
/// # async fn sample() {
/// let builder = Configurator::builder();
/// let client = builder
///     .with_region("sa-east-1")
///     .build()
///     .await;
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct ClientBuilder {
    pub(super) region: Option<String>,
    pub(super) credentials: Option<StaticCredentials>,
    pub(super) endpoint: Option<String>,
    pub(super) tracing: bool,
}

impl ClientBuilder {
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// Creates a new client.
    ///
    /// # Example
    /// ```no_run
    /// # use sns_configure::client::Configurator;
    /// # async fn sample() {
    /// let client = Configurator::builder().build().await;
    /// # }
    /// ```
    pub async fn build(self) -> Configurator {
        Configurator::new(self).await
    }

    /// Sets the AWS region, for example `sa-east-1`.
    ///
    /// # Example
    /// ```no_run
    /// # use sns_configure::client::Configurator;
    /// # async fn sample() {
    /// let client = Configurator::builder()
    ///     .with_region("us-east-1")
    ///     .build()
    ///     .await;
    /// # }
    /// ```
    pub fn with_region<V: Into<String>>(mut self, v: V) -> Self {
        self.region = Some(v.into());
        self
    }

    /// Configures static access keys.
    ///
    /// By default the client uses the [default credentials provider chain].
    /// Prefer the default chain over access keys embedded in the application.
    ///
    /// # Example
    /// ```no_run
    /// # use sns_configure::client::Configurator;
    /// # async fn sample() {
    /// let client = Configurator::builder()
    ///     .with_credentials("AKIDEXAMPLE", "wJalrXUtnFEMI/K7MDENG/bPxRfiCYEXAMPLEKEY")
    ///     .build()
    ///     .await;
    /// # }
    /// ```
    ///
    /// [default credentials provider chain]: https://docs.aws.amazon.com/sdk-for-rust/latest/dg/credproviders.html
    pub fn with_credentials<K, S>(mut self, access_key_id: K, secret_access_key: S) -> Self
    where
        K: Into<String>,
        S: Into<String>,
    {
        let session_token = self.credentials.take().and_then(|c| c.session_token);
        self.credentials = Some(StaticCredentials {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token,
        });
        self
    }

    /// Sets the session token used with temporary access keys.
    ///
    /// Has no effect unless [with_credentials()][Self::with_credentials] is
    /// also called.
    pub fn with_session_token<V: Into<String>>(mut self, v: V) -> Self {
        let token = v.into();
        match self.credentials.as_mut() {
            Some(c) => c.session_token = Some(token),
            None => {
                self.credentials = Some(StaticCredentials {
                    session_token: Some(token),
                    ..Default::default()
                })
            }
        }
        self
    }

    /// Sets the endpoint for both SNS and SQS.
    ///
    /// Use this to run against an emulator such as LocalStack.
    ///
    /// # Example
    /// ```no_run
    /// # use sns_configure::client::Configurator;
    /// # async fn sample() {
    /// let client = Configurator::builder()
    ///     .with_endpoint("http://localhost:4566")
    ///     .build()
    ///     .await;
    /// # }
    /// ```
    pub fn with_endpoint<V: Into<String>>(mut self, v: V) -> Self {
        self.endpoint = Some(v.into());
        self
    }

    /// Enables tracing.
    ///
    /// Every request to SNS and SQS runs in a [tracing] span. Setting the
    /// `SNS_CONFIGURE_LOGGING` environment variable to `true` has the same
    /// effect.
    ///
    /// [tracing]: https://docs.rs/tracing/latest/tracing/
    pub fn with_tracing(mut self) -> Self {
        self.tracing = true;
        self
    }

    pub(super) fn tracing_enabled(&self) -> bool {
        if self.tracing {
            return true;
        }
        std::env::var(LOGGING_VAR)
            .map(|v| v == "true")
            .unwrap_or(false)
    }
}

#[derive(Clone, Default)]
pub(super) struct StaticCredentials {
    pub(super) access_key_id: String,
    pub(super) secret_access_key: String,
    pub(super) session_token: Option<String>,
}

impl StaticCredentials {
    pub(super) fn is_complete(&self) -> bool {
        !self.access_key_id.is_empty() && !self.secret_access_key.is_empty()
    }
}

impl std::fmt::Debug for StaticCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StaticCredentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"[censored]")
            .field("session_token", &self.session_token.as_ref().map(|_| "[censored]"))
            .finish()
    }
}

impl From<StaticCredentials> for aws_sdk_sns::config::Credentials {
    fn from(value: StaticCredentials) -> Self {
        Self::new(
            value.access_key_id,
            value.secret_access_key,
            value.session_token,
            None,
            "sns-configure",
        )
    }
}
