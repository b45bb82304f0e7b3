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

//! Traits to mock the SNS and SQS services.
//!
//! Application developers may need to implement these traits to test code
//! using [Configurator][crate::client::Configurator] without reaching AWS. In
//! other use-cases, application developers only use the `Configurator` and
//! need not be concerned with these traits or their implementations.

use crate::Result;
use crate::model::SubscriptionPage;

/// Defines the SNS operations used by [crate::client::Configurator].
#[async_trait::async_trait]
pub trait TopicService: std::fmt::Debug + Send + Sync {
    /// Creates a topic, or returns the existing topic with the same name.
    ///
    /// Returns the topic ARN.
    async fn create_topic(&self, name: &str) -> Result<String>;

    /// Returns one page of the subscriptions to `topic_arn`.
    async fn list_subscriptions_by_topic(
        &self,
        topic_arn: &str,
        next_token: Option<String>,
    ) -> Result<SubscriptionPage>;

    /// Subscribes `endpoint` to `topic_arn`.
    ///
    /// Returns the subscription ARN, if the service reports one.
    async fn subscribe(
        &self,
        topic_arn: &str,
        protocol: &str,
        endpoint: &str,
    ) -> Result<Option<String>>;
}

/// Defines the SQS operations used by [crate::client::Configurator].
#[async_trait::async_trait]
pub trait QueueService: std::fmt::Debug + Send + Sync {
    /// Returns the URL of the queue named `queue_name`.
    async fn get_queue_url(&self, queue_name: &str) -> Result<String>;

    /// Returns the value of the `name` attribute, `None` if the queue does
    /// not have one.
    async fn get_queue_attribute(&self, queue_url: &str, name: &str) -> Result<Option<String>>;

    /// Replaces the value of the `name` attribute.
    async fn set_queue_attribute(&self, queue_url: &str, name: &str, value: String) -> Result<()>;
}
