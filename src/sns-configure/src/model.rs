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

//! The resources exchanged with SNS and returned by the configurator.

/// A subscription of an endpoint to an SNS topic.
///
/// # Example
/// ```
/// use sns_configure::model::Subscription;
/// let subscription = Subscription::new()
///     .set_protocol("sqs")
///     .set_endpoint("arn:aws:sqs:sa-east-1:111111111111:my-queue");
/// assert_eq!(subscription.protocol, "sqs");
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct Subscription {
    /// The subscription ARN. SNS reports `PendingConfirmation` for
    /// subscriptions that are not confirmed yet.
    pub subscription_arn: Option<String>,

    /// The account that owns the subscription.
    pub owner: Option<String>,

    /// The delivery protocol, for example `sqs`, `https`, or `email`.
    pub protocol: String,

    /// The endpoint receiving messages. For `sqs` subscriptions this is the
    /// queue ARN.
    pub endpoint: String,

    /// The ARN of the subscribed topic.
    pub topic_arn: Option<String>,
}

impl Subscription {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [subscription_arn][Subscription::subscription_arn].
    pub fn set_subscription_arn<T: Into<String>>(mut self, v: T) -> Self {
        self.subscription_arn = Some(v.into());
        self
    }

    /// Sets the value of [owner][Subscription::owner].
    pub fn set_owner<T: Into<String>>(mut self, v: T) -> Self {
        self.owner = Some(v.into());
        self
    }

    /// Sets the value of [protocol][Subscription::protocol].
    pub fn set_protocol<T: Into<String>>(mut self, v: T) -> Self {
        self.protocol = v.into();
        self
    }

    /// Sets the value of [endpoint][Subscription::endpoint].
    pub fn set_endpoint<T: Into<String>>(mut self, v: T) -> Self {
        self.endpoint = v.into();
        self
    }

    /// Sets the value of [topic_arn][Subscription::topic_arn].
    pub fn set_topic_arn<T: Into<String>>(mut self, v: T) -> Self {
        self.topic_arn = Some(v.into());
        self
    }
}

/// One page of `ListSubscriptionsByTopic` results.
#[derive(Clone, Debug, Default, PartialEq)]
#[non_exhaustive]
pub struct SubscriptionPage {
    pub subscriptions: Vec<Subscription>,

    /// The token to request the next page, `None` on the last page.
    pub next_token: Option<String>,
}

impl SubscriptionPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the value of [subscriptions][SubscriptionPage::subscriptions].
    pub fn set_subscriptions<T, V>(mut self, v: T) -> Self
    where
        T: IntoIterator<Item = V>,
        V: Into<Subscription>,
    {
        self.subscriptions = v.into_iter().map(|i| i.into()).collect();
        self
    }

    /// Sets the value of [next_token][SubscriptionPage::next_token].
    pub fn set_next_token<T: Into<String>>(mut self, v: T) -> Self {
        self.next_token = Some(v.into());
        self
    }
}

/// A queue subscribed to a topic, with the URL used to address the queue.
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct QueueSubscription {
    pub subscription: Subscription,

    /// The queue URL, derived from the queue ARN.
    pub queue_url: String,
}

/// What [configure_subscription_with_permissions] changed.
///
/// [configure_subscription_with_permissions]: crate::client::Configurator::configure_subscription_with_permissions
#[derive(Clone, Debug, PartialEq)]
#[non_exhaustive]
pub struct ConfigureOutcome {
    pub subscription: QueueSubscription,

    /// `true` if the queue was not subscribed before this call.
    pub subscription_created: bool,

    pub policy: PolicyChange,
}

impl ConfigureOutcome {
    /// Returns `true` if the call modified neither the subscriptions nor the
    /// queue policy.
    pub fn is_unchanged(&self) -> bool {
        !self.subscription_created && self.policy == PolicyChange::Unchanged
    }
}

/// How the queue policy was updated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum PolicyChange {
    /// The policy already granted the topic permission to send messages.
    Unchanged,
    /// A grant for the topic was appended to the existing policy.
    Appended,
    /// The queue had no policy, a new one with a single grant was created.
    Created,
}
