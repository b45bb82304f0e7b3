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

use super::client_builder::ClientBuilder;
use crate::arn::QueueArn;
use crate::model::{ConfigureOutcome, PolicyChange, QueueSubscription};
use crate::policy::{PolicyDocument, Statement};
use crate::stub::{QueueService, TopicService};
use crate::tracing::{QueueServiceTracing, TopicServiceTracing};
use crate::{Error, POLICY_ATTRIBUTE, QUEUE_PROTOCOL, Result};
use aws_config::{BehaviorVersion, Region};
use std::sync::Arc;

/// Subscribes SQS queues to SNS topics and grants the topics permission to
/// send messages to the queues.
///
/// The main entry point is
/// [configure_subscription_with_permissions()][Self::configure_subscription_with_permissions].
/// The building blocks it uses are public too, for applications that need to
/// run the steps separately.
///
/// # Configuration
///
/// To configure a `Configurator` use the `with_*` methods in the type returned
/// by [builder()][Configurator::builder]. The default configuration should
/// work for most applications. Common configuration changes include:
///
/// * [with_region()]: by default the region comes from the environment or the
///   shared AWS configuration files.
/// * [with_credentials()]: by default this client uses the default AWS
///   credentials provider chain.
///
/// # Pooling and Cloning
///
/// `Configurator` holds the SNS and SQS clients internally. You do not need
/// to wrap `Configurator` in an [Rc](std::rc::Rc) or [Arc] to reuse it,
/// because it already uses an `Arc` internally.
///
/// [with_region()]: ClientBuilder::with_region
/// [with_credentials()]: ClientBuilder::with_credentials
#[derive(Clone, Debug)]
pub struct Configurator {
    topics: Arc<dyn TopicService>,
    queues: Arc<dyn QueueService>,
}

impl Configurator {
    /// Returns a builder for [Configurator].
    ///
    /// # Example
    /// ```no_run
    /// # use sns_configure::client::Configurator;
    /// # async fn sample() {
    /// let client = Configurator::builder().build().await;
    /// # }
    /// ```
    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    /// Creates a new client from the provided stubs.
    ///
    /// The most common case for calling this function is in tests mocking the
    /// client's behavior.
    pub fn from_stubs<T, Q>(topics: T, queues: Q) -> Self
    where
        T: TopicService + 'static,
        Q: QueueService + 'static,
    {
        Self {
            topics: Arc::new(topics),
            queues: Arc::new(queues),
        }
    }

    pub(super) async fn new(builder: ClientBuilder) -> Self {
        let tracing = builder.tracing_enabled();
        let mut loader = aws_config::defaults(BehaviorVersion::latest());
        if let Some(region) = builder.region {
            loader = loader.region(Region::new(region));
        }
        if let Some(credentials) = builder.credentials.filter(|c| c.is_complete()) {
            loader = loader.credentials_provider(aws_sdk_sns::config::Credentials::from(credentials));
        }
        if let Some(endpoint) = builder.endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        let config = loader.load().await;

        let topics: Arc<dyn TopicService> = Arc::new(aws_sdk_sns::Client::new(&config));
        let queues: Arc<dyn QueueService> = Arc::new(aws_sdk_sqs::Client::new(&config));
        if !tracing {
            return Self { topics, queues };
        }
        Self {
            topics: Arc::new(TopicServiceTracing::new(topics)),
            queues: Arc::new(QueueServiceTracing::new(queues)),
        }
    }

    /// Creates a topic, or gets the existing topic with the same name.
    ///
    /// Returns the topic ARN. SNS returns the ARN of the existing topic when
    /// called again with the same name.
    ///
    /// # Example
    /// ```no_run
    /// # use sns_configure::client::Configurator;
    /// # async fn sample(client: &Configurator) -> sns_configure::Result<()> {
    /// let topic_arn = client.create_or_get_topic("my-topic").await?;
    /// println!("topic is {topic_arn}");
    /// # Ok(()) }
    /// ```
    pub async fn create_or_get_topic(&self, name: &str) -> Result<String> {
        if name.is_empty() {
            return Err(Error::InvalidArgument("the topic name must not be empty"));
        }
        self.topics.create_topic(name).await
    }

    /// Subscribes a queue to a topic using the `sqs` protocol.
    ///
    /// This always creates a new subscription request. Use
    /// [find_queue_subscription()][Self::find_queue_subscription] first to
    /// avoid duplicates.
    ///
    /// Returns the subscription ARN, if SNS reports one.
    pub async fn subscribe_queue_to_topic(
        &self,
        topic_arn: &str,
        queue_arn: &str,
    ) -> Result<Option<String>> {
        self.topics
            .subscribe(topic_arn, QUEUE_PROTOCOL, queue_arn)
            .await
    }

    /// Returns the URL of the queue named `queue_name`.
    pub async fn queue_url(&self, queue_name: &str) -> Result<String> {
        self.queues.get_queue_url(queue_name).await
    }

    /// Finds the subscription of `queue_arn` to `topic_arn`.
    ///
    /// Searches all the subscriptions of the topic, page by page, for the
    /// first `sqs` subscription whose endpoint is exactly `queue_arn`. The
    /// result includes the queue URL derived from `queue_arn`.
    ///
    /// # Example
    /// ```no_run
    /// # use sns_configure::client::Configurator;
    /// # async fn sample(client: &Configurator) -> sns_configure::Result<()> {
    /// let found = client
    ///     .find_queue_subscription(
    ///         "arn:aws:sns:sa-east-1:111111111111:my-topic",
    ///         "arn:aws:sqs:sa-east-1:111111111111:my-queue",
    ///     )
    ///     .await?;
    /// if let Some(s) = found {
    ///     println!("subscribed, queue url is {}", s.queue_url);
    /// }
    /// # Ok(()) }
    /// ```
    pub async fn find_queue_subscription(
        &self,
        topic_arn: &str,
        queue_arn: &str,
    ) -> Result<Option<QueueSubscription>> {
        let queue = queue_arn.parse::<QueueArn>()?;
        let mut next_token = None;
        loop {
            let page = self
                .topics
                .list_subscriptions_by_topic(topic_arn, next_token)
                .await?;
            let found = page
                .subscriptions
                .into_iter()
                .find(|s| s.endpoint == queue_arn && s.protocol == QUEUE_PROTOCOL);
            if let Some(subscription) = found {
                return Ok(Some(QueueSubscription {
                    subscription,
                    queue_url: queue.queue_url(),
                }));
            }
            match page.next_token {
                Some(token) if !token.is_empty() => next_token = Some(token),
                _ => return Ok(None),
            }
        }
    }

    /// Returns the access policy of the queue at `queue_url`.
    ///
    /// Returns `None` if the queue has no policy, which is the case for new
    /// queues.
    pub async fn queue_policy(&self, queue_url: &str) -> Result<Option<PolicyDocument>> {
        let value = self
            .queues
            .get_queue_attribute(queue_url, POLICY_ATTRIBUTE)
            .await?;
        match value {
            Some(json) if !json.is_empty() => PolicyDocument::from_json(&json).map(Some),
            _ => Ok(None),
        }
    }

    /// Sets a new access policy containing only `statement`.
    ///
    /// Use this for queues without a policy. The document has the same
    /// version and id SQS uses for the policies it creates.
    pub async fn create_queue_policy(
        &self,
        queue_url: &str,
        queue_arn: &str,
        statement: Statement,
    ) -> Result<()> {
        let policy = PolicyDocument::for_queue(queue_arn, statement);
        self.set_queue_policy(queue_url, &policy).await
    }

    /// Replaces the access policy of the queue at `queue_url`.
    pub async fn set_queue_policy(&self, queue_url: &str, policy: &PolicyDocument) -> Result<()> {
        let json = policy.to_json()?;
        self.queues
            .set_queue_attribute(queue_url, POLICY_ATTRIBUTE, json)
            .await
    }

    /// Subscribes the queue to the topic and lets the topic send messages to
    /// the queue.
    ///
    /// The function is safe to call repeatedly. When the queue is already
    /// subscribed and the queue policy already has a grant for the topic, it
    /// only reads from SNS and SQS.
    ///
    /// There is no rollback. If updating the policy fails, the subscription
    /// created by this call remains and calling the function again completes
    /// the configuration.
    ///
    /// # Example
    /// ```no_run
    /// # use sns_configure::client::Configurator;
    /// # async fn sample(client: &Configurator) -> sns_configure::Result<()> {
    /// let outcome = client
    ///     .configure_subscription_with_permissions(
    ///         "arn:aws:sns:sa-east-1:111111111111:my-topic",
    ///         "arn:aws:sqs:sa-east-1:111111111111:my-queue",
    ///     )
    ///     .await?;
    /// println!("created subscription = {}", outcome.subscription_created);
    /// # Ok(()) }
    /// ```
    pub async fn configure_subscription_with_permissions(
        &self,
        topic_arn: &str,
        queue_arn: &str,
    ) -> Result<ConfigureOutcome> {
        let (subscription, subscription_created) =
            match self.find_queue_subscription(topic_arn, queue_arn).await? {
                Some(s) => {
                    tracing::debug!(topic_arn, queue_arn, "queue already subscribed");
                    (s, false)
                }
                None => {
                    let subscription_arn = self.subscribe_queue_to_topic(topic_arn, queue_arn).await?;
                    tracing::info!(topic_arn, queue_arn, ?subscription_arn, "subscribed queue to topic");
                    let s = self
                        .find_queue_subscription(topic_arn, queue_arn)
                        .await?
                        .ok_or_else(|| Error::SubscriptionNotFoundAfterCreate {
                            topic_arn: topic_arn.to_string(),
                            queue_arn: queue_arn.to_string(),
                        })?;
                    (s, true)
                }
            };

        let queue_url = subscription.queue_url.as_str();
        let policy = match self.queue_policy(queue_url).await? {
            Some(mut policy) => {
                if policy.grant_topic(topic_arn, queue_arn) {
                    self.set_queue_policy(queue_url, &policy).await?;
                    tracing::info!(topic_arn, queue_url, "appended topic grant to queue policy");
                    PolicyChange::Appended
                } else {
                    tracing::debug!(topic_arn, queue_url, "queue policy already grants topic");
                    PolicyChange::Unchanged
                }
            }
            None => {
                let grant = crate::policy::build_grant_statement(topic_arn, queue_arn);
                self.create_queue_policy(queue_url, queue_arn, grant).await?;
                tracing::info!(topic_arn, queue_url, "created queue policy with topic grant");
                PolicyChange::Created
            }
        };

        Ok(ConfigureOutcome {
            subscription,
            subscription_created,
            policy,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Subscription, SubscriptionPage};
    use crate::policy::build_grant_statement;
    use crate::stub::tests::{MockQueueService, MockTopicService};
    use mockall::Sequence;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    const TOPIC: &str = "arn:aws:sns:sa-east-1:111111111111:my-topic";
    const QUEUE: &str = "arn:aws:sqs:sa-east-1:111111111111:my-queue";
    const QUEUE_URL: &str = "https://sqs.sa-east-1.amazonaws.com/111111111111/my-queue";

    fn queue_subscription() -> Subscription {
        Subscription::new()
            .set_subscription_arn(format!("{TOPIC}:0c6e0cd2"))
            .set_protocol("sqs")
            .set_endpoint(QUEUE)
            .set_topic_arn(TOPIC)
    }

    fn other_subscriptions() -> Vec<Subscription> {
        vec![
            Subscription::new()
                .set_protocol("email")
                .set_endpoint("ops@example.com"),
            Subscription::new()
                .set_protocol("sqs")
                .set_endpoint("arn:aws:sqs:sa-east-1:111111111111:other-queue"),
        ]
    }

    fn unrelated_statement() -> Value {
        json!({
            "Sid": "owner-access",
            "Effect": "Allow",
            "Principal": {"AWS": "arn:aws:iam::111111111111:root"},
            "Action": "SQS:*",
            "Resource": QUEUE
        })
    }

    fn subscribed_page() -> SubscriptionPage {
        let mut subscriptions = other_subscriptions();
        subscriptions.push(queue_subscription());
        SubscriptionPage::new().set_subscriptions(subscriptions)
    }

    fn granted_policy() -> String {
        let grant = serde_json::to_value(build_grant_statement(TOPIC, QUEUE)).unwrap();
        json!({
            "Version": "2012-10-17",
            "Id": format!("{QUEUE}/SQSDefaultPolicy"),
            "Statement": [unrelated_statement(), grant]
        })
        .to_string()
    }

    #[tokio::test]
    async fn create_or_get_topic() -> anyhow::Result<()> {
        let mut topics = MockTopicService::new();
        topics
            .expect_create_topic()
            .withf(|name| name == "my-topic")
            .times(2)
            .returning(|_| Ok(TOPIC.to_string()));
        let client = Configurator::from_stubs(topics, MockQueueService::new());
        assert_eq!(client.create_or_get_topic("my-topic").await?, TOPIC);
        assert_eq!(client.create_or_get_topic("my-topic").await?, TOPIC);
        Ok(())
    }

    #[tokio::test]
    async fn create_or_get_topic_empty_name() {
        let mut topics = MockTopicService::new();
        topics.expect_create_topic().never();
        let client = Configurator::from_stubs(topics, MockQueueService::new());
        let err = client.create_or_get_topic("").await.unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)), "{err:?}");
    }

    #[tokio::test]
    async fn create_or_get_topic_error() {
        let mut topics = MockTopicService::new();
        topics
            .expect_create_topic()
            .return_once(|_| Err(Error::service("CreateTopic", "AuthorizationError")));
        let client = Configurator::from_stubs(topics, MockQueueService::new());
        let err = client.create_or_get_topic("my-topic").await.unwrap_err();
        assert!(err.is_service(), "{err:?}");
        assert_eq!(err.operation(), Some("CreateTopic"));
    }

    #[tokio::test]
    async fn subscribe_queue_to_topic() -> anyhow::Result<()> {
        let mut topics = MockTopicService::new();
        topics
            .expect_subscribe()
            .withf(|topic, protocol, endpoint| {
                topic == TOPIC && protocol == "sqs" && endpoint == QUEUE
            })
            .return_once(|_, _, _| Ok(Some(format!("{TOPIC}:0c6e0cd2"))));
        let client = Configurator::from_stubs(topics, MockQueueService::new());
        let got = client.subscribe_queue_to_topic(TOPIC, QUEUE).await?;
        assert_eq!(got, Some(format!("{TOPIC}:0c6e0cd2")));
        Ok(())
    }

    #[tokio::test]
    async fn queue_url() -> anyhow::Result<()> {
        let mut queues = MockQueueService::new();
        queues
            .expect_get_queue_url()
            .withf(|name| name == "my-queue")
            .return_once(|_| Ok(QUEUE_URL.to_string()));
        let client = Configurator::from_stubs(MockTopicService::new(), queues);
        assert_eq!(client.queue_url("my-queue").await?, QUEUE_URL);
        Ok(())
    }

    #[tokio::test]
    async fn find_queue_subscription() -> anyhow::Result<()> {
        let mut topics = MockTopicService::new();
        topics
            .expect_list_subscriptions_by_topic()
            .withf(|topic, token| topic == TOPIC && token.is_none())
            .return_once(|_, _| Ok(subscribed_page()));
        let client = Configurator::from_stubs(topics, MockQueueService::new());
        let got = client.find_queue_subscription(TOPIC, QUEUE).await?;
        let got = got.expect("subscription should be found");
        assert_eq!(got.subscription, queue_subscription());
        assert_eq!(got.queue_url, QUEUE_URL);
        Ok(())
    }

    #[tokio::test]
    async fn find_queue_subscription_pages() -> anyhow::Result<()> {
        let mut seq = Sequence::new();
        let mut topics = MockTopicService::new();
        topics
            .expect_list_subscriptions_by_topic()
            .withf(|_, token| token.is_none())
            .times(1)
            .in_sequence(&mut seq)
            .return_once(|_, _| {
                Ok(SubscriptionPage::new()
                    .set_subscriptions(other_subscriptions())
                    .set_next_token("page-2"))
            });
        topics
            .expect_list_subscriptions_by_topic()
            .withf(|_, token| token.as_deref() == Some("page-2"))
            .times(1)
            .in_sequence(&mut seq)
            .return_once(|_, _| {
                Ok(SubscriptionPage::new()
                    .set_subscriptions([queue_subscription()])
                    .set_next_token("page-3"))
            });
        let client = Configurator::from_stubs(topics, MockQueueService::new());
        let got = client.find_queue_subscription(TOPIC, QUEUE).await?;
        assert_eq!(got.map(|s| s.subscription), Some(queue_subscription()));
        Ok(())
    }

    #[tokio::test]
    async fn find_queue_subscription_not_found() -> anyhow::Result<()> {
        let mut seq = Sequence::new();
        let mut topics = MockTopicService::new();
        topics
            .expect_list_subscriptions_by_topic()
            .times(1)
            .in_sequence(&mut seq)
            .return_once(|_, _| {
                Ok(SubscriptionPage::new()
                    .set_subscriptions(other_subscriptions())
                    .set_next_token("page-2"))
            });
        topics
            .expect_list_subscriptions_by_topic()
            .times(1)
            .in_sequence(&mut seq)
            .return_once(|_, _| {
                // Case matters: this is a different queue.
                Ok(SubscriptionPage::new().set_subscriptions([Subscription::new()
                    .set_protocol("sqs")
                    .set_endpoint(QUEUE.to_uppercase())]))
            });
        let client = Configurator::from_stubs(topics, MockQueueService::new());
        let got = client.find_queue_subscription(TOPIC, QUEUE).await?;
        assert!(got.is_none(), "{got:?}");
        Ok(())
    }

    #[tokio::test]
    async fn find_queue_subscription_skips_other_protocols() -> anyhow::Result<()> {
        let mut topics = MockTopicService::new();
        topics.expect_list_subscriptions_by_topic().return_once(|_, _| {
            Ok(SubscriptionPage::new().set_subscriptions([
                Subscription::new().set_protocol("lambda").set_endpoint(QUEUE),
                queue_subscription(),
            ]))
        });
        let client = Configurator::from_stubs(topics, MockQueueService::new());
        let got = client.find_queue_subscription(TOPIC, QUEUE).await?;
        assert_eq!(got.map(|s| s.subscription), Some(queue_subscription()));
        Ok(())
    }

    #[tokio::test]
    async fn find_queue_subscription_bad_arn() {
        let mut topics = MockTopicService::new();
        topics.expect_list_subscriptions_by_topic().never();
        let client = Configurator::from_stubs(topics, MockQueueService::new());
        let err = client
            .find_queue_subscription(TOPIC, "my-queue")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidQueueArn(_)), "{err:?}");
    }

    #[tokio::test]
    async fn queue_policy() -> anyhow::Result<()> {
        let mut seq = Sequence::new();
        let mut queues = MockQueueService::new();
        for value in [None, Some(String::new()), Some(granted_policy())] {
            queues
                .expect_get_queue_attribute()
                .withf(|url, name| url == QUEUE_URL && name == "Policy")
                .times(1)
                .in_sequence(&mut seq)
                .return_once(move |_, _| Ok(value));
        }
        let client = Configurator::from_stubs(MockTopicService::new(), queues);
        assert_eq!(client.queue_policy(QUEUE_URL).await?, None);
        assert_eq!(client.queue_policy(QUEUE_URL).await?, None);
        let policy = client.queue_policy(QUEUE_URL).await?.expect("policy is set");
        assert_eq!(policy.statement.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn queue_policy_malformed() {
        let mut queues = MockQueueService::new();
        queues
            .expect_get_queue_attribute()
            .return_once(|_, _| Ok(Some("{\"Statement\": [".to_string())));
        let client = Configurator::from_stubs(MockTopicService::new(), queues);
        let err = client.queue_policy(QUEUE_URL).await.unwrap_err();
        assert!(err.is_malformed_policy(), "{err:?}");
    }

    #[tokio::test]
    async fn create_queue_policy() -> anyhow::Result<()> {
        let grant = build_grant_statement(TOPIC, QUEUE);
        let want = json!({
            "Version": "2012-10-17",
            "Id": format!("{QUEUE}/SQSDefaultPolicy"),
            "Statement": [serde_json::to_value(&grant)?]
        });
        let mut queues = MockQueueService::new();
        queues
            .expect_set_queue_attribute()
            .withf(move |url, name, value| {
                url == QUEUE_URL
                    && name == "Policy"
                    && serde_json::from_str::<Value>(value).ok().as_ref() == Some(&want)
            })
            .return_once(|_, _, _| Ok(()));
        let client = Configurator::from_stubs(MockTopicService::new(), queues);
        client.create_queue_policy(QUEUE_URL, QUEUE, grant).await?;
        Ok(())
    }

    #[tokio::test]
    async fn set_queue_policy() -> anyhow::Result<()> {
        let policy = PolicyDocument::from_json(&granted_policy())?;
        let want = serde_json::from_str::<Value>(&granted_policy())?;
        let mut queues = MockQueueService::new();
        queues
            .expect_set_queue_attribute()
            .withf(move |_, name, value| {
                name == "Policy" && serde_json::from_str::<Value>(value).ok().as_ref() == Some(&want)
            })
            .return_once(|_, _, _| Ok(()));
        let client = Configurator::from_stubs(MockTopicService::new(), queues);
        client.set_queue_policy(QUEUE_URL, &policy).await?;
        Ok(())
    }

    #[tokio::test]
    async fn configure_from_scratch() -> anyhow::Result<()> {
        let mut seq = Sequence::new();
        let mut topics = MockTopicService::new();
        topics
            .expect_list_subscriptions_by_topic()
            .times(1)
            .in_sequence(&mut seq)
            .return_once(|_, _| Ok(SubscriptionPage::new().set_subscriptions(other_subscriptions())));
        topics
            .expect_subscribe()
            .withf(|topic, protocol, endpoint| {
                topic == TOPIC && protocol == "sqs" && endpoint == QUEUE
            })
            .times(1)
            .in_sequence(&mut seq)
            .return_once(|_, _, _| Ok(Some(format!("{TOPIC}:0c6e0cd2"))));
        topics
            .expect_list_subscriptions_by_topic()
            .times(1)
            .in_sequence(&mut seq)
            .return_once(|_, _| Ok(subscribed_page()));

        let mut queues = MockQueueService::new();
        queues
            .expect_get_queue_attribute()
            .withf(|url, _| url == QUEUE_URL)
            .return_once(|_, _| Ok(None));
        queues
            .expect_set_queue_attribute()
            .withf(|url, name, value| {
                let Ok(policy) = PolicyDocument::from_json(value) else {
                    return false;
                };
                url == QUEUE_URL
                    && name == "Policy"
                    && policy.version.as_deref() == Some("2012-10-17")
                    && policy.id == Some(format!("{QUEUE}/SQSDefaultPolicy"))
                    && policy.statement.len() == 1
                    && policy.statement[0].source_arn() == Some(TOPIC)
            })
            .times(1)
            .return_once(|_, _, _| Ok(()));

        let client = Configurator::from_stubs(topics, queues);
        let outcome = client
            .configure_subscription_with_permissions(TOPIC, QUEUE)
            .await?;
        assert!(outcome.subscription_created);
        assert_eq!(outcome.policy, PolicyChange::Created);
        assert_eq!(outcome.subscription.queue_url, QUEUE_URL);
        assert!(!outcome.is_unchanged());
        Ok(())
    }

    #[tokio::test]
    async fn configure_already_done() -> anyhow::Result<()> {
        let mut topics = MockTopicService::new();
        topics
            .expect_list_subscriptions_by_topic()
            .times(1)
            .return_once(|_, _| Ok(subscribed_page()));
        topics.expect_subscribe().never();

        let mut queues = MockQueueService::new();
        queues
            .expect_get_queue_attribute()
            .times(1)
            .return_once(|_, _| Ok(Some(granted_policy())));
        queues.expect_set_queue_attribute().never();

        let client = Configurator::from_stubs(topics, queues);
        let outcome = client
            .configure_subscription_with_permissions(TOPIC, QUEUE)
            .await?;
        assert!(!outcome.subscription_created);
        assert_eq!(outcome.policy, PolicyChange::Unchanged);
        assert!(outcome.is_unchanged());
        Ok(())
    }

    #[tokio::test]
    async fn configure_appends_grant() -> anyhow::Result<()> {
        let existing = json!({
            "Version": "2012-10-17",
            "Id": "custom-policy",
            "Statement": [unrelated_statement()]
        });
        let mut topics = MockTopicService::new();
        topics
            .expect_list_subscriptions_by_topic()
            .return_once(|_, _| Ok(subscribed_page()));
        topics.expect_subscribe().never();

        let mut queues = MockQueueService::new();
        let value = existing.to_string();
        queues
            .expect_get_queue_attribute()
            .return_once(move |_, _| Ok(Some(value)));
        queues
            .expect_set_queue_attribute()
            .withf(|_, _, value| {
                let Ok(got) = serde_json::from_str::<Value>(value) else {
                    return false;
                };
                let statements = got["Statement"].as_array().cloned().unwrap_or_default();
                got["Id"] == "custom-policy"
                    && statements.len() == 2
                    && statements[0] == unrelated_statement()
                    && statements[1]["Condition"]["ArnEquals"]["aws:SourceArn"] == TOPIC
                    && statements[1]["Resource"] == QUEUE
            })
            .times(1)
            .return_once(|_, _, _| Ok(()));

        let client = Configurator::from_stubs(topics, queues);
        let outcome = client
            .configure_subscription_with_permissions(TOPIC, QUEUE)
            .await?;
        assert!(!outcome.subscription_created);
        assert_eq!(outcome.policy, PolicyChange::Appended);
        Ok(())
    }

    #[tokio::test]
    async fn configure_not_found_after_create() {
        let mut topics = MockTopicService::new();
        topics
            .expect_list_subscriptions_by_topic()
            .times(2)
            .returning(|_, _| Ok(SubscriptionPage::new()));
        topics
            .expect_subscribe()
            .times(1)
            .return_once(|_, _, _| Ok(None));
        let mut queues = MockQueueService::new();
        queues.expect_get_queue_attribute().never();
        queues.expect_set_queue_attribute().never();

        let client = Configurator::from_stubs(topics, queues);
        let err = client
            .configure_subscription_with_permissions(TOPIC, QUEUE)
            .await
            .unwrap_err();
        assert!(err.is_subscription_not_found_after_create(), "{err:?}");
    }

    #[tokio::test]
    async fn configure_subscribe_error() {
        let mut topics = MockTopicService::new();
        topics
            .expect_list_subscriptions_by_topic()
            .times(1)
            .returning(|_, _| Ok(SubscriptionPage::new()));
        topics
            .expect_subscribe()
            .return_once(|_, _, _| Err(Error::service("Subscribe", "Throttling")));
        let mut queues = MockQueueService::new();
        queues.expect_get_queue_attribute().never();
        queues.expect_set_queue_attribute().never();

        let client = Configurator::from_stubs(topics, queues);
        let err = client
            .configure_subscription_with_permissions(TOPIC, QUEUE)
            .await
            .unwrap_err();
        assert_eq!(err.operation(), Some("Subscribe"), "{err:?}");
    }

    #[tokio::test]
    async fn configure_malformed_policy() {
        let mut topics = MockTopicService::new();
        topics
            .expect_list_subscriptions_by_topic()
            .return_once(|_, _| Ok(subscribed_page()));
        let mut queues = MockQueueService::new();
        queues
            .expect_get_queue_attribute()
            .return_once(|_, _| Ok(Some("not json".to_string())));
        queues.expect_set_queue_attribute().never();

        let client = Configurator::from_stubs(topics, queues);
        let err = client
            .configure_subscription_with_permissions(TOPIC, QUEUE)
            .await
            .unwrap_err();
        assert!(err.is_malformed_policy(), "{err:?}");
    }

    #[tokio::test]
    async fn builder_with_tracing() {
        let client = Configurator::builder()
            .with_region("sa-east-1")
            .with_credentials("test-key-id", "test-secret")
            .with_tracing()
            .build()
            .await;
        let got = format!("{client:?}");
        assert!(got.contains("TopicServiceTracing"), "{got}");
        assert!(got.contains("QueueServiceTracing"), "{got}");
    }
}
