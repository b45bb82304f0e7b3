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

use crate::Result;
use crate::model::SubscriptionPage;
use crate::stub::{QueueService, TopicService};
use std::sync::Arc;

/// Instruments a [TopicService] with tracing spans.
#[derive(Clone, Debug)]
pub(crate) struct TopicServiceTracing {
    inner: Arc<dyn TopicService>,
}

impl TopicServiceTracing {
    pub(crate) fn new(inner: Arc<dyn TopicService>) -> Self {
        Self { inner }
    }
}

#[async_trait::async_trait]
impl TopicService for TopicServiceTracing {
    #[tracing::instrument(level = "info", skip(self), ret, err)]
    async fn create_topic(&self, name: &str) -> Result<String> {
        self.inner.create_topic(name).await
    }

    #[tracing::instrument(level = "debug", skip(self), err)]
    async fn list_subscriptions_by_topic(
        &self,
        topic_arn: &str,
        next_token: Option<String>,
    ) -> Result<SubscriptionPage> {
        let page = self
            .inner
            .list_subscriptions_by_topic(topic_arn, next_token)
            .await?;
        tracing::debug!(
            count = page.subscriptions.len(),
            more = page.next_token.is_some(),
            "listed subscriptions"
        );
        Ok(page)
    }

    #[tracing::instrument(level = "info", skip(self), ret, err)]
    async fn subscribe(
        &self,
        topic_arn: &str,
        protocol: &str,
        endpoint: &str,
    ) -> Result<Option<String>> {
        self.inner.subscribe(topic_arn, protocol, endpoint).await
    }
}

/// Instruments a [QueueService] with tracing spans.
#[derive(Clone, Debug)]
pub(crate) struct QueueServiceTracing {
    inner: Arc<dyn QueueService>,
}

impl QueueServiceTracing {
    pub(crate) fn new(inner: Arc<dyn QueueService>) -> Self {
        Self { inner }
    }
}

#[async_trait::async_trait]
impl QueueService for QueueServiceTracing {
    #[tracing::instrument(level = "info", skip(self), ret, err)]
    async fn get_queue_url(&self, queue_name: &str) -> Result<String> {
        self.inner.get_queue_url(queue_name).await
    }

    // The attribute value is not recorded, policies may be large.
    #[tracing::instrument(level = "debug", skip(self), err)]
    async fn get_queue_attribute(&self, queue_url: &str, name: &str) -> Result<Option<String>> {
        self.inner.get_queue_attribute(queue_url, name).await
    }

    #[tracing::instrument(level = "info", skip(self, value), err)]
    async fn set_queue_attribute(&self, queue_url: &str, name: &str, value: String) -> Result<()> {
        self.inner.set_queue_attribute(queue_url, name, value).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use crate::model::Subscription;
    use crate::stub::tests::{MockQueueService, MockTopicService};

    #[tokio::test]
    async fn topic_forwards() -> anyhow::Result<()> {
        let mut mock = MockTopicService::new();
        mock.expect_create_topic()
            .withf(|name| name == "my-topic")
            .return_once(|_| Ok("arn:aws:sns:sa-east-1:111111111111:my-topic".to_string()));
        mock.expect_list_subscriptions_by_topic()
            .withf(|topic, token| topic.ends_with(":my-topic") && token.as_deref() == Some("t1"))
            .return_once(|_, _| {
                Ok(SubscriptionPage::new()
                    .set_subscriptions([Subscription::new().set_protocol("sqs")]))
            });
        mock.expect_subscribe()
            .return_once(|_, _, _| Err(Error::service("Subscribe", "simulated")));

        let client = TopicServiceTracing::new(Arc::new(mock));
        let arn = client.create_topic("my-topic").await?;
        assert_eq!(arn, "arn:aws:sns:sa-east-1:111111111111:my-topic");
        let page = client
            .list_subscriptions_by_topic(&arn, Some("t1".to_string()))
            .await?;
        assert_eq!(page.subscriptions.len(), 1);
        let err = client.subscribe(&arn, "sqs", "endpoint").await.unwrap_err();
        assert!(err.is_service(), "{err:?}");
        Ok(())
    }

    #[tokio::test]
    async fn queue_forwards() -> anyhow::Result<()> {
        let mut mock = MockQueueService::new();
        mock.expect_get_queue_url()
            .withf(|name| name == "my-queue")
            .return_once(|_| Ok("https://sqs.sa-east-1.amazonaws.com/111111111111/my-queue".to_string()));
        mock.expect_get_queue_attribute()
            .return_once(|_, _| Ok(Some("{}".to_string())));
        mock.expect_set_queue_attribute()
            .withf(|_, name, value| name == "Policy" && value == "{}")
            .return_once(|_, _, _| Ok(()));

        let client = QueueServiceTracing::new(Arc::new(mock));
        let url = client.get_queue_url("my-queue").await?;
        assert!(url.ends_with("/my-queue"), "{url}");
        assert_eq!(client.get_queue_attribute(&url, "Policy").await?, Some("{}".to_string()));
        client.set_queue_attribute(&url, "Policy", "{}".to_string()).await?;
        Ok(())
    }
}
