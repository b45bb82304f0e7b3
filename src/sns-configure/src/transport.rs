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

//! Implements the service traits with the AWS SDK clients.

use crate::model::{Subscription, SubscriptionPage};
use crate::stub::{QueueService, TopicService};
use crate::{Error, Result};
use aws_sdk_sqs::types::QueueAttributeName;

#[async_trait::async_trait]
impl TopicService for aws_sdk_sns::Client {
    async fn create_topic(&self, name: &str) -> Result<String> {
        let output = self
            .create_topic()
            .name(name)
            .send()
            .await
            .map_err(|e| Error::service("CreateTopic", aws_sdk_sns::Error::from(e)))?;
        output
            .topic_arn()
            .map(str::to_string)
            .ok_or(Error::MissingField {
                operation: "CreateTopic",
                field: "TopicArn",
            })
    }

    async fn list_subscriptions_by_topic(
        &self,
        topic_arn: &str,
        next_token: Option<String>,
    ) -> Result<SubscriptionPage> {
        let output = self
            .list_subscriptions_by_topic()
            .topic_arn(topic_arn)
            .set_next_token(next_token)
            .send()
            .await
            .map_err(|e| {
                Error::service("ListSubscriptionsByTopic", aws_sdk_sns::Error::from(e))
            })?;
        Ok(SubscriptionPage {
            subscriptions: output.subscriptions().iter().map(Subscription::from).collect(),
            next_token: output.next_token().map(str::to_string),
        })
    }

    async fn subscribe(
        &self,
        topic_arn: &str,
        protocol: &str,
        endpoint: &str,
    ) -> Result<Option<String>> {
        let output = self
            .subscribe()
            .topic_arn(topic_arn)
            .protocol(protocol)
            .endpoint(endpoint)
            .return_subscription_arn(true)
            .send()
            .await
            .map_err(|e| Error::service("Subscribe", aws_sdk_sns::Error::from(e)))?;
        Ok(output.subscription_arn().map(str::to_string))
    }
}

#[async_trait::async_trait]
impl QueueService for aws_sdk_sqs::Client {
    async fn get_queue_url(&self, queue_name: &str) -> Result<String> {
        let output = self
            .get_queue_url()
            .queue_name(queue_name)
            .send()
            .await
            .map_err(|e| Error::service("GetQueueUrl", aws_sdk_sqs::Error::from(e)))?;
        output
            .queue_url()
            .map(str::to_string)
            .ok_or(Error::MissingField {
                operation: "GetQueueUrl",
                field: "QueueUrl",
            })
    }

    async fn get_queue_attribute(&self, queue_url: &str, name: &str) -> Result<Option<String>> {
        let name = QueueAttributeName::from(name);
        let output = self
            .get_queue_attributes()
            .queue_url(queue_url)
            .attribute_names(name.clone())
            .send()
            .await
            .map_err(|e| Error::service("GetQueueAttributes", aws_sdk_sqs::Error::from(e)))?;
        Ok(output
            .attributes()
            .and_then(|attributes| attributes.get(&name))
            .cloned())
    }

    async fn set_queue_attribute(&self, queue_url: &str, name: &str, value: String) -> Result<()> {
        self.set_queue_attributes()
            .queue_url(queue_url)
            .attributes(QueueAttributeName::from(name), value)
            .send()
            .await
            .map_err(|e| Error::service("SetQueueAttributes", aws_sdk_sqs::Error::from(e)))?;
        Ok(())
    }
}

impl From<&aws_sdk_sns::types::Subscription> for Subscription {
    fn from(value: &aws_sdk_sns::types::Subscription) -> Self {
        Self {
            subscription_arn: value.subscription_arn().map(str::to_string),
            owner: value.owner().map(str::to_string),
            protocol: value.protocol().unwrap_or_default().to_string(),
            endpoint: value.endpoint().unwrap_or_default().to_string(),
            topic_arn: value.topic_arn().map(str::to_string),
        }
    }
}
