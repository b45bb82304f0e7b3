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
// [START sns_configure_quickstart]
use sns_configure::client::Configurator;
use sns_configure::model::PolicyChange;

pub async fn sample(
    client: &Configurator,
    topic_name: &str,
    queue_arn: &str,
) -> anyhow::Result<String> {
    let topic_arn = client.create_or_get_topic(topic_name).await?;
    println!("using topic {topic_arn}");

    let outcome = client
        .configure_subscription_with_permissions(&topic_arn, queue_arn)
        .await?;
    if outcome.subscription_created {
        println!("subscribed {queue_arn} to {topic_arn}");
    }
    match outcome.policy {
        PolicyChange::Created => println!("created queue policy"),
        PolicyChange::Appended => println!("added topic grant to queue policy"),
        PolicyChange::Unchanged => println!("queue policy already grants the topic"),
        _ => {}
    }
    Ok(topic_arn)
}
// [END sns_configure_quickstart]
