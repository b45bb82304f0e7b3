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
// [START sns_configure_find_subscription]
use sns_configure::client::Configurator;

pub async fn sample(client: &Configurator, topic_arn: &str, queue_arn: &str) -> anyhow::Result<()> {
    match client.find_queue_subscription(topic_arn, queue_arn).await? {
        Some(found) => println!(
            "found subscription {:?} for queue {}",
            found.subscription.subscription_arn, found.queue_url
        ),
        None => println!("{queue_arn} is not subscribed to {topic_arn}"),
    }
    Ok(())
}
// [END sns_configure_find_subscription]
