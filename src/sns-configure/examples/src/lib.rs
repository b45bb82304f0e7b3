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
pub mod find_subscription;
pub mod print_queue_policy;
pub mod quickstart;

use rand::{Rng, distr::Alphanumeric};
use sns_configure::client::Configurator;

pub const TOPIC_ID_LENGTH: usize = 32;

/// Runs all the samples against a new topic and `queue_arn`.
///
/// Returns the ARN of the topic, SNS topics are not deleted by these samples.
pub async fn run_samples(client: &Configurator, queue_arn: &str) -> anyhow::Result<String> {
    let topic_name = random_topic_name();

    tracing::info!("running quickstart sample");
    let topic_arn = quickstart::sample(client, &topic_name, queue_arn).await?;
    tracing::info!("success on quickstart sample: {topic_arn}");

    // A second run must not change anything.
    let again = quickstart::sample(client, &topic_name, queue_arn).await?;
    anyhow::ensure!(again == topic_arn, "topic changed: {topic_arn} != {again}");

    find_subscription::sample(client, &topic_arn, queue_arn).await?;
    let queue_url = sns_configure::arn::queue_url(queue_arn)?;
    print_queue_policy::sample(client, &queue_url).await?;

    Ok(topic_arn)
}

pub fn random_topic_name() -> String {
    let prefix = "sns-configure-";
    let suffix: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(TOPIC_ID_LENGTH - prefix.len())
        .map(char::from)
        .collect();
    format!("{prefix}{suffix}")
}
