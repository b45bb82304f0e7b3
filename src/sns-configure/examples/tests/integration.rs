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
#[cfg(all(test, feature = "run-integration-tests"))]
mod tests {
    use sns_configure::client::Configurator;

    #[tokio::test]
    async fn run_samples() -> anyhow::Result<()> {
        let _guard = tracing::subscriber::set_default(
            tracing_subscriber::fmt()
                .with_max_level(tracing::Level::DEBUG)
                .finish(),
        );
        let queue_arn = std::env::var("SNS_CONFIGURE_TEST_QUEUE_ARN")?;
        let client = Configurator::builder().with_tracing().build().await;

        let topic_arn = sns_configure_samples::run_samples(&client, &queue_arn).await?;
        let outcome = client
            .configure_subscription_with_permissions(&topic_arn, &queue_arn)
            .await?;
        assert!(outcome.is_unchanged(), "{outcome:?}");
        Ok(())
    }
}
