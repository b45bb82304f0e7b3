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
use clap::Parser;
use sns_configure::client::Configurator;

/// Subscribes an SQS queue to an SNS topic, creating the topic if needed,
/// and lets the topic send messages to the queue.
#[derive(Debug, Parser)]
struct Args {
    /// The name of the topic.
    #[arg(long)]
    topic_name: String,

    /// The ARN of an existing queue.
    #[arg(long)]
    queue_arn: String,

    /// The AWS region, defaults to the region in the environment.
    #[arg(long)]
    region: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let mut builder = Configurator::builder();
    if let Some(region) = args.region {
        builder = builder.with_region(region);
    }
    let client = builder.build().await;
    sns_configure_samples::quickstart::sample(&client, &args.topic_name, &args.queue_arn).await?;
    Ok(())
}
