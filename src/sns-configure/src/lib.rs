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

//! Subscribe an Amazon SQS queue to an Amazon SNS topic, idempotently.
//!
//! This crate contains the types and functions needed to wire a queue to a
//! topic once: create or get the topic, subscribe the queue with the `sqs`
//! protocol, and make sure the queue [access policy] lets the topic send
//! messages to it. Every step checks the current state first, so running the
//! configuration again against an already configured pair only issues reads.
//!
//! Most applications will use the [Configurator][client::Configurator]:
//!
//! ```no_run
//! # async fn sample() -> sns_configure::Result<()> {
//! use sns_configure::client::Configurator;
//! let client = Configurator::builder().with_region("sa-east-1").build().await;
//! let topic_arn = client.create_or_get_topic("topic-name").await?;
//! let outcome = client
//!     .configure_subscription_with_permissions(
//!         &topic_arn,
//!         "arn:aws:sqs:sa-east-1:111111111111:queue-name",
//!     )
//!     .await?;
//! println!("queue configured: {outcome:?}");
//! # Ok(()) }
//! ```
//!
//! [access policy]: https://docs.aws.amazon.com/AWSSimpleQueueService/latest/SQSDeveloperGuide/sqs-using-identity-based-policies.html

pub mod arn;
pub mod error;
pub mod model;
pub mod policy;
pub mod stub;

mod configurator;
mod tracing;
mod transport;

pub use error::{Error, Result};

/// Clients to configure topic subscriptions.
pub mod client {
    pub use crate::configurator::client::Configurator;
}

/// Client builders.
pub mod builder {
    pub use crate::configurator::client_builder::ClientBuilder;
}

/// The delivery protocol used when a queue subscribes to a topic.
pub const QUEUE_PROTOCOL: &str = "sqs";

/// The queue attribute holding the access policy document.
pub const POLICY_ATTRIBUTE: &str = "Policy";
