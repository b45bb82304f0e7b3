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

//! Parse queue ARNs and derive the queue URL.
//!
//! SQS addresses a queue by URL in `GetQueueAttributes` and
//! `SetQueueAttributes`, while SNS subscriptions name the queue by ARN. The
//! URL can be derived from the ARN without a round trip to the service.

use crate::{Error, Result};
use std::str::FromStr;

/// The components of a queue ARN.
///
/// # Example
/// ```
/// use sns_configure::arn::QueueArn;
/// let arn: QueueArn = "arn:aws:sqs:sa-east-1:111111111111:my-queue".parse()?;
/// assert_eq!(arn.region(), "sa-east-1");
/// assert_eq!(
///     arn.queue_url(),
///     "https://sqs.sa-east-1.amazonaws.com/111111111111/my-queue"
/// );
/// # Ok::<(), sns_configure::Error>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueueArn {
    partition: String,
    service: String,
    region: String,
    account_id: String,
    queue_name: String,
}

impl QueueArn {
    pub fn partition(&self) -> &str {
        &self.partition
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    pub fn account_id(&self) -> &str {
        &self.account_id
    }

    pub fn queue_name(&self) -> &str {
        &self.queue_name
    }

    /// Returns the queue URL, in
    /// `https://{service}.{region}.{domain}/{account}/{queue}` format.
    pub fn queue_url(&self) -> String {
        format!(
            "https://{}.{}.{}/{}/{}",
            self.service,
            self.region,
            dns_suffix(&self.partition),
            self.account_id,
            self.queue_name
        )
    }
}

impl FromStr for QueueArn {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidQueueArn(s.to_string());
        let parts: Vec<&str> = s.split(':').collect();
        let &[prefix, partition, service, region, account_id, queue_name] = parts.as_slice() else {
            return Err(invalid());
        };
        if prefix != "arn" {
            return Err(invalid());
        }
        if [partition, service, region, account_id, queue_name]
            .iter()
            .any(|p| p.is_empty())
        {
            return Err(invalid());
        }
        Ok(Self {
            partition: partition.to_string(),
            service: service.to_string(),
            region: region.to_string(),
            account_id: account_id.to_string(),
            queue_name: queue_name.to_string(),
        })
    }
}

impl std::fmt::Display for QueueArn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "arn:{}:{}:{}:{}:{}",
            self.partition, self.service, self.region, self.account_id, self.queue_name
        )
    }
}

/// Derives the queue URL for a queue ARN.
pub fn queue_url(queue_arn: &str) -> Result<String> {
    Ok(queue_arn.parse::<QueueArn>()?.queue_url())
}

fn dns_suffix(partition: &str) -> &'static str {
    match partition {
        "aws-cn" => "amazonaws.com.cn",
        "aws-iso" => "c2s.ic.gov",
        "aws-iso-b" => "sc2s.sgov.gov",
        _ => "amazonaws.com",
    }
}
