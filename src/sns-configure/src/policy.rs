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

//! The SQS access policy document and the topic grant.
//!
//! Only the parts of the [policy language] needed to find and add a
//! `SQS:SendMessage` grant for a topic are typed. Everything else in the
//! document is kept as-is, so statements written by other tools survive a
//! read-modify-write cycle.
//!
//! [policy language]: https://docs.aws.amazon.com/IAM/latest/UserGuide/reference_policies_elements.html

use crate::{Error, Result};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use serde_with::{OneOrMany, formats::PreferMany, serde_as};

/// The policy language version used for new documents.
pub const POLICY_VERSION: &str = "2012-10-17";

/// The action granted to the topic.
pub const SEND_MESSAGE_ACTION: &str = "SQS:SendMessage";

const DEFAULT_POLICY_ID_SUFFIX: &str = "/SQSDefaultPolicy";
const SID_PREFIX: &str = "Sid";
const SID_MIN: u64 = 10_000_000_000;
const SID_MAX: u64 = 99_999_999_999;

/// An access policy attached to a queue.
///
/// # Example
/// ```
/// use sns_configure::policy::{PolicyDocument, build_grant_statement, find_topic_grant};
/// const TOPIC: &str = "arn:aws:sns:sa-east-1:111111111111:my-topic";
/// const QUEUE: &str = "arn:aws:sqs:sa-east-1:111111111111:my-queue";
/// let policy = PolicyDocument::for_queue(QUEUE, build_grant_statement(TOPIC, QUEUE));
/// assert_eq!(policy.id.as_deref(), Some("arn:aws:sqs:sa-east-1:111111111111:my-queue/SQSDefaultPolicy"));
/// assert!(find_topic_grant(&policy, TOPIC).is_some());
/// ```
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct PolicyDocument {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The statements, in document order.
    ///
    /// The policy language allows a single statement object in place of an
    /// array. Both forms are accepted, an array is always written back.
    #[serde_as(as = "OneOrMany<_, PreferMany>")]
    #[serde(default)]
    pub statement: Vec<Statement>,

    /// Top-level elements not modeled above.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl PolicyDocument {
    /// Creates the minimal document SQS would create for a queue, holding a
    /// single statement.
    pub fn for_queue<T: Into<String>>(queue_arn: T, statement: Statement) -> Self {
        Self {
            version: Some(POLICY_VERSION.to_string()),
            id: Some(format!("{}{DEFAULT_POLICY_ID_SUFFIX}", queue_arn.into())),
            statement: vec![statement],
            other: Map::new(),
        }
    }

    /// Parses the value of a queue `Policy` attribute.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(Error::MalformedPolicy)
    }

    /// Formats the document as the value of a queue `Policy` attribute.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(Error::MalformedPolicy)
    }

    /// Adds a grant for `topic_arn` unless one exists.
    ///
    /// Returns `true` if the document changed.
    pub fn grant_topic(&mut self, topic_arn: &str, queue_arn: &str) -> bool {
        if find_topic_grant(self, topic_arn).is_some() {
            return false;
        }
        self.statement
            .push(build_grant_statement(topic_arn, queue_arn));
        true
    }
}

/// A single statement in a [PolicyDocument].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
#[non_exhaustive]
pub struct Statement {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effect: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principal: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Value>,

    /// Statement elements not modeled above, such as `NotAction`.
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl Statement {
    /// The topic ARN in `Condition.ArnEquals["aws:SourceArn"]`, if it is a
    /// single string.
    pub fn source_arn(&self) -> Option<&str> {
        self.condition
            .as_ref()?
            .get("ArnEquals")?
            .get("aws:SourceArn")?
            .as_str()
    }
}

/// Finds the statement restricting the source to `topic_arn`.
///
/// Statements are scanned in document order and the first match is returned.
/// Only `ArnEquals` conditions on `aws:SourceArn` are considered.
pub fn find_topic_grant<'a>(policy: &'a PolicyDocument, topic_arn: &str) -> Option<&'a Statement> {
    policy
        .statement
        .iter()
        .find(|s| s.source_arn() == Some(topic_arn))
}

/// Creates a statement letting `topic_arn` send messages to `queue_arn`.
///
/// The statement id is `Sid` followed by a random 11 digit number. Ids are not
/// checked for collisions.
pub fn build_grant_statement(topic_arn: &str, queue_arn: &str) -> Statement {
    Statement {
        sid: Some(random_sid(&mut rand::rng())),
        effect: Some("Allow".to_string()),
        principal: Some(json!({"AWS": "*"})),
        action: Some(Value::from(SEND_MESSAGE_ACTION)),
        resource: Some(Value::from(queue_arn)),
        condition: Some(json!({"ArnEquals": {"aws:SourceArn": topic_arn}})),
        other: Map::new(),
    }
}

fn random_sid<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("{SID_PREFIX}{}", rng.random_range(SID_MIN..=SID_MAX))
}
