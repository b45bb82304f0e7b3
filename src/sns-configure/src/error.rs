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

//! Errors returned by the subscription configurator.
//!
//! The configurator fails fast: the first error aborts the remaining steps and
//! nothing already done is rolled back. For example, a subscription created in
//! the first phase is kept even if updating the queue policy fails afterwards.

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// A `Result` alias where the `Err` case is [Error].
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for all operations in this crate.
///
/// # Example
/// ```
/// use sns_configure::Error;
/// fn report(e: &Error) {
///     match e {
///         e if e.is_service() => println!("the service rejected the call: {e}"),
///         e if e.is_malformed_policy() => println!("fix the queue policy: {e}"),
///         e => println!("something else went wrong: {e}"),
///     }
/// }
/// ```
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A call to SNS or SQS failed.
    ///
    /// This covers transport problems, authentication failures, throttling,
    /// and resources that do not exist. The SDK error is available as the
    /// [source][std::error::Error::source].
    #[error("the {operation} request failed: {source}")]
    Service {
        operation: &'static str,
        #[source]
        source: BoxError,
    },

    /// The queue `Policy` attribute is present but is not a valid policy
    /// document.
    #[error("the queue policy is not a valid policy document: {0}")]
    MalformedPolicy(#[source] serde_json::Error),

    /// The subscription just created is missing from the topic listing.
    ///
    /// SNS may take a moment to list a new subscription. Running the
    /// configuration again is safe.
    #[error("the subscription of {queue_arn} to {topic_arn} was created but cannot be found")]
    SubscriptionNotFoundAfterCreate { topic_arn: String, queue_arn: String },

    /// The queue ARN cannot be turned into a queue URL.
    #[error("{0:?} is not a valid queue ARN, expected arn:<partition>:<service>:<region>:<account>:<name>")]
    InvalidQueueArn(String),

    /// An argument was rejected before making any request.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The service response lacks a field the operation needs.
    #[error("the {operation} response is missing the {field} field")]
    MissingField {
        operation: &'static str,
        field: &'static str,
    },
}

impl Error {
    /// Creates an error for a failed SNS or SQS call.
    pub fn service<T: Into<BoxError>>(operation: &'static str, source: T) -> Self {
        Self::Service {
            operation,
            source: source.into(),
        }
    }

    /// The error was returned by (or while reaching) SNS or SQS.
    pub fn is_service(&self) -> bool {
        matches!(self, Self::Service { .. })
    }

    /// The stored queue policy could not be parsed.
    pub fn is_malformed_policy(&self) -> bool {
        matches!(self, Self::MalformedPolicy(_))
    }

    /// The subscription created by this library was not listed afterwards.
    pub fn is_subscription_not_found_after_create(&self) -> bool {
        matches!(self, Self::SubscriptionNotFoundAfterCreate { .. })
    }

    /// The name of the failed remote operation, if any.
    pub fn operation(&self) -> Option<&'static str> {
        match self {
            Self::Service { operation, .. } | Self::MissingField { operation, .. } => {
                Some(*operation)
            }
            _ => None,
        }
    }
}
