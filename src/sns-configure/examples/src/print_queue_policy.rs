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
// [START sns_configure_print_queue_policy]
use sns_configure::client::Configurator;

pub async fn sample(client: &Configurator, queue_url: &str) -> anyhow::Result<()> {
    let Some(policy) = client.queue_policy(queue_url).await? else {
        println!("{queue_url} has no access policy");
        return Ok(());
    };
    for statement in &policy.statement {
        println!(
            "statement {:?}: {:?} from {:?}",
            statement.sid,
            statement.effect,
            statement.source_arn()
        );
    }
    Ok(())
}
// [END sns_configure_print_queue_policy]
