// SPDX-License-Identifier: Apache-2.0

//! Optional description enrichment. Without `PERPLEXITY_API_KEY` the
//! command reports that it skipped and touches nothing.

use crate::{CliFailure, Context};
use datacat_core::CoreErrorCode;
use datacat_store::Tree;
use serde_json::json;
use std::time::Duration;

const API_KEY_VAR: &str = "PERPLEXITY_API_KEY";
const API_URL: &str = "https://api.perplexity.ai/chat/completions";

pub fn run(ctx: &Context, dry_run: bool) -> Result<(), CliFailure> {
    let Ok(api_key) = std::env::var(API_KEY_VAR) else {
        if ctx.json {
            ctx.say(&json!({ "status": "skipped", "reason": format!("{API_KEY_VAR} not set") }).to_string());
        } else {
            ctx.say(&format!("skipped: {API_KEY_VAR} not set"));
        }
        return Ok(());
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .map_err(|e| CliFailure::coded(CoreErrorCode::Internal, e))?;

    let mut candidates = 0usize;
    let mut enriched = 0usize;
    for item in ctx.store.iter(Tree::Entities) {
        let mut loaded = match item {
            Ok(loaded) => loaded,
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable record");
                continue;
            }
        };
        let missing = loaded
            .record
            .description
            .as_deref()
            .map_or(true, |d| d.trim().is_empty());
        if !missing {
            continue;
        }
        candidates += 1;
        if dry_run {
            ctx.say(&format!("would enrich {}", loaded.record.id));
            continue;
        }
        match draft_description(&client, &api_key, &loaded.record.name, &loaded.record.link) {
            Ok(description) => {
                loaded.record.description = Some(description);
                ctx.store
                    .save(Tree::Entities, &loaded.record)
                    .map_err(|e| CliFailure::coded(CoreErrorCode::Io, e))?;
                enriched += 1;
            }
            Err(reason) => {
                // One failed lookup never stops the batch.
                tracing::warn!(id = %loaded.record.id, %reason, "enrichment failed");
            }
        }
    }

    if ctx.json {
        ctx.say(
            &json!({
                "status": "ran",
                "candidates": candidates,
                "enriched": enriched,
                "dry_run": dry_run,
            })
            .to_string(),
        );
    } else {
        ctx.say(&format!(
            "{candidates} candidates, {enriched} enriched{}",
            if dry_run { " (dry run)" } else { "" }
        ));
    }
    Ok(())
}

fn draft_description(
    client: &reqwest::blocking::Client,
    api_key: &str,
    name: &str,
    link: &str,
) -> Result<String, String> {
    let body = json!({
        "model": "sonar",
        "messages": [{
            "role": "user",
            "content": format!(
                "In one factual sentence, describe the data catalog '{name}' at {link}. \
                 No marketing language."
            ),
        }],
    });
    let response = client
        .post(API_URL)
        .bearer_auth(api_key)
        .json(&body)
        .send()
        .map_err(|e| e.to_string())?;
    if !response.status().is_success() {
        return Err(format!("http {}", response.status().as_u16()));
    }
    let payload: serde_json::Value = response.json().map_err(|e| e.to_string())?;
    payload["choices"][0]["message"]["content"]
        .as_str()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| "empty completion".to_string())
}
