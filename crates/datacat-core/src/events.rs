// SPDX-License-Identifier: Apache-2.0

//! Structured in-memory event trail carried through pipeline runs, so a
//! builder or quality result can report what happened without a logger.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum PipelineStage {
    Prepare,
    Synthesize,
    Detect,
    Validate,
    Repair,
    Persist,
    Finalize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineEvent {
    pub stage: PipelineStage,
    pub message: String,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
}

#[derive(Debug, Default, Clone)]
pub struct PipelineLog {
    events: Vec<PipelineEvent>,
}

impl PipelineLog {
    pub fn emit(&mut self, stage: PipelineStage, message: &str, fields: BTreeMap<String, String>) {
        self.events.push(PipelineEvent {
            stage,
            message: message.to_string(),
            fields,
        });
    }

    pub fn emit_kv(&mut self, stage: PipelineStage, message: &str, key: &str, value: &str) {
        let mut fields = BTreeMap::new();
        fields.insert(key.to_string(), value.to_string());
        self.emit(stage, message, fields);
    }

    #[must_use]
    pub fn events(&self) -> &[PipelineEvent] {
        &self.events
    }

    #[must_use]
    pub fn into_events(self) -> Vec<PipelineEvent> {
        self.events
    }
}
