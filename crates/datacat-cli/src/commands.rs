// SPDX-License-Identifier: Apache-2.0

use crate::{CliFailure, Context};
use datacat_build::{build_record, BuildError, BuildOutcome, BuildRequest};
use datacat_core::{CoreErrorCode, ExitCode};
use datacat_detect::{detect_endpoints, merge_endpoints, HttpTransport, TransportConfig};
use datacat_model::{
    catalog_schema, software_schema, validate_value, ApiStatus, SoftwareRecord,
};
use datacat_quality::{IssueType, QualityError, QualityOptions, TrustContext};
use datacat_refdata::{reference_context, software_names};
use datacat_store::{Tree, SOFTWARE_DIR};
use serde_json::json;
use std::collections::BTreeSet;
use std::path::Path;

fn parse_rule(raw: Option<&str>) -> Result<Option<IssueType>, CliFailure> {
    match raw {
        None => Ok(None),
        Some(name) => IssueType::parse(name)
            .map(Some)
            .ok_or_else(|| CliFailure::usage(format!("unknown rule '{name}'"))),
    }
}

pub fn validate_tree(ctx: &Context, tree: Tree) -> Result<(), CliFailure> {
    let schema = catalog_schema();
    let refs = reference_context();
    let files = ctx
        .store
        .record_files(tree)
        .map_err(|e| CliFailure::coded(CoreErrorCode::Io, e))?;

    let mut findings: Vec<serde_json::Value> = Vec::new();
    for path in &files {
        match ctx.store.load_raw(path) {
            Ok(raw) => {
                for violation in validate_value(&raw, &schema) {
                    findings.push(json!({
                        "path": path.display().to_string(),
                        "field": violation.field,
                        "message": violation.message,
                    }));
                }
            }
            Err(err) => {
                findings.push(json!({
                    "path": path.display().to_string(),
                    "field": "",
                    "message": err.to_string(),
                }));
                continue;
            }
        }
        // Structural invariants only make sense once the document decodes.
        if let Ok(record) = ctx.store.load(path) {
            for violation in record.integrity_violations(&refs) {
                findings.push(json!({
                    "path": path.display().to_string(),
                    "field": violation.field,
                    "message": violation.message,
                }));
            }
        }
    }

    report_findings(ctx, tree.as_str(), files.len(), &findings)
}

pub fn validate_software(ctx: &Context) -> Result<(), CliFailure> {
    let schema = software_schema();
    let dir = ctx.root.join(SOFTWARE_DIR);
    let mut findings: Vec<serde_json::Value> = Vec::new();
    let mut files = 0usize;

    if dir.is_dir() {
        let entries =
            std::fs::read_dir(&dir).map_err(|e| CliFailure::coded(CoreErrorCode::Io, e))?;
        let mut paths: Vec<_> = entries
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("yaml"))
            .collect();
        paths.sort();
        for path in paths {
            files += 1;
            let raw = match std::fs::read_to_string(&path) {
                Ok(raw) => raw,
                Err(err) => {
                    findings.push(json!({
                        "path": path.display().to_string(),
                        "field": "",
                        "message": err.to_string(),
                    }));
                    continue;
                }
            };
            let value: serde_json::Value = match serde_yaml::from_str::<serde_yaml::Value>(&raw)
                .map_err(|e| e.to_string())
                .and_then(|y| serde_json::to_value(y).map_err(|e| e.to_string()))
            {
                Ok(value) => value,
                Err(message) => {
                    findings.push(json!({
                        "path": path.display().to_string(),
                        "field": "",
                        "message": message,
                    }));
                    continue;
                }
            };
            for violation in validate_value(&value, &schema) {
                findings.push(json!({
                    "path": path.display().to_string(),
                    "field": violation.field,
                    "message": violation.message,
                }));
            }
            if let Ok(record) = serde_yaml::from_str::<SoftwareRecord>(&raw) {
                for tag in record.metadata_support.unknown_tags() {
                    findings.push(json!({
                        "path": path.display().to_string(),
                        "field": "metadata_support",
                        "message": format!("unknown protocol tag '{tag}'"),
                    }));
                }
            }
        }
    }

    report_findings(ctx, SOFTWARE_DIR, files, &findings)
}

fn report_findings(
    ctx: &Context,
    directory: &str,
    files: usize,
    findings: &[serde_json::Value],
) -> Result<(), CliFailure> {
    if ctx.json {
        ctx.say(&json!({ "directory": directory, "files": files, "violations": findings }).to_string());
    } else {
        for finding in findings {
            let path = finding["path"].as_str().unwrap_or_default();
            let field = finding["field"].as_str().unwrap_or_default();
            let message = finding["message"].as_str().unwrap_or_default();
            if field.is_empty() {
                ctx.say(&format!("{path}: {message}"));
            } else {
                ctx.say(&format!("{path}: {field}: {message}"));
            }
        }
        ctx.say(&format!(
            "{directory}: {files} files, {} violations",
            findings.len()
        ));
    }
    if findings.is_empty() {
        Ok(())
    } else {
        Err(CliFailure::new(
            ExitCode::Validation,
            format!("{} violations in {directory}", findings.len()),
        ))
    }
}

pub fn build(
    ctx: &Context,
    url: &str,
    software: &str,
    country: Option<String>,
    scheduled: bool,
) -> Result<(), CliFailure> {
    let transport = HttpTransport::new(&TransportConfig::default())
        .map_err(|e| CliFailure::new(ExitCode::DependencyFailure, e.to_string()))?;
    let request = BuildRequest {
        url: url.to_string(),
        software_id: software.to_string(),
        country_hint: country,
        scheduled,
    };
    match build_record(&request, &ctx.store, &transport) {
        Ok(BuildOutcome::Created { path, record, .. }) => {
            if ctx.json {
                ctx.say(
                    &json!({
                        "created": true,
                        "id": record.id,
                        "path": path.display().to_string(),
                        "endpoints": record.endpoints.len(),
                    })
                    .to_string(),
                );
            } else {
                ctx.say(&format!("created {} ({})", record.id, path.display()));
            }
            Ok(())
        }
        Ok(BuildOutcome::AlreadyExists { id, path }) => {
            if ctx.json {
                ctx.say(
                    &json!({
                        "created": false,
                        "id": id,
                        "path": path.display().to_string(),
                    })
                    .to_string(),
                );
            } else {
                ctx.say(&format!("already exists: {id} ({})", path.display()));
            }
            Ok(())
        }
        Err(err @ (BuildError::UnknownSoftware(_) | BuildError::InvalidUrl(_))) => {
            Err(CliFailure::usage(err.to_string()))
        }
        Err(err) => Err(CliFailure::coded(CoreErrorCode::Io, err)),
    }
}

pub fn compile(ctx: &Context, out: &Path) -> Result<(), CliFailure> {
    let report = datacat_compile::compile(&ctx.store, out)
        .map_err(|e| CliFailure::coded(CoreErrorCode::Io, e))?;
    if ctx.json {
        ctx.say(
            &json!({
                "records": report.records,
                "markdown_pages": report.markdown_pages,
                "sha256": report.corpus_sha256,
                "skipped": report.skipped,
            })
            .to_string(),
        );
    } else {
        ctx.say(&format!(
            "compiled {} records ({} pages), sha256 {}",
            report.records, report.markdown_pages, report.corpus_sha256
        ));
        for reason in &report.skipped {
            ctx.say(&format!("skipped: {reason}"));
        }
    }
    Ok(())
}

pub fn detect(
    ctx: &Context,
    software: &str,
    tree: Tree,
    dry_run: bool,
) -> Result<(), CliFailure> {
    if !software_names().contains_key(software) {
        return Err(CliFailure::usage(format!("unknown software id '{software}'")));
    }
    let transport = HttpTransport::new(&TransportConfig::default())
        .map_err(|e| CliFailure::new(ExitCode::DependencyFailure, e.to_string()))?;

    let mut scanned = 0usize;
    let mut changed = 0usize;
    for item in ctx.store.iter(tree) {
        let mut loaded = match item {
            Ok(loaded) => loaded,
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable record");
                continue;
            }
        };
        if loaded.record.software.id != software {
            continue;
        }
        scanned += 1;
        let outcome = detect_endpoints(
            &loaded.record.link,
            software,
            &loaded.record.endpoints,
            &transport,
        );
        let merged = merge_endpoints(&loaded.record.endpoints, outcome.endpoints);
        let has_endpoints = !merged.is_empty();
        let api_status = if has_endpoints {
            ApiStatus::Active
        } else {
            loaded.record.api_status
        };
        if merged == loaded.record.endpoints
            && loaded.record.api == has_endpoints
            && loaded.record.api_status == api_status
        {
            continue;
        }
        changed += 1;
        if !dry_run {
            loaded.record.endpoints = merged;
            loaded.record.api = has_endpoints;
            loaded.record.api_status = api_status;
            ctx.store
                .save(tree, &loaded.record)
                .map_err(|e| CliFailure::coded(CoreErrorCode::Io, e))?;
        }
    }

    if ctx.json {
        ctx.say(
            &json!({
                "software": software,
                "scanned": scanned,
                "changed": changed,
                "dry_run": dry_run,
            })
            .to_string(),
        );
    } else {
        ctx.say(&format!(
            "{software}: scanned {scanned}, changed {changed}{}",
            if dry_run { " (dry run)" } else { "" }
        ));
    }
    Ok(())
}

pub fn quality_report(ctx: &Context, rule: Option<&str>) -> Result<(), CliFailure> {
    let rule = parse_rule(rule)?;
    let report = datacat_quality::report(&ctx.store, rule)
        .map_err(|e| CliFailure::coded(CoreErrorCode::CorruptInput, e))?;
    if ctx.json {
        let body = serde_json::to_string(&report.issues)
            .map_err(|e| CliFailure::internal(e.to_string()))?;
        ctx.say(&body);
    } else {
        for issue in &report.issues {
            ctx.say(&format!(
                "{} {} {} {}: {}",
                issue.severity,
                issue.issue_type,
                issue.file_path.display(),
                issue.field,
                issue.suggested_action
            ));
        }
        ctx.say(&format!(
            "{} issues, {} unreadable files",
            report.issues.len(),
            report.skipped.len()
        ));
    }
    Ok(())
}

pub fn quality_fix(ctx: &Context, rule: Option<&str>, dry_run: bool) -> Result<(), CliFailure> {
    let options = QualityOptions {
        rule: parse_rule(rule)?,
        dry_run,
    };
    let summary = datacat_quality::fix(&ctx.store, &options).map_err(|e| {
        let code = match &e {
            QualityError::Store(_) => CoreErrorCode::CorruptInput,
            _ => CoreErrorCode::InvariantBroken,
        };
        CliFailure::coded(code, e)
    })?;
    if ctx.json {
        ctx.say(
            &json!({
                "issues_before": summary.issues_before,
                "issues_after": summary.issues_after,
                "records_changed": summary.records_changed,
                "dry_run": dry_run,
            })
            .to_string(),
        );
    } else {
        ctx.say(&format!(
            "{} -> {} issues, {} records changed{}",
            summary.issues_before,
            summary.issues_after,
            summary.records_changed,
            if dry_run { " (dry run)" } else { "" }
        ));
    }
    Ok(())
}

pub fn trust_score(
    ctx: &Context,
    dry_run: bool,
    seals: Option<&Path>,
) -> Result<(), CliFailure> {
    let mut context = TrustContext::default();
    if let Some(path) = seals {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| CliFailure::usage(format!("{}: {e}", path.display())))?;
        context.re3data_seals = raw
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect::<BTreeSet<String>>();
    }
    let changed = datacat_quality::rescore(&ctx.store, &context, dry_run)
        .map_err(|e| CliFailure::coded(CoreErrorCode::CorruptInput, e))?;
    if ctx.json {
        ctx.say(&json!({ "changed": changed, "dry_run": dry_run }).to_string());
    } else {
        ctx.say(&format!(
            "{changed} records rescored{}",
            if dry_run { " (dry run)" } else { "" }
        ));
    }
    Ok(())
}
