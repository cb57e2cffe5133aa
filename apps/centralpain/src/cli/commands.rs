//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use super::CriteriaArgs;
use crate::api::{self, BundleJson, CriteriaResponse, EvaluateRequest, EvaluateResponse};
use crate::config::ServerConfig;
use centralpain_core::{
    Assessment, AssessmentError, BlockResponse, CriteriaInput, Criterion, EvaluationResult, Field,
    RecommendationBundle, checklist, evaluate,
};
use std::io::{BufRead, Read, Write};
use std::path::{Path, PathBuf};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum size of a criteria JSON file (64 KB).
const MAX_INPUT_FILE_SIZE: u64 = 64 * 1024;

/// Validate file path and size before reading.
///
/// Canonicalizes the path to resolve symlinks and "..", and ensures it is a
/// regular file within the size limit.
fn validate_input_file(path: &Path) -> Result<PathBuf, AssessmentError> {
    let canonical = path.canonicalize().map_err(|e| {
        AssessmentError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    let metadata = std::fs::metadata(&canonical)
        .map_err(|e| AssessmentError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if !metadata.is_file() {
        return Err(AssessmentError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    if metadata.len() > MAX_INPUT_FILE_SIZE {
        return Err(AssessmentError::IoError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            MAX_INPUT_FILE_SIZE
        )));
    }

    Ok(canonical)
}

/// Read a criteria request from a file, or from stdin when `path` is "-".
pub fn read_request(path: &Path) -> Result<EvaluateRequest, AssessmentError> {
    let contents = if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin()
            .take(MAX_INPUT_FILE_SIZE)
            .read_to_string(&mut buffer)
            .map_err(|e| AssessmentError::IoError(format!("Read stdin: {}", e)))?;
        buffer
    } else {
        let validated = validate_input_file(path)?;
        std::fs::read_to_string(&validated)
            .map_err(|e| AssessmentError::IoError(format!("Read file: {}", e)))?
    };

    parse_request(&contents)
}

/// Parse a criteria request from JSON text.
pub fn parse_request(contents: &str) -> Result<EvaluateRequest, AssessmentError> {
    serde_json::from_str(contents).map_err(|e| AssessmentError::SerializationError(e.to_string()))
}

/// Merge file values and command-line flags into one input.
pub fn build_input(
    file: Option<&EvaluateRequest>,
    args: &CriteriaArgs,
) -> Result<CriteriaInput, AssessmentError> {
    let base = match file {
        Some(request) => request.to_input()?,
        None => CriteriaInput::new(),
    };

    let flags = EvaluateRequest {
        documented_injury: args.injury.clone(),
        chronic_pain: args.chronic_pain.clone(),
        hypersensitivity: args.hypersensitivity.clone(),
        mood_cognitive: args.mood_cognitive.clone(),
        block_performed: args.block_performed.clone(),
        block_response: args.block_response.clone(),
    };
    flags.apply_to(base)
}

// =============================================================================
// RENDERING
// =============================================================================

/// Render a result as human-readable text.
pub fn format_result(input: &CriteriaInput, result: &EvaluationResult) -> String {
    let mut out = String::new();

    out.push_str("Central Pain Criteria Assessment\n");
    out.push_str("================================\n\n");

    if !result.diagnosis.is_evaluated() {
        out.push_str(result.diagnosis.title());
        out.push('\n');
        out.push_str("Fill out all criteria to receive an assessment. Still missing:\n");
        for field in input.missing_fields() {
            out.push_str(&format!("  - {}\n", field.prompt()));
        }
        return out;
    }

    out.push_str(&format!("Diagnosis: {}\n", result.diagnosis.title()));
    if let Some(tally) = result.tally {
        out.push_str(&format!(
            "Criteria:  {} of {} met\n",
            tally.satisfied(),
            tally.total()
        ));
    }

    out.push_str("\nClinical Recommendations:\n");
    for (index, statement) in result.recommendations().iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", index + 1, statement));
    }

    out.push_str("\nCriteria Assessment Summary:\n");
    for item in checklist(input) {
        let mark = if item.met { "[x]" } else { "[ ]" };
        out.push_str(&format!("  {} {}\n", mark, item.criterion.label()));
    }

    out
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, AssessmentError> {
    serde_json::to_string_pretty(value)
        .map_err(|e| AssessmentError::SerializationError(e.to_string()))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), AssessmentError> {
    println!("{}", to_json(value)?);
    Ok(())
}

// =============================================================================
// EVALUATE COMMAND
// =============================================================================

/// Evaluate criteria from a file and/or flags.
pub fn cmd_evaluate(
    json_mode: bool,
    file: Option<&Path>,
    args: &CriteriaArgs,
) -> Result<(), AssessmentError> {
    let request = file.map(read_request).transpose()?;
    let input = build_input(request.as_ref(), args)?;

    if !input.is_consistent() {
        tracing::warn!("block_response supplied without a performed block; ignoring it");
    }

    let result = evaluate(&input);
    tracing::debug!(diagnosis = result.diagnosis.key(), "Evaluated criteria");

    if json_mode {
        return print_json(&EvaluateResponse::from_evaluation(&input, &result));
    }

    print!("{}", format_result(&input, &result));
    Ok(())
}

// =============================================================================
// ASSESS COMMAND
// =============================================================================

/// Run the interactive assessment form on stdin.
///
/// In JSON mode the prompts go to stderr so stdout carries only the result.
pub fn cmd_assess(json_mode: bool) -> Result<(), AssessmentError> {
    let stdin = std::io::stdin();
    if json_mode {
        assess_session(stdin.lock(), std::io::stderr(), std::io::stdout(), json_mode)
    } else {
        assess_session(stdin.lock(), std::io::stdout(), std::io::stdout(), json_mode)
    }
}

/// Walk the form on `prompts`, then write the final report to `out`.
pub fn assess_session<R: BufRead, P: Write, W: Write>(
    reader: R,
    prompts: P,
    mut out: W,
    json_mode: bool,
) -> Result<(), AssessmentError> {
    let assessment = run_assessment(reader, prompts)?;

    let report = if json_mode {
        to_json(&EvaluateResponse::from_evaluation(
            assessment.input(),
            assessment.result(),
        ))?
    } else {
        format!(
            "\n{}",
            format_result(assessment.input(), assessment.result())
        )
    };

    writeln!(out, "{}", report.trim_end()).map_err(|e| AssessmentError::IoError(e.to_string()))
}

fn prompt_options(field: Field) -> String {
    match field {
        Field::BlockResponse => format!(
            "[{} | {}]",
            BlockResponse::Limited.label(),
            BlockResponse::Good.label()
        ),
        _ => "[yes/no]".to_string(),
    }
}

fn write_line(writer: &mut impl Write, line: &str) -> Result<(), AssessmentError> {
    writeln!(writer, "{}", line).map_err(|e| AssessmentError::IoError(e.to_string()))
}

/// Walk the form field by field, re-evaluating after every answer.
///
/// Stops when every required field is answered or the reader is exhausted.
/// Invalid answers are reported and the same field is asked again.
pub fn run_assessment<R: BufRead, W: Write>(
    mut reader: R,
    mut writer: W,
) -> Result<Assessment, AssessmentError> {
    let mut assessment = Assessment::new();

    while let Some(field) = assessment.next_field() {
        write!(writer, "{} {}: ", field.prompt(), prompt_options(field))
            .and_then(|()| writer.flush())
            .map_err(|e| AssessmentError::IoError(e.to_string()))?;

        let mut line = String::new();
        let read = reader
            .read_line(&mut line)
            .map_err(|e| AssessmentError::IoError(e.to_string()))?;
        if read == 0 {
            write_line(&mut writer, "")?;
            tracing::debug!(missing = assessment.missing_fields().len(), "Input ended early");
            break;
        }

        if line.trim().is_empty() {
            write_line(&mut writer, "  An answer is required.")?;
            continue;
        }

        match assessment.apply(field, &line) {
            Ok(result) => {
                tracing::debug!(
                    field = field.key(),
                    diagnosis = result.diagnosis.key(),
                    "Re-evaluated"
                );
            }
            Err(e) => write_line(&mut writer, &format!("  {}", e))?,
        }
    }

    Ok(assessment)
}

// =============================================================================
// REFERENCE COMMANDS
// =============================================================================

/// List the diagnostic criteria.
pub fn cmd_criteria(json_mode: bool) -> Result<(), AssessmentError> {
    if json_mode {
        return print_json(&CriteriaResponse::default());
    }

    println!("Diagnostic Criteria for Centralized Pain");
    println!("========================================");
    for (index, criterion) in Criterion::ALL.iter().enumerate() {
        println!();
        println!("{}. {}", index + 1, criterion.label());
        println!("   {}", criterion.description());
    }
    println!();
    println!("Criterion 5 is counted only when a peripheral nerve block was performed.");

    Ok(())
}

/// List every recommendation bundle.
pub fn cmd_catalog(json_mode: bool) -> Result<(), AssessmentError> {
    if json_mode {
        let bundles: Vec<BundleJson> = RecommendationBundle::ALL
            .into_iter()
            .map(BundleJson::from)
            .collect();
        return print_json(&bundles);
    }

    println!("Recommendation Catalog");
    println!("======================");
    for bundle in RecommendationBundle::ALL {
        println!();
        println!("{} ({})", bundle.summary(), bundle.key());
        for statement in bundle.statements() {
            println!("  - {}", statement);
        }
    }

    Ok(())
}

// =============================================================================
// SERVER COMMAND
// =============================================================================

/// Start the HTTP server.
pub async fn cmd_server(config: &ServerConfig) -> Result<(), AssessmentError> {
    println!("centralpain HTTP Server Starting...");
    println!();
    println!("Configuration:");
    println!("  Host:       {}", config.host);
    println!("  Port:       {}", config.port);
    println!("  Rate limit: {} req/s", config.rate_limit);
    println!();
    println!("Endpoints:");
    println!("  GET  /health   - Health check");
    println!("  GET  /criteria - List diagnostic criteria");
    println!("  POST /evaluate - Evaluate a criteria set");
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    api::run_server(config).await
}

// =============================================================================
// TESTS
// =============================================================================
