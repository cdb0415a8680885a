// SPDX-FileCopyrightText: 2026 ecoroute Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests that run the compiled `ecoroute` binary.
//!
//! Each test writes its own config file, so the host's config hierarchy
//! never leaks in. Remote backends point at wiremock servers.

use std::io::Write;
use std::process::{Command, Output};

use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_config(toml: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .unwrap();
    file.write_all(toml.as_bytes()).unwrap();
    file
}

fn ecoroute(config: &tempfile::NamedTempFile, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_ecoroute"))
        .arg("--config")
        .arg(config.path())
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .unwrap()
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "command failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn suggest_short_prompt_picks_cheapest_tier() {
    let config = write_config("");
    let json = stdout_json(&ecoroute(&config, &["suggest", "hi"]));
    assert_eq!(json["query"], "hi");
    assert_eq!(json["suggestion"]["suggested_model"], "simple");
    assert_eq!(json["suggestion"]["complexity_score"], 0);
}

#[test]
fn classify_detects_inline_arithmetic() {
    let config = write_config("");
    let json = stdout_json(&ecoroute(&config, &["classify", "What is 2+2?"]));
    let categories: Vec<&str> = json["categories"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_str)
        .collect();
    assert_eq!(categories, vec!["math"]);
    assert_eq!(json["token_count"], 3);
}

#[test]
fn query_answers_from_canned_template() {
    let config = write_config("");
    let json = stdout_json(&ecoroute(&config, &["query", "What is renewable energy?"]));
    assert_eq!(json["model_used"], "simple");
    assert_eq!(json["tokens_used"], 4);
    assert!(json["response"].as_str().unwrap().starts_with("Renewable energy"));
}

#[tokio::test(flavor = "multi_thread")]
async fn query_falls_through_to_local_model() {
    let ollama = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "model": "tinyllama",
            "response": "Offshore wind farms produce steady clean power.",
            "done": true
        })))
        .expect(1)
        .mount(&ollama)
        .await;

    let config = write_config(&format!("[ollama]\nbase_url = \"{}\"\n", ollama.uri()));
    let output = tokio::task::spawn_blocking(move || {
        ecoroute(&config, &["query", "Tell me a wind fact"])
    })
    .await
    .unwrap();

    let json = stdout_json(&output);
    assert_eq!(json["model_used"], "tinyllama");
    assert_eq!(json["attempts"][0]["provider"], "simple");
    assert_eq!(json["attempts"][0]["kind"], "no_answer");
    assert_eq!(json["attempts"][1]["outcome"], "accepted");
}

#[test]
fn unknown_forced_model_is_exhausted() {
    let config = write_config("");
    let json = stdout_json(&ecoroute(&config, &["query", "hello", "--model", "gpt-9"]));
    assert_eq!(json["model_used"], "none");
    assert_eq!(json["carbon_footprint_grams"], 0.0);
    assert_eq!(json["attempts"].as_array().unwrap().len(), 0);
}

#[test]
fn empty_prompt_fails() {
    let config = write_config("");
    let output = ecoroute(&config, &["query", "   "]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("query is required"));
}

#[test]
fn config_typo_is_reported_with_suggestion() {
    let config = write_config("[routing]\ncall_timout_secs = 5\n");
    let output = ecoroute(&config, &["providers"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("call_timeout_secs"), "stderr: {stderr}");
}
