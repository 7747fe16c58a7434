//! Integration tests against an installed `llm` tool.
//!
//! These tests are ignored by default because they require:
//! - The `llm` binary on `PATH` (or `LLM_CLI_EXECUTABLE`, also read from `.env`)
//! - At least one configured model, named by `LLM_CLI_TEST_MODEL`
//! - Network access, and may incur API costs
//!
//! To run these tests:
//! ```sh
//! cargo test -p llm_bridge_cli --test llm_integration -- --ignored
//! ```

mod common;

use common::init_env;
use llm_bridge_cli::{LlmCliConfig, LlmCliProvider};
use llm_bridge_host::{CompletionProvider, CompletionRequest, is_error_text};

fn provider() -> LlmCliProvider {
    init_env();
    LlmCliProvider::new(LlmCliConfig::from_env())
}

fn model() -> String {
    std::env::var("LLM_CLI_TEST_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string())
}

#[tokio::test]
#[ignore = "requires the llm CLI"]
async fn test_discovers_installed_models() {
    let discovery = provider().discover_models().await;

    assert!(!discovery.is_fallback(), "discovery fell back: {discovery:?}");
    assert!(!discovery.models().is_empty());
}

#[tokio::test]
#[ignore = "requires the llm CLI and a configured model"]
async fn test_basic_completion() {
    let text = provider()
        .complete(CompletionRequest::new("Say 'hello' and nothing else.", model()))
        .await;

    assert!(!is_error_text(&text), "completion failed: {text}");
    assert!(text.to_lowercase().contains("hello"), "got: {text}");
}

#[tokio::test]
#[ignore = "requires the llm CLI"]
async fn test_unknown_model_is_error_text() {
    let text = provider()
        .complete(CompletionRequest::new("Hello", "not-a-real-model"))
        .await;

    assert!(is_error_text(&text), "expected error text, got: {text}");
}
