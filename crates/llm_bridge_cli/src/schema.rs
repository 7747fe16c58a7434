//! Settings schema shown by the host for the `llm` CLI provider.

use llm_bridge_host::{SettingField, SettingsSchema, UiHint};

use crate::invocation::{DEFAULT_MAX_TOKENS, DEFAULT_TEMPERATURE};

/// Returns the temperature, system prompt and token limit settings.
#[must_use]
pub fn settings_schema() -> SettingsSchema {
    SettingsSchema::builder()
        .field(
            "temperature",
            SettingField::number("temperature", DEFAULT_TEMPERATURE)
                .description("Controls randomness in responses")
                .range(0, 2.0),
            Some(UiHint::widget("range").help("Higher values = more random")),
        )
        .field(
            "system",
            SettingField::string("system", "").description("System prompt for chat models"),
            Some(UiHint::widget("textarea").help("Optional system prompt")),
        )
        .field(
            "max_tokens",
            SettingField::integer("max_tokens", i64::from(DEFAULT_MAX_TOKENS))
                .description("Maximum length of response")
                .range(1, 4000),
            Some(UiHint::widget("range").help("Maximum response length")),
        )
        .build()
}
