//! Wire-level tests for the hosted generation and translation clients.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use stargazer::providers::{
    GeminiClient, HuggingFaceClient, OpenAiClient, ProviderChain, ProviderDescriptor,
    TemplateProvider,
};
use stargazer::translation::{GoogleTranslateClient, HfTranslator};
use stargazer::{
    GenerationProvider, Language, PromptContext, StargazerError, TranslationBackend,
    TranslationMethod,
};

fn prompt() -> PromptContext {
    PromptContext::from_text("Generate a personalized daily astrological insight for Ritika.")
}

// ============================================================================
// Gemini
// ============================================================================

#[tokio::test]
async fn gemini_generate_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-pro:generateContent"))
        .and(header("x-goog-api-key", "test_key"))
        .and(body_partial_json(json!({
            "generationConfig": { "maxOutputTokens": 200 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": " Ritika, lead with warmth today. " }] }
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GeminiClient::with_base_url("test_key", server.uri());
    let text = client
        .generate(&prompt(), CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(text, "Ritika, lead with warmth today.");
}

#[tokio::test]
async fn gemini_without_candidates_is_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let client = GeminiClient::with_base_url("test_key", server.uri());
    let err = client.complete("hi").await.unwrap_err();
    assert!(matches!(err, StargazerError::EmptyResponse));
}

#[tokio::test]
async fn gemini_unauthorized_maps_to_authentication_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&server)
        .await;

    let client = GeminiClient::with_base_url("wrong", server.uri());
    let err = client.complete("hi").await.unwrap_err();
    assert!(matches!(err, StargazerError::AuthenticationFailed));
}

#[tokio::test]
async fn cancelled_token_abandons_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(30))
                .set_body_json(json!({ "candidates": [] })),
        )
        .mount(&server)
        .await;

    let client = GeminiClient::with_base_url("test_key", server.uri());
    let token = CancellationToken::new();
    token.cancel();
    let err = client.generate(&prompt(), token).await.unwrap_err();
    assert!(matches!(err, StargazerError::Cancelled));
}

// ============================================================================
// OpenAI
// ============================================================================

#[tokio::test]
async fn openai_chat_completion() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer test_key"))
        .and(body_partial_json(json!({
            "model": "gpt-3.5-turbo",
            "max_tokens": 200
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "Trust your instincts." } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenAiClient::with_base_url("test_key", server.uri());
    let text = client
        .generate(&prompt(), CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(text, "Trust your instincts.");
}

#[tokio::test]
async fn openai_rate_limit_maps_to_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = OpenAiClient::with_base_url("test_key", server.uri());
    let err = client.complete("hi").await.unwrap_err();
    assert!(matches!(err, StargazerError::RateLimited));
}

// ============================================================================
// HuggingFace
// ============================================================================

#[tokio::test]
async fn huggingface_generation_list_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/mistralai/Mistral-7B-Instruct-v0.1"))
        .and(header("Authorization", "Bearer hf_test"))
        .and(body_partial_json(json!({
            "parameters": { "return_full_text": false }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "generated_text": "Your charisma opens doors today." }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = HuggingFaceClient::with_base_url("hf_test", server.uri());
    let text = client
        .generate(&prompt(), CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(text, "Your charisma opens doors today.");
}

#[tokio::test]
async fn huggingface_generation_object_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/custom/model"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "generated_text": "A calm day ahead." })),
        )
        .mount(&server)
        .await;

    let client = HuggingFaceClient::with_base_url("hf_test", server.uri()).model("custom/model");
    assert_eq!(client.generate_text("hi").await.unwrap(), "A calm day ahead.");
}

#[tokio::test]
async fn huggingface_model_loading_is_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = HuggingFaceClient::with_base_url("hf_test", server.uri());
    let err = client.generate_text("hi").await.unwrap_err();
    assert!(matches!(err, StargazerError::Api { status: 503, .. }));
}

#[tokio::test]
async fn nllb_translation_uses_flores_codes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/facebook/nllb-200-distilled-600M"))
        .and(body_partial_json(json!({
            "parameters": { "src_lang": "eng_Latn", "tgt_lang": "hin_Deva" }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "translation_text": "आज आपका दिन शुभ है।" }])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let translator = HfTranslator::nllb(HuggingFaceClient::with_base_url("hf_test", server.uri()));
    assert!(translator.is_available());
    assert_eq!(translator.method(), TranslationMethod::Nllb);

    let out = translator
        .translate("Today is auspicious.", Language::Hindi)
        .await
        .unwrap();
    assert_eq!(out, "आज आपका दिन शुभ है।");
}

#[tokio::test]
async fn translator_without_key_is_unavailable() {
    let translator = HfTranslator::indictrans2(HuggingFaceClient::new(""));
    assert!(!translator.is_available());
}

// ============================================================================
// Google Translate
// ============================================================================

#[tokio::test]
async fn google_translate_v2() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/language/translate/v2"))
        .and(query_param("key", "g_key"))
        .and(body_partial_json(json!({ "source": "en", "target": "hi" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "translations": [{ "translatedText": "नमस्ते" }] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = GoogleTranslateClient::with_base_url("g_key", server.uri());
    let out = client.translate("Hello", Language::Hindi).await.unwrap();
    assert_eq!(out, "नमस्ते");
}

// ============================================================================
// Chain over real clients
// ============================================================================

#[tokio::test]
async fn failing_hosted_provider_falls_through_to_template() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal"))
        .expect(1)
        .mount(&server)
        .await;

    let chain = ProviderChain::new(vec![
        ProviderDescriptor::new(
            Arc::new(OpenAiClient::with_base_url("test_key", server.uri())),
            0,
            Duration::from_secs(5),
        ),
        ProviderDescriptor::new(
            Arc::new(TemplateProvider::new()),
            u32::MAX,
            Duration::from_secs(5),
        ),
    ])
    .unwrap();

    let generation = chain.generate(&prompt()).await.unwrap();
    assert_eq!(generation.provider, "template");
    assert_eq!(generation.failures.len(), 1);
    assert_eq!(generation.failures[0].provider, "openai");
}
