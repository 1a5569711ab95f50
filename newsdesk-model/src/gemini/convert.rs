//! Wire types for the Gemini `generateContent` endpoint and conversions
//! to and from the core request/response types.

use newsdesk_core::{
    Content, FinishReason, GenerateContentConfig, LlmRequest, LlmResponse, Part, UsageMetadata,
};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<WireContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<WireContent>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<WireTool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<WirePart>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_call: Option<WireFunctionCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_response: Option<WireFunctionResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireFunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireFunctionResponse {
    pub name: String,
    pub response: Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WireTool {
    pub function_declarations: Vec<Value>,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub usage_metadata: Option<WireUsage>,
    #[serde(default)]
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<WireContent>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireUsage {
    #[serde(default)]
    pub prompt_token_count: Option<i32>,
    #[serde(default)]
    pub candidates_token_count: Option<i32>,
    #[serde(default)]
    pub total_token_count: Option<i32>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default)]
    pub block_reason: Option<String>,
}

/// Build the wire request. `temperature` is the adapter's fixed setting and
/// applies unless the request carries its own.
pub fn build_request(request: &LlmRequest, temperature: f32) -> GenerateContentRequest {
    let contents = request.contents.iter().map(content_to_wire).collect();

    let system_instruction = request.system_instruction.as_ref().map(|text| WireContent {
        role: None,
        parts: vec![WirePart { text: Some(text.clone()), ..empty_part() }],
    });

    let tools = if request.tools.is_empty() {
        Vec::new()
    } else {
        vec![WireTool { function_declarations: request.tools.values().cloned().collect() }]
    };

    let config = request.config.clone().unwrap_or_default();
    let generation_config = Some(generation_config(&config, temperature));

    GenerateContentRequest { contents, system_instruction, tools, generation_config }
}

fn generation_config(config: &GenerateContentConfig, temperature: f32) -> GenerationConfig {
    GenerationConfig {
        temperature: Some(config.temperature.unwrap_or(temperature)),
        top_p: config.top_p,
        top_k: config.top_k,
        max_output_tokens: config.max_output_tokens,
    }
}

fn empty_part() -> WirePart {
    WirePart { text: None, function_call: None, function_response: None }
}

/// Convert a core Content into a Gemini content. Function responses travel
/// in `user` turns.
pub fn content_to_wire(content: &Content) -> WireContent {
    let role = match content.role.as_str() {
        "model" | "assistant" => "model",
        _ => "user",
    };

    let parts = content
        .parts
        .iter()
        .map(|part| match part {
            Part::Text { text } => WirePart { text: Some(text.clone()), ..empty_part() },
            Part::FunctionCall { name, args, .. } => WirePart {
                function_call: Some(WireFunctionCall { name: name.clone(), args: args.clone() }),
                ..empty_part()
            },
            Part::FunctionResponse { function_response, .. } => WirePart {
                function_response: Some(WireFunctionResponse {
                    name: function_response.name.clone(),
                    response: response_object(&function_response.response),
                }),
                ..empty_part()
            },
        })
        .collect();

    WireContent { role: Some(role.to_string()), parts }
}

/// Gemini requires the function response payload to be a JSON object.
fn response_object(value: &Value) -> Value {
    if value.is_object() { value.clone() } else { json!({ "result": value }) }
}

pub fn convert_response(resp: &GenerateContentResponse) -> LlmResponse {
    let candidate = resp.candidates.first();

    let content = candidate.and_then(|c| c.content.as_ref()).map(|wire| {
        let parts = wire
            .parts
            .iter()
            .filter_map(|p| {
                if let Some(call) = &p.function_call {
                    Some(Part::function_call(call.name.clone(), call.args.clone()))
                } else {
                    p.text.as_ref().map(|text| Part::text_part(text.clone()))
                }
            })
            .collect();
        Content { role: "model".to_string(), parts }
    });

    let usage_metadata = resp.usage_metadata.as_ref().map(|u| UsageMetadata {
        prompt_token_count: u.prompt_token_count.unwrap_or(0),
        candidates_token_count: u.candidates_token_count.unwrap_or(0),
        total_token_count: u.total_token_count.unwrap_or(0),
    });

    let finish_reason =
        candidate.and_then(|c| c.finish_reason.as_deref()).map(|fr| match fr {
            "STOP" => FinishReason::Stop,
            "MAX_TOKENS" => FinishReason::MaxTokens,
            "SAFETY" => FinishReason::Safety,
            "RECITATION" => FinishReason::Recitation,
            _ => FinishReason::Other,
        });

    LlmResponse { content, usage_metadata, finish_reason }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_build_request_shapes_body() {
        let mut req = LlmRequest::new(
            "gemini-1.5-flash",
            vec![
                Content::new("user").with_text("Current Task: research"),
                Content::new("model")
                    .with_part(Part::function_call("search_the_internet", json!({"query": "ai"}))),
                Content::new("function")
                    .with_part(Part::function_response("search_the_internet", json!(["r1"]))),
            ],
        )
        .with_system_instruction("You are Senior Researcher.");
        req.tools = BTreeMap::from([(
            "search_the_internet".to_string(),
            json!({"name": "search_the_internet", "description": "Search"}),
        )]);

        let body = serde_json::to_value(build_request(&req, 0.5)).unwrap();

        assert_eq!(body["systemInstruction"]["parts"][0]["text"], "You are Senior Researcher.");
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][1]["role"], "model");
        assert_eq!(body["contents"][1]["parts"][0]["functionCall"]["name"], "search_the_internet");
        assert_eq!(body["contents"][2]["role"], "user");
        assert_eq!(
            body["contents"][2]["parts"][0]["functionResponse"]["response"]["result"],
            json!(["r1"])
        );
        assert_eq!(body["tools"][0]["functionDeclarations"][0]["name"], "search_the_internet");
        assert_eq!(body["generationConfig"]["temperature"], 0.5);
    }

    #[test]
    fn test_request_without_tools_omits_field() {
        let req = LlmRequest::new("m", vec![Content::new("user").with_text("hi")]);
        let body = serde_json::to_value(build_request(&req, 0.5)).unwrap();
        assert!(body.get("tools").is_none());
        assert!(body.get("systemInstruction").is_none());
    }

    #[test]
    fn test_convert_response_with_text_and_usage() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Hello "}, {"text": "world"}]},
                "finishReason": "STOP"
            }],
            "usageMetadata": {
                "promptTokenCount": 12,
                "candidatesTokenCount": 3,
                "totalTokenCount": 15
            }
        }))
        .unwrap();

        let converted = convert_response(&resp);
        assert_eq!(converted.content.unwrap().text(), "Hello world");
        assert_eq!(converted.finish_reason, Some(FinishReason::Stop));
        assert_eq!(converted.usage_metadata.unwrap().total_token_count, 15);
    }

    #[test]
    fn test_convert_response_with_function_call() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [
                    {"functionCall": {"name": "search_the_internet", "args": {"query": "AI"}}}
                ]}
            }]
        }))
        .unwrap();

        let content = convert_response(&resp).content.unwrap();
        assert!(content.has_function_calls());
        assert!(matches!(
            &content.parts[0],
            Part::FunctionCall { name, args, .. }
                if name == "search_the_internet" && args["query"] == "AI"
        ));
    }

    #[test]
    fn test_convert_response_without_candidates() {
        let resp: GenerateContentResponse = serde_json::from_value(json!({
            "promptFeedback": {"blockReason": "SAFETY"}
        }))
        .unwrap();

        let converted = convert_response(&resp);
        assert!(converted.content.is_none());
        assert!(converted.finish_reason.is_none());
    }
}
