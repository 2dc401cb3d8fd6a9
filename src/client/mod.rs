//! HTTP client for the generation and scoring service.
//!
//! One blocking client covers the four endpoints copydesk talks to:
//!
//! - `POST /api/generate-template` - template generation
//! - `POST /api/check-brand-alignment` - brand voice scoring
//! - `POST /api/check-persona-resonance` - persona scoring
//! - `POST /api/optimize-copy` - alignment-driven rewrite
//!
//! Every call is one request, one response: no retry, no backoff, no
//! timeout. On a non-2xx response the body's `details` field is surfaced as
//! the user-facing message, falling back to `error`, falling back to the
//! HTTP status.

use crate::align::{AlignmentFeedback, AlignmentKind, AlignmentResult};
use crate::config::Config;
use crate::error::{CopydeskError, Result};
use crate::voice::{BrandVoice, Persona};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;


/// Generation endpoint path.
pub const GENERATE_PATH: &str = "/api/generate-template";

/// Brand alignment scoring endpoint path.
pub const BRAND_ALIGNMENT_PATH: &str = "/api/check-brand-alignment";

/// Persona resonance scoring endpoint path.
pub const PERSONA_RESONANCE_PATH: &str = "/api/check-persona-resonance";

/// Optimize endpoint path.
pub const OPTIMIZE_PATH: &str = "/api/optimize-copy";

/// A generation request.
#[derive(Debug, Clone)]
pub struct GenerateRequest<'a> {
    /// Template id.
    pub template_id: &'a str,

    /// Resolved form values (Other sentinels already substituted).
    pub form_data: &'a BTreeMap<String, String>,

    /// The fully assembled prompt.
    pub prompt: &'a str,

    /// Brand voice to apply, if any.
    pub brand_voice: Option<&'a BrandVoice>,

    /// Persona to target, if any.
    pub persona: Option<&'a Persona>,
}

/// An optimize response: the rewrite plus a summary of changes.
#[derive(Debug, Clone)]
pub struct OptimizeOutput {
    /// Rewritten HTML.
    pub optimized_copy: String,

    /// Human-readable changes summary.
    pub changes: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    generated_copy: String,
}

#[derive(Debug, Deserialize)]
struct BrandAlignmentResponse {
    score: i64,
    assessment: String,
    #[serde(default)]
    matches: Vec<String>,
    #[serde(default)]
    violations: Vec<String>,
    #[serde(default)]
    recommendations: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PersonaResonanceResponse {
    score: i64,
    assessment: String,
    #[serde(default)]
    strengths: Vec<String>,
    #[serde(default)]
    improvements: Vec<String>,
    #[serde(default)]
    recommendations: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OptimizeResponse {
    optimized_copy: String,
    #[serde(default)]
    changes: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

/// Client for the generation/scoring service.
pub struct ApiClient {
    base_url: String,
    auth_token: Option<String>,
    http: reqwest::blocking::Client,
}

impl ApiClient {
    /// Create a client from workspace configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: config.effective_api_base_url(),
            auth_token: config.api_auth_token.clone(),
            http: reqwest::blocking::Client::new(),
        }
    }

    /// Create a client against an explicit base URL (used by tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            auth_token: None,
            http: reqwest::blocking::Client::new(),
        }
    }

    /// Generate copy from a template.
    ///
    /// Returns the raw `generatedCopy` HTML; callers run it through the
    /// content formatter before storing it.
    pub fn generate(&self, request: &GenerateRequest<'_>) -> Result<String> {
        let mut body = json!({
            "templateId": request.template_id,
            "formData": request.form_data,
            "prompt": request.prompt,
            "applyBrandVoice": request.brand_voice.is_some(),
        });

        if let Some(voice) = request.brand_voice {
            body["brandVoice"] = brand_voice_payload(voice);
        }
        if let Some(persona) = request.persona {
            body["persona"] = persona_payload(persona);
        }

        let value = self.post_json(GENERATE_PATH, &body)?;
        let response: GenerateResponse = parse_response(GENERATE_PATH, value)?;
        Ok(response.generated_copy)
    }

    /// Score text against a brand voice.
    pub fn check_brand_alignment(&self, text: &str, voice: &BrandVoice) -> Result<AlignmentResult> {
        let body = json!({
            "text": text,
            "brandVoice": brand_voice_payload(voice),
        });

        let value = self.post_json(BRAND_ALIGNMENT_PATH, &body)?;
        let response: BrandAlignmentResponse = parse_response(BRAND_ALIGNMENT_PATH, value)?;

        Ok(AlignmentResult {
            score: AlignmentResult::validate_score(response.score)?,
            assessment: response.assessment,
            feedback: AlignmentFeedback::Brand {
                matches: response.matches,
                violations: response.violations,
                recommendations: response.recommendations,
            },
        })
    }

    /// Score text against a persona.
    pub fn check_persona_resonance(&self, text: &str, persona: &Persona) -> Result<AlignmentResult> {
        let body = json!({
            "text": text,
            "persona": persona_payload(persona),
        });

        let value = self.post_json(PERSONA_RESONANCE_PATH, &body)?;
        let response: PersonaResonanceResponse = parse_response(PERSONA_RESONANCE_PATH, value)?;

        Ok(AlignmentResult {
            score: AlignmentResult::validate_score(response.score)?,
            assessment: response.assessment,
            feedback: AlignmentFeedback::Persona {
                strengths: response.strengths,
                improvements: response.improvements,
                recommendations: response.recommendations,
            },
        })
    }

    /// Request an alignment-driven rewrite of previously analyzed text.
    pub fn optimize(
        &self,
        text: &str,
        kind: AlignmentKind,
        alignment: &AlignmentResult,
        brand_voice: Option<&BrandVoice>,
        persona: Option<&Persona>,
    ) -> Result<OptimizeOutput> {
        let alignment_value = serde_json::to_value(alignment).map_err(|e| {
            CopydeskError::UserError(format!("failed to serialize alignment result: {}", e))
        })?;

        let mut body = json!({
            "text": text,
            "alignmentType": kind.as_str(),
            "alignment": alignment_value,
        });

        if let Some(voice) = brand_voice {
            body["brandVoice"] = brand_voice_payload(voice);
        }
        if let Some(persona) = persona {
            body["persona"] = persona_payload(persona);
        }

        let value = self.post_json(OPTIMIZE_PATH, &body)?;
        let response: OptimizeResponse = parse_response(OPTIMIZE_PATH, value)?;

        Ok(OptimizeOutput {
            optimized_copy: response.optimized_copy,
            changes: response.changes,
        })
    }

    /// POST a JSON body and return the parsed JSON response.
    ///
    /// Single attempt; transport errors and non-2xx statuses both surface as
    /// API errors with a user-facing message.
    fn post_json(&self, path: &str, body: &Value) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self.http.post(&url).json(body);
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .map_err(|e| CopydeskError::ApiError(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        let text = response.text().map_err(|e| {
            CopydeskError::ApiError(format!("failed to read response from {}: {}", url, e))
        })?;

        if !status.is_success() {
            return Err(CopydeskError::ApiError(extract_error_message(
                status.as_u16(),
                &text,
            )));
        }

        serde_json::from_str(&text).map_err(|e| {
            CopydeskError::ApiError(format!("invalid JSON response from {}: {}", url, e))
        })
    }
}

/// Map an error body to a user-facing message: `details`, then `error`,
/// then the HTTP status.
fn extract_error_message(status: u16, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorResponse>(body) {
        if let Some(details) = parsed.details.filter(|d| !d.trim().is_empty()) {
            return details;
        }
        if let Some(error) = parsed.error.filter(|e| !e.trim().is_empty()) {
            return error;
        }
    }
    format!("HTTP {}", status)
}

/// Deserialize a typed response, attributing parse failures to the endpoint.
fn parse_response<T: serde::de::DeserializeOwned>(path: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| {
        CopydeskError::ApiError(format!("unexpected response shape from {}: {}", path, e))
    })
}

/// Brand voice payload in the service's wire format.
fn brand_voice_payload(voice: &BrandVoice) -> Value {
    json!({
        "brandName": voice.brand_name,
        "tone": voice.tone,
        "approvedPhrases": voice.approved_phrases,
        "forbiddenWords": voice.forbidden_words,
        "values": voice.values,
        "mission": voice.mission,
    })
}

/// Persona payload in the service's wire format.
fn persona_payload(persona: &Persona) -> Value {
    json!({
        "name": persona.name,
        "photo": persona.photo,
        "demographics": persona.demographics,
        "psychographics": persona.psychographics,
        "painPoints": persona.pain_points,
        "languagePatterns": persona.language_patterns,
        "goals": persona.goals,
    })
}
