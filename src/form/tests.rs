//! Form engine tests.

use super::*;
use crate::catalog;

fn filled_social_ad() -> FormData {
    let mut form = FormData::new();
    form.set("platform", "Instagram");
    form.set("productName", "Acme Deploys");
    form.set("hook", "Ship in seconds, not sprints");
    form.set("callToAction", "Start free");
    form
}

#[test]
fn from_pairs_parses_key_value() {
    let form = FormData::from_pairs(["productName=Acme", "hook=Fast ships"]).unwrap();
    assert_eq!(form.get("productName"), Some("Acme"));
    assert_eq!(form.get("hook"), Some("Fast ships"));
}

#[test]
fn from_pairs_rejects_missing_equals() {
    let result = FormData::from_pairs(["productName"]);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("productName"));
}

#[test]
fn from_pairs_keeps_equals_in_value() {
    let form = FormData::from_pairs(["hook=a=b"]).unwrap();
    assert_eq!(form.get("hook"), Some("a=b"));
}

#[test]
fn valid_form_passes() {
    let template = catalog::find("social-ad").unwrap();
    let errors = validate(template, &filled_social_ad());
    assert!(errors.is_empty(), "unexpected errors: {:?}", errors);
}

#[test]
fn missing_required_field_names_the_field() {
    let template = catalog::find("social-ad").unwrap();
    let mut form = filled_social_ad();
    form.set("hook", "");

    let errors = validate(template, &form);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "hook");
    assert!(errors[0].message.contains("required"));
}

#[test]
fn whitespace_only_value_fails_required() {
    let template = catalog::find("social-ad").unwrap();
    let mut form = filled_social_ad();
    form.set("hook", "   ");

    let errors = validate(template, &form);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "hook");
}

#[test]
fn length_boundary_passes_at_cap_fails_above() {
    let template = catalog::find("social-ad").unwrap();
    let cap = template.field("hook").unwrap().max_length;

    let mut form = filled_social_ad();
    form.set("hook", "x".repeat(cap));
    assert!(validate(template, &form).is_empty());

    form.set("hook", "x".repeat(cap + 1));
    let errors = validate(template, &form);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "hook");
    assert!(errors[0].message.contains("maximum length"));
}

#[test]
fn length_counts_characters_not_bytes() {
    let template = catalog::find("social-ad").unwrap();
    let cap = template.field("hook").unwrap().max_length;

    let mut form = filled_social_ad();
    // Multi-byte characters at exactly the cap must pass.
    form.set("hook", "é".repeat(cap));
    assert!(validate(template, &form).is_empty());
}

#[test]
fn select_rejects_unknown_option() {
    let template = catalog::find("social-ad").unwrap();
    let mut form = filled_social_ad();
    form.set("platform", "MySpace");

    let errors = validate(template, &form);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "platform");
    assert!(errors[0].message.contains("must be one of"));
}

#[test]
fn other_sentinel_requires_companion() {
    let template = catalog::find("social-ad").unwrap();
    let mut form = filled_social_ad();
    form.set("platform", "Other");

    let errors = validate(template, &form);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "platform_other");
    assert!(errors[0].message.contains("required"));
}

#[test]
fn other_with_companion_passes_and_resolves() {
    let template = catalog::find("social-ad").unwrap();
    let mut form = filled_social_ad();
    form.set("platform", "Other");
    form.set("platform_other", "TikTok");

    assert!(validate(template, &form).is_empty());

    let resolved = resolve(template, &form);
    assert_eq!(resolved.get("platform").map(|s| s.as_str()), Some("TikTok"));
}

#[test]
fn non_other_value_ignores_companion() {
    let template = catalog::find("social-ad").unwrap();
    let mut form = filled_social_ad();
    form.set("platform_other", "TikTok");

    assert!(validate(template, &form).is_empty());

    let resolved = resolve(template, &form);
    assert_eq!(resolved.get("platform").map(|s| s.as_str()), Some("Instagram"));
}

#[test]
fn unknown_field_is_reported() {
    let template = catalog::find("social-ad").unwrap();
    let mut form = filled_social_ad();
    form.set("budget", "1000");

    let errors = validate(template, &form);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "budget");
    assert!(errors[0].message.contains("unknown field"));
}

#[test]
fn optional_select_may_be_absent() {
    let template = catalog::find("email-promo").unwrap();
    let mut form = FormData::new();
    form.set("productName", "Acme");
    form.set("offerDetails", "20% off yearly plans");
    form.set("audience", "existing customers");
    form.set("callToAction", "Claim the offer");
    // urgency omitted

    assert!(validate(template, &form).is_empty());

    let resolved = resolve(template, &form);
    assert_eq!(resolved.get("urgency").map(|s| s.as_str()), Some(""));
}

#[test]
fn wizard_validates_step_one_first() {
    let template = catalog::find("brand-messaging").unwrap();
    // Nothing filled: only step 1 errors are reported.
    let errors = validate(template, &FormData::new());

    assert_eq!(errors.len(), 3);
    for error in &errors {
        assert_eq!(error.step.map(|(n, _)| n), Some(1));
    }
    let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["brandName", "industry", "primaryAudience"]);
}

#[test]
fn wizard_reports_step_two_after_step_one_passes() {
    let template = catalog::find("brand-messaging").unwrap();
    let mut form = FormData::new();
    form.set("brandName", "Acme");
    form.set("industry", "B2B SaaS");
    form.set("primaryAudience", "CTOs");

    let errors = validate(template, &form);
    assert!(!errors.is_empty());
    for error in &errors {
        assert_eq!(error.step.map(|(n, _)| n), Some(2));
    }
}

#[test]
fn wizard_companion_cap_is_100() {
    let template = catalog::find("brand-messaging").unwrap();
    let mut form = FormData::new();
    form.set("brandName", "Acme");
    form.set("industry", "B2B SaaS");
    form.set("primaryAudience", "CTOs");
    form.set("keyProblem", "slow deploys");
    form.set("differentiators", "fast rollback");
    form.set("tonePreference", "Other");
    form.set("tonePreference_other", "x".repeat(101));

    let errors = validate(template, &form);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].field, "tonePreference_other");
    assert!(errors[0].message.contains("100"));

    form.set("tonePreference_other", "x".repeat(100));
    assert!(validate(template, &form).is_empty());
}

#[test]
fn brand_messaging_happy_path_passes_both_steps() {
    let template = catalog::find("brand-messaging").unwrap();
    let mut form = FormData::new();
    form.set("brandName", "Acme");
    form.set("industry", "B2B SaaS");
    form.set("primaryAudience", "CTOs");
    form.set("keyProblem", "slow deploys");
    form.set("differentiators", "fast rollback");
    form.set("tonePreference", "Professional");

    assert!(validate_step(template, 0, &form).is_empty());
    assert!(validate_step(template, 1, &form).is_empty());
    assert!(validate(template, &form).is_empty());
}

#[test]
fn field_error_display_includes_step() {
    let error = FieldError {
        field: "tonePreference".to_string(),
        step: Some((2, "Positioning")),
        message: "Tone preference is required".to_string(),
    };
    assert_eq!(
        error.to_string(),
        "step 2 (Positioning): tonePreference: Tone preference is required"
    );

    let error = FieldError {
        field: "hook".to_string(),
        step: None,
        message: "exceeds maximum length of 120 characters".to_string(),
    };
    assert_eq!(error.to_string(), "hook: exceeds maximum length of 120 characters");
}

#[test]
fn into_validation_error_joins_messages() {
    let errors = vec![
        FieldError {
            field: "hook".to_string(),
            step: None,
            message: "Hook is required".to_string(),
        },
        FieldError {
            field: "platform".to_string(),
            step: None,
            message: "must be one of: Facebook, Instagram, LinkedIn, X, Other".to_string(),
        },
    ];
    let err = into_validation_error(&errors);
    let text = err.to_string();
    assert!(text.contains("hook: Hook is required"));
    assert!(text.contains("platform: must be one of"));
}
