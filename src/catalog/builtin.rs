//! The built-in template catalog.
//!
//! Templates are build-time constants. Prompts insert form values verbatim;
//! the two block placeholders render brand voice / persona directives when
//! attached and an empty string otherwise.

use super::types::{
    Complexity, Field, FieldKind, Renderer, Template, TemplateCategory, WizardStep,
};

const TONE_OPTIONS: &[&str] = &["Professional", "Friendly", "Playful", "Luxury", "Other"];
const SHIFT_TONE_OPTIONS: &[&str] = &[
    "Professional",
    "Conversational",
    "Bold",
    "Empathetic",
    "Other",
];
const PLATFORM_OPTIONS: &[&str] = &["Facebook", "Instagram", "LinkedIn", "X", "Other"];
const URGENCY_OPTIONS: &[&str] = &["None", "Limited time", "Last chance"];
const CHANNEL_OPTIONS: &[&str] = &["Website", "Email", "Social", "Print"];
const MESSAGING_TONE_OPTIONS: &[&str] = &["Professional", "Conversational", "Bold", "Other"];

/// All built-in templates, in display order.
pub const TEMPLATES: &[Template] = &[
    Template {
        id: "product-description",
        name: "Product Description",
        category: TemplateCategory::Website,
        complexity: Complexity::Basic,
        estimated_minutes: 5,
        fields: &[
            Field {
                id: "productName",
                label: "Product name",
                kind: FieldKind::Text,
                required: true,
                max_length: 100,
            },
            Field {
                id: "productCategory",
                label: "Product category",
                kind: FieldKind::Text,
                required: true,
                max_length: 80,
            },
            Field {
                id: "keyFeatures",
                label: "Key features",
                kind: FieldKind::Textarea,
                required: true,
                max_length: 500,
            },
            Field {
                id: "targetAudience",
                label: "Target audience",
                kind: FieldKind::Text,
                required: true,
                max_length: 150,
            },
            Field {
                id: "tone",
                label: "Tone",
                kind: FieldKind::Select {
                    options: TONE_OPTIONS,
                    allows_other: true,
                },
                required: true,
                max_length: 40,
            },
        ],
        prompt: "Write a compelling product description in HTML for {productName}, \
a {productCategory}.\n\nKey features:\n{keyFeatures}\n\nTarget audience: \
{targetAudience}\nTone: {tone}\n\nStructure the copy with a short headline, \
two paragraphs, and a bulleted feature list.\n{brandVoiceInstructions}\
{personaInstructions}",
        renderer: Renderer::Standard,
    },
    Template {
        id: "landing-hero",
        name: "Landing Page Hero",
        category: TemplateCategory::Website,
        complexity: Complexity::Basic,
        estimated_minutes: 5,
        fields: &[
            Field {
                id: "productName",
                label: "Product name",
                kind: FieldKind::Text,
                required: true,
                max_length: 100,
            },
            Field {
                id: "valueProposition",
                label: "Value proposition",
                kind: FieldKind::Textarea,
                required: true,
                max_length: 300,
            },
            Field {
                id: "primaryAudience",
                label: "Primary audience",
                kind: FieldKind::Text,
                required: true,
                max_length: 150,
            },
            Field {
                id: "callToAction",
                label: "Call to action",
                kind: FieldKind::Text,
                required: true,
                max_length: 60,
            },
        ],
        prompt: "Write landing page hero copy in HTML for {productName}.\n\n\
Value proposition: {valueProposition}\nPrimary audience: {primaryAudience}\n\
Call to action: {callToAction}\n\nReturn a headline, a one-sentence \
subheadline, and a call-to-action button label.\n{brandVoiceInstructions}\
{personaInstructions}",
        renderer: Renderer::Standard,
    },
    Template {
        id: "email-promo",
        name: "Promotional Email",
        category: TemplateCategory::Email,
        complexity: Complexity::Intermediate,
        estimated_minutes: 10,
        fields: &[
            Field {
                id: "productName",
                label: "Product name",
                kind: FieldKind::Text,
                required: true,
                max_length: 100,
            },
            Field {
                id: "offerDetails",
                label: "Offer details",
                kind: FieldKind::Textarea,
                required: true,
                max_length: 400,
            },
            Field {
                id: "audience",
                label: "Audience",
                kind: FieldKind::Text,
                required: true,
                max_length: 150,
            },
            Field {
                id: "urgency",
                label: "Urgency",
                kind: FieldKind::Select {
                    options: URGENCY_OPTIONS,
                    allows_other: false,
                },
                required: false,
                max_length: 40,
            },
            Field {
                id: "callToAction",
                label: "Call to action",
                kind: FieldKind::Text,
                required: true,
                max_length: 60,
            },
        ],
        prompt: "Write a promotional email in HTML for {productName}.\n\n\
Offer: {offerDetails}\nAudience: {audience}\nUrgency level: {urgency}\n\
Call to action: {callToAction}\n\nInclude a subject line, a preview line, \
body paragraphs, and a closing call to action.\n{brandVoiceInstructions}\
{personaInstructions}",
        renderer: Renderer::Standard,
    },
    Template {
        id: "social-ad",
        name: "Social Media Ad",
        category: TemplateCategory::Social,
        complexity: Complexity::Basic,
        estimated_minutes: 5,
        fields: &[
            Field {
                id: "platform",
                label: "Platform",
                kind: FieldKind::Select {
                    options: PLATFORM_OPTIONS,
                    allows_other: true,
                },
                required: true,
                max_length: 40,
            },
            Field {
                id: "productName",
                label: "Product name",
                kind: FieldKind::Text,
                required: true,
                max_length: 100,
            },
            Field {
                id: "hook",
                label: "Hook",
                kind: FieldKind::Text,
                required: true,
                max_length: 120,
            },
            Field {
                id: "callToAction",
                label: "Call to action",
                kind: FieldKind::Text,
                required: true,
                max_length: 60,
            },
        ],
        prompt: "Write a short social media ad in HTML for {productName}, \
to run on {platform}.\n\nHook: {hook}\nCall to action: {callToAction}\n\n\
Keep it under 60 words and match the platform's conventions.\n\
{brandVoiceInstructions}{personaInstructions}",
        renderer: Renderer::Standard,
    },
    Template {
        id: "tone-shift",
        name: "Tone Shift",
        category: TemplateCategory::Rewrite,
        complexity: Complexity::Basic,
        estimated_minutes: 5,
        fields: &[
            Field {
                id: "originalCopy",
                label: "Original copy",
                kind: FieldKind::Textarea,
                required: true,
                max_length: 2000,
            },
            Field {
                id: "targetTone",
                label: "Target tone",
                kind: FieldKind::Select {
                    options: SHIFT_TONE_OPTIONS,
                    allows_other: true,
                },
                required: true,
                max_length: 40,
            },
        ],
        prompt: "Rewrite the following copy in a {targetTone} tone, returning \
HTML. Preserve the meaning, structure, and any factual claims.\n\n\
Original copy:\n{originalCopy}\n{brandVoiceInstructions}{personaInstructions}",
        renderer: Renderer::Standard,
    },
    Template {
        id: "channel-rewrite",
        name: "Channel Rewrite",
        category: TemplateCategory::Rewrite,
        complexity: Complexity::Intermediate,
        estimated_minutes: 10,
        fields: &[
            Field {
                id: "originalCopy",
                label: "Original copy",
                kind: FieldKind::Textarea,
                required: true,
                max_length: 2000,
            },
            Field {
                id: "sourceChannel",
                label: "Source channel",
                kind: FieldKind::Select {
                    options: CHANNEL_OPTIONS,
                    allows_other: false,
                },
                required: true,
                max_length: 40,
            },
            Field {
                id: "targetChannel",
                label: "Target channel",
                kind: FieldKind::Select {
                    options: CHANNEL_OPTIONS,
                    allows_other: false,
                },
                required: true,
                max_length: 40,
            },
        ],
        prompt: "Adapt the following {sourceChannel} copy for {targetChannel}, \
returning HTML. Adjust length, formality, and formatting to the target \
channel's conventions while keeping the core message.\n\n\
Original copy:\n{originalCopy}\n{brandVoiceInstructions}{personaInstructions}",
        renderer: Renderer::Standard,
    },
    Template {
        id: "brand-messaging",
        name: "Brand Messaging Framework",
        category: TemplateCategory::Strategic,
        complexity: Complexity::Advanced,
        estimated_minutes: 20,
        fields: &[
            Field {
                id: "brandName",
                label: "Brand name",
                kind: FieldKind::Text,
                required: true,
                max_length: 100,
            },
            Field {
                id: "industry",
                label: "Industry",
                kind: FieldKind::Text,
                required: true,
                max_length: 100,
            },
            Field {
                id: "primaryAudience",
                label: "Primary audience",
                kind: FieldKind::Text,
                required: true,
                max_length: 150,
            },
            Field {
                id: "keyProblem",
                label: "Key problem you solve",
                kind: FieldKind::Textarea,
                required: true,
                max_length: 300,
            },
            Field {
                id: "differentiators",
                label: "Differentiators",
                kind: FieldKind::Textarea,
                required: true,
                max_length: 400,
            },
            Field {
                id: "tonePreference",
                label: "Tone preference",
                kind: FieldKind::Select {
                    options: MESSAGING_TONE_OPTIONS,
                    allows_other: true,
                },
                required: true,
                max_length: 40,
            },
        ],
        prompt: "Develop a brand messaging framework in HTML for {brandName}, \
operating in {industry}.\n\nPrimary audience: {primaryAudience}\n\
Key problem solved: {keyProblem}\nDifferentiators: {differentiators}\n\
Tone preference: {tonePreference}\n\nProduce: a positioning statement, a \
value proposition, three key messages, and an elevator pitch.\n\
{brandVoiceInstructions}{personaInstructions}",
        renderer: Renderer::Wizard {
            steps: &[
                WizardStep {
                    title: "Company profile",
                    field_ids: &["brandName", "industry", "primaryAudience"],
                },
                WizardStep {
                    title: "Positioning",
                    field_ids: &["keyProblem", "differentiators", "tonePreference"],
                },
            ],
        },
    },
];
