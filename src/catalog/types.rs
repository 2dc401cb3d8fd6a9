//! Type definitions for the template catalog.

/// Sentinel option value that routes a select field to its free-text
/// companion (`<fieldId>_other`).
pub const OTHER_SENTINEL: &str = "Other";

/// Companion free-text cap for wizard (strategic) templates.
pub const WIZARD_OTHER_MAX_LENGTH: usize = 100;

/// Kind of a form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text input.
    Text,
    /// Multi-line text input.
    Textarea,
    /// Fixed option list. When `allows_other` is set, the option list ends
    /// with the `Other` sentinel and a companion free-text value is expected.
    Select {
        options: &'static [&'static str],
        allows_other: bool,
    },
}

/// A single form field of a template.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    /// Field identifier, matching the `{fieldId}` placeholder in the prompt.
    pub id: &'static str,

    /// Human-readable label.
    pub label: &'static str,

    /// Field kind.
    pub kind: FieldKind,

    /// Whether a non-empty value is required.
    pub required: bool,

    /// Maximum value length in characters.
    pub max_length: usize,
}

impl Field {
    /// The id of the companion free-text field for Other-bearing selects.
    pub fn companion_id(&self) -> String {
        format!("{}_other", self.id)
    }

    /// Whether this field is a select that accepts the Other sentinel.
    pub fn allows_other(&self) -> bool {
        matches!(
            self.kind,
            FieldKind::Select {
                allows_other: true,
                ..
            }
        )
    }

    /// The options of a select field, empty for text kinds.
    pub fn options(&self) -> &'static [&'static str] {
        match self.kind {
            FieldKind::Select { options, .. } => options,
            _ => &[],
        }
    }
}

/// Template category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateCategory {
    Website,
    Email,
    Social,
    Strategic,
    Rewrite,
}

impl TemplateCategory {
    /// All categories in display order.
    pub fn all() -> &'static [TemplateCategory] {
        &[
            TemplateCategory::Website,
            TemplateCategory::Email,
            TemplateCategory::Social,
            TemplateCategory::Strategic,
            TemplateCategory::Rewrite,
        ]
    }

    /// Display label. The match is exhaustive, so adding a category without
    /// a label is a compile error.
    pub fn label(&self) -> &'static str {
        match self {
            TemplateCategory::Website => "Website",
            TemplateCategory::Email => "Email",
            TemplateCategory::Social => "Social",
            TemplateCategory::Strategic => "Strategic",
            TemplateCategory::Rewrite => "Rewrite",
        }
    }

    /// Display glyph for list output.
    pub fn glyph(&self) -> &'static str {
        match self {
            TemplateCategory::Website => "◆",
            TemplateCategory::Email => "✉",
            TemplateCategory::Social => "#",
            TemplateCategory::Strategic => "★",
            TemplateCategory::Rewrite => "↻",
        }
    }

    /// Parse a category from a CLI argument (case-insensitive).
    pub fn parse(s: &str) -> Option<TemplateCategory> {
        TemplateCategory::all()
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(s))
    }
}

impl std::fmt::Display for TemplateCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Complexity tier of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Complexity {
    Basic,
    Intermediate,
    Advanced,
}

impl Complexity {
    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            Complexity::Basic => "basic",
            Complexity::Intermediate => "intermediate",
            Complexity::Advanced => "advanced",
        }
    }
}

/// One step of a wizard template.
#[derive(Debug, Clone, Copy)]
pub struct WizardStep {
    /// Step title shown to the user.
    pub title: &'static str,

    /// Field ids belonging to this step, in order.
    pub field_ids: &'static [&'static str],
}

/// How a template's form is rendered and validated.
#[derive(Debug, Clone, Copy)]
pub enum Renderer {
    /// One flat form, validated in a single pass.
    Standard,
    /// Multi-step wizard; each step validates eagerly before the next.
    Wizard { steps: &'static [WizardStep] },
}

/// A copy template: form fields plus a prompt with `{fieldId}` placeholders.
#[derive(Debug, Clone, Copy)]
pub struct Template {
    /// Stable template id used on the command line and in the API payload.
    pub id: &'static str,

    /// Display name.
    pub name: &'static str,

    /// Category for listing and filtering.
    pub category: TemplateCategory,

    /// Complexity tier.
    pub complexity: Complexity,

    /// Rough time estimate in minutes.
    pub estimated_minutes: u32,

    /// Ordered form fields.
    pub fields: &'static [Field],

    /// Prompt string with `{fieldId}` placeholders plus the two block
    /// placeholders `{brandVoiceInstructions}` and `{personaInstructions}`.
    pub prompt: &'static str,

    /// Renderer tag, resolved at catalog definition time.
    pub renderer: Renderer,
}

impl Template {
    /// Look up a field by id.
    pub fn field(&self, id: &str) -> Option<&'static Field> {
        self.fields.iter().find(|f| f.id == id)
    }

    /// Whether this template renders as a multi-step wizard.
    pub fn is_wizard(&self) -> bool {
        matches!(self.renderer, Renderer::Wizard { .. })
    }

    /// The wizard steps, if any.
    pub fn steps(&self) -> Option<&'static [WizardStep]> {
        match self.renderer {
            Renderer::Wizard { steps } => Some(steps),
            Renderer::Standard => None,
        }
    }

    /// The companion length cap for Other values on this template.
    pub fn other_max_length(&self, field: &Field) -> usize {
        if self.is_wizard() {
            WIZARD_OTHER_MAX_LENGTH
        } else {
            field.max_length
        }
    }
}
