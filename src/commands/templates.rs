//! Implementation of the `copydesk templates` commands.

use crate::catalog::{self, FieldKind, Renderer, TemplateCategory};
use crate::cli::{TemplatesListArgs, TemplatesShowArgs};
use crate::error::{CopydeskError, Result};

/// Execute the `copydesk templates list` command.
pub fn cmd_list(args: TemplatesListArgs) -> Result<()> {
    let category = match args.category.as_deref() {
        Some(raw) => Some(TemplateCategory::parse(raw).ok_or_else(|| {
            let labels: Vec<&str> = TemplateCategory::all().iter().map(|c| c.label()).collect();
            CopydeskError::UserError(format!(
                "unknown category '{}'. Available categories: {}",
                raw,
                labels.join(", ")
            ))
        })?),
        None => None,
    };

    let templates: Vec<_> = match category {
        Some(category) => catalog::by_category(category),
        None => catalog::all().iter().collect(),
    };

    if templates.is_empty() {
        println!("No templates in this category.");
        return Ok(());
    }

    for template in templates {
        let wizard = if template.is_wizard() { "  [wizard]" } else { "" };
        println!(
            "{} {:<20} {:<28} {:<10} {:>2} min  {}{}",
            template.category.glyph(),
            template.id,
            template.name,
            template.complexity.label(),
            template.estimated_minutes,
            template.category.label(),
            wizard,
        );
    }

    Ok(())
}

/// Execute the `copydesk templates show` command.
pub fn cmd_show(args: TemplatesShowArgs) -> Result<()> {
    let template = catalog::find(&args.template_id)?;

    println!("{} ({})", template.name, template.id);
    println!(
        "category: {}   complexity: {}   estimated: {} min",
        template.category.label(),
        template.complexity.label(),
        template.estimated_minutes
    );
    println!();

    match template.renderer {
        Renderer::Standard => {
            println!("Fields:");
            for field in template.fields {
                print_field(template, field);
            }
        }
        Renderer::Wizard { steps } => {
            for (index, step) in steps.iter().enumerate() {
                println!("Step {}: {}", index + 1, step.title);
                for id in step.field_ids {
                    if let Some(field) = template.field(id) {
                        print_field(template, field);
                    }
                }
                println!();
            }
        }
    }

    Ok(())
}

fn print_field(template: &catalog::Template, field: &catalog::Field) {
    let required = if field.required { "required" } else { "optional" };
    match field.kind {
        FieldKind::Text | FieldKind::Textarea => {
            println!(
                "  {:<22} {} (max {} chars)",
                field.id, required, field.max_length
            );
        }
        FieldKind::Select { options, .. } => {
            println!(
                "  {:<22} {} (one of: {})",
                field.id,
                required,
                options.join(", ")
            );
            if field.allows_other() {
                println!(
                    "  {:<22} free text when {} = Other (max {} chars)",
                    field.companion_id(),
                    field.id,
                    template.other_max_length(field)
                );
            }
        }
    }
}
