//! Terminal adapter: draws a [`FormState`] as a boxed form.

use crate::cascade::{FormState, SelectField};

const WIDTH: usize = 62;

/// Render the three fields, one block per field, with the selected option
/// marked `●` and disabled fields tagged.
pub fn render_form(form: &FormState) -> String {
    let mut out = String::new();
    out.push_str(&format!("  ╔{}╗\n", "═".repeat(WIDTH)));
    render_field(&mut out, "City", &form.region);
    out.push_str(&format!("  ╠{}╣\n", "═".repeat(WIDTH)));
    render_field(&mut out, "District", &form.sub_region);
    out.push_str(&format!("  ╠{}╣\n", "═".repeat(WIDTH)));
    render_field(&mut out, "Neighborhood", &form.sub_sub_region);
    out.push_str(&format!("  ╚{}╝\n", "═".repeat(WIDTH)));
    out
}

fn render_field(out: &mut String, title: &str, field: &SelectField) {
    let status = if field.disabled { " [disabled]" } else { "" };
    push_line(out, &format!(" {}{}", title, status));

    let selected = field.value();
    for option in &field.options {
        let marker = match selected {
            Some(v) if !option.placeholder && option.value == v => '●',
            None if option.placeholder => '●',
            _ => '○',
        };
        let text = if option.placeholder || option.value == option.label {
            option.label.clone()
        } else {
            format!("{} ({})", option.label, option.value)
        };
        push_line(out, &format!("   {} {}", marker, text));
    }
}

fn push_line(out: &mut String, content: &str) {
    let len = content.chars().count();
    let pad = WIDTH.saturating_sub(len);
    out.push_str("  ║");
    out.push_str(content);
    out.push_str(&" ".repeat(pad));
    out.push_str("║\n");
}
