use listqapp::facets::FacetSet;
use listqapp::model::{FieldValue, Record};
use listqapp::paginate::ResultPage;
use listqapp::schema::{FieldKind, Schema};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::styles::{COUNT, FIELD, HEADER, ID, TAG, TITLE, WILDCARD};

const TITLE_WIDTH: usize = 48;
const TITLE_FIELD: &str = "title";

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{} {}", n, word)
    } else {
        format!("{} {}es", n, word)
    }
}

pub(super) fn render_page(page: &ResultPage, schema: &Schema) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {}\n",
        HEADER.apply_to(format!("Page {} of {}", page.page, page.total_pages)),
        COUNT.apply_to(format!("({})", plural(page.match_count, "match")))
    ));

    if page.items.is_empty() {
        out.push_str("No records found.\n");
        return out;
    }

    let id_width = page
        .items
        .iter()
        .map(|r| r.id.as_str().width())
        .max()
        .unwrap_or(0);
    for record in &page.items {
        out.push_str(&render_record(record, schema, id_width));
        out.push('\n');
    }
    out
}

fn render_record(record: &Record, schema: &Schema, id_width: usize) -> String {
    let id = record.id.as_str();
    let pad = " ".repeat(id_width.saturating_sub(id.width()));
    let title = record.text(TITLE_FIELD).unwrap_or("(untitled)");
    let title = truncate_to_width(title, TITLE_WIDTH);
    let title_pad = " ".repeat(TITLE_WIDTH.saturating_sub(title.width()));

    let mut line = format!(
        "  {}{}  {}{}",
        ID.apply_to(id),
        pad,
        TITLE.apply_to(&title),
        title_pad
    );

    for spec in schema.filterable() {
        let Some(value) = record.field(&spec.name) else {
            continue;
        };
        match (spec.kind, value) {
            (FieldKind::MultiSelect, _) | (_, FieldValue::List(_)) => {
                for item in value.iter() {
                    line.push_str(&format!(" {}", TAG.apply_to(format!("#{}", item))));
                }
            }
            (_, FieldValue::Text(text)) => {
                line.push_str(&format!(" {}", FIELD.apply_to(format!("[{}]", text))));
            }
        }
    }
    line.trim_end().to_string()
}

pub(super) fn render_facets(facets: &FacetSet) -> String {
    let mut out = String::new();
    for (name, facet) in facets.iter() {
        out.push_str(&format!("{}\n", HEADER.apply_to(name)));
        if facet.is_empty() {
            out.push_str("  (none)\n");
            continue;
        }
        for entry in &facet.entries {
            let value = if entry.wildcard {
                WILDCARD.apply_to(&entry.value).to_string()
            } else {
                entry.value.clone()
            };
            out.push_str(&format!(
                "  {} {}\n",
                value,
                COUNT.apply_to(format!("({})", entry.count))
            ));
        }
    }
    out
}

/// Truncate to `max_width` display columns, ending in an ellipsis when cut.
fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
