use crate::domain::entities::{BlockKind, Template, TemplateBlock};
use serde_json::Value;

/// Render a stored template into a standalone HTML email document.
/// Placeholder tokens inside block content pass through untouched; tokens in
/// the template name are dropped from the title so recipient substitution
/// always lands in the body.
pub fn render_template_html(template: &Template) -> String {
    let body: String = template.blocks.iter().map(render_block).collect();
    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n\
         <body style=\"margin:0;padding:0;font-family:Arial,sans-serif;\">\n\
         <div style=\"max-width:600px;margin:0 auto;\">\n{}</div>\n</body>\n</html>\n",
        escape_html(&strip_tokens(&template.name)),
        body
    )
}

pub fn render_block(block: &TemplateBlock) -> String {
    let content = &block.content;
    let style = inline_style(&block.styles);

    match block.kind {
        BlockKind::Heading => {
            let level = content
                .get("level")
                .and_then(Value::as_u64)
                .filter(|l| (1..=6).contains(l))
                .unwrap_or(1);
            format!(
                "<h{level}{style}>{}</h{level}>\n",
                escape_html(text_field(content, "text"))
            )
        }
        BlockKind::Text => format!("<p{style}>{}</p>\n", escape_html(text_field(content, "text"))),
        BlockKind::Image => {
            let img = format!(
                "<img src=\"{}\" alt=\"{}\"{style} />",
                escape_html(text_field(content, "src")),
                escape_html(text_field(content, "alt"))
            );
            match content.get("href").and_then(Value::as_str) {
                Some(href) => format!("<a href=\"{}\">{}</a>\n", escape_html(href), img),
                None => format!("{}\n", img),
            }
        }
        BlockKind::Button => format!(
            "<a href=\"{}\"{style}>{}</a>\n",
            escape_html(text_field(content, "url")),
            escape_html(text_field(content, "text"))
        ),
        BlockKind::Divider => format!("<hr{style} />\n"),
        BlockKind::Spacer => {
            let height = content.get("height").and_then(Value::as_u64).unwrap_or(20);
            format!("<div style=\"height:{}px;\"></div>\n", height)
        }
        BlockKind::Social => {
            let links: String = content
                .get("links")
                .and_then(Value::as_array)
                .map(|links| {
                    links
                        .iter()
                        .map(|link| {
                            format!(
                                "<a href=\"{}\">{}</a>",
                                escape_html(text_field(link, "url")),
                                escape_html(text_field(link, "platform"))
                            )
                        })
                        .collect::<Vec<_>>()
                        .join(" ")
                })
                .unwrap_or_default();
            format!("<div{style}>{}</div>\n", links)
        }
        BlockKind::Columns => {
            let columns: String = content
                .get("columns")
                .and_then(Value::as_array)
                .map(|cols| {
                    cols.iter()
                        .map(|col| {
                            format!(
                                "<td valign=\"top\">{}</td>",
                                escape_html(col.as_str().unwrap_or_else(|| text_field(col, "text")))
                            )
                        })
                        .collect()
                })
                .unwrap_or_default();
            format!(
                "<table width=\"100%\"{style}><tr>{}</tr></table>\n",
                columns
            )
        }
        // Raw markup is trusted as authored
        BlockKind::Html => format!("{}\n", text_field(content, "html")),
        BlockKind::Video => {
            let url = escape_html(text_field(content, "url"));
            match content.get("thumbnail").and_then(Value::as_str) {
                Some(thumb) => format!(
                    "<a href=\"{}\"{style}><img src=\"{}\" alt=\"Video\" /></a>\n",
                    url,
                    escape_html(thumb)
                ),
                None => format!("<a href=\"{}\"{style}>Watch video</a>\n", url),
            }
        }
    }
}

fn text_field<'a>(content: &'a Value, key: &str) -> &'a str {
    content.get(key).and_then(Value::as_str).unwrap_or("")
}

/// `{"color": "#333", "fontSize": 14}` -> ` style="color:#333;font-size:14px;"`
fn inline_style(styles: &Value) -> String {
    let Some(map) = styles.as_object() else {
        return String::new();
    };

    let declarations: String = map
        .iter()
        .filter_map(|(key, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                Value::Number(n) => format!("{}px", n),
                _ => return None,
            };
            Some(format!("{}:{};", kebab_case(key), escape_html(&value)))
        })
        .collect();

    if declarations.is_empty() {
        String::new()
    } else {
        format!(" style=\"{}\"", declarations)
    }
}

fn kebab_case(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

/// Remove `{{...}}` placeholders, collapsing the whitespace they leave
fn strip_tokens(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find("{{") {
        match rest[start..].find("}}") {
            Some(len) => {
                out.push_str(&rest[..start]);
                rest = &rest[start + len + 2..];
            }
            None => break,
        }
    }
    out.push_str(rest);
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
