//! # Answer Markup Flattening
//!
//! File: cli/src/common/ui/markup.rs
//!
//! ## Overview
//!
//! Catalog answers may carry a little inline HTML, almost always a link:
//!
//! ```text
//! contact us at <a href="mailto:hi@example.com">hi@example.com</a>
//! explore our <a href="services.html">Services</a> page
//! ```
//!
//! A terminal cannot follow links, so `to_plain_text` rewrites them as
//! `hi@example.com` and `Services (services.html)`. A link whose label already
//! shows its target is printed once. Other elements keep only their text,
//! `script`/`style` subtrees are dropped, and entities are decoded by the
//! HTML parser.
//!
//! Only bot answers are markup. User lines are printed verbatim and never go
//! through this module.
//!
use scraper::{ElementRef, Html, Node};

/// Elements whose whole subtree is dropped.
const SKIP_TAGS: [&str; 2] = ["script", "style"];

/// # Flatten Answer Markup (`to_plain_text`)
///
/// Parses `markup` as an HTML fragment and renders it as plain text.
///
/// ## Arguments
///
/// * `markup`: A bot answer, possibly containing inline HTML.
///
/// ## Returns
///
/// * `String`: The text content, with links written as `label (target)`
///   (or just the target when the label repeats it). Whitespace inside text
///   nodes is preserved as written.
pub fn to_plain_text(markup: &str) -> String {
    let fragment = Html::parse_fragment(markup);
    let mut out = String::with_capacity(markup.len());
    collect_text(fragment.root_element(), &mut out);
    out
}

/// Appends the text of every child of `element` to `out`, expanding links.
fn collect_text(element: ElementRef, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(_) => {
                let Some(child_el) = ElementRef::wrap(child) else {
                    continue;
                };
                let name = child_el.value().name();
                if SKIP_TAGS.contains(&name) {
                    continue;
                }
                match child_el.value().attr("href").filter(|_| name == "a") {
                    Some(href) => {
                        let mut label = String::new();
                        collect_text(child_el, &mut label);
                        out.push_str(&describe_link(&label, href));
                    }
                    None => collect_text(child_el, out),
                }
            }
            _ => {}
        }
    }
}

/// `label (target)`, or the bare target when the label adds nothing.
fn describe_link(label: &str, href: &str) -> String {
    let target = href.strip_prefix("mailto:").unwrap_or(href);
    let label = label.trim();
    if label.is_empty() || label == target {
        target.to_string()
    } else {
        format!("{} ({})", label, target)
    }
}
