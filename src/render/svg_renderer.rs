use std::fmt::Write;

use indexmap::IndexMap;

use crate::error::ChartResult;
use crate::render::{Node, NodeKind, Renderer, Surface};

/// Serializes a surface into a standalone SVG document.
///
/// Attribute order follows insertion order so output is stable across runs and
/// diffable in snapshot tests.
#[derive(Debug, Default)]
pub struct SvgRenderer {
    document: String,
}

impl SvgRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Document produced by the most recent `render` call.
    #[must_use]
    pub fn document(&self) -> &str {
        &self.document
    }

    #[must_use]
    pub fn into_document(self) -> String {
        self.document
    }
}

impl Renderer for SvgRenderer {
    fn render(&mut self, surface: &Surface) -> ChartResult<()> {
        surface.validate()?;

        let mut root = IndexMap::new();
        root.insert("xmlns", "http://www.w3.org/2000/svg".to_owned());
        if let Some(class) = &surface.class {
            root.insert("class", class.clone());
        }
        root.insert("width", surface.width.to_string());
        root.insert("height", surface.height.to_string());

        let mut out = String::new();
        open_tag(&mut out, "svg", &root);
        out.push('>');
        for child in &surface.children {
            write_node(&mut out, child);
        }
        out.push_str("</svg>");

        self.document = out;
        Ok(())
    }
}

fn write_node(out: &mut String, node: &Node) {
    let mut attributes = IndexMap::new();
    if let Some(class) = &node.class {
        attributes.insert("class", class.clone());
    }

    let mut text = None;
    match &node.kind {
        NodeKind::Group {
            translate_x,
            translate_y,
        } => {
            attributes.insert(
                "transform",
                format!("translate({translate_x},{translate_y})"),
            );
        }
        NodeKind::Path {
            data,
            stroke,
            stroke_width,
            fill,
        } => {
            attributes.insert("d", data.clone());
            attributes.insert("fill", fill.map_or_else(|| "none".to_owned(), |c| c.to_css()));
            attributes.insert("stroke", stroke.to_css());
            attributes.insert("stroke-width", stroke_width.to_string());
        }
        NodeKind::Line {
            x1,
            y1,
            x2,
            y2,
            stroke,
            stroke_width,
        } => {
            attributes.insert("x1", x1.to_string());
            attributes.insert("y1", y1.to_string());
            attributes.insert("x2", x2.to_string());
            attributes.insert("y2", y2.to_string());
            attributes.insert("stroke", stroke.to_css());
            attributes.insert("stroke-width", stroke_width.to_string());
        }
        NodeKind::Text {
            text: content,
            x,
            y,
            font_size_px,
            color,
            anchor,
            rotate_deg,
        } => {
            attributes.insert("x", x.to_string());
            attributes.insert("y", y.to_string());
            attributes.insert("fill", color.to_css());
            attributes.insert("font-size", font_size_px.to_string());
            attributes.insert("text-anchor", anchor.as_svg().to_owned());
            if *rotate_deg != 0.0 {
                attributes.insert("transform", format!("rotate({rotate_deg})"));
            }
            text = Some(content.as_str());
        }
        NodeKind::Circle {
            cx,
            cy,
            radius,
            fill,
            stroke,
            stroke_width,
        } => {
            attributes.insert("cx", cx.to_string());
            attributes.insert("cy", cy.to_string());
            attributes.insert("r", radius.to_string());
            attributes.insert("fill", fill.to_css());
            attributes.insert("stroke", stroke.to_css());
            attributes.insert("stroke-width", stroke_width.to_string());
        }
        NodeKind::Rect {
            x,
            y,
            width,
            height,
            fill,
        } => {
            attributes.insert("x", x.to_string());
            attributes.insert("y", y.to_string());
            attributes.insert("width", width.to_string());
            attributes.insert("height", height.to_string());
            attributes.insert("fill", fill.map_or_else(|| "none".to_owned(), |c| c.to_css()));
        }
    }
    if node.opacity < 1.0 {
        attributes.insert("opacity", node.opacity.to_string());
    }
    if !node.pointer_events {
        attributes.insert("pointer-events", "none".to_owned());
    }

    let tag = node.kind.name();
    open_tag(out, tag, &attributes);
    if node.children.is_empty() && text.is_none() {
        out.push_str("/>");
        return;
    }
    out.push('>');
    if let Some(text) = text {
        out.push_str(&escape(text));
    }
    for child in &node.children {
        write_node(out, child);
    }
    let _ = write!(out, "</{tag}>");
}

fn open_tag(out: &mut String, tag: &str, attributes: &IndexMap<&'static str, String>) {
    let _ = write!(out, "<{tag}");
    for (name, value) in attributes {
        let _ = write!(out, " {name}=\"{}\"", escape(value));
    }
}

fn escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
