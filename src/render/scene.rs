use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::error::{ChartError, ChartResult};
use crate::render::{Color, TextAnchor};

/// Identity of one scene node. Ids are never reused within a surface, so a
/// node created by an earlier render pass can't be mistaken for a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(u64);

impl NodeId {
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Geometry and paint of one scene node, in the coordinate space of its parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NodeKind {
    Group {
        translate_x: f64,
        translate_y: f64,
    },
    Path {
        data: String,
        stroke: Color,
        stroke_width: f64,
        fill: Option<Color>,
    },
    Line {
        x1: f64,
        y1: f64,
        x2: f64,
        y2: f64,
        stroke: Color,
        stroke_width: f64,
    },
    Text {
        text: String,
        x: f64,
        y: f64,
        font_size_px: f64,
        color: Color,
        anchor: TextAnchor,
        rotate_deg: f64,
    },
    Circle {
        cx: f64,
        cy: f64,
        radius: f64,
        fill: Color,
        stroke: Color,
        stroke_width: f64,
    },
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        fill: Option<Color>,
    },
}

impl NodeKind {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Group { .. } => "g",
            Self::Path { .. } => "path",
            Self::Line { .. } => "line",
            Self::Text { .. } => "text",
            Self::Circle { .. } => "circle",
            Self::Rect { .. } => "rect",
        }
    }

    fn validate(&self) -> ChartResult<()> {
        let (coordinates, widths): (SmallVec<[f64; 4]>, SmallVec<[f64; 4]>) = match self {
            Self::Group {
                translate_x,
                translate_y,
            } => (smallvec![*translate_x, *translate_y], smallvec![]),
            Self::Path {
                stroke,
                stroke_width,
                fill,
                ..
            } => {
                stroke.validate()?;
                if let Some(fill) = fill {
                    fill.validate()?;
                }
                (smallvec![], smallvec![*stroke_width])
            }
            Self::Line {
                x1,
                y1,
                x2,
                y2,
                stroke,
                stroke_width,
            } => {
                stroke.validate()?;
                (smallvec![*x1, *y1, *x2, *y2], smallvec![*stroke_width])
            }
            Self::Text {
                x,
                y,
                font_size_px,
                color,
                rotate_deg,
                ..
            } => {
                color.validate()?;
                if *font_size_px <= 0.0 {
                    return Err(ChartError::InvalidData(
                        "font size must be finite and > 0".to_owned(),
                    ));
                }
                (smallvec![*x, *y, *rotate_deg], smallvec![*font_size_px])
            }
            Self::Circle {
                cx,
                cy,
                radius,
                fill,
                stroke,
                stroke_width,
            } => {
                fill.validate()?;
                stroke.validate()?;
                (smallvec![*cx, *cy], smallvec![*radius, *stroke_width])
            }
            Self::Rect {
                x,
                y,
                width,
                height,
                fill,
            } => {
                if let Some(fill) = fill {
                    fill.validate()?;
                }
                (smallvec![*x, *y], smallvec![*width, *height])
            }
        };

        if coordinates.iter().any(|value| !value.is_finite()) {
            return Err(ChartError::InvalidData(format!(
                "{} coordinates must be finite",
                self.name()
            )));
        }
        if widths.iter().any(|value| !value.is_finite() || *value < 0.0) {
            return Err(ChartError::InvalidData(format!(
                "{} sizes must be finite and >= 0",
                self.name()
            )));
        }
        Ok(())
    }
}

/// One element of the retained scene tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub class: Option<String>,
    pub opacity: f64,
    pub pointer_events: bool,
    pub kind: NodeKind,
    pub children: Vec<Node>,
}

impl Node {
    #[must_use]
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    #[must_use]
    pub fn without_pointer_events(mut self) -> Self {
        self.pointer_events = false;
        self
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.class.as_deref() == Some(class)
    }

    #[must_use]
    pub fn shape(&self) -> NodeShape {
        NodeShape {
            kind: self.kind.name(),
            class: self.class.clone(),
            children: self.children.iter().map(Node::shape).collect(),
        }
    }

    fn find(&self, id: NodeId) -> Option<&Node> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    fn find_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if self.id == id {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    fn raise_child(&mut self, id: NodeId) -> bool {
        if let Some(position) = self.children.iter().position(|child| child.id == id) {
            let node = self.children.remove(position);
            self.children.push(node);
            return true;
        }
        self.children.iter_mut().any(|child| child.raise_child(id))
    }

    fn visit<'a>(&'a self, out: &mut Vec<&'a Node>) {
        out.push(self);
        for child in &self.children {
            child.visit(out);
        }
    }

    fn validate(&self) -> ChartResult<()> {
        if !(0.0..=1.0).contains(&self.opacity) {
            return Err(ChartError::InvalidData(
                "node opacity must be in [0, 1]".to_owned(),
            ));
        }
        self.kind.validate()?;
        self.children.iter().try_for_each(Node::validate)
    }
}

/// Structure of a node tree without ids or geometry, for comparing passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeShape {
    pub kind: &'static str,
    pub class: Option<String>,
    pub children: Vec<NodeShape>,
}

/// The drawing surface: a sized root holding the scene tree.
///
/// Only the render pipeline and the pointer handlers it installs write to a
/// surface; renderers read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
    pub class: Option<String>,
    pub children: Vec<Node>,
    next_id: u64,
}

impl Default for Surface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface {
    #[must_use]
    pub fn new() -> Self {
        Self {
            width: 0.0,
            height: 0.0,
            class: None,
            children: Vec::new(),
            next_id: 1,
        }
    }

    pub fn set_size(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    pub fn set_class(&mut self, class: impl Into<String>) {
        self.class = Some(class.into());
    }

    /// Removes every child. Calling it on an empty surface is a no-op.
    pub fn clear(&mut self) {
        self.children.clear();
    }

    /// Creates a detached node with a fresh id.
    pub fn create_node(&mut self, class: Option<&str>, kind: NodeKind) -> Node {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        Node {
            id,
            class: class.map(str::to_owned),
            opacity: 1.0,
            pointer_events: true,
            kind,
            children: Vec::new(),
        }
    }

    /// Appends `node` under `parent`, or at the root when `parent` is `None`.
    pub fn append(&mut self, parent: Option<NodeId>, node: Node) -> ChartResult<NodeId> {
        let id = node.id;
        match parent {
            None => self.children.push(node),
            Some(parent_id) => {
                let parent = self.find_mut(parent_id).ok_or_else(|| {
                    ChartError::InvalidData(format!("parent node {} not found", parent_id.get()))
                })?;
                parent.children.push(node);
            }
        }
        Ok(id)
    }

    #[must_use]
    pub fn find(&self, id: NodeId) -> Option<&Node> {
        self.children.iter().find_map(|child| child.find(id))
    }

    pub fn find_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    /// Moves a node to the end of its parent's children so it paints last.
    pub fn raise(&mut self, id: NodeId) -> bool {
        if let Some(position) = self.children.iter().position(|child| child.id == id) {
            let node = self.children.remove(position);
            self.children.push(node);
            return true;
        }
        self.children.iter_mut().any(|child| child.raise_child(id))
    }

    /// All nodes in document order.
    #[must_use]
    pub fn descendants(&self) -> Vec<&Node> {
        let mut out = Vec::new();
        for child in &self.children {
            child.visit(&mut out);
        }
        out
    }

    #[must_use]
    pub fn select_by_class(&self, class: &str) -> Vec<&Node> {
        self.descendants()
            .into_iter()
            .filter(|node| node.has_class(class))
            .collect()
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.descendants().len()
    }

    #[must_use]
    pub fn shape(&self) -> Vec<NodeShape> {
        self.children.iter().map(Node::shape).collect()
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.width.is_finite() || !self.height.is_finite() {
            return Err(ChartError::InvalidData(
                "surface size must be finite".to_owned(),
            ));
        }
        self.children.iter().try_for_each(Node::validate)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize surface json: {e}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(surface: &mut Surface, class: &str) -> Node {
        surface.create_node(
            Some(class),
            NodeKind::Group {
                translate_x: 0.0,
                translate_y: 0.0,
            },
        )
    }

    #[test]
    fn raise_moves_node_behind_its_siblings() {
        let mut surface = Surface::new();
        let root = group(&mut surface, "root");
        let root = surface.append(None, root).expect("append root");
        let first = group(&mut surface, "first");
        let first = surface.append(Some(root), first).expect("append first");
        let second = group(&mut surface, "second");
        surface.append(Some(root), second).expect("append second");

        assert!(surface.raise(first));
        let children = &surface.find(root).expect("root").children;
        assert!(children[1].has_class("first"));
    }

    #[test]
    fn ids_keep_increasing_after_clear() {
        let mut surface = Surface::new();
        let before = group(&mut surface, "a");
        surface.append(None, before.clone()).expect("append");
        surface.clear();
        let after = group(&mut surface, "a");
        assert!(after.id > before.id);
        assert!(surface.find(before.id).is_none());
    }

    #[test]
    fn append_to_missing_parent_fails() {
        let mut surface = Surface::new();
        let orphan = group(&mut surface, "orphan");
        let missing = NodeId(999);
        assert!(surface.append(Some(missing), orphan).is_err());
    }
}
