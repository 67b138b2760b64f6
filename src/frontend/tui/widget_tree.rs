//! Widget tree rendering for the terminal frontend
//!
//! Produces one line per widget, indented by depth, marking hidden widgets and
//! the render surface that is never touched.

use crate::core::host::WidgetTree;
use crate::data::{ContentType, WidgetHandle};
use crate::host::arena::WidgetArena;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

const SHOWN_MARKER: &str = "●";
const HIDDEN_MARKER: &str = "○";
const SURFACE_MARKER: &str = "◆";

/// Flatten the arena into display lines, depth-first from each root.
///
/// Widgets tagged `excluded` get the surface marker, since hiding never
/// touches them.
pub fn tree_lines(tree: &WidgetArena, excluded: ContentType) -> Vec<Line<'static>> {
    if tree.is_empty() {
        return vec![Line::styled("(no widgets)", Style::default().fg(Color::DarkGray))];
    }

    let mut lines = Vec::with_capacity(tree.len());
    let mut stack: Vec<(WidgetHandle, usize)> =
        tree.roots().iter().rev().map(|root| (*root, 0)).collect();

    while let Some((widget, depth)) = stack.pop() {
        let Some(node) = tree.node(widget) else {
            continue;
        };

        let (marker, style) = if node.content_type == excluded {
            (SURFACE_MARKER, Style::default().fg(Color::Cyan))
        } else if node.hidden {
            (
                HIDDEN_MARKER,
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::CROSSED_OUT),
            )
        } else {
            (SHOWN_MARKER, Style::default().fg(Color::Green))
        };

        let mut spans = vec![
            Span::raw("  ".repeat(depth)),
            Span::styled(format!("{} ", marker), style),
            Span::styled(node.name.clone(), style),
        ];
        if let Some(id) = node.id {
            spans.push(Span::styled(
                format!(" [{}]", id),
                Style::default().fg(Color::DarkGray),
            ));
        }
        lines.push(Line::from(spans));

        for child in tree.children(widget).into_iter().rev() {
            stack.push((child, depth + 1));
        }
    }

    lines
}
