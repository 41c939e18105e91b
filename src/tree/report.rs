// subcheck: Submodule Merge Consistency Checker
//
// SPDX-FileCopyrightText: 2026 subcheck contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Tree report rendering.
//!
//! ```text
//! render_tree(root, indent_unit)
//!   pre-order, parent before children, lister order, no sorting
//!   one line per node:  {indent}{name}: {commit}
//!   failing node:      + " *** FAILURE *** in line above: <reasons>"
//! ```

use super::TreeNode;

/// Renders the completed tree as the report printed to stdout.
#[must_use]
pub fn render_tree(root: &TreeNode, indent_unit: usize) -> String {
    let mut out = String::new();
    render_node(root, 0, indent_unit, &mut out);
    out
}

fn render_node(node: &TreeNode, depth: usize, indent_unit: usize, out: &mut String) {
    for _ in 0..depth * indent_unit {
        out.push(' ');
    }
    out.push_str(&node.name);
    out.push_str(": ");
    out.push_str(&node.commit);
    out.push('\n');

    if let Some(line) = annotation(node) {
        out.push_str(&line);
        out.push('\n');
    }

    for child in &node.children {
        render_node(child, depth + 1, indent_unit, out);
    }
}

/// Failure annotation for a node, naming every reason that applies.
pub(crate) fn annotation(node: &TreeNode) -> Option<String> {
    let mut reasons = Vec::new();
    if node.divergent {
        reasons.push("submodule mismatch".to_string());
    }
    if let Some(count) = node.ahead_of_trunk
        && count > 0
    {
        reasons.push(format!("ahead of master by {count}"));
    }
    if reasons.is_empty() {
        None
    } else {
        Some(format!(
            " *** FAILURE *** in line above: {}",
            reasons.join("; ")
        ))
    }
}
