//! Plain text rendering of outlines.

use crate::model::DocumentOutline;

/// Render an outline as an indented tree, one heading per line.
///
/// ```text
/// Annual Report
///   Summary (p. 1)
///     Revenue (p. 2)
/// ```
pub fn to_text(outline: &DocumentOutline) -> String {
    let mut output = String::new();
    output.push_str(&outline.title);
    output.push('\n');

    for node in &outline.outline {
        let indent = "  ".repeat(node.level.depth() as usize);
        output.push_str(&format!("{}{} (p. {})\n", indent, node.text, node.page_number));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingLevel, OutlineNode};

    #[test]
    fn test_to_text() {
        let mut outline = DocumentOutline::new("Annual Report");
        outline.add_node(OutlineNode::new(HeadingLevel::H1, "Summary", 1));
        outline.add_node(OutlineNode::new(HeadingLevel::H3, "Detail", 2));

        assert_eq!(
            to_text(&outline),
            "Annual Report\n  Summary (p. 1)\n      Detail (p. 2)\n"
        );
    }

    #[test]
    fn test_title_only() {
        assert_eq!(to_text(&DocumentOutline::new("Untitled")), "Untitled\n");
    }
}
