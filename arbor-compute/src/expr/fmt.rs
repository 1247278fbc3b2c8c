//! Text rendering of expression trees as box-drawing diagrams.

use super::Node;

impl Node {
    /// Renders the tree as a multi-line diagram with box-drawing branches, one node per
    /// line. A power's exponent is drawn as a rational leaf.
    ///
    /// ```
    /// use arbor_compute::{Node, Rational};
    ///
    /// let tree = Node::power(Node::symbol('x')?, Rational::new(2, 1)?);
    /// assert_eq!(tree.tree_diagram(), "\
    /// ^
    /// ├── x
    /// ╰── 2");
    /// # Ok::<_, arbor_compute::Error>(())
    /// ```
    pub fn tree_diagram(&self) -> String {
        let mut out = self.label();
        draw_children(self, "", &mut out);
        out
    }
}

fn draw_children(node: &Node, prefix: &str, out: &mut String) {
    let children = node.children();
    let last = children.len().saturating_sub(1);
    for (i, child) in children.iter().enumerate() {
        let (branch, continuation) = if i == last {
            ("╰── ", "    ")
        } else {
            ("├── ", "│   ")
        };
        out.push('\n');
        out.push_str(prefix);
        out.push_str(branch);
        out.push_str(&child.label());
        draw_children(child, &format!("{prefix}{continuation}"), out);
    }
}
