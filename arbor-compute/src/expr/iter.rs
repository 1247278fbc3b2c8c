use super::Node;

/// An iterator that iteratively traverses the tree of nodes in left-to-right post-order
/// (i.e. depth-first). A power contributes its base followed by the power itself; the
/// exponent is not a node and is not visited.
///
/// This iterator is created by [`Node::post_order_iter`].
pub struct NodeIter<'a> {
    stack: Vec<&'a Node>,
    last_visited: Option<&'a Node>,
}

impl<'a> NodeIter<'a> {
    pub fn new(node: &'a Node) -> Self {
        Self {
            stack: vec![node],
            last_visited: None,
        }
    }

    /// Pops the current node in the stack and marks it as the last visited node.
    fn visit(&mut self) -> Option<&'a Node> {
        self.last_visited = Some(self.stack.pop()?);
        self.last_visited
    }

    /// Returns true if the given node matches the last visited node.
    fn is_last_visited(&self, node: &'a Node) -> bool {
        match self.last_visited {
            Some(last_visited) => std::ptr::eq(last_visited, node),
            None => false,
        }
    }
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let node = self.stack.last()?;
            match node {
                Node::Rational(_) | Node::Symbol(_) => return self.visit(),
                Node::Power { base, .. } => {
                    if self.is_last_visited(base) {
                        return self.visit();
                    }
                    self.stack.push(base);
                }
                Node::Product(operands) | Node::Sum(operands) => {
                    if operands.is_empty() || self.is_last_visited(operands.last().unwrap()) {
                        return self.visit();
                    }
                    for operand in operands.iter().rev() {
                        self.stack.push(operand);
                    }
                }
            }
        }
    }
}

impl Node {
    /// Returns an iterator that visits every node in the tree in left-to-right post-order.
    pub fn post_order_iter(&self) -> NodeIter {
        NodeIter::new(self)
    }
}
