//! Structural checks shared by the test suites.
use std::{cmp::Ordering, fmt::Debug, ptr};

use crate::{Color, Comparator, Node, OrderedTree};

/// Panics unless `tree` is a valid red-black tree: black root, no red-red
/// edge, uniform black-height, consistent parent links, strictly ascending
/// in-order values, and a `len` matching the node count.
pub(crate) fn assert_invariants<T: Debug, C: Comparator<T>>(tree: &OrderedTree<T, C>) {
    let Some(root) = tree.root_node() else {
        assert_eq!(0, tree.len(), "empty tree with non-zero len");
        return;
    };
    assert_eq!(Color::Black, root.color(), "red root {root:?}");
    assert!(root.parent().is_none(), "root {root:?} has a parent");

    let mut count = 0;
    black_height(root, &mut count);
    assert_eq!(count, tree.len(), "len does not match the node count");

    let values = tree.values();
    for pair in values.windows(2) {
        assert_eq!(
            Ordering::Less,
            tree.comparator().compare(pair[0], pair[1]),
            "out of order: {:?} then {:?}",
            pair[0],
            pair[1]
        );
    }
}

/// Black nodes on every path from `node` down to a leaf, sentinel excluded.
fn black_height<T: Debug>(node: &Node<T>, count: &mut usize) -> usize {
    *count += 1;
    let mut heights = [0; 2];
    for (height, child) in heights.iter_mut().zip([node.left(), node.right()]) {
        if let Some(child) = child {
            let parent = child.parent().expect("child without parent");
            assert!(ptr::eq(node, parent), "{child:?} points to the wrong parent");
            if node.is_red() {
                assert!(child.is_black(), "red {node:?} has red child {child:?}");
            }
            *height = black_height(child, count);
        }
    }
    assert_eq!(heights[0], heights[1], "black-height differs under {node:?}");
    heights[0] + usize::from(node.is_black())
}

/// Nodes on the longest root-to-leaf path.
pub(crate) fn height<T, C>(tree: &OrderedTree<T, C>) -> usize {
    fn go<T>(node: Option<&Node<T>>) -> usize {
        node.map_or(0, |n| 1 + go(n.left()).max(go(n.right())))
    }
    go(tree.root_node())
}
