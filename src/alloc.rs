use std::ptr::NonNull;

use crate::Node;

/// Allocates a detached red node.
///
/// The node leaks unless it is handed back to [`own_back`].
pub(crate) fn leak_alloc_node<T>(value: T) -> NonNull<Node<T>> {
    NonNull::from(Box::leak(Box::new(Node::new(value))))
}

/// # Safety
///
/// `node` must come from [`leak_alloc_node`], be unlinked from any tree, and
/// not be used afterwards. Each node is owned back exactly once.
pub(crate) unsafe fn own_back<T>(node: NonNull<Node<T>>) -> Box<Node<T>> {
    unsafe { Box::from_raw(node.as_ptr()) }
}
