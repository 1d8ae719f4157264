use std::ptr::NonNull;

use log::trace;

use super::{Color, Node, NodePtr, NodePtrExt, Root};

// Public
impl<T> Root<T> {
    pub fn new() -> Self {
        Root { root: None }
    }

    pub fn first(&self) -> NodePtr<T> {
        self.root.map(|n| unsafe { n.as_ref() }.leftmost())
    }

    pub fn last(&self) -> NodePtr<T> {
        self.root.map(|n| unsafe { n.as_ref() }.rightmost())
    }

    /// Restores the red-black properties after `node` was linked in as a red
    /// leaf.
    pub fn insert(&mut self, node: NonNull<Node<T>>) {
        let mut node: NodePtr<T> = Some(node);

        loop {
            /*
             * Loop invariant: node is red.
             *
             * A black parent (or no parent: node is the root) means there is
             * no red-red edge left to repair.
             */
            let mut parent = node.parent();
            if parent.is_black() {
                break;
            }

            // parent is red so it cannot be the root: gparent exists.
            let gparent = parent.parent();
            debug_assert!(gparent.is_some());

            if parent == gparent.left() {
                let uncle = gparent.right();
                if uncle.is_red() {
                    /*
                     * Case 1 - node's uncle is red (color flips).
                     *
                     *       G            g
                     *      / \          / \
                     *     p   u  -->   P   U
                     *    /            /
                     *   n            n
                     *
                     * g's parent might be red, so we recurse at g.
                     */
                    trace!("insert: red uncle, recoloring");
                    uncle.set_color(Color::Black);
                    parent.set_color(Color::Black);
                    gparent.set_color(Color::Red);
                    node = gparent;
                    continue;
                }

                if node == parent.right() {
                    /*
                     * Case 2 - node's uncle is black and node is
                     * the parent's right child (left rotate at parent).
                     *
                     *      G             G
                     *     / \           / \
                     *    p   U  -->    n   U
                     *     \           /
                     *      n         p
                     *
                     * This turns node into an outer child; Case 3 finishes.
                     */
                    self.rotate_left(parent);
                    node = parent;
                    parent = node.parent();
                }

                /*
                 * Case 3 - node's uncle is black and node is
                 * the parent's left child (right rotate at gparent).
                 *
                 *        G           P
                 *       / \         / \
                 *      p   U  -->  n   g
                 *     /                 \
                 *    n                   U
                 */
                parent.set_color(Color::Black);
                gparent.set_color(Color::Red);
                self.rotate_right(gparent);
                break;
            } else {
                let uncle = gparent.left();
                if uncle.is_red() {
                    /* Case 1 - color flips */
                    trace!("insert: red uncle, recoloring");
                    uncle.set_color(Color::Black);
                    parent.set_color(Color::Black);
                    gparent.set_color(Color::Red);
                    node = gparent;
                    continue;
                }

                if node == parent.left() {
                    /* Case 2 - right rotate at parent */
                    self.rotate_right(parent);
                    node = parent;
                    parent = node.parent();
                }

                /* Case 3 - left rotate at gparent */
                parent.set_color(Color::Black);
                gparent.set_color(Color::Red);
                self.rotate_left(gparent);
                break;
            }
        }

        self.root.set_color(Color::Black);
    }

    /// Unlinks `node` and rebalances. The node itself is left untouched for
    /// the caller to release.
    pub fn erase(&mut self, node: NonNull<Node<T>>) {
        let node: NodePtr<T> = Some(node);
        let mut removed_color = node.color();
        // The node that ends up in the vacated slot, and its parent. The child
        // may be None, which is why the parent is tracked on the side.
        let child;
        let parent;

        if node.left().is_none() {
            /*
             * Case 1: node to erase has no left child; its right subtree
             * (maybe empty) takes its place.
             */
            child = node.right();
            parent = node.parent();
            self.transplant(node, child);
        } else if node.right().is_none() {
            /* Still case 1, but this time the child is node->left */
            child = node.left();
            parent = node.parent();
            self.transplant(node, child);
        } else {
            let successor = node.right().map(|r| unsafe { r.as_ref() }.leftmost());
            removed_color = successor.color();
            child = successor.right();

            if successor.parent() == node {
                /*
                 * Case 2: node's successor is its right child
                 *
                 *    (n)          (s)
                 *    / \          / \
                 *  (x) (s)  ->  (x) (c)
                 *        \
                 *        (c)
                 */
                parent = successor;
            } else {
                /*
                 * Case 3: node's successor is leftmost under
                 * node's right child subtree
                 *
                 *    (n)          (s)
                 *    / \          / \
                 *  (x) (y)  ->  (x) (y)
                 *      /            /
                 *    (p)          (p)
                 *    /            /
                 *  (s)          (c)
                 *    \
                 *    (c)
                 */
                parent = successor.parent();
                self.transplant(successor, child);
                let right = node.right();
                successor.set_right(right);
                right.set_parent(successor);
            }

            self.transplant(node, successor);
            let left = node.left();
            successor.set_left(left);
            left.set_parent(successor);
            successor.set_color(node.color());
        }

        if removed_color == Color::Black {
            self.erase_color(child, parent);
        }
    }
}

// Private

impl<T> Root<T> {
    /// Repairs the black-height after a black node left the path through
    /// `node`, whose parent is `parent`.
    fn erase_color(&mut self, mut node: NodePtr<T>, mut parent: NodePtr<T>) {
        /*
         * Loop invariants:
         * - node is black (or None)
         * - node is not the root (parent is not None)
         * - All leaf paths going through parent and node have a
         *   black node count that is 1 lower than other leaf paths.
         */
        while node != self.root && node.is_black() {
            debug_assert!(parent.is_some());
            if node == parent.left() {
                let mut sibling = parent.right();
                debug_assert!(sibling.is_some());
                if sibling.is_red() {
                    /*
                     * Case 1 - left rotate at parent
                     *
                     *     P               S
                     *    / \             / \
                     *   N   s    -->    p   Sr
                     *      / \         / \
                     *     Sl  Sr      N   Sl
                     */
                    trace!("erase: red sibling");
                    sibling.set_color(Color::Black);
                    parent.set_color(Color::Red);
                    self.rotate_left(parent);
                    sibling = parent.right();
                }
                if sibling.left().is_black() && sibling.right().is_black() {
                    /*
                     * Case 2 - sibling color flip
                     * (p could be either color here)
                     *
                     *    (p)           (p)
                     *    / \           / \
                     *   N   S    -->  N   s
                     *      / \           / \
                     *     Sl  Sr        Sl  Sr
                     *
                     * This leaves p short one black, which is fixed by
                     * flipping p to black if it was red, or by recursing at p.
                     */
                    trace!("erase: black nephews, moving up");
                    sibling.set_color(Color::Red);
                    node = parent;
                    parent = node.parent();
                    continue;
                }
                if sibling.right().is_black() {
                    /*
                     * Case 3 - right rotate at sibling
                     *
                     *   (p)           (p)
                     *   / \           / \
                     *  N   S    -->  N   sl
                     *     / \             \
                     *    sl  Sr            S
                     *                       \
                     *                        Sr
                     */
                    sibling.left().set_color(Color::Black);
                    sibling.set_color(Color::Red);
                    self.rotate_right(sibling);
                    sibling = parent.right();
                }
                /*
                 * Case 4 - left rotate at parent + color flips
                 * (p and sl could be either color here.
                 *  After rotation, p becomes black, s acquires
                 *  p's color, and sl keeps its color)
                 *
                 *      (p)             (s)
                 *      / \             / \
                 *     N   S     -->   P   Sr
                 *        / \         / \
                 *      (sl) sr      N  (sl)
                 */
                sibling.set_color(parent.color());
                parent.set_color(Color::Black);
                sibling.right().set_color(Color::Black);
                self.rotate_left(parent);
                node = self.root;
                break;
            } else {
                let mut sibling = parent.left();
                debug_assert!(sibling.is_some());
                if sibling.is_red() {
                    /* Case 1 - right rotate at parent */
                    trace!("erase: red sibling");
                    sibling.set_color(Color::Black);
                    parent.set_color(Color::Red);
                    self.rotate_right(parent);
                    sibling = parent.left();
                }
                if sibling.left().is_black() && sibling.right().is_black() {
                    /* Case 2 - sibling color flip */
                    trace!("erase: black nephews, moving up");
                    sibling.set_color(Color::Red);
                    node = parent;
                    parent = node.parent();
                    continue;
                }
                if sibling.left().is_black() {
                    /* Case 3 - left rotate at sibling */
                    sibling.right().set_color(Color::Black);
                    sibling.set_color(Color::Red);
                    self.rotate_left(sibling);
                    sibling = parent.left();
                }
                /* Case 4 - right rotate at parent + color flips */
                sibling.set_color(parent.color());
                parent.set_color(Color::Black);
                sibling.left().set_color(Color::Black);
                self.rotate_right(parent);
                node = self.root;
                break;
            }
        }

        node.set_color(Color::Black);
    }

    /// Left rotation at `node`: its right child takes its place.
    ///
    /// ```text
    ///     n                r
    ///    / \              / \
    ///   a   r     -->    n   c
    ///      / \          / \
    ///     b   c        a   b
    /// ```
    pub(crate) fn rotate_left(&mut self, node: NodePtr<T>) {
        let pivot = node.right();
        debug_assert!(pivot.is_some(), "rotate_left needs a right child");
        trace!("rotate left");

        let inner = pivot.left();
        node.set_right(inner);
        inner.set_parent(node);

        let parent = node.parent();
        pivot.set_parent(parent);
        self.change_child(node, pivot, parent);

        pivot.set_left(node);
        node.set_parent(pivot);
    }

    /// Right rotation at `node`: its left child takes its place.
    ///
    /// ```text
    ///       n            l
    ///      / \          / \
    ///     l   c  -->   a   n
    ///    / \              / \
    ///   a   b            b   c
    /// ```
    pub(crate) fn rotate_right(&mut self, node: NodePtr<T>) {
        let pivot = node.left();
        debug_assert!(pivot.is_some(), "rotate_right needs a left child");
        trace!("rotate right");

        let inner = pivot.right();
        node.set_left(inner);
        inner.set_parent(node);

        let parent = node.parent();
        pivot.set_parent(parent);
        self.change_child(node, pivot, parent);

        pivot.set_right(node);
        node.set_parent(pivot);
    }

    /// Puts `new` in the slot `old` occupies under its parent.
    fn transplant(&mut self, old: NodePtr<T>, new: NodePtr<T>) {
        let parent = old.parent();
        self.change_child(old, new, parent);
        new.set_parent(parent);
    }

    fn change_child(&mut self, old: NodePtr<T>, new: NodePtr<T>, parent: NodePtr<T>) {
        if parent.is_some() {
            if parent.left() == old {
                parent.set_left(new);
            } else {
                parent.set_right(new);
            }
        } else {
            self.root = new;
        }
    }
}
