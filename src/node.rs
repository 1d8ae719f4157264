use std::{
    fmt::Debug,
    ptr::{self, NonNull},
};

use crate::{Color, ComingFrom, Node, NodePtr};

// Public API.
impl<T> Node<T> {
    #[inline(always)]
    pub fn value(&self) -> &T {
        &self.value
    }

    #[inline(always)]
    pub fn color(&self) -> Color {
        Color::from(self.parent_color.addr() & 1)
    }

    #[inline(always)]
    pub fn is_black(&self) -> bool {
        self.color() == Color::Black
    }

    #[inline(always)]
    pub fn is_red(&self) -> bool {
        self.color() == Color::Red
    }

    #[inline(always)]
    pub fn left(&self) -> Option<&Node<T>> {
        // SAFETY: children live as long as the tree that lent us `self`.
        self.left.map(|n| unsafe { n.as_ref() })
    }

    #[inline(always)]
    pub fn right(&self) -> Option<&Node<T>> {
        // SAFETY: see `left`.
        self.right.map(|n| unsafe { n.as_ref() })
    }

    #[inline(always)]
    pub fn parent(&self) -> Option<&Node<T>> {
        // SAFETY: see `left`.
        self.parent_ptr().map(|n| unsafe { n.as_ref() })
    }
}

// Crate API.
impl<T> Node<T> {
    /// A detached red node.
    pub(crate) fn new(value: T) -> Self {
        Node {
            parent_color: ptr::null_mut(),
            right: None,
            left: None,
            value,
        }
    }

    /// Hangs `node` under `parent` on the given side. The node keeps its color.
    ///
    /// # Safety
    ///
    /// Both pointers must be live nodes of the same tree and the slot on
    /// `direction` must be empty.
    #[inline(always)]
    pub(crate) unsafe fn link(
        mut node: NonNull<Node<T>>,
        mut parent: NonNull<Node<T>>,
        direction: ComingFrom,
    ) {
        // SAFETY: delegated to the caller.
        let node_ref = unsafe { node.as_mut() };
        node_ref.set_parent(Some(parent));
        node_ref.left = None;
        node_ref.right = None;
        let parent = unsafe { parent.as_mut() };
        match direction {
            ComingFrom::Left => parent.left = Some(node),
            ComingFrom::Right => parent.right = Some(node),
        };
    }

    #[inline(always)]
    pub(crate) fn parent_ptr(&self) -> NodePtr<T> {
        NonNull::new(self.parent_color.map_addr(|p| p & !1))
    }

    #[inline(always)]
    pub(crate) fn set_parent(&mut self, parent: NodePtr<T>) {
        self.set_parent_and_color(parent, self.color());
    }

    #[inline(always)]
    pub(crate) fn set_color(&mut self, color: Color) {
        self.set_parent_and_color(self.parent_ptr(), color);
    }

    #[inline(always)]
    pub(crate) fn set_parent_and_color(&mut self, parent: NodePtr<T>, color: Color) {
        self.parent_color = parent
            .map_or(ptr::null_mut(), NonNull::as_ptr)
            .map_addr(|p| p | usize::from(color));
    }

    /// Leftmost node of the subtree rooted at `self`.
    #[inline(always)]
    pub(crate) fn leftmost(&self) -> NonNull<Node<T>> {
        let mut node = NonNull::from(self);
        // SAFETY: every link below a live node is live.
        while let Some(left) = unsafe { node.as_ref() }.left {
            node = left;
        }
        node
    }

    /// Rightmost node of the subtree rooted at `self`.
    #[inline(always)]
    pub(crate) fn rightmost(&self) -> NonNull<Node<T>> {
        let mut node = NonNull::from(self);
        // SAFETY: see `leftmost`.
        while let Some(right) = unsafe { node.as_ref() }.right {
            node = right;
        }
        node
    }

    /// The in-order successor, or `None` past the maximum.
    #[inline(always)]
    pub(crate) fn next(&self) -> NodePtr<T> {
        // If we have a right-hand child, go down and then left as far as we
        // can.
        if let Some(right) = self.right {
            // SAFETY: by if guard, right is live.
            return Some(unsafe { right.as_ref() }.leftmost());
        }
        // No right-hand children. Everything down and left is smaller than us,
        // so any 'next' node must be in the general direction of our parent.
        // Climb while we are a right-hand child; the first parent we reach
        // from its left side is the successor.
        let mut node = NonNull::from(self);
        let mut parent = self.parent_ptr();
        while let Some(p) = parent {
            // SAFETY: parents of live nodes are live.
            let p_ref = unsafe { p.as_ref() };
            if p_ref.right != Some(node) {
                break;
            }
            node = p;
            parent = p_ref.parent_ptr();
        }
        parent
    }

    /// The in-order predecessor, or `None` before the minimum.
    #[inline(always)]
    pub(crate) fn prev(&self) -> NodePtr<T> {
        // Mirror of `next`.
        if let Some(left) = self.left {
            // SAFETY: by if guard, left is live.
            return Some(unsafe { left.as_ref() }.rightmost());
        }
        let mut node = NonNull::from(self);
        let mut parent = self.parent_ptr();
        while let Some(p) = parent {
            // SAFETY: parents of live nodes are live.
            let p_ref = unsafe { p.as_ref() };
            if p_ref.left != Some(node) {
                break;
            }
            node = p;
            parent = p_ref.parent_ptr();
        }
        parent
    }
}

impl<T> Debug for Node<T>
where
    T: Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{:?}::({:?})", self.color(), self.value))
    }
}
