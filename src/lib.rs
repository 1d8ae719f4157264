//! An ordered set of unique values kept in a red-black tree.
//!
//! The balancing engine follows the textbook formulation: new nodes enter red
//! and are repaired upwards, removals splice in the in-order successor and
//! repair the black-height from the spliced slot. Ordering is delegated to a
//! [`Comparator`], [`Natural`] by default.
//!
//! ```
//! use ordtree::OrderedTree;
//!
//! let mut tree: OrderedTree<i32> = [3, 9, 5, 7, 0, 2, 4, 6, 1, 8].into_iter().collect();
//! tree.delete(&3);
//! assert_eq!(tree.range(&2, &6), [&2, &4, &5, &6]);
//! assert_eq!(tree.maximum_n(2), [&9, &8]);
//! ```
mod alloc;
mod compare;
mod iter;
mod node;
mod root;
mod tree;

#[cfg(test)]
mod check;
#[cfg(test)]
mod quick;

use std::{marker::PhantomData, ptr::NonNull};

pub use compare::{Comparator, Natural, Reverse};
pub use iter::tree::{IntoIter, Iter, Range};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red = 0,
    Black = 1,
}

impl From<Color> for usize {
    fn from(color: Color) -> usize {
        color as usize
    }
}

impl From<usize> for Color {
    fn from(color: usize) -> Color {
        match color {
            0 => Color::Red,
            _ => Color::Black,
        }
    }
}

/// A link to a node; `None` plays the part of the black sentinel leaf.
pub(crate) type NodePtr<T> = Option<NonNull<Node<T>>>;

/// Sentinel-aware accessors over [`NodePtr`].
///
/// `None` reads as black with no parent and no children, and writes to it are
/// dropped, so the balancing code never has to branch on absent links.
pub(crate) trait NodePtrExt {
    type Value;

    fn color(&self) -> Color;
    fn is_black(&self) -> bool;
    fn is_red(&self) -> bool;
    fn left(&self) -> NodePtr<Self::Value>;
    fn parent(&self) -> NodePtr<Self::Value>;
    fn right(&self) -> NodePtr<Self::Value>;
    fn set_color(&self, color: Color);
    fn set_left(&self, left: NodePtr<Self::Value>);
    fn set_parent(&self, parent: NodePtr<Self::Value>);
    fn set_right(&self, right: NodePtr<Self::Value>);
}

impl<T> NodePtrExt for NodePtr<T> {
    type Value = T;

    #[inline(always)]
    fn color(&self) -> Color {
        self.map_or(Color::Black, |v| unsafe { v.as_ref() }.color())
    }

    #[inline(always)]
    fn is_black(&self) -> bool {
        self.color() == Color::Black
    }

    #[inline(always)]
    fn is_red(&self) -> bool {
        self.color() == Color::Red
    }

    #[inline(always)]
    fn left(&self) -> NodePtr<T> {
        self.and_then(|v| unsafe { v.as_ref() }.left)
    }

    #[inline(always)]
    fn parent(&self) -> NodePtr<T> {
        self.and_then(|v| unsafe { v.as_ref() }.parent_ptr())
    }

    #[inline(always)]
    fn right(&self) -> NodePtr<T> {
        self.and_then(|v| unsafe { v.as_ref() }.right)
    }

    #[inline(always)]
    fn set_color(&self, color: Color) {
        if let Some(mut node) = *self {
            unsafe { node.as_mut() }.set_color(color);
        }
    }

    #[inline(always)]
    fn set_left(&self, left: NodePtr<T>) {
        if let Some(mut node) = *self {
            unsafe { node.as_mut() }.left = left;
        }
    }

    #[inline(always)]
    fn set_parent(&self, parent: NodePtr<T>) {
        if let Some(mut node) = *self {
            unsafe { node.as_mut() }.set_parent(parent);
        }
    }

    #[inline(always)]
    fn set_right(&self, right: NodePtr<T>) {
        if let Some(mut node) = *self {
            unsafe { node.as_mut() }.right = right;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ComingFrom {
    Left,
    Right,
}

/// A tree node.
///
/// Nodes are only reachable through a shared borrow of their
/// [`OrderedTree`], which is what makes the read accessors safe.
pub struct Node<T> {
    // The parent pointer with the color in the lowest bit.
    pub(crate) parent_color: *mut Node<T>,
    pub(crate) right: NodePtr<T>,
    pub(crate) left: NodePtr<T>,
    pub(crate) value: T,
}

/// The balancing engine: owns the links, knows nothing about ordering.
pub(crate) struct Root<T> {
    pub(crate) root: NodePtr<T>,
}

/// An ordered set of unique values.
///
/// `C` decides both ordering and identity: two values the comparator reports
/// as [`Equal`](std::cmp::Ordering::Equal) are the same element, and the
/// second one is never stored.
pub struct OrderedTree<T, C = Natural> {
    root: Root<T>,
    len: usize,
    comparator: C,
    _marker: PhantomData<Box<Node<T>>>,
}

// SAFETY: the tree owns every node exclusively; nodes are never shared across
// trees and only mutated through `&mut OrderedTree`.
unsafe impl<T: Send, C: Send> Send for OrderedTree<T, C> {}
// SAFETY: `&OrderedTree` only hands out shared references to node data.
unsafe impl<T: Sync, C: Sync> Sync for OrderedTree<T, C> {}
