use std::{cmp::Ordering::*, fmt::Debug, marker::PhantomData, ptr::NonNull};

use log::debug;

use crate::{
    ComingFrom, Comparator, Iter, Natural, Node, NodePtr, OrderedTree, Range, Root, alloc,
};

impl<T: Ord> OrderedTree<T, Natural> {
    /// An empty tree ordered by `T`'s [`Ord`].
    pub fn new() -> Self {
        Self::with_comparator(Natural)
    }
}

impl<T, C: Comparator<T> + Default> Default for OrderedTree<T, C> {
    fn default() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, C> Drop for OrderedTree<T, C> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T, C: Comparator<T>> OrderedTree<T, C> {
    /// An empty tree ordered by `comparator`.
    pub fn with_comparator(comparator: C) -> Self {
        OrderedTree {
            root: Root::new(),
            len: 0,
            comparator,
            _marker: PhantomData,
        }
    }

    /// Adds `value`, returning whether it was new.
    ///
    /// A value the comparator reports equal to a stored one is dropped and the
    /// tree is left untouched.
    ///
    /// ```
    /// use ordtree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::new();
    /// assert!(tree.insert(7));
    /// assert!(!tree.insert(7));
    /// assert_eq!(1, tree.len());
    /// ```
    pub fn insert(&mut self, value: T) -> bool {
        let mut parent = None;
        let mut direction = ComingFrom::Left;
        let mut link = self.root.root;
        while let Some(candidate) = link {
            let candidate_ref = unsafe { candidate.as_ref() };
            parent = Some(candidate);
            match self.comparator.compare(&value, &candidate_ref.value) {
                Equal => return false,
                Less => {
                    direction = ComingFrom::Left;
                    link = candidate_ref.left;
                }
                Greater => {
                    direction = ComingFrom::Right;
                    link = candidate_ref.right;
                }
            }
        }

        let node = alloc::leak_alloc_node(value);
        match parent {
            // SAFETY: parent is a live node whose `direction` slot is empty.
            Some(parent) => unsafe { Node::link(node, parent, direction) },
            None => self.root.root = Some(node),
        }
        self.root.insert(node);
        self.len += 1;
        debug!("inserted value, len = {}", self.len);
        true
    }

    /// Removes the value equal to `value`, returning whether it was present.
    ///
    /// ```
    /// use ordtree::OrderedTree;
    ///
    /// let mut tree: OrderedTree<_> = (0..4).collect();
    /// assert!(tree.delete(&2));
    /// assert!(!tree.delete(&2));
    /// assert_eq!(tree.values(), [&0, &1, &3]);
    /// ```
    pub fn delete(&mut self, value: &T) -> bool {
        self.take(value).is_some()
    }

    /// Removes and returns the stored value equal to `value`.
    pub fn take(&mut self, value: &T) -> Option<T> {
        let node = self.find(value)?;
        Some(self.remove_node(node))
    }

    pub fn contains(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /// The stored value equal to `value`.
    ///
    /// With a coarse comparator this is how to read back which of several
    /// equivalent values the tree kept:
    ///
    /// ```
    /// use ordtree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::with_comparator(|a: &(u8, &str), b: &(u8, &str)| a.0.cmp(&b.0));
    /// tree.insert((1, "first"));
    /// tree.insert((1, "second"));
    /// assert_eq!(Some(&(1, "first")), tree.get(&(1, "")));
    /// ```
    pub fn get(&self, value: &T) -> Option<&T> {
        self.find(value).map(|n| &unsafe { n.as_ref() }.value)
    }

    /// All stored values `v` with `lo <= v <= hi`, ascending.
    ///
    /// ```
    /// use ordtree::OrderedTree;
    ///
    /// let mut tree = OrderedTree::with_comparator(|a: &f64, b: &f64| a.total_cmp(b));
    /// tree.extend((0..10).map(f64::from));
    /// assert_eq!(tree.range(&2.5, &7.0), [&3.0, &4.0, &5.0, &6.0, &7.0]);
    /// ```
    pub fn range(&self, lo: &T, hi: &T) -> Vec<&T> {
        let mut values = Vec::new();
        let mut node = self.lower_bound(lo);
        while let Some(n) = node {
            let n = unsafe { n.as_ref() };
            if self.comparator.compare(&n.value, hi) == Greater {
                break;
            }
            values.push(&n.value);
            node = n.next();
        }
        values
    }

    /// Lazy form of [`range`](Self::range). The upper bound is borrowed for
    /// as long as the cursor lives.
    pub fn range_iter<'a>(&'a self, lo: &T, hi: &'a T) -> Range<'a, T, C> {
        Range::new(self.lower_bound(lo), hi, &self.comparator)
    }

    pub fn pop_first(&mut self) -> Option<T> {
        let first = self.root.first()?;
        Some(self.remove_node(first))
    }

    pub fn pop_last(&mut self) -> Option<T> {
        let last = self.root.last()?;
        Some(self.remove_node(last))
    }

    /// The node holding `value`, found by plain binary descent.
    fn find(&self, value: &T) -> NodePtr<T> {
        let mut node = self.root.root;
        while let Some(candidate) = node {
            let candidate = unsafe { candidate.as_ref() };
            match self.comparator.compare(value, &candidate.value) {
                Equal => break,
                Less => node = candidate.left,
                Greater => node = candidate.right,
            }
        }
        node
    }

    /// The first node whose value is not less than `lo`.
    fn lower_bound(&self, lo: &T) -> NodePtr<T> {
        // Descend towards `lo`. If it is absent we fall off the tree right
        // next to where it would sit, so the last node visited is either its
        // predecessor or its successor.
        let mut node = self.root.root;
        let mut last = None;
        while let Some(candidate) = node {
            let candidate_ref = unsafe { candidate.as_ref() };
            last = node;
            match self.comparator.compare(&candidate_ref.value, lo) {
                Equal => return node,
                Less => node = candidate_ref.right,
                Greater => node = candidate_ref.left,
            }
        }
        let last_ref = unsafe { last?.as_ref() };
        if self.comparator.compare(&last_ref.value, lo) == Less {
            last_ref.next()
        } else {
            last
        }
    }

    /// Unlinks and frees `node`, handing back its value.
    fn remove_node(&mut self, node: NonNull<Node<T>>) -> T {
        self.root.erase(node);
        self.len -= 1;
        debug!("deleted value, len = {}", self.len);
        // SAFETY: erase unlinked the node and nothing else points to it.
        let node = unsafe { alloc::own_back(node) };
        node.value
    }
}

impl<T, C> OrderedTree<T, C> {
    /// The smallest value.
    pub fn minimum(&self) -> Option<&T> {
        self.root.first().map(|n| &unsafe { n.as_ref() }.value)
    }

    /// Up to `count` of the smallest values, ascending.
    ///
    /// ```
    /// use ordtree::OrderedTree;
    ///
    /// let tree: OrderedTree<_> = [3, 9, 5, 7, 0, 2, 4, 6, 1, 8].into_iter().collect();
    /// assert_eq!(tree.minimum_n(3), [&0, &1, &2]);
    /// assert_eq!(tree.minimum_n(100).len(), 10);
    /// ```
    pub fn minimum_n(&self, count: usize) -> Vec<&T> {
        self.iter().take(count).collect()
    }

    /// The largest value.
    pub fn maximum(&self) -> Option<&T> {
        self.root.last().map(|n| &unsafe { n.as_ref() }.value)
    }

    /// Up to `count` of the largest values, descending.
    ///
    /// ```
    /// use ordtree::OrderedTree;
    ///
    /// let tree: OrderedTree<_> = [3, 9, 5, 7, 0, 2, 4, 6, 1, 8].into_iter().collect();
    /// assert_eq!(tree.maximum_n(3), [&9, &8, &7]);
    /// ```
    pub fn maximum_n(&self, count: usize) -> Vec<&T> {
        self.iter().rev().take(count).collect()
    }

    /// Every value, ascending. See [`iter`](Self::iter) for the lazy form.
    pub fn values(&self) -> Vec<&T> {
        self.iter().collect()
    }

    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.root.first(), self.root.last(), self.len)
    }

    pub fn root_node(&self) -> Option<&Node<T>> {
        self.root.root.map(|n| unsafe { n.as_ref() })
    }

    pub fn comparator(&self) -> &C {
        &self.comparator
    }

    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Frees every node. The tree stays usable.
    pub fn clear(&mut self) {
        // Post-order teardown without recursion: walk down to a leaf, detach
        // it from its parent and free it, then continue from the parent.
        let mut cursor = self.root.root.take();
        while let Some(current) = cursor {
            let current_ref = unsafe { current.as_ref() };
            if current_ref.left.is_some() {
                cursor = current_ref.left;
                continue;
            }
            if current_ref.right.is_some() {
                cursor = current_ref.right;
                continue;
            }
            cursor = current_ref.parent_ptr();
            if let Some(mut parent) = cursor {
                let parent = unsafe { parent.as_mut() };
                if parent.left == Some(current) {
                    parent.left = None;
                } else {
                    parent.right = None;
                }
            }
            // SAFETY: current is a leaf nobody links to anymore.
            drop(unsafe { alloc::own_back(current) });
        }
        self.len = 0;
    }
}

impl<T: Debug, C> Debug for OrderedTree<T, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: Clone, C: Comparator<T> + Clone> Clone for OrderedTree<T, C> {
    fn clone(&self) -> Self {
        let mut tree = OrderedTree::with_comparator(self.comparator.clone());
        tree.extend(self.iter().cloned());
        tree
    }
}
