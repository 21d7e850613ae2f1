//! A Functional BST. This is modeled after a BST one would see in
//! a functional language like Haskell. Inserting into the tree doesn't
//! modify it; instead `insert` returns a new tree that references every
//! subtree of the original the insertion didn't pass through.
//!
//! The tree does no balancing and keeps duplicates: a value equal to a
//! node's value goes into that node's right subtree.
//!
//! # Examples
//!
//! ```
//! use persistent_bst::functional::Tree;
//!
//! let tree: Tree = Tree::new();
//!
//! // Nothing in here yet.
//! assert!(!tree.contains("b"));
//! assert_eq!(tree.render(), "()");
//!
//! // This `insert` returns a new tree!
//! let new_tree = tree.insert("b".to_string());
//!
//! // The new tree has this new value but the old one doesn't.
//! assert!(new_tree.contains("b"));
//! assert!(!tree.contains("b"));
//!
//! let newer_tree = new_tree.insert("a".to_string()).insert("c".to_string());
//!
//! // All history is preserved.
//! assert_eq!(newer_tree.render(), "((a)b(c))");
//! assert_eq!(new_tree.render(), "(b)");
//! assert_eq!(tree.render(), "()");
//! ```

use std::borrow::Borrow;
use std::cmp;
use std::fmt;
use std::iter::FromIterator;
use std::mem;

/// Shared pointer holding subtrees and values. `Arc` when the `arc` feature
/// is enabled so trees can cross threads, `Rc` otherwise.
#[cfg(feature = "arc")]
type ReferenceCounter<T> = std::sync::Arc<T>;

#[cfg(not(feature = "arc"))]
type ReferenceCounter<T> = std::rc::Rc<T>;

/// A persistent Binary Search Tree. This can be used for inserting
/// values and checking whether a value is present. Note that this
/// data structure is functional - `insert` returns a new tree.
///
/// Subtrees are held in `Rc` by default, so a `Tree` is neither `Send` nor
/// `Sync`. Enable the `arc` feature to hold them in `Arc` instead, which makes
/// `Tree<T>` `Send + Sync` whenever `T` is and lets threads read (and insert
/// into) the same tree.
///
/// No operation recurses, so trees of any depth can be built, queried,
/// rendered, compared, and dropped. Only the `Debug` output recurses.
#[derive(Debug)]
pub enum Tree<T = String> {
    /// The empty tree, also found at the bottom of every subtree.
    Empty,
    /// A `Node` that has a value and two children (which are
    /// both `Tree`s). This enum trivially wraps the [`Node`] struct.
    Node(Node<T>),
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloning a tree only bumps the reference counts of the root's children.
impl<T> Clone for Tree<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Empty => Self::Empty,
            Self::Node(n) => Self::Node(n.clone()),
        }
    }
}

impl<T> Tree<T> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self::Empty
    }

    /// Whether this is the empty tree.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Counts the values in this tree, duplicates included.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_bst::functional::Tree;
    ///
    /// let tree: Tree = Tree::new();
    /// assert_eq!(tree.size(), 0);
    ///
    /// let tree = tree.insert("m".to_string()).insert("m".to_string());
    /// assert_eq!(tree.size(), 2);
    /// ```
    pub fn size(&self) -> usize {
        let mut size = 0;
        let mut pending = vec![self];
        while let Some(tree) = pending.pop() {
            if let Self::Node(n) = tree {
                size += 1;
                pending.push(n.left());
                pending.push(n.right());
            }
        }
        size
    }

    /// Gets the height of this tree. The empty tree has a height of 0 and
    /// a node with no children has a height of 1.
    pub fn height(&self) -> usize {
        let mut height = 0;
        let mut pending = vec![(self, 0)];
        while let Some((tree, depth)) = pending.pop() {
            match tree {
                Self::Empty => height = height.max(depth),
                Self::Node(n) => {
                    pending.push((n.left(), depth + 1));
                    pending.push((n.right(), depth + 1));
                }
            }
        }
        height
    }

    /// Returns a new tree that includes a node containing the given value.
    /// If the value is already present it is stored again, to the right of
    /// the existing one.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_bst::functional::Tree;
    ///
    /// let tree: Tree = Tree::new();
    /// let new_tree = tree.insert("b".to_string());
    /// let newer_tree = new_tree.insert("a".to_string());
    ///
    /// // All history is preserved.
    /// assert_eq!(newer_tree.size(), 2);
    /// assert_eq!(new_tree.size(), 1);
    /// assert_eq!(tree.size(), 0);
    /// ```
    pub fn insert(&self, value: T) -> Self
    where
        T: cmp::Ord,
    {
        // Every node passed on the way down, and whether the value went left of it.
        let mut path = Vec::new();
        let mut current = self;
        while let Self::Node(n) = current {
            // Ties go right.
            let went_left = value.cmp(n.value()) == cmp::Ordering::Less;
            path.push((n, went_left));
            current = if went_left { n.left() } else { n.right() };
        }

        // Rebuild the path bottom-up. The side not taken is shared, not copied.
        let mut tree = Self::Node(Node::new(value));
        for (n, went_left) in path.into_iter().rev() {
            let rebuilt = Child(ReferenceCounter::new(tree));
            tree = Self::Node(if went_left {
                n.clone_with_children(rebuilt, n.right.clone())
            } else {
                n.clone_with_children(n.left.clone(), rebuilt)
            });
        }
        tree
    }

    /// Checks whether the given value was inserted into this tree.
    /// Any borrowed form of the value works, so a `Tree<String>` can be
    /// searched with a `&str`.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_bst::functional::Tree;
    ///
    /// let tree: Tree = Tree::new();
    /// let tree = tree.insert("a".to_string());
    ///
    /// assert!(tree.contains("a"));
    /// assert!(!tree.contains("z"));
    /// ```
    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: cmp::Ord + ?Sized,
    {
        let mut current = self;
        while let Self::Node(n) = current {
            let stored: &Q = Borrow::borrow(n.value());
            current = match value.cmp(stored) {
                cmp::Ordering::Less => n.left(),
                cmp::Ordering::Equal => return true,
                cmp::Ordering::Greater => n.right(),
            };
        }
        false
    }

    /// Renders the tree as nested parentheses. The empty tree is `()`.
    /// A node is its left subtree, its value, and its right subtree wrapped
    /// in parentheses, where empty subtrees contribute nothing.
    ///
    /// This is the same string the [`Display`][fmt::Display] impl produces.
    ///
    /// # Examples
    ///
    /// ```
    /// use persistent_bst::functional::Tree;
    ///
    /// let tree: Tree = ["b", "a", "c"].iter().map(|s| s.to_string()).collect();
    /// assert_eq!(tree.render(), "((a)b(c))");
    /// ```
    pub fn render(&self) -> String
    where
        T: fmt::Display,
    {
        self.to_string()
    }
}

impl<T: fmt::Display> fmt::Display for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("()"),
            Self::Node(n) => fmt::Display::fmt(n, f),
        }
    }
}

/// Structural equality: same shape and equal values.
impl<T: PartialEq> PartialEq for Tree<T> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Empty, Self::Empty) => true,
            (Self::Node(a), Self::Node(b)) => a == b,
            _ => false,
        }
    }
}

impl<T: Eq> Eq for Tree<T> {}

/// Builds a tree by inserting every item, in order, into the empty tree.
impl<T: cmp::Ord> FromIterator<T> for Tree<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::new(), |tree, value| tree.insert(value))
    }
}

struct Child<T>(ReferenceCounter<Tree<T>>);

impl<T> Clone for Child<T> {
    fn clone(&self) -> Self {
        Self(ReferenceCounter::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for Child<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl<T> Child<T> {
    fn new() -> Self {
        Self(ReferenceCounter::new(Tree::new()))
    }

    fn is_shared_with(&self, other: &Self) -> bool {
        ReferenceCounter::ptr_eq(&self.0, &other.0)
    }
}

/// A `Node` holds an inserted value. It always has two children although
/// those children may be [`Empty`][Tree::Empty].
#[derive(Debug)]
pub struct Node<T> {
    value: ReferenceCounter<T>,
    left: Child<T>,
    right: Child<T>,
}

/// Manual implementation of `Clone` since deriving it would require `T: Clone`
/// even though only reference counts are bumped.
impl<T> Clone for Node<T> {
    fn clone(&self) -> Self {
        Self {
            value: ReferenceCounter::clone(&self.value),
            left: self.left.clone(),
            right: self.right.clone(),
        }
    }
}

/// Dropping a node would otherwise recurse once per level of the subtrees it
/// solely owns. Instead those subtrees are detached onto a stack and each
/// node is dropped with empty children.
impl<T> Drop for Node<T> {
    fn drop(&mut self) {
        if self.left().is_empty() && self.right().is_empty() {
            return;
        }

        let empty = Child::new();
        let mut detached = vec![
            mem::replace(&mut self.left, empty.clone()),
            mem::replace(&mut self.right, empty.clone()),
        ];
        while let Some(child) = detached.pop() {
            // Subtrees still referenced by another tree are left to that tree.
            if let Ok(Tree::Node(mut n)) = ReferenceCounter::try_unwrap(child.0) {
                detached.push(mem::replace(&mut n.left, empty.clone()));
                detached.push(mem::replace(&mut n.right, empty.clone()));
            }
        }
    }
}

impl<T> Node<T> {
    /// Construct a new `Node` with the given `value`. Both children point
    /// at the same empty tree.
    fn new(value: T) -> Self {
        let empty = Child::new();
        Self {
            value: ReferenceCounter::new(value),
            left: empty.clone(),
            right: empty,
        }
    }

    /// The value stored in this node.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// The subtree holding the values less than this node's value.
    pub fn left(&self) -> &Tree<T> {
        &self.left.0
    }

    /// The subtree holding the values greater than or equal to this node's value.
    pub fn right(&self) -> &Tree<T> {
        &self.right.0
    }

    /// Create a new Node with the same value as this node
    /// but with the given children.
    fn clone_with_children(&self, left: Child<T>, right: Child<T>) -> Self {
        Self {
            value: ReferenceCounter::clone(&self.value),
            left,
            right,
        }
    }
}

/// Shared subtrees are equal without being walked.
impl<T: PartialEq> PartialEq for Node<T> {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];
        while let Some((a, b)) = pending.pop() {
            if a.value != b.value {
                return false;
            }
            let children = [(&a.left, &b.left), (&a.right, &b.right)];
            for &(x, y) in children.iter() {
                if x.is_shared_with(y) {
                    continue;
                }
                match (x.0.as_ref(), y.0.as_ref()) {
                    (Tree::Empty, Tree::Empty) => {}
                    (Tree::Node(m), Tree::Node(n)) => pending.push((m, n)),
                    _ => return false,
                }
            }
        }
        true
    }
}

impl<T: Eq> Eq for Node<T> {}

/// A step of the in-order walk that renders a node.
enum Render<'a, T> {
    Open(&'a Node<T>),
    Value(&'a T),
    Close,
}

impl<T: fmt::Display> fmt::Display for Node<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut steps = vec![Render::Open(self)];
        while let Some(step) = steps.pop() {
            match step {
                Render::Open(n) => {
                    f.write_str("(")?;
                    // Pushed in reverse: left subtree, value, right subtree, then ")".
                    steps.push(Render::Close);
                    if let Tree::Node(right) = n.right() {
                        steps.push(Render::Open(right));
                    }
                    steps.push(Render::Value(n.value()));
                    if let Tree::Node(left) = n.left() {
                        steps.push(Render::Open(left));
                    }
                }
                Render::Value(value) => fmt::Display::fmt(value, f)?,
                Render::Close => f.write_str(")")?,
            }
        }
        Ok(())
    }
}
