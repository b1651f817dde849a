use crate::arena::TypedArena;
use crate::avl_tree::node::Node;
use crate::avl_tree::tree::{self, TraversalOrder};
use crate::error::{Error, Result};
use log::debug;
use std::cmp::Ordering;
use std::mem;

const DEFAULT_CHUNK_SIZE: usize = 64;

/// An ordered set implemented using an avl tree.
///
/// An avl tree is a self-balancing binary search tree that maintains the invariant that the
/// heights of two child subtrees of any node differ by at most one. Elements are ordered by a
/// three-way comparator fixed at construction, so `T` does not need to implement `Ord`. The
/// comparator must be a consistent total order for the lifetime of the set. At most one element
/// of each equivalence class is stored: inserting an element that compares equal to an existing
/// one is rejected.
///
/// # Examples
/// ```
/// use avl_collections::avl_tree::{AvlSet, TraversalOrder};
/// use avl_collections::Error;
///
/// let mut set = AvlSet::new().unwrap();
/// set.insert(3).unwrap();
/// set.insert(0).unwrap();
/// assert_eq!(set.insert(3), Err(Error::DuplicateKey));
///
/// assert_eq!(set.len(), 2);
/// assert_eq!(set.get(&3), Some(&3));
///
/// let mut keys = Vec::new();
/// set.traverse(TraversalOrder::InOrder, |key| keys.push(*key));
/// assert_eq!(keys, vec![0, 3]);
///
/// assert_eq!(set.remove(&0), Ok(0));
/// assert_eq!(set.remove(&0), Err(Error::KeyNotFound));
/// ```
pub struct AvlSet<T, C = fn(&T, &T) -> Ordering> {
    arena: TypedArena<Node<T>>,
    root: tree::Tree,
    cmp: C,
}

impl<T> AvlSet<T>
where
    T: Ord,
{
    /// Constructs a new, empty `AvlSet<T>` ordered by `T`'s `Ord` implementation. Returns
    /// `Error::InvalidArgument` if `T` is zero-sized.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let set: AvlSet<u32> = AvlSet::new().unwrap();
    /// assert!(set.is_empty());
    /// ```
    pub fn new() -> Result<Self> {
        Self::with_comparator(<T as Ord>::cmp)
    }
}

impl<T, C> AvlSet<T, C>
where
    C: Fn(&T, &T) -> Ordering,
{
    /// Constructs a new, empty `AvlSet<T, C>` ordered by `cmp`. Returns `Error::InvalidArgument`
    /// if `T` is zero-sized.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::with_comparator(|a: &u32, b: &u32| b.cmp(a)).unwrap();
    /// set.insert(1).unwrap();
    /// set.insert(2).unwrap();
    /// assert_eq!(set.min(), Some(&2));
    /// ```
    pub fn with_comparator(cmp: C) -> Result<Self> {
        Self::with_capacity_and_comparator(DEFAULT_CHUNK_SIZE, cmp)
    }

    /// Constructs a new, empty `AvlSet<T, C>` ordered by `cmp` whose nodes are allocated
    /// `chunk_size` at a time. Returns `Error::InvalidArgument` if `T` is zero-sized.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let set = AvlSet::with_capacity_and_comparator(1024, |a: &u32, b: &u32| a.cmp(b)).unwrap();
    /// assert_eq!(set.len(), 0);
    /// ```
    pub fn with_capacity_and_comparator(chunk_size: usize, cmp: C) -> Result<Self> {
        if mem::size_of::<T>() == 0 {
            debug!("refusing to construct an avl set over a zero-sized element type");
            return Err(Error::InvalidArgument);
        }

        Ok(AvlSet {
            arena: TypedArena::new(chunk_size),
            root: None,
            cmp,
        })
    }

    /// Inserts an element into the set and rebalances the tree.
    ///
    /// Returns `Error::DuplicateKey` if an element comparing equal already exists, and
    /// `Error::AllocFailed` if storage for the new node could not be allocated. The set is
    /// unchanged in both cases and `element` is dropped.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    /// use avl_collections::Error;
    ///
    /// let mut set = AvlSet::new().unwrap();
    /// assert_eq!(set.insert(1), Ok(()));
    /// assert!(set.contains(&1));
    /// assert_eq!(set.insert(1), Err(Error::DuplicateKey));
    /// ```
    pub fn insert(&mut self, element: T) -> Result<()> {
        if let Err(error) = self.arena.try_reserve() {
            debug!("failed to reserve storage for a new node");
            return Err(error);
        }

        let new_handle = self.arena.allocate(Node::new(element));
        match tree::insert(&mut self.arena, self.root, new_handle, &self.cmp) {
            Ok(root) => {
                self.root = Some(root);
                Ok(())
            },
            Err(error) => {
                self.arena.free(new_handle);
                debug!("rejected insert: {}", error);
                Err(error)
            },
        }
    }

    /// Removes the element comparing equal to `key` and returns it. Returns
    /// `Error::KeyNotFound` if there is no such element.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    /// use avl_collections::Error;
    ///
    /// let mut set = AvlSet::new().unwrap();
    /// set.insert(1).unwrap();
    /// assert_eq!(set.remove(&1), Ok(1));
    /// assert_eq!(set.remove(&1), Err(Error::KeyNotFound));
    /// ```
    pub fn remove(&mut self, key: &T) -> Result<T> {
        match tree::remove(&mut self.arena, self.root, key, &self.cmp) {
            Ok((root, element)) => {
                self.root = root;
                Ok(element)
            },
            Err(error) => {
                debug!("rejected remove: {}", error);
                Err(error)
            },
        }
    }

    /// Returns a reference to the element comparing equal to `key`, or `None` if there is no such
    /// element.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new().unwrap();
    /// set.insert(1).unwrap();
    /// assert_eq!(set.get(&0), None);
    /// assert_eq!(set.get(&1), Some(&1));
    /// ```
    pub fn get(&self, key: &T) -> Option<&T> {
        tree::get(&self.arena, self.root, key, &self.cmp).map(|handle| &self.arena[handle].element)
    }

    /// Returns a mutable reference to the element comparing equal to `key`, or `None` if there
    /// is no such element. The caller must not change how the element compares.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::with_comparator(|a: &(u32, u32), b: &(u32, u32)| a.0.cmp(&b.0))
    ///     .unwrap();
    /// set.insert((1, 1)).unwrap();
    /// if let Some(element) = set.get_mut(&(1, 0)) {
    ///     element.1 = 2;
    /// }
    /// assert_eq!(set.get(&(1, 0)), Some(&(1, 2)));
    /// ```
    pub fn get_mut(&mut self, key: &T) -> Option<&mut T> {
        tree::get(&self.arena, self.root, key, &self.cmp)
            .map(move |handle| &mut self.arena[handle].element)
    }

    /// Checks if an element comparing equal to `key` exists in the set.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new().unwrap();
    /// set.insert(1).unwrap();
    /// assert!(!set.contains(&0));
    /// assert!(set.contains(&1));
    /// ```
    pub fn contains(&self, key: &T) -> bool {
        self.get(key).is_some()
    }
}

impl<T, C> AvlSet<T, C> {
    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Returns `true` if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the height of the tree: `-1` for an empty set and `0` for a single element.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new().unwrap();
    /// assert_eq!(set.height(), -1);
    /// for key in 0..7 {
    ///     set.insert(key).unwrap();
    /// }
    /// assert_eq!(set.height(), 2);
    /// ```
    pub fn height(&self) -> i32 {
        tree::height(&self.arena, self.root)
    }

    /// Clears the set, removing all elements.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::AvlSet;
    ///
    /// let mut set = AvlSet::new().unwrap();
    /// set.insert(1).unwrap();
    /// set.insert(2).unwrap();
    /// set.clear();
    /// assert_eq!(set.is_empty(), true);
    /// ```
    pub fn clear(&mut self) {
        let root = self.root.take();
        tree::destroy(&mut self.arena, root);
    }

    /// Returns the minimum element of the set. Returns `None` if the set is empty.
    pub fn min(&self) -> Option<&T> {
        tree::min(&self.arena, self.root)
    }

    /// Returns the maximum element of the set. Returns `None` if the set is empty.
    pub fn max(&self) -> Option<&T> {
        tree::max(&self.arena, self.root)
    }

    /// Calls `visit` on every element of the set in the given order. An in-order traversal
    /// visits elements in ascending order.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::{AvlSet, TraversalOrder};
    ///
    /// let mut set = AvlSet::new().unwrap();
    /// for key in &[2, 1, 3] {
    ///     set.insert(*key).unwrap();
    /// }
    ///
    /// let mut keys = Vec::new();
    /// set.traverse(TraversalOrder::PreOrder, |key| keys.push(*key));
    /// assert_eq!(keys, vec![2, 1, 3]);
    /// ```
    pub fn traverse<F>(&self, order: TraversalOrder, mut visit: F)
    where
        F: FnMut(&T),
    {
        tree::traverse(&self.arena, self.root, order, &mut visit);
    }

    /// Calls `visit` on a mutable reference to every element of the set in the given order. The
    /// visitor must not change how any element compares.
    ///
    /// # Examples
    /// ```
    /// use avl_collections::avl_tree::{AvlSet, TraversalOrder};
    ///
    /// let mut set = AvlSet::with_comparator(|a: &(u32, u32), b: &(u32, u32)| a.0.cmp(&b.0))
    ///     .unwrap();
    /// set.insert((1, 0)).unwrap();
    /// set.insert((2, 0)).unwrap();
    /// set.traverse_mut(TraversalOrder::InOrder, |element| element.1 += 1);
    /// assert_eq!(set.max(), Some(&(2, 1)));
    /// ```
    pub fn traverse_mut<F>(&mut self, order: TraversalOrder, mut visit: F)
    where
        F: FnMut(&mut T),
    {
        tree::traverse_mut(&mut self.arena, self.root, order, &mut visit);
    }
}

impl<T, C> Drop for AvlSet<T, C> {
    fn drop(&mut self) {
        self.clear();
    }
}
