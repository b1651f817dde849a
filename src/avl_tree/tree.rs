use crate::arena::{Handle, TypedArena};
use crate::avl_tree::node::Node;
use crate::error::{Error, Result};
use log::trace;
use std::cmp::{self, Ordering};
use std::mem;

pub type Tree = Option<Handle>;
pub type Arena<T> = TypedArena<Node<T>>;

/// The order in which a traversal visits the elements of a tree.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TraversalOrder {
    /// Visits a node before its left and right subtrees.
    PreOrder,
    /// Visits the left subtree, then the node, then the right subtree. Elements are visited in
    /// ascending order.
    InOrder,
    /// Visits a node after its left and right subtrees.
    PostOrder,
}

pub fn height<T>(arena: &Arena<T>, tree: Tree) -> i32 {
    match tree {
        None => -1,
        Some(handle) => arena[handle].height,
    }
}

pub fn balance_factor<T>(arena: &Arena<T>, tree: Tree) -> i32 {
    match tree {
        None => 0,
        Some(handle) => {
            let node = &arena[handle];
            height(arena, node.left) - height(arena, node.right)
        },
    }
}

fn children<T>(arena: &Arena<T>, handle: Handle) -> (Tree, Tree) {
    let node = &arena[handle];
    (node.left, node.right)
}

fn update<T>(arena: &mut Arena<T>, handle: Handle) {
    let new_height = {
        let node = &arena[handle];
        cmp::max(height(arena, node.left), height(arena, node.right)) + 1
    };
    arena[handle].height = new_height;
}

fn rotate_left<T>(arena: &mut Arena<T>, handle: Handle) -> Handle {
    let child = match arena[handle].right {
        Some(child) => child,
        None => unreachable!(),
    };
    arena[handle].right = arena[child].left;
    update(arena, handle);
    arena[child].left = Some(handle);
    update(arena, child);
    trace!("rotated left, subtree height {}", arena[child].height);
    child
}

fn rotate_right<T>(arena: &mut Arena<T>, handle: Handle) -> Handle {
    let child = match arena[handle].left {
        Some(child) => child,
        None => unreachable!(),
    };
    arena[handle].left = arena[child].right;
    update(arena, handle);
    arena[child].right = Some(handle);
    update(arena, child);
    trace!("rotated right, subtree height {}", arena[child].height);
    child
}

// The inserted key selects the rotation: it lies in the heavy grandchild's subtree.
fn balance_after_insert<T, C>(
    arena: &mut Arena<T>,
    handle: Handle,
    new_handle: Handle,
    cmp: &C,
) -> Handle
where
    C: Fn(&T, &T) -> Ordering,
{
    let balance = balance_factor(arena, Some(handle));

    if balance > 1 {
        let child = match arena[handle].left {
            Some(child) => child,
            None => unreachable!(),
        };
        if cmp(&arena[new_handle].element, &arena[child].element) == Ordering::Greater {
            arena[handle].left = Some(rotate_left(arena, child));
        }
        rotate_right(arena, handle)
    } else if balance < -1 {
        let child = match arena[handle].right {
            Some(child) => child,
            None => unreachable!(),
        };
        if cmp(&arena[new_handle].element, &arena[child].element) == Ordering::Less {
            arena[handle].right = Some(rotate_right(arena, child));
        }
        rotate_left(arena, handle)
    } else {
        handle
    }
}

// The removed key is gone, so the heavy child's balance factor selects the rotation.
fn balance_after_remove<T>(arena: &mut Arena<T>, handle: Handle) -> Handle {
    let balance = balance_factor(arena, Some(handle));

    if balance > 1 {
        let child = arena[handle].left;
        if let Some(child) = child {
            if balance_factor(arena, Some(child)) < 0 {
                arena[handle].left = Some(rotate_left(arena, child));
            }
        }
        rotate_right(arena, handle)
    } else if balance < -1 {
        let child = arena[handle].right;
        if let Some(child) = child {
            if balance_factor(arena, Some(child)) > 0 {
                arena[handle].right = Some(rotate_right(arena, child));
            }
        }
        rotate_left(arena, handle)
    } else {
        handle
    }
}

/// Links the already allocated node `new_handle` into `tree` and returns the new root of the
/// subtree. On error nothing has been relinked.
pub fn insert<T, C>(arena: &mut Arena<T>, tree: Tree, new_handle: Handle, cmp: &C) -> Result<Handle>
where
    C: Fn(&T, &T) -> Ordering,
{
    let handle = match tree {
        Some(handle) => handle,
        None => return Ok(new_handle),
    };

    let ordering = cmp(&arena[new_handle].element, &arena[handle].element);
    match ordering {
        Ordering::Less => {
            let left = arena[handle].left;
            let left = insert(arena, left, new_handle, cmp)?;
            arena[handle].left = Some(left);
        },
        Ordering::Greater => {
            let right = arena[handle].right;
            let right = insert(arena, right, new_handle, cmp)?;
            arena[handle].right = Some(right);
        },
        Ordering::Equal => return Err(Error::DuplicateKey),
    }

    update(arena, handle);
    Ok(balance_after_insert(arena, handle, new_handle, cmp))
}

// precondition: `handle` is the root of a non-empty tree
fn remove_min<T>(arena: &mut Arena<T>, handle: Handle) -> (Tree, Handle) {
    let left = arena[handle].left;
    match left {
        Some(left) => {
            let (left, min) = remove_min(arena, left);
            arena[handle].left = left;
            update(arena, handle);
            (Some(balance_after_remove(arena, handle)), min)
        },
        None => (arena[handle].right.take(), handle),
    }
}

/// Unlinks and frees the node comparing equal to `key`. Returns the new root of the subtree and
/// the removed element.
pub fn remove<T, C>(arena: &mut Arena<T>, tree: Tree, key: &T, cmp: &C) -> Result<(Tree, T)>
where
    C: Fn(&T, &T) -> Ordering,
{
    let handle = match tree {
        Some(handle) => handle,
        None => return Err(Error::KeyNotFound),
    };

    let ordering = cmp(key, &arena[handle].element);
    let removed = match ordering {
        Ordering::Less => {
            let left = arena[handle].left;
            let (left, removed) = remove(arena, left, key, cmp)?;
            arena[handle].left = left;
            removed
        },
        Ordering::Greater => {
            let right = arena[handle].right;
            let (right, removed) = remove(arena, right, key, cmp)?;
            arena[handle].right = right;
            removed
        },
        Ordering::Equal => match children(arena, handle) {
            (None, child) | (child, None) => {
                let node = arena.free(handle);
                return Ok((child, node.element));
            },
            (Some(_), Some(right)) => {
                let (right, successor) = remove_min(arena, right);
                arena[handle].right = right;
                let successor = arena.free(successor);
                mem::replace(&mut arena[handle].element, successor.element)
            },
        },
    };

    update(arena, handle);
    Ok((Some(balance_after_remove(arena, handle)), removed))
}

pub fn get<T, C>(arena: &Arena<T>, tree: Tree, key: &T, cmp: &C) -> Option<Handle>
where
    C: Fn(&T, &T) -> Ordering,
{
    tree.and_then(|handle| {
        let node = &arena[handle];
        match cmp(key, &node.element) {
            Ordering::Less => get(arena, node.left, key, cmp),
            Ordering::Greater => get(arena, node.right, key, cmp),
            Ordering::Equal => Some(handle),
        }
    })
}

pub fn min<T>(arena: &Arena<T>, tree: Tree) -> Option<&T> {
    tree.map(|handle| {
        let mut curr = &arena[handle];
        while let Some(left) = curr.left {
            curr = &arena[left];
        }
        &curr.element
    })
}

pub fn max<T>(arena: &Arena<T>, tree: Tree) -> Option<&T> {
    tree.map(|handle| {
        let mut curr = &arena[handle];
        while let Some(right) = curr.right {
            curr = &arena[right];
        }
        &curr.element
    })
}

pub fn traverse<T, F>(arena: &Arena<T>, tree: Tree, order: TraversalOrder, visit: &mut F)
where
    F: FnMut(&T),
{
    if let Some(handle) = tree {
        let node = &arena[handle];
        if order == TraversalOrder::PreOrder {
            visit(&node.element);
        }
        traverse(arena, node.left, order, visit);
        if order == TraversalOrder::InOrder {
            visit(&node.element);
        }
        traverse(arena, node.right, order, visit);
        if order == TraversalOrder::PostOrder {
            visit(&node.element);
        }
    }
}

pub fn traverse_mut<T, F>(arena: &mut Arena<T>, tree: Tree, order: TraversalOrder, visit: &mut F)
where
    F: FnMut(&mut T),
{
    if let Some(handle) = tree {
        let (left, right) = children(arena, handle);
        if order == TraversalOrder::PreOrder {
            visit(&mut arena[handle].element);
        }
        traverse_mut(arena, left, order, visit);
        if order == TraversalOrder::InOrder {
            visit(&mut arena[handle].element);
        }
        traverse_mut(arena, right, order, visit);
        if order == TraversalOrder::PostOrder {
            visit(&mut arena[handle].element);
        }
    }
}

/// Frees every node of `tree`, children before their parent.
pub fn destroy<T>(arena: &mut Arena<T>, tree: Tree) {
    if let Some(handle) = tree {
        let (left, right) = children(arena, handle);
        destroy(arena, left);
        destroy(arena, right);
        arena.free(handle);
    }
}

/// Checks the height, balance and ordering invariants of `tree` and returns its height.
#[cfg(test)]
pub fn validate<T, C>(arena: &Arena<T>, tree: Tree, cmp: &C) -> i32
where
    C: Fn(&T, &T) -> Ordering,
{
    match tree {
        None => -1,
        Some(handle) => {
            let node = &arena[handle];
            if let Some(left) = node.left {
                assert_eq!(cmp(&arena[left].element, &node.element), Ordering::Less);
                let max_key = max(arena, node.left).map(|key| cmp(key, &node.element));
                assert_eq!(max_key, Some(Ordering::Less));
            }
            if let Some(right) = node.right {
                assert_eq!(cmp(&arena[right].element, &node.element), Ordering::Greater);
                let min_key = min(arena, node.right).map(|key| cmp(key, &node.element));
                assert_eq!(min_key, Some(Ordering::Greater));
            }
            let left_height = validate(arena, node.left, cmp);
            let right_height = validate(arena, node.right, cmp);
            assert!((left_height - right_height).abs() <= 1);
            assert_eq!(node.height, cmp::max(left_height, right_height) + 1);
            node.height
        },
    }
}
