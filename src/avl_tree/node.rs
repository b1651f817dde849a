use crate::avl_tree::tree::Tree;

/// A struct representing an internal node of an avl tree.
pub struct Node<T> {
    pub element: T,
    pub height: i32,
    pub left: Tree,
    pub right: Tree,
}

impl<T> Node<T> {
    pub fn new(element: T) -> Self {
        Node {
            element,
            height: 0,
            left: None,
            right: None,
        }
    }
}
