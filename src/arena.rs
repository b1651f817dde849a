//! Chunked node storage with fallible growth.

use crate::error::{Error, Result};
use std::cmp;
use std::mem;
use std::ops::{Index, IndexMut};
use std::vec::Vec;

/// A handle to an object stored in a `TypedArena<T>`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Handle {
    chunk_index: usize,
    block_index: usize,
}

enum Block<T> {
    Occupied(T),
    Vacant(Option<Handle>),
}

/// An allocator that stores a single type of object in fixed-size chunks.
///
/// Objects never move once allocated: when every chunk is full, a new chunk is added instead of
/// growing an existing one. Freed slots are threaded onto a free list and reused before the arena
/// grows. Growth can be requested ahead of time with `try_reserve`, which reports allocation
/// failure as an error instead of aborting.
///
/// # Examples
///
/// ```
/// use avl_collections::arena::TypedArena;
///
/// let mut arena = TypedArena::new(64);
/// arena.try_reserve().unwrap();
///
/// let x = arena.allocate(1);
/// assert_eq!(arena[x], 1);
///
/// arena[x] += 1;
/// assert_eq!(arena.free(x), 2);
/// assert!(arena.is_empty());
/// ```
pub struct TypedArena<T> {
    head: Option<Handle>,
    chunks: Vec<Vec<Block<T>>>,
    chunk_size: usize,
    size: usize,
    capacity: usize,
}

impl<T> TypedArena<T> {
    fn is_valid_handle(&self, handle: Handle) -> bool {
        handle.chunk_index < self.chunks.len()
            && handle.block_index < self.chunks[handle.chunk_index].len()
    }

    fn has_vacancy(&self) -> bool {
        self.head.is_some() || self.size < self.capacity
    }

    /// Constructs a new, empty `TypedArena<T>` holding `chunk_size` objects per chunk. A chunk
    /// size of zero is treated as one.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::arena::TypedArena;
    ///
    /// let arena: TypedArena<u32> = TypedArena::new(1024);
    /// assert_eq!(arena.len(), 0);
    /// ```
    pub fn new(chunk_size: usize) -> Self {
        TypedArena {
            head: None,
            chunks: Vec::new(),
            chunk_size: cmp::max(chunk_size, 1),
            size: 0,
            capacity: 0,
        }
    }

    /// Ensures that the next call to `allocate` will not allocate memory. Returns
    /// `Error::AllocFailed` if a new chunk was needed and could not be allocated, in which case
    /// the arena is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::arena::TypedArena;
    ///
    /// let mut arena: TypedArena<u32> = TypedArena::new(16);
    /// assert!(arena.try_reserve().is_ok());
    /// ```
    pub fn try_reserve(&mut self) -> Result<()> {
        if self.has_vacancy() {
            return Ok(());
        }

        let mut chunk = Vec::new();
        chunk
            .try_reserve_exact(self.chunk_size)
            .map_err(|_| Error::AllocFailed)?;
        self.chunks.try_reserve(1).map_err(|_| Error::AllocFailed)?;
        self.chunks.push(chunk);
        self.capacity += self.chunk_size;
        Ok(())
    }

    /// Allocates an object in the arena and returns its handle. Vacant slots are reused before a
    /// new chunk is added.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.get(x), Some(&0));
    /// ```
    pub fn allocate(&mut self, value: T) -> Handle {
        if !self.has_vacancy() {
            self.chunks.push(Vec::with_capacity(self.chunk_size));
            self.capacity += self.chunk_size;
        }
        self.size += 1;

        match self.head.take() {
            None => {
                let chunk_count = self.chunks.len();
                let last_chunk = &mut self.chunks[chunk_count - 1];
                last_chunk.push(Block::Occupied(value));
                Handle {
                    chunk_index: chunk_count - 1,
                    block_index: last_chunk.len() - 1,
                }
            },
            Some(handle) => {
                let vacant_block = mem::replace(
                    &mut self.chunks[handle.chunk_index][handle.block_index],
                    Block::Occupied(value),
                );

                match vacant_block {
                    Block::Vacant(next_handle) => {
                        self.head = next_handle;
                        handle
                    },
                    Block::Occupied(_) => panic!("Expected a vacant block."),
                }
            },
        }
    }

    /// Deallocates an object in the arena and returns it.
    ///
    /// # Panics
    ///
    /// Panics if the handle corresponds to an invalid or vacant slot.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::arena::TypedArena;
    ///
    /// let mut arena = TypedArena::new(1024);
    /// let x = arena.allocate(0);
    /// assert_eq!(arena.free(x), 0);
    /// ```
    pub fn free(&mut self, handle: Handle) -> T {
        if !self.is_valid_handle(handle) {
            panic!("Error: attempting to free invalid block.");
        }
        let old_block = mem::replace(
            &mut self.chunks[handle.chunk_index][handle.block_index],
            Block::Vacant(self.head),
        );
        match old_block {
            Block::Vacant(next_handle) => {
                self.chunks[handle.chunk_index][handle.block_index] = Block::Vacant(next_handle);
                panic!("Error: attempting to free vacant block.");
            },
            Block::Occupied(value) => {
                self.size -= 1;
                self.head = Some(handle);
                value
            },
        }
    }

    /// Returns an immutable reference to an object in the arena, or `None` if the handle does not
    /// correspond to a live object.
    pub fn get(&self, handle: Handle) -> Option<&T> {
        if !self.is_valid_handle(handle) {
            return None;
        }
        match self.chunks[handle.chunk_index][handle.block_index] {
            Block::Occupied(ref value) => Some(value),
            Block::Vacant(_) => None,
        }
    }

    /// Returns a mutable reference to an object in the arena, or `None` if the handle does not
    /// correspond to a live object.
    pub fn get_mut(&mut self, handle: Handle) -> Option<&mut T> {
        if !self.is_valid_handle(handle) {
            return None;
        }
        match self.chunks[handle.chunk_index][handle.block_index] {
            Block::Occupied(ref mut value) => Some(value),
            Block::Vacant(_) => None,
        }
    }

    /// Sets the number of objects held by chunks allocated from now on. Existing chunks are not
    /// resized. A chunk size of zero is treated as one.
    pub fn set_chunk_size(&mut self, chunk_size: usize) {
        self.chunk_size = cmp::max(chunk_size, 1);
    }

    /// Returns the number of live objects in the arena.
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns `true` if the arena holds no live objects.
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }
}

impl<T> Index<Handle> for TypedArena<T> {
    type Output = T;

    fn index(&self, handle: Handle) -> &Self::Output {
        self.get(handle).expect("Error: handle out of bounds.")
    }
}

impl<T> IndexMut<Handle> for TypedArena<T> {
    fn index_mut(&mut self, handle: Handle) -> &mut Self::Output {
        self.get_mut(handle).expect("Error: handle out of bounds.")
    }
}

#[cfg(test)]
mod tests {
    use super::{Handle, TypedArena};
    use crate::error::Error;

    #[test]
    #[should_panic]
    fn test_free_invalid_block() {
        let mut arena: TypedArena<u32> = TypedArena::new(1024);
        arena.free(Handle {
            chunk_index: 0,
            block_index: 0,
        });
    }

    #[test]
    #[should_panic]
    fn test_free_vacant_block() {
        let mut arena = TypedArena::new(1024);
        let x = arena.allocate(0);
        arena.allocate(1);
        arena.free(x);
        arena.free(x);
    }

    #[test]
    fn test_allocate_multiple_chunks() {
        let mut arena = TypedArena::new(2);
        assert_eq!(
            arena.allocate(0),
            Handle {
                chunk_index: 0,
                block_index: 0
            },
        );
        assert_eq!(
            arena.allocate(0),
            Handle {
                chunk_index: 0,
                block_index: 1
            },
        );
        assert_eq!(
            arena.allocate(0),
            Handle {
                chunk_index: 1,
                block_index: 0
            },
        );
        assert_eq!(arena.len(), 3);
    }

    #[test]
    fn test_free_reuses_slot() {
        let mut arena = TypedArena::new(1024);
        let x = arena.allocate(0);
        arena.allocate(1);
        assert_eq!(arena.free(x), 0);
        assert_eq!(arena.allocate(2), x);
        assert_eq!(arena[x], 2);
    }

    #[test]
    fn test_try_reserve() {
        let mut arena = TypedArena::new(2);
        assert!(arena.try_reserve().is_ok());
        assert_eq!(arena.chunks.len(), 1);
        arena.allocate(0);
        assert!(arena.try_reserve().is_ok());
        arena.allocate(1);
        assert_eq!(arena.chunks.len(), 1);
        assert!(arena.try_reserve().is_ok());
        assert_eq!(arena.chunks.len(), 2);
    }

    #[test]
    fn test_try_reserve_with_vacancy() {
        let mut arena = TypedArena::new(1);
        let x = arena.allocate(0);
        arena.free(x);
        assert!(arena.try_reserve().is_ok());
        assert_eq!(arena.chunks.len(), 1);
    }

    #[test]
    fn test_get_vacant_block() {
        let mut arena = TypedArena::new(1024);
        let x = arena.allocate(0);
        arena.free(x);
        assert_eq!(arena.get(x), None);
    }

    #[test]
    fn test_get_mut() {
        let mut arena = TypedArena::new(1024);
        let x = arena.allocate(0);
        if let Some(value) = arena.get_mut(x) {
            *value = 1;
        }
        assert_eq!(arena.get(x), Some(&1));
    }

    #[test]
    fn test_try_reserve_overflow() {
        let mut arena = TypedArena::new(1);
        arena.allocate(0u64);
        arena.set_chunk_size(usize::MAX);
        assert_eq!(arena.try_reserve(), Err(Error::AllocFailed));
        assert_eq!(arena.chunks.len(), 1);
        assert_eq!(arena.len(), 1);
    }

    #[test]
    fn test_zero_chunk_size() {
        let mut arena = TypedArena::new(0);
        arena.allocate(0);
        arena.allocate(1);
        assert_eq!(arena.len(), 2);
    }
}
