//! List algorithms over the tracked sequence
//!
//! The tracked list is one global sequence; each status forms a partition
//! whose relative order is what the user sees. These functions operate on
//! the global sequence and never touch entries outside the partition they
//! are asked about.

use thiserror::Error;

use crate::models::{Book, Status};

/// Errors from list operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ListError {
    /// A partition index was outside `0..len`
    #[error("Index {index} is out of range for '{status}' ({len} book(s))")]
    IndexOutOfRange {
        status: Status,
        index: usize,
        len: usize,
    },
}

/// Books with the given status, in list order
pub fn partition(books: &[Book], status: Status) -> Vec<&Book> {
    books.iter().filter(|b| b.status == status).collect()
}

/// Move one entry within a status partition
///
/// Takes the partition for `status`, moves the element at `from` so it ends
/// up at `to`, and writes the partition back into the slots previously held
/// by that status. Entries with other statuses keep their slots.
///
/// Both indices must be below the partition length; otherwise the list is
/// left untouched and an error is returned.
pub fn reorder_partition(
    books: &mut [Book],
    status: Status,
    from: usize,
    to: usize,
) -> Result<(), ListError> {
    let slots: Vec<usize> = books
        .iter()
        .enumerate()
        .filter(|(_, b)| b.status == status)
        .map(|(i, _)| i)
        .collect();

    let len = slots.len();
    for index in [from, to] {
        if index >= len {
            return Err(ListError::IndexOutOfRange { status, index, len });
        }
    }

    if from == to {
        return Ok(());
    }

    let mut reordered: Vec<Book> = slots.iter().map(|&i| books[i].clone()).collect();
    let moved = reordered.remove(from);
    reordered.insert(to, moved);

    for (slot, book) in slots.into_iter().zip(reordered) {
        books[slot] = book;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(key: &str, status: Status) -> Book {
        Book::new(key, key).with_status(status)
    }

    fn keys(books: &[Book]) -> Vec<&str> {
        books.iter().map(|b| b.key.as_str()).collect()
    }

    fn keys_with(books: &[Book], status: Status) -> Vec<&str> {
        partition(books, status)
            .into_iter()
            .map(|b| b.key.as_str())
            .collect()
    }

    #[test]
    fn test_partition_preserves_order() {
        let books = vec![
            book("A", Status::Backlog),
            book("B", Status::Done),
            book("C", Status::Backlog),
        ];
        assert_eq!(keys_with(&books, Status::Backlog), vec!["A", "C"]);
        assert_eq!(keys_with(&books, Status::Done), vec!["B"]);
        assert!(partition(&books, Status::InProgress).is_empty());
    }

    #[test]
    fn test_reorder_swaps_within_partition() {
        let mut books = vec![
            book("A", Status::Backlog),
            book("B", Status::Backlog),
            book("C", Status::InProgress),
        ];

        reorder_partition(&mut books, Status::Backlog, 0, 1).unwrap();

        assert_eq!(keys(&books), vec!["B", "A", "C"]);
        assert_eq!(books[2].status, Status::InProgress);
    }

    #[test]
    fn test_reorder_keeps_other_partition_order() {
        let mut books = vec![
            book("a1", Status::Backlog),
            book("b1", Status::Done),
            book("a2", Status::Backlog),
            book("b2", Status::Done),
            book("a3", Status::Backlog),
            book("b3", Status::Done),
        ];

        reorder_partition(&mut books, Status::Backlog, 2, 0).unwrap();

        assert_eq!(keys_with(&books, Status::Backlog), vec!["a3", "a1", "a2"]);
        assert_eq!(keys_with(&books, Status::Done), vec!["b1", "b2", "b3"]);
        // Done entries stay in their original slots
        assert_eq!(keys(&books), vec!["a3", "b1", "a1", "b2", "a2", "b3"]);
    }

    #[test]
    fn test_reorder_to_same_index_is_noop() {
        let mut books = vec![
            book("A", Status::Backlog),
            book("B", Status::Backlog),
            book("C", Status::Backlog),
        ];
        let before = books.clone();

        for i in 0..3 {
            reorder_partition(&mut books, Status::Backlog, i, i).unwrap();
            assert_eq!(books, before);
        }
    }

    #[test]
    fn test_reorder_move_down_past_several() {
        let mut books = vec![
            book("A", Status::InProgress),
            book("B", Status::InProgress),
            book("C", Status::InProgress),
            book("D", Status::InProgress),
        ];

        reorder_partition(&mut books, Status::InProgress, 0, 3).unwrap();
        assert_eq!(keys(&books), vec!["B", "C", "D", "A"]);
    }

    #[test]
    fn test_reorder_rejects_out_of_range() {
        let mut books = vec![book("A", Status::Backlog), book("B", Status::Done)];
        let before = books.clone();

        let err = reorder_partition(&mut books, Status::Backlog, 0, 1).unwrap_err();
        assert_eq!(
            err,
            ListError::IndexOutOfRange {
                status: Status::Backlog,
                index: 1,
                len: 1
            }
        );

        let err = reorder_partition(&mut books, Status::InProgress, 0, 0).unwrap_err();
        assert!(matches!(err, ListError::IndexOutOfRange { len: 0, .. }));

        assert_eq!(books, before);
    }

    #[test]
    fn test_error_display() {
        let err = ListError::IndexOutOfRange {
            status: Status::Done,
            index: 5,
            len: 2,
        };
        let msg = err.to_string();
        assert!(msg.contains("5"));
        assert!(msg.contains("done"));
    }
}
