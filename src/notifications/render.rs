// SPDX-License-Identifier: MPL-2.0
//! Groups live toasts by screen position for the view layer.

use super::container::Toast;
use super::options::Position;

/// Anything that sits at a screen position.
pub trait Positioned {
    fn position(&self) -> Position;
}

impl Positioned for Toast {
    fn position(&self) -> Position {
        self.props.position
    }
}

/// Toasts sharing one position, in display order.
#[derive(Debug, Clone)]
pub struct ToastGroup<T = Toast> {
    pub position: Position,
    pub toasts: Vec<T>,
}

/// Buckets `items` by position.
///
/// Groups appear in the order their first member appears; members keep
/// insertion order, or its reverse when `newest_on_top` is set. An empty
/// input yields no groups.
#[must_use]
pub fn group_by_position<T: Positioned>(mut items: Vec<T>, newest_on_top: bool) -> Vec<ToastGroup<T>> {
    if newest_on_top {
        items.reverse();
    }

    let mut groups: Vec<ToastGroup<T>> = Vec::new();
    for item in items {
        let position = item.position();
        match groups.iter_mut().find(|group| group.position == position) {
            Some(group) => group.toasts.push(item),
            None => groups.push(ToastGroup {
                position,
                toasts: vec![item],
            }),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item(&'static str, Position);

    impl Positioned for Item {
        fn position(&self) -> Position {
            self.1
        }
    }

    fn names(group: &ToastGroup<Item>) -> Vec<&'static str> {
        group.toasts.iter().map(|item| item.0).collect()
    }

    #[test]
    fn empty_input_has_no_groups() {
        assert!(group_by_position(Vec::<Item>::new(), false).is_empty());
        assert!(group_by_position(Vec::<Item>::new(), true).is_empty());
    }

    #[test]
    fn groups_preserve_insertion_order() {
        let items = vec![
            Item("a", Position::TopRight),
            Item("b", Position::BottomLeft),
            Item("c", Position::TopRight),
        ];
        let groups = group_by_position(items, false);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].position, Position::TopRight);
        assert_eq!(names(&groups[0]), vec!["a", "c"]);
        assert_eq!(groups[1].position, Position::BottomLeft);
        assert_eq!(names(&groups[1]), vec!["b"]);
    }

    #[test]
    fn newest_on_top_reverses_within_groups() {
        let items = vec![
            Item("a", Position::TopRight),
            Item("b", Position::BottomLeft),
            Item("c", Position::TopRight),
        ];
        let groups = group_by_position(items, true);

        assert_eq!(groups[0].position, Position::TopRight);
        assert_eq!(names(&groups[0]), vec!["c", "a"]);
        assert_eq!(names(&groups[1]), vec!["b"]);
    }
}
