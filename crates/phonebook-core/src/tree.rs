//! The unbalanced binary search tree behind the [`Directory`](crate::Directory).
//!
//! Every node exclusively owns its two subtrees. Nodes are keyed on
//! [`compare_names`]; shape depends only on insertion order.

use std::{cmp::Ordering, rc::Rc};

use crate::contact::{Contact, compare_names};

pub type Subtree = Option<Box<Node>>;

#[derive(Debug)]
pub struct Node {
  pub(crate) contact: Rc<Contact>,
  pub(crate) left:    Subtree,
  pub(crate) right:   Subtree,
}

impl Node {
  fn new(contact: Rc<Contact>) -> Self {
    Self {
      contact,
      left: None,
      right: None,
    }
  }

  pub fn contact(&self) -> &Rc<Contact> { &self.contact }

  fn leftmost(&self) -> &Node {
    let mut node = self;
    while let Some(left) = node.left.as_deref() {
      node = left;
    }
    node
  }
}

/// Outcome of [`insert`].
#[derive(Debug, Clone)]
pub enum Insertion {
  /// A new node now holds this contact.
  Added(Rc<Contact>),
  /// A contact with the same name (ignoring case) was already present; it is
  /// returned and the tree is unchanged.
  Duplicate(Rc<Contact>),
}

impl Insertion {
  pub fn is_added(&self) -> bool { matches!(self, Self::Added(_)) }
}

// ─── Mutation ────────────────────────────────────────────────────────────────
//
// A tree built from sorted names is a single chain, so nothing below recurses
// per level.

pub(crate) fn insert(root: &mut Subtree, contact: Contact) -> Insertion {
  let mut slot = root;
  while let Some(node) = slot {
    slot = match compare_names(contact.name(), node.contact.name()) {
      Ordering::Less => &mut node.left,
      Ordering::Greater => &mut node.right,
      Ordering::Equal => return Insertion::Duplicate(Rc::clone(&node.contact)),
    };
  }

  let contact = Rc::new(contact);
  *slot = Some(Box::new(Node::new(Rc::clone(&contact))));
  Insertion::Added(contact)
}

/// The slot holding the node named `name`, following the insert path.
fn find_slot<'a>(mut slot: &'a mut Subtree, name: &str) -> Option<&'a mut Subtree> {
  loop {
    let ordering = compare_names(name, slot.as_ref()?.contact.name());
    slot = match ordering {
      Ordering::Less => &mut slot.as_mut()?.left,
      Ordering::Greater => &mut slot.as_mut()?.right,
      Ordering::Equal => return Some(slot),
    };
  }
}

/// Remove the contact named `name` and return it, or `None` if the search
/// path ends without a match.
///
/// A node with two children takes its in-order successor's contact, and the
/// successor is then removed from the right subtree by name.
pub(crate) fn remove(root: &mut Subtree, name: &str) -> Option<Rc<Contact>> {
  let slot = find_slot(root, name)?;
  let mut node = slot.take()?;
  match (node.left.take(), node.right.take()) {
    (None, child) | (child, None) => {
      *slot = child;
      Some(node.contact)
    }
    (Some(left), Some(right)) => {
      let successor = Rc::clone(&right.leftmost().contact);
      node.left = Some(left);
      node.right = Some(right);
      remove(&mut node.right, successor.name());
      let removed = std::mem::replace(&mut node.contact, successor);
      *slot = Some(node);
      Some(removed)
    }
  }
}

/// Number of levels, counted breadth-first.
pub(crate) fn height(root: &Subtree) -> usize {
  let mut level: Vec<&Node> = root.as_deref().into_iter().collect();
  let mut height = 0;
  while !level.is_empty() {
    height += 1;
    level = level
      .into_iter()
      .flat_map(|n| [n.left.as_deref(), n.right.as_deref()])
      .flatten()
      .collect();
  }
  height
}

/// Free every node without the nested drop glue of `Box<Node>` recursing once
/// per level.
pub(crate) fn dismantle(root: &mut Subtree) {
  let mut stack: Vec<Box<Node>> = root.take().into_iter().collect();
  while let Some(mut node) = stack.pop() {
    stack.extend(node.left.take());
    stack.extend(node.right.take());
  }
}

// ─── Traversal ───────────────────────────────────────────────────────────────

/// Left, node, right. Yields contacts sorted by name.
pub struct InOrder<'a> {
  stack: Vec<&'a Node>,
}

impl<'a> InOrder<'a> {
  pub(crate) fn new(root: Option<&'a Node>) -> Self {
    let mut iter = Self { stack: Vec::new() };
    iter.push_left_spine(root);
    iter
  }

  fn push_left_spine(&mut self, mut node: Option<&'a Node>) {
    while let Some(n) = node {
      self.stack.push(n);
      node = n.left.as_deref();
    }
  }
}

impl<'a> Iterator for InOrder<'a> {
  type Item = &'a Rc<Contact>;

  fn next(&mut self) -> Option<Self::Item> {
    let node = self.stack.pop()?;
    self.push_left_spine(node.right.as_deref());
    Some(&node.contact)
  }
}

/// Node, left, right. Order depends on tree shape, not on names.
pub struct PreOrder<'a> {
  stack: Vec<&'a Node>,
}

impl<'a> PreOrder<'a> {
  pub(crate) fn new(root: Option<&'a Node>) -> Self {
    Self {
      stack: root.into_iter().collect(),
    }
  }
}

impl<'a> Iterator for PreOrder<'a> {
  type Item = &'a Rc<Contact>;

  fn next(&mut self) -> Option<Self::Item> {
    let node = self.stack.pop()?;
    self.stack.extend(node.right.as_deref());
    self.stack.extend(node.left.as_deref());
    Some(&node.contact)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn build(names: &[&str]) -> Subtree {
    let mut root = None;
    for name in names {
      insert(&mut root, Contact::new(*name, format!("+26481{name}")));
    }
    root
  }

  fn in_order(root: &Subtree) -> Vec<String> {
    InOrder::new(root.as_deref())
      .map(|c| c.name().to_owned())
      .collect()
  }

  fn pre_order(root: &Subtree) -> Vec<String> {
    PreOrder::new(root.as_deref())
      .map(|c| c.name().to_owned())
      .collect()
  }

  #[test]
  fn in_order_is_sorted() {
    let root = build(&["m", "c", "x", "a", "e", "z"]);
    assert_eq!(in_order(&root), ["a", "c", "e", "m", "x", "z"]);
  }

  #[test]
  fn pre_order_follows_shape() {
    let root = build(&["m", "c", "x", "a", "e", "z"]);
    assert_eq!(pre_order(&root), ["m", "c", "a", "e", "x", "z"]);
  }

  #[test]
  fn empty_traversals() {
    let root: Subtree = None;
    assert!(in_order(&root).is_empty());
    assert!(pre_order(&root).is_empty());
  }

  #[test]
  fn duplicate_keeps_first() {
    let mut root = build(&["bob"]);
    let result = insert(&mut root, Contact::new("BOB", "+264819"));
    let Insertion::Duplicate(existing) = result else {
      panic!("expected duplicate")
    };
    assert_eq!(existing.name(), "bob");
    assert_eq!(in_order(&root), ["bob"]);
  }

  #[test]
  fn remove_leaf() {
    let mut root = build(&["m", "c", "x"]);
    let removed = remove(&mut root, "C").unwrap();
    assert_eq!(removed.name(), "c");
    assert_eq!(in_order(&root), ["m", "x"]);
  }

  #[test]
  fn remove_node_with_one_child() {
    let mut root = build(&["m", "c", "a"]);
    remove(&mut root, "c").unwrap();
    assert_eq!(pre_order(&root), ["m", "a"]);
  }

  #[test]
  fn remove_node_with_two_children_moves_successor_value() {
    let mut root = build(&["m", "c", "x", "a", "e", "d", "f"]);
    let removed = remove(&mut root, "c").unwrap();
    assert_eq!(removed.name(), "c");
    // "d" is the smallest name under "c"'s right subtree and takes its place.
    assert_eq!(pre_order(&root), ["m", "d", "a", "e", "f", "x"]);
    assert_eq!(in_order(&root), ["a", "d", "e", "f", "m", "x"]);
  }

  #[test]
  fn successor_with_right_child_is_spliced_out() {
    let mut root = build(&["m", "c", "x", "a", "e", "f"]);
    remove(&mut root, "c").unwrap();
    // "e" takes "c"'s place and its right child "f" takes "e"'s.
    assert_eq!(pre_order(&root), ["m", "e", "a", "f", "x"]);
    assert_eq!(in_order(&root), ["a", "e", "f", "m", "x"]);
  }

  #[test]
  fn remove_root_with_two_children() {
    let mut root = build(&["m", "c", "x", "p"]);
    remove(&mut root, "m").unwrap();
    assert_eq!(pre_order(&root), ["p", "c", "x"]);
  }

  #[test]
  fn remove_missing_leaves_tree_unchanged() {
    let mut root = build(&["m", "c", "x"]);
    assert!(remove(&mut root, "q").is_none());
    assert_eq!(pre_order(&root), ["m", "c", "x"]);
  }

  #[test]
  fn remove_last_empties_tree() {
    let mut root = build(&["m"]);
    remove(&mut root, "m").unwrap();
    assert!(root.is_none());
  }

  #[test]
  fn sorted_insertion_degenerates() {
    let root = build(&["a", "b", "c", "d", "e"]);
    assert_eq!(height(&root), 5);
    let root = build(&["c", "b", "d", "a", "e"]);
    assert_eq!(height(&root), 3);
    assert_eq!(height(&None), 0);
  }

  #[test]
  fn dismantle_empties_tree() {
    let mut root = build(&["m", "c", "x", "a"]);
    dismantle(&mut root);
    assert!(root.is_none());
  }
}
