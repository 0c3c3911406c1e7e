//! Binary search tree of courses keyed by course id.
//!
//! Nodes own their children outright (`Option<Box<Node>>`), so the tree is a
//! strict ownership hierarchy rooted at [`CourseTree`]. Insertion order decides
//! the shape: there is no rebalancing, and sorted input degrades the tree into
//! a list with O(n) search.

use std::cmp::Ordering;
use std::io::{self, Write};
use std::mem;

use termtree::Tree;
use tracing::{debug, info, instrument, warn};

use crate::domain::entities::Course;
use crate::domain::error::{DomainError, DomainResult};

type Link = Option<Box<Node>>;

#[derive(Debug)]
struct Node {
    course: Course,
    left: Link,
    right: Link,
}

impl Node {
    fn new(course: Course) -> Box<Self> {
        Box::new(Self {
            course,
            left: None,
            right: None,
        })
    }
}

/// Ordered course store.
///
/// Ordering invariant: ids in a node's left subtree compare less than the
/// node's id, ids in its right subtree compare greater or equal. Duplicate ids
/// are routed right and coexist.
#[derive(Debug, Default)]
pub struct CourseTree {
    root: Link,
    len: usize,
}

impl CourseTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, duplicates included.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Insert a course, descending left on `<` and right otherwise.
    #[instrument(level = "trace", skip(self, course), fields(id = %course.id))]
    pub fn insert(&mut self, course: Course) {
        let mut slot = &mut self.root;
        while let Some(node) = slot {
            slot = if course.id < node.course.id {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *slot = Some(Node::new(course));
        self.len += 1;
    }

    /// Borrow the record stored under `id`, if any.
    pub fn get(&self, id: &str) -> Option<&Course> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match id.cmp(node.course.id.as_str()) {
                Ordering::Equal => return Some(&node.course),
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => current = node.right.as_deref(),
            }
        }
        None
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Exact-match lookup returning a copy of the record, or the empty-id
    /// sentinel (`Course::default()`) when `id` is absent.
    ///
    /// No case normalization happens here.
    #[instrument(level = "trace", skip(self))]
    pub fn search(&self, id: &str) -> Course {
        self.get(id).cloned().unwrap_or_default()
    }

    /// Ascending-id traversal. Each call starts a fresh walk.
    pub fn iter(&self) -> InOrder<'_> {
        InOrder::new(self.root.as_deref())
    }

    /// Write one `"<id>, <name>"` line per course in ascending order.
    pub fn display_in_order<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for course in self {
            writeln!(out, "{course}")?;
        }
        Ok(())
    }

    /// True if any stored course lists `id` as a prerequisite.
    ///
    /// Prerequisites are not the sort key, so this scans every node.
    #[instrument(level = "debug", skip(self))]
    pub fn has_dependents(&self, id: &str) -> bool {
        self.iter().any(|course| course.lists_prerequisite(id))
    }

    /// All stored courses listing `id` as a prerequisite, in id order.
    pub fn dependents(&self, id: &str) -> Vec<&Course> {
        self.iter()
            .filter(|course| course.lists_prerequisite(id))
            .collect()
    }

    /// Remove `id` unless it is missing or still required by another course.
    ///
    /// Returns the removed record. On error the tree is left untouched.
    #[instrument(level = "debug", skip(self))]
    pub fn try_delete(&mut self, id: &str) -> DomainResult<Course> {
        if !self.contains(id) {
            return Err(DomainError::CourseNotFound(id.to_string()));
        }

        if self.has_dependents(id) {
            let dependents = self
                .dependents(id)
                .into_iter()
                .map(|course| course.id.clone())
                .collect();
            return Err(DomainError::DependencyConflict {
                id: id.to_string(),
                dependents,
            });
        }

        let removed = remove(&mut self.root, id)
            .ok_or_else(|| DomainError::CourseNotFound(id.to_string()))?;
        self.len -= 1;
        debug!("removed {}, {} course(s) left", removed.id, self.len);
        Ok(removed)
    }

    /// Boolean form of [`try_delete`](Self::try_delete).
    ///
    /// The failure reason (not found or dependency conflict) is emitted as a
    /// warning event.
    pub fn delete_with_dependency_check(&mut self, id: &str) -> bool {
        match self.try_delete(id) {
            Ok(_) => {
                info!("{id} has been successfully deleted");
                true
            }
            Err(e) => {
                warn!("{e}");
                false
            }
        }
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn height(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(&Node, usize)> =
            self.root.as_deref().map(|n| (n, 1)).into_iter().collect();
        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            stack.extend(node.left.as_deref().map(|n| (n, depth + 1)));
            stack.extend(node.right.as_deref().map(|n| (n, depth + 1)));
        }
        max_depth
    }

    /// Release every node.
    pub fn clear(&mut self) {
        // Iterative so a list-shaped tree does not recurse once per node on drop
        let mut stack: Vec<Box<Node>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
        self.len = 0;
    }

    /// Render the tree shape, children labelled `L:`/`R:`.
    pub fn to_termtree(&self) -> Option<Tree<String>> {
        self.root
            .as_deref()
            .map(|root| shape(root, root.course.id.clone()))
    }
}

impl Drop for CourseTree {
    fn drop(&mut self) {
        self.clear();
    }
}

impl Extend<Course> for CourseTree {
    fn extend<I: IntoIterator<Item = Course>>(&mut self, courses: I) {
        for course in courses {
            self.insert(course);
        }
    }
}

impl FromIterator<Course> for CourseTree {
    fn from_iter<I: IntoIterator<Item = Course>>(courses: I) -> Self {
        let mut tree = CourseTree::new();
        tree.extend(courses);
        tree
    }
}

impl<'a> IntoIterator for &'a CourseTree {
    type Item = &'a Course;
    type IntoIter = InOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy in-order iterator over a [`CourseTree`].
pub struct InOrder<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> InOrder<'a> {
    fn new(root: Option<&'a Node>) -> Self {
        let mut iter = Self { stack: Vec::new() };
        iter.push_left_spine(root);
        iter
    }

    fn push_left_spine(&mut self, mut node: Option<&'a Node>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a> Iterator for InOrder<'a> {
    type Item = &'a Course;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right.as_deref());
        Some(&node.course)
    }
}

/// Remove the first node on the search path for `id` and return its record.
fn remove(root: &mut Link, id: &str) -> Option<Course> {
    let mut slot = root;
    loop {
        match id.cmp(slot.as_deref()?.course.id.as_str()) {
            Ordering::Equal => break,
            Ordering::Less => slot = &mut slot.as_mut()?.left,
            Ordering::Greater => slot = &mut slot.as_mut()?.right,
        }
    }

    let node = slot.as_mut()?;
    if node.left.is_some() && node.right.is_some() {
        // In-order successor: leftmost record of the right subtree
        let successor = detach_min(&mut node.right)?;
        return Some(mem::replace(&mut node.course, successor));
    }

    let Node {
        course,
        left,
        right,
    } = *slot.take()?;
    *slot = left.or(right);
    Some(course)
}

/// Detach the leftmost node below `subtree` and return its record. The
/// leftmost node has no left child, so its right child takes its place.
fn detach_min(subtree: &mut Link) -> Option<Course> {
    let mut slot = subtree;
    while slot.as_deref()?.left.is_some() {
        slot = &mut slot.as_mut()?.left;
    }
    let Node { course, right, .. } = *slot.take()?;
    *slot = right;
    Some(course)
}

fn shape(node: &Node, label: String) -> Tree<String> {
    let mut tree = Tree::new(label);
    if node.left.is_none() && node.right.is_none() {
        return tree;
    }
    for (side, child) in [("L", node.left.as_deref()), ("R", node.right.as_deref())] {
        match child {
            Some(child) => tree.push(shape(child, format!("{side}: {}", child.course.id))),
            None => tree.push(Tree::new(format!("{side}: -"))),
        };
    }
    tree
}
