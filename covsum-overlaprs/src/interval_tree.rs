use num_traits::{PrimInt, Unsigned};

use super::Overlapper;
use covsum_core::models::Interval;

/// One node of the centered tree. Every interval stored here contains `center`.
#[derive(Debug, Clone)]
struct Node<I> {
    center: I,
    /// Indices into the tree's interval list, ascending start.
    by_start: Vec<usize>,
    /// The same indices, descending end.
    by_end: Vec<usize>,
    left: Option<usize>,
    right: Option<usize>,
}

/// A centered interval tree for overlap queries over the alignments of one reference.
///
/// Each node picks the median start of the intervals it is handed as its center.
/// Intervals containing the center (`start <= center < end`) stay at the node,
/// the ones ending at or before it go left and the ones starting after it go right.
/// Nodes live in a flat arena and link to their children by index.
///
/// Queries report every interval satisfying `start < q_end && q_start < end`, in
/// no particular order, in `O(log n + k)` expected time. Duplicate intervals are
/// indexed (and reported) once per copy.
///
/// Empty or inverted intervals (`end <= start`) cover no position and are
/// dropped at build time.
///
/// # Examples
///
/// ```
/// use covsum_overlaprs::{IntervalTree, Overlapper, Interval};
///
/// let reads = vec![
///     Interval { start: 5u32, end: 10, val: () },
///     Interval { start: 5, end: 11, val: () },
///     Interval { start: 10, end: 15, val: () },
///     Interval { start: 20, end: 25, val: () },
/// ];
///
/// let tree = IntervalTree::build(reads);
///
/// assert_eq!(tree.count(10, 11), 2);
/// assert_eq!(tree.count(25, 26), 0);
/// ```
#[derive(Debug, Clone)]
pub struct IntervalTree<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    intervals: Vec<Interval<I, T>>,
    nodes: Vec<Node<I>>,
}

impl<I, T> Overlapper<I, T> for IntervalTree<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    fn build(intervals: Vec<Interval<I, T>>) -> Self
    where
        Self: Sized,
    {
        let intervals: Vec<Interval<I, T>> =
            intervals.into_iter().filter(|iv| !iv.is_empty()).collect();

        let mut nodes: Vec<Node<I>> = Vec::new();

        // (members, parent index, is left child)
        let mut pending: Vec<(Vec<usize>, Option<(usize, bool)>)> = Vec::new();
        if !intervals.is_empty() {
            pending.push(((0..intervals.len()).collect(), None));
        }

        while let Some((members, parent)) = pending.pop() {
            let (node, left, right) = Self::split(&intervals, members);
            let idx = nodes.len();
            nodes.push(node);

            if let Some((parent, is_left)) = parent {
                if is_left {
                    nodes[parent].left = Some(idx);
                } else {
                    nodes[parent].right = Some(idx);
                }
            }

            if !left.is_empty() {
                pending.push((left, Some((idx, true))));
            }
            if !right.is_empty() {
                pending.push((right, Some((idx, false))));
            }
        }

        IntervalTree { intervals, nodes }
    }

    fn find(&self, start: I, end: I) -> Vec<Interval<I, T>> {
        self.iter_find(start, end).cloned().collect()
    }

    fn find_iter<'a>(
        &'a self,
        start: I,
        end: I,
    ) -> Box<dyn Iterator<Item = &'a Interval<I, T>> + 'a> {
        Box::new(self.iter_find(start, end))
    }
}

impl<I, T> IntervalTree<I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync,
{
    /// Partition `members` around their median start.
    ///
    /// Returns the node holding the intervals that contain the center, plus the
    /// members to hand to the left and right children. The interval whose start
    /// is the median always contains the center, so every node is non-empty.
    fn split(
        intervals: &[Interval<I, T>],
        mut members: Vec<usize>,
    ) -> (Node<I>, Vec<usize>, Vec<usize>) {
        members.sort_unstable_by_key(|&i| intervals[i].start);
        let center = intervals[members[members.len() / 2]].start;

        let mut by_start = Vec::new();
        let mut left = Vec::new();
        let mut right = Vec::new();

        for i in members {
            let iv = &intervals[i];
            if iv.end <= center {
                left.push(i);
            } else if iv.start > center {
                right.push(i);
            } else {
                by_start.push(i);
            }
        }

        let mut by_end = by_start.clone();
        by_end.sort_unstable_by(|&a, &b| intervals[b].end.cmp(&intervals[a].end));

        let node = Node {
            center,
            by_start,
            by_end,
            left: None,
            right: None,
        };
        (node, left, right)
    }

    /// Concrete form of [`Overlapper::find_iter`].
    pub fn iter_find(&self, start: I, end: I) -> IterFind<'_, I, T> {
        IterFind::new(self, start, end)
    }

    /// Number of intervals overlapping `[start, end)`, without allocating.
    pub fn count(&self, start: I, end: I) -> usize {
        self.iter_find(start, end).count()
    }

    /// Returns the number of intervals in the tree.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Returns `true` if the tree contains no intervals.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Length of the longest root-to-leaf path. Zero for an empty tree.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = Vec::new();
        if !self.nodes.is_empty() {
            stack.push((0usize, 1usize));
        }
        while let Some((idx, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            let node = &self.nodes[idx];
            stack.extend(node.left.map(|child| (child, depth + 1)));
            stack.extend(node.right.map(|child| (child, depth + 1)));
        }
        deepest
    }
}

/// How the intervals stored at the current node are filtered.
#[derive(Debug, Clone, Copy)]
enum Scan {
    /// The query spans the center: everything at the node overlaps.
    All,
    /// The query lies left of the center: walk by start while `start < q_end`.
    ByStart,
    /// The query lies right of the center: walk by end while `end > q_start`.
    ByEnd,
}

/// An iterator over intervals in an [`IntervalTree`] that overlap with a query range.
///
/// Created by [`IntervalTree::iter_find`] and [`find_iter`](Overlapper::find_iter).
/// Nodes still to visit are kept on an explicit stack.
#[derive(Debug)]
pub struct IterFind<'a, I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync + 'a,
{
    inner: &'a IntervalTree<I, T>,
    stack: Vec<usize>,
    current: Option<(usize, Scan)>,
    pos: usize,
    start: I,
    end: I,
}

impl<'a, I, T> IterFind<'a, I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync + 'a,
{
    fn new(tree: &'a IntervalTree<I, T>, start: I, end: I) -> Self {
        let mut stack = Vec::new();
        if start < end && !tree.nodes.is_empty() {
            stack.push(0);
        }
        Self {
            inner: tree,
            stack,
            current: None,
            pos: 0,
            start,
            end,
        }
    }
}

impl<'a, I, T> Iterator for IterFind<'a, I, T>
where
    I: PrimInt + Unsigned + Send + Sync,
    T: Eq + Clone + Send + Sync + 'a,
{
    type Item = &'a Interval<I, T>;

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.inner;
        loop {
            if let Some((idx, scan)) = self.current {
                let node = &tree.nodes[idx];
                let hit = match scan {
                    Scan::All => node.by_start.get(self.pos),
                    Scan::ByStart => node
                        .by_start
                        .get(self.pos)
                        .filter(|&&i| tree.intervals[i].start < self.end),
                    Scan::ByEnd => node
                        .by_end
                        .get(self.pos)
                        .filter(|&&i| tree.intervals[i].end > self.start),
                };
                if let Some(&i) = hit {
                    self.pos += 1;
                    return Some(&tree.intervals[i]);
                }
                self.current = None;
            }

            let idx = self.stack.pop()?;
            let node = &tree.nodes[idx];

            // intervals left of the node end at or before the center, the
            // ones right of it start after it
            let scan = if self.end <= node.center {
                self.stack.extend(node.left);
                Scan::ByStart
            } else if self.start > node.center {
                self.stack.extend(node.right);
                Scan::ByEnd
            } else {
                self.stack.extend(node.left);
                self.stack.extend(node.right);
                Scan::All
            };

            self.current = Some((idx, scan));
            self.pos = 0;
        }
    }
}
