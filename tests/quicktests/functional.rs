use persistent_bst::functional::Tree;
use quickcheck_macros::quickcheck;

use std::collections::HashSet;

use crate::Op;

/// A tree saved by `Op::Snapshot` with what it held at the time.
struct Snapshot<T> {
    tree: Tree<T>,
    size: usize,
    rendered: String,
}

/// Applies a set of operations to a tree and to a plain `Vec` holding every
/// inserted value. After each operation the tree must agree with the `Vec`,
/// and at the end every snapshot must look exactly as it did when taken.
fn do_ops<T>(ops: &[Op<T>]) -> bool
where
    T: Ord + Clone + std::fmt::Display,
{
    let mut tree = Tree::new();
    let mut inserted = Vec::new();
    let mut snapshots = Vec::new();

    for op in ops {
        match op {
            Op::Insert(v) => {
                tree = tree.insert(v.clone());
                inserted.push(v.clone());
            }
            Op::Contains(v) => {
                if tree.contains(v) != inserted.contains(v) {
                    return false;
                }
            }
            Op::Snapshot => snapshots.push(Snapshot {
                tree: tree.clone(),
                size: tree.size(),
                rendered: tree.render(),
            }),
        }

        if tree.size() != inserted.len() {
            return false;
        }
    }

    snapshots
        .iter()
        .all(|s| s.tree.size() == s.size && s.tree.render() == s.rendered)
}

/// Checks the ordering invariant: every value is at least `lower` and
/// strictly below `upper`.
fn is_ordered<T: Ord>(tree: &Tree<T>, lower: Option<&T>, upper: Option<&T>) -> bool {
    match tree {
        Tree::Empty => true,
        Tree::Node(n) => {
            let value = n.value();
            lower.map_or(true, |lower| lower <= value)
                && upper.map_or(true, |upper| value < upper)
                && is_ordered(n.left(), lower, Some(value))
                && is_ordered(n.right(), Some(value), upper)
        }
    }
}

#[quickcheck]
fn fuzz_multiple_operations_string(ops: Vec<Op<String>>) -> bool {
    do_ops(&ops)
}

#[quickcheck]
fn fuzz_multiple_operations_u8(ops: Vec<Op<u8>>) -> bool {
    do_ops(&ops)
}

#[quickcheck]
fn contains(xs: Vec<String>) -> bool {
    let tree: Tree = xs.iter().cloned().collect();

    xs.iter().all(|x| tree.contains(x.as_str()))
}

#[quickcheck]
fn contains_not(xs: Vec<String>, nots: Vec<String>) -> bool {
    let tree: Tree = xs.iter().cloned().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| !tree.contains(x.as_str()))
}

#[quickcheck]
fn size_counts_duplicates(xs: Vec<u8>) -> bool {
    // Values are drawn from a small range so duplicates are common.
    let xs: Vec<u8> = xs.into_iter().map(|x| x % 8).collect();
    let tree: Tree<u8> = xs.iter().copied().collect();

    tree.size() == xs.len()
}

#[quickcheck]
fn insert_always_grows(xs: Vec<String>, pick: usize, fresh: String) -> bool {
    let tree: Tree = xs.iter().cloned().collect();

    // Insert a value that's already present (when there is one) and one that may not be.
    let present = if xs.is_empty() {
        fresh.clone()
    } else {
        xs[pick % xs.len()].clone()
    };

    [present, fresh].iter().all(|v| {
        let grown = tree.insert(v.clone());
        grown.size() == tree.size() + 1 && grown.contains(v.as_str())
    })
}

#[quickcheck]
fn insert_keeps_order(xs: Vec<String>) -> bool {
    let tree: Tree = xs.into_iter().collect();

    is_ordered(&tree, None, None)
}

#[quickcheck]
fn render_wraps_every_value(xs: Vec<String>) -> bool {
    let tree: Tree = xs.iter().cloned().collect();
    let rendered = tree.render();

    if xs.is_empty() {
        rendered == "()"
    } else {
        // One pair of parentheses per node plus the values themselves.
        let value_bytes: usize = xs.iter().map(String::len).sum();
        rendered.len() == value_bytes + 2 * xs.len()
            && rendered.starts_with('(')
            && rendered.ends_with(')')
    }
}

#[quickcheck]
fn sorted_inserts_make_a_path(xs: Vec<u8>) -> bool {
    let mut xs = xs;
    xs.sort_unstable();
    let tree: Tree<u8> = xs.iter().copied().collect();

    tree.height() == xs.len()
}

#[quickcheck]
fn old_trees_are_unchanged(xs: Vec<String>, ys: Vec<String>) -> bool {
    let tree: Tree = xs.iter().cloned().collect();
    let rendered = tree.render();

    let newer = ys.iter().cloned().fold(tree.clone(), |t, y| t.insert(y));

    tree.render() == rendered
        && tree.size() == xs.len()
        && newer.size() == xs.len() + ys.len()
        && ys.iter().all(|y| newer.contains(y.as_str()))
}
