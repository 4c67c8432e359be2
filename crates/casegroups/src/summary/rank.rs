//! Dense ranking.

use std::cmp::Ordering;

/// Sort `items` by count descending, breaking ties with `tie_break`, and assign
/// dense ranks: equal counts share a rank and the next count is exactly one more.
pub(crate) fn rank_dense_desc<T>(
    items: &mut [T],
    count: impl Fn(&T) -> usize,
    tie_break: impl Fn(&T, &T) -> Ordering,
    mut set_rank: impl FnMut(&mut T, u32),
) {
    items.sort_by(|a, b| count(b).cmp(&count(a)).then_with(|| tie_break(a, b)));

    let mut rank = 0;
    let mut previous = None;
    for item in items.iter_mut() {
        let c = count(item);
        if previous != Some(c) {
            rank += 1;
            previous = Some(c);
        }
        set_rank(item, rank);
    }
}
