use crate::problem::item::Item;

/// Fractional-relaxation upper bound on the profit reachable from
/// `items[start..]` given the partial assignment's weight and profit.
///
/// Remaining items are taken greedily by profit/weight ratio; the first item
/// that overflows contributes a proportional share of its profit. The result
/// is an upper bound only, never a final answer.
///
/// When `ratio_sorted` is true the slice is already in descending ratio
/// order and is consumed as-is; otherwise the remaining items are re-sorted
/// by ratio first (the value-first branch-and-bound ordering needs this for
/// the bound to stay valid).
pub(crate) fn fractional_upper_bound(
    items: &[Item],
    start: usize,
    weight: u64,
    profit: u64,
    capacity: u64,
    ratio_sorted: bool,
) -> f64 {
    if ratio_sorted {
        fill(items[start..].iter(), weight, profit, capacity)
    } else {
        let mut remaining: Vec<&Item> = items[start..].iter().collect();
        remaining.sort_by(|a, b| b.ratio().total_cmp(&a.ratio()));
        fill(remaining.into_iter(), weight, profit, capacity)
    }
}

fn fill<'a>(
    remaining: impl Iterator<Item = &'a Item>,
    mut weight: u64,
    profit: u64,
    capacity: u64,
) -> f64 {
    let mut bound = profit as f64;

    for item in remaining {
        let item_weight = u64::from(item.weight());
        if weight + item_weight <= capacity {
            weight += item_weight;
            bound += f64::from(item.profit());
        } else {
            let leftover = capacity - weight;
            bound += item.ratio() * leftover as f64;
            break;
        }
    }

    bound
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<Item> {
        // Ratios 6.0, 4.5, 4.0, already in ratio order.
        vec![
            Item::new("A", 10, 60),
            Item::new("B", 20, 90),
            Item::new("C", 30, 120),
        ]
    }

    #[test]
    fn test_bound_includes_fractional_share_of_overflow_item() {
        let items = items();
        // A and B fit in 50, C contributes 20/30 of its profit.
        let bound = fractional_upper_bound(&items, 0, 0, 0, 50, true);
        assert_eq!(bound, 60.0 + 90.0 + 120.0 * (20.0 / 30.0));
    }

    #[test]
    fn test_bound_dominates_exact_optimum() {
        let items = items();
        // Exact optimum for capacity 50 is {B, C} = 210.
        let bound = fractional_upper_bound(&items, 0, 0, 0, 50, true);
        assert!(bound >= 210.0);
    }

    #[test]
    fn test_unsorted_slice_is_ratio_sorted_before_filling() {
        let mut shuffled = items();
        shuffled.reverse();
        let sorted_bound = fractional_upper_bound(&items(), 0, 0, 0, 50, true);
        let unsorted_bound = fractional_upper_bound(&shuffled, 0, 0, 0, 50, false);
        assert_eq!(sorted_bound, unsorted_bound);
    }

    #[test]
    fn test_all_items_fit_gives_plain_sum() {
        let items = items();
        let bound = fractional_upper_bound(&items, 0, 0, 0, 100, true);
        assert_eq!(bound, 270.0);
    }
}
