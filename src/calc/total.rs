//! Aggregation of many workloads into the quota they need together.

use super::quantity::Quantity;
use super::resources::Resources;
use super::types::ResourceUsage;

/// Total resources needed by all `usages`, with at most `max_rollout`
/// workloads rolling out at the same time.
///
/// A negative `max_rollout` means every workload may roll out at once, so
/// the total is the sum of all rollout peaks. Otherwise the total is the
/// sum of all normal footprints plus, for each of the four dimensions on
/// its own, the `max_rollout` largest rollout overheads. The workloads
/// contributing to CPU need not be the ones contributing to memory.
pub fn total(max_rollout: i64, usages: &[ResourceUsage]) -> Resources {
    let Ok(limit) = usize::try_from(max_rollout) else {
        return usages
            .iter()
            .fold(Resources::default(), |sum, u| sum + u.rollout_resources);
    };

    let normal = usages
        .iter()
        .fold(Resources::default(), |sum, u| sum + u.normal_resources);

    let overheads: Vec<[Quantity; 4]> = usages
        .iter()
        .map(|u| u.rollout_overhead().to_array())
        .collect();

    let mut sum = normal.to_array();
    for (dimension, total) in sum.iter_mut().enumerate() {
        let mut deltas: Vec<Quantity> = overheads.iter().map(|o| o[dimension]).collect();
        deltas.sort_unstable_by(|a, b| b.cmp(a));
        *total = deltas.into_iter().take(limit).fold(*total, |acc, d| acc + d);
    }

    Resources::from_array(sum)
}
