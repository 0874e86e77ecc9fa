//! Natural-breaks (Fisher–Jenks) classification.

use crate::limits::Limits;

/// Above this many distinct values the data is down-sampled before the
/// quadratic optimisation.
pub const JENKS_SAMPLE_LIMIT: usize = 1000;

/// Return exactly `k` non-decreasing class boundaries over the numeric
/// extent of `limits`.
///
/// The boundaries are `[min, b₁, …, max]` where the inner `bᵢ` are the
/// upper bounds of the first `k - 2` classes of a Jenks classification
/// of the distinct values into `k - 1` classes.  When there are too few
/// distinct values for that many classes (including the case where
/// `limits` only carries `min` and `max`), equal intervals are used.
/// A collapsed range gives `k` copies of the single value; an unbounded
/// one gives no boundaries.
///
/// # Example
///
/// ```
/// use choropleth_stops::{natural_breaks, Limits};
/// assert_eq!(natural_breaks(&Limits::numeric(5., 5.), 3), [5., 5., 5.]);
/// assert_eq!(natural_breaks(&Limits::numeric(0., 10.), 3), [0., 5., 10.]);
/// ```
pub fn natural_breaks(limits: &Limits, k: usize) -> Vec<f64> {
    let Some((min, max)) = limits.range()
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        else { return vec![] };
    if k == 0 { return vec![] }
    if !(min < max) { return vec![min; k] }
    if k == 1 { return vec![min] }
    let classes = k - 1;
    let mut values = limits.numbers();
    values.sort_by(f64::total_cmp);
    values.dedup();
    if values.len() < classes {
        return equal_intervals(min, max, k);
    }
    let values = sample(values, JENKS_SAMPLE_LIMIT.max(classes));
    let mut breaks = Vec::with_capacity(k);
    breaks.push(min);
    breaks.extend(jenks_upper_bounds(&values, classes)
                  .into_iter().take(classes - 1));
    breaks.push(max);
    // Sampling may drop the true extremes; keep the result monotone.
    for i in 1 .. breaks.len() {
        if breaks[i] < breaks[i - 1] { breaks[i] = breaks[i - 1] }
    }
    breaks
}

/// `k ≥ 2` evenly spaced boundaries from `min` to `max` (both included).
fn equal_intervals(min: f64, max: f64, k: usize) -> Vec<f64> {
    let last = (k - 1) as f64;
    (0 .. k).map(|i| {
        if i == k - 1 { max }
        else { min + (max - min) * i as f64 / last }
    }).collect()
}

/// Keep at most `n` of the sorted `values`, evenly spaced, the first
/// and last included.
fn sample(values: Vec<f64>, n: usize) -> Vec<f64> {
    let len = values.len();
    if len <= n || n < 2 { return values }
    let step = (len - 1) as f64 / (n - 1) as f64;
    let mut out: Vec<f64> = (0 .. n)
        .map(|i| values[((i as f64 * step).round() as usize).min(len - 1)])
        .collect();
    out.dedup();
    out
}

/// Upper bound of each of the `classes` classes of the optimal
/// variance-minimising partition of the sorted `data`
/// (`1 ≤ classes ≤ data.len()`).
fn jenks_upper_bounds(data: &[f64], classes: usize) -> Vec<f64> {
    let n = data.len();
    // Sums of squares are shift invariant; centring limits cancellation.
    let shift = data[n / 2];
    // lower[l][j]: 1-based index of the first element of class j in the
    // best partition of data[..l] into j non-empty classes.  cost[l][j]
    // stays infinite when l < j.
    let mut lower = vec![vec![0usize; classes + 1]; n + 1];
    let mut cost = vec![vec![f64::INFINITY; classes + 1]; n + 1];
    lower[1][1] = 1;
    cost[1][1] = 0.;
    for l in 2 ..= n {
        let (mut s1, mut s2, mut w) = (0., 0., 0.);
        for m in 1 ..= l {
            let i3 = l - m + 1; // first element of the last class
            let val = data[i3 - 1] - shift;
            s1 += val;
            s2 += val * val;
            w += 1.;
            let variance = s2 - s1 * s1 / w;
            let i4 = i3 - 1;
            if i4 != 0 {
                for j in 2 ..= classes {
                    let c = variance + cost[i4][j - 1];
                    if c.is_finite() && cost[l][j] >= c {
                        lower[l][j] = i3;
                        cost[l][j] = c;
                    }
                }
            }
        }
        lower[l][1] = 1;
        cost[l][1] = s2 - s1 * s1 / w;
    }
    let mut upper = vec![0.; classes];
    let mut end = n;
    for j in (1 ..= classes).rev() {
        upper[j - 1] = data[end - 1];
        end = lower[end][j] - 1;
    }
    upper
}
