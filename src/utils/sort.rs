use std::cmp::Ordering;

/// Order two `(term, weight)` entries by weight descending.
/// Equal weights fall back to the term in ascending byte order,
/// so the result never depends on the input order.
///
/// Weights are compared with `total_cmp`; NaN never reaches here because
/// every map in the pipeline rejects non-finite values.
#[inline]
pub fn weight_desc_then_term<T>(a: &(T, f64), b: &(T, f64)) -> Ordering
where
    T: AsRef<str>,
{
    b.1.total_cmp(&a.1)
        .then_with(|| a.0.as_ref().cmp(b.0.as_ref()))
}

/// Sort `(term, weight)` entries in place, heaviest first
#[inline]
pub fn sort_by_weight_desc<T>(entries: &mut [(T, f64)])
where
    T: AsRef<str>,
{
    entries.sort_unstable_by(weight_desc_then_term);
}
