//! Group-key hashing and bucket storage for streaming aggregation.

use std::collections::HashMap;

use value::Value;

/// The evaluated group-by values for one row, compared with
/// [`Value::eq_total`] and hashed with [`Value::stable_hash`] so that NaN
/// and composite values behave the same way here as they do in the rest of
/// the value domain.
#[derive(Debug, Clone)]
pub struct GroupKey(pub Vec<Value>);

impl GroupKey {
    fn fingerprint(&self) -> u64 {
        self.0.iter().fold(0, |seed, v| v.stable_hash(seed))
    }
}

impl PartialEq for GroupKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.iter().zip(&other.0).all(|(a, b)| a.eq_total(b))
    }
}

impl Eq for GroupKey {}

/// One streaming bucket per distinct group key, indexed by the key's
/// fingerprint with a fallback structural comparison on collision.
///
/// `Buckets` preserves first-seen group order so that emitted rows are
/// deterministic for a given input, even though a `HashMap` alone would not
/// guarantee that: [`Buckets::order`] is threaded alongside the map for
/// exactly this reason.
pub struct Buckets<T> {
    by_fingerprint: HashMap<u64, Vec<(GroupKey, T)>>,
    order: Vec<u64>,
}

impl<T> Buckets<T> {
    /// An empty bucket set.
    pub fn new() -> Self {
        Self { by_fingerprint: HashMap::new(), order: Vec::new() }
    }

    /// Returns the bucket for `key`, creating it via `make` on first sight.
    pub fn entry(&mut self, key: GroupKey, make: impl FnOnce() -> T) -> &mut T {
        let fingerprint = key.fingerprint();
        let slot = self.by_fingerprint.entry(fingerprint).or_default();
        if let Some(pos) = slot.iter().position(|(k, _)| *k == key) {
            return &mut slot[pos].1;
        }
        if slot.is_empty() {
            self.order.push(fingerprint);
        }
        slot.push((key, make()));
        &mut slot.last_mut().expect("just pushed").1
    }

    /// Iterates buckets in first-seen order, each paired with its group key.
    pub fn iter_in_order(&self) -> impl Iterator<Item = (&GroupKey, &T)> {
        self.order.iter().flat_map(move |fp| {
            self.by_fingerprint.get(fp).into_iter().flatten().map(|(k, v)| (k, v))
        })
    }

    /// `true` if no row has ever been grouped.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<T> Default for Buckets<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn distinct_keys_get_distinct_buckets() {
        let mut buckets: Buckets<u64> = Buckets::new();
        *buckets.entry(GroupKey(vec![Value::Int64(1)]), || 0) += 1;
        *buckets.entry(GroupKey(vec![Value::Int64(2)]), || 0) += 1;
        *buckets.entry(GroupKey(vec![Value::Int64(1)]), || 0) += 1;
        let seen: Vec<_> = buckets.iter_in_order().map(|(k, v)| (k.0.clone(), *v)).collect();
        assert_eq!(seen, vec![(vec![Value::Int64(1)], 2), (vec![Value::Int64(2)], 1)]);
    }

    #[test]
    fn preserves_first_seen_order_across_fingerprint_collisions() {
        let mut buckets: Buckets<u64> = Buckets::new();
        for v in [3, 1, 2] {
            *buckets.entry(GroupKey(vec![Value::Int64(v)]), || 0) += 1;
        }
        let order: Vec<_> = buckets.iter_in_order().map(|(k, _)| k.0[0].clone()).collect();
        assert_eq!(order, vec![Value::Int64(3), Value::Int64(1), Value::Int64(2)]);
    }
}
