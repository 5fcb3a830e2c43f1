/// Ordered container that never holds more than `capacity` items.
///
/// Every mutation goes through a method that re-applies the bound, so the
/// length invariant holds for any sequence of operations. Items past the bound
/// are returned to the caller as evicted.
#[derive(Debug, Clone, PartialEq)]
pub struct RecentList<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> RecentList<T> {
    pub fn new(capacity: usize) -> Self {
        Self { items: Vec::new(), capacity }
    }

    /// Adopt an existing sequence, dropping anything beyond `capacity`.
    pub fn from_vec(mut items: Vec<T>, capacity: usize) -> Self {
        items.truncate(capacity);
        Self { items, capacity }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    /// Remove every item matching `same`, then insert `item` at rank 0.
    pub fn push_front_unique<F>(&mut self, item: T, same: F) -> Vec<T>
    where
        F: Fn(&T, &T) -> bool,
    {
        self.items.retain(|existing| !same(existing, &item));
        self.items.insert(0, item);
        self.enforce_capacity()
    }

    /// Run an arbitrary edit, then re-apply the bound.
    pub fn mutate<F>(&mut self, edit: F) -> Vec<T>
    where
        F: FnOnce(&mut Vec<T>),
    {
        edit(&mut self.items);
        self.enforce_capacity()
    }

    fn enforce_capacity(&mut self) -> Vec<T> {
        if self.items.len() > self.capacity {
            self.items.split_off(self.capacity)
        } else {
            Vec::new()
        }
    }
}

impl<'a, T> IntoIterator for &'a RecentList<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_vec_truncates() {
        let list = RecentList::from_vec(vec![1, 2, 3, 4], 3);
        assert_eq!(list.as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn test_push_front_unique_moves_to_front() {
        let mut list = RecentList::from_vec(vec![1, 2, 3], 5);
        let evicted = list.push_front_unique(3, |a, b| a == b);
        assert!(evicted.is_empty());
        assert_eq!(list.as_slice(), &[3, 1, 2]);
    }

    #[test]
    fn test_push_front_unique_evicts_oldest() {
        let mut list = RecentList::new(3);
        for n in 1..=3 {
            list.push_front_unique(n, |a, b| a == b);
        }
        let evicted = list.push_front_unique(4, |a, b| a == b);
        assert_eq!(evicted, vec![1]);
        assert_eq!(list.as_slice(), &[4, 3, 2]);
    }

    #[test]
    fn test_mutate_reapplies_bound() {
        let mut list = RecentList::from_vec(vec![5, 3], 2);
        let evicted = list.mutate(|items| {
            items.push(9);
            items.sort_by(|a, b| b.cmp(a));
        });
        assert_eq!(list.as_slice(), &[9, 5]);
        assert_eq!(evicted, vec![3]);
        assert_eq!(list.len(), list.capacity());
    }

    #[test]
    fn test_zero_capacity_holds_nothing() {
        let mut list = RecentList::new(0);
        let evicted = list.push_front_unique("a", |a, b| a == b);
        assert!(list.is_empty());
        assert_eq!(evicted, vec!["a"]);
    }
}
