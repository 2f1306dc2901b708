use std::collections::BTreeMap;

/// Utility class implementing a simple one-off registry.
/// Ids are never reused and iteration follows id order so the frame driver
/// always hands obstacles to the planner in the same sequence.
pub struct Registry<T> {
    registry: BTreeMap<usize, T>,
    counter: usize,
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Registry {
            registry: BTreeMap::new(),
            counter: 0,
        }
    }

    pub fn add_new_item(&mut self, item: T) -> usize {
        let id = self.counter;
        self.registry.insert(id, item);
        self.counter += 1;
        id
    }

    pub fn remove(&mut self, id: usize) -> Option<T> {
        self.registry.remove(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &T)> {
        self.registry.iter().map(|(id, item)| (*id, item))
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.registry.values()
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn clear(&mut self) {
        self.registry.clear();
    }
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_not_reused() {
        let mut registry = Registry::new();
        let a = registry.add_new_item("a");
        let b = registry.add_new_item("b");
        assert_eq!(registry.remove(a), Some("a"));
        let c = registry.add_new_item("c");
        assert_ne!(c, a);
        assert_ne!(c, b);
        let ids: Vec<usize> = registry.iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec![b, c]);
        assert_eq!(registry.len(), 2);
        registry.clear();
        assert!(registry.is_empty());
    }
}
