use std::sync::{Arc, Weak};

/// Weak references collected to check that values get released.
#[derive(Debug)]
pub struct WeakElements<T> {
    elements: Vec<Weak<T>>,
}

impl<T> Default for WeakElements<T> {
    fn default() -> Self {
        Self {
            elements: Vec::new(),
        }
    }
}

impl<T> WeakElements<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: &Arc<T>) {
        self.elements.push(Arc::downgrade(value));
    }

    pub fn push_weak(&mut self, value: Weak<T>) {
        self.elements.push(value);
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn alive_count(&self) -> usize {
        self.elements.iter().filter(|w| w.strong_count() > 0).count()
    }

    pub fn all_released(&self) -> bool {
        self.alive_count() == 0
    }

    /// Upgrades every element that is still alive.
    pub fn alive(&self) -> Vec<Arc<T>> {
        self.elements.iter().filter_map(Weak::upgrade).collect()
    }
}
