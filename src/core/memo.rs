use std::cell::{Cell, RefCell};
use std::sync::Arc;

/// 單筆快取：以依賴的 `Arc` 指標相等判斷是否命中。
///
/// 快取同時持有依賴本身，被快取的指標在替換前不會被釋放後重用。
/// 只保留最後一次結果，沒有淘汰策略。
pub struct Memo<K, V> {
    entry: RefCell<Option<(Arc<K>, V)>>,
    recomputations: Cell<u64>,
}

impl<K, V: Clone> Memo<K, V> {
    pub fn new() -> Self {
        Self {
            entry: RefCell::new(None),
            recomputations: Cell::new(0),
        }
    }

    pub fn get_or_compute<F>(&self, key: &Arc<K>, compute: F) -> V
    where
        F: FnOnce(&K) -> V,
    {
        if let Some((cached_key, value)) = self.entry.borrow().as_ref() {
            if Arc::ptr_eq(cached_key, key) {
                return value.clone();
            }
        }

        let value = compute(key);
        self.recomputations.set(self.recomputations.get() + 1);
        *self.entry.borrow_mut() = Some((Arc::clone(key), value.clone()));
        value
    }

    pub fn recomputations(&self) -> u64 {
        self.recomputations.get()
    }

    pub fn clear(&self) {
        self.entry.borrow_mut().take();
    }
}

impl<K, V: Clone> Default for Memo<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
