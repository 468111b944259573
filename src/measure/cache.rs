use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use super::{FontSpec, TextMeasurer};

pub const TEXT_MEASURE_CACHE_CAP: usize = 4096;

/// Bounded per-string cache in front of another measurer.
///
/// Oldest entries are evicted first once `max_entries` is reached. A cap
/// of zero disables caching.
pub struct CachedMeasurer<M> {
    inner: M,
    cache: RefCell<MeasureCache>,
}

struct MeasureCache {
    entries: HashMap<Rc<str>, f32>,
    order: VecDeque<Rc<str>>,
    max_entries: usize,
}

impl<M: TextMeasurer> CachedMeasurer<M> {
    pub fn new(inner: M) -> Self {
        Self::with_capacity(inner, TEXT_MEASURE_CACHE_CAP)
    }

    pub fn with_capacity(inner: M, max_entries: usize) -> Self {
        Self {
            inner,
            cache: RefCell::new(MeasureCache {
                entries: HashMap::new(),
                order: VecDeque::new(),
                max_entries,
            }),
        }
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }

    pub fn len(&self) -> usize {
        self.cache.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        let mut cache = self.cache.borrow_mut();
        cache.entries.clear();
        cache.order.clear();
    }
}

impl MeasureCache {
    fn insert(&mut self, text: &str, width: f32) {
        if self.max_entries == 0 || self.entries.contains_key(text) {
            return;
        }
        let key: Rc<str> = text.into();
        self.entries.insert(Rc::clone(&key), width);
        self.order.push_back(key);
        while self.entries.len() > self.max_entries {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            } else {
                break;
            }
        }
    }
}

impl<M: TextMeasurer> TextMeasurer for CachedMeasurer<M> {
    fn font(&self) -> &FontSpec {
        self.inner.font()
    }

    fn measure_text(&self, text: &str) -> f32 {
        if let Some(width) = self.cache.borrow().entries.get(text).copied() {
            return width;
        }
        let width = self.inner.measure_text(text);
        self.cache.borrow_mut().insert(text, width);
        width
    }
}
