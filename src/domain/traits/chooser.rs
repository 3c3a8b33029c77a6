use rand::Rng;

/// Picks an index in `0..len`
pub trait Chooser: Send + Sync {
    fn choose(&self, len: usize) -> usize;
}

/// Pick one item from a slice
pub fn pick<'a, T>(chooser: &dyn Chooser, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    items.get(chooser.choose(items.len()).min(items.len() - 1))
}

/// Uniform choice backed by the thread-local RNG
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomChooser;

impl Chooser for RandomChooser {
    fn choose(&self, len: usize) -> usize {
        rand::rng().random_range(0..len)
    }
}

/// Always returns the same index
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct FixedChooser(pub usize);

#[cfg(test)]
impl Chooser for FixedChooser {
    fn choose(&self, _len: usize) -> usize {
        self.0
    }
}
