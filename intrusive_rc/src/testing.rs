//! Counted objects for use in tests.

use crate::RefCounter;

use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;

/// Number of times a [`Tracked`] object was dropped.
#[derive(Clone, Debug, Default)]
pub struct Drops
{
    count: Arc<AtomicUsize>,
}

impl Drops
{
    pub fn get(&self) -> usize
    {
        self.count.load(Ordering::SeqCst)
    }
}

/// Counted object that records when it is dropped.
#[derive(Debug)]
pub struct Tracked
{
    counter: RefCounter,
    pub value: u32,
    drops: Drops,
}

ref_counted!(Tracked => counter);

impl Tracked
{
    pub fn new(value: u32) -> (Self, Drops)
    {
        let drops = Drops::default();
        let this = Self{counter: RefCounter::new(), value, drops: drops.clone()};
        (this, drops)
    }
}

impl Drop for Tracked
{
    fn drop(&mut self)
    {
        self.drops.count.fetch_add(1, Ordering::SeqCst);
    }
}
