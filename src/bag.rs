use std::fmt;
use std::io::{self, Write};
use std::slice;
use std::str::FromStr;

use log::{debug, trace};

use crate::constants::{Value, CAPACITY};
use crate::error::BagError;

/// A fixed-capacity, unordered multiset of integers.
///
/// Live elements occupy `data[..used]` in no particular order. Anything past
/// `used` is stale and never read.
#[derive(Clone, Copy)]
pub struct Bag {
    used: usize,
    data: [Value; CAPACITY],
}

impl Bag {
    pub fn new() -> Self {
        Bag {
            used: 0,
            data: [0; CAPACITY],
        }
    }

    pub fn size(&self) -> usize {
        self.used
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn capacity(&self) -> usize {
        CAPACITY
    }

    pub fn is_full(&self) -> bool {
        self.used == CAPACITY
    }

    pub fn remaining(&self) -> usize {
        CAPACITY - self.used
    }

    /// Adds `value` to the bag.
    ///
    /// Panics if the bag is full. Callers are expected to check `is_full()`
    /// first, or to use `try_insert`.
    pub fn insert(&mut self, value: Value) {
        assert!(self.used < CAPACITY, "bag is full: cannot insert {}", value);
        self.data[self.used] = value;
        self.used += 1;
    }

    pub fn try_insert(&mut self, value: Value) -> Result<(), BagError> {
        if self.is_full() {
            debug!("rejected insert of {} into a full bag", value);
            return Err(BagError::CapacityExceeded {
                value,
                capacity: CAPACITY,
            });
        }
        self.insert(value);
        Ok(())
    }

    /// Removes every element equal to `target` and returns how many were removed.
    ///
    /// Each match is overwritten with the last live element. The scan index
    /// stays put after a swap, since the moved-in element may match too.
    pub fn erase(&mut self, target: Value) -> usize {
        let before = self.used;
        let mut i = 0;
        while i < self.used {
            if self.data[i] == target {
                self.used -= 1;
                self.data[i] = self.data[self.used];
            } else {
                i += 1;
            }
        }
        let removed = before - self.used;
        if removed > 0 {
            trace!("erased {} copies of {}", removed, target);
        }
        removed
    }

    pub fn count(&self, target: Value) -> usize {
        self.iter().filter(|&&value| value == target).count()
    }

    pub fn contains(&self, target: Value) -> bool {
        self.count(target) > 0
    }

    pub fn clear(&mut self) {
        debug!("clearing bag of {} elements", self.used);
        self.used = 0;
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.data[..self.used]
    }

    pub fn iter(&self) -> slice::Iter<'_, Value> {
        self.as_slice().iter()
    }

    /// Each distinct value with its count, in the order values are first seen.
    pub fn distinct_counts(&self) -> Vec<(Value, usize)> {
        let mut counts: Vec<(Value, usize)> = Vec::new();
        for &value in self.iter() {
            match counts.iter_mut().find(|(v, _)| *v == value) {
                Some((_, n)) => *n += 1,
                None => counts.push((value, 1)),
            }
        }
        counts
    }

    /// True if both bags hold the same values with the same multiplicities,
    /// in any order.
    pub fn same_elements(&self, other: &Bag) -> bool {
        self.size() == other.size()
            && self
                .iter()
                .all(|&value| self.count(value) == other.count(value))
    }

    /// Writes the live elements as `{v0,v1,...}` in internal order.
    pub fn write<W: Write>(&self, output: &mut W) -> io::Result<()> {
        write!(output, "{}", self)
    }

    pub fn print(&self) -> io::Result<()> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        self.write(&mut lock)?;
        lock.flush()
    }
}

impl Default for Bag {
    fn default() -> Self {
        Bag::new()
    }
}

impl fmt::Display for Bag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, value) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", value)?;
        }
        write!(f, "}}")
    }
}

impl fmt::Debug for Bag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bag")
            .field("items", &self.as_slice())
            .finish()
    }
}

impl<'a> IntoIterator for &'a Bag {
    type Item = &'a Value;
    type IntoIter = slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl TryFrom<&[Value]> for Bag {
    type Error = BagError;

    fn try_from(values: &[Value]) -> Result<Self, Self::Error> {
        if let Some(&value) = values.get(CAPACITY) {
            return Err(BagError::CapacityExceeded {
                value,
                capacity: CAPACITY,
            });
        }
        let mut bag = Bag::new();
        for &value in values {
            bag.insert(value);
        }
        Ok(bag)
    }
}

impl FromStr for Bag {
    type Err = BagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let inner = s
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
            .ok_or_else(|| BagError::Parse(format!("expected {{...}}, got {:?}", s)))?;

        let mut bag = Bag::new();
        if inner.trim().is_empty() {
            return Ok(bag);
        }
        for part in inner.split(',') {
            let part = part.trim();
            let value = part
                .parse::<Value>()
                .map_err(|e| BagError::Parse(format!("invalid number {:?}: {}", part, e)))?;
            bag.try_insert(value)?;
        }
        Ok(bag)
    }
}
