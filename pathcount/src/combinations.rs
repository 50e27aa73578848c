/// Every strictly-increasing k-subset of a slice, in lexicographic order
/// on index tuples, each materialized as a cloned `Vec<T>`.
///
/// Hand-rolled rather than pulled from an iterator-combinator crate: the
/// enumerator has exactly one call site for this, and the algorithm
/// (classic odometer-style index advance) is small enough that owning it
/// keeps the behavior pinned to what the row-transition enumerator needs.
pub struct Combinations<'a, T> {
    pool: &'a [T],
    k: usize,
    indices: Vec<usize>,
    done: bool,
}

impl<'a, T> Combinations<'a, T> {
    pub fn new(pool: &'a [T], k: usize) -> Self {
        let done = k > pool.len();
        Combinations {
            pool,
            k,
            indices: (0..k).collect(),
            done,
        }
    }
}

impl<'a, T: Clone> Iterator for Combinations<'a, T> {
    type Item = Vec<T>;

    fn next(&mut self) -> Option<Vec<T>> {
        if self.done {
            return None;
        }

        let result: Vec<T> = self.indices.iter().map(|&i| self.pool[i].clone()).collect();

        // Advance to the next index tuple, odometer-style: find the
        // rightmost index not yet at its maximum value, bump it, and reset
        // everything to its right to consecutive values.
        let n = self.pool.len();
        let r = self.k;
        let mut i = r.wrapping_sub(1);
        let advance = loop {
            if r == 0 {
                break None;
            }
            if self.indices[i] != i + n - r {
                break Some(i);
            }
            if i == 0 {
                break None;
            }
            i -= 1;
        };

        match advance {
            Some(i) => {
                self.indices[i] += 1;
                for j in i + 1..r {
                    self.indices[j] = self.indices[j - 1] + 1;
                }
            }
            None => self.done = true,
        }

        Some(result)
    }
}
