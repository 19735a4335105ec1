// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

/// Exact quantile oracle over a sorted vec of all observations.
#[derive(Debug, Clone, Default)]
pub struct NaiveSketch {
    values: Vec<f64>,
}

impl NaiveSketch {
    /// Creates an empty oracle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns total weight of the stream.
    pub fn n(&self) -> u64 {
        self.values.len() as u64
    }

    /// Returns true if the oracle has not seen any data.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Inserts an observation, keeping the values sorted.
    pub fn add(&mut self, value: f64) {
        let i = self.values.partition_point(|v| *v < value);
        self.values.insert(i, value);
    }

    /// Returns the exact order statistic at the natural rank
    /// `max(1, ceil(norm_rank * n))`, or `None` when empty.
    ///
    /// # Panics
    ///
    /// Panics if `norm_rank` is outside [0.0, 1.0].
    pub fn quantile(&self, norm_rank: f64) -> Option<f64> {
        assert!(
            (0.0..=1.0).contains(&norm_rank),
            "normalized rank must be between 0 and 1"
        );
        if self.values.is_empty() {
            return None;
        }
        let natural_rank = ((norm_rank * self.values.len() as f64).ceil() as usize).max(1);
        Some(self.values[natural_rank - 1])
    }

    /// Returns the 1-indexed rank of `value`: one plus the count of
    /// observations strictly below it.
    pub fn rank(&self, value: f64) -> u64 {
        self.values.partition_point(|v| *v < value) as u64 + 1
    }

    /// Merges two oracles into a new one.
    pub fn combine(&self, other: &NaiveSketch) -> NaiveSketch {
        let mut values = Vec::with_capacity(self.values.len() + other.values.len());
        let mut left = self.values.iter().peekable();
        let mut right = other.values.iter().peekable();
        while let (Some(l), Some(r)) = (left.peek(), right.peek()) {
            if l < r {
                values.push(*left.next().unwrap());
            } else {
                values.push(*right.next().unwrap());
            }
        }
        values.extend(left);
        values.extend(right);
        NaiveSketch { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_keeps_values_sorted() {
        let mut oracle = NaiveSketch::new();
        for value in [12.0, 6.0, 10.0, 1.0] {
            oracle.add(value);
        }
        assert_eq!(oracle.n(), 4);
        assert!(oracle.values.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_quantile_order_statistics() {
        let mut oracle = NaiveSketch::new();
        for value in [12.0, 6.0, 10.0, 1.0] {
            oracle.add(value);
        }
        assert_eq!(oracle.quantile(0.0), Some(1.0));
        assert_eq!(oracle.quantile(0.25), Some(1.0));
        assert_eq!(oracle.quantile(0.5), Some(6.0));
        assert_eq!(oracle.quantile(0.75), Some(10.0));
        assert_eq!(oracle.quantile(1.0), Some(12.0));
    }

    #[test]
    fn test_quantile_empty_is_none() {
        let oracle = NaiveSketch::new();
        assert_eq!(oracle.quantile(0.5), None);
    }

    #[test]
    fn test_rank_is_one_indexed_lower_bound() {
        let mut oracle = NaiveSketch::new();
        for value in [1.0, 3.0, 3.0, 7.0] {
            oracle.add(value);
        }
        assert_eq!(oracle.rank(0.5), 1);
        assert_eq!(oracle.rank(1.0), 1);
        assert_eq!(oracle.rank(3.0), 2);
        assert_eq!(oracle.rank(7.0), 4);
        assert_eq!(oracle.rank(9.0), 5);
    }

    #[test]
    fn test_combine_merges_sorted() {
        let mut a = NaiveSketch::new();
        let mut b = NaiveSketch::new();
        for value in [1.0, 5.0, 9.0] {
            a.add(value);
        }
        for value in [2.0, 5.0, 8.0] {
            b.add(value);
        }
        let merged = a.combine(&b);
        assert_eq!(merged.values, &[1.0, 2.0, 5.0, 5.0, 8.0, 9.0]);
    }
}
