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

use log::trace;

use crate::error::Error;

#[derive(Debug, Clone, Copy)]
struct Tuple {
    value: f64,
    gap: u64,
    delta: u64,
}

/// Greenwald-Khanna summary with error bound ε.
///
/// See the [gk module level documentation](crate::gk) for more.
#[derive(Debug, Clone)]
pub struct GkSummary {
    tuples: Vec<Tuple>,
    compressing_interval: u64,
    epsilon: f64,
    n: u64,
}

impl GkSummary {
    /// Creates a new summary with the given error bound.
    ///
    /// `epsilon` must be in (0.0, 0.5).
    pub fn new(epsilon: f64) -> Result<Self, Error> {
        if !(epsilon > 0.0 && epsilon < 0.5) {
            return Err(Error::config_invalid(format!(
                "epsilon must be in (0.0, 0.5), got {epsilon}"
            )));
        }
        Ok(Self {
            tuples: Vec::new(),
            compressing_interval: (1.0 / (2.0 * epsilon)).floor() as u64,
            epsilon,
            n: 0,
        })
    }

    /// Returns total weight of the stream.
    pub fn n(&self) -> u64 {
        self.n
    }

    /// Returns true if the summary has not seen any data.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Returns the number of retained tuples.
    pub fn num_tuples(&self) -> usize {
        self.tuples.len()
    }

    /// Adds an observation to the summary.
    pub fn add(&mut self, value: f64) {
        let i = self.tuples.partition_point(|t| t.value < value);
        let delta = if i > 0 && i < self.tuples.len() {
            (2.0 * self.epsilon * self.n as f64).floor() as u64
        } else {
            0
        };
        self.tuples.insert(
            i,
            Tuple {
                value,
                gap: 1,
                delta,
            },
        );
        self.n += 1;

        if self.n % self.compressing_interval == 0 {
            self.compress();
        }
    }

    /// Returns the value whose rank window best covers rank `p * (n-1) + 1`,
    /// or `None` when the summary is empty.
    pub fn quantile(&self, p: f64) -> Option<f64> {
        if self.tuples.is_empty() {
            return None;
        }

        let rank = p * (self.n - 1) as f64 + 1.0;
        let margin = (self.epsilon * self.n as f64).ceil() as i64;
        let rank_minus_margin = rank as i64 - margin;
        let rank_plus_margin = rank as i64 + margin;

        let mut best_index = None;
        let mut best_dist = f64::MAX;
        let mut r_min = 0u64;
        for (i, tuple) in self.tuples.iter().enumerate() {
            r_min += tuple.gap;
            let r_max = r_min + tuple.delta;
            if rank_minus_margin <= r_min as i64 && r_max as i64 <= rank_plus_margin {
                let current_dist = (rank - (r_min + r_max) as f64 / 2.0).abs();
                if current_dist < best_dist {
                    best_dist = current_dist;
                    best_index = Some(i);
                }
            }
        }
        best_index.map(|i| self.tuples[i].value)
    }

    /// Merges neighbors whose combined gap and uncertainty fit under 2εn.
    fn compress(&mut self) {
        let threshold = (2.0 * self.epsilon * self.n as f64).floor() as u64;
        let mut i = self.tuples.len().saturating_sub(2);
        while i >= 1 {
            while i < self.tuples.len() - 1 && self.delete_if_needed(i, threshold) {}
            i -= 1;
        }
        trace!(
            "compressed gk summary, n={}, tuples={}",
            self.n,
            self.tuples.len(),
        );
    }

    fn delete_if_needed(&mut self, i: usize, threshold: u64) -> bool {
        let t1 = self.tuples[i];
        let t2 = self.tuples[i + 1];
        if t1.delta >= t2.delta && t1.gap + t2.gap + t2.delta < threshold {
            self.tuples[i + 1].gap += t1.gap;
            self.tuples.remove(i);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_invalid_epsilon() {
        for bad in [0.0, -0.1, 0.5, 1.0] {
            let err = GkSummary::new(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        }
    }

    #[test]
    fn test_empty_quantile_is_none() {
        let summary = GkSummary::new(0.1).unwrap();
        assert!(summary.quantile(0.5).is_none());
    }

    #[test]
    fn test_tuples_stay_value_ordered() {
        let mut summary = GkSummary::new(0.1).unwrap();
        for i in 0..200 {
            summary.add(((i * 37) % 100) as f64);
        }
        assert!(summary
            .tuples
            .windows(2)
            .all(|w| w[0].value <= w[1].value));
        assert_eq!(summary.n(), 200);
    }

    #[test]
    fn test_gaps_account_for_every_observation() {
        let mut summary = GkSummary::new(0.05).unwrap();
        for i in 0..500 {
            summary.add(((i * 13) % 251) as f64);
        }
        let total_gap: u64 = summary.tuples.iter().map(|t| t.gap).sum();
        assert_eq!(total_gap, summary.n());
    }

    #[test]
    fn test_compress_respects_uncertainty_bound() {
        let mut summary = GkSummary::new(0.05).unwrap();
        for i in 0..1000 {
            summary.add(((i * 7) % 613) as f64);
        }
        // tuples inserted within the last 1/(2eps) observations may overshoot
        // the real-valued bound by one before n catches up
        let bound = (2.0 * 0.05 * summary.n() as f64).floor() as u64 + 1;
        for tuple in &summary.tuples[1..summary.tuples.len() - 1] {
            assert!(tuple.gap + tuple.delta <= bound);
        }
    }

    #[test]
    fn test_compress_shrinks_summary() {
        let mut summary = GkSummary::new(0.05).unwrap();
        for i in 0..10_000 {
            summary.add(((i * 127) % 9973) as f64);
        }
        assert!(summary.num_tuples() < 1000);
    }
}
