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

use super::buffer::FloatBuffer;
use super::compactor::ReqCompactor;
use crate::common::QuantileSearchCriteria;

/// Materialized sorted sequence of every retained item with cumulative
/// natural ranks.
///
/// `quantiles` holds the retained items in nondecreasing order;
/// `cum_weights[i]` is the number of stream observations represented by
/// `quantiles[..=i]`, so the last entry equals the stream length.
#[derive(Debug, Clone)]
pub(crate) struct ReqSortedView {
    quantiles: Vec<f64>,
    cum_weights: Vec<u64>,
    total_n: u64,
}

impl ReqSortedView {
    /// Merges every level of the compactor stack into one weighted view.
    pub fn build(compactors: &mut [ReqCompactor], total_n: u64, ret_items: usize) -> Self {
        let mut view = Self {
            quantiles: vec![0.0; ret_items],
            cum_weights: vec![0; ret_items],
            total_n,
        };

        let mut count = 0;
        for compactor in compactors.iter_mut() {
            compactor.buf_mut().sort();
            let buf_weight = 1u64 << compactor.lg_weight();
            let buf_len = compactor.buf().count();
            view.merge_sort_in(compactor.buf(), buf_weight, count);
            count += buf_len;
        }
        view.create_cumulative_native_ranks();
        view
    }

    /// Answers the quantile for a normalized rank already validated to be in
    /// [0.0, 1.0] over a non-empty view.
    pub fn quantile(&self, norm_rank: f64, criteria: QuantileSearchCriteria) -> f64 {
        let index = match criteria {
            QuantileSearchCriteria::Inclusive => {
                let natural_rank = (norm_rank * self.total_n as f64).ceil() as u64;
                lower_bound_by_weight(&self.cum_weights, natural_rank)
            }
            QuantileSearchCriteria::Exclusive => {
                let natural_rank = (norm_rank * self.total_n as f64).floor() as u64;
                upper_bound_by_weight(&self.cum_weights, natural_rank)
            }
        };
        if index >= self.quantiles.len() {
            // only the exclusive search at rank 1.0 runs off the end
            return self.quantiles[self.quantiles.len() - 1];
        }
        self.quantiles[index]
    }

    /// Merges one level's sorted buffer into the already-merged prefix
    /// `quantiles[0..count)`, tagging each incoming item with the level
    /// weight. Writes walk from the high end downward so nothing is
    /// overwritten before it is consumed.
    fn merge_sort_in(&mut self, buf_in: &FloatBuffer, buf_weight: u64, count: usize) {
        let incoming = buf_in.live();
        let mut i = count;
        let mut j = incoming.len();
        let mut k = count + incoming.len();
        while k > 0 {
            k -= 1;
            if i > 0 && j > 0 {
                if self.quantiles[i - 1] >= incoming[j - 1] {
                    self.quantiles[k] = self.quantiles[i - 1];
                    // not yet natural ranks, still individual weights
                    self.cum_weights[k] = self.cum_weights[i - 1];
                    i -= 1;
                } else {
                    self.quantiles[k] = incoming[j - 1];
                    self.cum_weights[k] = buf_weight;
                    j -= 1;
                }
            } else if i > 0 {
                self.quantiles[k] = self.quantiles[i - 1];
                self.cum_weights[k] = self.cum_weights[i - 1];
                i -= 1;
            } else {
                self.quantiles[k] = incoming[j - 1];
                self.cum_weights[k] = buf_weight;
                j -= 1;
            }
        }
    }

    /// Converts per-item weights into cumulative natural ranks in place.
    fn create_cumulative_native_ranks(&mut self) {
        let length = self.quantiles.len();
        for i in 1..length {
            self.cum_weights[i] += self.cum_weights[i - 1];
        }
        if self.total_n > 0 {
            assert_eq!(
                self.cum_weights[length - 1],
                self.total_n,
                "cumulative weights must sum to the stream length"
            );
        }
    }

    #[cfg(test)]
    pub fn quantiles(&self) -> &[f64] {
        &self.quantiles
    }

    #[cfg(test)]
    pub fn cum_weights(&self) -> &[u64] {
        &self.cum_weights
    }
}

/// Index of the first cumulative weight at or above `weight`.
fn lower_bound_by_weight(cum_weights: &[u64], weight: u64) -> usize {
    let mut left = 0;
    let mut right = cum_weights.len();
    while left < right {
        let mid = left + (right - left) / 2;
        if cum_weights[mid] < weight {
            left = mid + 1;
        } else {
            right = mid;
        }
    }
    left
}

/// Index of the first cumulative weight strictly above `weight`.
fn upper_bound_by_weight(cum_weights: &[u64], weight: u64) -> usize {
    let mut left = 0;
    let mut right = cum_weights.len();
    while left < right {
        let mid = left + (right - left) / 2;
        if cum_weights[mid] > weight {
            right = mid;
        } else {
            left = mid + 1;
        }
    }
    left
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bound_searches() {
        let cum_weights = [1u64, 3, 4, 8];
        assert_eq!(lower_bound_by_weight(&cum_weights, 0), 0);
        assert_eq!(lower_bound_by_weight(&cum_weights, 3), 1);
        assert_eq!(lower_bound_by_weight(&cum_weights, 5), 3);
        assert_eq!(lower_bound_by_weight(&cum_weights, 9), 4);
        assert_eq!(upper_bound_by_weight(&cum_weights, 0), 0);
        assert_eq!(upper_bound_by_weight(&cum_weights, 3), 2);
        assert_eq!(upper_bound_by_weight(&cum_weights, 8), 4);
    }

    #[test]
    fn test_build_from_single_level() {
        let mut compactors = vec![ReqCompactor::new(true, 0, 4, 1)];
        for item in [4.0, 1.0, 3.0, 2.0] {
            compactors[0].buf_mut().append(item);
        }
        let view = ReqSortedView::build(&mut compactors, 4, 4);
        assert_eq!(view.quantiles(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(view.cum_weights(), &[1, 2, 3, 4]);
    }

    #[test]
    fn test_build_weighs_levels() {
        // level 0 holds {2, 4} at weight 1, level 1 holds {1, 3} at weight 2
        let mut compactors = vec![
            ReqCompactor::new(false, 0, 4, 1),
            ReqCompactor::new(false, 1, 4, 1),
        ];
        compactors[0].buf_mut().append(2.0);
        compactors[0].buf_mut().append(4.0);
        compactors[1].buf_mut().append(1.0);
        compactors[1].buf_mut().append(3.0);

        let view = ReqSortedView::build(&mut compactors, 6, 4);
        assert_eq!(view.quantiles(), &[1.0, 2.0, 3.0, 4.0]);
        assert_eq!(view.cum_weights(), &[2, 3, 5, 6]);
    }

    #[test]
    fn test_quantile_search_criteria() {
        let mut compactors = vec![ReqCompactor::new(true, 0, 4, 1)];
        for item in [1.0, 2.0, 3.0, 4.0] {
            compactors[0].buf_mut().append(item);
        }
        let view = ReqSortedView::build(&mut compactors, 4, 4);

        assert_eq!(view.quantile(0.5, QuantileSearchCriteria::Inclusive), 2.0);
        assert_eq!(view.quantile(0.5, QuantileSearchCriteria::Exclusive), 3.0);
        // the exclusive search at full rank finds no index and answers the max
        assert_eq!(view.quantile(1.0, QuantileSearchCriteria::Exclusive), 4.0);
        assert_eq!(view.quantile(1.0, QuantileSearchCriteria::Inclusive), 4.0);
        assert_eq!(view.quantile(0.0, QuantileSearchCriteria::Inclusive), 1.0);
    }

    #[test]
    #[should_panic(expected = "cumulative weights must sum to the stream length")]
    fn test_weight_mismatch_fails_loudly() {
        let mut compactors = vec![ReqCompactor::new(true, 0, 4, 1)];
        compactors[0].buf_mut().append(1.0);
        ReqSortedView::build(&mut compactors, 3, 1);
    }
}
