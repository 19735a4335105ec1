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

use log::debug;

use super::DEFAULT_SEED;
use super::compactor::ReqCompactor;
use super::helper::check_k;
use super::helper::check_normalized_rank;
use super::sorted_view::ReqSortedView;
use crate::common::QuantileSearchCriteria;
use crate::error::Error;

/// REQ sketch for estimating quantiles with rank-relative error.
///
/// See the [req module level documentation](crate::req) for more.
#[derive(Debug, Clone)]
pub struct ReqSketch {
    k: u16,
    hra: bool,
    total_n: u64,
    min_item: Option<f64>,
    max_item: Option<f64>,
    ret_items: usize,
    max_nom_size: usize,
    seed: u64,
    compactors: Vec<ReqCompactor>,
    sorted_view: Option<ReqSortedView>,
}

impl ReqSketch {
    /// Creates a new sketch.
    ///
    /// `k` controls the size and error of the sketch. It must be even and in
    /// the range [4, 1024]; a value of 12 roughly corresponds to a 1%
    /// relative error guarantee at 95% confidence. When
    /// `high_rank_accuracy` is true the high ranks are prioritized for
    /// better accuracy, otherwise the low ranks are.
    ///
    /// # Examples
    ///
    /// ```
    /// # use quantile_sketches::req::ReqSketch;
    /// let sketch = ReqSketch::new(12, true)?;
    /// assert!(sketch.is_empty());
    /// # Ok::<(), quantile_sketches::error::Error>(())
    /// ```
    pub fn new(k: u16, high_rank_accuracy: bool) -> Result<Self, Error> {
        Self::with_seed(k, high_rank_accuracy, DEFAULT_SEED)
    }

    /// Creates a new sketch whose compaction coin flips derive from `seed`.
    ///
    /// Two sketches built with the same seed and fed the same stream answer
    /// identical quantiles.
    pub fn with_seed(k: u16, high_rank_accuracy: bool, seed: u64) -> Result<Self, Error> {
        check_k(k)?;
        let mut sketch = Self {
            k,
            hra: high_rank_accuracy,
            total_n: 0,
            min_item: None,
            max_item: None,
            ret_items: 0,
            max_nom_size: 0,
            seed,
            compactors: Vec::new(),
            sorted_view: None,
        };
        sketch.grow();
        Ok(sketch)
    }

    /// Returns parameter k used to configure this sketch.
    pub fn k(&self) -> u16 {
        self.k
    }

    /// Returns true if the sketch prioritizes high ranks.
    pub fn high_rank_accuracy(&self) -> bool {
        self.hra
    }

    /// Returns total weight of the stream.
    pub fn n(&self) -> u64 {
        self.total_n
    }

    /// Returns true if the sketch has not seen any data.
    pub fn is_empty(&self) -> bool {
        self.total_n == 0
    }

    /// Returns the number of retained items.
    pub fn num_retained(&self) -> usize {
        self.ret_items
    }

    /// Returns true once any compaction has created a level beyond the first.
    pub fn is_estimation_mode(&self) -> bool {
        self.compactors.len() > 1
    }

    /// Returns the minimum item seen by the sketch.
    pub fn min_item(&self) -> Result<f64, Error> {
        self.min_item.ok_or_else(Error::empty_sketch)
    }

    /// Returns the maximum item seen by the sketch.
    pub fn max_item(&self) -> Result<f64, Error> {
        self.max_item.ok_or_else(Error::empty_sketch)
    }

    /// Updates the sketch with a new item. ±∞ are legal observations.
    ///
    /// Fails with [`crate::error::ErrorKind::InvalidInput`] on NaN, leaving
    /// the sketch untouched.
    pub fn update(&mut self, item: f64) -> Result<(), Error> {
        if item.is_nan() {
            return Err(Error::invalid_input("cannot update with NaN"));
        }

        match self.min_item {
            None => {
                self.min_item = Some(item);
                self.max_item = Some(item);
            }
            Some(min) => {
                if item < min {
                    self.min_item = Some(item);
                }
                if let Some(max) = self.max_item {
                    if item > max {
                        self.max_item = Some(item);
                    }
                }
            }
        }

        self.compactors[0].buf_mut().append(item);
        self.ret_items += 1;
        self.total_n += 1;
        if self.ret_items >= self.max_nom_size {
            self.compactors[0].buf_mut().sort();
            self.compress();
        }
        self.sorted_view = None;
        Ok(())
    }

    /// Returns the quantile for the given normalized rank.
    ///
    /// Fails with [`crate::error::ErrorKind::EmptySketch`] before any update
    /// and with [`crate::error::ErrorKind::RankOutOfBounds`] when `norm_rank`
    /// is outside [0.0, 1.0].
    pub fn quantile(
        &mut self,
        norm_rank: f64,
        criteria: QuantileSearchCriteria,
    ) -> Result<f64, Error> {
        if self.is_empty() {
            return Err(Error::empty_sketch());
        }
        check_normalized_rank(norm_rank)?;

        let view = match self.sorted_view.take() {
            Some(view) => view,
            None => ReqSortedView::build(&mut self.compactors, self.total_n, self.ret_items),
        };
        let quantile = view.quantile(norm_rank, criteria);
        self.sorted_view = Some(view);
        Ok(quantile)
    }

    /// Walks the levels bottom-up and compacts every level at or past its
    /// nominal capacity, promoting survivors one level higher. The walk
    /// respects the current level count because a compaction at the top
    /// grows the stack mid-loop.
    fn compress(&mut self) {
        let mut h = 0;
        while h < self.compactors.len() {
            let comp_ret_items = self.compactors[h].buf().count();
            let comp_nom_capacity = self.compactors[h].nom_capacity();
            if comp_ret_items >= comp_nom_capacity {
                if h + 1 >= self.compactors.len() {
                    // at the top, add a level
                    self.grow();
                }

                let (promoted, delta_ret_items, delta_nom_size) = self.compactors[h].compact();
                self.compactors[h + 1].buf_mut().merge_sort_in(&promoted);
                self.ret_items = (self.ret_items as i64 + delta_ret_items) as usize;
                self.max_nom_size = (self.max_nom_size as i64 + delta_nom_size) as usize;
            }
            h += 1;
        }
        self.sorted_view = None;
        debug!(
            "compressed req sketch, levels={}, ret_items={}, max_nom_size={}",
            self.compactors.len(),
            self.ret_items,
            self.max_nom_size,
        );
    }

    fn grow(&mut self) {
        let lg_weight = self.compactors.len();
        self.compactors
            .push(ReqCompactor::new(self.hra, lg_weight, self.k as usize, self.seed));
        self.max_nom_size = self.compute_max_nom_size();
    }

    fn compute_max_nom_size(&self) -> usize {
        self.compactors
            .iter()
            .map(ReqCompactor::nom_capacity)
            .sum()
    }
}
