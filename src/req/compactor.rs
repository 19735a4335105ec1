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

use super::CAPACITY_MULTIPLIER;
use super::INITIAL_NUM_SECTIONS;
use super::MIN_K;
use super::buffer::FloatBuffer;
use super::helper::nearest_even;
use super::helper::trailing_ones;
use crate::common::random::XorShift64Star;

/// One level of the REQ compactor cascade.
///
/// Items held at level h stand in for `2^h` input observations. The buffer
/// is split into `num_sections` sections of `section_size` items each; the
/// compaction schedule (`state`) decides how many sections each compaction
/// consumes, so that higher-numbered sections participate at a dyadic
/// cadence and extreme-order statistics survive longest.
#[derive(Debug, Clone)]
pub(crate) struct ReqCompactor {
    lg_weight: usize,
    hra: bool,
    state: u64,
    section_size_flt: f64,
    section_size: usize,
    num_sections: usize,
    coin: bool,
    buf: FloatBuffer,
    random: XorShift64Star,
}

impl ReqCompactor {
    pub fn new(hra: bool, lg_weight: usize, section_size: usize, seed: u64) -> Self {
        let nom_capacity = CAPACITY_MULTIPLIER * INITIAL_NUM_SECTIONS * section_size;
        Self {
            lg_weight,
            hra,
            state: 0,
            section_size_flt: section_size as f64,
            section_size,
            num_sections: INITIAL_NUM_SECTIONS,
            coin: false,
            buf: FloatBuffer::new(2 * nom_capacity, nom_capacity, hra),
            random: XorShift64Star::seeded(seed),
        }
    }

    pub fn lg_weight(&self) -> usize {
        self.lg_weight
    }

    pub fn buf(&self) -> &FloatBuffer {
        &self.buf
    }

    pub fn buf_mut(&mut self) -> &mut FloatBuffer {
        &mut self.buf
    }

    /// Soft occupancy target for this level.
    pub fn nom_capacity(&self) -> usize {
        CAPACITY_MULTIPLIER * self.num_sections * self.section_size
    }

    /// Compacts the scheduled region of this level's buffer.
    ///
    /// Returns the promoted buffer destined for level `lg_weight + 1`,
    /// together with the signed change in retained items and in nominal
    /// capacity caused by this compaction.
    pub fn compact(&mut self) -> (FloatBuffer, i64, i64) {
        let start_ret_items = self.buf.count();
        let start_nom_capacity = self.nom_capacity();

        // choose a part of the buffer to compact
        let mut secs_to_compact = trailing_ones(self.state) as usize + 1;
        if self.num_sections < secs_to_compact {
            secs_to_compact = self.num_sections;
        }
        let (compaction_start, compaction_end) = self.compaction_range(secs_to_compact);
        assert!(
            compaction_end - compaction_start >= 2,
            "compaction range must hold at least two items"
        );

        if self.state & 1 == 1 {
            // alternate compactions reuse the inverted coin to cancel bias
            self.coin = !self.coin;
        } else {
            self.coin = self.random.next_f64() < 0.5;
        }

        let promote = self
            .buf
            .get_evens_or_odds(compaction_start, compaction_end, self.coin);
        self.buf
            .trim_count(self.buf.count() - (compaction_end - compaction_start));
        self.state += 1;
        self.ensure_enough_sections();

        let delta_ret_items =
            self.buf.count() as i64 - start_ret_items as i64 + promote.count() as i64;
        let delta_nom_size = self.nom_capacity() as i64 - start_nom_capacity as i64;
        (promote, delta_ret_items, delta_nom_size)
    }

    /// Shrinks the section size by sqrt(2) and doubles the section count once
    /// the schedule has exhausted every section pattern, refining granularity
    /// while keeping aggregate capacity roughly unchanged.
    fn ensure_enough_sections(&mut self) -> bool {
        if self.state < (1u64 << self.num_sections) - 1 || self.section_size <= MIN_K as usize {
            return false;
        }

        let section_size_flt = self.section_size_flt / std::f64::consts::SQRT_2;
        let ne = nearest_even(section_size_flt);
        if ne < MIN_K as usize {
            return false;
        }

        self.section_size_flt = section_size_flt;
        self.section_size = ne;
        self.num_sections <<= 1;
        let nom_capacity = self.nom_capacity();
        self.buf.ensure_capacity(2 * nom_capacity);
        true
    }

    /// Logical range of the buffer consumed by the next compaction.
    ///
    /// The non-compacted remainder always covers half the nominal capacity
    /// plus the sections the schedule spares this round; the range length is
    /// forced even so the promoted half is exact.
    fn compaction_range(&self, secs_to_compact: usize) -> (usize, usize) {
        let buf_len = self.buf.count();
        let mut non_compact =
            self.nom_capacity() / 2 + (self.num_sections - secs_to_compact) * self.section_size;
        if (buf_len - non_compact) & 1 == 1 {
            non_compact += 1;
        }

        if self.hra {
            (0, buf_len - non_compact)
        } else {
            (non_compact, buf_len)
        }
    }

    #[cfg(test)]
    pub fn section_size(&self) -> usize {
        self.section_size
    }

    #[cfg(test)]
    pub fn num_sections(&self) -> usize {
        self.num_sections
    }

    #[cfg(test)]
    pub fn state(&self) -> u64 {
        self.state
    }
}
