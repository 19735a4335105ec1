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

//! Relative-error quantiles (REQ) sketch.
//!
//! The REQ sketch estimates quantiles of a stream of f64 observations with
//! accuracy that is relative to the requested rank rather than uniform over
//! all ranks. It maintains a stack of compactors, one per level; each level
//! h holds items that stand in for 2^h input observations. When the sketch
//! reaches its nominal capacity, overflowing levels compact: a deterministic
//! schedule selects a region of the level's buffer, every second item of
//! that region (chosen by coin) is promoted to the next level, and the rest
//! are discarded.
//!
//! A sketch is configured for high-rank accuracy (hra) or low-rank accuracy.
//! In hra mode compaction consumes the low end of each buffer, so the
//! largest observations survive longest and high quantiles stay precise;
//! low-rank mode is the mirror image.
//!
//! # Usage
//!
//! ```rust
//! # use quantile_sketches::common::QuantileSearchCriteria;
//! # use quantile_sketches::req::ReqSketch;
//! let mut sketch = ReqSketch::new(12, true)?;
//! for item in [12.0, 6.0, 10.0, 1.0] {
//!     sketch.update(item)?;
//! }
//! assert_eq!(sketch.quantile(0.0, QuantileSearchCriteria::Inclusive)?, 1.0);
//! assert_eq!(sketch.quantile(0.5, QuantileSearchCriteria::Inclusive)?, 6.0);
//! assert_eq!(sketch.quantile(1.0, QuantileSearchCriteria::Inclusive)?, 12.0);
//! # Ok::<(), quantile_sketches::error::Error>(())
//! ```

mod buffer;
mod compactor;
mod helper;
mod sketch;
mod sorted_view;

pub use self::sketch::ReqSketch;

/// Minimum value of parameter k, and the floor for compactor section sizes.
pub const MIN_K: u16 = 4;
/// Maximum value of parameter k.
pub const MAX_K: u16 = 1024;
/// Default seed for the per-compactor coin-flip generators.
pub const DEFAULT_SEED: u64 = 1;

/// Nominal capacity of a compactor is this multiple of `num_sections * section_size`.
pub(crate) const CAPACITY_MULTIPLIER: usize = 2;
/// Number of sections a fresh compactor starts with.
pub(crate) const INITIAL_NUM_SECTIONS: usize = 3;
