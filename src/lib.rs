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

//! Streaming approximate-quantile sketches.
//!
//! The crate provides two sketch families over a stream of finite f64
//! observations, plus an exact reference used for testing:
//!
//! - [`req`]: a relative-error quantiles (REQ) sketch built from a cascade
//!   of hierarchical compactors. This is the primary sketch of the crate.
//! - [`gk`]: a Greenwald-Khanna summary whose tuples carry
//!   (value, gap, delta), kept for side-by-side comparison.
//! - [`naive`]: an exact-sort oracle that answers precise order statistics.
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
//! let median = sketch.quantile(0.5, QuantileSearchCriteria::Inclusive)?;
//! assert_eq!(median, 6.0);
//! # Ok::<(), quantile_sketches::error::Error>(())
//! ```

pub mod common;
pub mod error;
pub mod gk;
pub mod naive;
pub mod req;
