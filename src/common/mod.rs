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

//! Utilities shared across sketch families.

pub mod random;

/// Selects which natural rank a quantile query resolves to.
///
/// Given a normalized rank r over a stream of N items:
///
/// - `Inclusive` answers the smallest value v such that the cumulative
///   count of items less than or equal to v is at least ceil(r * N).
/// - `Exclusive` answers the smallest value v such that the cumulative
///   count of items less than or equal to v strictly exceeds floor(r * N);
///   at r = 1.0 this is the maximum observed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuantileSearchCriteria {
    /// Resolve to the natural rank ceil(r * N).
    Inclusive,
    /// Resolve past the natural rank floor(r * N).
    Exclusive,
}
