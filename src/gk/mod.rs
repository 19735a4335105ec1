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

//! Greenwald-Khanna quantile summary.
//!
//! The summary keeps an ordered list of tuples (value, gap, delta): `gap`
//! counts the observations the tuple absorbs below it, `delta` bounds how
//! far its true rank may drift. Periodic compression merges neighboring
//! tuples whose combined uncertainty stays below 2εn, so the summary answers
//! any quantile within ±εn of the true rank while retaining
//! O((1/ε)·log(εn)) tuples.
//!
//! It is kept alongside [`crate::req`] for side-by-side comparison of the
//! rank-error and relative-error families.

mod summary;

pub use self::summary::GkSummary;
