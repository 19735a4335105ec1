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

use super::MAX_K;
use super::MIN_K;
use crate::error::Error;

/// Counts the low-order one-bits of `v`.
pub(crate) fn trailing_ones(v: u64) -> u32 {
    (!v).trailing_zeros()
}

/// Rounds to the nearest integer, ties to even.
pub(crate) fn nearest_even(v: f64) -> usize {
    v.round_ties_even() as usize
}

pub(crate) fn check_k(k: u16) -> Result<(), Error> {
    if k & 1 != 0 || !(MIN_K..=MAX_K).contains(&k) {
        return Err(Error::config_invalid(format!(
            "k must be even and in the range [{MIN_K}, {MAX_K}], got {k}"
        )));
    }
    Ok(())
}

pub(crate) fn check_normalized_rank(rank: f64) -> Result<(), Error> {
    if !(0.0..=1.0).contains(&rank) {
        return Err(Error::rank_out_of_bounds(rank));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_trailing_ones() {
        assert_eq!(trailing_ones(0x0), 0);
        assert_eq!(trailing_ones(0x1), 1);
        assert_eq!(trailing_ones(0x3), 2);
        assert_eq!(trailing_ones(0x5), 1);
        assert_eq!(trailing_ones(0x7), 3);
    }

    #[test]
    fn test_nearest_even_rounds_ties_to_even() {
        assert_eq!(nearest_even(2.5), 2);
        assert_eq!(nearest_even(3.5), 4);
        assert_eq!(nearest_even(5.656854249492381), 6);
        assert_eq!(nearest_even(4.242640687119285), 4);
    }

    #[test]
    fn test_check_k() {
        assert!(check_k(4).is_ok());
        assert!(check_k(12).is_ok());
        assert!(check_k(1024).is_ok());
        for bad in [0u16, 2, 3, 13, 1023, 1026] {
            let err = check_k(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
        }
    }

    #[test]
    fn test_check_normalized_rank() {
        assert!(check_normalized_rank(0.0).is_ok());
        assert!(check_normalized_rank(1.0).is_ok());
        for bad in [-0.1, 1.1, f64::NAN] {
            let err = check_normalized_rank(bad).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::RankOutOfBounds);
        }
    }
}
