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

/// Growable array of f64 items kept contiguous at one end of its storage.
///
/// When `space_at_bottom` is true the live region occupies
/// `[capacity - count, capacity)` and free slots sit below it; otherwise the
/// live region is `[0, count)` with free slots above. Compaction and merging
/// rely on the live region staying anchored to its end across growth.
#[derive(Debug, Clone)]
pub(crate) struct FloatBuffer {
    arr: Vec<f64>,
    count: usize,
    capacity: usize,
    delta: usize,
    sorted: bool,
    space_at_bottom: bool,
}

impl FloatBuffer {
    /// Creates an empty buffer with the given capacity and growth stride.
    pub fn new(capacity: usize, delta: usize, space_at_bottom: bool) -> Self {
        Self {
            arr: vec![0.0; capacity],
            count: 0,
            capacity,
            delta,
            sorted: true,
            space_at_bottom,
        }
    }

    /// Adopts a vec as an exactly-full buffer with no growth stride.
    pub fn wrap(arr: Vec<f64>, sorted: bool, space_at_bottom: bool) -> Self {
        let len = arr.len();
        let mut buf = Self {
            arr,
            count: len,
            capacity: len,
            delta: 0,
            sorted,
            space_at_bottom,
        };
        buf.sort();
        buf
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_sorted(&self) -> bool {
        self.sorted
    }

    /// The live region as a slice, lowest logical offset first.
    pub fn live(&self) -> &[f64] {
        if self.space_at_bottom {
            &self.arr[self.capacity - self.count..self.capacity]
        } else {
            &self.arr[..self.count]
        }
    }

    /// Appends an item at the free end of the live region.
    pub fn append(&mut self, item: f64) {
        self.ensure_space(1);
        let i = if self.space_at_bottom {
            self.capacity - self.count - 1
        } else {
            self.count
        };
        self.arr[i] = item;
        self.count += 1;
        self.sorted = false;
    }

    /// Sorts the live region in place.
    pub fn sort(&mut self) {
        if self.sorted {
            return;
        }
        let (start, end) = if self.space_at_bottom {
            (self.capacity - self.count, self.capacity)
        } else {
            (0, self.count)
        };
        self.arr[start..end].sort_unstable_by(f64::total_cmp);
        self.sorted = true;
    }

    /// Grows the storage to at least `new_capacity`, keeping the live region
    /// anchored to its end. Never shrinks.
    pub fn ensure_capacity(&mut self, new_capacity: usize) {
        if new_capacity <= self.capacity {
            return;
        }
        let mut out = vec![0.0; new_capacity];
        if self.space_at_bottom {
            out[new_capacity - self.count..]
                .copy_from_slice(&self.arr[self.capacity - self.count..self.capacity]);
        } else {
            out[..self.count].copy_from_slice(&self.arr[..self.count]);
        }
        self.arr = out;
        self.capacity = new_capacity;
    }

    /// Guarantees room for `space` more items, growing by the stride if needed.
    pub fn ensure_space(&mut self, space: usize) {
        if self.count + space <= self.capacity {
            return;
        }
        self.ensure_capacity(self.count + space + self.delta);
    }

    /// Shrinks the live count; residual slots stay behind the free end.
    pub fn trim_count(&mut self, new_count: usize) {
        if new_count < self.count {
            self.count = new_count;
        }
    }

    /// Extracts every second item of the logical range `[start_offset,
    /// end_offset)`, starting at the even or odd position, into a new
    /// exactly-full sorted buffer with the same orientation.
    ///
    /// # Panics
    ///
    /// Panics if the range length is odd.
    pub fn get_evens_or_odds(&mut self, start_offset: usize, end_offset: usize, odds: bool) -> Self {
        self.sort();

        let offset_range = end_offset - start_offset;
        assert!(offset_range & 1 == 0, "input range size must be even");

        let (mut start, mut end) = (start_offset, end_offset);
        if self.space_at_bottom {
            let off = self.capacity - self.count;
            start += off;
            end += off;
        }

        let mut out = Vec::with_capacity(offset_range / 2);
        let mut i = start + usize::from(odds);
        while i < end {
            out.push(self.arr[i]);
            i += 2;
        }
        Self::wrap(out, true, self.space_at_bottom)
    }

    /// Merges a sorted buffer into this sorted buffer in place.
    ///
    /// The merge writes from the interior toward the free end, so no live
    /// item is overwritten before it is consumed.
    ///
    /// # Panics
    ///
    /// Panics if either buffer is unsorted.
    pub fn merge_sort_in(&mut self, buf_in: &FloatBuffer) {
        assert!(
            self.sorted && buf_in.sorted,
            "both buffers must be sorted"
        );

        let incoming = buf_in.live();
        self.ensure_space(incoming.len());
        let tot_len = self.count + incoming.len();

        if self.space_at_bottom {
            // scan up, insert at bottom
            let tgt_start = self.capacity - tot_len;
            let mut i = self.capacity - self.count;
            let mut j = 0;
            for k in tgt_start..self.capacity {
                if i < self.capacity && j < incoming.len() {
                    if self.arr[i] <= incoming[j] {
                        self.arr[k] = self.arr[i];
                        i += 1;
                    } else {
                        self.arr[k] = incoming[j];
                        j += 1;
                    }
                } else if i < self.capacity {
                    self.arr[k] = self.arr[i];
                    i += 1;
                } else {
                    self.arr[k] = incoming[j];
                    j += 1;
                }
            }
        } else {
            // scan down, insert at top
            let mut i = self.count;
            let mut j = incoming.len();
            let mut k = tot_len;
            while k > 0 {
                k -= 1;
                if i > 0 && j > 0 {
                    if self.arr[i - 1] >= incoming[j - 1] {
                        self.arr[k] = self.arr[i - 1];
                        i -= 1;
                    } else {
                        self.arr[k] = incoming[j - 1];
                        j -= 1;
                    }
                } else if i > 0 {
                    self.arr[k] = self.arr[i - 1];
                    i -= 1;
                } else {
                    self.arr[k] = incoming[j - 1];
                    j -= 1;
                }
            }
        }

        self.count += incoming.len();
        self.sorted = true;
    }
}
