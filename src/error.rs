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

//! Error types for sketch operations

use std::fmt;

/// Kinds of failure a sketch operation can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The config for a sketch is invalid.
    ConfigInvalid,
    /// An observation fed to a sketch is invalid.
    InvalidInput,
    /// The requested operation is undefined for an empty sketch.
    EmptySketch,
    /// A normalized rank is outside [0.0, 1.0].
    RankOutOfBounds,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorKind::ConfigInvalid => "ConfigInvalid",
            ErrorKind::InvalidInput => "InvalidInput",
            ErrorKind::EmptySketch => "EmptySketch",
            ErrorKind::RankOutOfBounds => "RankOutOfBounds",
        })
    }
}

/// Error returned by all fallible sketch operations.
///
/// Every error carries a kind for programmatic matching and a message that
/// already names the offending parameter or value; an optional underlying
/// cause can be attached with [`Error::set_source`].
#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: String,
    source: Option<anyhow::Error>,
}

impl Error {
    /// Create a new Error with error kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn config_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigInvalid, message)
    }

    pub(crate) fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, message)
    }

    pub(crate) fn empty_sketch() -> Self {
        Self::new(
            ErrorKind::EmptySketch,
            "operation is undefined for an empty sketch",
        )
    }

    pub(crate) fn rank_out_of_bounds(rank: f64) -> Self {
        Self::new(
            ErrorKind::RankOutOfBounds,
            format!("normalized rank must be between 0 and 1, got {rank}"),
        )
    }

    /// Attach an underlying cause to the error.
    ///
    /// # Panics
    ///
    /// Panics if the error already carries a source.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::error::Error as _;
    /// use quantile_sketches::error::{Error, ErrorKind};
    ///
    /// let error = Error::new(ErrorKind::InvalidInput, "cannot update with NaN")
    ///     .set_source(std::io::Error::other("IO error"));
    /// assert!(error.source().is_some());
    /// ```
    pub fn set_source(mut self, src: impl Into<anyhow::Error>) -> Self {
        assert!(self.source.is_none(), "error already carries a source");
        self.source = Some(src.into());
        self
    }

    /// Return error's kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Return error's message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)?;
        if let Some(source) = &self.source {
            write!(f, " (caused by: {source})")?;
        }
        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|src| src.as_ref())
    }
}
