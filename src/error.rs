// Copyright (c) 2024-present, fjall-rs
// This source code is licensed under both the Apache 2.0 and MIT License
// (found in the LICENSE-* files in the repository)

/// Represents errors that can occur while configuring a table
#[derive(Debug)]
pub enum Error {
    /// A requested capacity cannot be satisfied
    ///
    /// Returned when a capacity hint exceeds [`MAX_CAPACITY`](crate::MAX_CAPACITY),
    /// past which the doubling growth schedule would overflow.
    InvalidCapacity(usize),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ProbingTableError: {self:?}")
    }
}

impl std::error::Error for Error {}

/// Table result
pub type Result<T> = std::result::Result<T, Error>;
