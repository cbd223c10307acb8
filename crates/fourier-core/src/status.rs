/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Numeric status codes and their descriptions
//!
//! Every error raised by the fourier crates maps to one of
//! these codes, and every code maps to a fixed human readable string.

/// Status codes shared by all fourier routines
#[repr(i32)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum StatusCode {
    Success = 0,
    Failure,
    InvalidArgument,
    InvalidObject,
    InvalidPixelDepth,
    NullPointer,
    OutOfMemory,
    DivideByZero,
    NotImplemented,
    UnknownFormat,
    FileOpen,
    FileRead,
    EndOfStream
}

static ALL_CODES: [StatusCode; 13] = [
    StatusCode::Success,
    StatusCode::Failure,
    StatusCode::InvalidArgument,
    StatusCode::InvalidObject,
    StatusCode::InvalidPixelDepth,
    StatusCode::NullPointer,
    StatusCode::OutOfMemory,
    StatusCode::DivideByZero,
    StatusCode::NotImplemented,
    StatusCode::UnknownFormat,
    StatusCode::FileOpen,
    StatusCode::FileRead,
    StatusCode::EndOfStream
];

impl StatusCode {
    /// Return the numeric value of this code
    pub const fn code(self) -> i32 {
        self as i32
    }

    /// Convert a raw code back into a status code,
    /// returning `None` for values outside the table
    pub fn from_code(code: i32) -> Option<StatusCode> {
        usize::try_from(code)
            .ok()
            .and_then(|index| ALL_CODES.get(index).copied())
    }

    /// Human readable description of this code
    pub const fn as_str(self) -> &'static str {
        match self {
            StatusCode::Success => "success",
            StatusCode::Failure => "failure",
            StatusCode::InvalidArgument => "invalid argument",
            StatusCode::InvalidObject => "invalid object",
            StatusCode::InvalidPixelDepth => "invalid pixel depth",
            StatusCode::NullPointer => "null pointer",
            StatusCode::OutOfMemory => "insufficient memory",
            StatusCode::DivideByZero => "divide by zero",
            StatusCode::NotImplemented => "feature not implemented",
            StatusCode::UnknownFormat => "unknown file format",
            StatusCode::FileOpen => "file open error",
            StatusCode::FileRead => "file read error",
            StatusCode::EndOfStream => "end of file reached"
        }
    }

    /// Describe a raw numeric code
    ///
    /// ```
    /// use fourier_core::status::StatusCode;
    /// assert_eq!(StatusCode::describe(2), "invalid argument");
    /// assert_eq!(StatusCode::describe(-4), "unknown error code");
    /// ```
    pub fn describe(code: i32) -> &'static str {
        match StatusCode::from_code(code) {
            Some(status) => status.as_str(),
            None => "unknown error code"
        }
    }
}

impl core::fmt::Display for StatusCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How serious a diagnostic is
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Severity {
    Debug,
    Warning,
    Error,
    Fatal
}

impl Severity {
    /// The prefix used when a diagnostic is logged
    pub const fn label(self) -> &'static str {
        match self {
            Severity::Debug => "Debug",
            Severity::Warning => "Warning",
            Severity::Error => "Error",
            Severity::Fatal => "Fatal error"
        }
    }
}

/// Format a diagnostic as `<severity> in <operation>: <message>`
pub fn diagnostic(severity: Severity, operation: &str, message: &dyn core::fmt::Display) -> String {
    format!("{} in {}: {}", severity.label(), operation, message)
}

#[cfg(test)]
mod tests {
    use crate::status::{diagnostic, Severity, StatusCode};

    #[test]
    fn codes_round_trip_through_table() {
        for code in 0..13 {
            let status = StatusCode::from_code(code).unwrap();
            assert_eq!(status.code(), code);
        }
        assert!(StatusCode::from_code(13).is_none());
        assert!(StatusCode::from_code(-1).is_none());
    }

    #[test]
    fn descriptions() {
        assert_eq!(StatusCode::EndOfStream.as_str(), "end of file reached");
        assert_eq!(StatusCode::OutOfMemory.to_string(), "insufficient memory");
        assert_eq!(StatusCode::describe(99), "unknown error code");
    }

    #[test]
    fn diagnostic_shape() {
        let msg = diagnostic(Severity::Error, "open", &"file open error");
        assert_eq!(msg, "Error in open: file open error");

        let msg = diagnostic(Severity::Fatal, "kind", &StatusCode::InvalidObject);
        assert_eq!(msg, "Fatal error in kind: invalid object");
    }
}
