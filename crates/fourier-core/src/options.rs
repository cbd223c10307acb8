/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Decoder options and the error policy
//!
//! This module exposes a struct for which all implemented
//! decoders get shared options for decoding, and the
//! [`ErrorPolicy`] deciding how failures are escalated.
//!
//! All supported options are put into one [`DecoderOptions`] to allow for global configurations
//! options i.e the same `DecoderOptions` can be reused for all other decoders

/// How failures and warnings are treated by the routines
/// that receive this policy.
///
/// - Default: abort on error is off, warnings are on.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ErrorPolicy {
    /// Escalate every reported error to a fatal one
    abort_on_error: bool,
    /// Emit warnings through the logger
    warnings:       bool
}

impl ErrorPolicy {
    /// Create a new error policy
    pub const fn new(abort_on_error: bool, warnings: bool) -> ErrorPolicy {
        ErrorPolicy {
            abort_on_error,
            warnings
        }
    }
    /// Return true if errors should be escalated to fatal errors
    pub const fn get_abort_on_error(&self) -> bool {
        self.abort_on_error
    }
    /// Return true if warnings should be logged
    pub const fn get_warnings(&self) -> bool {
        self.warnings
    }
    /// Set whether errors should be escalated to fatal errors
    pub fn set_abort_on_error(mut self, yes: bool) -> Self {
        self.abort_on_error = yes;
        self
    }
    /// Set whether warnings should be logged
    pub fn set_warnings(mut self, yes: bool) -> Self {
        self.warnings = yes;
        self
    }
}

impl Default for ErrorPolicy {
    fn default() -> Self {
        ErrorPolicy::new(false, true)
    }
}

/// Decoder options
///
/// Not all options are respected by decoders
/// Each option specifies decoders that respect it
#[derive(Debug, Copy, Clone)]
pub struct DecoderOptions {
    /// Maximum width for which decoders will
    /// not try to decode images larger than
    /// the specified width.
    ///
    /// - Default value: 16384
    /// - Respected by: `all decoders`
    max_width:     usize,
    /// Maximum height for which decoders will not
    /// try to decode images larger than the
    /// specified height
    ///
    /// - Default value: 16384
    /// - Respected by: `all decoders`
    max_height:    usize,
    /// Maximum length of a single header token
    ///
    /// - Default value: 80
    /// - Respected by: `pnm`
    max_token_len: usize,
    /// How errors and warnings raised during decoding are treated
    policy:        ErrorPolicy
}

impl Default for DecoderOptions {
    fn default() -> Self {
        Self {
            max_width:     1 << 14,
            max_height:    1 << 14,
            max_token_len: 80,
            policy:        ErrorPolicy::default()
        }
    }
}

/// Global options respected by all decoders
impl DecoderOptions {
    /// Get maximum width configured for which the decoder
    /// should not try to decode images greater than this width
    pub const fn get_max_width(&self) -> usize {
        self.max_width
    }

    /// Get maximum height configured for which the decoder should
    /// not try to decode images greater than this height
    pub const fn get_max_height(&self) -> usize {
        self.max_height
    }

    /// Get the longest header token a decoder will accept
    pub const fn get_max_token_len(&self) -> usize {
        self.max_token_len
    }

    /// Get the error policy decoders should follow
    pub const fn get_policy(&self) -> ErrorPolicy {
        self.policy
    }

    /// Set maximum width for which the decoder should not try
    /// decoding images greater than that width
    ///
    /// # Arguments
    ///
    /// * `width`:  The maximum width allowed
    ///
    /// returns: DecoderOptions
    pub fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Set maximum height for which the decoder should not try
    /// decoding images greater than that height
    /// # Arguments
    ///
    /// * `height`: The maximum height allowed
    ///
    /// returns: DecoderOptions
    pub fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }

    /// Set the longest header token a decoder will accept
    /// before failing
    pub fn set_max_token_len(mut self, len: usize) -> Self {
        self.max_token_len = len;
        self
    }

    /// Set the error policy
    pub fn set_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }
}
