/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! An execution context carrying the error policy
//!
//! Routines on [`Image`] return plain `Result`s, a [`Context`] decides what
//! happens to a failure once it surfaces: it is logged as
//! `<severity> in <operation>: <message>` and, if the policy asks for it,
//! escalated to a fatal [`Aborted`](ImageErrors::Aborted) error.
//!
//! ```
//! use fourier_core::options::{DecoderOptions, ErrorPolicy};
//! use fourier_core::pixel_kind::PixelKind;
//! use fourier_image::context::Context;
//!
//! let policy = ErrorPolicy::default().set_abort_on_error(true);
//! let ctx = Context::new(DecoderOptions::default().set_policy(policy));
//!
//! let err = ctx.allocate(PixelKind::Gray, 0, 10).unwrap_err();
//! assert!(err.is_fatal());
//! ```
use std::path::Path;

use fourier_core::bytestream::ByteIoTrait;
use fourier_core::log::{error, warn};
use fourier_core::options::{DecoderOptions, ErrorPolicy};
use fourier_core::pixel_kind::PixelKind;
use fourier_core::status::{diagnostic, Severity};

use crate::codecs::ImageFormat;
use crate::errors::ImageErrors;
use crate::image::Image;

#[derive(Copy, Clone, Debug, Default)]
pub struct Context {
    options: DecoderOptions
}

impl Context {
    pub const fn new(options: DecoderOptions) -> Context {
        Context { options }
    }

    pub const fn options(&self) -> DecoderOptions {
        self.options
    }

    pub const fn policy(&self) -> ErrorPolicy {
        self.options.get_policy()
    }

    /// Log `err` as a failure of `operation` and apply the policy to it
    ///
    /// Fatal errors are returned as is, other errors are escalated
    /// to [`ImageErrors::Aborted`] when abort on error is set.
    pub fn report(&self, operation: &'static str, err: ImageErrors) -> ImageErrors {
        error!("{}", diagnostic(err.severity(), operation, &err));

        if err.is_fatal() || !self.policy().get_abort_on_error() {
            return err;
        }
        let escalated = ImageErrors::Aborted {
            operation,
            source: Box::new(err)
        };
        error!("{}", diagnostic(Severity::Fatal, operation, &"aborting on error"));

        escalated
    }

    /// Pass `result` through, reporting its error if any
    pub fn check<T>(&self, operation: &'static str, result: Result<T, ImageErrors>) -> Result<T, ImageErrors> {
        result.map_err(|err| self.report(operation, err))
    }

    /// Emit a warning unless warnings are disabled
    ///
    /// Returns the diagnostic that was logged
    pub fn warn(&self, operation: &str, message: &dyn core::fmt::Display) -> Option<String> {
        if !self.policy().get_warnings() {
            return None;
        }
        let msg = diagnostic(Severity::Warning, operation, message);
        warn!("{msg}");
        Some(msg)
    }

    pub fn allocate(&self, kind: PixelKind, rows: usize, cols: usize) -> Result<Image, ImageErrors> {
        self.check("allocate", Image::allocate(kind, rows, cols))
    }

    pub fn allocate_const(
        &self, kind: PixelKind, rows: usize, cols: usize, value: f64
    ) -> Result<Image, ImageErrors> {
        self.check("allocate_const", Image::allocate_const(kind, rows, cols, value))
    }

    /// Open a file with this context's decoder options
    pub fn open<P: AsRef<Path>>(&self, path: P) -> Result<Image, ImageErrors> {
        self.check("open", Image::open_with_options(path, self.options))
    }

    /// Decode an image from a byte source with this context's decoder options
    pub fn read<T: ByteIoTrait>(&self, src: T) -> Result<Image, ImageErrors> {
        self.check("read", Image::read(src, self.options))
    }

    /// Save an image, picking the format from the extension
    pub fn save<P: AsRef<Path>>(&self, image: &Image, path: P) -> Result<(), ImageErrors> {
        self.check("save", image.save(path))
    }

    /// Save an image in `format`
    pub fn save_to<P: AsRef<Path>>(
        &self, image: &Image, path: P, format: ImageFormat
    ) -> Result<(), ImageErrors> {
        self.check("save", image.save_to(path, format))
    }

    pub fn free(&self, image: &mut Image) -> Result<(), ImageErrors> {
        self.check("free", image.free())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use fourier_core::options::{DecoderOptions, ErrorPolicy};
    use fourier_core::pixel_kind::PixelKind;
    use fourier_core::status::{Severity, StatusCode};

    use crate::context::Context;
    use crate::errors::ImageErrors;

    fn with_policy(policy: ErrorPolicy) -> Context {
        Context::new(DecoderOptions::default().set_policy(policy))
    }

    #[test]
    fn errors_pass_through_by_default() {
        let ctx = Context::default();
        let err = ctx.read(Cursor::new(b"")).unwrap_err();

        assert!(matches!(err, ImageErrors::EndOfStream));
        assert_eq!(err.severity(), Severity::Error);
    }

    #[test]
    fn abort_on_error_escalates() {
        let ctx = with_policy(ErrorPolicy::default().set_abort_on_error(true));
        let err = ctx.read(Cursor::new(b"P7")).unwrap_err();

        assert!(err.is_fatal());
        assert_eq!(err.code(), StatusCode::UnknownFormat);
        assert!(matches!(err, ImageErrors::Aborted { operation: "read", .. }));
    }

    #[test]
    fn fatal_errors_are_not_wrapped_twice() {
        let ctx = with_policy(ErrorPolicy::default().set_abort_on_error(true));
        let err = ctx.report("free", ImageErrors::InvariantViolation("bad rank".into()));

        assert!(matches!(err, ImageErrors::InvariantViolation(_)));
    }

    #[test]
    fn double_free_is_reported() {
        let ctx = Context::default();
        let mut image = ctx.allocate(PixelKind::Binary, 2, 2).unwrap();

        ctx.free(&mut image).unwrap();
        let err = ctx.free(&mut image).unwrap_err();
        assert_eq!(err.code(), StatusCode::InvalidObject);
    }

    #[test]
    fn warnings_follow_policy() {
        let ctx = Context::default();
        assert_eq!(
            ctx.warn("decode", &"payload truncated").as_deref(),
            Some("Warning in decode: payload truncated")
        );

        let quiet = with_policy(ErrorPolicy::default().set_warnings(false));
        assert!(quiet.warn("decode", &"payload truncated").is_none());
    }
}
