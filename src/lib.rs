//! barcode_sheet renders a numbered range of linear barcodes onto one long PDF page, one
//! barcode per row, each with an optional caption above it and its value printed below it.
//!
//! The entry point is `generator::generate`, which takes a `GenerationRequest` and writes the
//! finished document to disk. The pieces it is made of are usable on their own: the layout
//! arithmetic lives in `layout`, the symbol encoding behind the `BarcodeSymbology` trait in
//! `barcode`, and the drawing surface in `pdf`.

/// The module where the `ContextError` type is presented.
///
/// Every fallible function of this crate returns a `ContextError`, which carries a human readable
/// context, the propagated source error if there was one, and an `ErrorKind` telling apart
/// encoding failures from filesystem failures.
pub mod error;

/// Metrics and text encoding of the built-in Helvetica font.
pub mod font;

/// The module where the `BarcodeSymbology` seam is presented.
///
/// # Introduction
///
/// A symbology turns a string into a `RenderedBarcode`, a pattern of dark and light modules which
/// knows its own width (quiet zones included) and how to draw itself onto a `PdfCanvas`.
/// The `Code128` implementation delegates the symbol encoding to the `barcoders` crate and only
/// accepts printable ASCII, which is what code set B covers.
pub mod barcode;

/// The Document Generator: it iterates the requested range and draws every item.
pub mod generator;

/// Page geometry, unit conversions and the placement of the individual items.
pub mod layout;

/// The module where the `PdfCanvas` drawing surface is presented.
///
/// # Introduction
///
/// The canvas records drawing operations (text in the standard Helvetica font and filled
/// rectangles) for a single page and assembles the PDF document with `lopdf` only when it is
/// saved. The document information dictionary uses fixed timestamps, so rendering the same
/// request twice gives byte-identical files.
pub mod pdf;

/// `GenerationRequest` and the formatting of the encoded values.
pub mod request;

/// The German and English message tables of the command line interface.
pub mod translations;
