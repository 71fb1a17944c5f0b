//! Visitor contract for tree walks.

use std::io::{self, Write};
use std::path::Path;

use preston_core::BoxError;

/// Outcome of visiting a single file. An `Err` aborts the walk.
pub type VisitResult = Result<(), BoxError>;

/// Receives every regular file the walker discovers.
///
/// Implemented for any `FnMut(&Path) -> VisitResult`, so plain closures
/// work wherever a visitor is expected.
pub trait Visitor {
    /// Handle one file.
    fn visit(&mut self, path: &Path) -> VisitResult;
}

impl<F> Visitor for F
where
    F: FnMut(&Path) -> VisitResult,
{
    fn visit(&mut self, path: &Path) -> VisitResult {
        self(path)
    }
}

/// Writes `Path: <path>` for every visited file.
///
/// Failing to write is a visitor failure and stops the walk.
#[derive(Debug)]
pub struct DiagnosticVisitor<W> {
    out: W,
}

impl<W: Write> DiagnosticVisitor<W> {
    /// Create a visitor writing to `out`.
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consume the visitor, returning the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl DiagnosticVisitor<io::Stderr> {
    /// Create a visitor writing to stderr.
    pub fn stderr() -> Self {
        Self::new(io::stderr())
    }
}

impl<W: Write> Visitor for DiagnosticVisitor<W> {
    fn visit(&mut self, path: &Path) -> VisitResult {
        writeln!(self.out, "Path: {}", path.display())?;
        Ok(())
    }
}
