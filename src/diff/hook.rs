use crate::path::Path;
use crate::value::Value;

/// A trait for reacting to the divergences found between a "first" and a
/// "second" structure.
///
/// The hook receives references into the compared structures which is why
/// it is parametrized over their lifetime `'a`.  The [`Path`] handed to the
/// callbacks is only borrowed for the duration of the call as the traversal
/// keeps extending and shrinking it.  Returning an error from any callback
/// stops the traversal and the error is passed through to the caller of
/// [`diff`](crate::diff::diff).
pub trait DivergenceHook<'a>: Sized {
    /// The error produced from the hook methods.
    type Error;

    /// Called when the values at `path` are of different types.
    fn type_mismatch(
        &mut self,
        path: &Path,
        old: &'a Value,
        new: &'a Value,
    ) -> Result<(), Self::Error> {
        let _ = path;
        let _ = old;
        let _ = new;
        Ok(())
    }

    /// Called when the scalars at `path` are of the same type but differ.
    fn value_mismatch(
        &mut self,
        path: &Path,
        old: &'a Value,
        new: &'a Value,
    ) -> Result<(), Self::Error> {
        let _ = path;
        let _ = old;
        let _ = new;
        Ok(())
    }

    /// Called when `path` only exists in the second structure.
    ///
    /// `value` is the complete subtree found at that path.
    fn added(&mut self, path: &Path, value: &'a Value) -> Result<(), Self::Error> {
        let _ = path;
        let _ = value;
        Ok(())
    }

    /// Called when `path` only exists in the first structure.
    ///
    /// `value` is the complete subtree found at that path.
    fn removed(&mut self, path: &Path, value: &'a Value) -> Result<(), Self::Error> {
        let _ = path;
        let _ = value;
        Ok(())
    }

    /// Always called at the end of the traversal.
    fn finish(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<'a, 'h, D: DivergenceHook<'a> + 'h> DivergenceHook<'a> for &'h mut D {
    type Error = D::Error;

    fn type_mismatch(
        &mut self,
        path: &Path,
        old: &'a Value,
        new: &'a Value,
    ) -> Result<(), Self::Error> {
        (*self).type_mismatch(path, old, new)
    }

    fn value_mismatch(
        &mut self,
        path: &Path,
        old: &'a Value,
        new: &'a Value,
    ) -> Result<(), Self::Error> {
        (*self).value_mismatch(path, old, new)
    }

    fn added(&mut self, path: &Path, value: &'a Value) -> Result<(), Self::Error> {
        (*self).added(path, value)
    }

    fn removed(&mut self, path: &Path, value: &'a Value) -> Result<(), Self::Error> {
        (*self).removed(path, value)
    }

    fn finish(&mut self) -> Result<(), Self::Error> {
        (*self).finish()
    }
}
