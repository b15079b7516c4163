//! Single-row reductions over row and record sequences

use crate::error::{XlsxError, XlsxResult};

/// Reductions over a fallible row sequence
///
/// Each one pulls only as many rows as it needs, so the rest of the sheet is
/// never parsed.
pub trait QueryExt<T>: Iterator<Item = XlsxResult<T>> + Sized {
    /// The first row; [`XlsxError::EmptySequence`] if there is none
    fn first(mut self) -> XlsxResult<T> {
        self.next().unwrap_or(Err(XlsxError::EmptySequence))
    }

    /// The first row, if any
    fn first_or_none(mut self) -> XlsxResult<Option<T>> {
        self.next().transpose()
    }

    /// The only row; fails if there are zero or several
    fn single(self) -> XlsxResult<T> {
        self.single_or_none()?.ok_or(XlsxError::EmptySequence)
    }

    /// The only row, if any; fails if there are several
    fn single_or_none(mut self) -> XlsxResult<Option<T>> {
        let first = match self.next() {
            Some(row) => row?,
            None => return Ok(None),
        };

        match self.next() {
            None => Ok(Some(first)),
            Some(Err(e)) => Err(e),
            Some(Ok(_)) => Err(XlsxError::MoreThanOneRow),
        }
    }
}

impl<T, I> QueryExt<T> for I where I: Iterator<Item = XlsxResult<T>> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(n: usize) -> impl Iterator<Item = XlsxResult<usize>> {
        (0..n).map(Ok)
    }

    #[test]
    fn test_first() {
        assert_eq!(rows(3).first().unwrap(), 0);
        assert!(matches!(rows(0).first(), Err(XlsxError::EmptySequence)));
    }

    #[test]
    fn test_first_or_none() {
        assert_eq!(rows(2).first_or_none().unwrap(), Some(0));
        assert_eq!(rows(0).first_or_none().unwrap(), None);
    }

    #[test]
    fn test_single() {
        assert_eq!(rows(1).single().unwrap(), 0);
        assert!(matches!(rows(0).single(), Err(XlsxError::EmptySequence)));
        assert!(matches!(rows(2).single(), Err(XlsxError::MoreThanOneRow)));
    }

    #[test]
    fn test_single_or_none() {
        assert_eq!(rows(0).single_or_none().unwrap(), None);
        assert_eq!(rows(1).single_or_none().unwrap(), Some(0));
        assert!(matches!(
            rows(3).single_or_none(),
            Err(XlsxError::MoreThanOneRow)
        ));
    }

    #[test]
    fn test_first_stops_pulling() {
        let mut pulled = 0;
        let first = (0..10)
            .map(|i| {
                pulled += 1;
                Ok::<_, XlsxError>(i)
            })
            .first()
            .unwrap();

        assert_eq!(first, 0);
        assert_eq!(pulled, 1);
    }

    #[test]
    fn test_error_propagates() {
        let items = vec![Err(XlsxError::Parse("bad".into())), Ok(1)];
        assert!(matches!(
            items.into_iter().first_or_none(),
            Err(XlsxError::Parse(_))
        ));
    }
}
