//! Abstractions for page-number pagination.

use std::num::NonZeroUsize;

/// A page of items.
#[derive(Clone, Debug)]
pub struct Page<I> {
    /// Items on this [`Page`].
    pub items: Vec<I>,

    /// [`Arguments`] this [`Page`] was selected with.
    pub arguments: Arguments,

    /// Total number of items across all [`Page`]s.
    pub total_count: usize,
}

impl<I> Page<I> {
    /// Creates a new [`Page`] from the provided items.
    #[must_use]
    pub fn new(
        arguments: Arguments,
        items: impl IntoIterator<Item = impl Into<I>>,
        total_count: usize,
    ) -> Self {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            arguments,
            total_count,
        }
    }

    /// Returns [`PageInfo`] of this [`Page`].
    #[must_use]
    pub fn page_info(&self) -> PageInfo {
        let number = self.arguments.number();
        let total_pages = self.arguments.total_pages(self.total_count);
        PageInfo {
            number,
            total_pages,
            total_count: self.total_count,
            has_next_page: number < total_pages,
            has_previous_page: number > 1,
        }
    }

    /// Maps items of this [`Page`] with the provided function.
    #[must_use]
    pub fn map<T>(self, f: impl FnMut(I) -> T) -> Page<T> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            arguments: self.arguments,
            total_count: self.total_count,
        }
    }
}

/// Information about a [`Page`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PageInfo {
    /// 1-based number of the [`Page`].
    pub number: usize,

    /// Total number of [`Page`]s, which is never less than `1`.
    pub total_pages: usize,

    /// Total number of items across all [`Page`]s.
    pub total_count: usize,

    /// Indicator whether there is a next [`Page`].
    pub has_next_page: bool,

    /// Indicator whether there is a previous [`Page`].
    pub has_previous_page: bool,
}

/// Pagination arguments.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Arguments {
    /// 1-based number of the requested [`Page`].
    number: NonZeroUsize,

    /// Maximum number of items on a [`Page`].
    per_page: NonZeroUsize,
}

impl Arguments {
    /// Creates new [`Arguments`].
    ///
    /// Missing `number` means the first [`Page`]. Returns [`None`] if the
    /// `number` or the `per_page` is not positive.
    pub fn new<Num>(number: Option<Num>, per_page: usize) -> Option<Self>
    where
        Num: TryInto<usize>,
    {
        let number = match number {
            Some(n) => NonZeroUsize::new(n.try_into().ok()?)?,
            None => NonZeroUsize::MIN,
        };
        Some(Self {
            number,
            per_page: NonZeroUsize::new(per_page)?,
        })
    }

    /// Returns 1-based number of the requested [`Page`].
    #[must_use]
    pub fn number(&self) -> usize {
        self.number.get()
    }

    /// Returns maximum number of items on a [`Page`].
    #[must_use]
    pub fn limit(&self) -> usize {
        self.per_page.get()
    }

    /// Returns number of items preceding the requested [`Page`].
    #[must_use]
    pub fn offset(&self) -> usize {
        (self.number.get() - 1).saturating_mul(self.per_page.get())
    }

    /// Returns total number of [`Page`]s for the provided `total_count` of
    /// items.
    ///
    /// The first [`Page`] always exists, even if there are no items at all.
    #[must_use]
    pub fn total_pages(&self, total_count: usize) -> usize {
        total_count.div_ceil(self.per_page.get()).max(1)
    }

    /// Checks whether the requested [`Page`] exists for the provided
    /// `total_count` of items.
    #[must_use]
    pub fn is_within(&self, total_count: usize) -> bool {
        self.number.get() <= self.total_pages(total_count)
    }
}

/// Pagination selector.
#[derive(Clone, Copy, Debug)]
pub struct Selector<O> {
    /// Pagination [`Arguments`].
    pub arguments: Arguments,

    /// Order of items being paginated.
    pub order: O,
}

/// Defines pagination types.
#[expect(clippy::module_name_repetitions, reason = "more readable")]
#[macro_export]
macro_rules! define_pagination {
    ($node:ty, $order:ty) => {
        #[doc = "A [`Page`] of nodes."]
        pub type Page = $crate::pagination::Page<$node>;

        #[doc = "An information about a [`Page`]."]
        pub type PageInfo = $crate::pagination::PageInfo;

        #[doc = "Arguments for selecting a [`Page`]."]
        pub type Arguments = $crate::pagination::Arguments;

        #[doc = "[`Page`] selector."]
        pub type Selector = $crate::pagination::Selector<$order>;
    };
}

#[cfg(test)]
mod spec {
    use super::{Arguments, Page};

    #[test]
    fn defaults_to_first_page() {
        let args = Arguments::new(None::<i32>, 20).unwrap();

        assert_eq!(args.number(), 1);
        assert_eq!(args.offset(), 0);
        assert_eq!(args.limit(), 20);
    }

    #[test]
    fn rejects_non_positive_numbers() {
        assert!(Arguments::new(Some(0), 20).is_none());
        assert!(Arguments::new(Some(-3), 20).is_none());
        assert!(Arguments::new(Some(1), 0).is_none());
    }

    #[test]
    fn computes_offset() {
        let args = Arguments::new(Some(3), 20).unwrap();

        assert_eq!(args.offset(), 40);
        assert_eq!(args.limit(), 20);
    }

    #[test]
    fn first_page_always_exists() {
        let first = Arguments::new(Some(1), 20).unwrap();
        let second = Arguments::new(Some(2), 20).unwrap();

        assert!(first.is_within(0));
        assert!(!second.is_within(0));
        assert!(!second.is_within(20));
        assert!(second.is_within(21));
    }

    #[test]
    fn page_info() {
        let args = Arguments::new(Some(2), 20).unwrap();
        let page = Page::<u8>::new(args, [1_u8, 2, 3], 43);
        let info = page.page_info();

        assert_eq!(info.number, 2);
        assert_eq!(info.total_pages, 3);
        assert_eq!(info.total_count, 43);
        assert!(info.has_next_page);
        assert!(info.has_previous_page);

        let empty = Page::<u8>::new(
            Arguments::new(None::<i32>, 20).unwrap(),
            Vec::<u8>::new(),
            0,
        );
        let info = empty.page_info();
        assert_eq!(info.total_pages, 1);
        assert!(!info.has_next_page);
        assert!(!info.has_previous_page);
    }
}
