//! Sortable, paginated company listing.
//!
//! A [`Listing`] is created per `/company list` invocation and owned by the session
//! that displays it. Only the user who opened it may page or re-sort it.

use crate::{
    errors::{Error, Result},
    models::CompanyRecord,
};

/// Sort order offered by the listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Order returned by the listing endpoint
    #[default]
    Created,
    /// Largest assets first
    AssetsDesc,
    /// Largest salary first
    SalaryDesc,
}

impl SortMode {
    /// All modes, in the order they are offered to users.
    pub const ALL: [Self; 3] = [Self::Created, Self::AssetsDesc, Self::SalaryDesc];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Created => "Creation order",
            Self::AssetsDesc => "Assets (high to low)",
            Self::SalaryDesc => "Salary (high to low)",
        }
    }

    /// Stable identifier used as a select-menu value.
    #[must_use]
    pub const fn value(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::AssetsDesc => "assets",
            Self::SalaryDesc => "salary",
        }
    }

    /// Inverse of [`SortMode::value`].
    #[must_use]
    pub fn from_value(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.value() == value)
    }
}

/// One rendered page of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingPage<'a> {
    /// Companies on this page
    pub entries: &'a [CompanyRecord],
    /// 1-based page number
    pub page_number: usize,
    /// Total number of pages, at least 1
    pub total_pages: usize,
    /// Active sort mode
    pub sort_mode: SortMode,
}

impl ListingPage<'_> {
    /// Footer text like `Page 2/3`.
    #[must_use]
    pub fn indicator(&self) -> String {
        format!("Page {}/{}", self.page_number, self.total_pages)
    }
}

/// Session state of an interactive company listing.
#[derive(Debug, Clone)]
pub struct Listing {
    original: Vec<CompanyRecord>,
    current: Vec<CompanyRecord>,
    page: usize,
    page_size: usize,
    sort_mode: SortMode,
    owner_id: String,
}

impl Listing {
    /// Starts a listing on page 0 in [`SortMode::Created`].
    ///
    /// A page size of zero is treated as one.
    #[must_use]
    pub fn new(companies: Vec<CompanyRecord>, page_size: usize, owner_id: impl Into<String>) -> Self {
        Self {
            current: companies.clone(),
            original: companies,
            page: 0,
            page_size: page_size.max(1),
            sort_mode: SortMode::Created,
            owner_id: owner_id.into(),
        }
    }

    /// User allowed to drive this listing.
    #[must_use]
    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    /// Current 0-based page index.
    #[must_use]
    pub const fn page_index(&self) -> usize {
        self.page
    }

    /// Active sort mode.
    #[must_use]
    pub const fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    /// Companies in their current display order.
    #[must_use]
    pub fn companies(&self) -> &[CompanyRecord] {
        &self.current
    }

    /// Number of pages; an empty listing still has one (empty) page.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        self.current.len().div_ceil(self.page_size).max(1)
    }

    fn ensure_owner(&self, actor_id: &str) -> Result<()> {
        if actor_id == self.owner_id {
            Ok(())
        } else {
            Err(Error::NotSessionOwner {
                user_id: actor_id.to_string(),
            })
        }
    }

    /// Moves to the previous page, wrapping from the first page to the last.
    ///
    /// # Errors
    /// Returns [`Error::NotSessionOwner`] if `actor_id` is not the owner; the
    /// listing is left unchanged.
    pub fn page_back(&mut self, actor_id: &str) -> Result<()> {
        self.ensure_owner(actor_id)?;
        let total = self.total_pages();
        self.page = (self.page + total - 1) % total;
        Ok(())
    }

    /// Moves to the next page, wrapping from the last page to the first.
    ///
    /// # Errors
    /// Returns [`Error::NotSessionOwner`] if `actor_id` is not the owner; the
    /// listing is left unchanged.
    pub fn page_forward(&mut self, actor_id: &str) -> Result<()> {
        self.ensure_owner(actor_id)?;
        self.page = (self.page + 1) % self.total_pages();
        Ok(())
    }

    /// Re-sorts the listing and returns to the first page.
    ///
    /// # Errors
    /// Returns [`Error::NotSessionOwner`] if `actor_id` is not the owner; the
    /// listing is left unchanged.
    pub fn resort(&mut self, actor_id: &str, mode: SortMode) -> Result<()> {
        self.ensure_owner(actor_id)?;
        match mode {
            SortMode::Created => self.current.clone_from(&self.original),
            SortMode::AssetsDesc => self.current.sort_by(|a, b| b.assets.cmp(&a.assets)),
            SortMode::SalaryDesc => self.current.sort_by(|a, b| b.salary.cmp(&a.salary)),
        }
        self.sort_mode = mode;
        self.page = 0;
        Ok(())
    }

    /// The slice of companies on the current page plus page metadata.
    #[must_use]
    pub fn render(&self) -> ListingPage<'_> {
        let start = (self.page * self.page_size).min(self.current.len());
        let end = (start + self.page_size).min(self.current.len());
        ListingPage {
            entries: &self.current[start..end],
            page_number: self.page + 1,
            total_pages: self.total_pages(),
            sort_mode: self.sort_mode,
        }
    }
}
