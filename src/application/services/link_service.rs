//! Link directory service: CRUD, listing, and redirect resolution.

use std::sync::Arc;

use axum::http::StatusCode;
use chrono::Utc;

use crate::domain::entities::{Link, LinkVisit, NewLink, NewLinkVisit, VisitMeta};
use crate::domain::query::{
    DEFAULT_LINK_VISITS_SORT, DEFAULT_LINKS_SORT, LINK_VISITS_SORT_FIELDS, LINKS_SORT_FIELDS,
    ListQuery, Page, normalize_and_validate_sort,
};
use crate::domain::repositories::{LinkRepository, LinkVisitRepository};
use crate::domain::validation::{validate_original_url, validate_short_name};
use crate::error::AppError;
use crate::utils::code_generator::generate_short_name;

/// How many generated short names are tried before giving up with a conflict.
pub const AUTO_SHORT_NAME_ATTEMPTS: usize = 5;

/// Status returned to the edge for redirects and recorded on their visits.
pub const REDIRECT_STATUS_FOUND: StatusCode = StatusCode::FOUND;

/// Service over trait objects, as stored in [`crate::state::AppState`].
pub type DynLinkService = LinkService<dyn LinkRepository, dyn LinkVisitRepository>;

/// Where a redirect should send the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTarget {
    pub url: String,
    pub status: StatusCode,
}

/// Row counts reported by health checks and the admin CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryStats {
    pub links: i64,
    pub visits: i64,
}

#[derive(Debug, Clone, Copy)]
enum WriteTarget {
    Create,
    Update(i64),
}

impl WriteTarget {
    fn operation(&self) -> &'static str {
        match self {
            Self::Create => "links create",
            Self::Update(_) => "links update",
        }
    }
}

/// Service for managing links and resolving redirects.
///
/// Validates input, generates short names on demand with a bounded retry on
/// collisions, and records one visit per successful redirect without letting
/// a failed visit write affect the redirect.
pub struct LinkService<L: LinkRepository + ?Sized, V: LinkVisitRepository + ?Sized> {
    link_repository: Arc<L>,
    visit_repository: Arc<V>,
}

impl<L: LinkRepository + ?Sized, V: LinkVisitRepository + ?Sized> LinkService<L, V> {
    /// Creates a new link service.
    pub fn new(link_repository: Arc<L>, visit_repository: Arc<V>) -> Self {
        Self {
            link_repository,
            visit_repository,
        }
    }

    /// Lists links in the requested order.
    ///
    /// Without a range every link is returned and `total` is `-1`. With a range
    /// the page and the overall count are read in two separate calls, so the
    /// total may be off by concurrent writes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidSort`] before touching storage if the sort is
    /// not allowed for links.
    pub async fn list_links(&self, query: &ListQuery) -> Result<Page<Link>, AppError> {
        let sort = normalize_and_validate_sort(&query.sort, DEFAULT_LINKS_SORT, LINKS_SORT_FIELDS)?;

        let Some(range) = query.range else {
            let items = self
                .link_repository
                .list_all(sort)
                .await
                .map_err(|e| e.context("links list all"))?;
            return Ok(Page { items, total: -1 });
        };

        let items = self
            .link_repository
            .list_page(range.start(), range.count(), sort)
            .await
            .map_err(|e| e.context("links list page"))?;

        let total = self
            .link_repository
            .count()
            .await
            .map_err(|e| e.context("links count"))?;

        Ok(Page { items, total })
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has `id`.
    pub async fn get_link(&self, id: i64) -> Result<Link, AppError> {
        self.link_repository
            .find_by_id(id)
            .await
            .map_err(|e| e.context("links get"))?
            .ok_or(AppError::NotFound)
    }

    /// Looks up a link by short name after checking its syntax.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidShortName`] for malformed input and
    /// [`AppError::NotFound`] if no link uses the name.
    pub async fn get_link_by_short_name(&self, short_name: &str) -> Result<Link, AppError> {
        let short_name = short_name.trim();
        validate_short_name(short_name)?;

        self.link_repository
            .find_by_short_name(short_name)
            .await
            .map_err(|e| e.context("links get by short name"))?
            .ok_or(AppError::NotFound)
    }

    /// Creates a link.
    ///
    /// An empty `short_name` asks for a generated one; up to
    /// [`AUTO_SHORT_NAME_ATTEMPTS`] names are tried. An explicit name is
    /// written once and a collision is reported as-is.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidUrl`] or [`AppError::InvalidShortName`] for
    /// bad input, and [`AppError::ShortNameConflict`] when the explicit name is
    /// taken or every generated name collided.
    pub async fn create_link(&self, original_url: &str, short_name: &str) -> Result<Link, AppError> {
        self.write(WriteTarget::Create, original_url, short_name)
            .await
    }

    /// Rewrites a link's target URL and short name.
    ///
    /// Short names stay editable. An empty `short_name` assigns a freshly
    /// generated one with the same bounded retry as [`Self::create_link`].
    ///
    /// # Errors
    ///
    /// Same as [`Self::create_link`], plus [`AppError::NotFound`] if no link
    /// has `id`.
    pub async fn update_link(
        &self,
        id: i64,
        original_url: &str,
        short_name: &str,
    ) -> Result<Link, AppError> {
        self.write(WriteTarget::Update(id), original_url, short_name)
            .await
    }

    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has `id`.
    pub async fn delete_link(&self, id: i64) -> Result<(), AppError> {
        let deleted = self
            .link_repository
            .delete(id)
            .await
            .map_err(|e| e.context("links delete"))?;

        if !deleted {
            return Err(AppError::NotFound);
        }

        Ok(())
    }

    /// Resolves `short_name` and records a visit.
    ///
    /// Exactly one visit write is attempted. If it fails the error is logged
    /// and the redirect still succeeds.
    ///
    /// # Errors
    ///
    /// Same as [`Self::get_link_by_short_name`]. No visit is written then.
    pub async fn redirect(
        &self,
        short_name: &str,
        meta: VisitMeta,
    ) -> Result<RedirectTarget, AppError> {
        let link = self.get_link_by_short_name(short_name).await?;

        let visit = NewLinkVisit::new(
            link.id,
            meta,
            i32::from(REDIRECT_STATUS_FOUND.as_u16()),
            Utc::now(),
        );

        if let Err(e) = self.visit_repository.create(visit).await {
            tracing::warn!(
                error = %e,
                link_id = link.id,
                code = %link.short_name,
                "Failed to record link visit"
            );
        }

        Ok(RedirectTarget {
            url: link.original_url,
            status: REDIRECT_STATUS_FOUND,
        })
    }

    /// Lists visits. Same range and total semantics as [`Self::list_links`].
    pub async fn list_link_visits(&self, query: &ListQuery) -> Result<Page<LinkVisit>, AppError> {
        let sort = normalize_and_validate_sort(
            &query.sort,
            DEFAULT_LINK_VISITS_SORT,
            LINK_VISITS_SORT_FIELDS,
        )?;

        let Some(range) = query.range else {
            let items = self
                .visit_repository
                .list_all(sort)
                .await
                .map_err(|e| e.context("link visits list all"))?;
            return Ok(Page { items, total: -1 });
        };

        let items = self
            .visit_repository
            .list_page(range.start(), range.count(), sort)
            .await
            .map_err(|e| e.context("link visits list page"))?;

        let total = self
            .visit_repository
            .count()
            .await
            .map_err(|e| e.context("link visits count"))?;

        Ok(Page { items, total })
    }

    /// Counts links and visits.
    pub async fn stats(&self) -> Result<DirectoryStats, AppError> {
        let links = self
            .link_repository
            .count()
            .await
            .map_err(|e| e.context("links count"))?;

        let visits = self
            .visit_repository
            .count()
            .await
            .map_err(|e| e.context("link visits count"))?;

        Ok(DirectoryStats { links, visits })
    }

    async fn write(
        &self,
        target: WriteTarget,
        original_url: &str,
        short_name: &str,
    ) -> Result<Link, AppError> {
        let original_url = original_url.trim();
        let short_name = short_name.trim();

        validate_original_url(original_url)?;

        if short_name.is_empty() {
            return self.write_generated(target, original_url).await;
        }

        validate_short_name(short_name)?;

        let new_link = NewLink {
            original_url: original_url.to_string(),
            short_name: short_name.to_string(),
        };

        self.store(target, new_link)
            .await
            .map_err(|e| e.context(target.operation()))
    }

    async fn write_generated(
        &self,
        target: WriteTarget,
        original_url: &str,
    ) -> Result<Link, AppError> {
        for attempt in 1..=AUTO_SHORT_NAME_ATTEMPTS {
            let short_name = generate_short_name()?;
            let new_link = NewLink {
                original_url: original_url.to_string(),
                short_name,
            };

            match self.store(target, new_link).await {
                Ok(link) => return Ok(link),
                Err(e) if e.is_conflict() => {
                    tracing::debug!(attempt, "Generated short name collided, retrying");
                }
                Err(e) => return Err(e.context(target.operation())),
            }
        }

        Err(AppError::ShortNameConflict)
    }

    async fn store(&self, target: WriteTarget, new_link: NewLink) -> Result<Link, AppError> {
        match target {
            WriteTarget::Create => self.link_repository.create(new_link).await,
            WriteTarget::Update(id) => self.link_repository.update(id, new_link).await,
        }
    }
}
