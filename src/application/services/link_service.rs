//! Short code allocation and redirect resolution.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::UrlRecord;
use crate::domain::repositories::{InsertOutcome, UrlRepository};
use crate::error::AppError;
use crate::utils::code_generator::{CodeGenerator, is_valid_code};
use crate::utils::url_normalizer::normalize_url;

/// Default number of collisions after which allocation starts warning.
pub const DEFAULT_COLLISION_WARN_THRESHOLD: u64 = 16;

/// Result of [`LinkService::allocate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub record: UrlRecord,
    /// `false` when an existing mapping for the same target was reused.
    pub created: bool,
}

/// Service owning the allocation and resolution rules.
///
/// - Allocation is idempotent per normalized target: the same URL always maps
///   to the same code and re-shortening never resets the counter.
/// - Resolution increments the click counter atomically on a hit and changes
///   nothing on a miss.
/// - Stats and listing never mutate.
pub struct LinkService<R: UrlRepository> {
    url_repository: Arc<R>,
    generator: Arc<dyn CodeGenerator>,
    collision_warn_threshold: u64,
}

impl<R: UrlRepository> LinkService<R> {
    /// Creates a new link service.
    pub fn new(url_repository: Arc<R>, generator: Arc<dyn CodeGenerator>) -> Self {
        Self {
            url_repository,
            generator,
            collision_warn_threshold: DEFAULT_COLLISION_WARN_THRESHOLD,
        }
    }

    /// Sets how many collisions are tolerated silently before warning.
    pub fn with_collision_warn_threshold(mut self, threshold: u64) -> Self {
        self.collision_warn_threshold = threshold.max(1);
        self
    }

    /// Normalizes raw user input and allocates a code for it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the input is not an http(s) URL.
    pub async fn shorten(&self, raw_url: &str) -> Result<Allocation, AppError> {
        let target = normalize_url(raw_url).map_err(|e| {
            AppError::bad_request(e.to_string(), json!({ "url": raw_url }))
        })?;

        self.allocate(&target).await
    }

    /// Returns the code for an already normalized `target`, minting one if needed.
    ///
    /// An existing mapping is returned unchanged. Otherwise random candidates
    /// are drawn until one is free; the loop does not give up, since the code
    /// space is far larger than any practical table. Code and target checks
    /// happen atomically inside [`UrlRepository::insert`], so concurrent calls
    /// for the same new target agree on a single code.
    ///
    /// # Errors
    ///
    /// Only storage failures, and [`AppError::Internal`] if the configured
    /// generator produces a code of the wrong shape.
    pub async fn allocate(&self, target: &str) -> Result<Allocation, AppError> {
        if let Some(existing) = self.url_repository.find_by_target(target).await? {
            debug!(code = %existing.code, url = target, "Reusing existing short code");
            return Ok(Allocation {
                record: existing,
                created: false,
            });
        }

        let mut collisions: u64 = 0;

        loop {
            let code = self.generator.generate();
            if !is_valid_code(&code) {
                return Err(AppError::internal(
                    "Code generator produced a malformed code",
                    json!({ "code": code }),
                ));
            }

            let record = UrlRecord::new(code, target.to_string(), Utc::now());

            match self.url_repository.insert(record.clone()).await? {
                InsertOutcome::Inserted => {
                    info!(code = %record.code, url = target, collisions, "Allocated short code");
                    return Ok(Allocation {
                        record,
                        created: true,
                    });
                }
                InsertOutcome::TargetExists(existing) => {
                    debug!(code = %existing.code, url = target, "Target allocated concurrently");
                    return Ok(Allocation {
                        record: existing,
                        created: false,
                    });
                }
                InsertOutcome::CodeTaken => {
                    collisions += 1;
                    if collisions % self.collision_warn_threshold == 0 {
                        warn!(collisions, url = target, "Short code collisions keep occurring");
                    }
                }
            }
        }
    }

    /// Resolves `code` to its target and counts the click.
    ///
    /// Codes that fail the shape check are treated exactly like unknown codes.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] on a miss; nothing is mutated then.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        if !is_valid_code(code) {
            return Err(not_found(code));
        }

        match self.url_repository.record_click(code, Utc::now()).await? {
            Some(record) => {
                debug!(code, clicks = record.click_count, "Resolved short code");
                Ok(record.target)
            }
            None => Err(not_found(code)),
        }
    }

    /// Reads a record without counting a click.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown or malformed codes.
    pub async fn stats(&self, code: &str) -> Result<UrlRecord, AppError> {
        if !is_valid_code(code) {
            return Err(not_found(code));
        }

        self.url_repository
            .get(code)
            .await?
            .ok_or_else(|| not_found(code))
    }

    /// All records, newest first.
    pub async fn list(&self) -> Result<Vec<UrlRecord>, AppError> {
        let mut records = self.url_repository.snapshot().await?;
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.code.cmp(&b.code))
        });
        Ok(records)
    }

    /// Removes the record for `code` and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if there is no such record.
    pub async fn delete(&self, code: &str) -> Result<UrlRecord, AppError> {
        match self.url_repository.delete(code).await? {
            Some(record) => {
                info!(code, "Deleted short code");
                Ok(record)
            }
            None => Err(not_found(code)),
        }
    }

    /// Puts back a record removed by [`LinkService::delete`], unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if its code or target was claimed again
    /// in the meantime.
    pub async fn reinstate(&self, record: UrlRecord) -> Result<(), AppError> {
        let code = record.code.clone();

        match self.url_repository.insert(record).await? {
            InsertOutcome::Inserted => {
                info!(code, "Reinstated short code");
                Ok(())
            }
            InsertOutcome::TargetExists(_) | InsertOutcome::CodeTaken => Err(AppError::internal(
                "Short code was reused before it could be reinstated",
                json!({ "code": code }),
            )),
        }
    }

    /// Number of live records.
    pub async fn count(&self) -> Result<usize, AppError> {
        self.url_repository.count().await
    }
}

fn not_found(code: &str) -> AppError {
    AppError::not_found("Short URL not found", json!({ "code": code }))
}
