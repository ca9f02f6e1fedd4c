/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Eager page collection for the portal's page-based listings

use crate::error::AppError;
use serde_json::Value;
use std::future::Future;
use tracing::debug;

/// One batch of records returned by a listing endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    /// Records in server order
    pub records: Vec<T>,
    /// Total number of pages, when the server reports it
    pub total_pages: Option<u32>,
}

impl<T> Page<T> {
    /// Page without a total-page indicator
    pub fn new(records: Vec<T>) -> Self {
        Self {
            records,
            total_pages: None,
        }
    }

    /// Page with a known total
    pub fn with_total_pages(records: Vec<T>, total_pages: u32) -> Self {
        Self {
            records,
            total_pages: Some(total_pages),
        }
    }

    /// Whether the page holds no record
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Page<Value> {
    /// Builds a page from a listing envelope
    ///
    /// Records are read from `key`; a bare array body is accepted as the
    /// record list. The total is derived from `totalRecords` and the
    /// response's `pageSize`, falling back to `requested_page_size`.
    pub fn from_envelope(
        body: Value,
        key: &str,
        requested_page_size: u32,
    ) -> Result<Self, AppError> {
        let total_pages = total_pages(&body, requested_page_size);
        let records = match body {
            Value::Array(items) => items,
            Value::Object(mut object) => match object.remove(key) {
                Some(Value::Array(items)) => items,
                Some(Value::Null) | None => Vec::new(),
                Some(other) => {
                    return Err(AppError::UnexpectedResponse(format!(
                        "expected a list under '{key}', got {other}"
                    )));
                }
            },
            other => {
                return Err(AppError::UnexpectedResponse(other.to_string()));
            }
        };
        Ok(Self {
            records,
            total_pages,
        })
    }
}

fn as_u64(value: Option<&Value>) -> Option<u64> {
    let value = value?;
    value
        .as_u64()
        .or_else(|| value.as_str().and_then(|s| s.parse().ok()))
}

fn total_pages(body: &Value, requested_page_size: u32) -> Option<u32> {
    let total_records = as_u64(body.get("totalRecords"))?;
    let page_size = as_u64(body.get("pageSize"))
        .filter(|size| *size > 0)
        .unwrap_or(u64::from(requested_page_size.max(1)));
    u32::try_from(total_records.div_ceil(page_size)).ok()
}

/// Fetches pages 1, 2, 3, ... and concatenates their records
///
/// Stops on the first empty page, or once the page number reaches the
/// server's total-page indicator. Any failing page aborts the whole
/// collection; records gathered so far are dropped.
pub async fn collect_pages<T, F, Fut>(mut fetch_page: F) -> Result<Vec<T>, AppError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<Page<T>, AppError>>,
{
    let mut records = Vec::new();
    let mut page_number: u32 = 1;

    loop {
        let page = fetch_page(page_number).await?;
        if page.is_empty() {
            break;
        }

        let reached_last = page
            .total_pages
            .is_some_and(|total| page_number >= total);
        records.extend(page.records);

        if reached_last {
            break;
        }
        page_number += 1;
    }

    debug!("Collected {} records over {} pages", records.len(), page_number);
    Ok(records)
}
