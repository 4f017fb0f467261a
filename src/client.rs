use futures::future::join_all;
use reqwest::StatusCode;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::models::{Employee, EmployeeUpdate, NewEmployee};
use crate::validation;

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for the roster API. Owns a tokio runtime so callers
/// stay synchronous; the only concurrency the app needs is fanning
/// out bulk deletions, which happens inside `delete_many`.
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
    rt: tokio::runtime::Runtime,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::Internal(format!("failed to start async runtime: {}", e)))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
            rt,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/employees{}", self.base_url, path)
    }

    pub fn list(&self) -> Result<Vec<Employee>> {
        self.rt
            .block_on(async { parse(self.http.get(self.url("")).send().await?).await })
    }

    pub fn get(&self, id: i64) -> Result<Employee> {
        self.rt.block_on(async {
            parse(self.http.get(self.url(&format!("/{}", id))).send().await?).await
        })
    }

    /// Create after a local validation pass; obviously invalid input
    /// never makes the round trip. The store still has the last word
    /// (duplicate email, say).
    pub fn create(&self, new: &NewEmployee) -> Result<Employee> {
        let errors = validation::validate(new);
        if !errors.is_empty() {
            return Err(Error::Validation(errors.join("; ")));
        }
        self.rt.block_on(async {
            parse(self.http.post(self.url("")).json(new).send().await?).await
        })
    }

    pub fn update(&self, id: i64, update: &EmployeeUpdate) -> Result<Employee> {
        self.rt.block_on(async {
            parse(
                self.http
                    .put(self.url(&format!("/{}", id)))
                    .json(update)
                    .send()
                    .await?,
            )
            .await
        })
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        self.rt.block_on(async {
            check(self.http.delete(self.url(&format!("/{}", id))).send().await?).await?;
            Ok(())
        })
    }

    /// One DELETE per id, all in flight at once. Failures are
    /// aggregated into a count; callers re-fetch the list afterwards
    /// either way, so per-id detail would not change what they do next.
    pub fn delete_many(&self, ids: &[i64]) -> Result<usize> {
        let total = ids.len();
        let failed = self.rt.block_on(async {
            let requests = ids.iter().map(|id| async move {
                let resp = self.http.delete(self.url(&format!("/{}", id))).send().await?;
                check(resp).await?;
                Ok::<_, Error>(())
            });
            join_all(requests)
                .await
                .into_iter()
                .filter(|r| r.is_err())
                .count()
        });
        if failed > 0 {
            return Err(Error::BulkDelete { failed, total });
        }
        Ok(total)
    }
}

/// Map non-success statuses onto the error taxonomy, carrying the
/// server's `{"error"}` message through unchanged.
async fn check(resp: reqwest::Response) -> Result<reqwest::Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let message = match resp.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status.to_string(),
    };
    Err(match status {
        StatusCode::NOT_FOUND => Error::NotFound(message),
        StatusCode::CONFLICT | StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            Error::Constraint(message)
        }
        _ => Error::Database(message),
    })
}

async fn parse<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T> {
    Ok(check(resp).await?.json::<T>().await?)
}
