use crate::config::{ApiKey, ACCEPT_HEADER, PAGE_LIMIT};
use crate::error::{Error, Result};
use futures::stream::{self, Stream};
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::VecDeque;
use std::marker::PhantomData;

#[derive(Debug, Clone)]
pub struct PagerDutyClient {
    http: reqwest::Client,
    base_url: String,
}

struct Page {
    items: Vec<Value>,
    more: bool,
}

impl PagerDutyClient {
    pub fn with_base_url(api_key: &ApiKey, base_url: impl Into<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Token token={}", api_key.expose()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HEADER));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(PagerDutyClient {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Lazily walks every page of `path`, yielding the items found under
    /// `collection` in each response body.
    pub fn paginate<T>(
        &self,
        path: impl Into<String>,
        collection: &'static str,
        params: Vec<(String, String)>,
    ) -> Paginator<'_, T> {
        Paginator {
            client: self,
            path: path.into(),
            collection,
            params,
            offset: 0,
            buffer: VecDeque::new(),
            exhausted: false,
            _item: PhantomData,
        }
    }

    async fn get_page(
        &self,
        path: &str,
        collection: &str,
        params: &[(String, String)],
        offset: usize,
    ) -> Result<Page> {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        debug!("GET {} offset={}", path, offset);

        let response = self
            .http
            .get(&url)
            .query(params)
            .query(&[("limit", PAGE_LIMIT), ("offset", offset)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Api {
                status,
                path: path.to_string(),
                body,
            });
        }

        let mut body: Value = response.json().await?;
        let malformed = |reason| Error::MalformedPage {
            path: path.to_string(),
            reason,
        };

        let items = match body.get_mut(collection).map(Value::take) {
            Some(Value::Array(items)) => items,
            Some(_) => return Err(malformed("collection is not an array")),
            None => return Err(malformed("collection is missing")),
        };
        let more = body.get("more").and_then(Value::as_bool).unwrap_or(false);

        Ok(Page { items, more })
    }
}

/// Pull-based, finite, non-restartable walk over a paginated collection.
///
/// Pages are fetched on demand. A failed page fetch is yielded once as an
/// error and ends the sequence; an item that fails to decode is yielded as an
/// error and the walk carries on with the next item.
pub struct Paginator<'a, T> {
    client: &'a PagerDutyClient,
    path: String,
    collection: &'static str,
    params: Vec<(String, String)>,
    offset: usize,
    buffer: VecDeque<Value>,
    exhausted: bool,
    _item: PhantomData<T>,
}

impl<'a, T: DeserializeOwned> Paginator<'a, T> {
    pub async fn next_item(&mut self) -> Option<Result<T>> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                return Some(serde_json::from_value(item).map_err(Error::from));
            }
            if self.exhausted {
                return None;
            }

            match self
                .client
                .get_page(&self.path, self.collection, &self.params, self.offset)
                .await
            {
                Ok(page) => {
                    self.offset += page.items.len();
                    self.exhausted = !page.more || page.items.is_empty();
                    self.buffer.extend(page.items);
                }
                Err(e) => {
                    self.exhausted = true;
                    return Some(Err(e));
                }
            }
        }
    }

    pub fn into_stream(self) -> impl Stream<Item = Result<T>> + 'a
    where
        T: 'a,
    {
        stream::unfold(self, |mut pager| async move {
            pager.next_item().await.map(|item| (item, pager))
        })
    }
}
