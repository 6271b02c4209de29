//! Read-only query layer
//!
//! Paginated accessors over the token and delayed transfer stores, plus a
//! path router returning JSON for the host's query endpoint.

use crate::error::{AssetError, Fatal, QueryError};
use crate::keeper::keeper::Keeper;
use crate::keeper::params::ParamsStore;
use crate::store::keys::{self, DELAYED_TRANSFER_PREFIX};
use crate::store::KvStore;
use crate::supply::SupplyKeeper;
use crate::types::{Address, DelayedTransfer, Token};
use serde::{Deserialize, Serialize};

pub const QUERY_PARAMS: &str = "params";
pub const QUERY_GET_TOKEN: &str = "get";
pub const QUERY_LIST_TOKEN: &str = "list";
pub const QUERY_GET_DELAYED_TRANSFER: &str = "get_delayed_transfer";
pub const QUERY_LIST_DELAYED_TRANSFER: &str = "list_delayed_transfer";
pub const QUERY_LIST_DELAYED_TRANSFER_FROM: &str = "list_delayed_transfer_from";
pub const QUERY_LIST_DELAYED_TRANSFER_TO: &str = "list_delayed_transfer_to";

/// Page selection of a list query. `page` is 1-based; `limit = 0` means
/// the configured default page size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    pub page: usize,
    pub limit: usize,
}

impl PageRequest {
    pub fn new(page: usize, limit: usize) -> Self {
        Self { page, limit }
    }

    /// `(skip, take)` of the page, `None` for page 0
    pub fn window(&self, default_limit: usize) -> Option<(usize, usize)> {
        if self.page == 0 {
            return None;
        }
        let limit = if self.limit == 0 { default_limit } else { self.limit };
        let skip = (self.page - 1).checked_mul(limit)?;
        Some((skip, limit))
    }
}

impl<S, B, P> Keeper<S, B, P>
where
    S: KvStore,
    B: SupplyKeeper,
    P: ParamsStore,
{
    /// One page of tokens, ascending by symbol
    pub fn list_tokens_page(&self, page: PageRequest) -> Result<Vec<Token>, Fatal> {
        self.paginate(self.token_iter(), page)
    }

    /// One page of delayed transfers, ascending by sequence
    pub fn list_delayed_transfers_page(
        &self,
        page: PageRequest,
    ) -> Result<Vec<DelayedTransfer>, Fatal> {
        self.paginate(self.delayed_transfer_iter(), page)
    }

    /// One page of transfers sent by `from`
    pub fn list_by_sender_page(
        &self,
        from: &Address,
        page: PageRequest,
    ) -> Result<Vec<DelayedTransfer>, Fatal> {
        self.paginate(self.resolve_index(&keys::from_prefix(from)), page)
    }

    /// One page of transfers addressed to `to`
    pub fn list_by_recipient_page(
        &self,
        to: &Address,
        page: PageRequest,
    ) -> Result<Vec<DelayedTransfer>, Fatal> {
        self.paginate(self.resolve_index(&keys::to_prefix(to)), page)
    }

    /// Number of outstanding delayed transfers
    pub fn delayed_transfer_count(&self) -> usize {
        self.store.prefix_iter(&[DELAYED_TRANSFER_PREFIX]).count()
    }

    fn paginate<T>(
        &self,
        iter: impl Iterator<Item = Result<T, Fatal>>,
        page: PageRequest,
    ) -> Result<Vec<T>, Fatal> {
        match page.window(self.config().default_query_limit) {
            Some((skip, take)) => iter.skip(skip).take(take).collect(),
            None => Ok(Vec::new()),
        }
    }

    /// Route a query by path and return the JSON encoded result.
    ///
    /// `data` carries the JSON [`PageRequest`] of list queries; `height` is
    /// the height the query is served at.
    pub fn query(&self, height: i64, path: &[&str], data: &[u8]) -> Result<Vec<u8>, QueryError> {
        if !self.config().is_active(height) {
            return Err(AssetError::UnknownRequest(format!(
                "asset related query is not supported until {}",
                self.config().token_issue_height
            ))
            .into());
        }

        let (endpoint, args) = path
            .split_first()
            .ok_or_else(|| AssetError::UnknownRequest("empty query path".to_string()))?;

        let bytes = match *endpoint {
            QUERY_PARAMS => serde_json::to_vec_pretty(&self.get_params())?,
            QUERY_GET_TOKEN => {
                let symbol = first_arg(args)?.to_lowercase();
                let token = self
                    .get_token(&symbol)?
                    .ok_or(AssetError::TokenNotFound(symbol))?;
                serde_json::to_vec_pretty(&token)?
            }
            QUERY_LIST_TOKEN => {
                serde_json::to_vec_pretty(&self.list_tokens_page(page_request(data)?)?)?
            }
            QUERY_GET_DELAYED_TRANSFER => {
                let sequence: i64 = first_arg(args)?.parse().map_err(|e| {
                    AssetError::UnknownRequest(format!("invalid sequence parameter: {}", e))
                })?;
                let transfer = self
                    .get_delayed_transfer(sequence)?
                    .ok_or(AssetError::DelayedTransferNotFound(sequence))?;
                serde_json::to_vec_pretty(&transfer)?
            }
            QUERY_LIST_DELAYED_TRANSFER => serde_json::to_vec_pretty(
                &self.list_delayed_transfers_page(page_request(data)?)?,
            )?,
            QUERY_LIST_DELAYED_TRANSFER_FROM => {
                let from = parse_address(first_arg(args)?)?;
                serde_json::to_vec_pretty(&self.list_by_sender_page(&from, page_request(data)?)?)?
            }
            QUERY_LIST_DELAYED_TRANSFER_TO => {
                let to = parse_address(first_arg(args)?)?;
                serde_json::to_vec_pretty(&self.list_by_recipient_page(&to, page_request(data)?)?)?
            }
            other => {
                return Err(
                    AssetError::UnknownRequest(format!("unknown asset query endpoint {}", other))
                        .into(),
                )
            }
        };

        Ok(bytes)
    }
}

fn first_arg<'a>(args: &[&'a str]) -> Result<&'a str, AssetError> {
    args.first()
        .copied()
        .ok_or_else(|| AssetError::UnknownRequest("wrong query request".to_string()))
}

fn parse_address(raw: &str) -> Result<Address, AssetError> {
    raw.parse()
        .map_err(|e| AssetError::InvalidAddress(format!("{}: {}", raw, e)))
}

/// Empty request data means the first page with the default limit
fn page_request(data: &[u8]) -> Result<PageRequest, AssetError> {
    if data.is_empty() {
        return Ok(PageRequest::new(1, 0));
    }
    serde_json::from_slice(data)
        .map_err(|e| AssetError::UnknownRequest(format!("failed to parse params: {}", e)))
}
