// ── Admin: transaction ledger ──

use std::sync::Arc;

use besthub_api::ApiClient;

use super::slice::{Slice, SliceState};
use crate::error::CoreError;
use crate::model::{Transaction, TransactionStats};
use crate::stream::SliceStream;

pub struct AdminTransactions {
    api: Arc<ApiClient>,
    transactions: Slice<Vec<Transaction>>,
    stats: Slice<Option<TransactionStats>>,
}

impl AdminTransactions {
    pub(crate) fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            transactions: Slice::default(),
            stats: Slice::default(),
        }
    }

    pub fn state(&self) -> SliceState<Vec<Transaction>> {
        self.transactions.snapshot()
    }

    pub fn stats_state(&self) -> SliceState<Option<TransactionStats>> {
        self.stats.snapshot()
    }

    pub fn subscribe(&self) -> SliceStream<Vec<Transaction>> {
        self.transactions.subscribe()
    }

    pub fn clear_error(&self) {
        self.transactions.clear_error();
        self.stats.clear_error();
    }

    pub async fn fetch_all(&self) -> Result<Arc<Vec<Transaction>>, CoreError> {
        self.transactions
            .fetch_with(async {
                let raw = self.api.list_transactions().await?;
                Ok(raw.into_iter().map(Transaction::from).collect())
            })
            .await
    }

    pub async fn fetch_stats(&self) -> Result<TransactionStats, CoreError> {
        let stats = self
            .stats
            .fetch_with(async {
                let raw = self.api.transaction_stats().await?;
                Ok(Some(TransactionStats::from(raw)))
            })
            .await?;
        Ok(stats.as_ref().clone().unwrap_or_default())
    }
}
