// ── Admin: wallets ──

use std::sync::Arc;

use tracing::info;

use besthub_api::ApiClient;

use super::slice::{Slice, SliceState};
use crate::error::CoreError;
use crate::model::{EntityId, Identified, Money, Transaction, UserWallet};
use crate::stream::SliceStream;

pub struct AdminWallets {
    api: Arc<ApiClient>,
    wallets: Slice<Vec<UserWallet>>,
    transactions: Slice<Vec<Transaction>>,
}

impl AdminWallets {
    pub(crate) fn new(api: Arc<ApiClient>) -> Self {
        Self {
            api,
            wallets: Slice::default(),
            transactions: Slice::default(),
        }
    }

    pub fn state(&self) -> SliceState<Vec<UserWallet>> {
        self.wallets.snapshot()
    }

    pub fn transactions_state(&self) -> SliceState<Vec<Transaction>> {
        self.transactions.snapshot()
    }

    pub fn subscribe(&self) -> SliceStream<Vec<UserWallet>> {
        self.wallets.subscribe()
    }

    pub fn subscribe_transactions(&self) -> SliceStream<Vec<Transaction>> {
        self.transactions.subscribe()
    }

    pub fn clear_error(&self) {
        self.wallets.clear_error();
        self.transactions.clear_error();
    }

    pub async fn fetch_all(&self) -> Result<Arc<Vec<UserWallet>>, CoreError> {
        self.wallets
            .fetch_with(async {
                let raw = self.api.list_wallets().await?;
                Ok(raw.into_iter().map(UserWallet::from).collect())
            })
            .await
    }

    /// Credit (positive) or debit (negative) a user's wallet. The row is
    /// replaced with the wallet the backend returns; the backend balance is
    /// never recomputed locally.
    pub async fn adjust_balance(
        &self,
        user_id: &EntityId,
        amount: Money,
        description: &str,
    ) -> Result<UserWallet, CoreError> {
        let check = if amount == Money::ZERO {
            Err(CoreError::validation("amount", "must not be zero"))
        } else if description.trim().is_empty() {
            Err(CoreError::validation("description", "is required"))
        } else {
            Ok(())
        };
        if let Err(err) = check {
            self.wallets.record_error(&err);
            return Err(err);
        }

        let wire_amount = amount.to_major_json();
        let wallet = self
            .wallets
            .update_with(
                async {
                    self.api
                        .adjust_wallet(user_id.as_str(), &wire_amount, description.trim())
                        .await
                        .map(UserWallet::from)
                        .map_err(CoreError::from)
                },
                |wallets, _, stored: &UserWallet| {
                    match wallets.iter_mut().find(|w| w.id() == stored.id()) {
                        Some(row) => *row = stored.clone(),
                        None => wallets.push(stored.clone()),
                    }
                },
            )
            .await?;
        info!(%user_id, %amount, balance = %wallet.balance, "wallet adjusted");
        Ok(wallet)
    }

    /// Wallet transactions across every user.
    pub async fn fetch_transactions(&self) -> Result<Arc<Vec<Transaction>>, CoreError> {
        self.transactions
            .fetch_with(async {
                let raw = self.api.list_all_wallet_transactions().await?;
                Ok(raw.into_iter().map(Transaction::from).collect())
            })
            .await
    }
}
