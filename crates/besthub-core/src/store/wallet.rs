// ── Shopper wallet ──
//
// The balance shown here only ever comes from the backend: a balance
// fetch, a verified top-up's `newBalance`, or a re-fetch after a purchase.
// No local arithmetic is applied to it.

use std::sync::Arc;

use tracing::info;

use besthub_api::ApiClient;

use super::slice::{Slice, SliceState};
use crate::convert;
use crate::error::CoreError;
use crate::model::{EntityId, Identified, Money, TopUpReceipt, TopUpSession, Transaction};
use crate::session::SessionStore;
use crate::stream::SliceStream;

pub struct Wallet {
    api: Arc<ApiClient>,
    session: Arc<SessionStore>,
    balance: Slice<Money>,
    transactions: Slice<Vec<Transaction>>,
}

impl Wallet {
    pub(crate) fn new(api: Arc<ApiClient>, session: Arc<SessionStore>) -> Self {
        Self {
            api,
            session,
            balance: Slice::default(),
            transactions: Slice::default(),
        }
    }

    pub fn balance_state(&self) -> SliceState<Money> {
        self.balance.snapshot()
    }

    pub fn transactions_state(&self) -> SliceState<Vec<Transaction>> {
        self.transactions.snapshot()
    }

    pub fn subscribe_balance(&self) -> SliceStream<Money> {
        self.balance.subscribe()
    }

    pub fn subscribe_transactions(&self) -> SliceStream<Vec<Transaction>> {
        self.transactions.subscribe()
    }

    pub fn clear_error(&self) {
        self.balance.clear_error();
        self.transactions.clear_error();
    }

    /// Current balance. A user without a wallet record has a zero balance.
    pub async fn fetch_balance(&self, user_id: &EntityId) -> Result<Money, CoreError> {
        let balance = self
            .balance
            .fetch_with(async {
                match self.api.wallet_balance(user_id.as_str()).await {
                    Ok(amount) => Ok(convert::money(&amount)),
                    Err(err) if err.is_not_found() => Ok(Money::ZERO),
                    Err(err) => Err(CoreError::from(err)),
                }
            })
            .await?;
        Ok(*balance)
    }

    pub async fn fetch_transactions(
        &self,
        user_id: &EntityId,
    ) -> Result<Arc<Vec<Transaction>>, CoreError> {
        self.transactions
            .fetch_with(async {
                let raw = self.api.list_wallet_transactions(user_id.as_str()).await?;
                Ok(raw.into_iter().map(Transaction::from).collect())
            })
            .await
    }

    /// Start a top-up. The amount goes to the payment gateway in minor
    /// units; the returned URL is where the user pays. The reference is
    /// kept so `verify_top_up` can be run later without it.
    pub async fn top_up(&self, amount: Money, email: &str) -> Result<TopUpSession, CoreError> {
        let invalid = if !amount.is_positive() {
            Some(CoreError::validation("amount", "must be greater than zero"))
        } else if email.trim().is_empty() {
            Some(CoreError::validation("email", "is required"))
        } else {
            None
        };
        if let Some(err) = invalid {
            self.balance.record_error(&err);
            return Err(err);
        }

        let init = self
            .balance
            .update_with(
                async {
                    self.api
                        .top_up(amount.minor(), email.trim())
                        .await
                        .map_err(CoreError::from)
                },
                |_, _, _| {},
            )
            .await?;
        if let Some(reference) = &init.reference {
            self.session.set_pending_topup(reference.clone());
        }
        info!(%amount, reference = ?init.reference, "top-up started");
        Ok(TopUpSession {
            authorization_url: init.authorization_url,
            reference: init.reference,
            amount,
        })
    }

    /// Confirm a paid top-up. The displayed balance becomes the backend's
    /// `newBalance`.
    pub async fn verify_top_up(&self, reference: &str) -> Result<TopUpReceipt, CoreError> {
        if reference.trim().is_empty() {
            let err = CoreError::validation("reference", "is required");
            self.balance.record_error(&err);
            return Err(err);
        }
        let receipt = self
            .balance
            .update_with(
                async {
                    self.api
                        .verify_top_up(reference.trim())
                        .await
                        .map(TopUpReceipt::from)
                        .map_err(CoreError::from)
                },
                |balance, _, receipt: &TopUpReceipt| *balance = receipt.new_balance,
            )
            .await?;

        if self.session.pending_topup().as_deref() == Some(reference.trim()) {
            self.session.clear_pending_topup();
        }
        if let Some(credited) = receipt.credited.clone() {
            self.transactions.begin_update().succeed(|txs, _| {
                if !txs.iter().any(|t| t.id() == credited.id()) {
                    txs.insert(0, credited);
                }
            });
        }
        info!(new_balance = %receipt.new_balance, "top-up verified");
        Ok(receipt)
    }
}
