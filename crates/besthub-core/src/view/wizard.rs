// ── Purchase wizard ──
//
// SelectPackage → EnterRecipient → Confirm → Submitted. The recipient
// number is typed twice; the wizard only reaches Confirm when both entries
// agree and look like a full phone number. Nothing here is persisted:
// cancelling from any step discards everything.

use std::future::Future;

use serde::Serialize;
use strum::Display;

use crate::error::CoreError;
use crate::model::{DataBundle, Network, User};
use crate::requests::PurchaseRequest;
use crate::store::SliceError;

/// Shortest recipient number the wizard accepts.
pub const MIN_RECIPIENT_LEN: usize = 10;

/// Both entries are identical and at least [`MIN_RECIPIENT_LEN`] characters.
pub fn recipients_match(first: &str, second: &str) -> bool {
    first == second && first.chars().count() >= MIN_RECIPIENT_LEN
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Display)]
#[strum(serialize_all = "snake_case")]
pub enum WizardStep {
    #[default]
    SelectPackage,
    EnterRecipient,
    Confirm,
    Submitted,
}

#[derive(Debug, Clone)]
pub struct PurchaseWizard {
    network: Network,
    step: WizardStep,
    package: Option<DataBundle>,
    recipient: String,
    confirm_recipient: String,
    error: Option<SliceError>,
}

impl PurchaseWizard {
    pub fn new(network: Network) -> Self {
        Self {
            network,
            step: WizardStep::SelectPackage,
            package: None,
            recipient: String::new(),
            confirm_recipient: String::new(),
            error: None,
        }
    }

    pub fn network(&self) -> Network {
        self.network
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn package(&self) -> Option<&DataBundle> {
        self.package.as_ref()
    }

    pub fn recipient(&self) -> &str {
        &self.recipient
    }

    pub fn error(&self) -> Option<&SliceError> {
        self.error.as_ref()
    }

    /// Whether the current recipient entries would allow `proceed()`.
    pub fn can_proceed(&self) -> bool {
        self.step == WizardStep::EnterRecipient
            && recipients_match(&self.recipient, &self.confirm_recipient)
    }

    // ── Transitions ──────────────────────────────────────────────────

    pub fn select_package(&mut self, bundle: DataBundle) -> Result<(), CoreError> {
        self.expect_step(&[WizardStep::SelectPackage, WizardStep::EnterRecipient])?;
        self.package = Some(bundle);
        self.step = WizardStep::EnterRecipient;
        self.error = None;
        Ok(())
    }

    /// Record both recipient entries exactly as typed.
    pub fn enter_recipients(&mut self, first: &str, second: &str) -> Result<(), CoreError> {
        self.expect_step(&[WizardStep::EnterRecipient])?;
        first.clone_into(&mut self.recipient);
        second.clone_into(&mut self.confirm_recipient);
        Ok(())
    }

    /// EnterRecipient → Confirm, when the entries match.
    pub fn proceed(&mut self) -> Result<(), CoreError> {
        self.expect_step(&[WizardStep::EnterRecipient])?;
        if self.recipient.is_empty() || self.confirm_recipient.is_empty() {
            return Err(self.refuse(CoreError::validation(
                "recipient",
                "enter the recipient number twice",
            )));
        }
        if self.recipient != self.confirm_recipient {
            return Err(self.refuse(CoreError::validation(
                "recipient",
                "the two numbers do not match",
            )));
        }
        if !recipients_match(&self.recipient, &self.confirm_recipient) {
            return Err(self.refuse(CoreError::validation(
                "recipient",
                format!("must be at least {MIN_RECIPIENT_LEN} digits"),
            )));
        }
        self.error = None;
        self.step = WizardStep::Confirm;
        Ok(())
    }

    /// One step back. Entered data is kept.
    pub fn back(&mut self) {
        self.step = match self.step {
            WizardStep::Confirm => WizardStep::EnterRecipient,
            WizardStep::EnterRecipient | WizardStep::SelectPackage => WizardStep::SelectPackage,
            WizardStep::Submitted => WizardStep::Submitted,
        };
        self.error = None;
    }

    /// Abandon the purchase from any step.
    pub fn cancel(&mut self) {
        *self = Self::new(self.network);
    }

    /// The order the wizard would place for `user`.
    pub fn request(&self, user: &User) -> Result<PurchaseRequest, CoreError> {
        let bundle = self
            .package
            .as_ref()
            .ok_or_else(|| CoreError::validation("package", "no package selected"))?;
        Ok(PurchaseRequest {
            bundle_id: bundle.id.clone(),
            package_name: bundle.package_name.clone(),
            network: bundle.network.unwrap_or(self.network),
            recipient: self.recipient.clone(),
            amount: bundle.price,
            user_id: user.id.clone(),
            email: Some(user.email.clone()),
        })
    }

    /// Confirm → Submitted, running `submit` with the built request. On
    /// success the wizard resets; on failure it returns to Confirm with the
    /// error recorded so the user can retry.
    pub async fn confirm<T, F, Fut>(&mut self, user: &User, submit: F) -> Result<T, CoreError>
    where
        F: FnOnce(PurchaseRequest) -> Fut,
        Fut: Future<Output = Result<T, CoreError>>,
    {
        self.expect_step(&[WizardStep::Confirm])?;
        let request = self.request(user)?;
        self.step = WizardStep::Submitted;
        match submit(request).await {
            Ok(value) => {
                self.cancel();
                Ok(value)
            }
            Err(err) => {
                self.step = WizardStep::Confirm;
                Err(self.refuse(err))
            }
        }
    }

    // ── Internals ────────────────────────────────────────────────────

    fn expect_step(&self, allowed: &[WizardStep]) -> Result<(), CoreError> {
        if allowed.contains(&self.step) {
            Ok(())
        } else {
            Err(CoreError::validation(
                "step",
                format!("not allowed while at {}", self.step),
            ))
        }
    }

    fn refuse(&mut self, err: CoreError) -> CoreError {
        self.error = Some(SliceError::from(&err));
        err
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::{BundleCategory, EntityId, Money, Role, UserStatus};

    fn bundle() -> DataBundle {
        DataBundle {
            id: EntityId::new("b1"),
            network: None,
            package_name: "1GB".into(),
            data_amount: None,
            price: Money::from_minor(600),
            original_price: None,
            validity: None,
            category: BundleCategory::Regular,
            description: None,
        }
    }

    fn user() -> User {
        User {
            id: EntityId::new("u1"),
            user_name: "Ama".into(),
            email: "ama@example.com".into(),
            phone: None,
            role: Role::Customer,
            status: UserStatus::Active,
            wallet_balance: None,
            created_at: None,
        }
    }

    fn at_confirm() -> PurchaseWizard {
        let mut wizard = PurchaseWizard::new(Network::Mtn);
        wizard.select_package(bundle()).unwrap();
        wizard.enter_recipients("0241234567", "0241234567").unwrap();
        wizard.proceed().unwrap();
        wizard
    }

    #[test]
    fn confirm_reachable_only_with_matching_long_numbers() {
        let cases = [
            ("0241234567", "0241234567", true),
            ("0241234567", "0241234568", false),
            ("024123456", "024123456", false),
            ("", "", false),
            ("02412345678", "02412345678", true),
            // Entries are compared as typed
            ("0241234567 ", "0241234567", false),
            (" 024123456", " 024123456", true),
        ];
        for (a, b, expected) in cases {
            assert_eq!(recipients_match(a, b), expected, "{a:?} / {b:?}");

            let mut wizard = PurchaseWizard::new(Network::Mtn);
            wizard.select_package(bundle()).unwrap();
            wizard.enter_recipients(a, b).unwrap();
            assert_eq!(wizard.proceed().is_ok(), expected);
            let step = if expected {
                WizardStep::Confirm
            } else {
                WizardStep::EnterRecipient
            };
            assert_eq!(wizard.step(), step);
        }
    }

    #[test]
    fn cannot_skip_package_selection() {
        let mut wizard = PurchaseWizard::new(Network::Telecel);
        assert!(wizard.enter_recipients("0201234567", "0201234567").is_err());
        assert!(wizard.proceed().is_err());
        assert_eq!(wizard.step(), WizardStep::SelectPackage);
    }

    #[test]
    fn cancel_discards_everything() {
        let mut wizard = at_confirm();
        wizard.cancel();
        assert_eq!(wizard.step(), WizardStep::SelectPackage);
        assert!(wizard.package().is_none());
        assert!(wizard.recipient().is_empty());
    }

    #[test]
    fn back_keeps_entries() {
        let mut wizard = at_confirm();
        wizard.back();
        assert_eq!(wizard.step(), WizardStep::EnterRecipient);
        assert_eq!(wizard.recipient(), "0241234567");
        assert!(wizard.can_proceed());
    }

    #[tokio::test]
    async fn successful_confirm_resets() {
        let mut wizard = at_confirm();
        let request = wizard
            .confirm(&user(), |req| async move { Ok(req) })
            .await
            .unwrap();
        assert_eq!(request.network, Network::Mtn);
        assert_eq!(request.amount, Money::from_minor(600));
        assert_eq!(wizard.step(), WizardStep::SelectPackage);
        assert!(wizard.package().is_none());
    }

    #[tokio::test]
    async fn failed_confirm_stays_on_confirm_with_error() {
        let mut wizard = at_confirm();
        let result: Result<(), _> = wizard
            .confirm(&user(), |_| async {
                Err(CoreError::Rejected {
                    message: "Insufficient balance".into(),
                })
            })
            .await;
        assert!(result.is_err());
        assert_eq!(wizard.step(), WizardStep::Confirm);
        assert_eq!(wizard.error().unwrap().kind, ErrorKind::Rejected);
        assert_eq!(wizard.recipient(), "0241234567");
    }
}
