//! Stateless rules that only look at the account snapshot

use crate::core::commit::Verdict;
use crate::core::traits::Rule;
use crate::types::{Account, AuthorizerError, Transaction, Violation};

/// Refuses every transaction while the account card is inactive
#[derive(Debug, Clone, Copy, Default)]
pub struct CardActive;

impl Rule for CardActive {
    fn name(&self) -> &'static str {
        "card-active"
    }

    fn check(
        &self,
        account: &Account,
        _transaction: &Transaction,
    ) -> Result<Verdict, AuthorizerError> {
        if !account.active_card {
            return Ok(Verdict::reject(Violation::card_not_active()));
        }
        Ok(Verdict::pass())
    }
}

/// Refuses transactions whose amount exceeds the available limit
#[derive(Debug, Clone, Copy, Default)]
pub struct SufficientLimit;

impl Rule for SufficientLimit {
    fn name(&self) -> &'static str {
        "sufficient-limit"
    }

    fn check(
        &self,
        account: &Account,
        transaction: &Transaction,
    ) -> Result<Verdict, AuthorizerError> {
        if account.available_limit < transaction.amount {
            return Ok(Verdict::reject(Violation::insufficient_limit(
                account.available_limit,
                transaction.amount,
            )));
        }
        Ok(Verdict::pass())
    }
}

/// Refuses transactions to merchants on the account deny list
#[derive(Debug, Clone, Copy, Default)]
pub struct MerchantDenyList;

impl Rule for MerchantDenyList {
    fn name(&self) -> &'static str {
        "merchant-deny-list"
    }

    fn check(
        &self,
        account: &Account,
        transaction: &Transaction,
    ) -> Result<Verdict, AuthorizerError> {
        if account.denies(&transaction.merchant) {
            return Ok(Verdict::reject(Violation::merchant_denied(
                &transaction.merchant,
            )));
        }
        Ok(Verdict::pass())
    }
}
