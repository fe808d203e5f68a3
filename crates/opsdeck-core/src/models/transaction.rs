use super::entity::{Collection, Entity, TenantScoped};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Transaction kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

/// Financial transaction entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub company_id: Uuid,
    pub kind: TransactionKind,
    pub description: String,
    pub amount: Decimal,
    pub date: DateTime<Utc>,
    pub category: Option<String>,
}

impl TenantScoped for Transaction {
    fn company_id(&self) -> Option<Uuid> {
        Some(self.company_id)
    }
}

#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub description: String,
    pub amount: Decimal,
    pub date: Option<DateTime<Utc>>,
    pub category: Option<String>,
}

impl Entity for Transaction {
    const COLLECTION: Collection = Collection::Transactions;
    type Draft = NewTransaction;

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_draft(draft: NewTransaction, id: Uuid, company_id: Uuid, now: DateTime<Utc>) -> Self {
        Transaction {
            id,
            company_id,
            kind: draft.kind,
            description: draft.description,
            amount: draft.amount,
            date: draft.date.unwrap_or(now),
            category: draft.category,
        }
    }
}
