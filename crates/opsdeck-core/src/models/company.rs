use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Subscription status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Inactive,
}

/// Billing cycle
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BillingCycle {
    Monthly,
    Yearly,
}

/// One entry in a company's payment history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub amount: Decimal,
    pub plan: String,
    pub status: PaymentStatus,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    Pending,
    Failed,
}

/// Stored payment instrument. Only the masked form is ever persisted;
/// raw card data never reaches this layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredPaymentMethod {
    pub last4: String,
    pub expiry: String,
}

/// Company (tenant) entity.
///
/// The company is the unit of data isolation: every tenant-scoped record
/// carries a `company_id` pointing here. The company itself has no owning
/// tenant; visibility of the companies collection follows the
/// self-referential identity rule in the scoping filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub tax_id: Option<String>,
    /// Plan name looked up in the static catalog; `None` means "Starter".
    pub plan: Option<String>,
    pub subscription_status: SubscriptionStatus,
    pub subscription_due_date: Option<DateTime<Utc>>,
    pub currency: String,
    pub billing_cycle: BillingCycle,
    pub payment_history: Vec<PaymentRecord>,
    pub payment_method: Option<StoredPaymentMethod>,
    pub created_at: DateTime<Utc>,
}

impl Company {
    /// Effective plan name, defaulting to "Starter" when unset.
    pub fn plan_name(&self) -> &str {
        self.plan.as_deref().unwrap_or(super::plan::DEFAULT_PLAN)
    }
}
