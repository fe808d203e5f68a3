//! Subscription operations.
//!
//! Plan changes, payment records, and the stored (masked) payment
//! instrument. Unlike the entitlement gate's fail-open read path, choosing
//! a plan is explicit user intent: a catalog miss here is an error.

use crate::mutation::MutationCoordinator;
use chrono::{Duration, Utc};
use opsdeck_core::models::{
    find_plan, BillingCycle, Company, PaymentRecord, PaymentStatus, StoredPaymentMethod,
    SubscriptionStatus,
};
use opsdeck_core::{AppError, IdentityContext};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

pub struct SubscriptionService {
    coordinator: Arc<MutationCoordinator>,
}

impl SubscriptionService {
    pub fn new(coordinator: Arc<MutationCoordinator>) -> Self {
        SubscriptionService { coordinator }
    }

    async fn company(&self, company_id: Uuid) -> Result<Company, AppError> {
        let store = self.coordinator.store();
        let guard = store.read().await;
        guard
            .company(company_id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("company {company_id}")))
    }

    /// Switch a company to a catalog plan and record the payment.
    #[tracing::instrument(skip(self, ctx), fields(company = %company_id, plan = plan_name))]
    pub async fn change_plan(
        &self,
        company_id: Uuid,
        plan_name: &str,
        cycle: BillingCycle,
        ctx: &IdentityContext,
    ) -> Result<Company, AppError> {
        let plan =
            find_plan(plan_name).ok_or_else(|| AppError::UnknownPlan(plan_name.to_string()))?;

        let mut company = self.company(company_id).await?;
        let now = Utc::now();
        let (amount, period) = match cycle {
            BillingCycle::Monthly => (plan.monthly_price, Duration::days(30)),
            BillingCycle::Yearly => (plan.yearly_price, Duration::days(365)),
        };
        company.plan = Some(plan.name.to_string());
        company.billing_cycle = cycle;
        company.subscription_status = SubscriptionStatus::Active;
        company.subscription_due_date = Some(now + period);
        company.payment_history.push(PaymentRecord {
            id: Uuid::new_v4(),
            date: now,
            amount,
            plan: plan.name.to_string(),
            status: PaymentStatus::Paid,
        });

        self.coordinator.update_company(company, ctx).await
    }

    /// Append a payment to the company's history without changing the plan.
    #[tracing::instrument(skip(self, ctx), fields(company = %company_id))]
    pub async fn record_payment(
        &self,
        company_id: Uuid,
        amount: Decimal,
        status: PaymentStatus,
        ctx: &IdentityContext,
    ) -> Result<Company, AppError> {
        let mut company = self.company(company_id).await?;
        let plan = company.plan_name().to_string();
        company.payment_history.push(PaymentRecord {
            id: Uuid::new_v4(),
            date: Utc::now(),
            amount,
            plan,
            status,
        });
        self.coordinator.update_company(company, ctx).await
    }

    /// Store the masked form of a payment instrument. Raw card data never
    /// reaches this layer; only last4 + expiry are accepted.
    #[tracing::instrument(skip(self, ctx), fields(company = %company_id))]
    pub async fn store_payment_method(
        &self,
        company_id: Uuid,
        last4: &str,
        expiry: &str,
        ctx: &IdentityContext,
    ) -> Result<Company, AppError> {
        if last4.len() != 4 || !last4.chars().all(|c| c.is_ascii_digit()) {
            return Err(AppError::InvalidInput(
                "last4 must be exactly four digits".to_string(),
            ));
        }
        if expiry.is_empty() {
            return Err(AppError::InvalidInput("expiry is required".to_string()));
        }

        let mut company = self.company(company_id).await?;
        company.payment_method = Some(StoredPaymentMethod {
            last4: last4.to_string(),
            expiry: expiry.to_string(),
        });
        self.coordinator.update_company(company, ctx).await
    }
}
