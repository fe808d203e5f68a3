use super::entity::{Collection, Entity, TenantScoped};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// SaaS product tracked by a company (its own tool subscriptions).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaasProduct {
    pub id: Uuid,
    pub company_id: Uuid,
    pub name: String,
    pub url: Option<String>,
    pub monthly_price: Decimal,
    pub renewal_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl TenantScoped for SaasProduct {
    fn company_id(&self) -> Option<Uuid> {
        Some(self.company_id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct NewSaasProduct {
    pub name: String,
    pub url: Option<String>,
    pub monthly_price: Decimal,
    pub renewal_date: Option<DateTime<Utc>>,
}

impl Entity for SaasProduct {
    const COLLECTION: Collection = Collection::SaasProducts;
    type Draft = NewSaasProduct;

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_draft(draft: NewSaasProduct, id: Uuid, company_id: Uuid, now: DateTime<Utc>) -> Self {
        SaasProduct {
            id,
            company_id,
            name: draft.name,
            url: draft.url,
            monthly_price: draft.monthly_price,
            renewal_date: draft.renewal_date,
            created_at: now,
        }
    }
}
