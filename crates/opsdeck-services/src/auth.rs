//! Authentication boundary.
//!
//! Login and registration against the entity store, with bcrypt-hashed
//! credentials. A successful login or registration yields the `User` the
//! caller places into an `IdentityContext` before any scoped read happens.

use crate::store::EntityStore;
use chrono::Utc;
use opsdeck_core::models::{
    BillingCycle, Company, SubscriptionStatus, User, UserRole,
};
use opsdeck_core::{AppError, Collection};
use opsdeck_storage::Storage;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;
use validator::Validate;

/// Registration payload: a new company plus its first (admin) user.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "company name is required"))]
    pub company_name: String,
    pub tax_id: Option<String>,
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    pub phone: Option<String>,
}

pub struct AuthService {
    store: Arc<RwLock<EntityStore>>,
    storage: Arc<dyn Storage>,
}

impl AuthService {
    pub fn new(store: Arc<RwLock<EntityStore>>, storage: Arc<dyn Storage>) -> Self {
        AuthService { store, storage }
    }

    /// Verify credentials. Unknown email and wrong password are both
    /// `Ok(None)` - the caller cannot distinguish them.
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<Option<User>, AppError> {
        let user = {
            let store = self.store.read().await;
            store
                .users
                .iter()
                .find(|u| u.email.eq_ignore_ascii_case(email))
                .cloned()
        };
        let Some(user) = user else {
            return Ok(None);
        };
        let verified = bcrypt::verify(password, &user.password_hash)
            .map_err(|e| AppError::Internal(format!("password verification failed: {e}")))?;
        if verified {
            tracing::info!(user = %user.id, "login succeeded");
            Ok(Some(user))
        } else {
            tracing::debug!(user = %user.id, "login failed: bad password");
            Ok(None)
        }
    }

    /// Register a new company with its first admin user.
    #[tracing::instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> Result<(User, Company), AppError> {
        request
            .validate()
            .map_err(|e| AppError::InvalidInput(e.to_string()))?;

        {
            let store = self.store.read().await;
            if store
                .users
                .iter()
                .any(|u| u.email.eq_ignore_ascii_case(&request.email))
            {
                return Err(AppError::EmailTaken(request.email));
            }
        }

        let now = Utc::now();
        let company = Company {
            id: Uuid::new_v4(),
            name: request.company_name,
            tax_id: request.tax_id,
            // Unset plan resolves to Starter everywhere downstream.
            plan: None,
            subscription_status: SubscriptionStatus::Active,
            subscription_due_date: None,
            currency: "USD".to_string(),
            billing_cycle: BillingCycle::Monthly,
            payment_history: Vec::new(),
            payment_method: None,
            created_at: now,
        };
        let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("password hashing failed: {e}")))?;
        let user = User {
            id: Uuid::new_v4(),
            company_id: Some(company.id),
            role: UserRole::Admin,
            name: request.name,
            email: request.email,
            password_hash,
            phone: request.phone,
            created_at: now,
        };

        self.storage
            .save(Collection::Companies, serde_json::to_value(&company)?)
            .await?;
        if let Err(e) = self
            .storage
            .save(Collection::Users, serde_json::to_value(&user)?)
            .await
        {
            // Best effort: do not leave an orphan company behind a failed
            // user save.
            let _ = self
                .storage
                .delete(Collection::Companies, company.id)
                .await;
            return Err(e.into());
        }

        let mut store = self.store.write().await;
        store.companies.push(company.clone());
        store.users.push(user.clone());
        tracing::info!(company = %company.id, user = %user.id, "company registered");
        Ok((user, company))
    }
}
