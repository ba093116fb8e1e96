//! Singleton payment requisites shown on the settings page. One row holds
//! the company name and free-form banking requisites; saving upserts it.

use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryOrder, Set,
};

use crate::error::RepositoryError;
use crate::models::{payment_details, PaymentDetails};

pub struct PaymentDetailsRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> PaymentDetailsRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// The current requisites row, if one was ever saved.
    pub async fn get(&self) -> Result<Option<payment_details::Model>, RepositoryError> {
        Ok(PaymentDetails::find()
            .order_by_asc(payment_details::Column::Id)
            .one(self.db)
            .await?)
    }

    /// Creates the row on first save, updates it afterwards.
    pub async fn upsert(
        &self,
        company_name: &str,
        requisites: &str,
    ) -> Result<payment_details::Model, RepositoryError> {
        let company_name = company_name.trim();
        if company_name.is_empty() {
            return Err(RepositoryError::validation_error("company name is required"));
        }
        let requisites = requisites.trim();

        match self.get().await? {
            Some(existing) => {
                let mut active = existing.into_active_model();
                active.company_name = Set(company_name.to_string());
                active.requisites = Set(requisites.to_string());
                Ok(active.update(self.db).await?)
            }
            None => {
                let model = payment_details::ActiveModel {
                    company_name: Set(company_name.to_string()),
                    requisites: Set(requisites.to_string()),
                    ..Default::default()
                };
                Ok(model.insert(self.db).await?)
            }
        }
    }
}
