use std::sync::Arc;

use chrono::Utc;
use tracing::{info, instrument};
use uuid::Uuid;

use super::domain::{NewService, Service};
use super::query::{ListMode, ServiceFilter, ServicePage, ServiceQuery, SortKey};
use super::repository::ServiceRepository;
use crate::document::{non_blank, sanitize};
use crate::errors::ServiceError;
use crate::identity::Principal;
use crate::outcome::{DeleteOutcome, InsertOutcome};
use crate::pagination::Window;

pub struct CatalogService<R: ServiceRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: ServiceRepository + ?Sized> CatalogService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self, input), fields(service_name = %input.service_name))]
    pub async fn create(&self, mut input: NewService) -> Result<InsertOutcome, ServiceError> {
        let alias = input.extra.remove("email");
        let provider_email = non_blank(input.provider_email.as_deref())
            .or_else(|| alias.as_ref().and_then(|v| v.as_str()).and_then(|s| non_blank(Some(s))));
        let service = Service {
            id: Uuid::new_v4(),
            provider_email,
            service_name: input.service_name,
            description: input.description,
            category: input.category,
            price: input.price,
            ratings: input.ratings,
            created_at: input.created_at.unwrap_or_else(Utc::now),
            extra: sanitize(input.extra, &[]),
        };
        let id = service.id;
        self.repo.insert(service).await?;
        info!(service_id = %id, "service_created");
        Ok(InsertOutcome::new(id))
    }

    /// Public listing.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::store::memory::MemoryStore;
    /// use service::catalog::{CatalogService, domain::NewService, query::ServiceQuery, query::ServiceListParams};
    /// let svc = CatalogService::new(Arc::new(MemoryStore::default()));
    /// for price in [30.0, 10.0, 20.0] {
    ///     tokio_test::block_on(svc.create(NewService { service_name: "x".into(), price, ..Default::default() })).unwrap();
    /// }
    /// let params = ServiceListParams { sort: Some("priceLow".into()), page: Some(1), limit: Some(2), ..Default::default() };
    /// let page = tokio_test::block_on(svc.list(&ServiceQuery::new(&params))).unwrap();
    /// let prices: Vec<f64> = page.services.iter().map(|s| s.price).collect();
    /// assert_eq!(prices, vec![10.0, 20.0]);
    /// assert_eq!(page.total, Some(3));
    /// ```
    #[instrument(skip(self, query))]
    pub async fn list(&self, query: &ServiceQuery) -> Result<ServicePage, ServiceError> {
        match query.mode {
            ListMode::Popular { limit } => {
                let window = Window { offset: 0, limit };
                let mut services = self.repo.search(&query.filter, SortKey::PriceLow, Some(window)).await?;
                for s in &mut services {
                    s.description = None;
                }
                Ok(ServicePage { services, total: None })
            }
            ListMode::Paged { sort, window } => {
                let services = self.repo.search(&query.filter, sort, Some(window)).await?;
                let total = self.repo.count(&query.filter).await?;
                Ok(ServicePage { services, total: Some(total) })
            }
        }
    }

    pub async fn get(&self, id: Uuid) -> Result<Service, ServiceError> {
        self.repo.find(id).await?.ok_or_else(|| ServiceError::not_found("Service"))
    }

    /// The caller's own listings, newest first.
    pub async fn list_owned(&self, principal: &Principal, requested: Option<&str>) -> Result<Vec<Service>, ServiceError> {
        let email = principal.authorize_email(requested)?;
        self.repo.search(&ServiceFilter::by_provider(email), SortKey::Newest, None).await
    }

    #[instrument(skip(self, principal), fields(service_id = %id, email = %principal.email))]
    pub async fn delete_owned(&self, principal: &Principal, id: Uuid) -> Result<DeleteOutcome, ServiceError> {
        let service = self.repo.find(id).await?.ok_or_else(|| ServiceError::not_found("Service"))?;
        if !principal.owns(service.provider_email.as_deref()) {
            return Err(ServiceError::forbidden());
        }
        let deleted = self.repo.delete(id).await?;
        info!(deleted, "service_deleted");
        Ok(DeleteOutcome::new(deleted))
    }
}
