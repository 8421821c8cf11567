//! PostgreSQL-backed repositories.

use async_trait::async_trait;
use models::{booking, provider_request, service, user, RequestStatus, Role};
use sea_orm::sea_query::{Alias, Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, Order,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set, SqlErr, TransactionTrait,
};
use chrono::Utc;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use crate::bookings::{domain::Booking, repository::BookingRepository};
use crate::catalog::{
    domain::Service,
    query::{ServiceFilter, SortKey},
    repository::ServiceRepository,
};
use crate::document::fields_from_json;
use crate::errors::ServiceError;
use crate::outcome::UpdateOutcome;
use crate::pagination::Window;
use crate::providers::{
    domain::{ProviderRequest, StatusChange},
    repository::ProviderRepository,
};
use crate::users::{domain::User, repository::UserRepository};

pub struct SeaOrmStore {
    pub db: DatabaseConnection,
}

impl SeaOrmStore {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

impl From<user::Model> for User {
    fn from(m: user::Model) -> Self {
        Self { id: m.id, email: m.email, role: m.role, created_at: m.created_at.with_timezone(&Utc), extra: fields_from_json(m.extra) }
    }
}

impl From<provider_request::Model> for ProviderRequest {
    fn from(m: provider_request::Model) -> Self {
        Self { id: m.id, email: m.email, status: m.status, created_at: m.created_at.with_timezone(&Utc), extra: fields_from_json(m.extra) }
    }
}

impl From<service::Model> for Service {
    fn from(m: service::Model) -> Self {
        Self {
            id: m.id,
            provider_email: m.provider_email,
            service_name: m.service_name,
            description: m.description,
            category: m.category,
            price: m.price,
            ratings: m.ratings,
            created_at: m.created_at.with_timezone(&Utc),
            extra: fields_from_json(m.extra),
        }
    }
}

impl From<booking::Model> for Booking {
    fn from(m: booking::Model) -> Self {
        Self {
            id: m.id,
            customer_email: m.customer_email,
            service_id: m.service_id,
            booked_at: m.booked_at.with_timezone(&Utc),
            extra: fields_from_json(m.extra),
        }
    }
}

/// Promote the account registered under `email`; runs on whatever connection
/// or transaction it is given.
async fn promote<C: ConnectionTrait>(conn: &C, email: &str) -> Result<UpdateOutcome, DbErr> {
    let Some(found) = user::Entity::find().filter(user::Column::Email.eq(email)).one(conn).await? else {
        return Ok(UpdateOutcome::unmatched());
    };
    if found.role == Role::Provider {
        return Ok(UpdateOutcome::matched(false));
    }
    let mut am: user::ActiveModel = found.into();
    am.role = Set(Role::Provider);
    am.update(conn).await?;
    Ok(UpdateOutcome::matched(true))
}

async fn write_status<C: ConnectionTrait>(
    conn: &C,
    found: provider_request::Model,
    status: RequestStatus,
) -> Result<UpdateOutcome, DbErr> {
    if found.status == status {
        return Ok(UpdateOutcome::matched(false));
    }
    let mut am: provider_request::ActiveModel = found.into();
    am.status = Set(status);
    am.update(conn).await?;
    Ok(UpdateOutcome::matched(true))
}

/// Escape `%`, `_` and the escape char itself for a LIKE pattern.
fn escape_like(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn filtered(filter: &ServiceFilter) -> Select<service::Entity> {
    let mut q = service::Entity::find();
    if let Some(email) = &filter.provider_email {
        q = q.filter(service::Column::ProviderEmail.eq(email.as_str()));
    }
    if let Some(category) = &filter.category {
        q = q.filter(Expr::expr(Func::lower(Expr::col(service::Column::Category))).eq(category.as_str()));
    }
    if let Some(needle) = &filter.search {
        let pattern = format!("%{}%", escape_like(needle));
        let like = |e: Expr| e.like(LikeExpr::new(pattern.clone()).escape('\\'));
        let lowered = |c: service::Column| Expr::expr(Func::lower(Expr::col(c)));
        q = q.filter(
            Condition::any()
                .add(like(lowered(service::Column::Description)))
                .add(like(lowered(service::Column::ServiceName)))
                .add(like(lowered(service::Column::Category)))
                .add(like(lowered(service::Column::ProviderEmail)))
                .add(like(Expr::expr(Func::cast_as(Expr::col(service::Column::Price), Alias::new("text"))))),
        );
    }
    q
}

fn ordered(q: Select<service::Entity>, sort: SortKey) -> Select<service::Entity> {
    let (col, dir) = match sort {
        SortKey::PriceLow => (service::Column::Price, Order::Asc),
        SortKey::PriceHigh => (service::Column::Price, Order::Desc),
        SortKey::Name => (service::Column::ServiceName, Order::Asc),
        SortKey::Newest => (service::Column::CreatedAt, Order::Desc),
        SortKey::TopRated => (service::Column::Ratings, Order::Desc),
    };
    q.order_by(col, dir).order_by_asc(service::Column::Id)
}

#[async_trait]
impl UserRepository for SeaOrmStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ServiceError> {
        let found = user::Entity::find().filter(user::Column::Email.eq(email)).one(&self.db).await?;
        Ok(found.map(User::from))
    }

    async fn list(&self) -> Result<Vec<User>, ServiceError> {
        let rows = user::Entity::find().order_by_asc(user::Column::CreatedAt).all(&self.db).await?;
        Ok(rows.into_iter().map(User::from).collect())
    }

    async fn insert_if_absent(&self, u: User) -> Result<bool, ServiceError> {
        let am = user::ActiveModel {
            id: Set(u.id),
            email: Set(u.email),
            role: Set(u.role),
            extra: Set(Value::Object(u.extra)),
            created_at: Set(u.created_at.into()),
        };
        match user::Entity::insert(am).exec(&self.db).await {
            Ok(_) => Ok(true),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                debug!("concurrent registration hit unique email");
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn update_role(&self, id: Uuid, role: Role) -> Result<UpdateOutcome, ServiceError> {
        let Some(found) = user::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(UpdateOutcome::unmatched());
        };
        if found.role == role {
            return Ok(UpdateOutcome::matched(false));
        }
        let mut am: user::ActiveModel = found.into();
        am.role = Set(role);
        am.update(&self.db).await?;
        Ok(UpdateOutcome::matched(true))
    }
}

#[async_trait]
impl ProviderRepository for SeaOrmStore {
    async fn insert(&self, r: ProviderRequest) -> Result<(), ServiceError> {
        let am = provider_request::ActiveModel {
            id: Set(r.id),
            email: Set(r.email),
            status: Set(r.status),
            extra: Set(Value::Object(r.extra)),
            created_at: Set(r.created_at.into()),
        };
        provider_request::Entity::insert(am).exec(&self.db).await?;
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<ProviderRequest>, ServiceError> {
        Ok(provider_request::Entity::find_by_id(id).one(&self.db).await?.map(ProviderRequest::from))
    }

    async fn list(&self, email: Option<&str>) -> Result<Vec<ProviderRequest>, ServiceError> {
        let mut q = provider_request::Entity::find();
        if let Some(email) = email {
            q = q.filter(provider_request::Column::Email.eq(email));
        }
        let rows = q.order_by_asc(provider_request::Column::CreatedAt).all(&self.db).await?;
        Ok(rows.into_iter().map(ProviderRequest::from).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<u64, ServiceError> {
        Ok(provider_request::Entity::delete_by_id(id).exec(&self.db).await?.rows_affected)
    }

    async fn set_status(&self, id: Uuid, status: RequestStatus) -> Result<UpdateOutcome, ServiceError> {
        match provider_request::Entity::find_by_id(id).one(&self.db).await? {
            Some(found) => Ok(write_status(&self.db, found, status).await?),
            None => Ok(UpdateOutcome::unmatched()),
        }
    }

    async fn apply_status(&self, id: Uuid, status: RequestStatus) -> Result<Option<StatusChange>, ServiceError> {
        let txn = self.db.begin().await?;
        let Some(found) = provider_request::Entity::find_by_id(id).one(&txn).await? else {
            txn.rollback().await?;
            return Ok(None);
        };
        let email = found.email.clone();
        let request_result = write_status(&txn, found, status).await?;
        let user_result = match status {
            RequestStatus::Accepted => Some(promote(&txn, &email).await?),
            _ => None,
        };
        txn.commit().await?;
        Ok(Some(StatusChange { request_result, user_result }))
    }
}

#[async_trait]
impl ServiceRepository for SeaOrmStore {
    async fn insert(&self, s: Service) -> Result<(), ServiceError> {
        let am = service::ActiveModel {
            id: Set(s.id),
            provider_email: Set(s.provider_email),
            service_name: Set(s.service_name),
            description: Set(s.description),
            category: Set(s.category),
            price: Set(s.price),
            ratings: Set(s.ratings),
            extra: Set(Value::Object(s.extra)),
            created_at: Set(s.created_at.into()),
        };
        service::Entity::insert(am).exec(&self.db).await?;
        Ok(())
    }

    async fn find(&self, id: Uuid) -> Result<Option<Service>, ServiceError> {
        Ok(service::Entity::find_by_id(id).one(&self.db).await?.map(Service::from))
    }

    async fn search(&self, filter: &ServiceFilter, sort: SortKey, window: Option<Window>) -> Result<Vec<Service>, ServiceError> {
        let mut q = ordered(filtered(filter), sort);
        if let Some(w) = window {
            q = q.offset(w.offset).limit(w.limit);
        }
        let rows = q.all(&self.db).await?;
        Ok(rows.into_iter().map(Service::from).collect())
    }

    async fn count(&self, filter: &ServiceFilter) -> Result<u64, ServiceError> {
        Ok(filtered(filter).count(&self.db).await?)
    }

    async fn delete(&self, id: Uuid) -> Result<u64, ServiceError> {
        Ok(service::Entity::delete_by_id(id).exec(&self.db).await?.rows_affected)
    }
}

#[async_trait]
impl BookingRepository for SeaOrmStore {
    async fn insert(&self, b: Booking) -> Result<(), ServiceError> {
        let am = booking::ActiveModel {
            id: Set(b.id),
            customer_email: Set(b.customer_email),
            service_id: Set(b.service_id),
            extra: Set(Value::Object(b.extra)),
            booked_at: Set(b.booked_at.into()),
        };
        booking::Entity::insert(am).exec(&self.db).await?;
        Ok(())
    }

    async fn list(&self, customer_email: Option<&str>) -> Result<Vec<Booking>, ServiceError> {
        let mut q = booking::Entity::find();
        if let Some(email) = customer_email {
            q = q.filter(booking::Column::CustomerEmail.eq(email));
        }
        let rows = q
            .order_by_desc(booking::Column::BookedAt)
            .order_by_asc(booking::Column::Id)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Booking::from).collect())
    }

    async fn delete(&self, id: Uuid) -> Result<u64, ServiceError> {
        Ok(booking::Entity::delete_by_id(id).exec(&self.db).await?.rows_affected)
    }
}
