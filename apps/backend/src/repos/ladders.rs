//! Ladder repository functions for domain layer.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::ladders_sea as ladders_adapter;
use crate::entities::ladders;
use crate::errors::domain::DomainError;

/// Ladder domain model. The password never leaves the service layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ladder {
    pub id: i64,
    pub name: String,
    pub password: Option<String>,
    pub start_date: OffsetDateTime,
    pub end_date: OffsetDateTime,
    pub created_by: i64,
    pub is_active: bool,
    pub algorithm: String,
    pub created_at: OffsetDateTime,
}

impl Ladder {
    pub fn has_password(&self) -> bool {
        self.password.is_some()
    }

    /// The end date has passed.
    pub fn is_ended(&self, now: OffsetDateTime) -> bool {
        now > self.end_date
    }
}

impl From<ladders::Model> for Ladder {
    fn from(model: ladders::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            password: model.password,
            start_date: model.start_date,
            end_date: model.end_date,
            created_by: model.created_by,
            is_active: model.is_active,
            algorithm: model.algorithm,
            created_at: model.created_at,
        }
    }
}

/// Fields for a new ladder.
#[derive(Debug, Clone)]
pub struct NewLadder {
    pub name: String,
    pub password: Option<String>,
    pub start_date: OffsetDateTime,
    pub end_date: OffsetDateTime,
    pub created_by: i64,
    pub algorithm: String,
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ladder_id: i64,
) -> Result<Option<Ladder>, DomainError> {
    let ladder = ladders_adapter::find_by_id(conn, ladder_id).await?;
    Ok(ladder.map(Ladder::from))
}

pub async fn find_by_id_for_update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ladder_id: i64,
) -> Result<Option<Ladder>, DomainError> {
    let ladder = ladders_adapter::find_by_id_for_update(conn, ladder_id).await?;
    Ok(ladder.map(Ladder::from))
}

pub async fn create_ladder<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    new: NewLadder,
    now: OffsetDateTime,
) -> Result<Ladder, DomainError> {
    let dto = ladders_adapter::LadderCreate {
        name: new.name,
        password: new.password,
        start_date: new.start_date,
        end_date: new.end_date,
        created_by: new.created_by,
        algorithm: new.algorithm,
    };
    let ladder = ladders_adapter::create_ladder(conn, dto, now).await?;
    Ok(Ladder::from(ladder))
}

pub async fn set_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ladder_id: i64,
    is_active: bool,
) -> Result<Ladder, DomainError> {
    let ladder = ladders_adapter::set_active(conn, ladder_id, is_active).await?;
    Ok(Ladder::from(ladder))
}

pub async fn list_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Ladder>, DomainError> {
    let ladders = ladders_adapter::find_all(conn).await?;
    Ok(ladders.into_iter().map(Ladder::from).collect())
}

pub async fn list_by_creator<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<Ladder>, DomainError> {
    let ladders = ladders_adapter::find_by_creator(conn, user_id).await?;
    Ok(ladders.into_iter().map(Ladder::from).collect())
}

pub async fn list_by_ids<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ids: Vec<i64>,
) -> Result<Vec<Ladder>, DomainError> {
    let ladders = ladders_adapter::find_by_ids(conn, ids).await?;
    Ok(ladders.into_iter().map(Ladder::from).collect())
}

pub async fn list_active<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Ladder>, DomainError> {
    let ladders = ladders_adapter::find_active(conn).await?;
    Ok(ladders.into_iter().map(Ladder::from).collect())
}

/// Flip each of `ids` to inactive if still active; returns the ids this call changed.
pub async fn deactivate_many<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    ids: Vec<i64>,
) -> Result<Vec<i64>, DomainError> {
    let mut flipped = Vec::with_capacity(ids.len());
    for id in ids {
        if ladders_adapter::deactivate_if_active(conn, id).await? {
            flipped.push(id);
        }
    }
    Ok(flipped)
}
