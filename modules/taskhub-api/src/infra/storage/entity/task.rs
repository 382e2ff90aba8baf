use anyhow::Context;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use uuid::Uuid;

use crate::domain::model::Task;

/// Task row. Priority and status are stored as their lowercase names, as
/// the wire format does; the severity order lives in the domain, not here.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "tasks")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub priority: String,
    pub status: String,
    pub owner_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl TryFrom<Model> for Task {
    type Error = anyhow::Error;

    fn try_from(m: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: m.id,
            title: m.title,
            description: m.description,
            priority: m
                .priority
                .parse()
                .with_context(|| format!("stored priority '{}' is invalid", m.priority))?,
            status: m
                .status
                .parse()
                .with_context(|| format!("stored status '{}' is invalid", m.status))?,
            owner_id: m.owner_id,
            created_at: m.created_at,
            updated_at: m.updated_at,
        })
    }
}
