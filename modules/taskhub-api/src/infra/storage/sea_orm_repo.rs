//! SeaORM-backed repository implementations for the domain ports.
//!
//! Both structs are generic over `C: ConnectionTrait`, so they can be
//! constructed with a `DatabaseConnection` or a transactional connection.

use anyhow::Context;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::domain::model::{Task, User};
use crate::domain::query::{CreatedOrder, TaskFilter};
use crate::domain::repo::{TasksRepository, UsersRepository};
use crate::infra::storage::entity::task::{
    ActiveModel as TaskAM, Column as TaskColumn, Entity as TaskEntity,
};
use crate::infra::storage::entity::user::{
    ActiveModel as UserAM, Column as UserColumn, Entity as UserEntity,
};

pub struct SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

#[async_trait::async_trait]
impl<C> UsersRepository for SeaOrmUsersRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let found = UserEntity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("user find_by_id failed")?;
        Ok(found.map(Into::into))
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let found = UserEntity::find()
            .filter(UserColumn::Email.eq(email))
            .one(&self.conn)
            .await
            .context("user find_by_email failed")?;
        Ok(found.map(Into::into))
    }

    async fn insert(&self, user: User) -> anyhow::Result<()> {
        let m = UserAM {
            id: Set(user.id),
            name: Set(user.name),
            email: Set(user.email),
            password_hash: Set(user.password_hash),
            created_at: Set(user.created_at),
            updated_at: Set(user.updated_at),
        };
        let _ = m.insert(&self.conn).await.context("user insert failed")?;
        Ok(())
    }
}

pub struct SeaOrmTasksRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    conn: C,
}

impl<C> SeaOrmTasksRepository<C>
where
    C: ConnectionTrait + Send + Sync,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

fn task_active_model(task: Task) -> TaskAM {
    TaskAM {
        id: Set(task.id),
        title: Set(task.title),
        description: Set(task.description),
        priority: Set(task.priority.as_str().to_string()),
        status: Set(task.status.as_str().to_string()),
        owner_id: Set(task.owner_id),
        created_at: Set(task.created_at),
        updated_at: Set(task.updated_at),
    }
}

#[async_trait::async_trait]
impl<C> TasksRepository for SeaOrmTasksRepository<C>
where
    C: ConnectionTrait + Send + Sync + 'static,
{
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Task>> {
        let found = TaskEntity::find_by_id(id)
            .one(&self.conn)
            .await
            .context("task find_by_id failed")?;
        found.map(TryInto::try_into).transpose()
    }

    async fn insert(&self, task: Task) -> anyhow::Result<()> {
        let _ = task_active_model(task)
            .insert(&self.conn)
            .await
            .context("task insert failed")?;
        Ok(())
    }

    async fn update(&self, task: Task) -> anyhow::Result<()> {
        let _ = task_active_model(task)
            .update(&self.conn)
            .await
            .context("task update failed")?;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let res = TaskEntity::delete_by_id(id)
            .exec(&self.conn)
            .await
            .context("task delete failed")?;
        Ok(res.rows_affected > 0)
    }

    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        filter: &TaskFilter,
        order: Option<CreatedOrder>,
    ) -> anyhow::Result<Vec<Task>> {
        let mut query = TaskEntity::find().filter(TaskColumn::OwnerId.eq(owner_id));

        if let Some(status) = filter.status {
            query = query.filter(TaskColumn::Status.eq(status.as_str()));
        }
        if let Some(priority) = filter.priority {
            query = query.filter(TaskColumn::Priority.eq(priority.as_str()));
        }

        // No explicit ordering for the in-memory sorts: rows come back in
        // the store's retrieval order, which the stable sort preserves.
        query = match order {
            Some(CreatedOrder::Desc) => query.order_by_desc(TaskColumn::CreatedAt),
            Some(CreatedOrder::Asc) => query.order_by_asc(TaskColumn::CreatedAt),
            None => query,
        };

        let rows = query
            .all(&self.conn)
            .await
            .context("task list_by_owner failed")?;
        rows.into_iter().map(TryInto::try_into).collect()
    }
}
