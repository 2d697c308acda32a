//! Generic persistence helpers.
//!
//! Every table in the schema is keyed by an auto-incrementing integer, so the
//! same handful of operations serve groups, parties, wallets and both
//! variants of categories and transactions. All helpers accept any
//! [`ConnectionTrait`], which lets them run on the pool or inside
//! [`with_tx!`](crate::ops).

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ConnectionTrait, EntityTrait, IntoActiveModel,
    Iterable, PaginatorTrait, PrimaryKeyToColumn, PrimaryKeyTrait, QueryOrder,
};

use crate::{EngineError, ResultEngine};

/// Number of records returned per page by every listing.
pub const PAGE_SIZE: u64 = 20;

/// One page of records, numbered from 1.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub last_page: u64,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
            last_page: self.last_page,
        }
    }
}

pub(crate) async fn create<'a, A, C>(
    db: &'a C,
    model: A,
) -> ResultEngine<<A::Entity as EntityTrait>::Model>
where
    A: ActiveModelTrait + ActiveModelBehavior + Send + 'a,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    C: ConnectionTrait,
{
    Ok(model.insert(db).await?)
}

pub(crate) async fn update<'a, A, C>(
    db: &'a C,
    model: A,
) -> ResultEngine<<A::Entity as EntityTrait>::Model>
where
    A: ActiveModelTrait + ActiveModelBehavior + Send + 'a,
    <A::Entity as EntityTrait>::Model: IntoActiveModel<A>,
    C: ConnectionTrait,
{
    Ok(model.update(db).await?)
}

pub(crate) async fn find<E, C>(db: &C, id: i32) -> ResultEngine<Option<E::Model>>
where
    E: EntityTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
    C: ConnectionTrait,
{
    Ok(E::find_by_id(id).one(db).await?)
}

/// Like [`find`], but a missing record becomes [`EngineError::KeyNotFound`]
/// carrying `label`.
pub(crate) async fn find_required<E, C>(db: &C, id: i32, label: &str) -> ResultEngine<E::Model>
where
    E: EntityTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
    C: ConnectionTrait,
{
    find::<E, C>(db, id)
        .await?
        .ok_or_else(|| EngineError::KeyNotFound(label.to_string()))
}

pub(crate) async fn exists<E, C>(db: &C, id: i32) -> ResultEngine<bool>
where
    E: EntityTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
    C: ConnectionTrait,
{
    Ok(find::<E, C>(db, id).await?.is_some())
}

pub(crate) async fn delete<E, C>(db: &C, id: i32) -> ResultEngine<()>
where
    E: EntityTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<i32>,
    C: ConnectionTrait,
{
    E::delete_by_id(id).exec(db).await?;
    Ok(())
}

/// Return page `page` (1-based, values below 1 read the first page) ordered
/// by primary key. Pages past the last one are empty and never reach the
/// database, so the offset cannot overflow.
pub(crate) async fn paginate<'a, E, C>(db: &'a C, page: u64) -> ResultEngine<Page<E::Model>>
where
    E: EntityTrait,
    E::Model: Send + Sync + 'a,
    C: ConnectionTrait,
{
    let mut select = E::find();
    for key in E::PrimaryKey::iter() {
        select = select.order_by_asc(key.into_column());
    }

    let page = page.max(1);
    let paginator = select.paginate(db, PAGE_SIZE);
    let totals = paginator.num_items_and_pages().await?;
    let items = if page <= totals.number_of_pages {
        paginator.fetch_page(page - 1).await?
    } else {
        Vec::new()
    };

    Ok(Page {
        items,
        page,
        per_page: PAGE_SIZE,
        total: totals.number_of_items,
        last_page: totals.number_of_pages.max(1),
    })
}
