//! Product data repository.
//!
//! Besides CRUD this repository owns the listing query (search, brand/category,
//! effective-price range and sort), the stock column and the aggregate counts the
//! dashboard and low-stock report rely on. Stock is only written through `set_stock`,
//! which the inventory and order services call inside their transactions.

use chrono::Utc;
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait,
    EntityTrait, Order, PaginatorTrait, QueryFilter, QueryOrder, Select,
};

use crate::{
    model::product::ProductSort,
    server::{
        error::AppError,
        model::{
            pagination::{PageRequest, Paginated},
            product::{CreateProductParam, Product, ProductFilter, UpdateProductParam},
        },
        util::slug::SlugStore,
    },
};

/// SQL for the price a customer pays.
const EFFECTIVE_PRICE: &str = "COALESCE(sale_price, price)";

pub struct ProductRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ProductRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a product under an already resolved, unique `slug`.
    ///
    /// # Returns
    /// - `Ok(Product)` - The created product
    /// - `Err(AppError::DbErr)` - Insert failed; a duplicate SKU is a unique violation
    pub async fn create(&self, param: CreateProductParam, slug: String) -> Result<Product, AppError> {
        let now = Utc::now();
        let entity = entity::product::ActiveModel {
            name: ActiveValue::Set(param.name),
            slug: ActiveValue::Set(slug),
            sku: ActiveValue::Set(param.sku),
            description: ActiveValue::Set(param.description),
            price: ActiveValue::Set(param.price),
            sale_price: ActiveValue::Set(param.sale_price),
            stock: ActiveValue::Set(param.stock),
            brand_id: ActiveValue::Set(param.brand_id),
            category_id: ActiveValue::Set(param.category_id),
            image_url: ActiveValue::Set(param.image_url),
            active: ActiveValue::Set(param.active),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(Product::from_entity(entity))
    }

    pub async fn find_by_id(&self, id: i32) -> Result<Option<Product>, AppError> {
        let entity = entity::prelude::Product::find_by_id(id).one(self.db).await?;

        Ok(entity.map(Product::from_entity))
    }

    pub async fn find_by_slug(&self, slug: &str) -> Result<Option<Product>, AppError> {
        let entity = entity::prelude::Product::find()
            .filter(entity::product::Column::Slug.eq(slug))
            .one(self.db)
            .await?;

        Ok(entity.map(Product::from_entity))
    }

    /// Loads every product whose id is in `ids`, in no particular order.
    pub async fn find_by_ids(&self, ids: &[i32]) -> Result<Vec<Product>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let entities = entity::prelude::Product::find()
            .filter(entity::product::Column::Id.is_in(ids.iter().copied()))
            .all(self.db)
            .await?;

        Ok(entities.into_iter().map(Product::from_entity).collect())
    }

    /// Whether another product already uses `sku`, ignoring `exclude_id`.
    pub async fn sku_taken(&self, sku: &str, exclude_id: Option<i32>) -> Result<bool, AppError> {
        let mut query =
            entity::prelude::Product::find().filter(entity::product::Column::Sku.eq(sku));
        if let Some(id) = exclude_id {
            query = query.filter(entity::product::Column::Id.ne(id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// Applies a partial update. Stock is never touched here.
    pub async fn update(
        &self,
        id: i32,
        param: UpdateProductParam,
    ) -> Result<Option<Product>, AppError> {
        let Some(entity) = entity::prelude::Product::find_by_id(id).one(self.db).await? else {
            return Ok(None);
        };

        let mut active: entity::product::ActiveModel = entity.into();
        if let Some(name) = param.name {
            active.name = ActiveValue::Set(name);
        }
        if let Some(sku) = param.sku {
            active.sku = ActiveValue::Set(sku);
        }
        if let Some(description) = param.description {
            active.description = ActiveValue::Set(Some(description));
        }
        if let Some(price) = param.price {
            active.price = ActiveValue::Set(price);
        }
        if let Some(sale_price) = param.sale_price {
            active.sale_price = ActiveValue::Set(sale_price);
        }
        if let Some(brand_id) = param.brand_id {
            active.brand_id = ActiveValue::Set(Some(brand_id));
        }
        if let Some(category_id) = param.category_id {
            active.category_id = ActiveValue::Set(Some(category_id));
        }
        if let Some(image_url) = param.image_url {
            active.image_url = ActiveValue::Set(Some(image_url));
        }
        if let Some(is_active) = param.active {
            active.active = ActiveValue::Set(is_active);
        }
        active.updated_at = ActiveValue::Set(Utc::now());

        Ok(Some(Product::from_entity(active.update(self.db).await?)))
    }

    /// Overwrites the stock column.
    pub async fn set_stock(&self, id: i32, stock: i32) -> Result<(), AppError> {
        entity::prelude::Product::update_many()
            .filter(entity::product::Column::Id.eq(id))
            .col_expr(entity::product::Column::Stock, Expr::value(stock))
            .col_expr(entity::product::Column::UpdatedAt, Expr::value(Utc::now()))
            .exec(self.db)
            .await?;

        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = entity::prelude::Product::delete_by_id(id).exec(self.db).await?;

        Ok(result.rows_affected > 0)
    }

    /// Lists products matching `filter`, sorted per `filter.sort`.
    ///
    /// The price range applies to the effective price (sale price when set).
    pub async fn list(
        &self,
        filter: ProductFilter,
        page: PageRequest,
    ) -> Result<Paginated<Product>, AppError> {
        let query = Self::sorted(Self::filtered(&filter), filter.sort);
        let paginator = query.paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let products = paginator
            .fetch_page(page.index())
            .await?
            .into_iter()
            .map(Product::from_entity)
            .collect();

        Ok(Paginated::new(products, page, total))
    }

    pub async fn count_by_brand(&self, brand_id: i32) -> Result<u64, AppError> {
        let count = entity::prelude::Product::find()
            .filter(entity::product::Column::BrandId.eq(brand_id))
            .count(self.db)
            .await?;

        Ok(count)
    }

    pub async fn count_by_category(&self, category_id: i32) -> Result<u64, AppError> {
        let count = entity::prelude::Product::find()
            .filter(entity::product::Column::CategoryId.eq(category_id))
            .count(self.db)
            .await?;

        Ok(count)
    }

    pub async fn count_active(&self) -> Result<u64, AppError> {
        let count = entity::prelude::Product::find()
            .filter(entity::product::Column::Active.eq(true))
            .count(self.db)
            .await?;

        Ok(count)
    }

    /// Active products with `stock <= threshold`, lowest stock first.
    pub async fn low_stock(
        &self,
        threshold: i32,
        page: PageRequest,
    ) -> Result<Paginated<Product>, AppError> {
        let paginator = Self::low_stock_query(threshold)
            .order_by_asc(entity::product::Column::Stock)
            .order_by_asc(entity::product::Column::Id)
            .paginate(self.db, page.limit);

        let total = paginator.num_items().await?;
        let products = paginator
            .fetch_page(page.index())
            .await?
            .into_iter()
            .map(Product::from_entity)
            .collect();

        Ok(Paginated::new(products, page, total))
    }

    pub async fn count_low_stock(&self, threshold: i32) -> Result<u64, AppError> {
        Ok(Self::low_stock_query(threshold).count(self.db).await?)
    }

    fn low_stock_query(threshold: i32) -> Select<entity::prelude::Product> {
        entity::prelude::Product::find()
            .filter(entity::product::Column::Active.eq(true))
            .filter(entity::product::Column::Stock.lte(threshold))
    }

    fn filtered(filter: &ProductFilter) -> Select<entity::prelude::Product> {
        use entity::product::Column;

        let mut query = entity::prelude::Product::find();

        if let Some(active) = filter.active {
            query = query.filter(Column::Active.eq(active));
        }
        if let Some(search) = &filter.search {
            query = query.filter(
                Condition::any()
                    .add(Column::Name.contains(search))
                    .add(Column::Sku.contains(search)),
            );
        }
        if let Some(brand_id) = filter.brand_id {
            query = query.filter(Column::BrandId.eq(brand_id));
        }
        if let Some(category_id) = filter.category_id {
            query = query.filter(Column::CategoryId.eq(category_id));
        }
        if let Some(min) = filter.min_price {
            query = query.filter(
                Condition::any()
                    .add(
                        Condition::all()
                            .add(Column::SalePrice.is_not_null())
                            .add(Column::SalePrice.gte(min)),
                    )
                    .add(
                        Condition::all()
                            .add(Column::SalePrice.is_null())
                            .add(Column::Price.gte(min)),
                    ),
            );
        }
        if let Some(max) = filter.max_price {
            query = query.filter(
                Condition::any()
                    .add(
                        Condition::all()
                            .add(Column::SalePrice.is_not_null())
                            .add(Column::SalePrice.lte(max)),
                    )
                    .add(
                        Condition::all()
                            .add(Column::SalePrice.is_null())
                            .add(Column::Price.lte(max)),
                    ),
            );
        }

        query
    }

    fn sorted(
        query: Select<entity::prelude::Product>,
        sort: ProductSort,
    ) -> Select<entity::prelude::Product> {
        use entity::product::Column;

        match sort {
            ProductSort::Newest => query
                .order_by_desc(Column::CreatedAt)
                .order_by_desc(Column::Id),
            ProductSort::Oldest => query.order_by_asc(Column::CreatedAt).order_by_asc(Column::Id),
            ProductSort::PriceAsc => query
                .order_by(Expr::cust(EFFECTIVE_PRICE), Order::Asc)
                .order_by_asc(Column::Id),
            ProductSort::PriceDesc => query
                .order_by(Expr::cust(EFFECTIVE_PRICE), Order::Desc)
                .order_by_asc(Column::Id),
            ProductSort::Name => query.order_by_asc(Column::Name).order_by_asc(Column::Id),
        }
    }
}

impl<C: ConnectionTrait> SlugStore for ProductRepository<'_, C> {
    async fn slug_taken(&self, slug: &str) -> Result<bool, AppError> {
        let count = entity::prelude::Product::find()
            .filter(entity::product::Column::Slug.eq(slug))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }
}
