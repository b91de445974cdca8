use std::collections::BTreeMap;

use sea_orm::DatabaseConnection;

use crate::{
    model::{
        dashboard::DashboardDto,
        order::{OrderStatus, PaymentStatus},
    },
    server::{
        config::ShopSettings,
        data::{order::OrderRepository, product::ProductRepository, user::UserRepository},
        error::AppError,
        service::debt::DebtService,
    },
};

pub struct DashboardService<'a> {
    db: &'a DatabaseConnection,
    shop: ShopSettings,
}

impl<'a> DashboardService<'a> {
    pub fn new(db: &'a DatabaseConnection, shop: ShopSettings) -> Self {
        Self { db, shop }
    }

    /// Back office headline figures. Every order status is present, zero if unused.
    pub async fn overview(&self) -> Result<DashboardDto, AppError> {
        let orders = OrderRepository::new(self.db);
        let products = ProductRepository::new(self.db);
        let users = UserRepository::new(self.db);
        let debts = DebtService::new(self.db);

        let (counts, revenue, paid_revenue, active_products, low_stock_products, customers, debt) =
            tokio::try_join!(
                orders.count_by_status(),
                orders.sum_total_by_status(OrderStatus::Delivered),
                orders.sum_total_by_payment(PaymentStatus::Paid),
                products.count_active(),
                products.count_low_stock(self.shop.low_stock_threshold),
                users.count_customers(),
                debts.summary(None),
            )?;

        let mut orders_by_status: BTreeMap<String, u64> = OrderStatus::ALL
            .iter()
            .map(|status| (status.to_string(), 0))
            .collect();
        for (status, count) in counts {
            orders_by_status.insert(status.to_string(), count);
        }

        Ok(DashboardDto {
            orders_by_status,
            revenue,
            paid_revenue,
            active_products,
            low_stock_products,
            customers,
            outstanding_debt: debt.outstanding(),
        })
    }
}
