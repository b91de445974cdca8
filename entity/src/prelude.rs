pub use super::activity::Entity as Activity;
pub use super::advertisement::Entity as Advertisement;
pub use super::brand::Entity as Brand;
pub use super::category::Entity as Category;
pub use super::debt::Entity as Debt;
pub use super::debt_item::Entity as DebtItem;
pub use super::debt_payment::Entity as DebtPayment;
pub use super::delivery::Entity as Delivery;
pub use super::delivery_event::Entity as DeliveryEvent;
pub use super::homepage::Entity as Homepage;
pub use super::inventory_movement::Entity as InventoryMovement;
pub use super::invoice::Entity as Invoice;
pub use super::invoice_order::Entity as InvoiceOrder;
pub use super::news::Entity as News;
pub use super::notification::Entity as Notification;
pub use super::order::Entity as Order;
pub use super::order_item::Entity as OrderItem;
pub use super::product::Entity as Product;
pub use super::translation::Entity as Translation;
pub use super::user::Entity as User;
pub use super::voucher::Entity as Voucher;
pub use super::voucher_usage::Entity as VoucherUsage;
