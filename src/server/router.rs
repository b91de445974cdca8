use axum::{
    routing::{delete, get, post, put},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{
        activity, advertisement, auth, brand, category, dashboard, debt, delivery, homepage,
        inventory, invoice, news, notification, order, product, translation, user, voucher,
    },
    middleware::rate_limit::{auth_rate_limiter, public_rate_limiter},
    state::AppState,
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Back Office API", description = "Storefront and back office REST API"),
    paths(
        auth::register,
        auth::login,
        auth::logout,
        auth::me,
        auth::update_profile,
        auth::change_password,
        user::list_users,
        user::get_user,
        user::set_admin,
        user::set_active,
        brand::list_brands,
        brand::get_brand,
        brand::create_brand,
        brand::update_brand,
        brand::delete_brand,
        category::list_categories,
        category::get_category,
        category::create_category,
        category::update_category,
        category::delete_category,
        product::list_products,
        product::get_product,
        product::get_product_by_slug,
        product::admin_list_products,
        product::admin_get_product,
        product::create_product,
        product::update_product,
        product::delete_product,
        inventory::create_movement,
        inventory::list_movements,
        inventory::low_stock,
        order::place_order,
        order::list_my_orders,
        order::get_my_order,
        order::cancel_my_order,
        order::admin_list_orders,
        order::admin_get_order,
        order::update_order_status,
        order::update_payment_status,
        delivery::create_delivery,
        delivery::add_delivery_event,
        delivery::list_deliveries,
        delivery::get_delivery,
        delivery::track_order,
        invoice::create_invoice,
        invoice::list_invoices,
        invoice::get_invoice,
        invoice::update_invoice_status,
        invoice::list_my_invoices,
        invoice::get_my_invoice,
        debt::create_debt,
        debt::record_payment,
        debt::cancel_debt,
        debt::list_debts,
        debt::get_debt,
        debt::debt_summary,
        debt::list_my_debts,
        voucher::list_available_vouchers,
        voucher::validate_voucher,
        voucher::list_vouchers,
        voucher::get_voucher,
        voucher::create_voucher,
        voucher::update_voucher,
        voucher::delete_voucher,
        notification::list_notifications,
        notification::unread_count,
        notification::mark_read,
        notification::mark_all_read,
        notification::delete_notification,
        notification::send_notification,
        translation::list_locales,
        translation::get_bundle,
        translation::list_translations,
        translation::upsert_translation,
        translation::bulk_upsert_translations,
        translation::delete_translation,
        homepage::get_homepage,
        homepage::get_homepage_config,
        homepage::update_homepage,
        dashboard::get_dashboard,
        news::list_news,
        news::get_news,
        news::admin_list_news,
        news::admin_get_news,
        news::create_news,
        news::update_news,
        news::publish_news,
        news::delete_news,
        activity::list_activities,
        activity::get_activity,
        activity::admin_list_activities,
        activity::admin_get_activity,
        activity::create_activity,
        activity::update_activity,
        activity::delete_activity,
        advertisement::list_running_ads,
        advertisement::click_ad,
        advertisement::admin_list_ads,
        advertisement::admin_get_ad,
        advertisement::create_ad,
        advertisement::update_ad,
        advertisement::delete_ad,
    ),
    tags(
        (name = "auth", description = "Registration, login and the current account"),
        (name = "user", description = "Customer and staff account administration"),
        (name = "brand", description = "Product brands"),
        (name = "category", description = "Product category tree"),
        (name = "product", description = "Catalog browsing and product management"),
        (name = "inventory", description = "Stock movements and low stock alerts"),
        (name = "order", description = "Checkout and order lifecycle"),
        (name = "delivery", description = "Shipments and tracking"),
        (name = "invoice", description = "Invoices for one or more orders"),
        (name = "debt", description = "Customer credit and repayments"),
        (name = "voucher", description = "Discount codes"),
        (name = "notification", description = "In-app notifications"),
        (name = "translation", description = "Localized UI strings"),
        (name = "homepage", description = "Storefront homepage"),
        (name = "dashboard", description = "Back office figures"),
        (name = "news", description = "News articles"),
        (name = "activity", description = "Promotional activities and events"),
        (name = "advertisement", description = "Ad placements"),
    )
)]
pub struct ApiDoc;

pub fn router() -> Router<AppState> {
    // Abuse-prone endpoints are limited per client address.
    let rate_limited_auth = Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .layer(auth_rate_limiter());

    let rate_limited_public = Router::new()
        .route("/api/vouchers/validate", post(voucher::validate_voucher))
        .route("/api/ads/{id}/click", post(advertisement::click_ad))
        .layer(public_rate_limiter());

    Router::new()
        .merge(rate_limited_auth)
        .merge(rate_limited_public)
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        // Auth
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me).put(auth::update_profile))
        .route("/api/auth/password", put(auth::change_password))
        // Users
        .route("/api/admin/users", get(user::list_users))
        .route("/api/admin/users/{id}", get(user::get_user))
        .route("/api/admin/users/{id}/admin", put(user::set_admin))
        .route("/api/admin/users/{id}/active", put(user::set_active))
        // Catalog
        .route("/api/brands", get(brand::list_brands))
        .route("/api/brands/{id}", get(brand::get_brand))
        .route("/api/admin/brands", post(brand::create_brand))
        .route(
            "/api/admin/brands/{id}",
            put(brand::update_brand).delete(brand::delete_brand),
        )
        .route("/api/categories", get(category::list_categories))
        .route("/api/categories/{id}", get(category::get_category))
        .route("/api/admin/categories", post(category::create_category))
        .route(
            "/api/admin/categories/{id}",
            put(category::update_category).delete(category::delete_category),
        )
        .route("/api/products", get(product::list_products))
        .route("/api/products/{id}", get(product::get_product))
        .route("/api/products/slug/{slug}", get(product::get_product_by_slug))
        .route(
            "/api/admin/products",
            get(product::admin_list_products).post(product::create_product),
        )
        .route(
            "/api/admin/products/{id}",
            get(product::admin_get_product)
                .put(product::update_product)
                .delete(product::delete_product),
        )
        // Inventory
        .route(
            "/api/admin/inventory/movements",
            get(inventory::list_movements).post(inventory::create_movement),
        )
        .route("/api/admin/inventory/low-stock", get(inventory::low_stock))
        // Orders and fulfilment
        .route(
            "/api/orders",
            get(order::list_my_orders).post(order::place_order),
        )
        .route("/api/orders/{id}", get(order::get_my_order))
        .route("/api/orders/{id}/cancel", post(order::cancel_my_order))
        .route("/api/orders/{id}/tracking", get(delivery::track_order))
        .route("/api/admin/orders", get(order::admin_list_orders))
        .route("/api/admin/orders/{id}", get(order::admin_get_order))
        .route(
            "/api/admin/orders/{id}/status",
            put(order::update_order_status),
        )
        .route(
            "/api/admin/orders/{id}/payment",
            put(order::update_payment_status),
        )
        .route(
            "/api/admin/orders/{id}/delivery",
            post(delivery::create_delivery),
        )
        .route("/api/admin/deliveries", get(delivery::list_deliveries))
        .route("/api/admin/deliveries/{id}", get(delivery::get_delivery))
        .route(
            "/api/admin/deliveries/{id}/events",
            post(delivery::add_delivery_event),
        )
        // Billing
        .route(
            "/api/admin/invoices",
            get(invoice::list_invoices).post(invoice::create_invoice),
        )
        .route("/api/admin/invoices/{id}", get(invoice::get_invoice))
        .route(
            "/api/admin/invoices/{id}/status",
            put(invoice::update_invoice_status),
        )
        .route("/api/invoices", get(invoice::list_my_invoices))
        .route("/api/invoices/{id}", get(invoice::get_my_invoice))
        .route(
            "/api/admin/debts",
            get(debt::list_debts).post(debt::create_debt),
        )
        .route("/api/admin/debts/summary", get(debt::debt_summary))
        .route("/api/admin/debts/{id}", get(debt::get_debt))
        .route("/api/admin/debts/{id}/payments", post(debt::record_payment))
        .route("/api/admin/debts/{id}/cancel", post(debt::cancel_debt))
        .route("/api/debts", get(debt::list_my_debts))
        // Vouchers
        .route(
            "/api/vouchers/available",
            get(voucher::list_available_vouchers),
        )
        .route(
            "/api/admin/vouchers",
            get(voucher::list_vouchers).post(voucher::create_voucher),
        )
        .route(
            "/api/admin/vouchers/{id}",
            get(voucher::get_voucher)
                .put(voucher::update_voucher)
                .delete(voucher::delete_voucher),
        )
        // Notifications
        .route(
            "/api/notifications",
            get(notification::list_notifications),
        )
        .route(
            "/api/notifications/unread-count",
            get(notification::unread_count),
        )
        .route(
            "/api/notifications/read-all",
            put(notification::mark_all_read),
        )
        .route(
            "/api/notifications/{id}",
            delete(notification::delete_notification),
        )
        .route("/api/notifications/{id}/read", put(notification::mark_read))
        .route(
            "/api/admin/notifications",
            post(notification::send_notification),
        )
        // Content
        .route("/api/translations/locales", get(translation::list_locales))
        .route("/api/translations/{locale}", get(translation::get_bundle))
        .route(
            "/api/admin/translations",
            get(translation::list_translations).put(translation::upsert_translation),
        )
        .route(
            "/api/admin/translations/bulk",
            post(translation::bulk_upsert_translations),
        )
        .route(
            "/api/admin/translations/{id}",
            delete(translation::delete_translation),
        )
        .route("/api/homepage", get(homepage::get_homepage))
        .route(
            "/api/admin/homepage",
            get(homepage::get_homepage_config).put(homepage::update_homepage),
        )
        .route("/api/admin/dashboard", get(dashboard::get_dashboard))
        .route("/api/news", get(news::list_news))
        .route("/api/news/{slug}", get(news::get_news))
        .route(
            "/api/admin/news",
            get(news::admin_list_news).post(news::create_news),
        )
        .route(
            "/api/admin/news/{id}",
            get(news::admin_get_news)
                .put(news::update_news)
                .delete(news::delete_news),
        )
        .route("/api/admin/news/{id}/publish", put(news::publish_news))
        .route("/api/activities", get(activity::list_activities))
        .route("/api/activities/{id}", get(activity::get_activity))
        .route(
            "/api/admin/activities",
            get(activity::admin_list_activities).post(activity::create_activity),
        )
        .route(
            "/api/admin/activities/{id}",
            get(activity::admin_get_activity)
                .put(activity::update_activity)
                .delete(activity::delete_activity),
        )
        .route("/api/ads", get(advertisement::list_running_ads))
        .route(
            "/api/admin/ads",
            get(advertisement::admin_list_ads).post(advertisement::create_ad),
        )
        .route(
            "/api/admin/ads/{id}",
            get(advertisement::admin_get_ad)
                .put(advertisement::update_ad)
                .delete(advertisement::delete_ad),
        )
}
