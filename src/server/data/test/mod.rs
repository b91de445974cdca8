mod advertisement;
mod category;
mod notification;
mod product;
mod translation;
mod user;
