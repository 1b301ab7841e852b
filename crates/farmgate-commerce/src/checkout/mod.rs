//! Checkout: splitting a cart into one order per seller.

mod order;
mod shipping;
mod split;

pub use order::{Order, OrderDetail, OrderItem, OrderLine, OrderStatus};
pub use shipping::ShippingInfo;
pub use split::{
    flat_shipping_fee, split_by_seller, LineItem, PlacedOrder, PricedProduct, SellerGroup,
    FLAT_SHIPPING_FEE_MINOR,
};
