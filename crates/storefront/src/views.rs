//! Text views.
//!
//! Turns storefront state into display text with Askama templates. Amounts
//! are formatted here and nowhere else, so stored state stays exact.

use askama::Template;
use shopfront_core::{CartLine, PriceFormat, Product, ProductId, Quantity};

use crate::navigation::View;
use crate::state::Storefront;
use crate::storage::KeyValueStore;

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: ProductId,
    pub name: String,
    pub image: String,
    pub price: String,
    pub list_price: String,
    pub discount_percent: u32,
    pub is_discounted: bool,
}

impl ProductCardView {
    fn new(product: &Product, format: &PriceFormat) -> Self {
        Self {
            id: product.id,
            name: product.name.clone(),
            image: product.image_ref.clone(),
            price: format.format(product.sale_price),
            list_price: format.format(product.list_price),
            discount_percent: product.discount_percentage(),
            is_discounted: product.is_discounted(),
        }
    }
}

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub id: ProductId,
    pub title: String,
    pub image: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

impl CartItemView {
    fn new(line: &CartLine, format: &PriceFormat) -> Self {
        Self {
            id: line.product_id,
            title: line.display_name.clone(),
            image: line.image_ref.clone(),
            quantity: line.quantity.get(),
            price: format.format(line.unit_price),
            line_price: format.format(line.subtotal()),
        }
    }
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
    pub checkout_enabled: bool,
}

/// Catalog page template.
#[derive(Template)]
#[template(path = "catalog.txt")]
pub struct CatalogTemplate {
    pub cart_count: u32,
    pub products: Vec<ProductCardView>,
}

/// Product detail page template.
#[derive(Template)]
#[template(path = "product_detail.txt")]
pub struct ProductDetailTemplate {
    pub cart_count: u32,
    pub product: ProductCardView,
    pub description: String,
    pub quantity: Quantity,
}

/// Cart page template.
#[derive(Template)]
#[template(path = "cart.txt")]
pub struct CartTemplate {
    pub cart: CartView,
}

/// Build the cart display data.
pub fn cart_view<S: KeyValueStore>(shop: &Storefront<S>) -> CartView {
    let format = shop.price_format();
    let cart = shop.cart();
    CartView {
        items: cart
            .lines()
            .iter()
            .map(|line| CartItemView::new(line, format))
            .collect(),
        subtotal: format.format(cart.total_price()),
        item_count: cart.total_item_count(),
        checkout_enabled: !cart.is_empty(),
    }
}

/// Render whichever view is visible.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render<S: KeyValueStore>(shop: &Storefront<S>) -> askama::Result<String> {
    let format = shop.price_format();
    let cart_count = shop.cart().total_item_count();

    match shop.view() {
        View::Catalog => CatalogTemplate {
            cart_count,
            products: shop
                .catalog()
                .products()
                .iter()
                .map(|p| ProductCardView::new(p, format))
                .collect(),
        }
        .render(),
        View::ProductDetail {
            product_id,
            quantity,
        } => match shop.catalog().get(product_id) {
            Some(product) => ProductDetailTemplate {
                cart_count,
                product: ProductCardView::new(product, format),
                description: product.description.clone(),
                quantity,
            }
            .render(),
            // The navigator only enters detail for catalog products.
            None => Err(askama::Error::Custom(
                format!("product {product_id} missing from catalog").into(),
            )),
        },
        View::Cart => CartTemplate {
            cart: cart_view(shop),
        }
        .render(),
    }
}
