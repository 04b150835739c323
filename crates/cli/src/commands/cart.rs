//! One-shot catalog and cart commands.
//!
//! Each command performs one gesture against a freshly restored storefront,
//! prints the outcome and exits. The cart is written through on every change,
//! so the next invocation picks up where this one left off.

use std::io::Write;

use shopfront_core::ProductId;
use shopfront_storefront::error::Result;
use shopfront_storefront::{CartSummary, Destination, KeyValueStore, Storefront, views};

/// Print the catalog.
///
/// # Errors
///
/// Returns an error if rendering or writing fails.
pub fn catalog<S: KeyValueStore, W: Write>(shop: &Storefront<S>, out: &mut W) -> Result<()> {
    write_view(shop, out)
}

/// Print one product's detail view.
///
/// # Errors
///
/// Returns an error if the product does not exist.
pub fn show<S: KeyValueStore, W: Write>(
    shop: &mut Storefront<S>,
    id: ProductId,
    out: &mut W,
) -> Result<()> {
    shop.go_to(Destination::ProductDetail(id))?;
    write_view(shop, out)
}

/// Add units of a product.
///
/// # Errors
///
/// Returns an error if the product does not exist or the quantity is outside 1-99.
pub fn add<S: KeyValueStore, W: Write>(
    shop: &mut Storefront<S>,
    id: ProductId,
    quantity: i64,
    out: &mut W,
) -> Result<()> {
    let summary = shop.add_item(id, quantity)?;
    let name = shop
        .cart()
        .line(id)
        .map_or_else(|| id.to_string(), |line| line.display_name.clone());
    writeln!(out, "{quantity} x {name} added to cart!")?;
    write_summary(shop, &summary, out)
}

/// Set a line's quantity.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn set_quantity<S: KeyValueStore, W: Write>(
    shop: &mut Storefront<S>,
    id: ProductId,
    quantity: i64,
    out: &mut W,
) -> Result<()> {
    let summary = shop.set_quantity(id, quantity);
    write_summary(shop, &summary, out)
}

/// Add one unit to a line.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn increase<S: KeyValueStore, W: Write>(
    shop: &mut Storefront<S>,
    id: ProductId,
    out: &mut W,
) -> Result<()> {
    let summary = shop.increase_quantity(id);
    write_summary(shop, &summary, out)
}

/// Take one unit off a line.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn decrease<S: KeyValueStore, W: Write>(
    shop: &mut Storefront<S>,
    id: ProductId,
    out: &mut W,
) -> Result<()> {
    let summary = shop.decrease_quantity(id);
    write_summary(shop, &summary, out)
}

/// Remove a line.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn remove<S: KeyValueStore, W: Write>(
    shop: &mut Storefront<S>,
    id: ProductId,
    out: &mut W,
) -> Result<()> {
    let summary = shop.remove_item(id);
    write_summary(shop, &summary, out)
}

/// Print the cart view.
///
/// # Errors
///
/// Returns an error if rendering or writing fails.
pub fn show_cart<S: KeyValueStore, W: Write>(shop: &mut Storefront<S>, out: &mut W) -> Result<()> {
    shop.go_to(Destination::Cart)?;
    write_view(shop, out)
}

/// Check out and print the confirmation.
///
/// # Errors
///
/// Returns [`shopfront_storefront::CheckoutError::EmptyCart`] when there is
/// nothing to buy.
pub fn checkout<S: KeyValueStore, W: Write>(shop: &mut Storefront<S>, out: &mut W) -> Result<()> {
    shop.go_to(Destination::Cart)?;
    let confirmation = shop.checkout()?;
    writeln!(out, "{}", confirmation.message(shop.price_format()))?;
    if !confirmation.persisted {
        write_not_saved(out)?;
    }
    Ok(())
}

/// Render the visible view.
pub(crate) fn write_view<S: KeyValueStore, W: Write>(
    shop: &Storefront<S>,
    out: &mut W,
) -> Result<()> {
    let text = views::render(shop)?;
    writeln!(out, "{text}")?;
    Ok(())
}

/// One-line cart status after a mutation.
pub(crate) fn write_summary<S: KeyValueStore, W: Write>(
    shop: &Storefront<S>,
    summary: &CartSummary,
    out: &mut W,
) -> Result<()> {
    writeln!(
        out,
        "Cart ({}) - {}",
        summary.item_count,
        shop.price_format().format(summary.total)
    )?;
    if !summary.persisted {
        write_not_saved(out)?;
    }
    Ok(())
}

/// Warn that the last change only lives in memory.
pub(crate) fn write_not_saved<W: Write>(out: &mut W) -> Result<()> {
    writeln!(
        out,
        "Note: the cart could not be saved and will be lost when you exit."
    )?;
    Ok(())
}
