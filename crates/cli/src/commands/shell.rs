//! Interactive session.
//!
//! Reads one gesture per line, applies it, then re-renders whichever view is
//! visible. Type `help` for the list of gestures.

use std::io::{BufRead, Write};

use clap::{Parser, Subcommand};
use shopfront_core::ProductId;
use shopfront_storefront::error::Result;
use shopfront_storefront::{AppError, Destination, KeyValueStore, Storefront};

use super::cart::{write_not_saved, write_summary, write_view};

#[derive(Parser)]
#[command(no_binary_name = true, name = "shopfront")]
struct ShellLine {
    #[command(subcommand)]
    gesture: Gesture,
}

#[derive(Subcommand)]
enum Gesture {
    /// Go to the catalog
    #[command(visible_alias = "catalog")]
    Home,
    /// Open a product from the catalog
    Open {
        /// Product ID
        id: ProductId,
    },
    /// Raise the selected quantity on the product view
    #[command(visible_alias = "+")]
    More,
    /// Lower the selected quantity on the product view
    Less,
    /// Add the selected quantity to the cart (product view)
    Add,
    /// Go to the cart
    Cart,
    /// Add one unit to a cart line
    Inc {
        /// Product ID
        id: ProductId,
    },
    /// Remove one unit from a cart line
    Dec {
        /// Product ID
        id: ProductId,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        id: ProductId,
    },
    /// Place the order
    Checkout,
    /// End the session
    #[command(visible_alias = "exit")]
    Quit,
}

/// Run the session until `quit` or end of input.
///
/// # Errors
///
/// Returns an error only if rendering or writing output fails; rejected
/// gestures are shown to the shopper and the session continues.
pub fn run<S: KeyValueStore, R: BufRead, W: Write>(
    shop: &mut Storefront<S>,
    input: R,
    out: &mut W,
) -> Result<()> {
    write_view(shop, out)?;
    prompt(out)?;

    for line in input.lines() {
        let line = line?;
        let words: Vec<&str> = line.split_whitespace().collect();
        if words.is_empty() {
            prompt(out)?;
            continue;
        }

        let gesture = match ShellLine::try_parse_from(words) {
            Ok(parsed) => parsed.gesture,
            Err(e) => {
                write!(out, "{}", e.render())?;
                prompt(out)?;
                continue;
            }
        };

        if matches!(gesture, Gesture::Quit) {
            break;
        }

        match apply(shop, gesture, out) {
            Ok(()) => {}
            Err(e) if e.is_internal() => return Err(e),
            Err(e) => {
                e.report();
                writeln!(out, "{}", e.user_message())?;
            }
        }

        write_view(shop, out)?;
        prompt(out)?;
    }

    tracing::debug!("Shell session ended");
    Ok(())
}

fn apply<S: KeyValueStore, W: Write>(
    shop: &mut Storefront<S>,
    gesture: Gesture,
    out: &mut W,
) -> Result<()> {
    match gesture {
        Gesture::Home => {
            shop.go_to(Destination::Catalog)?;
        }
        Gesture::Open { id } => {
            shop.go_to(Destination::ProductDetail(id))?;
        }
        Gesture::More => {
            shop.step_up()?;
        }
        Gesture::Less => {
            shop.step_down()?;
        }
        Gesture::Add => {
            let summary = shop.add_selected_to_cart()?;
            write_summary(shop, &summary, out)?;
        }
        Gesture::Cart => {
            shop.go_to(Destination::Cart)?;
        }
        Gesture::Inc { id } => {
            let summary = shop.increase_quantity(id);
            write_summary(shop, &summary, out)?;
        }
        Gesture::Dec { id } => {
            let summary = shop.decrease_quantity(id);
            write_summary(shop, &summary, out)?;
        }
        Gesture::Remove { id } => {
            let summary = shop.remove_item(id);
            write_summary(shop, &summary, out)?;
        }
        Gesture::Checkout => {
            let confirmation = shop.checkout()?;
            writeln!(out, "{}", confirmation.message(shop.price_format()))?;
            if !confirmation.persisted {
                write_not_saved(out)?;
            }
        }
        Gesture::Quit => {}
    }
    Ok(())
}

fn prompt<W: Write>(out: &mut W) -> std::result::Result<(), AppError> {
    write!(out, "> ")?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Cursor;

    use shopfront_core::PriceFormat;
    use shopfront_storefront::{CartStorage, Catalog, MemoryStore, View};

    use super::*;

    fn session(script: &str) -> (Storefront<MemoryStore>, String) {
        session_with(MemoryStore::new(), script)
    }

    fn session_with(store: MemoryStore, script: &str) -> (Storefront<MemoryStore>, String) {
        let mut shop = Storefront::new(
            Catalog::builtin(),
            CartStorage::new(store),
            PriceFormat::new("₹"),
        );
        let mut buf = Vec::new();
        run(&mut shop, Cursor::new(script.to_string()), &mut buf).unwrap();
        (shop, String::from_utf8(buf).unwrap())
    }

    #[test]
    fn test_browse_add_and_checkout() {
        let (shop, text) = session("open 1\n+\n+\nadd\ncart\ncheckout\n");
        assert!(text.contains("Cart (3)"));
        assert!(text.contains("Your total amount of ₹7797.00"));
        assert!(shop.cart().is_empty());
        assert_eq!(shop.view(), View::Catalog);
    }

    #[test]
    fn test_checkout_warns_when_not_saved() {
        let (shop, text) = session_with(MemoryStore::unavailable(), "open 1\nadd\ncheckout\n");
        let after_checkout = text.split("Order Confirmed!").nth(1).unwrap();
        assert!(after_checkout.contains("could not be saved"));
        assert!(shop.cart().is_empty());
    }

    #[test]
    fn test_cart_buttons() {
        let (shop, _) = session("open 2\nadd\ncart\ninc 2\ninc 2\ndec 2\n");
        assert_eq!(shop.cart().total_item_count(), 2);
        assert_eq!(shop.view(), View::Cart);
    }

    #[test]
    fn test_rejected_gestures_keep_session_alive() {
        let (shop, text) = session("checkout\nopen 42\ncart\nopen 1\nbogus\nadd\n");
        assert!(text.contains("Your cart is empty. Please add items before checking out."));
        assert!(text.contains("That product is not available."));
        assert!(text.contains("Cannot open product detail from cart"));
        assert!(text.contains("Not viewing a product"));
        assert!(shop.cart().is_empty());
    }

    #[test]
    fn test_quit_stops_reading() {
        let (shop, _) = session("open 3\nadd\nquit\nopen 4\nadd\n");
        assert_eq!(shop.cart().total_item_count(), 1);
        assert!(shop.cart().line(ProductId::new(4)).is_none());
    }
}
