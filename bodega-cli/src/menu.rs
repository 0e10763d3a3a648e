use std::io::{self, BufRead, Write};

use bodega_store::{OrderLine, Store};

/// Top-level menu actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    ListProducts,
    TotalQuantity,
    MakeOrder,
    Quit,
}

pub fn parse_choice(input: &str) -> Option<MenuChoice> {
    match input.trim() {
        "1" => Some(MenuChoice::ListProducts),
        "2" => Some(MenuChoice::TotalQuantity),
        "3" => Some(MenuChoice::MakeOrder),
        "4" => Some(MenuChoice::Quit),
        _ => None,
    }
}

/// Drive the interactive menu until the user quits or input ends.
///
/// Reads from `input` and writes to `out` so tests can script a session.
pub fn run<R: BufRead, W: Write>(store: &mut Store, input: &mut R, out: &mut W) -> io::Result<()> {
    loop {
        write_menu(out)?;
        let Some(line) = read_line(input)? else {
            // EOF counts as quitting
            break;
        };
        match parse_choice(&line) {
            Some(MenuChoice::ListProducts) => list_products(store, out)?,
            Some(MenuChoice::TotalQuantity) => writeln!(
                out,
                "\nTotal quantity of all products in the store: {}",
                store.get_total_quantity()
            )?,
            Some(MenuChoice::MakeOrder) => make_order(store, input, out)?,
            Some(MenuChoice::Quit) => {
                writeln!(out, "Thank you for using the store. Goodbye!")?;
                break;
            }
            None => writeln!(out, "Invalid choice. Please try again.")?,
        }
    }
    Ok(())
}

fn write_menu(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\n===== Store Menu =====")?;
    writeln!(out, "1. List all products in store")?;
    writeln!(out, "2. Show total amount in store")?;
    writeln!(out, "3. Make an order")?;
    writeln!(out, "4. Quit")?;
    write!(out, "\nEnter your choice: ")?;
    out.flush()
}

fn list_products(store: &Store, out: &mut impl Write) -> io::Result<()> {
    let products = store.get_all_products();
    if products.is_empty() {
        return writeln!(out, "No products available in the store.");
    }
    writeln!(out, "\nAvailable Products:")?;
    for (i, product) in products.iter().enumerate() {
        writeln!(out, "{}. {}", i + 1, product)?;
    }
    Ok(())
}

/// Collect (product, quantity) lines interactively, then submit them as one
/// order. Menu numbers index into the active-product listing, so the ids are
/// snapshotted up front to keep them stable across prompts.
fn make_order<R: BufRead, W: Write>(
    store: &mut Store,
    input: &mut R,
    out: &mut W,
) -> io::Result<()> {
    list_products(store, out)?;
    let listed: Vec<_> = store
        .get_all_products()
        .iter()
        .map(|p| (p.id(), p.name().to_string()))
        .collect();
    if listed.is_empty() {
        return writeln!(out, "No products available for ordering.");
    }

    let mut lines = Vec::new();
    loop {
        write!(out, "\nEnter the product number to order (or 0 to finish): ")?;
        out.flush()?;
        let Some(raw) = read_line(input)? else { break };
        let Ok(number) = raw.trim().parse::<usize>() else {
            writeln!(out, "Invalid input. Please enter a valid number.")?;
            continue;
        };
        if number == 0 {
            break;
        }
        let Some((product_id, name)) = listed.get(number - 1) else {
            writeln!(out, "Invalid product number. Please try again.")?;
            continue;
        };

        write!(out, "Enter quantity for {}: ", name)?;
        out.flush()?;
        let Some(raw_quantity) = read_line(input)? else {
            break;
        };
        let Ok(quantity) = raw_quantity.trim().parse::<i32>() else {
            writeln!(out, "Invalid input. Please enter a valid number.")?;
            continue;
        };
        if quantity <= 0 {
            writeln!(out, "Quantity must be greater than 0. Please try again.")?;
            continue;
        }

        lines.push(OrderLine::new(*product_id, quantity));
    }

    if lines.is_empty() {
        return Ok(());
    }

    match store.order(&lines) {
        Ok(total) => {
            tracing::info!(total, lines = lines.len(), "order placed");
            writeln!(out, "\nOrder placed successfully! Total cost: ${:.2}", total)
        }
        Err(err) => {
            tracing::warn!(%err, "order rejected");
            writeln!(out, "Order could not be completed: {}", err)
        }
    }
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bodega_catalog::Product;
    use std::io::Cursor;

    fn pixel_store(quantity: i32) -> Store {
        let pixel = Product::new("Google Pixel 7", 500.0, quantity).unwrap();
        Store::new(vec![pixel])
    }

    fn run_session(store: &mut Store, script: &str) -> String {
        let mut input = Cursor::new(script.to_string());
        let mut out = Vec::new();
        run(store, &mut input, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("1"), Some(MenuChoice::ListProducts));
        assert_eq!(parse_choice(" 2 "), Some(MenuChoice::TotalQuantity));
        assert_eq!(parse_choice("3"), Some(MenuChoice::MakeOrder));
        assert_eq!(parse_choice("4"), Some(MenuChoice::Quit));
        assert_eq!(parse_choice("5"), None);
        assert_eq!(parse_choice("quit"), None);
        assert_eq!(parse_choice(""), None);
    }

    #[test]
    fn test_quit_immediately() {
        let mut store = pixel_store(10);
        let output = run_session(&mut store, "4\n");
        assert!(output.contains("===== Store Menu ====="));
        assert!(output.contains("Thank you for using the store. Goodbye!"));
    }

    #[test]
    fn test_eof_ends_loop() {
        let mut store = pixel_store(10);
        let output = run_session(&mut store, "");
        assert!(output.contains("===== Store Menu ====="));
    }

    #[test]
    fn test_unknown_choice_reprompts() {
        let mut store = pixel_store(10);
        let output = run_session(&mut store, "9\n4\n");
        assert!(output.contains("Invalid choice. Please try again."));
    }

    #[test]
    fn test_list_products_shows_active_only() {
        let sold_out = Product::new("MacBook Air M2", 1450.0, 0).unwrap();
        let pixel = Product::new("Google Pixel 7", 500.0, 10).unwrap();
        let mut store = Store::new(vec![sold_out, pixel]);

        let output = run_session(&mut store, "1\n4\n");
        assert!(output.contains("1. Google Pixel 7, Price: $500.00, Quantity: 10"));
        assert!(!output.contains("MacBook Air M2"));
    }

    #[test]
    fn test_total_quantity_choice() {
        let mut store = pixel_store(10);
        let output = run_session(&mut store, "2\n4\n");
        assert!(output.contains("Total quantity of all products in the store: 10"));
    }

    #[test]
    fn test_order_flow() {
        let mut store = pixel_store(10);
        let output = run_session(&mut store, "3\n1\n2\n0\n4\n");
        assert!(output.contains("Enter quantity for Google Pixel 7:"));
        assert!(output.contains("Order placed successfully! Total cost: $1000.00"));
        assert_eq!(store.products()[0].quantity(), 8);
    }

    #[test]
    fn test_order_recovers_from_bad_input() {
        let mut store = pixel_store(10);
        let output = run_session(&mut store, "3\nabc\n9\n1\n-2\n1\n2\n0\n4\n");
        assert!(output.contains("Invalid input. Please enter a valid number."));
        assert!(output.contains("Invalid product number. Please try again."));
        assert!(output.contains("Quantity must be greater than 0. Please try again."));
        assert!(output.contains("Order placed successfully! Total cost: $1000.00"));
        assert_eq!(store.products()[0].quantity(), 8);
    }

    #[test]
    fn test_failed_order_is_reported() {
        let mut store = pixel_store(1);
        let output = run_session(&mut store, "3\n1\n5\n0\n4\n");
        assert!(output.contains("Order could not be completed:"));
        assert!(output.contains("Not enough stock"));
        assert_eq!(store.products()[0].quantity(), 1);
    }

    #[test]
    fn test_empty_order_is_not_submitted() {
        let mut store = pixel_store(10);
        let output = run_session(&mut store, "3\n0\n4\n");
        assert!(!output.contains("Order placed successfully!"));
        assert_eq!(store.products()[0].quantity(), 10);
    }
}
