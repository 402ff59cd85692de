use crate::application::admin::AdminSession;
use crate::application::catalog::CatalogService;
use crate::application::checkout::{CheckoutEngine, PaymentChoice, PaymentProgress};
use crate::domain::customer::Customer;
use crate::domain::instrument::PaymentInstrument;
use crate::domain::money::Amount;
use crate::domain::product::{Product, ProductKind};
use crate::error::{Result, ShopError};
use rust_decimal::Decimal;
use std::io::{self, BufRead, Write};
use std::str::FromStr;

/// Line-oriented terminal wrapper, generic so sessions can be scripted.
pub struct Shell<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn line(&mut self, text: impl AsRef<str>) -> Result<()> {
        writeln!(self.output, "{}", text.as_ref())?;
        Ok(())
    }

    /// Reads one trimmed line; `None` when input is exhausted.
    pub fn read_line(&mut self) -> Result<Option<String>> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            Ok(None)
        } else {
            Ok(Some(buf.trim().to_string()))
        }
    }

    pub fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        self.read_line()
    }

    /// A prompt that must be answered; EOF mid-dialog is an error.
    pub fn prompt_required(&mut self, message: &str) -> Result<String> {
        self.prompt(message)?.ok_or_else(|| {
            ShopError::Io(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"))
        })
    }
}

fn parse_number<T: FromStr>(raw: &str) -> Result<T> {
    raw.parse()
        .map_err(|_| ShopError::Validation("please enter a number".to_string()))
}

/// Everything the menu loop operates on.
pub struct App {
    pub catalog: CatalogService,
    pub engine: CheckoutEngine,
    pub admin: AdminSession,
    pub customer: Customer,
}

/// Runs the interactive session until the customer exits or input ends.
///
/// Every recoverable error is reported and control returns to the menu.
pub async fn run<R: BufRead, W: Write>(shell: &mut Shell<R, W>, app: &mut App) -> Result<()> {
    loop {
        shell.line("")?;
        shell.line("Menu:")?;
        shell.line("1. View Products")?;
        shell.line("2. Add to Cart")?;
        shell.line("3. Remove from Cart")?;
        shell.line("4. View Cart")?;
        shell.line("5. Checkout")?;
        shell.line("6. Admin Login")?;
        shell.line("7. Add Product (Admin Only)")?;
        shell.line("8. Admin Logout")?;
        shell.line("9. Order History")?;
        shell.line("10. Manage Payment Instruments")?;
        shell.line("11. Exit")?;
        let Some(raw) = shell.prompt("Choose an option: ")? else {
            break;
        };

        match dispatch(shell, app, &raw).await {
            Ok(true) => break,
            Ok(false) => {}
            Err(err) => shell.line(format!("Error: {err}"))?,
        }
    }
    Ok(())
}

/// Returns `Ok(true)` when the session should end.
async fn dispatch<R: BufRead, W: Write>(
    shell: &mut Shell<R, W>,
    app: &mut App,
    raw: &str,
) -> Result<bool> {
    match parse_number::<u32>(raw)? {
        1 => view_products(shell, app).await?,
        2 => add_to_cart(shell, app).await?,
        3 => remove_from_cart(shell, app)?,
        4 => view_cart(shell, app).await?,
        5 => checkout(shell, app).await?,
        6 => admin_login(shell, app)?,
        7 => add_product(shell, app).await?,
        8 => admin_logout(shell, app)?,
        9 => order_history(shell, app).await?,
        10 => manage_instruments(shell, app)?,
        11 => return Ok(true),
        _ => shell.line("Invalid choice.")?,
    }
    Ok(false)
}

fn render_product(product: &Product) -> String {
    let sold_out = if product.is_available() {
        ""
    } else {
        " [SOLD OUT]"
    };
    match product.kind() {
        ProductKind::Electronics { brand } => format!(
            "ID: {} | Electronics: {} (Brand: {}) - ${:.2} | Stock: {}{}",
            product.id(),
            product.name(),
            brand,
            product.unit_price(),
            product.stock(),
            sold_out
        ),
        ProductKind::Clothing { size } => format!(
            "ID: {} | Clothing: {} (Size: {}) - ${:.2} | Stock: {}{}",
            product.id(),
            product.name(),
            size,
            product.unit_price(),
            product.stock(),
            sold_out
        ),
    }
}

fn list_instruments<R: BufRead, W: Write>(
    shell: &mut Shell<R, W>,
    instruments: &[PaymentInstrument],
) -> Result<()> {
    if instruments.is_empty() {
        return shell.line("No payment instruments registered.");
    }
    shell.line("Registered Payment Instruments:")?;
    for (i, instrument) in instruments.iter().enumerate() {
        shell.line(format!(
            "{}. {} | Balance: ${:.2}",
            i + 1,
            instrument.describe(),
            instrument.balance().0
        ))?;
    }
    Ok(())
}

async fn view_products<R: BufRead, W: Write>(
    shell: &mut Shell<R, W>,
    app: &App,
) -> Result<()> {
    shell.line("Available Products:")?;
    for product in app.catalog.products().await? {
        shell.line(render_product(&product))?;
    }
    Ok(())
}

async fn add_to_cart<R: BufRead, W: Write>(shell: &mut Shell<R, W>, app: &mut App) -> Result<()> {
    let id = shell.prompt_required("Enter Product ID to add: ")?;
    let product = app.catalog.product(&id).await?;
    let qty: u32 = parse_number(&shell.prompt_required("Enter quantity: ")?)?;
    app.customer.cart.add_line(&product, qty)?;
    shell.line("Added to cart.")
}

fn remove_from_cart<R: BufRead, W: Write>(shell: &mut Shell<R, W>, app: &mut App) -> Result<()> {
    let id = shell.prompt_required("Enter Product ID to remove from cart: ")?;
    app.customer.cart.remove_line(&id);
    shell.line("Removed from cart.")
}

async fn view_cart<R: BufRead, W: Write>(shell: &mut Shell<R, W>, app: &App) -> Result<()> {
    if app.customer.cart.is_empty() {
        return shell.line("Cart is empty.");
    }
    shell.line("Your Cart:")?;
    for line in app.customer.cart.lines() {
        let product = app.catalog.product(&line.product_id).await?;
        shell.line(format!(
            "{} x{} (${:.2} each)",
            product.name(),
            line.quantity,
            product.unit_price()
        ))?;
    }
    Ok(())
}

async fn checkout<R: BufRead, W: Write>(shell: &mut Shell<R, W>, app: &mut App) -> Result<()> {
    let mut session = app.engine.begin(&mut app.customer).await?;

    let quote = session.quote();
    shell.line(format!("Subtotal: ${:.2}", quote.subtotal))?;
    if quote.discount > Decimal::ZERO {
        shell.line(format!("Discount: -${:.2}", quote.discount))?;
    }
    shell.line(format!("Total after discount: ${:.2}", quote.total))?;

    shell.line("")?;
    shell.line("Available Payment Instruments:")?;
    list_instruments(shell, session.instruments())?;

    loop {
        let index: usize = parse_number(&shell.prompt_required(
            "Select payment instrument (index) or 0 to cancel: ",
        )?)?;
        if index == 0 {
            session.apply(PaymentChoice::Cancel)?;
            continue; // cancel always errors out of the checkout
        }

        let descriptor = match session.instruments().get(index - 1) {
            Some(instrument) => {
                shell.line(format!(
                    "Selected {} (Balance: ${:.2})",
                    instrument.describe(),
                    instrument.balance().0
                ))?;
                Some(instrument.describe())
            }
            None => None,
        };
        let amount: Decimal = parse_number(&shell.prompt_required(&format!(
            "Enter amount to pay (max ${:.2}): ",
            session.remaining()
        ))?)?;

        match session.apply(PaymentChoice::Pay {
            instrument: index,
            amount,
        }) {
            Ok(progress) => {
                if let Some(descriptor) = &descriptor {
                    shell.line(format!("Paid ${amount:.2} using {descriptor}."))?;
                }
                match progress {
                    PaymentProgress::Settled => break,
                    PaymentProgress::Charged { remaining, .. } => {
                        shell.line(format!("Remaining balance to pay: ${remaining:.2}"))?;
                    }
                }
            }
            Err(err @ ShopError::InsufficientFunds { .. }) => {
                shell.line(format!("Payment failed: {err}"))?;
            }
            Err(err) => return Err(err),
        }
    }

    shell.line("")?;
    shell.line("Payment Instrument Balances After Checkout:")?;
    list_instruments(shell, session.instruments())?;

    let order = session.commit().await?;
    for line in &order.lines {
        let product = app.catalog.product(&line.product_id).await?;
        if !product.is_available() {
            shell.line(format!("{} is now SOLD OUT!", product.name()))?;
        }
    }
    shell.line(format!("Order placed! Thank you, {}.", app.customer.name()))
}

fn admin_login<R: BufRead, W: Write>(shell: &mut Shell<R, W>, app: &mut App) -> Result<()> {
    if app.admin.is_logged_in() {
        return shell.line("Already logged in as admin.");
    }
    let username = shell.prompt_required("Admin username: ")?;
    let password = shell.prompt_required("Admin password: ")?;
    if app.admin.login(&username, &password) {
        shell.line("Admin login successful.")
    } else {
        shell.line("Invalid admin credentials.")
    }
}

fn admin_logout<R: BufRead, W: Write>(shell: &mut Shell<R, W>, app: &mut App) -> Result<()> {
    if app.admin.is_logged_in() {
        app.admin.logout();
        shell.line("Admin logged out.")
    } else {
        shell.line("Not logged in as admin.")
    }
}

async fn add_product<R: BufRead, W: Write>(shell: &mut Shell<R, W>, app: &mut App) -> Result<()> {
    app.admin.require_admin()?;

    let category: u32 =
        parse_number(&shell.prompt_required("Enter type (1=Electronics, 2=Clothing): ")?)?;
    let id = shell.prompt_required("Enter Product ID: ")?;
    let name = shell.prompt_required("Enter Name: ")?;
    let price: Decimal = parse_number(&shell.prompt_required("Enter Price: ")?)?;
    let stock: u32 = parse_number(&shell.prompt_required("Enter Stock Quantity: ")?)?;
    let kind = match category {
        1 => ProductKind::Electronics {
            brand: shell.prompt_required("Enter Brand: ")?,
        },
        2 => ProductKind::Clothing {
            size: shell.prompt_required("Enter Size: ")?,
        },
        _ => {
            return Err(ShopError::Validation(
                "invalid product type".to_string(),
            ));
        }
    };

    app.catalog.add_product(Product::new(id, name, price, stock, kind)?).await?;
    shell.line("Product added.")
}

async fn order_history<R: BufRead, W: Write>(shell: &mut Shell<R, W>, app: &App) -> Result<()> {
    let orders = app.engine.orders().await?;
    if orders.is_empty() {
        return shell.line("No orders yet.");
    }
    shell.line(format!("Order History for {}:", app.customer.name()))?;
    for order in orders {
        shell.line(format!(
            "Order Date: {} | Total Paid: ${:.2}",
            order.placed_at.format("%Y-%m-%d %H:%M:%S UTC"),
            order.total_paid
        ))?;
        shell.line("Items:")?;
        for line in &order.lines {
            shell.line(format!(
                "  {} x{} (${:.2} each)",
                line.name, line.quantity, line.unit_price
            ))?;
        }
        shell.line("Payments:")?;
        for payment in &order.payments {
            shell.line(format!("  {}: ${:.2}", payment.instrument, payment.amount))?;
        }
    }
    Ok(())
}

fn manage_instruments<R: BufRead, W: Write>(shell: &mut Shell<R, W>, app: &mut App) -> Result<()> {
    shell.line("")?;
    shell.line("Payment Instrument Management:")?;
    shell.line("1. View Payment Instruments and Balances")?;
    shell.line("2. Add Payment Instrument")?;
    shell.line("3. Remove Payment Instrument")?;
    shell.line("4. Add Funds to Payment Instrument")?;
    shell.line("5. Back")?;
    let choice: u32 = parse_number(&shell.prompt_required("Choose an option: ")?)?;

    match choice {
        1 => list_instruments(shell, app.customer.instruments())?,
        2 => {
            let kind: u32 =
                parse_number(&shell.prompt_required("Enter type (1=Credit Card, 2=Wallet): ")?)?;
            match kind {
                1 => {
                    let number = shell.prompt_required("Enter 16-digit card number: ")?;
                    let balance: Decimal =
                        parse_number(&shell.prompt_required("Enter available balance: ")?)?;
                    app.customer
                        .add_instrument(PaymentInstrument::card(number, balance)?);
                    shell.line("Credit card added.")?;
                }
                2 => {
                    let email = shell.prompt_required("Enter wallet email: ")?;
                    let balance: Decimal =
                        parse_number(&shell.prompt_required("Enter available balance: ")?)?;
                    app.customer
                        .add_instrument(PaymentInstrument::wallet(email, balance)?);
                    shell.line("Wallet added.")?;
                }
                _ => {
                    return Err(ShopError::Validation(
                        "invalid payment instrument type".to_string(),
                    ));
                }
            }
        }
        3 => {
            list_instruments(shell, app.customer.instruments())?;
            let index: usize = parse_number(&shell.prompt_required("Enter index to remove: ")?)?;
            let index = index.checked_sub(1).ok_or(ShopError::InvalidIndex)?;
            app.customer.remove_instrument(index)?;
            shell.line("Payment instrument removed.")?;
        }
        4 => {
            list_instruments(shell, app.customer.instruments())?;
            let index: usize = parse_number(&shell.prompt_required(
                "Select payment instrument to add funds (index) or 0 to cancel: ",
            )?)?;
            if index == 0 {
                return Ok(());
            }
            let amount: Decimal = parse_number(&shell.prompt_required("Enter amount to add: ")?)?;
            let instrument = app.customer.instrument_mut(index - 1)?;
            instrument.credit(Amount::new(amount)?);
            shell.line(format!(
                "Added ${:.2} to {}. New balance: ${:.2}",
                amount,
                instrument.describe(),
                instrument.balance().0
            ))?;
        }
        5 => {}
        _ => shell.line("Invalid choice.")?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number::<u32>("7").unwrap(), 7);
        assert_eq!(parse_number::<Decimal>("19.99").unwrap(), dec!(19.99));
        assert!(matches!(
            parse_number::<u32>("seven"),
            Err(ShopError::Validation(_))
        ));
        assert!(matches!(
            parse_number::<u32>("-1"),
            Err(ShopError::Validation(_))
        ));
    }

    #[test]
    fn test_shell_reads_until_eof() {
        let input = b"first\nsecond\n" as &[u8];
        let mut out = Vec::new();
        let mut shell = Shell::new(input, &mut out);

        assert_eq!(shell.read_line().unwrap().as_deref(), Some("first"));
        assert_eq!(shell.prompt("> ").unwrap().as_deref(), Some("second"));
        assert_eq!(shell.read_line().unwrap(), None);
        assert!(shell.prompt_required("> ").is_err());
    }

    #[test]
    fn test_render_product_dispatches_on_kind() {
        let phone = Product::new(
            "E01",
            "Smartphone",
            dec!(299.99),
            0,
            ProductKind::Electronics {
                brand: "Samsung".to_string(),
            },
        )
        .unwrap();
        let rendered = render_product(&phone);
        assert!(rendered.contains("Electronics: Smartphone"));
        assert!(rendered.contains("(Brand: Samsung)"));
        assert!(rendered.contains("[SOLD OUT]"));

        let shirt = Product::new(
            "C01",
            "T-shirt",
            dec!(19.99),
            10,
            ProductKind::Clothing {
                size: "M".to_string(),
            },
        )
        .unwrap();
        let rendered = render_product(&shirt);
        assert!(rendered.contains("(Size: M)"));
        assert!(!rendered.contains("SOLD OUT"));
    }
}
