//! Interactive shopping session.
//!
//! Login and account creation talk to the user directory; everything after
//! that drives the commerce engine through the coordinator. Engine
//! failures are recoverable here (print, then back to the menu), except a
//! persistence failure, which aborts the session.

use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input, Password, Select};
use drip_commerce::prelude::*;
use drip_data::{JsonlLedger, UserDirectory, UserRecord};
use sha2::{Digest, Sha256};

use super::ShopArgs;
use crate::commands::{history, products};
use crate::context::Context;

/// Run the shop command.
pub fn run(args: ShopArgs, ctx: &Context) -> Result<()> {
    ctx.output
        .debug(&format!("data dir: {}", ctx.data_dir().display()));
    let catalog = ctx.catalog()?;
    let users = ctx.users()?;
    let mut ledger = ctx.ledger()?;

    if !args.no_banner {
        ctx.output
            .header(&format!("Welcome to {}!", ctx.config.store.name));
        ctx.output.info("Greetings! How may I assist you today?");
    }

    loop {
        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Welcome page")
            .items(&["Login", "Create account", "Exit"])
            .default(0)
            .interact()?;

        match choice {
            0 => {
                if let Some(customer) = login(&users, ctx)? {
                    session(&customer, &catalog, &mut ledger, ctx)?;
                }
            }
            1 => create_account(&users, ctx)?,
            _ => {
                ctx.output.success("Thank you for visiting our store. Goodbye!");
                return Ok(());
            }
        }
    }
}

/// One logged-in session with its own cart.
fn session(
    customer: &CustomerInfo,
    catalog: &SharedCatalog,
    ledger: &mut JsonlLedger,
    ctx: &Context,
) -> Result<()> {
    let mut cart = Cart::new();

    loop {
        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Home page")
            .items(&[
                "View products",
                "Add to cart",
                "View cart",
                "Remove from cart",
                "Checkout",
                "Purchase history",
                "Logout",
            ])
            .default(0)
            .interact()?;

        match choice {
            0 => {
                ctx.output
                    .header(&format!("Products of {}", ctx.config.store.name));
                products::render_table(&catalog.list(), &ctx.output);
            }
            1 => add_to_cart(&mut cart, catalog, ledger, ctx)?,
            2 => view_cart(&cart, ctx)?,
            3 => remove_from_cart(&mut cart, catalog, ledger, ctx)?,
            4 => checkout(&mut cart, customer, catalog, ledger, ctx)?,
            5 => {
                ctx.output.header("Purchase history");
                let orders = ledger.history(&customer.username)?;
                history::render(&orders, &ctx.output);
            }
            _ => {
                ctx.output.success(&format!(
                    "Logged out successfully. Have a nice day, {}!",
                    customer.username
                ));
                return Ok(());
            }
        }
    }
}

fn login(users: &UserDirectory, ctx: &Context) -> Result<Option<CustomerInfo>> {
    let username: String = Input::new()
        .with_prompt("Username")
        .validate_with(non_empty)
        .interact_text()?;
    let password = Password::new().with_prompt("Password").interact()?;

    match users.find(username.trim())? {
        Some(record) if record.password_hash == hash_password(&password) => {
            ctx.output.success(&format!(
                "Welcome {} {}!",
                record.first_name, record.last_name
            ));
            Ok(Some(CustomerInfo::new(
                record.username,
                record.first_name,
                record.last_name,
            )))
        }
        _ => {
            ctx.output.error("Invalid username or password.");
            Ok(None)
        }
    }
}

fn create_account(users: &UserDirectory, ctx: &Context) -> Result<()> {
    let first_name: String = Input::new()
        .with_prompt("First name")
        .validate_with(alphabetic)
        .interact_text()?;
    let last_name: String = Input::new()
        .with_prompt("Last name")
        .validate_with(alphabetic)
        .interact_text()?;
    let username: String = Input::new()
        .with_prompt("Username")
        .validate_with(non_empty)
        .interact_text()?;

    if users.find(username.trim())?.is_some() {
        ctx.output
            .error("Username already exists. Please choose a different one.");
        return Ok(());
    }

    let password = Password::new()
        .with_prompt("Password (at least 8 characters)")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;
    if password.chars().count() < 8 {
        ctx.output.error("Password must be at least 8 characters long.");
        return Ok(());
    }

    users.insert(&UserRecord {
        first_name: first_name.trim().to_string(),
        last_name: last_name.trim().to_string(),
        username: username.trim().to_string(),
        password_hash: hash_password(&password),
    })?;
    ctx.output.success("Account created successfully!");
    Ok(())
}

fn add_to_cart(
    cart: &mut Cart,
    catalog: &SharedCatalog,
    ledger: &mut JsonlLedger,
    ctx: &Context,
) -> Result<()> {
    let snapshot = catalog.list();
    if snapshot.is_empty() {
        ctx.output.warn("No products available.");
        return Ok(());
    }

    let items: Vec<String> = snapshot
        .iter()
        .map(|p| format!("{} - {} - stock {}", p.title, p.unit_price, p.stock_quantity))
        .collect();
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Pick a product")
        .items(&items)
        .default(0)
        .interact()?;
    let quantity: u32 = Input::new()
        .with_prompt(format!("Quantity for '{}'", snapshot[index].title))
        .validate_with(positive)
        .interact_text()?;

    let coordinator = Checkout::new(catalog, ledger);
    match coordinator.add_to_cart(cart, &snapshot[index].title, quantity) {
        Ok(()) => ctx.output.success(&format!(
            "Added {} x {} to the cart.",
            quantity, snapshot[index].title
        )),
        Err(e) => ctx.output.error(&e.to_string()),
    }
    Ok(())
}

fn view_cart(cart: &Cart, ctx: &Context) -> Result<()> {
    ctx.output.header(&format!(
        "Current cart, {}",
        chrono::Local::now().format("%d %B %Y, %H:%M:%S")
    ));
    let view = cart.view()?;
    if view.is_empty() {
        ctx.output.warn("Your cart is empty.");
        return Ok(());
    }
    for line in &view.lines {
        ctx.output.list_item(&format!(
            "{} - {} x {}",
            line.title, line.unit_price, line.quantity
        ));
    }
    ctx.output.kv("Total", &view.total.to_string());
    Ok(())
}

fn remove_from_cart(
    cart: &mut Cart,
    catalog: &SharedCatalog,
    ledger: &mut JsonlLedger,
    ctx: &Context,
) -> Result<()> {
    view_cart(cart, ctx)?;
    if cart.is_empty() {
        return Ok(());
    }

    let title: String = Input::new()
        .with_prompt("Product title to remove")
        .validate_with(non_empty)
        .interact_text()?;
    let quantity: u32 = Input::new()
        .with_prompt(format!("Quantity to remove for '{}'", title.trim()))
        .validate_with(positive)
        .interact_text()?;

    let coordinator = Checkout::new(catalog, ledger);
    match coordinator.remove_from_cart(cart, title.trim(), quantity) {
        Ok(freed) => ctx.output.success(&format!(
            "Removed {} x {} from the cart.",
            freed,
            title.trim()
        )),
        Err(e) => ctx.output.error(&e.to_string()),
    }
    Ok(())
}

fn checkout(
    cart: &mut Cart,
    customer: &CustomerInfo,
    catalog: &SharedCatalog,
    ledger: &mut JsonlLedger,
    ctx: &Context,
) -> Result<()> {
    if cart.is_empty() {
        ctx.output.error("Your cart is empty. Nothing to checkout.");
        return Ok(());
    }

    let street: String = Input::new()
        .with_prompt("Address of residence")
        .validate_with(non_empty)
        .interact_text()?;
    let landmark: String = Input::new()
        .with_prompt("A famous location near your area")
        .validate_with(non_empty)
        .interact_text()?;
    let city: String = Input::new()
        .with_prompt("City")
        .validate_with(non_empty)
        .interact_text()?;
    let state: String = Input::new()
        .with_prompt("State")
        .validate_with(non_empty)
        .interact_text()?;
    let address = Address::new(street.trim(), landmark.trim(), city.trim(), state.trim());

    let payment = prompt_payment(ctx)?;

    match Checkout::new(catalog, ledger).place_order(cart, customer, address, Some(payment)) {
        Ok(order) => {
            ctx.output.success(&format!(
                "Checkout successful! Order {} ({}) will be delivered in 4-5 working days. Thank you!",
                order.id, order.total
            ));
            feedback_form(ctx)?;
        }
        // A failed durable write means nothing is committed; end the
        // attempt instead of re-prompting.
        Err(e @ StoreError::PersistenceFailure(_)) => return Err(e.into()),
        Err(e) => ctx.output.error(&e.to_string()),
    }
    Ok(())
}

fn prompt_payment(ctx: &Context) -> Result<PaymentMethod> {
    let choice = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Payment method")
        .items(&["Cash on delivery", "Card"])
        .default(0)
        .interact()?;

    if choice == 1 {
        // Collected to mirror the storefront flow; never stored.
        let _card: String = Input::new()
            .with_prompt("Card details")
            .validate_with(non_empty)
            .interact_text()?;
        Ok(PaymentMethod::Card)
    } else {
        ctx.output.info("Rider will collect the payment at your doorstep.");
        Ok(PaymentMethod::CashOnDelivery)
    }
}

fn feedback_form(ctx: &Context) -> Result<()> {
    let wants_to = Confirm::new()
        .with_prompt("Would you like to give feedback on our services?")
        .default(false)
        .interact()?;
    if wants_to {
        let _feedback: String = Input::new()
            .with_prompt("Give your feedback here")
            .validate_with(non_empty)
            .interact_text()?;
        ctx.output.success("Thank you for your valuable feedback!");
    }
    Ok(())
}

fn hash_password(password: &str) -> String {
    let digest = Sha256::digest(password.as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

fn non_empty(input: &String) -> Result<(), &'static str> {
    if input.trim().is_empty() {
        Err("value cannot be empty")
    } else {
        Ok(())
    }
}

fn alphabetic(input: &String) -> Result<(), &'static str> {
    let trimmed = input.trim();
    if trimmed.is_empty() || !trimmed.chars().all(char::is_alphabetic) {
        Err("must contain only letters")
    } else {
        Ok(())
    }
}

fn positive(input: &u32) -> Result<(), &'static str> {
    if *input == 0 {
        Err("quantity must be a positive integer")
    } else {
        Ok(())
    }
}
