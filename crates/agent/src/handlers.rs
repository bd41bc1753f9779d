//! Per-intent business rules. Every handler is a function of the query and
//! the session/catalog it needs, returning either the customer-facing reply
//! or an [`AgentError`] the runtime renders into one. Handlers mutate the
//! session directly; the catalog is read-only.

use chrono::{Duration, Utc};
use rand::Rng;
use rust_decimal::Decimal;
use shopmate_core::{
    AgentError, Catalog, NameMatch, Order, OrderStatus, Product, Session, SizeChart, StoreConfig,
    StorePolicies,
};

use crate::extract::{self, CartAction};

pub fn purchase<R: Rng>(
    session: &mut Session,
    store: &StoreConfig,
    rng: &mut R,
) -> Result<String, AgentError> {
    if session.cart.is_empty() {
        return Ok("Cart is empty. Add items first.".to_string());
    }

    let order_id = session.next_order_id();
    let placed_at = Utc::now();
    let order = Order {
        id: order_id.clone(),
        items: session.cart.clone(),
        placed_at,
        status: OrderStatus::Processing,
        tracking: format!("TRACK-{}", rng.gen_range(1000..=9999)),
    };
    session.orders.push(order);
    session.cart.clear();

    let arrival = placed_at + Duration::days(store.delivery_days);
    Ok(format!(
        "Purchase complete. Order ID: {}. Estimated arrival: {}.",
        order_id.0,
        arrival.format("%Y-%m-%d")
    ))
}

pub fn return_order(
    query: &str,
    session: &mut Session,
    store: &StoreConfig,
) -> Result<String, AgentError> {
    let order_id = extract::order_id(query)
        .ok_or_else(|| AgentError::missing("Please provide order ID for return."))?;
    let age_days = session
        .find_order(order_id)
        .ok_or_else(|| AgentError::not_found("Order not found."))?
        .age_days(Utc::now());

    if age_days > store.return_window_days {
        return Err(AgentError::policy(format!(
            "Sorry, returns not allowed after {} days per policy.",
            store.return_window_days
        )));
    }

    session.remove_order(order_id);
    Ok("Return approved. Prepaid label: dummy_return_label.pdf. Drop off at nearest post office."
        .to_string())
}

pub fn cancel_order(
    query: &str,
    session: &mut Session,
    store: &StoreConfig,
) -> Result<String, AgentError> {
    let order_id = extract::order_id(query)
        .ok_or_else(|| AgentError::missing("Please provide order ID to cancel."))?;
    let age_hours = session
        .find_order(order_id)
        .ok_or_else(|| AgentError::not_found("Order not found."))?
        .age_hours(Utc::now());

    if age_hours > store.cancel_window_hours {
        return Err(AgentError::policy(format!(
            "Sorry, cancellations not allowed after {} hours per policy.",
            store.cancel_window_hours
        )));
    }

    session.remove_order(order_id);
    Ok("Order canceled successfully.".to_string())
}

pub fn track_order(
    query: &str,
    session: &Session,
    store: &StoreConfig,
) -> Result<String, AgentError> {
    let order_id =
        extract::order_id(query).ok_or_else(|| AgentError::missing("Please provide order ID."))?;
    let order = session
        .find_order(order_id)
        .ok_or_else(|| AgentError::not_found("Order not found."))?;

    let days_left = (store.delivery_days - order.age_days(Utc::now())).max(0);
    Ok(format!(
        "Order status: {}. Tracking: {}. Arrival in approx {} days.",
        order.status.label(),
        order.tracking,
        days_left
    ))
}

/// Simulated acknowledgment only; real order edits are out of scope.
pub fn change_order(query: &str, session: &Session) -> Result<String, AgentError> {
    let order_id = extract::order_id(query)
        .ok_or_else(|| AgentError::missing("Please provide order ID to change."))?;
    session
        .find_order(order_id)
        .ok_or_else(|| AgentError::not_found("Order not found."))?;

    Ok("Order changed successfully. New items: [updated list].".to_string())
}

pub fn add_to_cart(
    query: &str,
    session: &mut Session,
    catalog: &Catalog,
) -> Result<String, AgentError> {
    let name = extract::cart_item_name(query, CartAction::Add)
        .ok_or_else(|| AgentError::missing("Please specify the product to add."))?;
    let product = resolve_strict(catalog, &name)?;

    session.cart.push(product.id);
    Ok(format!("{} added to cart.", product.name))
}

pub fn remove_from_cart(
    query: &str,
    session: &mut Session,
    catalog: &Catalog,
) -> Result<String, AgentError> {
    let name = extract::cart_item_name(query, CartAction::Remove)
        .ok_or_else(|| AgentError::missing("Please specify the product to remove."))?;
    let product = resolve_strict(catalog, &name)?;

    // Removing something that was never added is a no-op, not an error.
    match session.cart.iter().position(|id| *id == product.id) {
        Some(index) => {
            session.cart.remove(index);
            Ok(format!("{} removed from cart.", product.name))
        }
        None => Ok("Product not in cart.".to_string()),
    }
}

pub fn view_cart(session: &Session, catalog: &Catalog) -> Result<String, AgentError> {
    if session.cart.is_empty() {
        return Ok("Your cart is empty.".to_string());
    }

    let items: Vec<&str> = session
        .cart
        .iter()
        .filter_map(|id| catalog.find(*id))
        .map(|product| product.name.as_str())
        .collect();
    Ok(format!("Cart items: {}", items.join(", ")))
}

pub fn update_info(query: &str, session: &mut Session) -> Result<String, AgentError> {
    let lowered = query.to_lowercase();
    let field = if lowered.contains("name") {
        Field::Name
    } else if lowered.contains("address") {
        Field::Address
    } else {
        return Err(AgentError::missing("Please specify what to update (name or address)."));
    };

    let value = extract::after_keyword(query, "to")
        .ok_or_else(|| AgentError::missing("Please provide the new value after 'to'."))?;

    match field {
        Field::Name => {
            session.profile.name = value.to_string();
            Ok(format!("Name updated to {value}."))
        }
        Field::Address => {
            session.profile.address = value.to_string();
            Ok(format!("Address updated to {value}."))
        }
    }
}

enum Field {
    Name,
    Address,
}

pub fn coupon(
    session: &Session,
    catalog: &Catalog,
    store: &StoreConfig,
) -> Result<String, AgentError> {
    let total: Decimal = session
        .cart
        .iter()
        .filter_map(|id| catalog.find(*id))
        .map(|product| product.price)
        .sum();

    if total > Decimal::from(store.coupon_threshold) {
        let keep = Decimal::from(100u32 - u32::from(store.coupon_discount_pct));
        let discounted = (total * keep / Decimal::from(100)).normalize();
        Ok(format!(
            "Applied {}% discount. New total: ${discounted}.",
            store.coupon_discount_pct
        ))
    } else {
        Ok(format!(
            "No eligible coupons. Check eligibility: Orders over ${}.",
            store.coupon_threshold
        ))
    }
}

pub fn warranty(session: &Session) -> Result<String, AgentError> {
    if !session.warranty_subscribed {
        return Ok(
            "Warranty claims require separate subscription. Please subscribe to proceed."
                .to_string(),
        );
    }
    Ok("Warranty claim processed. Next steps: Send item to repair center.".to_string())
}

pub fn size_fit(query: &str, catalog: &Catalog, sizes: &SizeChart) -> Result<String, AgentError> {
    // An absent "for" clause leaves an empty fragment, which matches the
    // first catalog product.
    let fragment = extract::after_keyword(query, "for").unwrap_or_default();
    let sized = catalog
        .first_name_match(fragment)
        .and_then(|product| product.size.as_deref().map(|size| (product, size)));

    match sized {
        Some((product, size)) => {
            let conversion = sizes.conversion(&product.category, size).unwrap_or("No conversion");
            Ok(format!(
                "Recommended size: {size}. Conversions: {conversion}. Compatibility: Fits standard."
            ))
        }
        None => Ok("No size info available.".to_string()),
    }
}

pub fn reorder(session: &mut Session, catalog: &Catalog) -> Result<String, AgentError> {
    let items = match session.last_order() {
        Some(order) => order.items.clone(),
        None => return Ok("No previous orders.".to_string()),
    };

    let names: Vec<&str> = items
        .iter()
        .filter_map(|id| catalog.find(*id))
        .map(|product| product.name.as_str())
        .collect();
    let reply = format!(
        "Reordered: {}. Subscription: Monthly (pause/cancel via 'subscription pause').",
        names.join(", ")
    );
    session.cart.extend(items);
    Ok(reply)
}

pub fn view_history(session: &Session) -> Result<String, AgentError> {
    if session.query_log.is_empty() {
        return Ok("No query history available yet.".to_string());
    }

    let lines: Vec<String> = session
        .query_log
        .iter()
        .map(|entry| {
            format!("{}: {} - {}", entry.at.format("%Y-%m-%d %H:%M:%S"), entry.query, entry.response)
        })
        .collect();
    Ok(format!("Query History:\n{}", lines.join("\n")))
}

pub fn policy_faq(query: &str, policies: &StorePolicies) -> Result<String, AgentError> {
    match policies.lookup(query) {
        Some(text) => Ok(text.to_string()),
        None => Ok(policies.render_all()),
    }
}

pub fn payment_info(session: &Session) -> Result<String, AgentError> {
    Ok(format!("Payment information: {} (never share full details).", session.profile.payment))
}

pub fn payment_process() -> Result<String, AgentError> {
    Ok("Payment processing simulated. Use BNPL option? Yes/No (demo: completed). Safe options: Credit, PayPal."
        .to_string())
}

pub fn unknown(session: &Session) -> Result<String, AgentError> {
    if session.cart.is_empty() {
        Ok("Sorry, I can't handle this. Redirecting to human support with history.".to_string())
    } else {
        Ok("Abandoned cart reminder: You have items in cart. Proceed to checkout? Also, redirecting to human support."
            .to_string())
    }
}

fn resolve_strict<'a>(catalog: &'a Catalog, name: &str) -> Result<&'a Product, AgentError> {
    match catalog.resolve_name(name) {
        NameMatch::One(product) => Ok(product),
        NameMatch::None => Err(AgentError::not_found("Product not found.")),
        NameMatch::Many(candidates) => Err(AgentError::AmbiguousProduct {
            name: name.to_string(),
            candidates: candidates.iter().map(|product| product.name.clone()).collect(),
        }),
    }
}
