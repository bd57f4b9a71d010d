//! # Session Cart State
//!
//! Holds the cart for one user session.
//!
//! ## Thread Safety
//! The cart is wrapped in `Arc<Mutex<T>>` because:
//! 1. Multiple requests from the same session may access/modify the cart
//! 2. Only one request should modify the cart at a time
//! 3. Request handlers can run concurrently
//!
//! ## Scope
//! One `CartState` per user session, created at session start and passed
//! explicitly through request context. There is NO ambient global cart:
//! different users' carts are different `CartState` values and never
//! contend with each other.

use std::sync::{Arc, Mutex};

use artisell_core::Cart;

/// Session-scoped cart state.
///
/// ## Why Not RwLock?
/// Cart operations are quick, and most operations modify state.
/// A RwLock would add complexity with minimal benefit.
#[derive(Debug, Clone)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        CartState {
            cart: Arc::new(Mutex::new(Cart::new())),
        }
    }

    /// Executes a function with read access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let items = cart_state.with_cart(|cart| cart.items.clone());
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// cart_state.with_cart_mut(|cart| cart.add_item(&product, 1))?;
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().expect("Cart mutex poisoned");
        f(&mut cart)
    }
}

impl Default for CartState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_sessions_do_not_share_state() {
        let session_a = CartState::new();
        let session_b = CartState::new();

        session_a.with_cart_mut(|c| c.created_at = chrono::Utc::now());

        assert_eq!(session_a.with_cart(|c| c.item_count()), 0);
        assert_eq!(session_b.with_cart(|c| c.item_count()), 0);

        // Clones of the same state DO share the underlying cart
        let handle = session_a.clone();
        assert_eq!(
            handle.with_cart(|c| c.created_at),
            session_a.with_cart(|c| c.created_at)
        );
    }
}
