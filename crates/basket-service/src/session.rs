//! # Session Store
//!
//! Where carts live between requests.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  request ──► with_session(store, id, |cart| ...)                        │
//! │                │                                                        │
//! │                ├── store.load(id)      (or an empty cart)               │
//! │                ├── closure runs a CartService over &mut cart            │
//! │                └── store.save(id, cart)                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store only guards its own map. Two requests for the same session
//! running at once can still overwrite each other's cart; hosts serving
//! concurrent requests serialize them per session.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::debug;
use uuid::Uuid;

use basket_core::Cart;

/// Persists carts by session id.
pub trait SessionStore {
    /// The stored cart, or `None` for an unknown session.
    fn load(&self, session_id: &str) -> Option<Cart>;

    fn save(&self, session_id: &str, cart: Cart);

    fn discard(&self, session_id: &str);
}

/// Restores the session's cart, runs `f` on it, and saves it back.
///
/// ## Usage
/// ```rust
/// use basket_core::{Attributes, Money, Product, ProductId, Weight};
/// use basket_service::{with_session, CartService, InMemoryCatalog, Lexicon, MemorySessionStore};
///
/// let catalog = InMemoryCatalog::new().with_product(Product::new(
///     ProductId::new(5).unwrap(),
///     "Espresso Beans",
///     Money::from_cents(1000),
///     Weight::from_grams(1000),
/// ));
/// let lexicon = Lexicon::english();
/// let store = MemorySessionStore::new();
/// let session = store.open_session();
///
/// with_session(&store, &session, |cart| {
///     CartService::new(cart, &catalog, &lexicon).add(5, 2, Attributes::new())
/// });
///
/// let status = with_session(&store, &session, |cart| cart.status());
/// assert_eq!(status.count, 2);
/// ```
pub fn with_session<S, F, R>(store: &S, session_id: &str, f: F) -> R
where
    S: SessionStore + ?Sized,
    F: FnOnce(&mut Cart) -> R,
{
    let mut cart = store.load(session_id).unwrap_or_default();
    debug!(session_id, lines = cart.len(), "Cart restored");

    let result = f(&mut cart);

    debug!(session_id, lines = cart.len(), "Cart saved");
    store.save(session_id, cart);
    result
}

// =============================================================================
// In-Memory Store
// =============================================================================

/// Process-local session store.
///
/// Cloning yields another handle to the same map.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    carts: Arc<Mutex<HashMap<String, Cart>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        MemorySessionStore::default()
    }

    /// Starts a session with an empty cart and returns its id.
    pub fn open_session(&self) -> String {
        let session_id = Uuid::new_v4().to_string();
        self.lock().insert(session_id.clone(), Cart::new());
        debug!(session_id = %session_id, "Session opened");
        session_id
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Cart>> {
        // A panic in another holder leaves the map itself intact.
        self.carts.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self, session_id: &str) -> Option<Cart> {
        self.lock().get(session_id).cloned()
    }

    fn save(&self, session_id: &str, cart: Cart) {
        self.lock().insert(session_id.to_string(), cart);
    }

    fn discard(&self, session_id: &str) {
        if self.lock().remove(session_id).is_some() {
            debug!(session_id, "Session discarded");
        }
    }
}
